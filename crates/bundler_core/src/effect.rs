#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Dispatch the given, already filtered, URLs.
    StartRun { urls: Vec<String> },
}
