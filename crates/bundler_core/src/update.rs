use crate::{AppState, Effect, Msg, Notice, RunPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputSubmitted(raw) => {
            // One run at a time; input during a run is dropped, not queued.
            if state.phase() == RunPhase::Running {
                return (state, Vec::new());
            }
            let urls = parse_urls(&raw);
            if urls.is_empty() {
                state.set_notice(Notice::EmptyInput);
                Vec::new()
            } else {
                state.begin_run(urls.len());
                vec![Effect::StartRun { urls }]
            }
        }
        Msg::UrlPending { job_id, url } => {
            state.mark_pending(job_id, url);
            Vec::new()
        }
        Msg::UrlDone { job_id, result } => {
            state.apply_done(job_id, result);
            Vec::new()
        }
        Msg::RunFinished {
            success_count,
            error_count,
        } => {
            state.finish(success_count, error_count);
            Vec::new()
        }
    };

    (state, effects)
}

/// One URL per line, trimmed; blank lines dropped, duplicates kept.
pub fn parse_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
