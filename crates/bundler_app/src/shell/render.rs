use std::collections::HashMap;
use std::io::{self, Write};

use bundler_core::{AppViewModel, JobId, Notice, UrlStatus};

/// Prints one line per row transition and one line per notice change.
///
/// Rows are diffed against what was printed before, so calling `render` with
/// an unchanged view prints nothing.
pub(crate) struct Renderer<W: Write> {
    out: W,
    printed: HashMap<JobId, UrlStatus>,
    last_notice: Option<Notice>,
}

impl<W: Write> Renderer<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            printed: HashMap::new(),
            last_notice: None,
        }
    }

    pub(crate) fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        for row in &view.jobs {
            if self.printed.get(&row.job_id) == Some(&row.status) {
                continue;
            }
            let progress = format!("[{}/{}]", view.completed, view.total);
            match &row.status {
                UrlStatus::Pending => writeln!(self.out, "{progress} Pending: {}", row.url)?,
                UrlStatus::Done => writeln!(self.out, "{progress} Done: {}", row.url)?,
                UrlStatus::Failed(detail) => {
                    writeln!(self.out, "{progress} Error: {} - {detail}", row.url)?
                }
            }
            self.printed.insert(row.job_id, row.status.clone());
        }

        if view.notice != self.last_notice {
            match &view.notice {
                Some(Notice::EmptyInput) => writeln!(self.out, "Please enter at least one URL.")?,
                Some(Notice::NoContent) => writeln!(self.out, "No content was retrieved.")?,
                Some(Notice::Bundled { pages, failed }) => writeln!(
                    self.out,
                    "Bundled {pages} page(s) successfully, {failed} failed."
                )?,
                None => {}
            }
            self.last_notice = view.notice.clone();
        }
        self.out.flush()
    }

    pub(crate) fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use bundler_core::{JobRowView, RunPhase};

    use super::*;

    fn view(rows: &[(JobId, &str, UrlStatus)], completed: usize) -> AppViewModel {
        AppViewModel {
            phase: RunPhase::Running,
            jobs: rows
                .iter()
                .map(|(job_id, url, status)| JobRowView {
                    job_id: *job_id,
                    url: url.to_string(),
                    status: status.clone(),
                })
                .collect(),
            completed,
            total: rows.len(),
            notice: None,
            dirty: true,
        }
    }

    fn output(renderer: Renderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn only_transitions_are_printed() {
        let mut renderer = Renderer::new(Vec::new());
        let pending = view(
            &[
                (1, "https://a.example", UrlStatus::Pending),
                (2, "https://b.example", UrlStatus::Pending),
            ],
            0,
        );
        renderer.render(&pending).unwrap();
        renderer.render(&pending).unwrap();
        renderer
            .render(&view(
                &[
                    (1, "https://a.example", UrlStatus::Pending),
                    (2, "https://b.example", UrlStatus::Failed("timeout".into())),
                ],
                1,
            ))
            .unwrap();

        assert_eq!(
            output(renderer),
            "[0/2] Pending: https://a.example\n\
             [0/2] Pending: https://b.example\n\
             [1/2] Error: https://b.example - timeout\n"
        );
    }

    #[test]
    fn notices_print_once() {
        let mut renderer = Renderer::new(Vec::new());
        let mut finished = view(&[(1, "https://a.example", UrlStatus::Done)], 1);
        finished.notice = Some(Notice::NoContent);

        renderer.render(&finished).unwrap();
        renderer.render(&finished).unwrap();

        assert_eq!(
            output(renderer),
            "[1/1] Done: https://a.example\nNo content was retrieved.\n"
        );
    }
}
