use std::sync::Once;

use bundler_core::{
    parse_urls, update, AppState, Effect, JobResultKind, Msg, Notice, RunPhase, UrlStatus,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn started(input: &str) -> AppState {
    let (mut state, effects) = update(AppState::new(), Msg::InputSubmitted(input.to_string()));
    let Some(Effect::StartRun { urls }) = effects.into_iter().next() else {
        panic!("expected a StartRun effect");
    };
    for (index, url) in urls.into_iter().enumerate() {
        let (next, _) = update(
            state,
            Msg::UrlPending {
                job_id: index as u64 + 1,
                url,
            },
        );
        state = next;
    }
    state
}

#[test]
fn parse_urls_trims_drops_blanks_and_keeps_duplicates() {
    let input = "  https://a.example \n\n\t\nhttps://b.example\nhttps://a.example\n   ";
    assert_eq!(
        parse_urls(input),
        vec![
            "https://a.example".to_string(),
            "https://b.example".to_string(),
            "https://a.example".to_string(),
        ]
    );
}

#[test]
fn submitting_urls_starts_a_run() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::InputSubmitted("https://a.example\n\nhttps://b.example\n".to_string()),
    );

    assert_eq!(
        effects,
        vec![Effect::StartRun {
            urls: vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ],
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, RunPhase::Running);
    assert_eq!(view.total, 2);
    assert_eq!(view.completed, 0);
    assert!(view.dirty);
}

#[test]
fn blank_input_warns_without_effects() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::InputSubmitted("  \n\n \t".into()));

    assert!(effects.is_empty());
    assert_eq!(state.view().phase, RunPhase::Idle);
    assert_eq!(state.view().notice, Some(Notice::EmptyInput));
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn pending_rows_render_in_job_order() {
    init_logging();
    let state = started("https://b.example\nhttps://a.example\n");
    let view = state.view();

    let rows: Vec<_> = view
        .jobs
        .iter()
        .map(|row| (row.job_id, row.url.as_str(), row.status.clone()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "https://b.example", UrlStatus::Pending),
            (2, "https://a.example", UrlStatus::Pending),
        ]
    );
}

#[test]
fn completions_update_rows_and_ratio() {
    init_logging();
    let state = started("https://a.example\nhttps://b.example\nhttps://c.example\nhttps://d.example");

    let (state, _) = update(
        state,
        Msg::UrlDone {
            job_id: 3,
            result: JobResultKind::Success,
        },
    );
    assert_eq!(state.view().progress_ratio(), 0.25);

    let (state, _) = update(
        state,
        Msg::UrlDone {
            job_id: 1,
            result: JobResultKind::Failed("404 Not Found".into()),
        },
    );
    let view = state.view();
    assert_eq!(view.completed, 2);
    assert_eq!(view.progress_ratio(), 0.5);
    assert_eq!(view.jobs[0].status, UrlStatus::Failed("404 Not Found".into()));
    assert_eq!(view.jobs[2].status, UrlStatus::Done);
    assert_eq!(view.jobs[1].status, UrlStatus::Pending);
}

#[test]
fn repeated_completion_is_counted_once() {
    init_logging();
    let state = started("https://a.example\nhttps://b.example");
    let done = Msg::UrlDone {
        job_id: 1,
        result: JobResultKind::Success,
    };

    let (state, _) = update(state, done.clone());
    let (state, _) = update(
        state,
        Msg::UrlDone {
            job_id: 1,
            result: JobResultKind::Failed("late".into()),
        },
    );
    let (state, _) = update(state, done);

    let view = state.view();
    assert_eq!(view.completed, 1);
    assert_eq!(view.jobs[0].status, UrlStatus::Done);
}

#[test]
fn unknown_job_completion_is_ignored() {
    init_logging();
    let state = started("https://a.example");
    let (state, _) = update(
        state,
        Msg::UrlDone {
            job_id: 99,
            result: JobResultKind::Success,
        },
    );
    assert_eq!(state.view().completed, 0);
}

#[test]
fn input_during_run_is_ignored() {
    init_logging();
    let state = started("https://a.example");
    let (state, effects) = update(state, Msg::InputSubmitted("https://other.example".into()));

    assert!(effects.is_empty());
    assert_eq!(state.view().total, 1);
    assert_eq!(state.view().jobs[0].url, "https://a.example");
}

#[test]
fn finishing_with_no_successes_reports_no_content() {
    init_logging();
    let state = started("https://a.example");
    let (state, _) = update(
        state,
        Msg::UrlDone {
            job_id: 1,
            result: JobResultKind::Failed("timeout".into()),
        },
    );
    let (state, _) = update(
        state,
        Msg::RunFinished {
            success_count: 0,
            error_count: 1,
        },
    );

    let view = state.view();
    assert_eq!(view.phase, RunPhase::Finished);
    assert_eq!(view.notice, Some(Notice::NoContent));
}

#[test]
fn finishing_with_successes_reports_bundle_and_allows_new_run() {
    init_logging();
    let state = started("https://a.example\nhttps://b.example");
    let (state, _) = update(
        state,
        Msg::RunFinished {
            success_count: 1,
            error_count: 1,
        },
    );
    assert_eq!(
        state.view().notice,
        Some(Notice::Bundled {
            pages: 1,
            failed: 1
        })
    );

    let (state, effects) = update(state, Msg::InputSubmitted("https://c.example".into()));
    assert_eq!(effects.len(), 1);
    let view = state.view();
    assert_eq!(view.phase, RunPhase::Running);
    assert_eq!(view.notice, None);
    assert!(view.jobs.is_empty());
    assert_eq!(view.total, 1);
}
