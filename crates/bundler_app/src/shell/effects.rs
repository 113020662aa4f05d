use bundler_core::{Effect, JobResultKind, Msg};
use bundler_engine::{BundlerConfig, Dispatcher, EngineHandle, ProgressEvent, ProgressState};
use engine_logging::engine_info;

/// Turns the single `StartRun` effect into a running engine.
pub(crate) fn start_run(
    effects: Vec<Effect>,
    config: &BundlerConfig,
) -> anyhow::Result<Option<EngineHandle>> {
    let Some(Effect::StartRun { urls }) = effects.into_iter().next() else {
        return Ok(None);
    };
    let dispatcher = Dispatcher::from_config(config)?;
    engine_info!(
        "StartRun url_count={} concurrency={} timeout={}s",
        urls.len(),
        dispatcher.concurrency_limit(),
        config.timeout_seconds
    );
    Ok(Some(EngineHandle::spawn(dispatcher, urls)?))
}

pub(crate) fn progress_to_msg(event: ProgressEvent) -> Msg {
    let ProgressEvent {
        job_id, url, state, ..
    } = event;
    match state {
        ProgressState::Pending => Msg::UrlPending { job_id, url },
        ProgressState::Success => Msg::UrlDone {
            job_id,
            result: JobResultKind::Success,
        },
        ProgressState::Error(detail) => Msg::UrlDone {
            job_id,
            result: JobResultKind::Failed(detail),
        },
    }
}
