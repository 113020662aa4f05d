//! Terminal front end: feeds the URL list into the core state machine, drives
//! the engine, and renders progress and the final bundle.

mod args;
mod config;
mod effects;
mod render;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context};
use bundler_core::{update, AppState, Msg};
use bundler_engine::{
    aggregate, bundle_preview, export_bundle, EngineEvent, ExportOptions, PageResult,
};
use chrono::Utc;
use engine_logging::{engine_info, engine_warn};

pub use args::Args;
use render::Renderer;

pub fn run(args: Args) -> anyhow::Result<()> {
    engine_logging::initialize(args.log_destination(), args.log_level());
    let config = config::load_config(&args)?;
    let raw = read_input(args.input.as_deref())?;

    let mut renderer = Renderer::new(io::stdout().lock());
    let (mut state, initial_effects) = update(AppState::new(), Msg::InputSubmitted(raw));
    redraw(&mut state, &mut renderer)?;

    let Some(engine) = effects::start_run(initial_effects, &config)? else {
        return Ok(());
    };

    let results: Vec<PageResult> = loop {
        match engine.recv() {
            Some(EngineEvent::Progress(event)) => {
                state = update(state, effects::progress_to_msg(event)).0;
                redraw(&mut state, &mut renderer)?;
            }
            Some(EngineEvent::Finished(results)) => break results,
            None => bail!("engine stopped before reporting results"),
        }
    };

    let aggregation = aggregate(&results);
    state = update(
        state,
        Msg::RunFinished {
            success_count: aggregation.summary.success_count,
            error_count: aggregation.summary.error_count,
        },
    )
    .0;
    redraw(&mut state, &mut renderer)?;

    let Some(bundle) = aggregation.outcome.bundle() else {
        engine_warn!("Run produced no content; nothing written");
        return Ok(());
    };

    let options = ExportOptions {
        manifest_filename: if args.no_manifest {
            None
        } else {
            ExportOptions::default().manifest_filename
        },
        generated_utc: Some(Utc::now().to_rfc3339()),
        ..ExportOptions::default()
    };
    let summary = export_bundle(&args.output_dir, &aggregation, &results, &options)
        .with_context(|| format!("failed to write bundle to {}", args.output_dir.display()))?;
    engine_info!("Bundle written to {:?}", summary.bundle_path);

    renderer.line(&format!(
        "Wrote {} bytes to {}",
        summary.bytes_written,
        summary.bundle_path.display()
    ))?;
    renderer.line("Preview:")?;
    renderer.line(&bundle_preview(bundle.as_str()))?;
    Ok(())
}

fn redraw<W: io::Write>(state: &mut AppState, renderer: &mut Renderer<W>) -> io::Result<()> {
    if state.consume_dirty() {
        renderer.render(&state.view())?;
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read url list {}", path.display())),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read url list from stdin")?;
            Ok(raw)
        }
    }
}
