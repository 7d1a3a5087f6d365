mod batch;
mod cli;
mod io;
mod logging;
mod merger;
mod outside;
mod page;
mod result;
mod slug;
mod types;
mod workflow;

use clap::Parser;
use tracing::{info, Level};

use crate::{
    cli::Args,
    logging::init_logging,
    outside::{Ffmpeg, HttpClipSource},
    types::ClipId,
    workflow::{Workflow, WorkflowOptions},
};

fn main() -> miette::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_logging(level)?;

    // Verify the media toolchain before any network work
    let merger = Ffmpeg::new()?;
    let source = HttpClipSource::new();

    let options = WorkflowOptions {
        no_loop: args.no_loop,
        allow_unicode: args.allow_unicode,
        keep_temp: args.keep_temp,
        strategy: args.strategy,
    };
    let workflow = Workflow::new(&source, &merger, options);

    match (args.id.as_deref(), args.file.as_deref()) {
        (Some(id), None) => {
            workflow.process(&ClipId::parse(id), None)?;
        }
        (None, Some(file)) => {
            let report = batch::run(file, &workflow)?;
            info!("{report}");
        }
        // The required ArgGroup guarantees exactly one input mode
        _ => unreachable!(),
    }

    Ok(())
}
