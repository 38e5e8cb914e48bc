//! One command, start to finish: collect, execute, render.

use crate::{
    Result,
    catalog::Command,
    collect::collect_parameters,
    console::Console,
    execute::{ExecutionContext, execute},
    render::render_outcome,
    store::VideoStore,
};
use std::io::{BufRead, Write};
use tracing::info;

/// Runs a single command against the store.
///
/// The store stays open; closing it is the caller's job so that it happens
/// on both the success and the error path.
///
/// # Errors
/// Returns the first error raised by any stage
pub async fn run_command<R: BufRead, W: Write>(
    command: Command,
    store: &dyn VideoStore,
    console: &mut Console<R, W>,
    ctx: &ExecutionContext,
) -> Result<()> {
    if command.is_mutating() {
        info!("Running command {} ({}), writes data", command.number(), command);
    } else {
        info!("Running command {} ({})", command.number(), command);
    }

    let request = collect_parameters(command, store, console).await?;
    let outcome = execute(request, store, ctx).await?;
    console.print(&render_outcome(&outcome))?;

    info!("Command {} returned {} row(s)", command, outcome.row_count());
    Ok(())
}
