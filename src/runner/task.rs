//! Command invocation
//!
//! Ties the pieces together for one command: evaluate freshness, materialize
//! the script, execute it, and delete the script again.

use crate::config::{lookup_command, CommandTable, YarCommand};
use crate::error::Result;
use crate::runner::{execute_script, Context, Freshness, ScriptFile};
use tracing::{debug, info, trace, warn};

/// What happened to an invoked command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The script ran and exited successfully
    Executed,
    /// Skipped because outputs were newer than inputs (only with `skip_up_to_date`)
    UpToDate,
}

/// Look up `name` in `table` and run it
pub fn run_named(table: &CommandTable, name: &str, ctx: &Context) -> Result<RunOutcome> {
    let command = lookup_command(table, name)?;
    run_command(name, command, ctx)
}

/// Run a single command.
///
/// Freshness is always evaluated and logged; it only prevents execution when
/// the context asks for up-to-date commands to be skipped.
pub fn run_command(name: &str, command: &YarCommand, ctx: &Context) -> Result<RunOutcome> {
    info!(command = name, "running command");

    let freshness = Freshness::evaluate(&command.dependencies, &command.creates, &ctx.base_dir)?;
    let up_to_date = freshness.is_up_to_date();
    debug!(command = name, up_to_date, "freshness check");

    if !command.needs.is_empty() {
        debug!(command = name, needs = ?command.needs, "prerequisites are not run automatically");
    }

    if ctx.skip_up_to_date && up_to_date {
        info!(command = name, "outputs are up to date, skipping");
        return Ok(RunOutcome::UpToDate);
    }

    trace!(command = name, "script contents\n{}", command.script);
    let script = ScriptFile::materialize(&command.script, &ctx.scratch_dir)?;

    let result = execute_script(script.path(), &ctx.base_dir);

    if let Err(e) = script.release() {
        warn!(command = name, error = %e, "failed to remove temporary script");
    }

    result?;
    debug!(command = name, "command completed");
    Ok(RunOutcome::Executed)
}
