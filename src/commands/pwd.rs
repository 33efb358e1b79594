use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;

/// pwd
/// Print the full filename of the current working directory.
pub struct PwdCommand;

const PWD_HELP: &str = "Usage: pwd\nPrint the full filename of the current working directory.";

impl Command for PwdCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(PWD_HELP));
        }
        Ok(CommandResult::text(&ctx.cwd))
    }

    fn summary(&self) -> &str {
        "Print working directory"
    }

    fn usage(&self) -> &str {
        PWD_HELP
    }
}
