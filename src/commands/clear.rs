use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;

pub struct ClearCommand;

impl Command for ClearCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(self.usage()));
        }
        // no output, the renderer wipes the screen on the action flag
        Ok(CommandResult::clear_screen())
    }

    fn summary(&self) -> &str {
        "Clear terminal"
    }

    fn usage(&self) -> &str {
        "Usage: clear\nClear the terminal screen."
    }
}
