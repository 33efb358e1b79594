use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;

/// echo [STRING]...
/// Write arguments to the standard output.
pub struct EchoCommand;

const ECHO_HELP: &str = "Usage: echo [STRING]...\nWrite arguments to the standard output, separated by spaces.";

impl Command for EchoCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(ECHO_HELP));
        }
        // output is line based, a leading -n has nothing to strip
        let words = match args.split_first() {
            Some((first, rest)) if first == "-n" => rest,
            _ => args,
        };
        Ok(CommandResult::lines(vec![words.join(" ")]))
    }

    fn summary(&self) -> &str {
        "Display text"
    }

    fn usage(&self) -> &str {
        ECHO_HELP
    }
}
