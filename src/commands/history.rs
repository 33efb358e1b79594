use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;
use crate::error::ShellError;

pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(self.usage()));
        }
        if args.is_empty() {
            let out = ctx
                .history
                .iter()
                .enumerate()
                .map(|(i, cmd)| format!("{:4}  {}", i + 1, cmd))
                .collect();
            Ok(CommandResult::lines(out))
        } else if args.len() == 1 && args[0] == "-c" {
            ctx.history.clear();
            Ok(CommandResult::text("History cleared"))
        } else {
            Err(ShellError::Usage("history: usage: history [-c]".to_string()))
        }
    }

    fn summary(&self) -> &str {
        "Show command history"
    }

    fn usage(&self) -> &str {
        "Usage: history [-c]\nList previously entered commands; -c clears the list."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, test_ctx};

    #[test]
    fn test_history_listing() {
        let mut ctx = test_ctx();
        ctx.history.append("ls");
        ctx.history.append("pwd");
        let out = HistoryCommand.execute(&[], &mut ctx).unwrap();
        assert_eq!(out.lines, vec!["   1  ls", "   2  pwd"]);
    }

    #[test]
    fn test_history_clear() {
        let mut ctx = test_ctx();
        ctx.history.append("ls");
        HistoryCommand.execute(&args(&["-c"]), &mut ctx).unwrap();
        assert!(ctx.history.is_empty());
        assert!(HistoryCommand.execute(&args(&["-x"]), &mut ctx).is_err());
    }
}
