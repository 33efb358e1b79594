use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;
use crate::error::ShellError;

/// help [COMMAND]
/// Display help information about available commands.
pub struct HelpCommand;

const HELP_USAGE: &str = "Usage: help [COMMAND]\nDisplay help information about available commands.\n\n  COMMAND        show help for specific command\n      --help     display this help and exit";

impl Command for HelpCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(HELP_USAGE));
        }

        // single arg = help for specific command
        if let Some(name) = args.first() {
            return match ctx.commands.iter().find(|c| &c.name == name) {
                Some(cmd) if !cmd.usage.is_empty() => Ok(CommandResult::text(&cmd.usage)),
                Some(cmd) => Ok(CommandResult::text(format!("{}: no usage available", cmd.name))),
                None => Err(ShellError::Usage(format!(
                    "help: no help topics match '{}'",
                    name
                ))),
            };
        }

        let mut output = vec!["Available commands:".to_string()];
        for cmd in &ctx.commands {
            if cmd.summary.is_empty() {
                output.push(format!("  {}", cmd.name));
            } else {
                output.push(format!("  {:<12}- {}", cmd.name, cmd.summary));
            }
        }
        Ok(CommandResult::lines(output))
    }

    fn summary(&self) -> &str {
        "Show this help message"
    }

    fn usage(&self) -> &str {
        HELP_USAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandRegistry;
    use crate::commands::{args, test_ctx};

    fn ctx_with_registry() -> TerminalContext {
        let mut ctx = test_ctx();
        ctx.commands = CommandRegistry::default_commands().summaries();
        ctx
    }

    #[test]
    fn test_help_lists_in_registration_order() {
        let mut ctx = ctx_with_registry();
        let out = HelpCommand.execute(&[], &mut ctx).unwrap();
        assert_eq!(out.lines[0], "Available commands:");
        assert_eq!(out.lines[1], "  help        - Show this help message");
        assert_eq!(out.lines[2], "  ls          - List directory contents");
        assert_eq!(out.lines.len(), 14);
        assert!(out.lines.last().unwrap().starts_with("  rm"));
    }

    #[test]
    fn test_help_for_command() {
        let mut ctx = ctx_with_registry();
        let out = HelpCommand.execute(&args(&["cat"]), &mut ctx).unwrap();
        assert_eq!(out.lines[0], "Usage: cat FILE...");
    }

    #[test]
    fn test_help_unknown_topic() {
        let mut ctx = ctx_with_registry();
        let err = HelpCommand.execute(&args(&["frobnicate"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "help: no help topics match 'frobnicate'");
    }
}
