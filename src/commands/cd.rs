use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;
use crate::error::ShellError;

pub struct CdCommand;

const CD_HELP: &str = "Usage: cd [DIR]\nChange the shell working directory.\n\n  DIR defaults to your home directory; '-' returns to the previous directory.";

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(CD_HELP));
        }
        let target = match args {
            [] => "~".to_string(),
            [one] => one.clone(),
            _ => return Err(ShellError::TooManyArguments("cd")),
        };

        // cd - swaps to the previous directory and prints it
        let (path, show_path) = if target == "-" {
            match &ctx.oldpwd {
                Some(oldpwd) => (oldpwd.clone(), true),
                None => return Err(ShellError::Usage("cd: OLDPWD not set".to_string())),
            }
        } else {
            (ctx.resolve(&target), false)
        };

        let new_cwd = ctx
            .vfs
            .change_directory(&path)
            .map_err(|source| ShellError::Operand {
                command: "cd",
                operand: target,
                source,
            })?;
        ctx.set_cwd(new_cwd);

        if show_path {
            Ok(CommandResult::text(&ctx.cwd))
        } else {
            // normal cd is silent
            Ok(CommandResult::empty())
        }
    }

    fn summary(&self) -> &str {
        "Change directory"
    }

    fn usage(&self) -> &str {
        CD_HELP
    }
}
