use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(self.usage()));
        }
        Ok(CommandResult::text(&ctx.identity.user))
    }

    fn summary(&self) -> &str {
        "Display current user"
    }

    fn usage(&self) -> &str {
        "Usage: whoami\nPrint the user name of the current session."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_ctx;

    #[test]
    fn test_whoami() {
        let mut ctx = test_ctx();
        ctx.identity.user = "ada".to_string();
        assert_eq!(WhoamiCommand.execute(&[], &mut ctx).unwrap().output(), "ada");
    }
}
