//! Turns one raw input line into a [`CommandResult`].
//!
//! Tokenizing is a plain whitespace split: no quoting, escaping, pipes or
//! redirection. Every failure comes back as an error result so a typo can
//! never take the session down. Panicking handlers are caught on native
//! builds only; see [`run_command`].

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::command::{CommandRegistry, CommandResult};
use crate::context::TerminalContext;
use crate::error::ShellError;

/// Split a trimmed line into `(name, args)`. `None` for blank input.
pub fn tokenize(input: &str) -> Option<(&str, Vec<String>)> {
    let mut parts = input.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.map(str::to_string).collect()))
}

/// Run one line against the registry.
///
/// Handler panics are caught only where unwinding is available. Builds with
/// `panic = "abort"` (the default for `wasm32-unknown-unknown`) abort
/// instead, so handlers must report failures through [`ShellError`].
pub fn run_command(input: &str, ctx: &mut TerminalContext, registry: &CommandRegistry) -> CommandResult {
    let Some((name, args)) = tokenize(input.trim()) else {
        // empty input = no-op
        return CommandResult::empty();
    };

    let Some(command) = registry.get(name) else {
        let suggestion = registry.suggest(name).map(str::to_string);
        debug!(command = name, ?suggestion, "command not found");
        return not_found(name, suggestion);
    };

    debug!(command = name, argc = args.len(), "dispatching command");
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| command.execute(&args, ctx)));
    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => CommandResult::error(err.to_string()),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(command = name, %message, "command handler panicked");
            CommandResult::error(ShellError::HandlerFailure(message).to_string())
        }
    }
}

fn not_found(name: &str, suggestion: Option<String>) -> CommandResult {
    let mut lines = vec![ShellError::CommandNotFound {
        name: name.to_string(),
        suggestion: suggestion.clone(),
    }
    .to_string()];
    if let Some(suggestion) = suggestion {
        lines.push(format!("Did you mean: {}?", suggestion));
    }
    CommandResult {
        is_error: true,
        ..CommandResult::lines(lines)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "command handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::HandlerResult;

    fn setup() -> (TerminalContext, CommandRegistry) {
        let mut ctx = TerminalContext::new();
        ctx.vfs.create_dir_all("/home/user").unwrap();
        ctx.cwd = "/home/user".to_string();
        (ctx, CommandRegistry::default_commands())
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize(""), None);
        assert_eq!(tokenize("   "), None);
        let (name, args) = tokenize("echo  hello   world").unwrap();
        assert_eq!(name, "echo");
        assert_eq!(args, vec!["hello", "world"]);
    }

    #[test]
    fn test_empty_input_is_noop() {
        let (mut ctx, reg) = setup();
        let result = run_command("   ", &mut ctx, &reg);
        assert_eq!(result, CommandResult::empty());
    }

    #[test]
    fn test_unknown_command_with_suggestion() {
        let (mut ctx, reg) = setup();
        let result = run_command("pwdd", &mut ctx, &reg);
        assert!(result.is_error);
        assert_eq!(result.lines, vec!["Command not found: pwdd", "Did you mean: pwd?"]);
    }

    #[test]
    fn test_unknown_command_without_suggestion() {
        let (mut ctx, reg) = setup();
        let result = run_command("frobnicate", &mut ctx, &reg);
        assert!(result.is_error);
        assert_eq!(result.lines, vec!["Command not found: frobnicate"]);
    }

    #[test]
    fn test_handler_error_becomes_error_result() {
        let (mut ctx, reg) = setup();
        let result = run_command("cat missing.txt", &mut ctx, &reg);
        assert!(result.is_error);
        assert_eq!(result.output(), "cat: missing.txt: No such file or directory");
    }

    fn explode(_args: &[String], _ctx: &mut TerminalContext) -> HandlerResult {
        panic!("kaboom")
    }

    #[test]
    fn test_handler_panic_is_contained() {
        let (mut ctx, mut reg) = setup();
        reg.register("explode", explode);
        let result = run_command("explode", &mut ctx, &reg);
        assert!(result.is_error);
        assert_eq!(result.output(), "Error executing command: kaboom");
        // session still usable afterwards
        assert_eq!(run_command("pwd", &mut ctx, &reg).output(), "/home/user");
    }

    #[test]
    fn test_deterministic() {
        let (mut ctx, reg) = setup();
        let a = run_command("echo  a b", &mut ctx, &reg);
        let b = run_command("echo a b", &mut ctx, &reg);
        assert_eq!(a, b);
    }
}
