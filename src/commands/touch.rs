use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;
use crate::error::ShellError;

/// touch FILE...
/// Create the FILE(s) if they do not exist, or update the modification time if they do.
pub struct TouchCommand;

const TOUCH_HELP: &str = "Usage: touch FILE...\nUpdate the modification time of each FILE, creating empty files as needed.";

impl Command for TouchCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(TOUCH_HELP));
        }
        let mut files = vec![];
        for arg in args {
            match arg.as_str() {
                s if s.starts_with('-') => {
                    return Err(ShellError::Usage(format!(
                        "touch: unrecognized option '{}'. Try --help for more info.",
                        s
                    )));
                }
                _ => files.push(arg),
            }
        }
        if files.is_empty() {
            return Err(ShellError::missing_file_operand("touch"));
        }
        for file in files {
            let path = ctx.resolve(file);
            ctx.vfs.touch(&path).map_err(|source| ShellError::CannotTouch {
                operand: file.clone(),
                source,
            })?;
        }
        Ok(CommandResult::empty())
    }

    fn summary(&self) -> &str {
        "Create empty file"
    }

    fn usage(&self) -> &str {
        TOUCH_HELP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, test_ctx};

    #[test]
    fn test_touch_creates_empty_file() {
        let mut ctx = test_ctx();
        TouchCommand.execute(&args(&["a.txt", "b.txt"]), &mut ctx).unwrap();
        assert_eq!(ctx.vfs.read("/home/user/a.txt"), Ok(""));
        assert_eq!(ctx.vfs.read("/home/user/b.txt"), Ok(""));
    }

    #[test]
    fn test_touch_is_idempotent() {
        let mut ctx = test_ctx();
        ctx.vfs.write_file("/home/user/a.txt", "keep me").unwrap();
        TouchCommand.execute(&args(&["a.txt"]), &mut ctx).unwrap();
        assert_eq!(ctx.vfs.read("/home/user/a.txt"), Ok("keep me"));
        // directories are fine too
        assert!(TouchCommand.execute(&args(&["/home"]), &mut ctx).is_ok());
    }

    #[test]
    fn test_touch_errors() {
        let mut ctx = test_ctx();
        let err = TouchCommand.execute(&args(&["nope/a.txt"]), &mut ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "touch: cannot touch 'nope/a.txt': No such file or directory"
        );
        let err = TouchCommand.execute(&[], &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "touch: missing file operand");
    }
}
