use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;
use crate::error::ShellError;

/// cat FILE...
/// Concatenate files to standard output.
pub struct CatCommand;

const CAT_HELP: &str = "Usage: cat FILE...\nConcatenate FILE(s) to standard output.";

impl Command for CatCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(CAT_HELP));
        }
        if args.is_empty() {
            return Err(ShellError::missing_file_operand("cat"));
        }

        let mut lines = Vec::new();
        for file in args {
            let path = ctx.resolve(file);
            let content = ctx.vfs.read(&path).map_err(|source| ShellError::Operand {
                command: "cat",
                operand: file.clone(),
                source,
            })?;
            lines.extend(content.lines().map(str::to_string));
        }
        Ok(CommandResult::lines(lines))
    }

    fn summary(&self) -> &str {
        "Display file contents"
    }

    fn usage(&self) -> &str {
        CAT_HELP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, test_ctx};

    #[test]
    fn test_cat_files() {
        let mut ctx = test_ctx();
        ctx.vfs.write_file("/home/user/a.txt", "one\ntwo").unwrap();
        ctx.vfs.write_file("/home/user/b.txt", "three").unwrap();
        let out = CatCommand.execute(&args(&["a.txt", "b.txt"]), &mut ctx).unwrap();
        assert_eq!(out.lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_cat_empty_file() {
        let mut ctx = test_ctx();
        ctx.vfs.create_file("/home/user/a.txt", "").unwrap();
        let out = CatCommand.execute(&args(&["a.txt"]), &mut ctx).unwrap();
        assert_eq!(out.output(), "");
        assert!(!out.is_error);
    }

    #[test]
    fn test_cat_errors() {
        let mut ctx = test_ctx();
        ctx.vfs.create_dir("/home/user/docs").unwrap();
        let err = CatCommand.execute(&args(&["a.txt"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "cat: a.txt: No such file or directory");
        let err = CatCommand.execute(&args(&["docs"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "cat: docs: Is a directory");
        let err = CatCommand.execute(&[], &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "cat: missing file operand");
    }
}
