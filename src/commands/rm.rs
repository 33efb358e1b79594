use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;
use crate::error::{FsError, ShellError};

/// rm [-f] FILE...
/// Remove files. Directories are never removed.
pub struct RmCommand;

const RM_HELP: &str = "Usage: rm [OPTION]... FILE...\nRemove (unlink) the FILE(s).\n\n  -f, --force           ignore nonexistent files and arguments\n  -v, --verbose         explain what is being done\n      --help            display this help and exit";

impl Command for RmCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(RM_HELP));
        }
        let mut force = false;
        let mut verbose = false;
        let mut files = vec![];
        for arg in args {
            match arg.as_str() {
                "-f" | "--force" => force = true,
                "-v" | "--verbose" => verbose = true,
                s if s.starts_with('-') => {
                    // no -r: directory removal is not supported
                    return Err(ShellError::Usage(format!("rm: invalid option '{}'", s)));
                }
                _ => files.push(arg),
            }
        }
        if files.is_empty() {
            return Err(ShellError::missing_operand("rm"));
        }

        let mut results = Vec::new();
        for file in files {
            let path = ctx.resolve(file);
            match ctx.vfs.remove(&path) {
                Ok(()) => {
                    if verbose {
                        results.push(format!("removed '{}'", file));
                    }
                }
                Err(FsError::NotFound(_)) if force => {}
                Err(source) => {
                    return Err(ShellError::CannotRemove {
                        operand: file.clone(),
                        source,
                    });
                }
            }
        }
        Ok(CommandResult::lines(results))
    }

    fn summary(&self) -> &str {
        "Remove file"
    }

    fn usage(&self) -> &str {
        RM_HELP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, test_ctx};

    #[test]
    fn test_rm_file() {
        let mut ctx = test_ctx();
        ctx.vfs.create_file("/home/user/a.txt", "").unwrap();
        let out = RmCommand.execute(&args(&["a.txt"]), &mut ctx).unwrap();
        assert!(out.is_empty());
        assert!(!ctx.vfs.exists("/home/user/a.txt"));
    }

    #[test]
    fn test_rm_directory_rejected() {
        let mut ctx = test_ctx();
        ctx.vfs.create_dir("/home/user/docs").unwrap();
        let err = RmCommand.execute(&args(&["docs"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "rm: cannot remove 'docs': Is a directory");
        assert!(ctx.vfs.is_dir("/home/user/docs"));
        assert!(RmCommand.execute(&args(&["-r", "docs"]), &mut ctx).is_err());
        assert!(ctx.vfs.is_dir("/home/user/docs"));
    }

    #[test]
    fn test_rm_missing() {
        let mut ctx = test_ctx();
        let err = RmCommand.execute(&args(&["ghost"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "rm: cannot remove 'ghost': No such file or directory");
        assert!(RmCommand.execute(&args(&["-f", "ghost"]), &mut ctx).is_ok());
        let err = RmCommand.execute(&[], &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "rm: missing operand");
    }

    #[test]
    fn test_rm_verbose() {
        let mut ctx = test_ctx();
        ctx.vfs.create_file("/home/user/a", "").unwrap();
        let out = RmCommand.execute(&args(&["-v", "a"]), &mut ctx).unwrap();
        assert_eq!(out.lines, vec!["removed 'a'"]);
    }
}
