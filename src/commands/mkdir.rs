use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;
use crate::error::ShellError;

pub struct MkdirCommand;

const HELP: &str = "Usage: mkdir [OPTION]... DIRECTORY...
Create the DIRECTORY(ies), if they do not already exist.

  -p, --parents     no error if existing, make parent directories as needed
  -v, --verbose     print a message for each created directory
      --help        display this help and exit";

impl Command for MkdirCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        let mut paths = vec![];
        let mut parents = false;
        let mut verbose = false;
        for arg in args {
            match arg.as_str() {
                "-p" | "--parents" => parents = true,
                "-v" | "--verbose" => verbose = true,
                "--help" => return Ok(super::usage(HELP)),
                s if s.starts_with('-') => {
                    return Err(ShellError::Usage(format!(
                        "mkdir: unrecognized option '{}'. Try --help for more info.",
                        s
                    )));
                }
                _ => paths.push(arg),
            }
        }
        if paths.is_empty() {
            return Err(ShellError::missing_operand("mkdir"));
        }

        let mut results = Vec::new();
        for dir in paths {
            let path = ctx.resolve(dir);
            let res = if parents {
                ctx.vfs.create_dir_all(&path)
            } else {
                ctx.vfs.create_dir(&path)
            };
            res.map_err(|source| ShellError::CannotCreateDirectory {
                operand: dir.clone(),
                source,
            })?;
            if verbose {
                results.push(format!("mkdir: created directory '{}'", dir));
            }
        }
        Ok(CommandResult::lines(results))
    }

    fn summary(&self) -> &str {
        "Create directory"
    }

    fn usage(&self) -> &str {
        HELP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, test_ctx};
    use crate::vfs::ListOptions;

    #[test]
    fn test_mkdir_silent_success() {
        let mut ctx = test_ctx();
        let out = MkdirCommand.execute(&args(&["notes"]), &mut ctx).unwrap();
        assert!(out.is_empty());
        assert!(ctx.vfs.is_dir("/home/user/notes"));
    }

    #[test]
    fn test_mkdir_existing() {
        let mut ctx = test_ctx();
        MkdirCommand.execute(&args(&["notes"]), &mut ctx).unwrap();
        let err = MkdirCommand.execute(&args(&["notes"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "mkdir: cannot create directory 'notes': File exists");
        let entries = ctx.vfs.list("/home/user", ListOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_mkdir_parents() {
        let mut ctx = test_ctx();
        let err = MkdirCommand.execute(&args(&["a/b"]), &mut ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mkdir: cannot create directory 'a/b': No such file or directory"
        );
        let out = MkdirCommand.execute(&args(&["-pv", "a/b"]), &mut ctx);
        // combined short flags are not supported
        assert!(out.is_err());
        let out = MkdirCommand.execute(&args(&["-p", "-v", "a/b"]), &mut ctx).unwrap();
        assert_eq!(out.lines, vec!["mkdir: created directory 'a/b'"]);
        assert!(ctx.vfs.is_dir("/home/user/a/b"));
        // -p tolerates existing directories
        assert!(MkdirCommand.execute(&args(&["-p", "a"]), &mut ctx).is_ok());
    }

    #[test]
    fn test_mkdir_missing_operand() {
        let mut ctx = test_ctx();
        let err = MkdirCommand.execute(&[], &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "mkdir: missing operand");
    }
}
