use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::vfs::{DirEntry, ListOptions, VfsNode};
use chrono::{DateTime, Local};

pub struct LsCommand;

const LS_HELP: &str = "Usage: ls [OPTION]... [FILE]\nList information about the FILE (the current directory by default).\n\n  -a             do not ignore entries starting with .\n  -l             use a long listing format\n      --help     display this help and exit";

fn format_time(dt: &DateTime<Local>) -> String {
    dt.format("%b %e %H:%M").to_string()
}

fn long_line(entry: &DirEntry, owner: &str) -> String {
    let mode = if entry.is_dir() { "drwxr-xr-x" } else { "-rw-r--r--" };
    let (size, mtime) = match &entry.details {
        Some(d) => (d.size, format_time(&d.modified)),
        None => (0, String::new()),
    };
    format!("{} 1 {} {} {:>5} {} {}", mode, owner, owner, size, mtime, entry.name)
}

fn short_name(entry: &DirEntry) -> String {
    if entry.is_dir() {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

impl Command for LsCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(LS_HELP));
        }

        let mut opts = ListOptions::default();
        let mut paths = vec![];
        for arg in args {
            if arg.starts_with('-') && arg.len() > 1 {
                // combined flags like -la
                for c in arg.chars().skip(1) {
                    match c {
                        'a' => opts.include_hidden = true,
                        'l' => opts.long_format = true,
                        _ => {
                            return Err(ShellError::Usage(format!("ls: invalid option -- '{}'", c)));
                        }
                    }
                }
            } else {
                paths.push(arg.as_str());
            }
        }

        if paths.len() > 1 {
            return Err(ShellError::TooManyArguments("ls"));
        }
        let raw = paths.first().copied().unwrap_or(".");
        let path = ctx.resolve(raw);

        // a plain file lists as itself
        if let Some(VfsNode::File { .. }) = ctx.vfs.node(&path) {
            return Ok(CommandResult::text(raw));
        }

        let entries = ctx.vfs.list(&path, opts).map_err(|source| ShellError::CannotAccess {
            operand: raw.to_string(),
            source,
        })?;
        if entries.is_empty() {
            return Ok(CommandResult::empty());
        }

        if opts.long_format {
            let owner = ctx.identity.user.as_str();
            Ok(CommandResult::lines(
                entries.iter().map(|e| long_line(e, owner)).collect(),
            ))
        } else {
            let names: Vec<String> = entries.iter().map(short_name).collect();
            Ok(CommandResult::text(names.join("  ")))
        }
    }

    fn summary(&self) -> &str {
        "List directory contents"
    }

    fn usage(&self) -> &str {
        LS_HELP
    }
}
