//! Shell commands, one module per built-in, plus the optional command sets
//! (`tools`, `ai`) that a session registers on top of the core.

pub mod ai;
pub mod canned;
pub mod cat;
pub mod cd;
pub mod clear;
pub mod date;
pub mod echo;
pub mod help;
pub mod history;
pub mod ls;
pub mod mkdir;
pub mod pwd;
pub mod rm;
pub mod touch;
pub mod whoami;

use tracing::warn;

use crate::command::{CommandRegistry, CommandResult};
use crate::error::FsError;
use crate::vfs::VirtualFileSystem;

pub const TOOLS_SET: &str = "tools";
pub const AI_SET: &str = "ai";

/// Register an optional command set by name. Unknown sets are skipped.
pub fn register_command_set(name: &str, registry: &mut CommandRegistry) -> bool {
    match name {
        TOOLS_SET => canned::register_tools(registry),
        AI_SET => ai::register(registry),
        other => {
            warn!(set = other, "unknown command set");
            return false;
        }
    }
    true
}

/// Files a command set drops into the learner's home directory.
pub fn seed_command_set(name: &str, vfs: &mut VirtualFileSystem, home: &str) -> Result<(), FsError> {
    match name {
        AI_SET => ai::seed_project(vfs, home),
        _ => Ok(()),
    }
}

pub(crate) fn help_requested(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help")
}

pub(crate) fn usage(text: &str) -> CommandResult {
    CommandResult::text(text)
}

#[cfg(test)]
pub(crate) fn test_ctx() -> crate::context::TerminalContext {
    let mut ctx = crate::context::TerminalContext::new();
    ctx.vfs.create_dir_all("/home/user").unwrap();
    ctx.cwd = "/home/user".to_string();
    ctx
}

#[cfg(test)]
pub(crate) fn args(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_has_help() {
        let registry = CommandRegistry::default_commands();
        let mut ctx = test_ctx();
        for name in registry.get_command_names() {
            let cmd = registry.get(&name).unwrap();
            let out = cmd.execute(&args(&["--help"]), &mut ctx).unwrap();
            assert!(out.lines[0].starts_with("Usage: "), "{name}: {:?}", out.lines);
            assert!(!cmd.summary().is_empty(), "{name} has no summary");
        }
        // --help must not have side effects
        assert_eq!(ctx.cwd, "/home/user");
    }

    #[test]
    fn test_command_sets() {
        let mut registry = CommandRegistry::new();
        assert!(register_command_set(TOOLS_SET, &mut registry));
        assert!(register_command_set(AI_SET, &mut registry));
        assert!(!register_command_set("games", &mut registry));
        assert!(registry.contains("git"));
        assert!(registry.contains("htop"));
    }
}
