use crate::command::CommandSummary;
use crate::config::SessionConfig;
use crate::history::HistoryBuffer;
use crate::vfs::{VirtualFileSystem, ROOT};

/// Who the learner is pretending to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub host: String,
    pub home: String,
}

impl Default for Identity {
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            user: config.user,
            host: config.host,
            home: config.home,
        }
    }
}

/// Mutable shell state handed to every command handler.
pub struct TerminalContext {
    pub vfs: VirtualFileSystem,
    /// Always an existing directory.
    pub cwd: String,
    /// Target of `cd -`.
    pub oldpwd: Option<String>,
    pub history: HistoryBuffer,
    pub identity: Identity,
    /// Snapshot of the registry for `help`; refreshed on every registration.
    pub commands: Vec<CommandSummary>,
}

impl TerminalContext {
    /// Bare state at `/` over an empty filesystem.
    pub fn new() -> Self {
        Self::new_with_vfs(VirtualFileSystem::new())
    }

    pub fn new_with_vfs(vfs: VirtualFileSystem) -> Self {
        Self {
            vfs,
            cwd: ROOT.to_string(),
            oldpwd: None,
            history: HistoryBuffer::default(),
            identity: Identity::default(),
            commands: Vec::new(),
        }
    }

    /// Resolve a user-typed path, expanding `~` to the home directory.
    pub fn resolve(&self, raw: &str) -> String {
        let expanded;
        let raw = if raw == "~" {
            self.identity.home.as_str()
        } else if let Some(rest) = raw.strip_prefix("~/") {
            expanded = format!("{}/{}", self.identity.home, rest);
            expanded.as_str()
        } else {
            raw
        };
        VirtualFileSystem::resolve(raw, &self.cwd)
    }

    /// Switch directories, remembering where we came from for `cd -`.
    pub fn set_cwd(&mut self, path: String) {
        let old = std::mem::replace(&mut self.cwd, path);
        self.oldpwd = Some(old);
    }

    /// `cwd` with the home prefix shown as `~`.
    pub fn display_cwd(&self) -> String {
        let home = self.identity.home.as_str();
        if self.cwd == home {
            "~".to_string()
        } else if let Some(rest) = self.cwd.strip_prefix(home).and_then(|r| r.strip_prefix('/')) {
            format!("~/{}", rest)
        } else {
            self.cwd.clone()
        }
    }

    /// `user@host:~/projects$ `
    pub fn prompt(&self, suffix: &str) -> String {
        format!(
            "{}@{}:{}{}",
            self.identity.user,
            self.identity.host,
            self.display_cwd(),
            suffix
        )
    }
}

impl Default for TerminalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_in(cwd: &str) -> TerminalContext {
        let mut ctx = TerminalContext::new();
        ctx.cwd = cwd.to_string();
        ctx
    }

    #[test]
    fn test_resolve_tilde() {
        let ctx = ctx_in("/tmp");
        assert_eq!(ctx.resolve("~"), "/home/user");
        assert_eq!(ctx.resolve("~/.ssh"), "/home/user/.ssh");
        assert_eq!(ctx.resolve("x"), "/tmp/x");
        assert_eq!(ctx.resolve("~x"), "/tmp/~x");
    }

    #[test]
    fn test_set_cwd_tracks_oldpwd() {
        let mut ctx = ctx_in("/home/user");
        ctx.set_cwd("/tmp".to_string());
        assert_eq!(ctx.cwd, "/tmp");
        assert_eq!(ctx.oldpwd.as_deref(), Some("/home/user"));
    }

    #[test]
    fn test_prompt() {
        assert_eq!(ctx_in("/home/user").prompt("$ "), "user@ai-dev:~$ ");
        assert_eq!(ctx_in("/home/user/notes").prompt("$ "), "user@ai-dev:~/notes$ ");
        assert_eq!(ctx_in("/home/username").prompt("$ "), "user@ai-dev:/home/username$ ");
        assert_eq!(ctx_in("/").prompt("$ "), "user@ai-dev:/$ ");
    }
}
