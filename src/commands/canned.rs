//! Lookup-table commands.
//!
//! A [`CannedCommand`] never touches the filesystem. It answers from a
//! table keyed by its space-joined arguments and falls back to a template
//! where `{0}` is the first argument and `{args}` all of them. Lessons
//! declare these in JSON; the `tools` set below builds them in code.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::command::{Command, CommandRegistry, CommandResult, HandlerResult};
use crate::context::TerminalContext;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CannedCommand {
    pub summary: String,
    /// Printed when invoked without arguments.
    pub usage: String,
    pub responses: BTreeMap<String, String>,
    pub fallback: String,
    /// Style the fallback as an error.
    pub fallback_is_error: bool,
}

impl CannedCommand {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            ..Self::default()
        }
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    pub fn respond(mut self, args: &str, output: &str) -> Self {
        self.responses.insert(args.to_string(), output.to_string());
        self
    }

    pub fn fallback(mut self, template: &str) -> Self {
        self.fallback = template.to_string();
        self
    }

    pub fn fallback_error(mut self, template: &str) -> Self {
        self.fallback_is_error = true;
        self.fallback(template)
    }

    /// What this command prints for `args`.
    pub fn respond_to(&self, args: &[String]) -> CommandResult {
        let joined = args.join(" ");
        if let Some(output) = self.responses.get(&joined) {
            return CommandResult::text(output);
        }
        if args.is_empty() && !self.usage.is_empty() {
            return CommandResult::text(&self.usage);
        }
        let first = args.first().map(String::as_str).unwrap_or_default();
        let rendered = self.fallback.replace("{args}", &joined).replace("{0}", first);
        if self.fallback_is_error {
            CommandResult::error(rendered)
        } else {
            CommandResult::text(rendered)
        }
    }
}

impl Command for CannedCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> HandlerResult {
        Ok(self.respond_to(args))
    }

    fn summary(&self) -> &str {
        &self.summary
    }

    fn usage(&self) -> &str {
        if self.usage.is_empty() {
            &self.summary
        } else {
            &self.usage
        }
    }
}

const GIT_USAGE: &str = "usage: git [--version] [--help] [-C <path>] [-c <name>=<value>]
           [--exec-path[=<path>]] [--html-path] [--man-path] [--info-path]
           [-p | --paginate | -P | --no-pager] [--no-replace-objects] [--bare]
           [--git-dir=<path>] [--work-tree=<path>] [--namespace=<name>]
           <command> [<args>]";

const TMUX_USAGE: &str = "usage: tmux [-2Cluv] [-c shell-command] [-f file] [-L socket-name]
            [-S socket-path] [command [flags]]";

const TMUX_SESSIONS: &str = "ai-dev: 3 windows (created Mon Jan 15 10:30:00 2024)";

const PYTHON_BANNER: &str = "Python 3.9.2 (default, Feb 28 2021, 17:03:44)
[GCC 10.2.1] on linux
Type \"help\", \"copyright\", \"credits\" or \"license\" for more information.
>>>";

const NVIM_SCREEN: &str = "

~ VIM - Vi IMproved ~
~ version 0.6.1 ~
~ by Bram Moolenaar et al. ~

[Press 'i' to enter insert mode, ':q' to quit]

(Simulated - this would open the actual editor)";

pub fn git() -> CannedCommand {
    CannedCommand::new("Git commands")
        .with_usage(GIT_USAGE)
        .respond("status", "On branch main\nnothing to commit, working tree clean")
        .respond(
            "log --oneline",
            "1a2b3c4 Initial commit\n5d6e7f8 Add model architecture\n9g0h1i2 Update training script",
        )
        .respond("branch", "* main\n  development\n  feature/new-model")
        .respond(
            "remote -v",
            "origin\thttps://github.com/user/ai-project.git (fetch)\norigin\thttps://github.com/user/ai-project.git (push)",
        )
        .respond("--version", "git version 2.30.2")
        .fallback_error("git: '{0}' is not a git command. See 'git --help'.")
}

pub fn tmux() -> CannedCommand {
    CannedCommand::new("Tmux commands")
        .with_usage(TMUX_USAGE)
        .respond("ls", TMUX_SESSIONS)
        .respond("list-sessions", TMUX_SESSIONS)
        .respond("new-session -d -s training", "Created session: training")
        .respond("attach -t ai-dev", "Attaching to session ai-dev...")
        .respond("kill-session -t training", "Session training killed")
        .fallback_error("tmux: {0}: command not found")
}

pub fn python() -> CannedCommand {
    CannedCommand::new("Run Python script")
        .with_usage(PYTHON_BANNER)
        .respond("train.py", "Training complete!\nModel saved to model.pth")
        .respond("model.py", "Model architecture loaded successfully")
        .respond("-c \"print('Hello World')\"", "Hello World")
        .respond("--version", "Python 3.9.2")
        .fallback_error("python: can't open file '{0}': [Errno 2] No such file or directory")
}

pub fn nvim() -> CannedCommand {
    CannedCommand::new("Open Neovim editor")
        .respond("", &format!("Opening untitled in Neovim...{}", NVIM_SCREEN))
        .fallback(&format!("Opening {{0}} in Neovim...{}", NVIM_SCREEN))
}

/// git, tmux, python and nvim.
pub fn register_tools(registry: &mut CommandRegistry) {
    registry.register("python", python());
    registry.register("git", git());
    registry.register("tmux", tmux());
    registry.register("nvim", nvim());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, test_ctx};

    #[test]
    fn test_lookup_and_usage() {
        let mut ctx = test_ctx();
        let out = git().execute(&args(&["status"]), &mut ctx).unwrap();
        assert_eq!(out.lines, vec!["On branch main", "nothing to commit, working tree clean"]);
        let out = git().execute(&[], &mut ctx).unwrap();
        assert!(out.lines[0].starts_with("usage: git"));
        assert!(!out.is_error);
    }

    #[test]
    fn test_fallback_substitution() {
        let mut ctx = test_ctx();
        let out = git().execute(&args(&["pul"]), &mut ctx).unwrap();
        assert!(out.is_error);
        assert_eq!(out.output(), "git: 'pul' is not a git command. See 'git --help'.");

        let cmd = CannedCommand::new("echoes").fallback("got {args} starting with {0}");
        let out = cmd.execute(&args(&["a", "b"]), &mut ctx).unwrap();
        assert_eq!(out.output(), "got a b starting with a");
        assert!(!out.is_error);
    }

    #[test]
    fn test_nvim_opens_file() {
        let mut ctx = test_ctx();
        let out = nvim().execute(&args(&["train.py"]), &mut ctx).unwrap();
        assert_eq!(out.lines[0], "Opening train.py in Neovim...");
        let out = nvim().execute(&[], &mut ctx).unwrap();
        assert_eq!(out.lines[0], "Opening untitled in Neovim...");
    }

    #[test]
    fn test_python_inline_code() {
        let mut ctx = test_ctx();
        let out = python()
            .execute(&args(&["-c", "\"print('Hello", "World')\""]), &mut ctx)
            .unwrap();
        assert_eq!(out.output(), "Hello World");
    }

    #[test]
    fn test_deserialize_from_lesson_json() {
        let json = r#"{"responses": {"--version": "zsh 5.8"}, "usage": "usage: zsh", "fallback": "zsh: bad option: {0}", "fallbackIsError": true}"#;
        let cmd: CannedCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.respond_to(&args(&["--version"])).output(), "zsh 5.8");
        assert_eq!(cmd.respond_to(&[]).output(), "usage: zsh");
        let out = cmd.respond_to(&args(&["-q"]));
        assert!(out.is_error);
        assert_eq!(out.output(), "zsh: bad option: -q");
    }

    #[test]
    fn test_register_tools() {
        let mut reg = CommandRegistry::new();
        register_tools(&mut reg);
        assert_eq!(reg.get_command_names(), vec!["python", "git", "tmux", "nvim"]);
    }
}
