use std::collections::HashMap;

use serde::Serialize;

use crate::context::TerminalContext;
use crate::error::ShellError;

/// Largest edit distance still offered as a "did you mean" suggestion.
pub const MAX_SUGGESTION_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAction {
    ClearScreen,
}

/// Output of one command. `is_error` only changes how the lines are styled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub lines: Vec<String>,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_action: Option<SpecialAction>,
}

impl CommandResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Split `text` into output lines. Empty text gives no lines.
    pub fn text(text: impl AsRef<str>) -> Self {
        Self::lines(text.as_ref().lines().map(str::to_string).collect())
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn error(message: impl AsRef<str>) -> Self {
        Self {
            is_error: true,
            ..Self::text(message)
        }
    }

    pub fn clear_screen() -> Self {
        Self {
            special_action: Some(SpecialAction::ClearScreen),
            ..Self::default()
        }
    }

    /// Lines joined back into one string.
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub type HandlerResult = Result<CommandResult, ShellError>;

/// A shell command. Handlers only see their arguments and the shell state.
pub trait Command {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult;

    /// One-line description shown by `help`.
    fn summary(&self) -> &str {
        ""
    }

    /// Full usage text for `help NAME` and `NAME --help`.
    fn usage(&self) -> &str {
        self.summary()
    }
}

impl<F> Command for F
where
    F: Fn(&[String], &mut TerminalContext) -> HandlerResult,
{
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> HandlerResult {
        self(args, ctx)
    }
}

pub type BoxedCommand = Box<dyn Command + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSummary {
    pub name: String,
    pub summary: String,
    pub usage: String,
}

/// Command name to handler mapping, iterated in first-registration order.
#[derive(Default)]
pub struct CommandRegistry {
    order: Vec<String>,
    commands: HashMap<String, BoxedCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `cmd` under `name`. Re-registering replaces the handler but
    /// keeps the name's original position.
    pub fn register_command(&mut self, name: &str, cmd: BoxedCommand) {
        if self.commands.insert(name.to_string(), cmd).is_none() {
            self.order.push(name.to_string());
        }
    }

    pub fn register<C>(&mut self, name: &str, cmd: C)
    where
        C: Command + Send + Sync + 'static,
    {
        self.register_command(name, Box::new(cmd));
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Command + Send + Sync)> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn summaries(&self) -> Vec<CommandSummary> {
        self.order
            .iter()
            .filter_map(|name| {
                let cmd = self.commands.get(name)?;
                Some(CommandSummary {
                    name: name.clone(),
                    summary: cmd.summary().to_string(),
                    usage: cmd.usage().to_string(),
                })
            })
            .collect()
    }

    /// Closest registered name within [`MAX_SUGGESTION_DISTANCE`] edits.
    /// Ties go to the name registered first.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for candidate in self.names() {
            let distance = edit_distance(name, candidate);
            if distance > MAX_SUGGESTION_DISTANCE {
                continue;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }
        best.map(|(candidate, _)| candidate)
    }

    /// Registry seeded with the core shell built-ins.
    pub fn default_commands() -> Self {
        let mut reg = Self::new();
        reg.register("help", crate::commands::help::HelpCommand);
        reg.register("ls", crate::commands::ls::LsCommand);
        reg.register("pwd", crate::commands::pwd::PwdCommand);
        reg.register("cd", crate::commands::cd::CdCommand);
        reg.register("echo", crate::commands::echo::EchoCommand);
        reg.register("clear", crate::commands::clear::ClearCommand);
        reg.register("whoami", crate::commands::whoami::WhoamiCommand);
        reg.register("date", crate::commands::date::DateCommand);
        reg.register("history", crate::commands::history::HistoryCommand);
        reg.register("cat", crate::commands::cat::CatCommand);
        reg.register("mkdir", crate::commands::mkdir::MkdirCommand);
        reg.register("touch", crate::commands::touch::TouchCommand);
        reg.register("rm", crate::commands::rm::RmCommand);
        reg
    }
}

/// Levenshtein distance over chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            row[j + 1] = substitution.min(prev[j + 1] + 1).min(row[j] + 1);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_args: &[String], _ctx: &mut TerminalContext) -> HandlerResult {
        Ok(CommandResult::empty())
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("pwd", "pwd"), 0);
        assert_eq!(edit_distance("pwdd", "pwd"), 1);
        assert_eq!(edit_distance("sl", "ls"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_default_commands_in_order() {
        let reg = CommandRegistry::default_commands();
        let names: Vec<&str> = reg.names().collect();
        assert_eq!(
            names,
            vec![
                "help", "ls", "pwd", "cd", "echo", "clear", "whoami", "date", "history", "cat",
                "mkdir", "touch", "rm"
            ]
        );
        assert!(reg.get("ls").is_some());
        assert!(reg.get("git").is_none());
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut reg = CommandRegistry::new();
        reg.register("a", noop);
        reg.register("b", noop);
        reg.register("a", noop);
        assert_eq!(reg.get_command_names(), vec!["a", "b"]);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_suggest() {
        let reg = CommandRegistry::default_commands();
        assert_eq!(reg.suggest("pwdd"), Some("pwd"));
        assert_eq!(reg.suggest("mkdri"), Some("mkdir"));
        assert_eq!(reg.suggest("xyzzy"), None);
    }

    #[test]
    fn test_suggest_tie_goes_to_first_registered() {
        let mut reg = CommandRegistry::new();
        reg.register("cat", noop);
        reg.register("cd", noop);
        // "ct" is one edit from both
        assert_eq!(reg.suggest("ct"), Some("cat"));
    }

    #[test]
    fn test_result_constructors() {
        assert_eq!(CommandResult::text("").lines.len(), 0);
        assert_eq!(CommandResult::text("a\nb").lines, vec!["a", "b"]);
        let err = CommandResult::error("boom");
        assert!(err.is_error);
        assert_eq!(err.output(), "boom");
        assert_eq!(
            CommandResult::clear_screen().special_action,
            Some(SpecialAction::ClearScreen)
        );
    }
}
