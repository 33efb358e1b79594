//! Command history with up/down arrow navigation.
//!
//! The navigation cursor counts back from the newest entry: `Some(0)` is the
//! most recent command, `None` is the fresh input line.

use std::collections::VecDeque;

/// Default maximum number of history entries.
pub const HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Arrow up, toward older entries.
    Older,
    /// Arrow down, toward newer entries.
    Newer,
}

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    /// Oldest first.
    entries: VecDeque<String>,
    cursor: Option<usize>,
    /// 0 means unbounded.
    limit: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl HistoryBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            limit,
        }
    }

    /// Record a command. Consecutive repeats are dropped.
    ///
    /// Returns whether an entry was added. A dropped repeat leaves the
    /// navigation cursor where it was; a real append resets it.
    pub fn append(&mut self, command: &str) -> bool {
        if self.entries.back().is_some_and(|last| last == command) {
            return false;
        }
        self.cursor = None;
        self.entries.push_back(command.to_string());
        if self.limit > 0 && self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        true
    }

    /// Move `cursor` one step and return the new cursor with the line it
    /// points at. The cursor is clamped to `[None, Some(len - 1)]`; `None`
    /// yields an empty line. Navigating an empty history changes nothing.
    pub fn navigate(&self, direction: Direction, cursor: Option<usize>) -> (Option<usize>, String) {
        if self.entries.is_empty() {
            return (cursor, String::new());
        }
        let last = self.entries.len() - 1;
        let next = match (direction, cursor) {
            (Direction::Older, None) => Some(0),
            (Direction::Older, Some(i)) => Some((i + 1).min(last)),
            (Direction::Newer, None) | (Direction::Newer, Some(0)) => None,
            (Direction::Newer, Some(i)) => Some((i - 1).min(last)),
        };
        let value = next
            .and_then(|i| self.entries.get(last - i))
            .cloned()
            .unwrap_or_default();
        (next, value)
    }

    /// Arrow up using the buffer's own cursor.
    pub fn older(&mut self) -> String {
        self.step(Direction::Older)
    }

    /// Arrow down using the buffer's own cursor.
    pub fn newer(&mut self) -> String {
        self.step(Direction::Newer)
    }

    fn step(&mut self, direction: Direction) -> String {
        let (cursor, value) = self.navigate(direction, self.cursor);
        self.cursor = cursor;
        value
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Replace the whole history, oldest first.
    pub fn replace(&mut self, commands: impl IntoIterator<Item = String>) {
        self.clear();
        for command in commands {
            self.append(&command);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
