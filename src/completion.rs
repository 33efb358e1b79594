//! Tab completion.
//!
//! - first word: registered command names, a lone match gets a trailing space
//! - later words: entries of the directory named by the partial path,
//!   directories completing with a trailing `/`

use serde::Serialize;

use crate::command::CommandRegistry;
use crate::context::TerminalContext;
use crate::vfs::ListOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Completion {
    /// The whole input line with the completion applied.
    Single(String),
    /// Candidates to show; the input stays as typed.
    Multiple(Vec<String>),
    None,
}

pub fn complete(input: &str, ctx: &TerminalContext, registry: &CommandRegistry) -> Completion {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return Completion::None;
    }

    // split off the word being completed
    let (head, partial) = match input.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
        Some((idx, c)) => input.split_at(idx + c.len_utf8()),
        None => ("", input),
    };

    if head.trim().is_empty() {
        complete_command(input, partial.trim_start(), registry)
    } else {
        complete_path(head, partial, ctx)
    }
}

fn complete_command(input: &str, partial: &str, registry: &CommandRegistry) -> Completion {
    let matches: Vec<String> = registry
        .names()
        .filter(|name| name.starts_with(partial))
        .map(str::to_string)
        .collect();

    match matches.as_slice() {
        [] => Completion::None,
        [only] => {
            let lead = &input[..input.len() - partial.len()];
            Completion::Single(format!("{}{} ", lead, only))
        }
        _ => Completion::Multiple(matches),
    }
}

fn complete_path(head: &str, partial: &str, ctx: &TerminalContext) -> Completion {
    let (dir_part, name_part) = match partial.rfind('/') {
        Some(idx) => partial.split_at(idx + 1),
        None => ("", partial),
    };

    let search_dir = if dir_part.is_empty() {
        ctx.cwd.clone()
    } else {
        ctx.resolve(dir_part)
    };

    let opts = ListOptions {
        include_hidden: name_part.starts_with('.'),
        long_format: false,
    };
    let Ok(entries) = ctx.vfs.list(&search_dir, opts) else {
        return Completion::None;
    };

    let matches: Vec<String> = entries
        .iter()
        .filter(|e| e.name.starts_with(name_part))
        .map(|e| {
            if e.is_dir() {
                format!("{}/", e.name)
            } else {
                e.name.clone()
            }
        })
        .collect();

    match matches.as_slice() {
        [] => Completion::None,
        [only] => Completion::Single(format!("{}{}{}", head, dir_part, only)),
        _ => Completion::Multiple(matches),
    }
}
