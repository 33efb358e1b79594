use chrono::{DateTime, Local};

use crate::command::{Command, CommandResult, HandlerResult};
use crate::context::TerminalContext;

pub struct DateCommand;

/// `Mon Jan 15 2024 10:30:00`
pub fn format_date(now: &DateTime<Local>) -> String {
    now.format("%a %b %d %Y %H:%M:%S").to_string()
}

impl Command for DateCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> HandlerResult {
        if super::help_requested(args) {
            return Ok(super::usage(self.usage()));
        }
        Ok(CommandResult::text(format_date(&Local::now())))
    }

    fn summary(&self) -> &str {
        "Show current date"
    }

    fn usage(&self) -> &str {
        "Usage: date\nDisplay the current date and time."
    }
}
