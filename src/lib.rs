//! Simulated shell for command-line tutorials.
//!
//! A [`TerminalSession`] owns an in-memory filesystem, command history, the
//! command registry and the active lesson. Hosts feed it one line at a time
//! with [`TerminalSession::submit`] and render the returned lines. In the
//! browser the [`Terminal`] wrapper exposes the same session to JavaScript.
pub mod command;
pub mod commands;
pub mod completion;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod history;
pub mod interpreter;
pub mod lesson;
pub mod session;
pub mod snapshot;
pub mod vfs;

pub use command::{BoxedCommand, Command, CommandRegistry, CommandResult, HandlerResult, SpecialAction};
pub use completion::Completion;
pub use config::SessionConfig;
pub use context::TerminalContext;
pub use error::{ConfigError, FsError, LessonError, ShellError, SnapshotError};
pub use events::{EventSink, SessionEvent};
pub use history::{Direction, HistoryBuffer};
pub use lesson::{Lesson, LessonCatalog, LessonProgress, LessonSignal, LessonStep, LessonStepMatcher};
pub use session::{SubmitOutcome, TerminalSession};
pub use snapshot::{HistoryExport, SessionSnapshot};
pub use vfs::VirtualFileSystem;

use serde::Serialize;
use wasm_bindgen::prelude::*;

// forwards session events to a js callback
struct JsEventSink(js_sys::Function);

impl EventSink for JsEventSink {
    fn emit(&mut self, event: &SessionEvent) {
        if let Ok(value) = serde_wasm_bindgen::to_value(event) {
            let _ = self.0.call1(&JsValue::NULL, &value);
        }
    }
}

// browser-side handle, one per terminal widget on the page
#[wasm_bindgen]
pub struct Terminal {
    session: TerminalSession,
}

// what execute_command hands back to js
#[derive(Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_action: Option<SpecialAction>,
    pub lesson_signal: LessonSignal,
}

impl From<SubmitOutcome> for CommandResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        Self {
            success: !outcome.rendered.is_error,
            lines: outcome.rendered.lines,
            special_action: outcome.rendered.special_action,
            lesson_signal: outcome.lesson_signal,
        }
    }
}

#[wasm_bindgen]
impl Terminal {
    /// `config_toml` is optional; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>) -> Result<Terminal, JsError> {
        let config = match config_toml {
            Some(toml) => SessionConfig::from_toml_str(&toml)?,
            None => SessionConfig::default(),
        };
        Ok(Terminal {
            session: TerminalSession::new(config),
        })
    }

    // main entry point - run a line and return the rendered result
    #[wasm_bindgen]
    pub fn execute_command(&mut self, input: &str) -> Result<JsValue, JsValue> {
        let response = CommandResponse::from(self.session.submit(input));
        Ok(serde_wasm_bindgen::to_value(&response)?)
    }

    #[wasm_bindgen]
    pub fn load_lesson(&mut self, lesson_json: &str) -> Result<(), JsError> {
        self.session.load_lesson_json(lesson_json)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn unload_lesson(&mut self) {
        self.session.unload_lesson();
    }

    /// Instruction of the step the learner is on, if a lesson is active.
    #[wasm_bindgen]
    pub fn current_instruction(&self) -> Option<String> {
        self.session.current_step().map(|step| step.instruction.clone())
    }

    #[wasm_bindgen]
    pub fn lesson_progress(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.lesson_progress())?)
    }

    #[wasm_bindgen]
    pub fn history_up(&mut self) -> String {
        self.session.history_older()
    }

    #[wasm_bindgen]
    pub fn history_down(&mut self) -> String {
        self.session.history_newer()
    }

    #[wasm_bindgen]
    pub fn complete(&self, input: &str) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.complete(input))?)
    }

    #[wasm_bindgen]
    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    #[wasm_bindgen]
    pub fn current_directory(&self) -> String {
        self.session.current_directory().to_string()
    }

    #[wasm_bindgen]
    pub fn welcome_message(&self) -> String {
        self.session.welcome_message().to_string()
    }

    // name + summary + usage for every registered command
    #[wasm_bindgen]
    pub fn get_command_list(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.registry().summaries())?)
    }

    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<String, JsError> {
        Ok(self.session.snapshot().to_json()?)
    }

    #[wasm_bindgen]
    pub fn restore(&mut self, snapshot_json: &str) -> Result<(), JsError> {
        let snapshot = SessionSnapshot::from_json(snapshot_json)?;
        self.session.restore(snapshot)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn export_history(&self) -> Result<String, JsError> {
        Ok(self.session.export_history()?)
    }

    #[wasm_bindgen]
    pub fn import_history(&mut self, history_json: &str) -> Result<usize, JsError> {
        Ok(self.session.import_history(history_json)?)
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// `callback` receives every session event as a plain object.
    #[wasm_bindgen]
    pub fn set_event_callback(&mut self, callback: js_sys::Function) {
        self.session.set_event_sink(JsEventSink(callback));
    }

    #[wasm_bindgen]
    pub fn clear_event_callback(&mut self) {
        self.session.clear_event_sink();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_from_outcome() {
        let mut session = TerminalSession::default();
        let response = CommandResponse::from(session.submit("pwdd"));
        assert!(!response.success);
        assert_eq!(response.lines, vec!["Command not found: pwdd", "Did you mean: pwd?"]);
        assert_eq!(response.lesson_signal, LessonSignal::None);

        let response = CommandResponse::from(session.submit("clear"));
        assert!(response.success);
        assert_eq!(response.special_action, Some(SpecialAction::ClearScreen));
    }

    #[test]
    fn test_response_json_shape() {
        let mut session = TerminalSession::default();
        let response = CommandResponse::from(session.submit("echo hi"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["lines"][0], "hi");
        assert_eq!(json["lesson_signal"]["kind"], "none");
        assert!(json.get("special_action").is_none());
    }
}
