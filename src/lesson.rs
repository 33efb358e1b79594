//! Lessons and the step matcher that checks typed commands against them.
//!
//! A lesson is loaded from JSON:
//!
//! ```json
//! {
//!   "id": "basics",
//!   "title": "Shell Basics",
//!   "steps": [
//!     {"instruction": "Print the working directory", "expectedCommand": "pwd", "hint": "Type pwd"},
//!     {"instruction": "List everything", "expectedCommand": {"pattern": "^ls( -la?)?$"}}
//!   ],
//!   "files": [{"name": ".zshrc", "content": "export ZSH=~/.oh-my-zsh"}],
//!   "commands": [{"name": "zsh", "responses": {"--version": "zsh 5.8"}}]
//! }
//! ```
//!
//! Patterns are compiled once at load time and matched unanchored, so
//! authors anchor with `^...$` when they want an exact match.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::commands::canned::CannedCommand;
use crate::error::LessonError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExpectedDefinition {
    Literal(String),
    Pattern { pattern: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    pub instruction: String,
    pub expected_command: ExpectedDefinition,
    #[serde(default)]
    pub hint: Option<String>,
}

/// A file written into the home directory when the lesson loads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LessonFile {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

/// A canned command registered for the lesson.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LessonCommand {
    pub name: String,
    #[serde(flatten)]
    pub command: CannedCommand,
}

/// Lesson as written in JSON, before patterns are compiled.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<StepDefinition>,
    #[serde(default)]
    pub files: Vec<LessonFile>,
    #[serde(default)]
    pub commands: Vec<LessonCommand>,
}

#[derive(Debug, Clone)]
pub enum ExpectedCommand {
    /// Exact equality with the trimmed input line.
    Literal(String),
    Pattern(Regex),
}

impl ExpectedCommand {
    pub fn matches(&self, input: &str) -> bool {
        match self {
            ExpectedCommand::Literal(expected) => expected == input,
            ExpectedCommand::Pattern(re) => re.is_match(input),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LessonStep {
    pub instruction: String,
    pub expected: ExpectedCommand,
    pub hint: Option<String>,
}

impl LessonStep {
    pub fn literal(instruction: &str, command: &str) -> Self {
        Self {
            instruction: instruction.to_string(),
            expected: ExpectedCommand::Literal(command.to_string()),
            hint: None,
        }
    }

    pub fn pattern(instruction: &str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            instruction: instruction.to_string(),
            expected: ExpectedCommand::Pattern(Regex::new(pattern)?),
            hint: None,
        })
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<LessonStep>,
    pub files: Vec<LessonFile>,
    pub commands: Vec<LessonCommand>,
}

impl Lesson {
    pub fn new(id: &str, title: &str, steps: Vec<LessonStep>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            steps,
            files: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LessonError> {
        let def: LessonDefinition = serde_json::from_str(json)?;
        Self::try_from(def)
    }
}

impl TryFrom<LessonDefinition> for Lesson {
    type Error = LessonError;

    fn try_from(def: LessonDefinition) -> Result<Self, Self::Error> {
        if def.steps.is_empty() {
            return Err(LessonError::EmptyLesson(def.id));
        }
        let steps = def
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| {
                let expected = match step.expected_command {
                    ExpectedDefinition::Literal(cmd) => ExpectedCommand::Literal(cmd),
                    ExpectedDefinition::Pattern { pattern } => {
                        let re = Regex::new(&pattern)
                            .map_err(|source| LessonError::InvalidPattern { step: i, source })?;
                        ExpectedCommand::Pattern(re)
                    }
                };
                Ok(LessonStep {
                    instruction: step.instruction,
                    expected,
                    hint: step.hint,
                })
            })
            .collect::<Result<Vec<_>, LessonError>>()?;

        Ok(Self {
            id: def.id,
            title: def.title,
            description: def.description,
            steps,
            files: def.files,
            commands: def.commands,
        })
    }
}

/// A set of lessons parsed from one JSON array.
#[derive(Debug, Clone, Default)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    pub fn from_json(json: &str) -> Result<Self, LessonError> {
        let defs: Vec<LessonDefinition> = serde_json::from_str(json)?;
        let lessons = defs
            .into_iter()
            .map(Lesson::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lessons })
    }

    pub fn get(&self, id: &str) -> Result<&Lesson, LessonError> {
        self.lessons
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| LessonError::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter()
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// Result of checking one submitted line against the active lesson.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LessonSignal {
    /// No lesson, or the lesson is already finished.
    #[default]
    None,
    Correct,
    Retry { hint: Option<String> },
    /// The final step was just passed.
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub lesson_id: String,
    pub step_index: usize,
    pub total_steps: usize,
    pub completed_commands: Vec<String>,
}

/// Walks a lesson's steps one submitted line at a time.
///
/// States are `AwaitingStep(i)` for `i` in `0..=steps.len()`, where
/// `steps.len()` is the terminal state. Submits after that are ignored.
#[derive(Debug, Clone)]
pub struct LessonStepMatcher {
    lesson: Lesson,
    step_index: usize,
    completed_commands: Vec<String>,
    misses: u32,
    hint_after: u32,
}

impl LessonStepMatcher {
    /// `hint_after` consecutive misses on a step surface its hint.
    pub fn new(lesson: Lesson, hint_after: u32) -> Self {
        Self {
            lesson,
            step_index: 0,
            completed_commands: Vec::new(),
            misses: 0,
            hint_after: hint_after.max(1),
        }
    }

    pub fn submit(&mut self, input: &str) -> LessonSignal {
        let Some(step) = self.lesson.steps.get(self.step_index) else {
            return LessonSignal::None;
        };

        if step.expected.matches(input) {
            self.completed_commands.push(input.to_string());
            self.step_index += 1;
            self.misses = 0;
            if self.is_complete() {
                LessonSignal::Complete
            } else {
                LessonSignal::Correct
            }
        } else {
            self.misses += 1;
            let hint = if self.misses >= self.hint_after {
                step.hint.clone()
            } else {
                None
            };
            LessonSignal::Retry { hint }
        }
    }

    pub fn reset(&mut self) {
        self.step_index = 0;
        self.completed_commands.clear();
        self.misses = 0;
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn current_step(&self) -> Option<&LessonStep> {
        self.lesson.steps.get(self.step_index)
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Consecutive misses on the current step.
    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn is_complete(&self) -> bool {
        self.step_index >= self.lesson.steps.len()
    }

    pub fn completed_commands(&self) -> &[String] {
        &self.completed_commands
    }

    pub fn progress(&self) -> LessonProgress {
        LessonProgress {
            lesson_id: self.lesson.id.clone(),
            step_index: self.step_index,
            total_steps: self.lesson.steps.len(),
            completed_commands: self.completed_commands.clone(),
        }
    }
}
