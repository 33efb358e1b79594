//! One isolated tutorial terminal: filesystem, history, commands and the
//! active lesson, driven one submitted line at a time.

use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::command::{BoxedCommand, Command, CommandRegistry, CommandResult, SpecialAction};
use crate::commands;
use crate::completion::{self, Completion};
use crate::config::SessionConfig;
use crate::context::{Identity, TerminalContext};
use crate::error::{FsError, LessonError, SnapshotError};
use crate::events::{EventSink, SessionEvent};
use crate::history::HistoryBuffer;
use crate::interpreter::run_command;
use crate::lesson::{Lesson, LessonProgress, LessonSignal, LessonStep, LessonStepMatcher};
use crate::snapshot::{HistoryExport, SessionSnapshot};
use crate::vfs::{join, split_path, VirtualFileSystem, ROOT};

/// Everything one `submit` produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub rendered: CommandResult,
    pub lesson_signal: LessonSignal,
}

pub struct TerminalSession {
    id: Uuid,
    config: SessionConfig,
    ctx: TerminalContext,
    registry: CommandRegistry,
    matcher: Option<LessonStepMatcher>,
    sink: Option<Box<dyn EventSink>>,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl TerminalSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_commands(config, Vec::new())
    }

    /// Session with extra commands registered after the built-ins and the
    /// configured command sets.
    pub fn with_commands(mut config: SessionConfig, extra: Vec<(String, BoxedCommand)>) -> Self {
        config.home = VirtualFileSystem::resolve(&config.home, ROOT);

        let mut vfs = VirtualFileSystem::new();
        let seeded = if config.seed_filesystem {
            seed_default_tree(&mut vfs, &config.home)
        } else {
            vfs.create_dir_all(&config.home)
        };
        if let Err(err) = seeded {
            warn!(error = %err, path = err.path(), "failed to seed filesystem");
        }

        let mut registry = CommandRegistry::default_commands();
        for set in &config.command_sets {
            if commands::register_command_set(set, &mut registry) {
                if let Err(err) = commands::seed_command_set(set, &mut vfs, &config.home) {
                    warn!(set = %set, error = %err, "failed to seed command set files");
                }
            }
        }
        for (name, cmd) in extra {
            registry.register_command(&name, cmd);
        }

        let mut ctx = TerminalContext::new_with_vfs(vfs);
        ctx.identity = Identity {
            user: config.user.clone(),
            host: config.host.clone(),
            home: config.home.clone(),
        };
        ctx.history = HistoryBuffer::new(config.history_limit);
        ctx.cwd = config.home.clone();
        ctx.commands = registry.summaries();

        let id = Uuid::new_v4();
        debug!(%id, commands = registry.len(), "session created");
        Self {
            id,
            config,
            ctx,
            registry,
            matcher: None,
            sink: None,
        }
    }

    /// Run one input line and check it against the active lesson.
    ///
    /// Blank lines do nothing: no history entry, no lesson check.
    pub fn submit(&mut self, line: &str) -> SubmitOutcome {
        let span = info_span!("session", id = %self.id);
        let _enter = span.enter();

        let input = line.trim();
        if input.is_empty() {
            return SubmitOutcome::default();
        }

        self.ctx.history.append(input);
        let rendered = run_command(input, &mut self.ctx, &self.registry);
        if rendered.special_action == Some(SpecialAction::ClearScreen) {
            self.emit(SessionEvent::Cleared);
        }

        let lesson_signal = self.check_lesson(input);
        SubmitOutcome {
            rendered,
            lesson_signal,
        }
    }

    fn check_lesson(&mut self, input: &str) -> LessonSignal {
        let Some(matcher) = self.matcher.as_mut() else {
            return LessonSignal::None;
        };

        let step = matcher.step_index();
        let signal = matcher.submit(input);
        let lesson = matcher.lesson().id.clone();
        let mut events = Vec::new();
        match &signal {
            LessonSignal::Correct | LessonSignal::Complete => {
                info!(lesson = %lesson, step, "step passed");
                events.push(SessionEvent::StepPassed {
                    lesson: lesson.clone(),
                    step,
                    command: input.to_string(),
                });
                if signal == LessonSignal::Complete {
                    info!(lesson = %lesson, "lesson completed");
                    events.push(SessionEvent::LessonCompleted {
                        lesson,
                        commands: matcher.completed_commands().to_vec(),
                    });
                }
            }
            LessonSignal::Retry { .. } => {
                debug!(lesson = %lesson, step, attempts = matcher.misses(), "step missed");
                events.push(SessionEvent::StepRetry {
                    lesson,
                    step,
                    attempts: matcher.misses(),
                });
            }
            LessonSignal::None => {}
        }

        for event in events {
            self.emit(event);
        }
        signal
    }

    /// Make `lesson` the active one, starting from its first step.
    ///
    /// Lesson files land in the home directory and lesson commands are
    /// registered on top of the existing ones.
    pub fn load_lesson(&mut self, lesson: Lesson) {
        for file in &lesson.files {
            if let Err(err) = self.write_home_file(&file.name, &file.content) {
                warn!(lesson = %lesson.id, file = %file.name, error = %err, "failed to write lesson file");
            }
        }
        for cmd in &lesson.commands {
            self.registry.register(&cmd.name, cmd.command.clone());
        }
        self.ctx.commands = self.registry.summaries();

        info!(lesson = %lesson.id, steps = lesson.steps.len(), "lesson loaded");
        self.emit(SessionEvent::LessonLoaded {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            steps: lesson.steps.len(),
        });
        self.matcher = Some(LessonStepMatcher::new(lesson, self.config.hint_after_attempts));
    }

    pub fn load_lesson_json(&mut self, json: &str) -> Result<(), LessonError> {
        let lesson = Lesson::from_json(json)?;
        self.load_lesson(lesson);
        Ok(())
    }

    pub fn unload_lesson(&mut self) -> Option<Lesson> {
        self.matcher.take().map(|m| m.lesson().clone())
    }

    fn write_home_file(&mut self, name: &str, content: &str) -> Result<(), FsError> {
        let path = VirtualFileSystem::resolve(name, &self.config.home);
        if let Some((parent, _)) = split_path(&path) {
            self.ctx.vfs.create_dir_all(parent)?;
        }
        self.ctx.vfs.write_file(&path, content)
    }

    /// Drop the history and the active lesson. The filesystem is kept.
    pub fn reset(&mut self) {
        self.ctx.history.clear();
        self.matcher = None;
        info!(id = %self.id, "session reset");
        self.emit(SessionEvent::Reset);
    }

    pub fn register<C>(&mut self, name: &str, cmd: C)
    where
        C: Command + Send + Sync + 'static,
    {
        self.registry.register(name, cmd);
        self.ctx.commands = self.registry.summaries();
    }

    pub fn set_event_sink(&mut self, sink: impl EventSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn clear_event_sink(&mut self) {
        self.sink = None;
    }

    fn emit(&mut self, event: SessionEvent) {
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(&event);
        }
    }

    pub fn prompt(&self) -> String {
        self.ctx.prompt(&self.config.prompt)
    }

    /// Arrow up.
    pub fn history_older(&mut self) -> String {
        self.ctx.history.older()
    }

    /// Arrow down.
    pub fn history_newer(&mut self) -> String {
        self.ctx.history.newer()
    }

    pub fn complete(&self, input: &str) -> Completion {
        completion::complete(input, &self.ctx, &self.registry)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            history: self.ctx.history.to_vec(),
            current_directory: self.ctx.cwd.clone(),
        }
    }

    /// Restore history and directory. Nothing changes if the directory is gone.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), SnapshotError> {
        if !self.ctx.vfs.is_dir(&snapshot.current_directory) {
            return Err(SnapshotError::MissingDirectory(snapshot.current_directory));
        }
        self.ctx.history.replace(snapshot.history);
        self.ctx.cwd = snapshot.current_directory;
        self.ctx.oldpwd = None;
        Ok(())
    }

    pub fn export_history(&self) -> Result<String, SnapshotError> {
        HistoryExport::new(
            self.ctx.history.to_vec(),
            &self.config.user,
            &self.config.host,
        )
        .to_json_pretty()
    }

    /// Replace the history with an exported one. Returns the entry count.
    pub fn import_history(&mut self, json: &str) -> Result<usize, SnapshotError> {
        let export = HistoryExport::from_json(json)?;
        self.ctx.history.replace(export.commands);
        Ok(self.ctx.history.len())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn welcome_message(&self) -> &str {
        &self.config.welcome_message
    }

    pub fn current_directory(&self) -> &str {
        &self.ctx.cwd
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.ctx.history
    }

    pub fn filesystem(&self) -> &VirtualFileSystem {
        &self.ctx.vfs
    }

    pub fn context(&self) -> &TerminalContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut TerminalContext {
        &mut self.ctx
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn lesson(&self) -> Option<&Lesson> {
        self.matcher.as_ref().map(LessonStepMatcher::lesson)
    }

    pub fn current_step(&self) -> Option<&LessonStep> {
        self.matcher.as_ref().and_then(LessonStepMatcher::current_step)
    }

    pub fn lesson_progress(&self) -> Option<LessonProgress> {
        self.matcher.as_ref().map(LessonStepMatcher::progress)
    }
}

/// `/home/<user>` with a few documents, `/etc`, `/var` and `/tmp`.
fn seed_default_tree(vfs: &mut VirtualFileSystem, home: &str) -> Result<(), FsError> {
    vfs.create_dir_all(home)?;
    // home may already live under one of these
    for dir in ["/etc", "/var", "/tmp"] {
        vfs.create_dir_all(dir)?;
    }
    for dir in ["documents", "projects/project1", "projects/project2"] {
        vfs.create_dir_all(&join(home, dir))?;
    }
    vfs.create_file(&join(home, "documents/file1.txt"), "")?;
    vfs.create_file(&join(home, "documents/file2.txt"), "")?;
    vfs.create_file(&join(home, "readme.txt"), "Welcome to the terminal simulator!")?;
    Ok(())
}
