// native repl over the same session the browser uses
#[cfg(not(target_arch = "wasm32"))]
mod repl {
    use std::fs;
    use std::io::{self, BufRead, Write};
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;
    use tracing_subscriber::EnvFilter;
    use tutor_shell::{Lesson, LessonCatalog, LessonSignal, SessionConfig, TerminalSession};

    #[derive(Parser)]
    #[command(name = "tutor-shell")]
    #[command(about = "Practice shell commands in a simulated terminal")]
    struct Cli {
        /// Session config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Lesson to run (JSON)
        #[arg(long)]
        lesson: Option<PathBuf>,
        /// Treat the lesson file as a catalog and pick this lesson from it
        #[arg(long, requires = "lesson")]
        lesson_id: Option<String>,
    }

    fn load_lesson(path: &Path, id: Option<&str>) -> Result<Lesson> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read lesson {}", path.display()))?;
        let lesson = match id {
            Some(id) => LessonCatalog::from_json(&json)?.get(id)?.clone(),
            None => Lesson::from_json(&json)?,
        };
        Ok(lesson)
    }

    fn print_instruction(session: &TerminalSession) {
        if let Some(step) = session.current_step() {
            println!("\n→ {}", step.instruction);
        }
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(io::stderr)
            .init();

        let config = match &cli.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SessionConfig::default(),
        };
        let mut session = TerminalSession::new(config);

        if let Some(path) = &cli.lesson {
            let lesson = load_lesson(path, cli.lesson_id.as_deref())?;
            println!("{}", lesson.title);
            if !lesson.description.is_empty() {
                println!("{}", lesson.description);
            }
            session.load_lesson(lesson);
        } else {
            println!("{}", session.welcome_message());
        }
        print_instruction(&session);

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut lines = stdin.lock().lines();
        loop {
            print!("{}", session.prompt());
            stdout.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim() == "exit" {
                break;
            }

            let outcome = session.submit(&line);
            for out in &outcome.rendered.lines {
                if outcome.rendered.is_error {
                    eprintln!("{}", out);
                } else {
                    println!("{}", out);
                }
            }
            if outcome.rendered.special_action.is_some() {
                // ansi clear + home
                print!("\x1b[2J\x1b[H");
            }

            match outcome.lesson_signal {
                LessonSignal::Correct => {
                    println!("✓ Correct!");
                    print_instruction(&session);
                }
                LessonSignal::Retry { hint: Some(hint) } => println!("Hint: {}", hint),
                LessonSignal::Complete => {
                    println!("✓ Correct!");
                    if let Some(progress) = session.lesson_progress() {
                        println!("\nLesson complete!");
                        println!("Commands learned: {}", progress.completed_commands.join(", "));
                    }
                }
                LessonSignal::Retry { hint: None } | LessonSignal::None => {}
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    repl::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
