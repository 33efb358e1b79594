use serde::Serialize;

/// Things a session reports to its host as they happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    LessonLoaded {
        id: String,
        title: String,
        steps: usize,
    },
    StepPassed {
        lesson: String,
        step: usize,
        command: String,
    },
    StepRetry {
        lesson: String,
        step: usize,
        attempts: u32,
    },
    LessonCompleted {
        lesson: String,
        commands: Vec<String>,
    },
    Cleared,
    Reset,
}

/// Receives session events synchronously. Must not block.
pub trait EventSink {
    fn emit(&mut self, event: &SessionEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&SessionEvent),
{
    fn emit(&mut self, event: &SessionEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |e: &SessionEvent| seen.push(e.clone());
            sink.emit(&SessionEvent::Cleared);
            sink.emit(&SessionEvent::Reset);
        }
        assert_eq!(seen, vec![SessionEvent::Cleared, SessionEvent::Reset]);
    }

    #[test]
    fn test_event_json_shape() {
        let event = SessionEvent::StepPassed {
            lesson: "basics".to_string(),
            step: 0,
            command: "pwd".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "step_passed");
        assert_eq!(json["command"], "pwd");
    }
}
