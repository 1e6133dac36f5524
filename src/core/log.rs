//! The console log sink.
//!
//! Commands and the executor write here; `send_pending_outputs` drains the
//! buffer into [`ConsoleOutputEvent`] messages once per frame.

use bevy::prelude::*;

use super::{ConsoleOutputEvent, ConsoleOutputLevel};

/// Buffered console output.
///
/// Every entry is also emitted as a `debug!` event with target `console`, so
/// a `LogPlugin` filter like `console=debug` shows the console transcript.
#[derive(Resource, Debug, Default)]
pub struct ConsoleLog {
    entries: Vec<ConsoleOutputEvent>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: ConsoleOutputLevel, message: impl Into<String>) {
        let entry = ConsoleOutputEvent::new(level, message);
        debug!(target: "console", "[{}] {}", level.label(), entry.message);
        self.entries.push(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputLevel::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputLevel::Error, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputLevel::Success, message);
    }

    pub fn command(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputLevel::Command, message);
    }

    /// Entries not yet drained, oldest first.
    #[inline]
    pub fn entries(&self) -> &[ConsoleOutputEvent] {
        &self.entries
    }

    /// Messages at `level`, oldest first.
    pub fn messages(&self, level: ConsoleOutputLevel) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.level == level)
            .map(|e| e.message.as_str())
    }

    pub fn drain(&mut self) -> impl Iterator<Item = ConsoleOutputEvent> + '_ {
        self.entries.drain(..)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels_and_drain() {
        let mut log = ConsoleLog::new();
        log.command("> peek x");
        log.error("'x' has not been set");
        log.success("done");

        assert_eq!(log.len(), 3);
        assert_eq!(log.messages(ConsoleOutputLevel::Error).collect::<Vec<_>>(), vec!["'x' has not been set"]);

        let drained: Vec<_> = log.drain().collect();
        assert_eq!(drained[0], ConsoleOutputEvent::command("> peek x"));
        assert!(log.is_empty());
    }
}
