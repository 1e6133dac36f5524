//! Bounded history of submitted command lines.

use std::collections::VecDeque;

use bevy::prelude::*;

/// Default number of remembered command lines.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Submitted command lines, most recent first, with a navigation cursor.
///
/// # Examples
///
/// ```
/// use bevy_console_overloads::core::CommandHistory;
///
/// let mut history = CommandHistory::new(2);
/// history.record("first");
/// history.record("second");
/// history.record("third");
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.navigate(true), Some("third"));
/// assert_eq!(history.navigate(true), Some("second"));
/// assert_eq!(history.navigate(true), Some("second"));
/// assert_eq!(history.navigate(false), Some("third"));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: Option<usize>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            cursor: None,
        }
    }

    /// Push a line to the front, evicting the oldest beyond capacity.
    /// Resets navigation.
    pub fn record(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        self.entries.truncate(self.capacity);
        self.cursor = None;
    }

    /// Step the cursor towards older (`forward`) or newer entries.
    ///
    /// The cursor is clamped to the recorded range, so the first step in
    /// either direction from a fresh cursor lands on the most recent entry.
    pub fn navigate(&mut self, forward: bool) -> Option<&str> {
        if self.entries.is_empty() {
            self.cursor = None;
            return None;
        }
        let current = self.cursor.map_or(-1, |c| c as isize);
        let step = if forward { 1 } else { -1 };
        let last = self.entries.len() as isize - 1;
        let next = (current + step).clamp(0, last) as usize;
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Current navigation position, `None` until [`navigate`](Self::navigate) is called.
    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest entries if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.entries.truncate(capacity);
        if self.cursor.is_some_and(|c| c >= self.entries.len()) {
            self.cursor = None;
        }
    }

    /// Entry at `index`, 0 being the most recent.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
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
        self.cursor = None;
    }
}
