//! Console configuration.

use bevy::prelude::*;
#[cfg(feature = "persist")]
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_HISTORY_CAPACITY, MATCH_THRESHOLD};

/// Console settings.
///
/// Seeded by [`ConsolePlugin`](crate::ConsolePlugin). With the `persist`
/// feature it can be read from and written to a RON file.
#[derive(Resource, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "persist", derive(Serialize, Deserialize), serde(default))]
pub struct ConsoleConfig {
    /// How many command lines history keeps.
    pub max_history: usize,
    /// Prefix for the echoed command line.
    pub execution_symbol: char,
    /// Command suggestions are kept while their partial edit distance is
    /// below this.
    pub match_threshold: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_HISTORY_CAPACITY,
            execution_symbol: '>',
            match_threshold: MATCH_THRESHOLD,
        }
    }
}
