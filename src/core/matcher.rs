//! Edit-distance matching for command suggestions.

/// Suggestions are kept while their partial distance stays below this.
pub const MATCH_THRESHOLD: usize = 3;

/// Levenshtein distance over chars (insert, delete and substitute all cost 1).
///
/// # Examples
///
/// ```
/// use bevy_console_overloads::core::edit_distance;
///
/// assert_eq!(edit_distance("gravity", "gravity"), 0);
/// assert_eq!(edit_distance("grvity", "gravity"), 1);
/// assert_eq!(edit_distance("", "abc"), 3);
/// ```
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// A command name scored against partial input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMatch {
    pub full_name: Box<str>,
    pub help_text: &'static str,
    /// Distance to the name cut to one char past the input length.
    pub partial_distance: usize,
    /// Distance to the whole name.
    pub full_distance: usize,
}

impl CommandMatch {
    /// Score `full_name` against `partial`.
    pub fn score(partial: &str, full_name: &str, help_text: &'static str) -> Self {
        let cut: String = full_name.chars().take(partial.chars().count() + 1).collect();
        Self {
            full_name: full_name.into(),
            help_text,
            partial_distance: edit_distance(partial, &cut),
            full_distance: edit_distance(partial, full_name),
        }
    }
}

/// Score every candidate, drop those at or above `threshold` and sort by
/// partial distance, then full distance. Ties keep candidate order.
pub fn rank_candidates<'a>(
    partial: &str,
    candidates: impl IntoIterator<Item = (&'a str, &'static str)>,
    threshold: usize,
) -> Vec<CommandMatch> {
    let mut matches: Vec<_> = candidates
        .into_iter()
        .map(|(name, help)| CommandMatch::score(partial, name, help))
        .filter(|m| m.partial_distance < threshold)
        .collect();

    matches.sort_by_key(|m| (m.partial_distance, m.full_distance));
    matches
}
