//! Console variables set with `set` and read back with `peek`.

use std::collections::HashMap;

use bevy::prelude::*;

use super::{ReservedKind, Value, VariableError, VariableName, is_literal_color};

/// Check that `name` may be used as a variable identifier.
///
/// Identifiers are `[A-Za-z][A-Za-z0-9]*` and must not spell a literal:
/// `null`, `true` and `false` in any case, or a literal color name.
pub fn validate_identifier(name: &str) -> Result<(), VariableError> {
    let mut chars = name.chars();
    let well_formed = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric());
    if !well_formed {
        return Err(VariableError::InvalidName {
            name: name.to_string(),
        });
    }

    let kind = match name.to_ascii_lowercase().as_str() {
        "null" => Some(ReservedKind::Null),
        "true" | "false" => Some(ReservedKind::Boolean),
        _ if is_literal_color(name) => Some(ReservedKind::Color),
        _ => None,
    };
    match kind {
        Some(kind) => Err(VariableError::Reserved {
            name: name.to_string(),
            kind,
        }),
        None => Ok(()),
    }
}

/// Named values available to every command line.
#[derive(Resource, Default, Debug)]
pub struct VariableStore {
    values: HashMap<VariableName, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a variable.
    pub fn set(&mut self, name: VariableName, value: Value) -> Result<(), VariableError> {
        validate_identifier(name.as_str())?;
        self.values.insert(name, value);
        Ok(())
    }

    /// Remove a variable, returning its last value.
    pub fn unset(&mut self, name: &str) -> Result<Value, VariableError> {
        self.values
            .remove(name)
            .ok_or_else(|| VariableError::Unbound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<&Value, VariableError> {
        self.values
            .get(name)
            .ok_or_else(|| VariableError::Unbound(name.to_string()))
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all variables, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&VariableName, &Value)> {
        let mut entries: Vec<_> = self.values.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_unset() {
        let mut store = VariableStore::new();
        store.set(VariableName::new("x"), Value::Int(5)).unwrap();
        assert_eq!(store.get("x"), Ok(&Value::Int(5)));

        store.set(VariableName::new("x"), Value::Float(1.5)).unwrap();
        assert_eq!(store.get("x"), Ok(&Value::Float(1.5)));
        assert_eq!(store.len(), 1);

        assert_eq!(store.unset("x"), Ok(Value::Float(1.5)));
        assert_eq!(store.get("x"), Err(VariableError::Unbound("x".into())));
        assert_eq!(store.unset("x"), Err(VariableError::Unbound("x".into())));
    }

    #[test]
    fn test_reserved_words_rejected() {
        for name in ["null", "Null", "NULL", "true", "FALSE", "red", "magenta"] {
            assert!(
                matches!(validate_identifier(name), Err(VariableError::Reserved { .. })),
                "{name} should be reserved"
            );
        }
        assert!(validate_identifier("Red").is_ok());
        assert!(validate_identifier("speed2").is_ok());
    }

    #[test]
    fn test_reserved_kinds() {
        let kind = |name| match validate_identifier(name) {
            Err(VariableError::Reserved { kind, .. }) => Some(kind),
            _ => None,
        };
        assert_eq!(kind("nuLL"), Some(ReservedKind::Null));
        assert_eq!(kind("True"), Some(ReservedKind::Boolean));
        assert_eq!(kind("teal"), Some(ReservedKind::Color));
    }

    #[test]
    fn test_malformed_identifiers() {
        for name in ["", "1x", "with space", "dash-ed", "under_score"] {
            assert!(
                matches!(validate_identifier(name), Err(VariableError::InvalidName { .. })),
                "{name:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_store_rejects_reserved_name() {
        let mut store = VariableStore::new();
        assert!(store.set(VariableName::new("true"), Value::Int(1)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_iter_sorted() {
        let mut store = VariableStore::new();
        store.set(VariableName::new("b"), Value::Int(2)).unwrap();
        store.set(VariableName::new("a"), Value::Int(1)).unwrap();
        let names: Vec<_> = store.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
