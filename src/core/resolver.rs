//! Overload resolution.
//!
//! Each overload with the right arity is scored parameter by parameter:
//!
//! - exact type match: +2
//! - widening match (see [`ValueType::accepts`]): +1
//! - unknown type (`null` or an unbound variable) into a nullable
//!   parameter: +0
//! - anything else disqualifies the overload
//!
//! The highest score wins. Several overloads tied at the top is an
//! ambiguity, never a silent pick.

use super::{CommandDescriptor, ResolutionError, Value, ValueType, VariableStore};

/// Type a value scores as against `declared`.
///
/// Variables stand in for their stored value unless the parameter wants the
/// variable itself. `None` means unknown.
fn effective_type(value: &Value, declared: ValueType, variables: &VariableStore) -> Option<ValueType> {
    match value {
        Value::Variable(name) if declared != ValueType::Variable => variables
            .get(name.as_str())
            .ok()
            .and_then(Value::value_type),
        other => other.value_type(),
    }
}

fn score_param(value: &Value, declared: ValueType, variables: &VariableStore) -> Option<u32> {
    match effective_type(value, declared, variables) {
        Some(ty) if ty == declared => Some(2),
        Some(ty) if declared.accepts(ty) => Some(1),
        Some(_) => None,
        None if declared.is_nullable() => Some(0),
        None => None,
    }
}

/// Score one overload, `None` if it cannot take `values`.
pub fn score_overload(
    descriptor: &CommandDescriptor,
    values: &[Value],
    variables: &VariableStore,
) -> Option<u32> {
    if descriptor.params.len() != values.len() {
        return None;
    }
    values
        .iter()
        .zip(descriptor.param_types())
        .map(|(value, declared)| score_param(value, declared, variables))
        .sum()
}

/// Pick the overload of `name` that best matches `values`.
pub fn resolve<'a>(
    name: &str,
    overloads: &'a [CommandDescriptor],
    values: &[Value],
    variables: &VariableStore,
) -> Result<&'a CommandDescriptor, ResolutionError> {
    let mut best = 0;
    let mut tied: Vec<&CommandDescriptor> = Vec::new();

    for overload in overloads {
        let Some(score) = score_overload(overload, values, variables) else {
            continue;
        };
        if tied.is_empty() || score > best {
            best = score;
            tied.clear();
            tied.push(overload);
        } else if score == best {
            tied.push(overload);
        }
    }

    match tied.len() {
        0 => Err(ResolutionError::NoMatch {
            command: name.to_string(),
        }),
        1 => Ok(tied[0]),
        _ => {
            tied.sort_by_cached_key(|o| (o.type_key(), o.signature()));
            Err(ResolutionError::Ambiguous {
                command: name.to_string(),
                candidates: tied.iter().map(|o| o.signature()).collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec3;

    use super::*;
    use crate::core::{ConCommand, VariableName};

    fn overload(id: usize, name: &str, params: &[ValueType]) -> CommandDescriptor {
        let cmd = params
            .iter()
            .enumerate()
            .fold(ConCommand::new(name.to_string(), |_, _| Ok(())), |cmd, (i, ty)| {
                cmd.param(format!("p{i}"), *ty)
            });
        cmd.split(id).unwrap().0
    }

    fn var(name: &str) -> Value {
        Value::Variable(VariableName::new(name))
    }

    #[test]
    fn test_gravity_overloads() {
        let overloads = [
            overload(0, "gravity", &[ValueType::Float, ValueType::Float, ValueType::Float]),
            overload(1, "gravity", &[ValueType::Vec3]),
        ];
        let vars = VariableStore::new();

        let floats = [Value::Float(1.0), Value::Float(2.0), Value::Float(3.0)];
        assert_eq!(resolve("gravity", &overloads, &floats, &vars).unwrap().id(), 0);

        let vector = [Value::Vec3(Vec3::new(1.0, 2.0, 3.0))];
        assert_eq!(resolve("gravity", &overloads, &vector, &vars).unwrap().id(), 1);

        let ints = [Value::Int(1), Value::Int(2), Value::Int(3)];
        assert_eq!(resolve("gravity", &overloads, &ints, &vars).unwrap().id(), 0);
    }

    #[test]
    fn test_identical_overloads_are_ambiguous() {
        let overloads = [
            overload(0, "dup", &[ValueType::Int]),
            overload(1, "dup", &[ValueType::Int]),
        ];
        let result = resolve("dup", &overloads, &[Value::Int(1)], &VariableStore::new());
        match result {
            Err(ResolutionError::Ambiguous { command, candidates }) => {
                assert_eq!(command, "dup");
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn test_higher_score_evicts_earlier_ties() {
        let overloads = [
            overload(0, "f", &[ValueType::Any]),
            overload(1, "f", &[ValueType::Any]),
            overload(2, "f", &[ValueType::Int]),
        ];
        let resolved = resolve("f", &overloads, &[Value::Int(3)], &VariableStore::new());
        assert_eq!(resolved.unwrap().id(), 2);
    }

    #[test]
    fn test_ambiguous_candidates_sorted_by_types() {
        let overloads = [
            overload(0, "f", &[ValueType::String]),
            overload(1, "f", &[ValueType::Object]),
        ];
        let result = resolve("f", &overloads, &[Value::Null], &VariableStore::new());
        let Err(ResolutionError::Ambiguous { candidates, .. }) = result else {
            panic!("expected ambiguity");
        };
        assert_eq!(candidates, vec!["f [p0: Entity]", "f [p0: string]"]);
    }

    #[test]
    fn test_no_match_names_command() {
        let overloads = [overload(0, "timescale", &[ValueType::Float])];
        let vars = VariableStore::new();

        let wrong_type = resolve("timescale", &overloads, &[Value::Bool(true)], &vars);
        assert_eq!(
            wrong_type.unwrap_err(),
            ResolutionError::NoMatch {
                command: "timescale".into()
            }
        );

        let wrong_arity = resolve("timescale", &overloads, &[], &vars);
        assert!(matches!(wrong_arity, Err(ResolutionError::NoMatch { .. })));
    }

    #[test]
    fn test_unbound_variable_scoring() {
        let vars = VariableStore::new();
        let reference = overload(0, "destroy", &[ValueType::Object]);
        let primitive = overload(1, "timescale", &[ValueType::Float]);

        assert_eq!(score_overload(&reference, &[var("target")], &vars), Some(0));
        assert_eq!(score_overload(&primitive, &[var("target")], &vars), None);
    }

    #[test]
    fn test_bound_variable_scores_as_stored_type() {
        let mut vars = VariableStore::new();
        vars.set(VariableName::new("speed"), Value::Float(2.0)).unwrap();
        let primitive = overload(0, "timescale", &[ValueType::Float]);
        let wants_variable = overload(1, "peek", &[ValueType::Variable]);

        assert_eq!(score_overload(&primitive, &[var("speed")], &vars), Some(2));
        assert_eq!(score_overload(&wants_variable, &[var("speed")], &vars), Some(2));
        assert_eq!(score_overload(&wants_variable, &[Value::Float(2.0)], &vars), None);
    }

    #[test]
    fn test_null_scoring() {
        let vars = VariableStore::new();
        let nullable = overload(0, "destroy", &[ValueType::Object]);
        let value_type = overload(1, "move", &[ValueType::Vec3]);

        assert_eq!(score_overload(&nullable, &[Value::Null], &vars), Some(0));
        assert_eq!(score_overload(&value_type, &[Value::Null], &vars), None);
    }

    #[test]
    fn test_widening_scores_one() {
        let vars = VariableStore::new();
        let float = overload(0, "f", &[ValueType::Float]);
        let int = overload(1, "f", &[ValueType::Int]);

        assert_eq!(score_overload(&float, &[Value::Int(1)], &vars), Some(1));
        assert_eq!(score_overload(&int, &[Value::Int(1)], &vars), Some(2));
        assert_eq!(
            resolve("f", &[float, int], &[Value::Int(1)], &vars).unwrap().id(),
            1
        );
    }
}
