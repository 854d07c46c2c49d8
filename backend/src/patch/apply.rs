//! Applying patch operations to a planet.
//!
//! Operations run in order against a JSON working copy of the planet. The
//! stored planet is only replaced once every operation succeeded and the
//! working copy still validates as a planet, so a failing patch never
//! leaves a half-applied result behind.

use serde_json::{Map, Value};

use super::error::{OperationError, PatchError};
use super::operation::PatchOperation;
use super::pointer::{resolve, JsonPointer, ResolvedPath, Step};
use crate::models::Planet;
use crate::validation::planet_from_value;

/// Apply `ops` to a copy of `planet` and return the result.
///
/// `planet` itself is never touched; callers commit the copy once it is
/// returned.
pub fn patched_copy(planet: &Planet, ops: &[PatchOperation]) -> Result<Planet, PatchError> {
    let mut doc = serde_json::to_value(planet)
        .map_err(|e| PatchError::InvalidDocument(format!("cannot encode planet: {}", e)))?;

    for (index, op) in ops.iter().enumerate() {
        apply_operation(&mut doc, op).map_err(|source| PatchError::OperationFailed {
            index,
            op: op.name(),
            source,
        })?;
    }

    planet_from_value(&doc).map_err(PatchError::InvalidResult)
}

fn apply_operation(doc: &mut Value, op: &PatchOperation) -> Result<(), OperationError> {
    match op {
        PatchOperation::Add { path, value } => {
            let target = target(path)?;
            add(doc, &target, path, value.clone())
        }
        PatchOperation::Remove { path } => {
            let target = target(path)?;
            remove(doc, &target, path).map(drop)
        }
        PatchOperation::Replace { path, value } => {
            let target = target(path)?;
            check_type(&target, path, value)?;
            let slot = get_mut(doc, &target.steps, path)?;
            *slot = value.clone();
            Ok(())
        }
        PatchOperation::Move { from, path } => {
            let source = target(from)?;
            let dest = target(path)?;
            if source == dest {
                // Still has to exist.
                get_mut(doc, &source.steps, from)?;
                return Ok(());
            }
            if dest.is_inside(&source) {
                return Err(OperationError::MoveIntoChild {
                    from: from.clone(),
                    path: path.clone(),
                });
            }
            let value = remove(doc, &source, from)?;
            add(doc, &dest, path, value)
        }
        PatchOperation::Copy { from, path } => {
            let source = target(from)?;
            let dest = target(path)?;
            let value = get_mut(doc, &source.steps, from)?.clone();
            add(doc, &dest, path, value)
        }
        PatchOperation::Test { path, value } => {
            let target = target(path)?;
            let actual = get_mut(doc, &target.steps, path)?;
            if json_equal(actual, value) {
                Ok(())
            } else {
                Err(OperationError::TestFailed {
                    path: path.clone(),
                    expected: value.clone(),
                    actual: actual.clone(),
                })
            }
        }
    }
}

/// Parse and resolve a pointer that must not address the root.
fn target(raw: &str) -> Result<ResolvedPath, OperationError> {
    let pointer = JsonPointer::parse(raw)?;
    if pointer.is_root() {
        return Err(OperationError::RootTarget);
    }
    resolve(&pointer)
}

fn add(
    doc: &mut Value,
    target: &ResolvedPath,
    path: &str,
    value: Value,
) -> Result<(), OperationError> {
    check_type(target, path, &value)?;
    let (last, parents) = split_last(&target.steps)?;
    let parent = get_mut(doc, parents, path)?;
    match last {
        Step::Field(name) => {
            let obj = as_object(parent, path)?;
            set_field(obj, name, value);
            Ok(())
        }
        Step::Index(index) => {
            let items = as_array(parent, path)?;
            if index > items.len() {
                return Err(OperationError::IndexOutOfBounds {
                    path: path.to_string(),
                    index,
                    len: items.len(),
                });
            }
            items.insert(index, value);
            Ok(())
        }
        Step::Append => {
            as_array(parent, path)?.push(value);
            Ok(())
        }
    }
}

/// Reject a value whose JSON type cannot live at `target`.
fn check_type(target: &ResolvedPath, path: &str, value: &Value) -> Result<(), OperationError> {
    if target.shape.accepts(value) {
        Ok(())
    } else {
        Err(OperationError::TypeMismatch {
            path: path.to_string(),
            expected: target.shape.expected(),
        })
    }
}

fn remove(doc: &mut Value, target: &ResolvedPath, path: &str) -> Result<Value, OperationError> {
    let (last, parents) = split_last(&target.steps)?;
    let parent = get_mut(doc, parents, path)?;
    match last {
        Step::Field(_) => Err(OperationError::RequiredField {
            path: path.to_string(),
        }),
        Step::Index(index) => {
            let items = as_array(parent, path)?;
            if index >= items.len() {
                return Err(OperationError::IndexOutOfBounds {
                    path: path.to_string(),
                    index,
                    len: items.len(),
                });
            }
            Ok(items.remove(index))
        }
        Step::Append => Err(OperationError::PathNotFound {
            path: path.to_string(),
        }),
    }
}

fn split_last(steps: &[Step]) -> Result<(Step, &[Step]), OperationError> {
    steps
        .split_last()
        .map(|(last, rest)| (*last, rest))
        .ok_or(OperationError::RootTarget)
}

/// Walk `steps` down from `doc`, failing if anything along the way is absent.
fn get_mut<'a>(
    doc: &'a mut Value,
    steps: &[Step],
    path: &str,
) -> Result<&'a mut Value, OperationError> {
    let not_found = || OperationError::PathNotFound {
        path: path.to_string(),
    };
    let mut current = doc;
    for step in steps {
        current = match *step {
            Step::Field(name) => {
                let obj = current.as_object_mut().ok_or_else(not_found)?;
                let key = field_key(obj, name).ok_or_else(not_found)?;
                obj.get_mut(&key).ok_or_else(not_found)?
            }
            Step::Index(index) => {
                let items = current.as_array_mut().ok_or_else(not_found)?;
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or(OperationError::IndexOutOfBounds {
                        path: path.to_string(),
                        index,
                        len,
                    })?
            }
            Step::Append => return Err(not_found()),
        };
    }
    Ok(current)
}

fn as_object<'a>(
    value: &'a mut Value,
    path: &str,
) -> Result<&'a mut Map<String, Value>, OperationError> {
    value.as_object_mut().ok_or_else(|| OperationError::PathNotFound {
        path: path.to_string(),
    })
}

fn as_array<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Vec<Value>, OperationError> {
    value.as_array_mut().ok_or_else(|| OperationError::PathNotFound {
        path: path.to_string(),
    })
}

/// Key actually used in `obj` for the canonical field `name`.
///
/// Values added by a patch may carry keys in any case (`"Name"`), so lookups
/// fold case the same way body validation does.
fn field_key(obj: &Map<String, Value>, name: &str) -> Option<String> {
    if obj.contains_key(name) {
        return Some(name.to_string());
    }
    obj.keys().find(|k| k.eq_ignore_ascii_case(name)).cloned()
}

/// Set a field under its canonical name, dropping differently-cased duplicates.
fn set_field(obj: &mut Map<String, Value>, name: &str, value: Value) {
    obj.retain(|k, _| !k.eq_ignore_ascii_case(name));
    obj.insert(name.to_string(), value);
}

/// Structural equality where numbers compare by value, so `15` equals `15.0`.
/// Object keys are compared case-insensitively, like everywhere else.
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(k, x)| {
                    field_key(ys, k)
                        .and_then(|key| ys.get(&key))
                        .is_some_and(|y| json_equal(x, y))
                })
        }
        _ => a == b,
    }
}
