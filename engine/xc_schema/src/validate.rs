//! Validation and coercion of runtime (JSON) values against a [`TypeExpr`].
//!
//! Test-case values arrive as untyped JSON; this module is the single place
//! that coerces them into the declared shape. Downstream code (literal
//! translation, template rendering) operates on validated values only.

use serde_json::{Map, Number, Value};

use crate::error::SchemaError;
use crate::expr::{Primitive, TypeExpr, TypeKind};

/// Validate `value` against `ty`, returning the coerced value.
///
/// Coercions applied:
/// - integers promote to float/double,
/// - map keys are re-cast from string to integer when the declared key type
///   is integer (duplicate keys after the cast are an error),
/// - null is permitted only for `string`, `character`, and containers, and is
///   normalized to the empty value of that type.
pub fn validate_value(ty: &TypeExpr, value: &Value) -> Result<Value, SchemaError> {
    match &ty.kind {
        TypeKind::Primitive(p) => validate_primitive(*p, value),
        TypeKind::List(elem) => validate_sequence(elem, value, "list"),
        TypeKind::Set(elem) => validate_sequence(elem, value, "set"),
        TypeKind::Tuple(elems) => validate_tuple(elems, value),
        TypeKind::Map { key, value: val } => validate_map(key, val, value),
    }
}

fn validate_primitive(p: Primitive, value: &Value) -> Result<Value, SchemaError> {
    if value.is_null() {
        if p.allows_null() {
            // Normalize to the empty value so literal translation has one
            // code path per type.
            return Ok(Value::String(String::new()));
        }
        return Err(SchemaError::InvalidValue(format!(
            "{p} does not support null"
        )));
    }

    match p {
        Primitive::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            other => Err(type_mismatch("boolean", other)),
        },
        Primitive::Integer | Primitive::Long => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
            other => Err(type_mismatch(p.as_str(), other)),
        },
        Primitive::Float | Primitive::Double => match value {
            Value::Number(n) => {
                // Promote integer literals to a pure float value so literal
                // translation always sees a float.
                let as_float = n
                    .as_f64()
                    .ok_or_else(|| type_mismatch(p.as_str(), value))?;
                let number = Number::from_f64(as_float)
                    .ok_or_else(|| type_mismatch(p.as_str(), value))?;
                Ok(Value::Number(number))
            }
            other => Err(type_mismatch(p.as_str(), other)),
        },
        Primitive::String | Primitive::Character => match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(type_mismatch(p.as_str(), other)),
        },
        Primitive::Null => Err(SchemaError::InvalidValue(
            "cannot validate a value against the null type".to_string(),
        )),
    }
}

fn validate_sequence(elem: &TypeExpr, value: &Value, kind: &str) -> Result<Value, SchemaError> {
    let items = match value {
        // Sets are represented as JSON arrays; deduplication happens at
        // literal translation, not here.
        Value::Array(items) => items.as_slice(),
        Value::Null => &[],
        other => return Err(type_mismatch(kind, other)),
    };
    let validated = items
        .iter()
        .map(|v| validate_value(elem, v))
        .collect::<Result<Vec<_>, _>>()?;
    check_single_shape(kind, validated.iter())?;
    Ok(Value::Array(validated))
}

fn validate_tuple(elems: &[TypeExpr], value: &Value) -> Result<Value, SchemaError> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Null => &[],
        other => return Err(type_mismatch("tuple", other)),
    };
    if !items.is_empty() && items.len() != elems.len() {
        return Err(SchemaError::InvalidValue(format!(
            "tuple expects {} elements, got {}",
            elems.len(),
            items.len()
        )));
    }
    let validated = items
        .iter()
        .zip(elems)
        .map(|(v, t)| validate_value(t, v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(validated))
}

fn validate_map(
    key_ty: &TypeExpr,
    value_ty: &TypeExpr,
    value: &Value,
) -> Result<Value, SchemaError> {
    let entries = match value {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        other => return Err(type_mismatch("map", other)),
    };

    let cast_to_int = key_ty.as_primitive() == Some(Primitive::Integer);
    let mut out = Map::with_capacity(entries.len());
    for (key, val) in &entries {
        // JSON object keys are always strings; when the declared key type is
        // integer the key is re-cast and duplicates after the cast rejected.
        let new_key = if cast_to_int {
            let parsed: i64 = key.parse().map_err(|_| {
                SchemaError::InvalidValue(format!(
                    "map key \"{key}\" is declared integer but is not parseable as one"
                ))
            })?;
            parsed.to_string()
        } else {
            key.clone()
        };
        if out.contains_key(&new_key) {
            return Err(SchemaError::InvalidValue(format!(
                "duplicate map key {new_key} after key cast"
            )));
        }
        out.insert(new_key, validate_value(value_ty, val)?);
    }
    check_single_shape("map", out.values())?;
    Ok(Value::Object(out))
}

/// All elements of a container must share one concrete shape after coercion;
/// mixed element types cannot be expressed in most statically typed targets.
fn check_single_shape<'a>(
    kind: &str,
    values: impl Iterator<Item = &'a Value>,
) -> Result<(), SchemaError> {
    let mut seen: Option<&'static str> = None;
    for v in values {
        let shape = value_shape(v);
        match seen {
            None => seen = Some(shape),
            Some(s) if s == shape => {}
            Some(s) => {
                return Err(SchemaError::InvalidValue(format!(
                    "{kind} mixes element types ({s} and {shape})"
                )))
            }
        }
    }
    Ok(())
}

fn value_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(expected: &str, got: &Value) -> SchemaError {
    SchemaError::InvalidValue(format!(
        "expected {expected}, got {}",
        value_shape(got)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ty(s: &str) -> TypeExpr {
        TypeExpr::parse(s).unwrap()
    }

    #[test]
    fn integer_passes_through() {
        assert_eq!(validate_value(&ty("integer"), &json!(5)).unwrap(), json!(5));
    }

    #[test]
    fn integer_rejects_float() {
        assert!(validate_value(&ty("integer"), &json!(5.5)).is_err());
    }

    #[test]
    fn float_promotes_integers() {
        let out = validate_value(&ty("float"), &json!(3)).unwrap();
        assert_eq!(out, json!(3.0));
        assert!(out.as_f64().is_some());
    }

    #[test]
    fn null_rejected_for_numbers() {
        assert!(validate_value(&ty("integer"), &Value::Null).is_err());
        assert!(validate_value(&ty("double"), &Value::Null).is_err());
        assert!(validate_value(&ty("boolean"), &Value::Null).is_err());
    }

    #[test]
    fn null_normalizes_for_string_and_containers() {
        assert_eq!(
            validate_value(&ty("string"), &Value::Null).unwrap(),
            json!("")
        );
        assert_eq!(
            validate_value(&ty("list<integer>"), &Value::Null).unwrap(),
            json!([])
        );
        assert_eq!(
            validate_value(&ty("map<string;integer>"), &Value::Null).unwrap(),
            json!({})
        );
    }

    #[test]
    fn list_elements_validated_recursively() {
        assert_eq!(
            validate_value(&ty("list<float>"), &json!([1, 2.5])).unwrap(),
            json!([1.0, 2.5])
        );
    }

    #[test]
    fn list_rejects_mixed_shapes() {
        assert!(validate_value(&ty("list<string>"), &json!(["a", 1])).is_err());
    }

    #[test]
    fn map_keys_recast_to_integer() {
        let out = validate_value(&ty("map<integer;string>"), &json!({"1": "a", "2": "b"})).unwrap();
        assert_eq!(out, json!({"1": "a", "2": "b"}));
        assert!(validate_value(&ty("map<integer;string>"), &json!({"x": "a"})).is_err());
    }

    #[test]
    fn map_duplicate_keys_after_cast_rejected() {
        assert!(validate_value(&ty("map<integer;string>"), &json!({"1": "a", "01": "b"})).is_err());
    }

    #[test]
    fn tuple_length_checked() {
        let t = ty("tuple<integer|string>");
        assert_eq!(
            validate_value(&t, &json!([1, "a"])).unwrap(),
            json!([1, "a"])
        );
        assert!(validate_value(&t, &json!([1, "a", 2])).is_err());
    }
}
