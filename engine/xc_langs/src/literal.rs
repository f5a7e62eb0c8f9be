//! Literal translation: validated runtime values to target-language source.

use rustc_hash::FxHashSet;
use serde_json::Value;

use serde::Serialize;
use xc_data::TestCase;
use xc_schema::{validate_value, BoundSchema, Primitive, SchemaError, TypeExpr, TypeKind};

use crate::pack::{EscapeFn, LanguagePack};
use crate::text::escape_string_chars;

/// One test case rendered to literals, in template-ready form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseLiterals {
    pub idx: String,
    pub inputs: Vec<String>,
    pub outputs: String,
}

/// Render every input (in declared parameter order) and the expected output
/// of a test case as literals.
pub fn test_case_literals(
    pack: &LanguagePack,
    tc: &TestCase,
    schema: &BoundSchema,
) -> Result<TestCaseLiterals, SchemaError> {
    let mut inputs = Vec::with_capacity(schema.params.len());
    for (name, ty) in &schema.params {
        let raw = tc.inputs.get(name).unwrap_or(&Value::Null);
        let validated = validate_value(ty, raw)
            .map_err(|e| SchemaError::InvalidValue(format!("input `{name}`: {e}")))?;
        inputs.push(value_literal(pack, ty, &validated)?);
    }
    let expected = validate_value(&schema.return_type, &tc.outputs)
        .map_err(|e| SchemaError::InvalidValue(format!("expected output: {e}")))?;
    let outputs = value_literal(pack, &schema.return_type, &expected)?;
    Ok(TestCaseLiterals {
        idx: tc.idx.clone(),
        inputs,
        outputs,
    })
}

/// Render one validated value as a literal of type `ty`.
pub fn value_literal(
    pack: &LanguagePack,
    ty: &TypeExpr,
    value: &Value,
) -> Result<String, SchemaError> {
    match &ty.kind {
        TypeKind::Primitive(p) => Ok(primitive_literal(pack, *p, value)),
        TypeKind::List(elem) => {
            let items = as_array(value)?;
            let rendered = items
                .iter()
                .map(|v| value_literal(pack, elem, v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((pack.format_list)(ty, &rendered))
        }
        TypeKind::Set(elem) => {
            // Sets arrive as JSON arrays; deduplicate before rendering.
            // Iteration order of the generated set is not guaranteed, the
            // drivers compare set-wise.
            let items = dedupe(as_array(value)?);
            let rendered = items
                .iter()
                .map(|v| value_literal(pack, elem, v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((pack.format_set)(ty, &rendered))
        }
        TypeKind::Map { key, value: val_ty } => {
            let Value::Object(entries) = value else {
                return Err(SchemaError::InvalidValue(format!(
                    "expected a map value for {}",
                    ty.to_generic()
                )));
            };
            let mut rendered = Vec::with_capacity(entries.len());
            for (k, v) in entries {
                let key_text = map_key_literal(pack, key, k)?;
                let value_text = value_literal(pack, val_ty, v)?;
                rendered.push((pack.format_map_entry)(&key_text, &value_text));
            }
            Ok((pack.format_map)(key, val_ty, &rendered))
        }
        TypeKind::Tuple(_) => Err(SchemaError::UnsupportedShape {
            language: pack.name,
            what: format!("literals of tuple type {}", ty.to_generic()),
        }),
    }
}

/// Map keys live as JSON strings; re-type them per the declared key type
/// before rendering.
fn map_key_literal(
    pack: &LanguagePack,
    key_ty: &TypeExpr,
    key: &str,
) -> Result<String, SchemaError> {
    let Some(prim) = key_ty.as_primitive() else {
        return Err(SchemaError::InvalidValue(
            "map keys must be primitives".to_string(),
        ));
    };
    let typed = match prim {
        Primitive::Integer => Value::from(key.parse::<i64>().map_err(|_| {
            SchemaError::InvalidValue(format!("map key \"{key}\" is not an integer"))
        })?),
        Primitive::Boolean => Value::from(key == "true"),
        _ => Value::from(key),
    };
    Ok(primitive_literal(pack, prim, &typed))
}

/// Render one primitive value, honoring the pack's override table.
pub(crate) fn primitive_literal(pack: &LanguagePack, p: Primitive, value: &Value) -> String {
    if let Some(f) = pack.primitive_override(p) {
        return f(value, pack.escape_fn());
    }
    default_primitive(p, value, pack.escape_fn())
}

fn default_primitive(p: Primitive, value: &Value, escape: Option<EscapeFn>) -> String {
    match p {
        Primitive::Boolean => {
            if value.as_bool().unwrap_or_default() {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        Primitive::Integer | Primitive::Long => integer_text(value),
        Primitive::Float | Primitive::Double => float_text(value, ""),
        Primitive::String | Primitive::Null => string_literal(value, '"', escape),
        Primitive::Character => string_literal(value, '\'', escape),
    }
}

pub(crate) fn integer_text(value: &Value) -> String {
    value
        .as_i64()
        .map(|n| n.to_string())
        .or_else(|| value.as_u64().map(|n| n.to_string()))
        .unwrap_or_default()
}

/// Float source text with an explicit decimal point, plus an optional
/// language suffix (`f`, `F`, `L`, `m`).
pub(crate) fn float_text(value: &Value, suffix: &str) -> String {
    let v = value.as_f64().unwrap_or_default();
    if v.fract() == 0.0 && v.is_finite() {
        format!("{v:.1}{suffix}")
    } else {
        format!("{v}{suffix}")
    }
}

/// Quote a string value, applying generic escaping then the pack escape.
pub(crate) fn string_literal(value: &Value, wrap: char, escape: Option<EscapeFn>) -> String {
    let raw = value.as_str().unwrap_or_default();
    let mut escaped = escape_string_chars(raw, wrap);
    if let Some(f) = escape {
        escaped = f(&escaped);
    }
    format!("{wrap}{escaped}{wrap}")
}

fn as_array(value: &Value) -> Result<&Vec<Value>, SchemaError> {
    value
        .as_array()
        .ok_or_else(|| SchemaError::InvalidValue("expected an array value".to_string()))
}

fn dedupe(items: &[Value]) -> Vec<&Value> {
    let mut seen = FxHashSet::default();
    items
        .iter()
        .filter(|v| seen.insert(v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lookup_pack;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use xc_schema::lookup_spec;

    fn literal(lang: &str, generic: &str, value: Value) -> String {
        let pack = lookup_pack(lang).unwrap();
        let spec = lookup_spec(lang).unwrap();
        let ty = xc_schema::TypeExpr::parse(generic).unwrap();
        let bound = xc_schema::render_schema_type(&ty, spec).unwrap();
        let validated = validate_value(&bound, &value).unwrap();
        value_literal(pack, &bound, &validated).unwrap()
    }

    #[test]
    fn python_defaults() {
        assert_eq!(literal("Python", "integer", json!(5)), "5");
        assert_eq!(literal("Python", "boolean", json!(true)), "True");
        assert_eq!(literal("Python", "double", json!(2)), "2.0");
        assert_eq!(literal("Python", "string", json!("hi")), "\"hi\"");
        assert_eq!(
            literal("Python", "list<integer>", json!([1, 2])),
            "[1, 2]"
        );
    }

    #[test]
    fn cpp_containers() {
        assert_eq!(
            literal("C++", "list<integer>", json!([1, 2, 3])),
            "{1, 2, 3}"
        );
        assert_eq!(
            literal("C++", "map<string;integer>", json!({"a": 1})),
            "{{\"a\", 1}}"
        );
    }

    #[test]
    fn java_suffixes() {
        assert_eq!(literal("Java", "long", json!(3)), "3L");
        assert_eq!(literal("Java", "float", json!(1.5)), "1.5f");
        assert_eq!(literal("Java", "float", json!(2)), "2.0f");
        assert_eq!(
            literal("Java", "list<integer>", json!([1])),
            "new ArrayList<>(Arrays.asList(1))"
        );
    }

    #[test]
    fn go_typed_literals() {
        assert_eq!(
            literal("Go", "list<integer>", json!([1, 2])),
            "[]int{1, 2}"
        );
        assert_eq!(
            literal("Go", "map<string;integer>", json!({"a": 1})),
            "map[string]int{\"a\": 1}"
        );
        assert_eq!(literal("Go", "set<integer>", json!([2, 1])), "map[int]bool{2: true, 1: true}");
    }

    #[test]
    fn rust_strings_get_to_string() {
        assert_eq!(literal("Rust", "string", json!("x")), "\"x\".to_string()");
        assert_eq!(
            literal("Rust", "list<string>", json!(["a"])),
            "Vec::from([\"a\".to_string()])"
        );
    }

    #[test]
    fn r_booleans_and_integers() {
        assert_eq!(literal("R", "boolean", json!(true)), "TRUE");
        assert_eq!(literal("R", "integer", json!(4)), "4L");
    }

    #[test]
    fn sets_deduplicate() {
        assert_eq!(
            literal("Python", "set<integer>", json!([2, 1, 2])),
            "set([2, 1])"
        );
    }

    #[test]
    fn empty_containers_use_explicit_forms() {
        assert_eq!(
            literal("Julia", "list<integer>", json!([])),
            "Vector{Int64}(undef,0)"
        );
        assert_eq!(
            literal("Julia", "map<string;integer>", json!({})),
            "Dict{String,Int64}()"
        );
        assert_eq!(
            literal("CSharp", "list<integer>", json!([])),
            "new List<int>{}"
        );
    }

    #[test]
    fn integer_map_keys_render_unquoted() {
        assert_eq!(
            literal("Python", "map<integer;string>", json!({"1": "a"})),
            "{1: \"a\"}"
        );
    }

    #[test]
    fn julia_dollar_is_escaped() {
        assert_eq!(literal("Julia", "string", json!("a$b")), "\"a\\$b\"");
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(literal("Python", "string", json!("a\nb")), "\"a\\nb\"");
    }
}
