//! Per-target-language type rendering.
//!
//! A [`LangTypeSpec`] is the small value object that knows how one target
//! language spells type names: a primitive map plus three container
//! formatters. Specs live in a process-wide registry, read-only after first
//! use; lookup and listing are the only operations.

use std::sync::OnceLock;

use crate::error::SchemaError;
use crate::expr::{Primitive, TypeExpr, TypeKind};
use crate::langs;

type MapFormat = fn(&str, &str) -> Result<String, SchemaError>;

/// The type-name rendering capability of one target language.
pub struct LangTypeSpec {
    pub name: &'static str,
    pub(crate) primitives: fn(Primitive) -> Option<&'static str>,
    pub(crate) format_list: fn(&str) -> String,
    pub(crate) format_set: fn(&str) -> String,
    pub(crate) format_map: MapFormat,
}

impl LangTypeSpec {
    /// The target-language name for a primitive, if supported.
    pub fn primitive(&self, p: Primitive) -> Option<&'static str> {
        (self.primitives)(p)
    }

    pub fn list_type(&self, elem: &str) -> String {
        (self.format_list)(elem)
    }

    pub fn set_type(&self, elem: &str) -> String {
        (self.format_set)(elem)
    }

    pub fn map_type(&self, key: &str, value: &str) -> Result<String, SchemaError> {
        (self.format_map)(key, value)
    }
}

/// Walk `expr` bottom-up and populate `lang_type` on every node.
///
/// Fails when the target does not support a leaf primitive or cannot express
/// a container shape (heterogeneous tuples).
pub fn render_schema_type(expr: &TypeExpr, spec: &LangTypeSpec) -> Result<TypeExpr, SchemaError> {
    let (kind, lang_type) = match &expr.kind {
        TypeKind::Primitive(p) => {
            let name = spec
                .primitive(*p)
                .ok_or(SchemaError::UnsupportedPrimitive {
                    language: spec.name,
                    primitive: *p,
                })?;
            (TypeKind::Primitive(*p), name.to_string())
        }
        TypeKind::List(elem) => {
            let elem = render_schema_type(elem, spec)?;
            let name = spec.list_type(elem.lang_type());
            (TypeKind::List(Box::new(elem)), name)
        }
        TypeKind::Set(elem) => {
            let elem = render_schema_type(elem, spec)?;
            let name = spec.set_type(elem.lang_type());
            (TypeKind::Set(Box::new(elem)), name)
        }
        TypeKind::Map { key, value } => {
            let key = render_schema_type(key, spec)?;
            let value = render_schema_type(value, spec)?;
            let name = spec.map_type(key.lang_type(), value.lang_type())?;
            (
                TypeKind::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                },
                name,
            )
        }
        TypeKind::Tuple(_) => {
            return Err(SchemaError::UnsupportedShape {
                language: spec.name,
                what: format!("the heterogeneous tuple {}", expr.to_generic()),
            })
        }
    };
    Ok(TypeExpr {
        kind,
        lang_type: Some(lang_type),
    })
}

fn registry() -> &'static Vec<LangTypeSpec> {
    static REGISTRY: OnceLock<Vec<LangTypeSpec>> = OnceLock::new();
    REGISTRY.get_or_init(langs::all_specs)
}

/// Look up the spec registered under `language`.
pub fn lookup_spec(language: &str) -> Option<&'static LangTypeSpec> {
    registry().iter().find(|s| s.name == language)
}

/// All registered language names, in registration order.
pub fn list_spec_languages() -> Vec<&'static str> {
    registry().iter().map(|s| s.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(lang: &str, generic: &str) -> String {
        let spec = lookup_spec(lang).unwrap();
        let expr = TypeExpr::parse(generic).unwrap();
        render_schema_type(&expr, spec)
            .unwrap()
            .lang_type()
            .to_string()
    }

    #[test]
    fn every_spec_supports_the_core_primitives() {
        for spec in registry() {
            for p in Primitive::ALL {
                if p == Primitive::Null {
                    continue;
                }
                assert!(
                    spec.primitive(p).is_some(),
                    "{} is missing {p}",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn renders_nested_types() {
        assert_eq!(rendered("C++", "list<list<integer>>"), "vector<vector<int>>");
        assert_eq!(
            rendered("Java", "map<string;list<double>>"),
            "Map<String, ArrayList<Double>>"
        );
        assert_eq!(rendered("Go", "map<string;integer>"), "map[string]int");
        assert_eq!(rendered("Rust", "set<long>"), "HashSet<i64>");
        assert_eq!(rendered("Python", "list<boolean>"), "List[bool]");
        assert_eq!(rendered("Julia", "list<double>"), "Vector{Float64}");
    }

    #[test]
    fn dynamic_targets_use_fixed_names() {
        assert_eq!(rendered("Javascript", "list<integer>"), "Array");
        assert_eq!(rendered("Lua", "map<string;integer>"), "table");
        assert_eq!(rendered("PHP", "set<string>"), "array");
    }

    #[test]
    fn render_sets_lang_type_on_every_node() {
        let spec = lookup_spec("C++").unwrap();
        let expr = TypeExpr::parse("map<string;list<integer>>").unwrap();
        let bound = render_schema_type(&expr, spec).unwrap();
        let TypeKind::Map { key, value } = &bound.kind else {
            panic!("expected map");
        };
        assert_eq!(key.lang_type(), "string");
        assert_eq!(value.lang_type(), "vector<int>");
        assert_eq!(bound.lang_type(), "map<string,vector<int>>");
    }

    #[test]
    fn r_rejects_integer_map_keys() {
        let spec = lookup_spec("R").unwrap();
        let expr = TypeExpr::parse("map<integer;string>").unwrap();
        assert!(render_schema_type(&expr, spec).is_err());
    }

    #[test]
    fn tuples_are_rejected_at_render() {
        let spec = lookup_spec("C++").unwrap();
        let expr = TypeExpr::parse("tuple<integer|string>").unwrap();
        assert!(matches!(
            render_schema_type(&expr, spec),
            Err(SchemaError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn registry_has_the_expected_languages() {
        let names = list_spec_languages();
        for lang in [
            "C++",
            "CSharp",
            "Dart",
            "Elixir",
            "Go",
            "Haskell",
            "Java",
            "Javascript",
            "Julia",
            "Kotlin",
            "Lua",
            "PHP",
            "Python",
            "R",
            "Rust",
            "Scala",
            "TypeScript",
        ] {
            assert!(names.contains(&lang), "missing {lang}");
        }
    }
}
