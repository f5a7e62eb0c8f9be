//! The [`TypeExpr`] tree and its structural operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A leaf type in the generic algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Character,
    String,
    /// Inferred for values whose type could not be determined (e.g. elements
    /// of an empty list). Compares generically equal to every leaf.
    Null,
}

impl Primitive {
    /// All leaf names accepted by the parser.
    pub const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Integer,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Character,
        Primitive::String,
        Primitive::Null,
    ];

    /// The generic-string spelling of this leaf.
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Integer => "integer",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Character => "character",
            Primitive::String => "string",
            Primitive::Null => "null",
        }
    }

    /// Parse a leaf name.
    pub fn from_name(name: &str) -> Option<Primitive> {
        Primitive::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Whether a null runtime value is acceptable for this leaf.
    ///
    /// Numeric and boolean leaves cannot be null in several statically typed
    /// targets, so null is rejected for them up front rather than per
    /// language.
    pub fn allows_null(self) -> bool {
        matches!(
            self,
            Primitive::String | Primitive::Character | Primitive::Null
        )
    }

    /// Whether this leaf may be used as a map key.
    pub fn valid_map_key(self) -> bool {
        matches!(
            self,
            Primitive::String | Primitive::Integer | Primitive::Character | Primitive::Boolean
        )
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constructor at one node of a [`TypeExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Primitive(Primitive),
    List(Box<TypeExpr>),
    Set(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// Heterogeneous tuple. A tuple whose elements are all identical is
    /// collapsed to `List` at parse time, so a `Tuple` node always has at
    /// least two distinct element types.
    Tuple(Vec<TypeExpr>),
}

/// A node in the parsed type tree.
///
/// `lang_type` is the rendered target-language type name. It starts unset and
/// is populated for every node by [`crate::render_schema_type`]; code that
/// reads it after binding may rely on it being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub lang_type: Option<String>,
}

impl TypeExpr {
    pub fn primitive(p: Primitive) -> TypeExpr {
        TypeExpr {
            kind: TypeKind::Primitive(p),
            lang_type: None,
        }
    }

    pub fn list(elem: TypeExpr) -> TypeExpr {
        TypeExpr {
            kind: TypeKind::List(Box::new(elem)),
            lang_type: None,
        }
    }

    pub fn set(elem: TypeExpr) -> TypeExpr {
        TypeExpr {
            kind: TypeKind::Set(Box::new(elem)),
            lang_type: None,
        }
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> TypeExpr {
        TypeExpr {
            kind: TypeKind::Map {
                key: Box::new(key),
                value: Box::new(value),
            },
            lang_type: None,
        }
    }

    pub fn tuple(elems: Vec<TypeExpr>) -> TypeExpr {
        TypeExpr {
            kind: TypeKind::Tuple(elems),
            lang_type: None,
        }
    }

    /// True for primitive nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    /// The leaf primitive, if this node is one.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self.kind {
            TypeKind::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// The rendered target-language type name.
    ///
    /// Only meaningful after [`crate::render_schema_type`]; returns an empty
    /// string when unbound so template code never panics.
    pub fn lang_type(&self) -> &str {
        self.lang_type.as_deref().unwrap_or_default()
    }

    /// Maximum nesting depth; leaves are depth 0.
    pub fn depth(&self) -> usize {
        match &self.kind {
            TypeKind::Primitive(_) => 0,
            TypeKind::List(elem) | TypeKind::Set(elem) => elem.depth() + 1,
            TypeKind::Map { key, value } => key.depth().max(value.depth()) + 1,
            TypeKind::Tuple(elems) => elems.iter().map(TypeExpr::depth).max().unwrap_or(0) + 1,
        }
    }

    /// Whether any node in the tree has its `lang_type` set.
    pub fn has_lang_type(&self) -> bool {
        if self.lang_type.is_some() {
            return true;
        }
        match &self.kind {
            TypeKind::Primitive(_) => false,
            TypeKind::List(elem) | TypeKind::Set(elem) => elem.has_lang_type(),
            TypeKind::Map { key, value } => key.has_lang_type() || value.has_lang_type(),
            TypeKind::Tuple(elems) => elems.iter().any(TypeExpr::has_lang_type),
        }
    }

    /// Render the generic string form. Round-trips with [`TypeExpr::parse`].
    pub fn to_generic(&self) -> String {
        match &self.kind {
            TypeKind::Primitive(p) => p.as_str().to_string(),
            TypeKind::List(elem) => format!("list<{}>", elem.to_generic()),
            TypeKind::Set(elem) => format!("set<{}>", elem.to_generic()),
            TypeKind::Map { key, value } => {
                format!("map<{};{}>", key.to_generic(), value.to_generic())
            }
            TypeKind::Tuple(elems) => {
                let inner: Vec<String> = elems.iter().map(TypeExpr::to_generic).collect();
                format!("tuple<{}>", inner.join("|"))
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_generic())
    }
}

/// Structural equality ignoring `lang_type`, with the single exception that a
/// `null` leaf compares equal to any leaf.
///
/// The null rule is what lets an empty-container inference (`list<null>`)
/// match a concrete declaration (`list<integer>`).
pub fn generic_equal(left: &TypeExpr, right: &TypeExpr) -> bool {
    match (&left.kind, &right.kind) {
        (TypeKind::Primitive(a), TypeKind::Primitive(b)) => {
            *a == Primitive::Null || *b == Primitive::Null || a == b
        }
        // A null leaf also absorbs a container on the other side; this keeps
        // `[[]]` inferences (list<null>) compatible with list<list<T>>.
        (TypeKind::Primitive(Primitive::Null), _) | (_, TypeKind::Primitive(Primitive::Null)) => {
            true
        }
        (TypeKind::List(a), TypeKind::List(b)) | (TypeKind::Set(a), TypeKind::Set(b)) => {
            generic_equal(a, b)
        }
        (
            TypeKind::Map { key: ka, value: va },
            TypeKind::Map { key: kb, value: vb },
        ) => generic_equal(ka, kb) && generic_equal(va, vb),
        (TypeKind::Tuple(a), TypeKind::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| generic_equal(x, y))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_round_trip_spelling() {
        let t = TypeExpr::map(
            TypeExpr::primitive(Primitive::String),
            TypeExpr::list(TypeExpr::primitive(Primitive::Double)),
        );
        assert_eq!(t.to_generic(), "map<string;list<double>>");
    }

    #[test]
    fn depth_counts_nesting() {
        let t = TypeExpr::list(TypeExpr::list(TypeExpr::primitive(Primitive::Integer)));
        assert_eq!(t.depth(), 2);
        assert_eq!(TypeExpr::primitive(Primitive::Integer).depth(), 0);
    }

    #[test]
    fn generic_equal_is_reflexive() {
        let t = TypeExpr::tuple(vec![
            TypeExpr::primitive(Primitive::Integer),
            TypeExpr::primitive(Primitive::String),
        ]);
        assert!(generic_equal(&t, &t));
    }

    #[test]
    fn null_leaf_matches_any_leaf() {
        let null = TypeExpr::primitive(Primitive::Null);
        for p in Primitive::ALL {
            assert!(generic_equal(&null, &TypeExpr::primitive(p)));
            assert!(generic_equal(&TypeExpr::primitive(p), &null));
        }
    }

    #[test]
    fn null_leaf_matches_container() {
        let null = TypeExpr::primitive(Primitive::Null);
        let list = TypeExpr::list(TypeExpr::primitive(Primitive::Integer));
        assert!(generic_equal(&null, &list));
    }

    #[test]
    fn generic_equal_ignores_lang_type() {
        let mut a = TypeExpr::primitive(Primitive::Integer);
        let b = TypeExpr::primitive(Primitive::Integer);
        a.lang_type = Some("int".to_string());
        assert!(generic_equal(&a, &b));
    }

    #[test]
    fn mismatched_containers_are_not_equal() {
        let list = TypeExpr::list(TypeExpr::primitive(Primitive::Integer));
        let set = TypeExpr::set(TypeExpr::primitive(Primitive::Integer));
        assert!(!generic_equal(&list, &set));
    }
}
