//! Reconciliation of independently inferred types.
//!
//! When the same parameter is inferred from several test cases the
//! inferences can disagree in a benign way (`integer` in one case, `float`
//! in another). Reconciliation widens leaves point-wise over aligned
//! subtrees and fails when the structures diverge.

use crate::expr::{Primitive, TypeExpr, TypeKind};

/// Reconcile two types, returning the widened type or `None` when they are
/// unreconcilable.
///
/// Leaf widening:
///
/// | widens to | candidates              |
/// |-----------|-------------------------|
/// | `double`  | `float, integer, long`  |
/// | `float`   | `integer`               |
/// | `long`    | `integer`               |
/// | `string`  | `character`             |
///
/// The operation is commutative and associative over a chain of widening
/// candidates. Inputs must not carry language bindings.
pub fn reconcile(left: &TypeExpr, right: &TypeExpr) -> Option<TypeExpr> {
    debug_assert!(
        !left.has_lang_type() && !right.has_lang_type(),
        "reconcile operates on unbound types"
    );

    match (&left.kind, &right.kind) {
        (TypeKind::Primitive(a), TypeKind::Primitive(b)) => {
            widen(*a, *b).map(TypeExpr::primitive)
        }
        (TypeKind::List(a), TypeKind::List(b)) => reconcile(a, b).map(TypeExpr::list),
        (TypeKind::Set(a), TypeKind::Set(b)) => reconcile(a, b).map(TypeExpr::set),
        (
            TypeKind::Map { key: ka, value: va },
            TypeKind::Map { key: kb, value: vb },
        ) => {
            // Keys are not widened: an integer key and a long key address
            // different target-language map types.
            if ka.kind != kb.kind {
                return None;
            }
            reconcile(va, vb).map(|v| TypeExpr::map((**ka).clone(), v))
        }
        (TypeKind::Tuple(a), TypeKind::Tuple(b)) => {
            if a.len() != b.len() {
                return None;
            }
            let elems = a
                .iter()
                .zip(b)
                .map(|(x, y)| reconcile(x, y))
                .collect::<Option<Vec<_>>>()?;
            Some(TypeExpr::tuple(elems))
        }
        _ => None,
    }
}

fn widen(a: Primitive, b: Primitive) -> Option<Primitive> {
    if a == b {
        return Some(a);
    }
    if widens_to(a, b) {
        Some(b)
    } else if widens_to(b, a) {
        Some(a)
    } else {
        None
    }
}

fn widens_to(from: Primitive, to: Primitive) -> bool {
    use Primitive::{Character, Double, Float, Integer, Long, String};
    matches!(
        (from, to),
        (Float | Integer | Long, Double)
            | (Integer, Float)
            | (Integer, Long)
            | (Character, String)
    )
}
