//! Property tests for the type algebra.

use proptest::prelude::*;
use xc_schema::{generic_equal, reconcile, Primitive, TypeExpr};

fn arb_leaf() -> impl Strategy<Value = TypeExpr> {
    prop_oneof![
        Just(TypeExpr::primitive(Primitive::Boolean)),
        Just(TypeExpr::primitive(Primitive::Integer)),
        Just(TypeExpr::primitive(Primitive::Long)),
        Just(TypeExpr::primitive(Primitive::Float)),
        Just(TypeExpr::primitive(Primitive::Double)),
        Just(TypeExpr::primitive(Primitive::Character)),
        Just(TypeExpr::primitive(Primitive::String)),
    ]
}

fn arb_key() -> impl Strategy<Value = TypeExpr> {
    prop_oneof![
        Just(TypeExpr::primitive(Primitive::String)),
        Just(TypeExpr::primitive(Primitive::Integer)),
        Just(TypeExpr::primitive(Primitive::Character)),
        Just(TypeExpr::primitive(Primitive::Boolean)),
    ]
}

/// Trees over list/set/map; tuples are excluded because homogeneous tuples
/// normalize to lists at parse time and would fail a naive round-trip.
fn arb_type() -> impl Strategy<Value = TypeExpr> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeExpr::list),
            inner.clone().prop_map(TypeExpr::set),
            (arb_key(), inner).prop_map(|(k, v)| TypeExpr::map(k, v)),
        ]
    })
}

proptest! {
    #[test]
    fn generic_string_round_trips(ty in arb_type()) {
        let parsed = TypeExpr::parse(&ty.to_generic()).unwrap();
        prop_assert_eq!(&parsed, &ty);
    }

    #[test]
    fn generic_equal_is_reflexive(ty in arb_type()) {
        prop_assert!(generic_equal(&ty, &ty));
    }

    #[test]
    fn reconcile_with_self_is_identity(ty in arb_type()) {
        prop_assert_eq!(reconcile(&ty, &ty), Some(ty));
    }

    #[test]
    fn reconcile_is_commutative(a in arb_type(), b in arb_type()) {
        prop_assert_eq!(reconcile(&a, &b), reconcile(&b, &a));
    }

    #[test]
    fn null_leaf_equals_everything(ty in arb_type()) {
        let null = TypeExpr::primitive(Primitive::Null);
        prop_assert!(generic_equal(&null, &ty));
        prop_assert!(generic_equal(&ty, &null));
    }
}
