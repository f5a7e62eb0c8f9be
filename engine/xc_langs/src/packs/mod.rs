//! One module per supported target language.

mod cpp;
mod csharp;
mod elixir;
mod go;
mod haskell;
mod java;
mod javascript;
mod julia;
mod kotlin;
mod lua;
mod php;
mod python;
mod r;
mod rust;
mod scala;
mod typescript;

use crate::pack::LanguagePack;
use xc_schema::{TypeExpr, TypeKind};

pub(crate) fn all_packs() -> Vec<LanguagePack> {
    vec![
        cpp::pack(),
        csharp::pack(),
        elixir::pack(),
        go::pack(),
        haskell::pack(),
        java::pack(),
        javascript::pack(),
        julia::pack(),
        kotlin::pack(),
        lua::pack(),
        php::pack(),
        python::pack(),
        r::pack(),
        rust::pack(),
        scala::pack(),
        typescript::pack(),
    ]
}

/// The rendered element type of a list/set node; empty for leaves.
pub(crate) fn element_lang_type(ty: &TypeExpr) -> &str {
    match &ty.kind {
        TypeKind::List(elem) | TypeKind::Set(elem) => elem.lang_type(),
        _ => "",
    }
}
