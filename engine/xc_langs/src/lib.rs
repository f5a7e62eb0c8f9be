//! Language Packs: everything Crosscheck knows about one target language.
//!
//! A [`LanguagePack`] bundles literal translation (how a validated runtime
//! value is spelled as source text), signature and docstring rendering, the
//! word-replacement map used when translating prompts, the compile/run
//! command factory, and the identifier naming convention. Packs are plain
//! value objects registered in a process-wide registry; [`lookup_pack`] and
//! [`list_languages`] are the only registry operations.

mod literal;
mod naming;
mod pack;
mod packs;
mod prompt;
mod registry;
mod text;

pub use literal::{test_case_literals, value_literal, TestCaseLiterals};
pub use naming::NamingConvention;
pub use pack::{LanguagePack, SignatureCtx};
pub use prompt::{
    translate_entry_function_name, translate_prompt, translate_signature,
    translate_signature_with_docstring, translate_type_signature,
};
pub use registry::{list_languages, lookup_pack, pack_for_extension};
