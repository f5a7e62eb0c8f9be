//! The process-wide Language Pack registry.
//!
//! Built once on first use and read-only afterwards. Listing and lookup are
//! the only operations.

use std::sync::OnceLock;

use crate::pack::LanguagePack;
use crate::packs;

fn registry() -> &'static Vec<LanguagePack> {
    static REGISTRY: OnceLock<Vec<LanguagePack>> = OnceLock::new();
    REGISTRY.get_or_init(packs::all_packs)
}

/// Look up a pack by language name.
pub fn lookup_pack(language: &str) -> Option<&'static LanguagePack> {
    registry().iter().find(|p| p.name == language)
}

/// Look up a pack by driver file extension.
pub fn pack_for_extension(ext: &str) -> Option<&'static LanguagePack> {
    registry().iter().find(|p| p.file_ext == ext)
}

/// All registered language names, in registration order.
pub fn list_languages() -> Vec<&'static str> {
    registry().iter().map(|p| p.name).collect()
}
