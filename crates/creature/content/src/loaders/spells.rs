//! Spell catalog loader.

use std::path::Path;

use creature_core::SpellCatalog;
use tracing::{debug, warn};

use crate::loaders::{LoadResult, read_file};

/// Loader for spell catalogs from RON files.
///
/// The file has the shape of [`SpellCatalog`] and lists only the entries a
/// content pack changes or adds; everything else keeps its built-in
/// descriptor.
pub struct SpellLoader;

impl SpellLoader {
    pub fn load(path: &Path) -> LoadResult<SpellCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellCatalog> {
        let pack: SpellCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;

        let mut catalog = SpellCatalog::builtin();
        let mut replaced = 0;
        for (id, spell) in pack.classic {
            if spell.is_inert() {
                warn!(id, name = %spell.name, "skipping classic spell without effects");
                continue;
            }
            catalog.classic.insert(id, spell);
            replaced += 1;
        }
        for (which, spell) in pack.custom {
            if spell.is_inert() {
                warn!(%which, "skipping custom spell without effects");
                continue;
            }
            catalog.custom.insert(which, spell);
            replaced += 1;
        }

        debug!(replaced, total = catalog.len(), "spell catalog loaded");
        Ok(catalog)
    }
}
