//! Process-wide registries (spec §4.7, §9): custom tags by type-id, named
//! compressors, and the tolerant-parsing flag. Init-once, read-many,
//! mutated only by explicit registration.
//!
//! The teacher and the rest of the pack predate `std::sync::OnceLock`
//! (stabilized in Rust 1.70), so they'd reach for `lazy_static`; we use
//! `OnceLock` instead since it's the direct standard-library replacement
//! for that exact need rather than a hand-rolled substitute for it.

use crate::compressor::{Compressor, GzipCompressor, IdentityCompressor, ZlibCompressor};
use crate::error::{Error, Result};
use crate::tag::{Tag, MAX_RESERVED_TYPE_ID};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

/// A registered custom tag's decoder: given the tag's name and raw value
/// bytes, constructs an in-memory value. Mirrors the "(name, value)
/// two-argument constructor" spec §7 expects custom tag types to expose;
/// returning `Err` (rather than panicking) is how a constructor reports
/// that it was handed data it can't accept, surfaced as
/// [`Error::InvalidCustomTag`].
pub type CustomDecoder = Arc<dyn Fn(&str, &[u8]) -> Result<Tag> + Send + Sync>;

/// Holds the three pieces of process-wide state named in spec §4.7.
pub struct Registries {
    custom_tags: RwLock<HashMap<u8, CustomDecoder>>,
    compressors: RwLock<HashMap<String, Arc<dyn Compressor>>>,
    tolerant: AtomicBool,
}

impl fmt::Debug for Registries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registries")
            .field("custom_tags", &self.custom_tags.read().unwrap().len())
            .field("compressors", &self.compressors.read().unwrap().keys().collect::<Vec<_>>())
            .field("tolerant", &self.tolerant.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for Registries {
    fn default() -> Self {
        Registries::new()
    }
}

impl Registries {
    /// A fresh registry with the three built-in compressors registered
    /// and tolerant mode off.
    pub fn new() -> Registries {
        let registries = Registries {
            custom_tags: RwLock::new(HashMap::new()),
            compressors: RwLock::new(HashMap::new()),
            tolerant: AtomicBool::new(false),
        };
        registries.register_builtin_compressors();
        registries
    }

    fn register_builtin_compressors(&self) {
        let mut compressors = self.compressors.write().unwrap();
        for compressor in [
            Arc::new(IdentityCompressor) as Arc<dyn Compressor>,
            Arc::new(GzipCompressor) as Arc<dyn Compressor>,
            Arc::new(ZlibCompressor) as Arc<dyn Compressor>,
        ] {
            compressors.insert(compressor.name().to_string(), compressor);
        }
    }

    /// Registers a custom tag decoder under `type_id`. Fails with
    /// [`Error::ReservedTypeId`] if `type_id` falls in `0..=15`.
    pub fn register_custom_tag(&self, type_id: u8, decoder: CustomDecoder) -> Result<()> {
        if type_id <= MAX_RESERVED_TYPE_ID {
            return Err(Error::ReservedTypeId(type_id));
        }
        self.custom_tags.write().unwrap().insert(type_id, decoder);
        Ok(())
    }

    pub fn custom_decoder(&self, type_id: u8) -> Option<CustomDecoder> {
        self.custom_tags.read().unwrap().get(&type_id).cloned()
    }

    pub fn register_compressor(&self, compressor: Arc<dyn Compressor>) {
        self.compressors
            .write()
            .unwrap()
            .insert(compressor.name().to_string(), compressor);
    }

    pub fn compressor(&self, name: &str) -> Result<Arc<dyn Compressor>> {
        self.compressors
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownCompressor(name.to_string()))
    }

    pub fn set_tolerant(&self, tolerant: bool) {
        self.tolerant.store(tolerant, Ordering::Relaxed);
    }

    pub fn is_tolerant(&self) -> bool {
        self.tolerant.load(Ordering::Relaxed)
    }
}

static GLOBAL: OnceLock<Registries> = OnceLock::new();

/// The process-wide default registries, lazily initialized on first use.
/// Mutating it after program start is permitted but establishing
/// happens-before with concurrent container operations is the caller's
/// responsibility (spec §5).
pub fn global() -> &'static Registries {
    GLOBAL.get_or_init(Registries::new)
}
