//! # Attribute Registry
//!
//! The registry records, per attribute kind, the values a data catalog is
//! known to accept: e.g. for `Instrument`, that `"AIA"` exists and what it is.
//! Callers use it to discover valid values and, through the accessor layer
//! (see [`crate::accessor`]), to build leaves by canonical name.
//!
//! ## Entries
//!
//! Each kind owns a [`ValueEntry`]: three parallel sequences of canonical
//! names, original names and descriptions. Registration only ever appends.
//! Registering the same value twice keeps both rows, which lets several
//! sources contribute to the same kind.
//!
//! ## Lifecycle and sharing
//!
//! A registry is a plain value; construct one and share it by reference or in
//! an `Arc`. Tests that need isolation construct a fresh one. Nothing is
//! persisted.
//!
//! ## Concurrency
//!
//! All entries sit behind one `parking_lot::RwLock`. A registration call holds
//! the write lock for its whole batch, so a reader never observes the three
//! sequences at different lengths or half of a batch.
//!
//! ## Value files
//!
//! [`AttrRegistry::update_values_from_json`] accepts the JSON shape data
//! providers publish:
//!
//! ```json
//! {
//!   "Instrument": [["AIA", "Atmospheric Imaging Assembly"]],
//!   "Level": [["1.5", "Calibrated"]]
//! }
//! ```

use crate::error::{AttrError, Result};
use crate::kind::{kind_by_name, AttrKind, Kind};
use crate::normalize::normalize;
use log::{debug, warn};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

const BUILTIN_VALUES: &str = include_str!("data/builtin_values.json");

/// Known values for one attribute kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueEntry {
    names: Vec<String>,
    originals: Vec<String>,
    descriptions: Vec<String>,
}

impl ValueEntry {
    /// Canonical (normalized) names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names exactly as registered.
    pub fn originals(&self) -> &[String] {
        &self.originals
    }

    /// One description per name.
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates `(canonical, original, description)` rows in registration
    /// order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.names
            .iter()
            .zip(&self.originals)
            .zip(&self.descriptions)
            .map(|((name, original), description)| {
                (name.as_str(), original.as_str(), description.as_str())
            })
    }

    /// Original name of the first row whose canonical name is `name`.
    pub fn original_for(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .zip(&self.originals)
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, original)| original.as_str())
    }

    fn push(&mut self, name: String, original: String, description: String) {
        self.names.push(name);
        self.originals.push(original);
        self.descriptions.push(description);
    }
}

/// Kind-indexed store of known attribute values.
#[derive(Debug, Default)]
pub struct AttrRegistry {
    entries: RwLock<HashMap<AttrKind, ValueEntry>>,
}

impl AttrRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the values shipped with the crate.
    pub fn with_builtin_values() -> Result<Self> {
        let registry = Self::new();
        registry.update_values_from_json(BUILTIN_VALUES)?;
        Ok(registry)
    }

    /// Appends `(original, description)` pairs to the entry for `K`.
    ///
    /// Returns the number of rows appended.
    pub fn register<K: Kind>(
        &self,
        entries: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> usize {
        self.register_kind(K::kind(), entries)
    }

    /// Appends `(original, description)` pairs to the entry for `kind`.
    ///
    /// Names that normalize to nothing are skipped with a warning. The whole
    /// batch becomes visible to readers at once.
    pub fn register_kind(
        &self,
        kind: AttrKind,
        entries: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> usize {
        let rows: Vec<(String, String, String)> = entries
            .into_iter()
            .filter_map(|(original, description)| {
                let original = original.into();
                let name = normalize(&original);
                if name.is_empty() {
                    warn!(
                        "Skipping {} value {:?}: no usable characters",
                        kind, original
                    );
                    return None;
                }
                Some((name, original, description.into()))
            })
            .collect();

        let count = rows.len();
        if count == 0 {
            return 0;
        }
        let mut entries = self.entries.write();
        let entry = entries.entry(kind).or_default();
        for (name, original, description) in rows {
            entry.push(name, original, description);
        }
        debug!("Registered {} value(s) for {}", count, kind);
        count
    }

    /// Bulk registration over several kinds.
    pub fn update_values<I, E, O, D>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = (AttrKind, E)>,
        E: IntoIterator<Item = (O, D)>,
        O: Into<String>,
        D: Into<String>,
    {
        values
            .into_iter()
            .map(|(kind, entries)| self.register_kind(kind, entries))
            .sum()
    }

    /// Registers the kinds and values of a JSON value document.
    ///
    /// Kind names are resolved with [`kind_by_name`]; an unrecognized kind
    /// fails the whole document before anything is registered.
    pub fn update_values_from_json(&self, json: &str) -> Result<usize> {
        let document: BTreeMap<String, Vec<(String, String)>> = serde_json::from_str(json)?;
        let resolved = document
            .into_iter()
            .map(|(name, entries)| kind_by_name(&name, self).map(|kind| (kind, entries)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.update_values(resolved))
    }

    /// Reads a JSON value file from disk and registers its contents.
    pub fn load_values_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(AttrError::Io)?;
        let count = self.update_values_from_json(&content)?;
        debug!("Loaded {} value(s) from {}", count, path.display());
        Ok(count)
    }

    /// Snapshot of the entry for `K`, or `None` if nothing is registered.
    pub fn lookup<K: Kind>(&self) -> Option<ValueEntry> {
        self.lookup_kind(K::kind())
    }

    pub fn lookup_kind(&self, kind: AttrKind) -> Option<ValueEntry> {
        self.entries.read().get(&kind).cloned()
    }

    /// Kinds with at least one registration, sorted by name.
    pub fn kinds(&self) -> Vec<AttrKind> {
        let mut kinds: Vec<AttrKind> = self.entries.read().keys().copied().collect();
        kinds.sort_by_key(|kind| kind.name());
        kinds
    }

    /// Runs `f` against the entry for `kind` under the read lock.
    pub(crate) fn with_entry<T>(
        &self,
        kind: AttrKind,
        f: impl FnOnce(Option<&ValueEntry>) -> T,
    ) -> T {
        let entries = self.entries.read();
        f(entries.get(&kind))
    }
}
