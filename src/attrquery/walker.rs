//! # Query Blocks
//!
//! Catalog services accept a list of independent queries, each of which is a
//! flat set of field constraints. A tree in normal form maps onto that
//! directly: every disjunction member is one query, every conjunction is the
//! set of its leaves.
//!
//! ```text
//! (Instrument(AIA) & Time(...)) | (Instrument(HMI) & Time(...))
//!   -> [{Instrument: AIA, Time: ...}, {Instrument: HMI, Time: ...}]
//! ```

use crate::attr::Attr;
use crate::value::AttrValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// The leaves of one conjunction, serialized as a field map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryBlock {
    fields: BTreeMap<String, AttrValue>,
}

impl QueryBlock {
    /// Builds a block from a conjunction's leaves.
    ///
    /// Simple leaves contribute `kind name → value`, value bags contribute
    /// each of their fields. Inner nodes are not expected here.
    pub fn from_leaves(leaves: &[&Attr]) -> Self {
        let mut fields = BTreeMap::new();
        for leaf in leaves {
            match leaf {
                Attr::Simple(simple) => {
                    fields.insert(simple.kind().name().to_string(), simple.value().clone());
                }
                Attr::Value(bag) => {
                    for (key, value) in bag.fields() {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                _ => {}
            }
        }
        Self { fields }
    }

    pub fn fields(&self) -> &BTreeMap<String, AttrValue> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&AttrValue> {
        self.fields.get(field)
    }
}

impl Attr {
    /// Splits the tree into its disjunctive blocks.
    ///
    /// Neutral gives a single empty block (match everything). A conjunction
    /// never holds a disjunction in normal form, so it is always one block.
    pub fn blocks(&self) -> Vec<Vec<&Attr>> {
        match self {
            Attr::Neutral => vec![Vec::new()],
            Attr::Simple(_) | Attr::Value(_) => vec![vec![self]],
            Attr::Or(or) => or.attrs().iter().flat_map(Attr::blocks).collect(),
            Attr::And(and) => vec![and.attrs().iter().collect()],
        }
    }

    /// The blocks of [`Attr::blocks`] as serializable field maps.
    pub fn query_blocks(&self) -> Vec<QueryBlock> {
        self.blocks()
            .iter()
            .map(|leaves| QueryBlock::from_leaves(leaves))
            .collect()
    }
}
