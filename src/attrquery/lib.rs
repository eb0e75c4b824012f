//! # Attrquery Architecture
//!
//! Attrquery is a **query algebra over typed attributes**. A data-catalog search
//! is written as a tree of leaf predicates ("Instrument is AIA", "Time is in this
//! range") combined with AND and OR. The tree is kept in a normal form so two
//! queries that mean the same thing compare equal, and so it can be handed to a
//! remote catalog as a list of independent blocks.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Lists kinds, renders value tables, resolves names        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Registry + Accessors (registry.rs, accessor.rs)            │
//! │  - Known values per kind, behind one RwLock                 │
//! │  - Leaves by canonical name, exact table rendering          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Algebra (attr.rs, combine.rs, walker.rs)                   │
//! │  - Leaf and inner node types, structural equality           │
//! │  - AND distributes over OR, contradictions are errors       │
//! │  - Flattening into query blocks                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Normal Form
//!
//! Every tree built through this crate satisfies:
//!
//! - an `And` never contains an `Or` (AND distributes)
//! - neither an `And` nor an `Or` contains a node of its own type (flattened)
//! - inner nodes have at least two members and no repeats
//! - `Neutral` only ever appears as a whole tree
//!
//! ```
//! use attrquery::{Instrument, Source};
//!
//! let query = ((Instrument::new("AIA") | Instrument::new("HMI")) & Source::new("SDO"))?;
//! assert_eq!(
//!     query.to_string(),
//!     "((Instrument(\"AIA\") & Source(\"SDO\")) | (Instrument(\"HMI\") & Source(\"SDO\")))"
//! );
//!
//! // Two values for the same kind cannot both hold.
//! assert!((Instrument::new("AIA") & Instrument::new("HMI")).is_err());
//! # Ok::<(), attrquery::AttrError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`attr`]: Tree node types and structural equality
//! - [`combine`]: AND / OR composition
//! - [`kind`]: Attribute kinds and the built-in catalog kinds
//! - [`value`]: Values carried by leaves
//! - [`normalize`]: Canonical accessor names
//! - [`registry`]: Known values per kind
//! - [`accessor`]: Named leaf lookup and table rendering
//! - [`walker`]: Query blocks for remote clients
//! - [`time`]: Time normalization and time-range leaves
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod accessor;
pub mod attr;
pub mod combine;
pub mod config;
pub mod error;
pub mod kind;
pub mod normalize;
pub mod registry;
pub mod table;
pub mod time;
pub mod value;
pub mod walker;

pub use attr::{Attr, AttrAnd, AttrOr, SimpleAttr, ValueAttr};
pub use combine::{and, and_all, or, or_all};
pub use error::{AttrError, Result};
pub use kind::{
    builtin_kinds, kind_by_name, AttrKind, Detector, Instrument, Kind, Level, Physobs, Provider,
    Sample, Source, Time, Wavelength,
};
pub use registry::{AttrRegistry, ValueEntry};
pub use time::parse_time;
pub use value::AttrValue;
pub use walker::QueryBlock;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
