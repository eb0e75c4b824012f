//! # Attribute Kinds
//!
//! A kind names what a leaf predicate is about ("Instrument", "Time", ...).
//! Kinds are plain unit types implementing [`Kind`]; [`AttrKind`] is the
//! erased, copyable identity used inside trees and as the registry key.
//!
//! Because the registry API is generic over `K: Kind`, registering values for
//! something that is not a kind is rejected by the compiler. The by-name API
//! ([`kind_by_name`]) is the only runtime path and returns
//! [`AttrError::UnknownKind`] for names it does not recognize.
//!
//! ## Declaring kinds
//!
//! ```
//! use attrquery::{simple_kind, Attr};
//!
//! simple_kind! {
//!     /// Spacecraft the observation was taken from.
//!     Observatory
//! }
//!
//! let soho = Observatory::new("SOHO");
//! assert_eq!(soho, Attr::simple::<Observatory>("SOHO"));
//! ```

use crate::error::{AttrError, Result};
use crate::registry::AttrRegistry;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A type that can be the kind of a simple leaf predicate.
pub trait Kind: 'static {
    /// Display name, also used as the kind's stable hash input.
    const NAME: &'static str;

    /// Short description shown by `attrquery kinds`.
    const DESCRIPTION: &'static str = "";

    fn kind() -> AttrKind {
        AttrKind::of::<Self>()
    }
}

/// Type-erased identity of a [`Kind`].
///
/// Two `AttrKind`s are equal iff they come from the same Rust type.
#[derive(Clone, Copy)]
pub struct AttrKind {
    id: TypeId,
    name: &'static str,
    description: &'static str,
}

impl AttrKind {
    pub fn of<K: Kind + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<K>(),
            name: K::NAME,
            description: K::DESCRIPTION,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description.trim()
    }
}

impl PartialEq for AttrKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AttrKind {}

impl Hash for AttrKind {
    // Hash the name rather than the TypeId so the value is stable across builds.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Declares one or more unit kind types.
///
/// Each generated type implements [`Kind`] and gets a `new(value)` constructor
/// returning the simple leaf for that kind.
#[macro_export]
macro_rules! simple_kind {
    ($($(#[doc = $doc:literal])* $name:ident)+) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl $crate::Kind for $name {
                const NAME: &'static str = stringify!($name);
                const DESCRIPTION: &'static str = concat!($($doc),*);
            }

            impl $name {
                /// Builds the simple leaf `kind == value`.
                #[allow(dead_code)]
                pub fn new(value: impl Into<$crate::AttrValue>) -> $crate::Attr {
                    $crate::Attr::simple::<$name>(value)
                }
            }
        )+
    };
}

simple_kind! {
    /// Time range of the observation.
    Time
    /// Instrument which recorded the data.
    Instrument
    /// Data source, usually a mission or observatory.
    Source
    /// Data provider, the archive serving the data.
    Provider
    /// Physical observable measured by the data.
    Physobs
    /// Processing level of the data.
    Level
    /// Detector of the instrument.
    Detector
    /// Sampling cadence in seconds.
    Sample
    /// Wavelength or passband in Angstrom.
    Wavelength
}

static BUILTIN_KINDS: Lazy<Vec<AttrKind>> = Lazy::new(|| {
    vec![
        Time::kind(),
        Instrument::kind(),
        Source::kind(),
        Provider::kind(),
        Physobs::kind(),
        Level::kind(),
        Detector::kind(),
        Sample::kind(),
        Wavelength::kind(),
    ]
});

/// The kinds the catalog search supports out of the box.
pub fn builtin_kinds() -> &'static [AttrKind] {
    &BUILTIN_KINDS
}

/// Resolves a kind by name, case-insensitively.
///
/// Built-in kinds are searched first, then every kind that has entries in
/// `registry`.
pub fn kind_by_name(name: &str, registry: &AttrRegistry) -> Result<AttrKind> {
    builtin_kinds()
        .iter()
        .copied()
        .chain(registry.kinds())
        .find(|kind| kind.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| AttrError::UnknownKind(name.to_string()))
}
