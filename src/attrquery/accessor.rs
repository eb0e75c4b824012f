//! # Accessors
//!
//! Named access to registered values. Once `("AIA", ...)` is registered for
//! `Instrument`, `registry.resolve::<Instrument>("aia")` returns the same leaf
//! as `Instrument::new("AIA")`: the leaf carries the *original* name, the
//! canonical name is only the lookup key. Only canonical names resolve:
//! `resolve::<Instrument>("AIA")` is an error, normalize user input first.
//!
//! Accessors read the registry at call time, so values registered after a
//! tree was built are still resolvable afterwards.
//!
//! | Call | Unknown kind or name |
//! |------|----------------------|
//! | [`AttrRegistry::lookup`] | `None` |
//! | [`AttrRegistry::resolve`] | [`AttrError::NoSuchAttribute`] |
//! | [`AttrRegistry::accessor_names`] | empty list |
//! | [`AttrRegistry::render`] | header and rule only |

use crate::attr::Attr;
use crate::combine::{and_all, or_all};
use crate::error::{AttrError, Result};
use crate::kind::{kind_by_name, AttrKind, Kind};
use crate::normalize::{is_canonical, normalize};
use crate::registry::AttrRegistry;
use crate::table;

const TABLE_HEADERS: [&str; 3] = ["Attribute Name", "Full Name", "Description"];

impl AttrRegistry {
    /// Builds the leaf for the registered value whose canonical name is `name`.
    pub fn resolve<K: Kind>(&self, name: &str) -> Result<Attr> {
        self.resolve_kind(K::kind(), name)
    }

    pub fn resolve_kind(&self, kind: AttrKind, name: &str) -> Result<Attr> {
        let original = if is_canonical(name) {
            self.with_entry(kind, |entry| {
                entry
                    .and_then(|entry| entry.original_for(name))
                    .map(str::to_string)
            })
        } else {
            None
        };
        match original {
            Some(original) => Ok(Attr::simple_of(kind, original)),
            None => Err(AttrError::NoSuchAttribute {
                kind: kind.name().to_string(),
                name: name.to_string(),
            }),
        }
    }

    /// Every canonical name registered for `K`, without repeats, in the order
    /// they were first registered.
    pub fn accessor_names<K: Kind>(&self) -> Vec<String> {
        self.accessor_names_kind(K::kind())
    }

    pub fn accessor_names_kind(&self, kind: AttrKind) -> Vec<String> {
        self.with_entry(kind, |entry| {
            let mut names: Vec<String> = Vec::new();
            for name in entry.into_iter().flat_map(|entry| entry.names()) {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            names
        })
    }

    /// Table of the values registered for `K`.
    ///
    /// ```
    /// use attrquery::{AttrRegistry, Instrument};
    ///
    /// let registry = AttrRegistry::new();
    /// registry.register::<Instrument>([("AIA", "This is AIA, it takes data")]);
    /// assert_eq!(
    ///     registry.render::<Instrument>(),
    ///     "Attribute Name | Full Name | Description               \n\
    ///      ---------------+-----------+---------------------------\n\
    ///      aia            | AIA       | This is AIA, it takes data"
    /// );
    /// ```
    pub fn render<K: Kind>(&self) -> String {
        self.render_kind(K::kind())
    }

    pub fn render_kind(&self, kind: AttrKind) -> String {
        self.with_entry(kind, |entry| {
            let rows: Vec<[&str; 3]> = entry
                .into_iter()
                .flat_map(|entry| entry.rows())
                .map(|(name, original, description)| [name, original, description])
                .collect();
            table::render(TABLE_HEADERS, &rows)
        })
    }

    /// Builds a query from `KIND=NAME` terms.
    ///
    /// Kinds are matched case-insensitively and names are normalized before
    /// resolving. Terms sharing a kind are OR-ed together, the groups are
    /// AND-ed in the order their kinds first appear.
    ///
    /// ```
    /// use attrquery::{AttrRegistry, Instrument, Source};
    ///
    /// let registry = AttrRegistry::with_builtin_values()?;
    /// let query = registry.build_query(["instrument=aia", "Source=SDO", "Instrument=HMI"])?;
    /// let expected = ((Instrument::new("AIA") | Instrument::new("HMI")) & Source::new("SDO"))?;
    /// assert_eq!(query, expected);
    /// # Ok::<(), attrquery::AttrError>(())
    /// ```
    pub fn build_query<S: AsRef<str>>(&self, terms: impl IntoIterator<Item = S>) -> Result<Attr> {
        let mut groups: Vec<(AttrKind, Vec<Attr>)> = Vec::new();
        for term in terms {
            let term = term.as_ref();
            let (kind, name) = term
                .split_once('=')
                .filter(|(kind, name)| !kind.trim().is_empty() && !name.trim().is_empty())
                .ok_or_else(|| AttrError::InvalidTerm(term.to_string()))?;
            let kind = kind_by_name(kind.trim(), self)?;
            let leaf = self.resolve_kind(kind, &normalize(name))?;
            match groups.iter_mut().find(|(existing, _)| *existing == kind) {
                Some((_, leaves)) => leaves.push(leaf),
                None => groups.push((kind, vec![leaf])),
            }
        }
        and_all(groups.into_iter().map(|(_, leaves)| or_all(leaves)))
    }
}
