//! # Combinators
//!
//! AND and OR over [`Attr`] trees. Both are pure: they consume their operands
//! and return a new tree in normal form.
//!
//! ## AND
//!
//! 1. A neutral operand returns the other operand.
//! 2. A disjunction operand is distributed over:
//!    `a & (b | c) == (a & b) | (a & c)`.
//! 3. Otherwise every member of the left side is checked against every
//!    member of the right side; any collision is an
//!    [`AttrError::Contradiction`]. Two simple leaves of the same kind can
//!    never be AND-ed.
//! 4. The members are merged into one flat conjunction.
//!
//! ## OR
//!
//! 1. A neutral operand returns the other operand.
//! 2. Structurally equal operands return the left one.
//! 3. Otherwise the members are merged into one flat disjunction.
//!
//! Note the asymmetry: `SA(1) | SA(1)` collapses to `SA(1)`, while
//! `SA(1) & SA(1)` is a contradiction.
//!
//! [`AttrAnd::new`] and [`AttrOr::new`] fold a list of operands through the
//! same rules, so every public way of building a tree yields normal form.

use crate::attr::{Attr, AttrAnd, AttrOr};
use crate::error::{AttrError, Result};
use std::ops::{BitAnd, BitOr};

/// Combines two attributes with AND.
pub fn and(left: Attr, right: Attr) -> Result<Attr> {
    match (left, right) {
        (Attr::Neutral, other) | (other, Attr::Neutral) => Ok(other),
        (Attr::Or(or), other) => {
            let branches = or
                .attrs()
                .iter()
                .map(|member| and(member.clone(), other.clone()))
                .collect::<Result<Vec<_>>>()?;
            Ok(Attr::disjunction(branches))
        }
        (other, Attr::Or(or)) => {
            let branches = or
                .attrs()
                .iter()
                .map(|member| and(other.clone(), member.clone()))
                .collect::<Result<Vec<_>>>()?;
            Ok(Attr::disjunction(branches))
        }
        (left, right) => {
            check_contradiction(&left, &right)?;
            Ok(Attr::conjunction([left, right]))
        }
    }
}

/// Combines two attributes with OR.
pub fn or(left: Attr, right: Attr) -> Attr {
    match (left, right) {
        (Attr::Neutral, other) | (other, Attr::Neutral) => other,
        (left, right) if left == right => left,
        (left, right) => Attr::disjunction([left, right]),
    }
}

/// AND-s two or more attributes, removing redundant nesting.
///
/// An empty input gives [`Attr::Neutral`].
pub fn and_all(attrs: impl IntoIterator<Item = Attr>) -> Result<Attr> {
    attrs.into_iter().try_fold(Attr::Neutral, and)
}

/// OR-s two or more attributes, removing redundant nesting.
///
/// An empty input gives [`Attr::Neutral`].
pub fn or_all(attrs: impl IntoIterator<Item = Attr>) -> Attr {
    attrs.into_iter().fold(Attr::Neutral, or)
}

/// The operands of a conjunction step: the members of a conjunction, or the
/// attribute itself.
fn conjuncts(attr: &Attr) -> &[Attr] {
    match attr {
        Attr::And(and) => and.attrs(),
        other => std::slice::from_ref(other),
    }
}

fn check_contradiction(left: &Attr, right: &Attr) -> Result<()> {
    for l in conjuncts(left) {
        for r in conjuncts(right) {
            if l.collides(r)? {
                return Err(AttrError::Contradiction {
                    left: l.to_string(),
                    right: r.to_string(),
                });
            }
        }
    }
    Ok(())
}

impl AttrAnd {
    /// Conjunction of `attrs`, built exactly as chaining `&` would build it:
    /// disjunctions are distributed over and collisions are errors.
    ///
    /// ```
    /// use attrquery::{AttrAnd, Instrument, Source};
    ///
    /// let query = AttrAnd::new([Instrument::new("AIA"), Source::new("SDO")])?;
    /// assert_eq!(query, (Instrument::new("AIA") & Source::new("SDO"))?);
    /// assert!(AttrAnd::new([Instrument::new("AIA"), Instrument::new("HMI")]).is_err());
    /// # Ok::<(), attrquery::AttrError>(())
    /// ```
    pub fn new(attrs: impl IntoIterator<Item = Attr>) -> Result<Attr> {
        and_all(attrs)
    }
}

impl AttrOr {
    /// Disjunction of `attrs`, built exactly as chaining `|` would build it.
    pub fn new(attrs: impl IntoIterator<Item = Attr>) -> Attr {
        or_all(attrs)
    }
}

impl Attr {
    /// Method form of [`and`].
    pub fn and(self, other: Attr) -> Result<Attr> {
        and(self, other)
    }

    /// Method form of [`or`].
    pub fn or(self, other: Attr) -> Attr {
        or(self, other)
    }
}

impl BitAnd for Attr {
    type Output = Result<Attr>;

    fn bitand(self, rhs: Attr) -> Result<Attr> {
        and(self, rhs)
    }
}

impl BitOr for Attr {
    type Output = Attr;

    fn bitor(self, rhs: Attr) -> Attr {
        or(self, rhs)
    }
}
