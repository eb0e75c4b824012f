//! # Attribute Tree
//!
//! [`Attr`] is the node type of a search query. Leaves are [`SimpleAttr`]
//! (`kind == value`), [`ValueAttr`] (an open bag of fields) and the neutral
//! element; inner nodes are [`AttrAnd`] and [`AttrOr`].
//!
//! | Variant | Equality | Collides with |
//! |---------|----------|---------------|
//! | `Neutral` | always equal to `Neutral` | nothing |
//! | `Simple` | same kind and value | any `Simple` of the same kind, a `Value` with a field named after the kind |
//! | `Value` | same fields | a `Value` sharing a field name, a `Simple` whose kind names one of its fields |
//! | `And` | same members, any order | anything a member collides with |
//! | `Or` | same members, any order | undefined, returns an error |
//!
//! Trees are always kept in normal form: no `And` directly inside an `And`,
//! no `Or` directly inside an `Or`, no duplicate members, no neutral members,
//! no `Or` inside an `And`, and at least two members per inner node. Public
//! trees are only built through [`crate::combine`] ([`and`](crate::and),
//! [`or`](crate::or), [`AttrAnd::new`], [`AttrOr::new`]); the raw builders here
//! are crate-private.

use crate::error::{AttrError, Result};
use crate::kind::{AttrKind, Kind};
use crate::value::AttrValue;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A node of an attribute query tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attr {
    /// Identity element of both AND and OR.
    Neutral,
    Simple(SimpleAttr),
    Value(ValueAttr),
    And(AttrAnd),
    Or(AttrOr),
}

/// Leaf predicate "attribute of `kind` equals `value`".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleAttr {
    kind: AttrKind,
    value: AttrValue,
}

impl SimpleAttr {
    pub fn kind(&self) -> AttrKind {
        self.kind
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }
}

/// Leaf predicate carrying a bag of named fields.
///
/// Value bags are not tied to a kind and never appear in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ValueAttr {
    fields: BTreeMap<String, AttrValue>,
}

impl ValueAttr {
    pub fn fields(&self) -> &BTreeMap<String, AttrValue> {
        &self.fields
    }

    fn shares_field_with(&self, other: &ValueAttr) -> bool {
        self.fields.keys().any(|key| other.fields.contains_key(key))
    }
}

/// Conjunction of two or more attributes.
#[derive(Debug, Clone)]
pub struct AttrAnd {
    attrs: Vec<Attr>,
}

/// Disjunction of two or more attributes.
#[derive(Debug, Clone)]
pub struct AttrOr {
    attrs: Vec<Attr>,
}

impl AttrAnd {
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn contains(&self, attr: &Attr) -> bool {
        self.attrs.contains(attr)
    }
}

impl AttrOr {
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn contains(&self, attr: &Attr) -> bool {
        self.attrs.contains(attr)
    }
}

/// Members compare as unordered sets. Both sides are deduplicated, so equal
/// length plus containment is set equality.
fn same_members(left: &[Attr], right: &[Attr]) -> bool {
    left.len() == right.len() && left.iter().all(|attr| right.contains(attr))
}

/// Order-independent hash of a member set.
fn hash_members<H: Hasher>(tag: u8, attrs: &[Attr], state: &mut H) {
    let mut hashes: Vec<u64> = attrs
        .iter()
        .map(|attr| {
            let mut hasher = DefaultHasher::new();
            attr.hash(&mut hasher);
            hasher.finish()
        })
        .collect();
    hashes.sort_unstable();
    tag.hash(state);
    hashes.hash(state);
}

impl PartialEq for AttrAnd {
    fn eq(&self, other: &Self) -> bool {
        same_members(&self.attrs, &other.attrs)
    }
}

impl Eq for AttrAnd {}

impl Hash for AttrAnd {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_members(b'&', &self.attrs, state);
    }
}

impl PartialEq for AttrOr {
    fn eq(&self, other: &Self) -> bool {
        same_members(&self.attrs, &other.attrs)
    }
}

impl Eq for AttrOr {}

impl Hash for AttrOr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_members(b'|', &self.attrs, state);
    }
}

impl Hash for Attr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            // The neutral element carries no value.
            Attr::Neutral => None::<()>.hash(state),
            Attr::Simple(simple) => simple.hash(state),
            Attr::Value(bag) => bag.hash(state),
            Attr::And(and) => and.hash(state),
            Attr::Or(or) => or.hash(state),
        }
    }
}

/// Appends `attr` to `out` unless it is neutral or already present.
fn push_unique(out: &mut Vec<Attr>, attr: Attr) {
    if !attr.is_neutral() && !out.contains(&attr) {
        out.push(attr);
    }
}

impl Attr {
    /// Builds the simple leaf `K == value`.
    pub fn simple<K: Kind>(value: impl Into<AttrValue>) -> Attr {
        Attr::simple_of(K::kind(), value)
    }

    /// Builds a simple leaf from an erased kind.
    pub fn simple_of(kind: AttrKind, value: impl Into<AttrValue>) -> Attr {
        Attr::Simple(SimpleAttr {
            kind,
            value: value.into(),
        })
    }

    /// Builds a value-bag leaf.
    pub fn value_bag<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Attr
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        Attr::Value(ValueAttr {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        })
    }

    /// Raw conjunction builder: no distribution, no collision check.
    ///
    /// Nested conjunctions are flattened, duplicates and neutral members are
    /// dropped. Fewer than two remaining members collapse to the single member
    /// or to [`Attr::Neutral`]. Callers must have checked collisions and must
    /// not pass disjunctions.
    pub(crate) fn conjunction(attrs: impl IntoIterator<Item = Attr>) -> Attr {
        let mut members = Vec::new();
        for attr in attrs {
            match attr {
                Attr::And(and) => {
                    for member in and.attrs {
                        push_unique(&mut members, member);
                    }
                }
                other => push_unique(&mut members, other),
            }
        }
        collapse(members, |attrs| Attr::And(AttrAnd { attrs }))
    }

    /// Raw disjunction builder; the counterpart of [`Attr::conjunction`].
    /// Conjunction members are kept as they are.
    pub(crate) fn disjunction(attrs: impl IntoIterator<Item = Attr>) -> Attr {
        let mut members = Vec::new();
        for attr in attrs {
            match attr {
                Attr::Or(or) => {
                    for member in or.attrs {
                        push_unique(&mut members, member);
                    }
                }
                other => push_unique(&mut members, other),
            }
        }
        collapse(members, |attrs| Attr::Or(AttrOr { attrs }))
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Attr::Neutral)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Attr::Simple(_) | Attr::Value(_))
    }

    pub fn as_simple(&self) -> Option<&SimpleAttr> {
        match self {
            Attr::Simple(simple) => Some(simple),
            _ => None,
        }
    }

    /// Direct children of an inner node; empty for leaves and neutral.
    pub fn members(&self) -> &[Attr] {
        match self {
            Attr::And(and) => &and.attrs,
            Attr::Or(or) => &or.attrs,
            _ => &[],
        }
    }

    /// Whether `self` and `other` cannot both hold in one conjunction.
    ///
    /// The check is not symmetric for disjunctions: a disjunction receiver has
    /// no collision rule and returns [`AttrError::CollisionUnsupported`],
    /// while a leaf or conjunction checked against a disjunction returns
    /// `false`, since each branch is checked separately once AND distributes.
    pub fn collides(&self, other: &Attr) -> Result<bool> {
        match (self, other) {
            (Attr::Neutral, _) | (_, Attr::Neutral) => Ok(false),
            (Attr::Or(_), _) => Err(AttrError::CollisionUnsupported(self.to_string())),
            (Attr::And(and), _) => {
                for member in &and.attrs {
                    if member.collides(other)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            (_, Attr::And(and)) => {
                for member in &and.attrs {
                    if self.collides(member)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            (_, Attr::Or(_)) => Ok(false),
            (Attr::Simple(left), Attr::Simple(right)) => Ok(left.kind == right.kind),
            (Attr::Value(left), Attr::Value(right)) => Ok(left.shares_field_with(right)),
            (Attr::Simple(simple), Attr::Value(bag))
            | (Attr::Value(bag), Attr::Simple(simple)) => {
                Ok(bag.fields.contains_key(simple.kind.name()))
            }
        }
    }
}

fn collapse(mut members: Vec<Attr>, build: impl FnOnce(Vec<Attr>) -> Attr) -> Attr {
    match members.len() {
        0 => Attr::Neutral,
        1 => members.remove(0),
        _ => build(members),
    }
}

impl fmt::Display for SimpleAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

impl fmt::Display for ValueAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        write!(f, "Value({{{}}})", fields.join(", "))
    }
}

fn write_members(f: &mut fmt::Formatter<'_>, attrs: &[Attr], op: &str) -> fmt::Result {
    let parts: Vec<String> = attrs.iter().map(ToString::to_string).collect();
    write!(f, "({})", parts.join(op))
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Neutral => write!(f, "Neutral"),
            Attr::Simple(simple) => fmt::Display::fmt(simple, f),
            Attr::Value(bag) => fmt::Display::fmt(bag, f),
            Attr::And(and) => write_members(f, &and.attrs, " & "),
            Attr::Or(or) => write_members(f, &or.attrs, " | "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple_kind;

    simple_kind! {
        SA1
        SA2
        SA3
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn simple_equality_is_structural() {
        assert_eq!(SA1::new(1), SA1::new(1));
        assert_ne!(SA1::new(1), SA1::new(3));
        assert_ne!(SA1::new(1), SA2::new(1));
    }

    #[test]
    fn simple_hash_follows_equality() {
        assert_eq!(hash_of(&SA1::new(1)), hash_of(&SA1::new(1)));
        assert_ne!(hash_of(&SA1::new(1)), hash_of(&SA1::new(3)));
    }

    #[test]
    fn simple_display_names_kind_and_value() {
        let shown = SA1::new("test string").to_string();
        assert!(shown.contains("test string"));
        assert!(shown.contains("SA1"));
    }

    #[test]
    fn neutral_equals_neutral() {
        assert_eq!(Attr::Neutral, Attr::Neutral);
        assert_ne!(Attr::Neutral, Attr::value_bag([("a", "b")]));
    }

    #[test]
    fn neutral_hashes_like_no_value() {
        assert_eq!(hash_of(&Attr::Neutral), hash_of(&None::<()>));
    }

    #[test]
    fn conjunction_flattens_and_dedups() {
        let inner = Attr::conjunction([SA2::new(2), SA3::new(3)]);
        let and = Attr::conjunction([SA1::new(1), inner, SA1::new(1)]);
        assert_eq!(and.members().len(), 3);
        assert!(matches!(and, Attr::And(_)));
    }

    #[test]
    fn disjunction_flattens_but_keeps_conjunctions() {
        let and = Attr::conjunction([SA1::new(1), SA2::new(2)]);
        let inner = Attr::disjunction([SA3::new(3), SA3::new(4)]);
        let or = Attr::disjunction([and.clone(), inner]);
        assert_eq!(or.members().len(), 3);
        assert!(or.members().contains(&and));
    }

    #[test]
    fn short_member_lists_collapse() {
        assert_eq!(Attr::conjunction(Vec::new()), Attr::Neutral);
        assert_eq!(Attr::conjunction([SA1::new(1)]), SA1::new(1));
        assert_eq!(
            Attr::disjunction([SA1::new(1), Attr::Neutral, SA1::new(1)]),
            SA1::new(1)
        );
    }

    #[test]
    fn inner_node_equality_ignores_order() {
        let forward = Attr::disjunction([SA1::new(1), SA2::new(2), SA3::new(3)]);
        let backward = Attr::disjunction([SA3::new(3), SA2::new(2), SA1::new(1)]);
        assert_eq!(forward, backward);
        assert_eq!(hash_of(&forward), hash_of(&backward));
    }

    #[test]
    fn and_and_or_with_same_members_differ() {
        let and = Attr::conjunction([SA1::new(1), SA2::new(2)]);
        let or = Attr::disjunction([SA1::new(1), SA2::new(2)]);
        assert_ne!(and, or);
        assert_ne!(hash_of(&and), hash_of(&or));
    }

    #[test]
    fn same_kind_simple_attrs_collide() {
        assert!(SA1::new(1).collides(&SA1::new(2)).unwrap());
        assert!(SA1::new(1).collides(&SA1::new(1)).unwrap());
        assert!(!SA1::new(1).collides(&SA2::new(1)).unwrap());
    }

    #[test]
    fn neutral_never_collides() {
        assert!(!Attr::Neutral.collides(&Attr::Neutral).unwrap());
        assert!(!Attr::Neutral.collides(&SA1::new(1)).unwrap());
        assert!(!SA1::new(1).collides(&Attr::Neutral).unwrap());
    }

    #[test]
    fn value_bags_collide_on_shared_fields() {
        let one = Attr::value_bag([("a", "b")]);
        let two = Attr::value_bag([("a", "c"), ("d", "e")]);
        let three = Attr::value_bag([("x", "y")]);
        assert!(one.collides(&two).unwrap());
        assert!(!one.collides(&three).unwrap());
        assert!(!one.collides(&SA1::new(1)).unwrap());
    }

    #[test]
    fn value_bag_collides_with_kind_named_field() {
        let bag = Attr::value_bag([("SA1", "x")]);
        assert!(bag.collides(&SA1::new(1)).unwrap());
        assert!(SA1::new(1).collides(&bag).unwrap());
        assert!(!bag.collides(&SA2::new(1)).unwrap());
    }

    #[test]
    fn conjunction_collides_through_members() {
        let and = Attr::conjunction([SA1::new(1), SA2::new(2)]);
        assert!(and.collides(&SA1::new(5)).unwrap());
        assert!(SA2::new(5).collides(&and).unwrap());
        assert!(!and.collides(&SA3::new(3)).unwrap());
    }

    #[test]
    fn disjunction_has_no_collision_rule() {
        let or = Attr::disjunction([SA1::new(1), SA2::new(2)]);
        assert!(matches!(
            or.collides(&SA3::new(3)),
            Err(AttrError::CollisionUnsupported(_))
        ));
        assert!(!SA3::new(3).collides(&or).unwrap());
    }

    #[test]
    fn display_renders_tree() {
        let and = Attr::conjunction([SA1::new(1), SA2::new("x")]);
        assert_eq!(and.to_string(), "(SA1(1) & SA2(\"x\"))");
        let bag = Attr::value_bag([("b", 2), ("a", 1)]);
        assert_eq!(bag.to_string(), "Value({a: 1, b: 2})");
    }
}
