//! Hierarchical query keys.
//!
//! Every cached server value is addressed by a `QueryKey`: an ordered
//! sequence of segments (domain, resource kind, filter bag, identifier).
//! Derived keys always extend their parent key, so the whole key space
//! forms a prefix lattice and invalidation can target a subtree with a
//! single prefix match.

use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

/// One discriminator segment of a query key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Static discriminator: domain name or resource kind.
    Name(&'static str),
    /// Identifier of a single server-side entity.
    Id(Uuid),
    /// Normalized filter bag narrowing a list key.
    Filters(Filters),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Id(id) => write!(f, "{id}"),
            Segment::Filters(filters) => write!(f, "{filters}"),
        }
    }
}

/// Structurally-compared cache key.
///
/// Keys are immutable once built; the `with_*` builders consume the key
/// and return an extended copy. Two keys address the same cache entry
/// exactly when their segment sequences are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    segments: Vec<Segment>,
}

impl QueryKey {
    /// Create a domain root key.
    pub fn root(domain: &'static str) -> Self {
        Self {
            segments: vec![Segment::Name(domain)],
        }
    }

    /// Extend with a static resource-kind segment.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.segments.push(Segment::Name(name));
        self
    }

    /// Extend with an entity identifier segment.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.segments.push(Segment::Id(id));
        self
    }

    /// Extend with a filter bag.
    ///
    /// An empty bag adds no segment at all, so a list keyed with no
    /// effective filters collides with the unfiltered list key.
    pub fn with_filters(mut self, filters: Filters) -> Self {
        if !filters.is_empty() {
            self.segments.push(Segment::Filters(filters));
        }
        self
    }

    /// Check whether this key begins with `prefix` as a literal
    /// segment-sequence prefix. Every key is a prefix of itself.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Domain name of this key (its first segment).
    pub fn domain(&self) -> &'static str {
        match self.segments.first() {
            Some(Segment::Name(name)) => *name,
            // Keys are only built through `root`, which pins the first
            // segment to a Name.
            _ => "",
        }
    }

    /// Number of segments in this key.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A key always carries at least its domain segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Text(String),
    Number(u64),
    Flag(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(value) => f.write_str(value),
            FilterValue::Number(value) => write!(f, "{value}"),
            FilterValue::Flag(value) => write!(f, "{value}"),
        }
    }
}

/// Normalized query parameter bag.
///
/// Fields are stored in a sorted map so serialization order never depends
/// on insertion order, and unset fields are simply never inserted: a bag
/// built from a struct whose optional fields are all `None` is equal to a
/// bag that was never populated at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filters {
    entries: BTreeMap<&'static str, FilterValue>,
}

impl Filters {
    /// Create an empty filter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text filter field.
    #[must_use]
    pub fn text(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.entries.insert(field, FilterValue::Text(value.into()));
        self
    }

    /// Set a text filter field if the value is present; `None` is a no-op.
    #[must_use]
    pub fn text_opt(self, field: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.text(field, value),
            None => self,
        }
    }

    /// Set a numeric filter field (pagination, limits).
    #[must_use]
    pub fn number(mut self, field: &'static str, value: u64) -> Self {
        self.entries.insert(field, FilterValue::Number(value));
        self
    }

    /// Set a numeric filter field if the value is present.
    #[must_use]
    pub fn number_opt(self, field: &'static str, value: Option<u64>) -> Self {
        match value {
            Some(value) => self.number(field, value),
            None => self,
        }
    }

    /// Set a boolean filter field.
    #[must_use]
    pub fn flag(mut self, field: &'static str, value: bool) -> Self {
        self.entries.insert(field, FilterValue::Flag(value));
        self
    }

    /// Check whether any field is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of set fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let id = Uuid::new_v4();
        let a = QueryKey::root("reading").with_name("detail").with_id(id);
        let b = QueryKey::root("reading").with_name("detail").with_id(id);

        assert_eq!(a, b);
    }

    #[test]
    fn test_prefix_lattice() {
        let root = QueryKey::root("reading");
        let detail = root.clone().with_name("detail").with_id(Uuid::new_v4());

        assert!(detail.starts_with(&root));
        assert!(detail.starts_with(&detail));
        assert!(!root.starts_with(&detail));
    }

    #[test]
    fn test_sibling_domains_do_not_prefix_each_other() {
        let reading = QueryKey::root("reading").with_name("list");
        let listening = QueryKey::root("listening").with_name("list");

        assert!(!reading.starts_with(&QueryKey::root("listening")));
        assert_ne!(reading, listening);
    }

    #[test]
    fn test_empty_filters_add_no_segment() {
        let plain = QueryKey::root("reading").with_name("list");
        let filtered = QueryKey::root("reading")
            .with_name("list")
            .with_filters(Filters::new());

        assert_eq!(plain, filtered);
        assert_eq!(plain.len(), filtered.len());
    }

    #[test]
    fn test_unset_fields_do_not_change_the_bag() {
        let explicit = Filters::new()
            .text("difficulty", "easy")
            .text_opt("search", None::<String>)
            .number_opt("page", None);
        let minimal = Filters::new().text("difficulty", "easy");

        assert_eq!(explicit, minimal);
    }

    #[test]
    fn test_filter_order_does_not_matter() {
        let a = Filters::new().text("difficulty", "easy").number("page", 2);
        let b = Filters::new().number("page", 2).text("difficulty", "easy");

        assert_eq!(a, b);
        assert_eq!(
            QueryKey::root("reading").with_name("list").with_filters(a),
            QueryKey::root("reading").with_name("list").with_filters(b),
        );
    }

    #[test]
    fn test_display_is_stable() {
        let key = QueryKey::root("reading")
            .with_name("list")
            .with_filters(Filters::new().number("page", 2).text("difficulty", "easy"));

        assert_eq!(key.to_string(), "reading/list/{difficulty=easy,page=2}");
    }
}
