use std::collections::BTreeSet;
use std::ops::Bound;

/// Strip exactly one trailing `/` from a resource path.
///
/// `"/"` becomes `""`, which is the wildcard entry matching every path.
#[must_use]
pub fn normalize_resource(resource: &str) -> &str {
    resource.strip_suffix('/').unwrap_or(resource)
}

/// Lexicographically ordered set of normalized resource paths.
///
/// Ordering is load-bearing: prefix and exact lookups walk the set backward
/// from the upper bound of the queried path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSet {
    entries: BTreeSet<String>,
}

impl ResourceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and insert a resource. Returns `false` if it was already present.
    pub fn insert(&mut self, resource: &str) -> bool {
        let clean = normalize_resource(resource);
        if self.entries.contains(clean) {
            return false;
        }
        self.entries.insert(clean.to_owned())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in ascending lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entries `<= path`, visited from the largest down.
    fn walk_back_from<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .range::<str, _>((Bound::Unbounded, Bound::Included(path)))
            .rev()
            .map(String::as_str)
    }

    /// Whether `path` equals, or is a path-segment descendant of, any entry.
    ///
    /// The first qualifying entry in decreasing lexicographic order wins. An
    /// empty entry matches everything. `/foo` matches `/foo` and `/foo/bar`
    /// but never `/foobar`.
    #[must_use]
    pub fn matches_prefix(&self, path: &str) -> bool {
        self.walk_back_from(path)
            .any(|entry| entry.is_empty() || is_segment_prefix(entry, path))
    }

    /// Whether `path` is stored literally.
    #[must_use]
    pub fn matches_exact(&self, path: &str) -> bool {
        // the largest entry <= path is the only one that can equal it
        self.walk_back_from(path).next() == Some(path)
    }

    /// Whether `path` ends with any entry. An empty entry matches everything.
    #[must_use]
    pub fn matches_extension(&self, path: &str) -> bool {
        self.entries.iter().any(|suffix| path.ends_with(suffix.as_str()))
    }
}

fn is_segment_prefix(entry: &str, path: &str) -> bool {
    path.strip_prefix(entry)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

impl<'a> FromIterator<&'a str> for ResourceSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for resource in iter {
            set.insert(resource);
        }
        set
    }
}
