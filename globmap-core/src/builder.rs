//! Grouping of mapped sources by destination

use crate::mapper::PathMapper;
use crate::options::MappingOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One destination and every source that maps onto it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Destination path
    pub dest: String,
    /// Source paths in input order
    pub src: Vec<String>,
}

impl MappingEntry {
    /// Create an entry
    pub fn new<D, I, S>(dest: D, src: I) -> Self
    where
        D: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dest: dest.into(),
            src: src.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered mapping result
///
/// Entries appear in the order their destination was first produced and no
/// two entries share a destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
}

impl Mapping {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no source was mapped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries
    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.entries.iter()
    }

    /// Entry for a destination
    pub fn get(&self, dest: &str) -> Option<&MappingEntry> {
        self.entries.iter().find(|entry| entry.dest == dest)
    }

    /// Entries as a slice
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Take the entries
    pub fn into_entries(self) -> Vec<MappingEntry> {
        self.entries
    }
}

impl PartialEq<Vec<MappingEntry>> for Mapping {
    fn eq(&self, other: &Vec<MappingEntry>) -> bool {
        &self.entries == other
    }
}

impl IntoIterator for Mapping {
    type Item = MappingEntry;
    type IntoIter = std::vec::IntoIter<MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Incrementally maps sources and groups them by destination
#[derive(Debug)]
pub struct MappingBuilder<'a> {
    mapper: PathMapper<'a>,
    groups: IndexMap<String, Vec<String>>,
}

impl<'a> MappingBuilder<'a> {
    /// Create an empty builder
    pub fn new(options: &'a MappingOptions) -> Self {
        Self {
            mapper: PathMapper::new(options),
            groups: IndexMap::new(),
        }
    }

    /// Map one source and add it to its destination group
    pub fn push(&mut self, source: &str) -> &mut Self {
        let dest = self.mapper.compute_dest(source);
        let src = self.mapper.src_path(source);

        let group = self.groups.entry(dest).or_default();
        if !group.is_empty() {
            tracing::trace!(source = %src, count = group.len() + 1, "source joins existing destination");
        }
        group.push(src);
        self
    }

    /// Map every source in order
    pub fn extend<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for source in sources {
            self.push(source.as_ref());
        }
        self
    }

    /// Number of distinct destinations so far
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Produce the mapping
    pub fn finish(self) -> Mapping {
        let entries = self
            .groups
            .into_iter()
            .map(|(dest, src)| MappingEntry { dest, src })
            .collect();
        Mapping { entries }
    }
}

/// Map every source and group the results by destination
pub fn build_mapping<I, S>(sources: I, options: &MappingOptions) -> Mapping
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = MappingBuilder::new(options);
    builder.extend(sources);
    let mapping = builder.finish();
    tracing::debug!(entries = mapping.len(), "built mapping");
    mapping
}
