//! Generic enumerant tables.
//!
//! Every operand family (and the capability set itself) is one sorted static
//! slice of [`Enumerant`] rows. A row names the capabilities, extensions and
//! version window attached to a value; lookups are binary searches on the
//! numeric value.

use crate::capability::{Capability, Extension};
use crate::version::Version;

/// One row of an enumerant table.
///
/// For operand families `capabilities` lists alternatives (declaring any one
/// of them makes the value legal). In the capability table itself the list is
/// conjunctive: every entry is a prerequisite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enumerant<V: 'static> {
    pub value: V,
    pub name: &'static str,
    pub capabilities: &'static [Capability],
    pub extensions: &'static [Extension],
    pub min_version: Version,
    pub max_version: Version,
}

impl<V: Copy> Enumerant<V> {
    pub const fn new(value: V, name: &'static str, capabilities: &'static [Capability]) -> Self {
        Self {
            value,
            name,
            capabilities,
            extensions: &[],
            min_version: Version::UNSPECIFIED,
            max_version: Version::UNSPECIFIED,
        }
    }

    pub const fn extensions(mut self, extensions: &'static [Extension]) -> Self {
        self.extensions = extensions;
        self
    }

    pub const fn since(mut self, version: Version) -> Self {
        self.min_version = version;
        self
    }

    pub const fn until(mut self, version: Version) -> Self {
        self.max_version = version;
        self
    }
}

/// A sorted table of enumerants for one family.
#[derive(Debug, Clone, Copy)]
pub struct EnumTable<V: 'static> {
    family: &'static str,
    entries: &'static [Enumerant<V>],
}

impl<V: Copy + Into<u32>> EnumTable<V> {
    pub const fn new(family: &'static str, entries: &'static [Enumerant<V>]) -> Self {
        Self { family, entries }
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn entries(&self) -> &'static [Enumerant<V>] {
        self.entries
    }

    pub fn get(&self, value: u32) -> Option<&'static Enumerant<V>> {
        let entries = self.entries;
        entries
            .binary_search_by_key(&value, |e| e.value.into())
            .ok()
            .map(|idx| &entries[idx])
    }

    pub fn by_name(&self, name: &str) -> Option<&'static Enumerant<V>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Strictly increasing values; required for [`EnumTable::get`].
    pub fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[0].value.into() < w[1].value.into())
    }
}
