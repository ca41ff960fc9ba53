//! Read-only view of the capability prerequisite graph.

use crate::capability::{Capability, Extension, CAPABILITIES};
use crate::error::GraphError;
use crate::table::{EnumTable, Enumerant};
use crate::version::Version;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Gray,
    Black,
}

/// Prerequisite edges, extension gates and version windows of every
/// capability. Construction validates that the table is sorted and acyclic.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityGraph {
    table: &'static EnumTable<Capability>,
}

impl CapabilityGraph {
    /// The graph over the built-in capability table.
    pub fn new() -> Result<Self, GraphError> {
        Self::from_table(&CAPABILITIES)
    }

    pub fn from_table(table: &'static EnumTable<Capability>) -> Result<Self, GraphError> {
        if !table.is_sorted() {
            return Err(GraphError::Unsorted {
                family: table.family(),
            });
        }
        let graph = Self { table };
        for row in table.entries() {
            graph.chain(row.value)?;
        }
        Ok(graph)
    }

    fn row(&self, cap: Capability) -> Option<&'static Enumerant<Capability>> {
        self.table.get(cap.id())
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> {
        self.table.entries().iter().map(|e| e.value)
    }

    pub fn prerequisites_of(&self, cap: Capability) -> &'static [Capability] {
        self.row(cap).map_or(&[], |r| r.capabilities)
    }

    pub fn min_version(&self, cap: Capability) -> Version {
        self.row(cap).map_or(Version::UNSPECIFIED, |r| r.min_version)
    }

    pub fn max_version(&self, cap: Capability) -> Version {
        self.row(cap).map_or(Version::UNSPECIFIED, |r| r.max_version)
    }

    pub fn gating_extensions(&self, cap: Capability) -> &'static [Extension] {
        self.row(cap).map_or(&[], |r| r.extensions)
    }

    /// `cap` preceded by its transitive prerequisites, each listed once,
    /// deepest first.
    pub fn chain(&self, cap: Capability) -> Result<Vec<Capability>, GraphError> {
        let mut out = Vec::new();
        let mut marks: HashMap<Capability, Mark> = HashMap::new();
        let mut stack: Vec<(Capability, usize)> = vec![(cap, 0)];
        marks.insert(cap, Mark::Gray);

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let prereqs = self.prerequisites_of(node);
            if next < prereqs.len() {
                top.1 += 1;
                let p = prereqs[next];
                match marks.get(&p) {
                    Some(Mark::Gray) => return Err(GraphError::Cycle { capability: p }),
                    Some(Mark::Black) => {}
                    None => {
                        marks.insert(p, Mark::Gray);
                        stack.push((p, 0));
                    }
                }
            } else {
                marks.insert(node, Mark::Black);
                out.push(node);
                stack.pop();
            }
        }
        Ok(out)
    }
}
