use crate::core::{CompactServiceEntry, ExtendedServiceEntry, OrganizationGroup, ServiceRecord};
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::HashMap;

/// Group-by-organization accumulator for one projection.
///
/// Groups live in a Vec in first-insertion order of their fiscal code; the
/// map only stores each code's position. Appending to an existing group
/// never re-derives the group's identity or organization name.
#[derive(Debug)]
struct GroupedServices<E> {
    groups: Vec<OrganizationGroup<E>>,
    positions: HashMap<String, usize>,
}

impl<E> Default for GroupedServices<E> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<E> GroupedServices<E> {
    fn push(&mut self, record: &ServiceRecord, entry: E) {
        match self.positions.get(&record.organization_fiscal_code) {
            Some(&pos) => self.groups[pos].services.push(entry),
            None => {
                self.positions
                    .insert(record.organization_fiscal_code.clone(), self.groups.len());
                self.groups.push(OrganizationGroup {
                    organization_fiscal_code: record.organization_fiscal_code.clone(),
                    organization_name: record.organization_name.clone(),
                    services: vec![entry],
                });
            }
        }
    }
}

/// Merges validated records into the compact and extended projections.
///
/// Both projections are updated in one step so their group membership can
/// never diverge. The accumulator spans the whole scan; rows of one
/// organization need not share a page or even be contiguous.
#[derive(Debug, Default)]
pub struct GroupAggregator {
    compact: GroupedServices<CompactServiceEntry>,
    extended: GroupedServices<ExtendedServiceEntry>,
}

impl GroupAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: ServiceRecord) {
        let compact_entry = CompactServiceEntry::from(&record);
        let extended_entry = ExtendedServiceEntry::from(&record);
        self.compact.push(&record, compact_entry);
        self.extended.push(&record, extended_entry);
    }

    pub fn organizations(&self) -> usize {
        self.compact.groups.len()
    }

    pub fn compact_groups(&self) -> &[OrganizationGroup<CompactServiceEntry>] {
        &self.compact.groups
    }

    pub fn extended_groups(&self) -> &[OrganizationGroup<ExtendedServiceEntry>] {
        &self.extended.groups
    }
}

/// Renders groups to their wire form: a JSON array in first-insertion
/// order, `[]` when empty. Deterministic for a given accumulator state.
pub fn serialize_groups<E: Serialize>(groups: &[OrganizationGroup<E>]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(groups)?)
}
