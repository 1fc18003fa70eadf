//! Premise registry: interning, belief state, and the premise → cell index
//! used by network-wide retraction.

use indexmap::{IndexMap, IndexSet};
use tangle_core::{Beliefs, CellId, PremiseId};

/// Interned premises and their belief state.
#[derive(Debug, Default)]
pub struct PremiseRegistry {
    by_name: IndexMap<String, PremiseId>,
    names: Vec<String>,
    believed: Vec<bool>,
    cells: IndexMap<PremiseId, IndexSet<CellId>>,
}

impl PremiseRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning its id. New premises start believed.
    pub fn intern(&mut self, name: &str) -> PremiseId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = PremiseId(u32::try_from(self.names.len()).unwrap_or(u32::MAX));
        self.by_name.insert(name.to_string(), id);
        self.names.push(name.to_string());
        self.believed.push(true);
        id
    }

    /// Id of an already interned premise.
    pub fn lookup(&self, name: &str) -> Option<PremiseId> {
        self.by_name.get(name).copied()
    }

    /// Name of a premise.
    pub fn name(&self, id: PremiseId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Set belief state. Returns whether it changed.
    pub(crate) fn set_believed(&mut self, id: PremiseId, believed: bool) -> bool {
        match self.believed.get_mut(id.0 as usize) {
            Some(slot) if *slot != believed => {
                *slot = believed;
                true
            }
            _ => false,
        }
    }

    /// Record that `cell` accepted a contribution under `premise`.
    pub(crate) fn index(&mut self, premise: PremiseId, cell: CellId) {
        self.cells.entry(premise).or_default().insert(cell);
    }

    /// Cells that accepted a contribution under `premise`.
    pub fn cells_for(&self, premise: PremiseId) -> Vec<CellId> {
        self.cells
            .get(&premise)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Drop index entries for cells that fail `keep`. Returns how many
    /// entries were removed.
    pub(crate) fn retain_cells(&mut self, mut keep: impl FnMut(CellId) -> bool) -> usize {
        let mut removed = 0;
        for set in self.cells.values_mut() {
            let before = set.len();
            set.retain(|&c| keep(c));
            removed += before - set.len();
        }
        self.cells.retain(|_, set| !set.is_empty());
        removed
    }

    /// Number of interned premises.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no premise has been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names of premises currently kicked out.
    pub fn retracted(&self) -> Vec<&str> {
        self.names
            .iter()
            .zip(&self.believed)
            .filter(|(_, &b)| !b)
            .map(|(n, _)| n.as_str())
            .collect()
    }
}

impl Beliefs for PremiseRegistry {
    fn is_believed(&self, premise: PremiseId) -> bool {
        self.believed.get(premise.0 as usize).copied().unwrap_or(true)
    }
}
