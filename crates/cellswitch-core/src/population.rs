//! Ordered store of live cells.
//!
//! The population owns every [`Cell`] in the simulation, keyed by
//! [`CellId`], and remembers admission order so that step passes visit
//! cells deterministically (seeded cells first, then daughters in the order
//! they were born).

use std::collections::BTreeMap;
use std::sync::Arc;

use cellswitch_agents::{BehaviorModule, Cell, CellError, SeedCellParams};
use cellswitch_types::{CellId, CellSnapshot, CellType};
use tracing::info;

/// Errors that can occur when admitting cells.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    /// A cell with this id is already in the population.
    #[error("cell {0} is already in the population")]
    DuplicateCell(CellId),

    /// A seed cell could not be constructed.
    #[error("invalid seed cell: {source}")]
    InvalidSeed {
        /// The underlying cell error.
        #[from]
        source: CellError,
    },
}

/// Live cells in admission order.
#[derive(Debug, Default)]
pub struct Population {
    cells: BTreeMap<CellId, Cell>,
    order: Vec<CellId>,
}

impl Population {
    /// Create an empty population.
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Create seed cells from `params`, bind each to `behavior`, and admit
    /// them in order. Returns the new ids.
    ///
    /// # Errors
    ///
    /// Returns [`PopulationError::InvalidSeed`] if any seed has invalid
    /// attributes. Cells seeded before the failing one stay admitted.
    pub fn seed(
        &mut self,
        params: &[SeedCellParams],
        behavior: &Arc<dyn BehaviorModule>,
    ) -> Result<Vec<CellId>, PopulationError> {
        let mut ids = Vec::with_capacity(params.len());
        for p in params {
            let cell = Cell::seed(p)?.with_behavior(Arc::clone(behavior));
            ids.push(self.admit(cell)?);
        }
        info!(
            seeded = ids.len(),
            behavior = behavior.name(),
            "Seed cells admitted"
        );
        Ok(ids)
    }

    /// Add a cell to the population. Returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`PopulationError::DuplicateCell`] if a cell with the same id
    /// is already present; the population is unchanged.
    pub fn admit(&mut self, cell: Cell) -> Result<CellId, PopulationError> {
        let id = cell.id();
        if self.cells.contains_key(&id) {
            return Err(PopulationError::DuplicateCell(id));
        }
        self.cells.insert(id, cell);
        self.order.push(id);
        Ok(id)
    }

    /// Look up a cell by id.
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    /// Look up a cell by id for mutation.
    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(&id)
    }

    /// Whether a cell with this id is present.
    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_key(&id)
    }

    /// Cell ids in admission order.
    pub fn ids(&self) -> &[CellId] {
        &self.order
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the population has no cells.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate cells in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.order.iter().filter_map(|id| self.cells.get(id))
    }

    /// Number of cells of each type.
    pub fn count_by_type(&self) -> BTreeMap<CellType, usize> {
        let mut counts = BTreeMap::new();
        for cell in self.cells.values() {
            let entry = counts.entry(cell.cell_type()).or_insert(0_usize);
            *entry = entry.saturating_add(1);
        }
        counts
    }

    /// Snapshots of every cell in admission order.
    pub fn snapshots(&self) -> Vec<CellSnapshot> {
        self.iter().map(Cell::snapshot).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cellswitch_agents::{BehaviorConfig, SwitchBehavior};
    use cellswitch_types::Position;

    use super::*;

    fn behavior() -> Arc<dyn BehaviorModule> {
        Arc::new(SwitchBehavior::new(BehaviorConfig::default()).unwrap())
    }

    fn precursor() -> Cell {
        Cell::seed(&SeedCellParams::precursor_at(Position::ORIGIN)).unwrap()
    }

    #[test]
    fn admit_preserves_order() {
        let mut population = Population::new();
        let a = population.admit(precursor()).unwrap();
        let b = population.admit(precursor()).unwrap();
        assert_eq!(population.ids(), &[a, b]);
        assert_eq!(population.len(), 2);
        assert!(population.contains(a));

        let ids: Vec<CellId> = population.iter().map(Cell::id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn mother_and_daughter_are_distinct_entries() {
        let mut population = Population::new();
        let mother = precursor();
        let daughter = mother.divide().unwrap();
        let mother_id = population.admit(mother).unwrap();
        let daughter_id = population.admit(daughter).unwrap();

        assert_ne!(mother_id, daughter_id);
        assert_eq!(population.len(), 2);
        assert_eq!(
            population.get(daughter_id).and_then(Cell::mother),
            Some(mother_id)
        );
    }

    #[test]
    fn seed_binds_behavior() {
        let mut population = Population::new();
        let params = vec![
            SeedCellParams::precursor_at(Position::ORIGIN),
            SeedCellParams::precursor_at(Position::new(1.0, 1.0, 1.0)),
        ];
        let ids = population.seed(&params, &behavior()).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(population.iter().all(|c| c.behavior().is_some()));
    }

    #[test]
    fn seed_rejects_invalid_params() {
        let mut population = Population::new();
        let params = vec![SeedCellParams {
            substance_quantity: -5.0,
            ..SeedCellParams::precursor_at(Position::ORIGIN)
        }];
        let result = population.seed(&params, &behavior());
        assert!(matches!(result, Err(PopulationError::InvalidSeed { .. })));
        assert!(population.is_empty());
    }

    #[test]
    fn count_by_type_groups_cells() {
        let mut population = Population::new();
        population.admit(precursor()).unwrap();
        let mut other = precursor();
        other.set_cell_type(CellType::Differentiated);
        population.admit(other).unwrap();
        let mut odd = precursor();
        odd.set_cell_type(CellType::Unknown(99));
        population.admit(odd).unwrap();

        let counts = population.count_by_type();
        assert_eq!(counts.get(&CellType::Precursor), Some(&1));
        assert_eq!(counts.get(&CellType::Differentiated), Some(&1));
        assert_eq!(counts.get(&CellType::Unknown(99)), Some(&1));
    }

    #[test]
    fn lookup_and_mutate() {
        let mut population = Population::new();
        let id = population.admit(precursor()).unwrap();
        population.get_mut(id).unwrap().set_color(5);
        assert_eq!(population.get(id).map(Cell::color), Some(5));
        assert!(population.get(CellId::new()).is_none());
    }
}
