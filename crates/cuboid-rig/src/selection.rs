//! Selected cube set as seen by the editing operations

use crate::model::{CubeId, Model};

/// Ordered set of selected cubes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Vec<CubeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection, dropping duplicates but keeping first-seen order
    pub fn from_ids(ids: impl IntoIterator<Item = CubeId>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            selection.select(id);
        }
        selection
    }

    pub fn select(&mut self, id: CubeId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    pub fn deselect(&mut self, id: CubeId) {
        self.selected.retain(|s| *s != id);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: CubeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn ids(&self) -> &[CubeId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// True when no strict ancestor of `id` is selected
    pub fn is_root(&self, model: &Model, id: CubeId) -> bool {
        !self
            .selected
            .iter()
            .any(|other| *other != id && model.is_ancestor(*other, id))
    }

    /// Selected cubes without a selected ancestor, in selection order
    pub fn roots_only(&self, model: &Model) -> Vec<CubeId> {
        self.selected
            .iter()
            .copied()
            .filter(|id| self.is_root(model, *id))
            .collect()
    }

    /// Selected cubes still present in `model`, sorted by hierarchy level
    pub fn by_level(&self, model: &Model) -> Vec<CubeId> {
        let mut ids: Vec<CubeId> = self
            .selected
            .iter()
            .copied()
            .filter(|id| model.contains(*id))
            .collect();
        model.sort_by_level(&mut ids);
        ids
    }
}
