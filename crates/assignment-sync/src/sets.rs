//! Assignment Sets
//!
//! The two disjoint halves of the area universe for one course, plus the
//! server-confirmed baseline. Pure local state: no I/O happens here.

use std::cmp::Ordering;
use std::collections::HashSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Area;

/// Collation key: accents stripped, lowercased
fn sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Display order for areas: accent- and case-insensitive by name, ties keep
/// insertion order
pub fn compare_names(a: &Area, b: &Area) -> Ordering {
    sort_key(&a.name).cmp(&sort_key(&b.name))
}

/// Stable name sort used wherever areas are shown in a picker
pub fn sort_by_name(areas: &mut [Area]) {
    areas.sort_by(compare_names);
}

/// Assignable / selected split of the area universe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentSets {
    /// Areas not assigned to the course (unordered)
    assignable: Vec<Area>,
    /// Areas assigned to the course as the client understands it
    selected: Vec<Area>,
    /// Last server-confirmed assignment
    original: Vec<Area>,
}

impl AssignmentSets {
    /// Split `universe` by the ids in `assigned`
    pub fn from_load(universe: Vec<Area>, assigned: Vec<Area>) -> Self {
        let assigned_ids: HashSet<i64> = assigned.iter().map(|a| a.id).collect();
        let assignable = universe
            .into_iter()
            .filter(|area| !assigned_ids.contains(&area.id))
            .collect();

        Self {
            assignable,
            original: assigned.clone(),
            selected: assigned,
        }
    }

    pub fn assignable(&self) -> &[Area] {
        &self.assignable
    }

    pub fn selected(&self) -> &[Area] {
        &self.selected
    }

    pub fn original(&self) -> &[Area] {
        &self.original
    }

    /// Assignable areas in display order
    pub fn sorted_assignable(&self) -> Vec<Area> {
        let mut areas = self.assignable.clone();
        sort_by_name(&mut areas);
        areas
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().map(|a| a.id).collect()
    }

    /// Move an area from assignable to selected. Unknown ids are ignored.
    pub fn select(&mut self, area_id: i64) -> bool {
        match self.assignable.iter().position(|a| a.id == area_id) {
            Some(idx) => {
                let area = self.assignable.remove(idx);
                self.selected.push(area);
                true
            }
            None => false,
        }
    }

    /// Put a removed area back into the assignable half
    pub fn return_to_assignable(&mut self, area: Area) {
        self.selected.retain(|a| a.id != area.id);
        self.original.retain(|a| a.id != area.id);
        if !self.assignable.iter().any(|a| a.id == area.id) {
            self.assignable.push(area);
        }
    }

    /// `saved` is now what the server holds, minus anything removed since
    pub fn mark_saved(&mut self, saved: Vec<Area>) {
        let selected = &self.selected;
        self.original = saved
            .into_iter()
            .filter(|area| selected.iter().any(|a| a.id == area.id))
            .collect();
    }

    pub fn has_unsaved_changes(&self) -> bool {
        let selected: HashSet<i64> = self.selected.iter().map(|a| a.id).collect();
        let original: HashSet<i64> = self.original.iter().map(|a| a.id).collect();
        selected != original
    }

    pub fn total(&self) -> usize {
        self.assignable.len() + self.selected.len()
    }
}
