//! Process table state: ordering, filtering, selection tracking.

use crate::model::ProcessMetrics;
use crate::ranking::{SortKey, sort_processes};

use super::navigable::Navigable;

/// Rows shown in the Processes view plus the cursor over them.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    /// Sorted and filtered rows of the current tick.
    pub rows: Vec<ProcessMetrics>,
    /// Selected row index into `rows`.
    pub selected: usize,
    /// Pid under the cursor. Follows that process across re-sorts.
    pub tracked_pid: Option<u32>,
    /// Case-insensitive name substring filter.
    pub filter: Option<String>,
    pub sort_key: SortKey,
    /// Unfiltered rows as delivered by the last tick, in enumeration order.
    source: Vec<ProcessMetrics>,
}

impl ProcessTable {
    pub fn new(sort_key: SortKey) -> Self {
        Self {
            sort_key,
            ..Default::default()
        }
    }

    /// Replaces the rows with the processes of a new tick.
    pub fn update(&mut self, processes: &[ProcessMetrics]) {
        self.source = processes.to_vec();
        self.rebuild();
    }

    pub fn set_sort(&mut self, key: SortKey) {
        if self.sort_key != key {
            self.sort_key = key;
            self.rebuild();
        }
    }

    /// Sets or clears the filter. An empty string clears it.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|f| !f.is_empty());
        self.rebuild();
    }

    pub fn selected_row(&self) -> Option<&ProcessMetrics> {
        self.rows.get(self.selected)
    }

    pub fn selected_pid(&self) -> Option<u32> {
        self.selected_row().map(|p| p.pid)
    }

    /// Total rows before filtering.
    pub fn total(&self) -> usize {
        self.source.len()
    }

    fn rebuild(&mut self) {
        let needle = self.filter.as_ref().map(|f| f.to_lowercase());
        self.rows = self
            .source
            .iter()
            .filter(|p| match &needle {
                Some(n) => p.name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        sort_processes(&mut self.rows, self.sort_key);
        self.resolve_selection();
    }

    /// Moves `selected` onto the tracked pid when it is still listed,
    /// otherwise clamps it into the current rows. Then re-tracks whatever
    /// row ends up under the cursor.
    pub fn resolve_selection(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            self.selected = 0;
            self.tracked_pid = None;
            return;
        }

        if let Some(pid) = self.tracked_pid {
            match self.rows.iter().position(|p| p.pid == pid) {
                Some(pos) => self.selected = pos,
                None => {
                    self.tracked_pid = None;
                    self.selected = self.selected.min(len - 1);
                }
            }
        } else {
            self.selected = self.selected.min(len - 1);
        }

        self.tracked_pid = self.rows.get(self.selected).map(|p| p.pid);
    }
}

impl Navigable for ProcessTable {
    fn cursor(&self) -> usize {
        self.selected
    }

    fn cursor_mut(&mut self) -> &mut usize {
        &mut self.selected
    }

    fn forget_tracked(&mut self) {
        self.tracked_pid = None;
    }
}
