//! Selection tracker: the drag path state machine (Idle / Dragging).

use crate::cell::{Cell, GridPos};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which cells may follow the last cell of the path.
///
/// `Free` is the classic rule: any cell the pointer passes over joins as long
/// as its value matches, wherever it sits, and cells earlier in the path may be
/// entered again. The other two additionally require grid adjacency to the
/// last cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    #[default]
    Free,
    /// 4-neighbour of the last cell.
    Orthogonal,
    /// 8-neighbour of the last cell.
    #[value(alias = "eight")]
    Diagonal,
}

impl SelectionRule {
    fn admits(self, last: GridPos, next: GridPos) -> bool {
        match self {
            Self::Free => true,
            Self::Orthogonal => last.is_orthogonal_neighbour(next),
            Self::Diagonal => last.is_neighbour(next),
        }
    }
}

/// Ordered cells of one drag. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<GridPos>,
    /// Value of the first numeric cell; `None` while only specials were picked.
    match_value: Option<u32>,
}

impl Path {
    fn start(cell: &Cell) -> Self {
        Self {
            cells: vec![cell.pos],
            match_value: cell.value(),
        }
    }

    pub fn cells(&self) -> &[GridPos] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> GridPos {
        self.cells[0]
    }

    pub fn last(&self) -> GridPos {
        self.cells[self.cells.len() - 1]
    }

    pub fn match_value(&self) -> Option<u32> {
        self.match_value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Path),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    state: DragState,
    rule: SelectionRule,
}

impl SelectionTracker {
    pub fn new(rule: SelectionRule) -> Self {
        Self {
            state: DragState::Idle,
            rule,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn rule(&self) -> SelectionRule {
        self.rule
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Active path, if dragging.
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(p) => Some(p),
        }
    }

    /// Begin (or restart) a path at `cell`.
    pub fn start(&mut self, cell: &Cell) {
        debug!(pos = %cell.pos, value = %cell, "drag started");
        self.state = DragState::Dragging(Path::start(cell));
    }

    /// Try to append `cell`. Returns true if the path grew.
    pub fn extend(&mut self, cell: &Cell) -> bool {
        let DragState::Dragging(path) = &mut self.state else {
            return false;
        };
        let last = path.last();
        if cell.pos == last || !cell.matches(path.match_value) || !self.rule.admits(last, cell.pos) {
            return false;
        }
        if path.match_value.is_none() {
            path.match_value = cell.value();
        }
        path.cells.push(cell.pos);
        debug!(pos = %cell.pos, len = path.cells.len(), "path extended");
        true
    }

    /// End the drag, handing back the path if one was in progress.
    pub fn finish(&mut self) -> Option<Path> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging(path) => Some(path),
        }
    }
}
