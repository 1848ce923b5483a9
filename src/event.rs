//! Notifications for rendering and audio collaborators.

use crate::cell::{Cell, GridPos};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Merge,
    Special,
    LevelUp,
}

/// State changes queued on the game state until drained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    CellChanged { pos: GridPos, cell: Cell },
    /// Current drag path, for line drawing. Empty once the drag ends.
    PathChanged { path: Vec<GridPos> },
    SpecialSpawned { pos: GridPos },
    ScoreChanged { score: u64 },
    LevelChanged { level: u32 },
    Sound { cue: SoundCue },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tagged() {
        let ev = GameEvent::ScoreChanged { score: 12 };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"type":"score_changed","score":12}"#);

        let ev = GameEvent::Sound { cue: SoundCue::LevelUp };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"type":"sound","cue":"level_up"}"#);
    }

    #[test]
    fn cell_changed_carries_kind() {
        let pos = GridPos::new(1, 0);
        let ev = GameEvent::CellChanged {
            pos,
            cell: Cell::special(pos),
        };
        let v: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(v["cell"]["kind"]["kind"], "special");
        assert_eq!(v["pos"]["x"], 1);
    }
}
