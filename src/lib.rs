//! Number Connect: drag a path through equal numbers to merge them into their sum.
//!
//! The crate holds the game-state engine only. Rendering and audio are left to
//! whoever drains [`GameEvent`]s from a [`GameState`].
//!
//! ```
//! use numconnect::{GameConfig, GameState, GridPos};
//!
//! let config = GameConfig { seed: Some(7), ..GameConfig::default() };
//! let mut game = GameState::new(config).unwrap();
//! let start = game.slot_centre(GridPos::new(0, 0));
//! game.on_drag_start(start);
//! game.on_drag_end();
//! assert_eq!(game.score(), 0);
//! ```

pub mod cell;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod event;
pub mod game;
pub mod grid;
pub mod input;
pub mod merge;
pub mod report;
pub mod selection;
pub mod spawner;

pub use cell::{Cell, CellKind, GridPos};
pub use config::GameConfig;
pub use error::{ConfigError, GridError, ScriptError};
pub use event::{GameEvent, SoundCue};
pub use game::{DragOutcome, GameState, Point};
pub use grid::Grid;
pub use input::{PointerEvent, parse_script};
pub use merge::MergeOutcome;
pub use report::{HighScoreFile, JsonReporter, ScoreReporter, SessionReport};
pub use selection::{DragState, Path, SelectionRule, SelectionTracker};
