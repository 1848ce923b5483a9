//! App: session setup, pointer-event replay, and event output.

use anyhow::{Context, Result};
use numconnect::{GameConfig, GameEvent, GameState, Point, PointerEvent, SessionReport};
use std::io::Write;
use tracing::{debug, info};

/// Where script coordinates live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coords {
    /// Logical pixels, as a pointer device reports them.
    #[default]
    Pixels,
    /// Column and row; mapped to the slot centre.
    Cells,
}

pub struct App<W: Write> {
    state: GameState,
    coords: Coords,
    /// Every game event as a JSON line, when set.
    event_out: Option<W>,
    finished: bool,
}

impl<W: Write> App<W> {
    pub fn new(config: GameConfig, coords: Coords, event_out: Option<W>) -> Result<Self> {
        let state = GameState::new(config).context("invalid game configuration")?;
        info!(
            width = state.grid().width(),
            height = state.grid().height(),
            "session started"
        );
        Ok(Self {
            state,
            coords,
            event_out,
            finished: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn to_point(&self, p: Point) -> Point {
        match self.coords {
            Coords::Pixels => p,
            Coords::Cells => {
                let config = self.state.config();
                let half = config.cell_size / 2.0;
                Point::new(
                    p.x.floor() * config.pitch() + half,
                    p.y.floor() * config.pitch() + half,
                )
            }
        }
    }

    /// Feed one pointer event. Returns false once the script asked to end.
    pub fn apply(&mut self, event: PointerEvent) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }
        match event {
            PointerEvent::Down(p) => {
                let p = self.to_point(p);
                self.state.on_drag_start(p);
            }
            PointerEvent::Move(p) => {
                let p = self.to_point(p);
                self.state.on_drag_move(p);
            }
            PointerEvent::Up => {
                if let Some(outcome) = self.state.on_drag_end() {
                    debug!(?outcome, score = self.state.score(), "drag finished");
                }
            }
            PointerEvent::End => self.finished = true,
        }
        self.flush_events()?;
        Ok(!self.finished)
    }

    fn flush_events(&mut self) -> Result<()> {
        for event in self.state.drain_events() {
            log_event(&event);
            if let Some(out) = self.event_out.as_mut() {
                serde_json::to_writer(&mut *out, &event)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Replay `events` until the end (or an `end` line) and return the report.
    pub fn run(&mut self, events: &[PointerEvent]) -> Result<SessionReport> {
        for &event in events {
            if !self.apply(event)? {
                break;
            }
        }
        if let Some(out) = self.event_out.as_mut() {
            out.flush()?;
        }
        let report = self.state.end_session();
        info!(
            score = report.score,
            level = report.level,
            merges = report.merges,
            drags = report.drags,
            "session ended"
        );
        Ok(report)
    }

    pub fn into_event_out(self) -> Option<W> {
        self.event_out
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LevelChanged { level } => info!(level, "level changed"),
        GameEvent::SpecialSpawned { pos } => info!(%pos, "special spawned"),
        GameEvent::ScoreChanged { score } => debug!(score, "score changed"),
        other => tracing::trace!(?other, "event"),
    }
}
