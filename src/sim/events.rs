//! Named simulation events
//!
//! The simulation never plays sounds or draws anything. It records what
//! happened as [`GameEvent`]s; audio and presentation layers subscribe
//! through an [`EventSink`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Playfield frame edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl FrameEdge {
    pub const ALL: [FrameEdge; 4] = [
        FrameEdge::Top,
        FrameEdge::Right,
        FrameEdge::Bottom,
        FrameEdge::Left,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameEdge::Top => "top",
            FrameEdge::Right => "right",
            FrameEdge::Bottom => "bottom",
            FrameEdge::Left => "left",
        }
    }

    /// Stable index for per-edge arrays
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the paddle
    PaddleHit,
    /// Ball broke the block at (column, row)
    BlockBreak { column: usize, row: usize },
    /// Ball touched a frame edge
    FrameHit(FrameEdge),
    /// Ball launched from the paddle
    PlayStart,
    /// Every block is broken
    Clear,
    /// Ball was lost
    GameOver,
}

impl GameEvent {
    /// Event name as seen by audio/presentation collaborators
    pub fn name(&self) -> String {
        match self {
            GameEvent::PaddleHit => "paddle-hit".to_string(),
            GameEvent::BlockBreak { .. } => "block-break".to_string(),
            GameEvent::FrameHit(edge) => format!("frame-hit:{}", edge.as_str()),
            GameEvent::PlayStart => "play-start".to_string(),
            GameEvent::Clear => "clear".to_string(),
            GameEvent::GameOver => "game-over".to_string(),
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Receiver of simulation events
pub trait EventSink {
    fn emit(&mut self, event: &GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn emit(&mut self, event: &GameEvent) {
        self(event)
    }
}
