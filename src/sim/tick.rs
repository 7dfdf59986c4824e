//! Fixed timestep simulation tick
//!
//! One call to [`tick`] is one simulation step. Within a step the layout is
//! checked first, then the paddle moves, then the ball is resolved against
//! the updated paddle and grid, then the primary action is handled.

use glam::Vec2;

use super::state::{GamePhase, GameSession};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Playfield size reported by the host this tick
    pub playfield: Vec2,
    /// Pointer x position, if the pointer moved or is known
    pub pointer_x: Option<f32>,
    /// Primary action (click/tap) released this tick
    pub primary_action: bool,
    /// Reset button pressed
    pub reset: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.reset {
        session.reset();
        return;
    }

    session.playfield = input.playfield;
    if !check_layout(session) {
        return;
    }

    session.time_ticks += 1;

    let phase = session.current_phase();
    session.grid.update_animations(phase, dt);

    if let Some(x) = input.pointer_x {
        session.paddle.set_target_center_x(x);
    }
    let paddle_y = session.layout.paddle_y(session.playfield);
    session.paddle.advance(session.playfield.x, paddle_y);

    session.step_ball(dt);
    session.decay_flashes(dt);

    if input.primary_action && session.current_phase() == GamePhase::Ready {
        session.on_play();
    }
}

/// Pause on an unusable playfield and resume once it recovers.
/// Returns whether the simulation may run this tick.
fn check_layout(session: &mut GameSession) -> bool {
    let valid = session.layout.is_valid(session.playfield);
    let paused = session.current_phase() == GamePhase::LayoutError;

    if valid && paused {
        session.phase.unpause();
    } else if !valid && !paused {
        log::warn!(
            "Playfield {}x{} below minimum {}x{}",
            session.playfield.x,
            session.playfield.y,
            session.layout.min_width,
            session.layout.min_height
        );
        session.phase.pause(GamePhase::LayoutError);
    }

    !session.phase.is_paused()
}

/// Fixed timestep accumulator for variable frame times
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Number of [`SIM_DT`] ticks to run for a frame of `frame_dt` seconds
    pub fn steps(&mut self, frame_dt: f32) -> u32 {
        // Long stalls (debugger, background tab) are dropped, not replayed
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}
