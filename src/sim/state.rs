//! Game state and core simulation types
//!
//! A [`GameSession`] owns everything one game needs: the ball, paddle, block
//! grid, phase machine and the queue of events raised since the last drain.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::blocks::BlockGrid;
use super::collision::{Resolution, reflect_blocks, reflect_frame, reflect_paddle};
use super::events::{EventSink, FrameEdge, GameEvent};
use super::layout::Layout;
use super::paddle::Paddle;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball parked on the paddle, waiting for the first click
    Ready,
    /// Active gameplay
    Playing,
    /// Every block broken
    Clear,
    /// Ball lost
    GameOver,
    /// Playfield too small; overlays whatever phase was current
    LayoutError,
}

impl GamePhase {
    /// No further gameplay transitions happen from these phases
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Clear | GamePhase::GameOver)
    }

    /// Message shown to the player for this phase
    pub fn banner(self) -> Option<&'static str> {
        match self {
            GamePhase::Ready => Some("Click to Start"),
            GamePhase::Playing => None,
            GamePhase::Clear => Some("Game Clear!"),
            GamePhase::GameOver => Some("Game Over..."),
            GamePhase::LayoutError => Some("Window size is too small."),
        }
    }
}

/// Phase transitions with guarded, idempotent entry points
///
/// Out-of-phase calls are ignored rather than treated as errors, so duplicate
/// or late signals (two game-over triggers in one tick, a click after the
/// game ended) are harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseMachine {
    current: GamePhase,
    /// Phase to restore when the pause overlay lifts
    resume_to: Option<GamePhase>,
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self {
            current: GamePhase::Ready,
            resume_to: None,
        }
    }
}

impl PhaseMachine {
    pub fn current(&self) -> GamePhase {
        self.current
    }

    pub fn is_paused(&self) -> bool {
        self.resume_to.is_some()
    }

    /// Show `overlay` on top of the current phase. No-op while already paused.
    pub fn pause(&mut self, overlay: GamePhase) {
        if self.is_paused() {
            return;
        }
        log::warn!("Paused {:?} with {:?}", self.current, overlay);
        self.resume_to = Some(self.current);
        self.current = overlay;
    }

    /// Restore the phase saved by [`PhaseMachine::pause`]
    pub fn unpause(&mut self) {
        if let Some(phase) = self.resume_to.take() {
            log::info!("Resumed {:?}", phase);
            self.current = phase;
        }
    }

    /// Ready -> Playing
    pub fn on_play(&mut self) -> Option<GameEvent> {
        self.transition(GamePhase::Ready, GamePhase::Playing, GameEvent::PlayStart)
    }

    /// Playing -> Clear
    pub fn on_clear(&mut self) -> Option<GameEvent> {
        self.transition(GamePhase::Playing, GamePhase::Clear, GameEvent::Clear)
    }

    /// Playing -> GameOver
    pub fn on_game_over(&mut self) -> Option<GameEvent> {
        self.transition(GamePhase::Playing, GamePhase::GameOver, GameEvent::GameOver)
    }

    fn transition(&mut self, from: GamePhase, to: GamePhase, event: GameEvent) -> Option<GameEvent> {
        if self.current != from {
            return None;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.current = to;
        Some(event)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    /// Unit direction, or zero once stopped
    pub direction: Vec2,
    pub radius: f32,
    /// Pixels per second
    pub speed: f32,
}

impl Ball {
    /// Ball parked off-screen, aimed up and to the right
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            position: Vec2::from(BALL_SENTINEL),
            direction: Vec2::new(1.0, -1.0).normalize(),
            radius: tuning.ball_radius,
            speed: tuning.ball_speed,
        }
    }

    /// Where the ball rests before launch: centered above the paddle
    pub fn ready_position(&self, paddle: &Paddle) -> Vec2 {
        let rect = paddle.hit_rect();
        Vec2::new(rect.center().x, rect.y_min() - self.radius)
    }
}

/// One game: all mutable simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub tuning: Tuning,
    pub layout: Layout,
    /// Playfield size from the most recent tick
    pub playfield: Vec2,
    pub phase: PhaseMachine,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: BlockGrid,
    /// Frame edge flash intensities (0-1), indexed by [`FrameEdge::index`]
    pub edge_flash: [f32; 4],
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(tuning: Tuning) -> Self {
        Self::with_layout(tuning, Layout::default())
    }

    pub fn with_layout(tuning: Tuning, layout: Layout) -> Self {
        let tuning = tuning.sanitized();
        Self {
            ball: Ball::new(&tuning),
            paddle: Paddle::new(&tuning),
            tuning,
            layout,
            playfield: Vec2::ZERO,
            phase: PhaseMachine::default(),
            grid: BlockGrid::new(),
            edge_flash: [0.0; 4],
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start over with a fresh grid, paddle and ball
    pub fn reset(&mut self) {
        log::info!("Session reset after {} ticks", self.time_ticks);
        *self = Self::with_layout(self.tuning.clone(), self.layout);
    }

    pub fn current_phase(&self) -> GamePhase {
        self.phase.current()
    }

    /// Events raised since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver all pending events to `sink`
    pub fn dispatch(&mut self, sink: &mut impl EventSink) {
        for event in self.take_events() {
            sink.emit(&event);
        }
    }

    fn emit(&mut self, event: Option<GameEvent>) {
        if let Some(event) = event {
            self.events.push(event);
        }
    }

    /// Ready -> Playing on the player's primary action
    pub fn on_play(&mut self) {
        let event = self.phase.on_play();
        self.emit(event);
    }

    pub fn on_clear(&mut self) {
        let event = self.phase.on_clear();
        self.emit(event);
    }

    pub fn on_game_over(&mut self) {
        let event = self.phase.on_game_over();
        self.emit(event);
    }

    /// Advance the ball by one tick under the current phase
    pub fn step_ball(&mut self, dt: f32) {
        match self.phase.current() {
            GamePhase::Ready => {
                self.ball.position = self.ball.ready_position(&self.paddle);
            }
            GamePhase::Playing => {
                self.move_ball(dt);

                // Secondary guard: well below the paddle counts as lost too
                let limit = self.paddle.hit_rect().y_max() + self.tuning.out_of_bounds_margin;
                if self.ball.position.y > limit {
                    self.on_game_over();
                }
            }
            GamePhase::Clear | GamePhase::GameOver | GamePhase::LayoutError => {}
        }
    }

    /// Integrate and resolve collisions: paddle, then blocks, then frame
    fn move_ball(&mut self, dt: f32) {
        let pre_pos = self.ball.position;
        let radius = self.ball.radius;
        let next_pos = pre_pos + self.ball.direction * (self.ball.speed * dt);

        let paddle = reflect_paddle(
            pre_pos,
            next_pos,
            radius,
            self.ball.direction,
            self.paddle.hit_rect(),
            self.paddle.average_velocity(),
            &self.tuning,
        );
        self.apply(&paddle);

        let blocks = reflect_blocks(
            pre_pos,
            paddle.position,
            radius,
            paddle.direction,
            &self.grid,
            self.playfield,
            &self.layout,
        );
        self.apply(&blocks);

        let frame = reflect_frame(blocks.position, radius, blocks.direction, self.playfield);
        self.apply(&frame);

        self.ball.position = frame.position;
        self.ball.direction = frame.direction;
    }

    /// Apply a stage's side effects: events, flashes, broken blocks, phase changes
    fn apply(&mut self, resolution: &Resolution) {
        for event in &resolution.events {
            match event {
                GameEvent::PaddleHit => self.paddle.trigger_flash(),
                GameEvent::FrameHit(edge) => self.edge_flash[edge.index()] = 1.0,
                _ => {}
            }
            self.events.push(*event);
        }

        if let Some((column, row)) = resolution.broken_cell
            && self.grid.break_cell(column, row)
        {
            self.on_clear();
        }

        if resolution.ball_lost {
            self.on_game_over();
        }
    }

    /// Decay paddle and frame flashes
    pub fn decay_flashes(&mut self, dt: f32) {
        self.paddle.decay_flash(dt);
        for edge in FrameEdge::ALL {
            let flash = &mut self.edge_flash[edge.index()];
            *flash = (*flash - dt / EDGE_FLASH_DURATION).max(0.0);
        }
    }

    /// Flash intensity of one frame edge
    pub fn edge_flash(&self, edge: FrameEdge) -> f32 {
        self.edge_flash[edge.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::blocks::GRID_SIZE;

    fn playing_session() -> GameSession {
        let mut session = GameSession::new(Tuning::default());
        session.playfield = Vec2::new(400.0, 600.0);
        session.paddle.set_target_center_x(200.0);
        session.paddle.advance(400.0, 400.0);
        session.on_play();
        session.take_events();
        session
    }

    #[test]
    fn test_initial_state() {
        let session = GameSession::new(Tuning::default());
        assert_eq!(session.current_phase(), GamePhase::Ready);
        assert_eq!(session.ball.position, Vec2::new(-100.0, -100.0));
        assert!((session.ball.direction.length() - 1.0).abs() < 1e-6);
        assert!(session.ball.direction.x > 0.0 && session.ball.direction.y < 0.0);
    }

    #[test]
    fn test_on_play_only_from_ready() {
        let mut phase = PhaseMachine::default();
        assert_eq!(phase.on_play(), Some(GameEvent::PlayStart));
        assert_eq!(phase.current(), GamePhase::Playing);
        assert_eq!(phase.on_play(), None);
        assert_eq!(phase.current(), GamePhase::Playing);
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut phase = PhaseMachine::default();
        phase.on_play();
        assert_eq!(phase.on_game_over(), Some(GameEvent::GameOver));
        assert_eq!(phase.on_game_over(), None);
        assert_eq!(phase.on_clear(), None);
        assert_eq!(phase.current(), GamePhase::GameOver);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut phase = PhaseMachine::default();
        phase.on_play();
        assert_eq!(phase.on_clear(), Some(GameEvent::Clear));
        assert_eq!(phase.on_clear(), None);
        assert_eq!(phase.on_game_over(), None);
        assert_eq!(phase.current(), GamePhase::Clear);
    }

    #[test]
    fn test_terminal_transitions_need_playing() {
        let mut phase = PhaseMachine::default();
        assert_eq!(phase.on_clear(), None);
        assert_eq!(phase.on_game_over(), None);
        assert_eq!(phase.current(), GamePhase::Ready);
    }

    #[test]
    fn test_pause_restores_previous_phase() {
        let mut phase = PhaseMachine::default();
        phase.on_play();
        phase.pause(GamePhase::LayoutError);
        assert_eq!(phase.current(), GamePhase::LayoutError);
        assert!(phase.is_paused());

        // Transitions are suppressed while the overlay is up
        assert_eq!(phase.on_game_over(), None);

        phase.pause(GamePhase::LayoutError);
        phase.unpause();
        assert_eq!(phase.current(), GamePhase::Playing);
        assert!(!phase.is_paused());

        phase.unpause();
        assert_eq!(phase.current(), GamePhase::Playing);
    }

    #[test]
    fn test_ready_ball_parks_above_paddle() {
        let mut session = GameSession::new(Tuning::default());
        session.paddle.set_target_center_x(200.0);
        session.paddle.advance(400.0, 400.0);
        session.step_ball(SIM_DT);

        let rect = session.paddle.hit_rect();
        assert_eq!(session.ball.position, Vec2::new(200.0, rect.y_min() - BALL_RADIUS));
    }

    #[test]
    fn test_playing_ball_moves() {
        let mut session = playing_session();
        session.ball.position = Vec2::new(200.0, 300.0);
        session.ball.direction = Vec2::new(0.0, -1.0);
        session.step_ball(0.1);

        assert!((session.ball.position.y - 270.0).abs() < 1e-3);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_bottom_frame_ends_game_once() {
        let mut session = playing_session();
        // Move the paddle away so only the frame can catch the ball
        session.paddle.set_target_center_x(0.0);
        session.paddle.advance(400.0, 400.0);
        session.ball.position = Vec2::new(300.0, 590.0);
        session.ball.direction = Vec2::new(0.6, 0.8);
        session.step_ball(0.1);

        assert_eq!(session.current_phase(), GamePhase::GameOver);
        assert_eq!(session.ball.direction, Vec2::ZERO);
        let events = session.take_events();
        assert_eq!(
            events,
            vec![GameEvent::FrameHit(FrameEdge::Bottom), GameEvent::GameOver]
        );

        let frozen = session.ball.position;
        session.step_ball(0.1);
        assert_eq!(session.ball.position, frozen);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_secondary_guard_ends_game() {
        let mut session = playing_session();
        session.paddle.set_target_center_x(0.0);
        session.paddle.advance(400.0, 400.0);
        // Below paddle y_max (417) + 40 but above the bottom frame
        session.ball.position = Vec2::new(300.0, 460.0);
        session.ball.direction = Vec2::new(0.0, 1.0);
        session.step_ball(0.01);

        assert_eq!(session.current_phase(), GamePhase::GameOver);
        assert_eq!(session.take_events(), vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_paddle_bounce_flashes_paddle() {
        let mut session = playing_session();
        let rect = session.paddle.hit_rect();
        session.ball.position = Vec2::new(200.0, rect.y_min() - BALL_RADIUS - 1.0);
        session.ball.direction = Vec2::new(0.0, 1.0);
        session.step_ball(0.01);

        assert!(session.ball.direction.y < 0.0);
        assert_eq!(session.paddle.flash, 1.0);
        assert_eq!(session.take_events(), vec![GameEvent::PaddleHit]);
    }

    #[test]
    fn test_moving_paddle_spins_bounce() {
        let mut session = playing_session();
        for x in [210.0, 220.0, 230.0] {
            session.paddle.set_target_center_x(x);
            session.paddle.advance(400.0, 400.0);
        }
        assert_eq!(session.paddle.average_velocity(), 10.0);

        let rect = session.paddle.hit_rect();
        session.ball.position = Vec2::new(230.0, rect.y_min() - BALL_RADIUS - 1.0);
        session.ball.direction = Vec2::new(0.0, 1.0);
        session.step_ball(0.01);

        assert_eq!(session.take_events(), vec![GameEvent::PaddleHit]);
        let expected = crate::rotate_degrees(crate::LAUNCH_AXIS, -10.0 * SPIN_DEGREES_PER_PX);
        assert!(session.ball.direction.abs_diff_eq(expected, 1e-5));
        assert!(session.ball.direction.x < 0.0);
    }

    #[test]
    fn test_edge_flashes_decay() {
        let mut session = playing_session();
        session.edge_flash = [1.0; 4];
        session.decay_flashes(EDGE_FLASH_DURATION / 2.0);
        for edge in FrameEdge::ALL {
            assert!((session.edge_flash(edge) - 0.5).abs() < 1e-5);
        }
        session.decay_flashes(1.0);
        assert_eq!(session.edge_flash, [0.0; 4]);
    }

    #[test]
    fn test_block_hit_stalls_ball_one_tick() {
        let mut session = playing_session();
        let rects = session.grid.hit_rects(session.playfield, &session.layout);
        let target = rects[7 * GRID_SIZE + 4];
        let start = Vec2::new(target.center().x, target.y_max() + BALL_RADIUS + 1.0);
        session.ball.position = start;
        session.ball.direction = Vec2::new(0.0, -1.0);
        session.step_ball(0.01);

        assert_eq!(session.ball.position, start);
        assert_eq!(session.ball.direction, Vec2::new(0.0, 1.0));
        assert!(!session.grid.is_alive(4, 7));
        assert_eq!(
            session.take_events(),
            vec![GameEvent::BlockBreak { column: 4, row: 7 }]
        );
    }

    #[test]
    fn test_last_block_clears_once() {
        let mut session = playing_session();
        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                if (column, row) != (4, 7) {
                    session.grid.break_cell(column, row);
                }
            }
        }
        let rects = session.grid.hit_rects(session.playfield, &session.layout);
        let target = rects[7 * GRID_SIZE + 4];
        session.ball.position = Vec2::new(target.center().x, target.y_max() + BALL_RADIUS + 1.0);
        session.ball.direction = Vec2::new(0.0, -1.0);
        session.step_ball(0.01);

        assert_eq!(session.current_phase(), GamePhase::Clear);
        assert_eq!(
            session.take_events(),
            vec![GameEvent::BlockBreak { column: 4, row: 7 }, GameEvent::Clear]
        );

        // Further breaks and losses change nothing
        session.grid.break_cell(4, 7);
        session.on_clear();
        session.on_game_over();
        assert_eq!(session.current_phase(), GamePhase::Clear);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut session = playing_session();
        session.grid.break_cell(0, 0);
        session.on_game_over();
        session.time_ticks = 99;
        session.reset();

        assert_eq!(session.current_phase(), GamePhase::Ready);
        assert!(session.grid.is_alive(0, 0));
        assert_eq!(session.paddle.history_len(), 0);
        assert_eq!(session.time_ticks, 0);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_dispatch_drains_in_order() {
        let mut session = GameSession::new(Tuning::default());
        session.on_play();
        session.on_game_over();

        let mut received: Vec<GameEvent> = Vec::new();
        session.dispatch(&mut received);
        assert_eq!(received, vec![GameEvent::PlayStart, GameEvent::GameOver]);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_flashes_decay() {
        let mut session = GameSession::new(Tuning::default());
        session.edge_flash[FrameEdge::Left.index()] = 1.0;
        session.decay_flashes(0.15);
        assert!((session.edge_flash(FrameEdge::Left) - 0.5).abs() < 1e-4);
        session.decay_flashes(1.0);
        assert_eq!(session.edge_flash(FrameEdge::Left), 0.0);
    }
}
