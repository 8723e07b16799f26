// session.rs - Play/pause/edit state machine layered over the engine
//
// The host drives time: it calls `poll(now)` from its frame loop or timer
// and the session fires at most one step per call. Stopping drops the
// ticker, so nothing steps again until `start`.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::SessionConfig;
use crate::engine::Generations;
use crate::grid::{CellCoord, Grid};
use crate::history::CycleDetector;
use crate::patterns::Pattern;
use crate::render::{CellChange, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Periodic timer handle. A session holds at most one.
#[derive(Debug, Clone, Copy)]
struct Ticker {
    next_due: Instant,
}

impl Ticker {
    fn armed(now: Instant, period: Duration) -> Self {
        Self { next_due: now + period }
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }
}

pub struct Session<R: Renderer> {
    generations: Generations,
    state: RunState,
    ticker: Option<Ticker>,
    interval: Duration,
    seed_density: f64,
    stop_on_cycle: bool,
    generation: u64,
    history: CycleDetector,
    cycle_detected: bool,
    rng: StdRng,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    /// Build a session from `config` and paint the initial board.
    ///
    /// Panics on a zero dimension or zero interval; run
    /// [`SessionConfig::validate`] first for untrusted input.
    pub fn new(config: &SessionConfig, renderer: R) -> Self {
        assert!(config.interval_ms > 0, "step interval must be positive");
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            generations: Generations::new(config.rows, config.cols),
            state: RunState::Idle,
            ticker: None,
            interval: config.interval(),
            seed_density: config.seed_density,
            stop_on_cycle: config.stop_on_cycle,
            generation: 0,
            history: CycleDetector::new(),
            cycle_detected: false,
            rng,
            renderer,
        };
        debug!(rows = config.rows, cols = config.cols, "session created");

        if config.seed_on_start {
            session.randomize(config.seed_density);
        } else {
            session.publish();
        }
        if config.autostart {
            session.start();
        }
        session
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn grid(&self) -> &Grid {
        self.generations.current()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn seed_density(&self) -> f64 {
        self.seed_density
    }

    /// When the next step is due, or `None` while idle.
    pub fn next_due(&self) -> Option<Instant> {
        self.ticker.map(|ticker| ticker.next_due)
    }

    /// True when the last step reproduced a recently seen board.
    pub fn cycle_detected(&self) -> bool {
        self.cycle_detected
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = RunState::Running;
        self.ticker = Some(Ticker::armed(Instant::now(), self.interval));
        debug!(generation = self.generation, "session started");
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.halt();
        debug!(generation = self.generation, "session stopped");
    }

    pub fn toggle(&mut self) {
        match self.state {
            RunState::Idle => self.start(),
            RunState::Running => self.stop(),
        }
    }

    /// Change the cadence; applies from the next re-arm.
    pub fn set_interval(&mut self, interval: Duration) {
        assert!(!interval.is_zero(), "step interval must be positive");
        self.interval = interval;
    }

    /// Fire one step if running and the ticker is due. Returns whether a
    /// step happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.take_due_tick(now) {
            return false;
        }
        let live = self.generations.advance();
        self.commit_step(live);
        true
    }

    /// [`Session::poll`] with the step computed by per-row tokio tasks.
    pub async fn poll_concurrent(&mut self, now: Instant) -> bool {
        if !self.take_due_tick(now) {
            return false;
        }
        let live = self.generations.advance_concurrent().await;
        self.commit_step(live);
        true
    }

    /// Advance one generation by hand. Ignored while running.
    pub fn step_once(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        let live = self.generations.advance();
        self.commit_step(live);
        true
    }

    /// Reseed the board: a cell lives when a uniform draw exceeds
    /// `death_probability`. Run state is unchanged.
    pub fn randomize(&mut self, death_probability: f64) {
        assert!(
            (0.0..=1.0).contains(&death_probability),
            "death probability {death_probability} outside [0, 1]"
        );
        self.generations
            .current_mut()
            .fill_random(&mut self.rng, death_probability);
        self.reset_counters();
        debug!(death_probability, live = self.grid().live_count(), "grid randomized");
        self.publish();
    }

    /// Stop and kill every cell.
    pub fn clear(&mut self) {
        self.stop();
        self.generations.current_mut().clear();
        self.reset_counters();
        debug!("grid cleared");
        self.publish();
    }

    /// Replace the board with `pattern` centred on the grid. Run state is
    /// unchanged.
    pub fn load_pattern(&mut self, pattern: &Pattern) {
        let grid = self.generations.current_mut();
        grid.clear();
        let origin = pattern.centered_origin(grid);
        pattern.stamp(grid, origin);
        self.reset_counters();
        debug!(pattern = pattern.name, "pattern loaded");
        self.publish();
    }

    /// Write one cell and report just that cell to the renderer.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) {
        self.generations.current_mut().set(row, col, alive);
        self.history.reset();
        self.cycle_detected = false;
        self.renderer.on_cells_changed(&[CellChange {
            coord: CellCoord::new(row, col),
            alive,
        }]);
    }

    pub fn flip_cell(&mut self, row: usize, col: usize) {
        let alive = self.grid().get(row, col);
        self.set_cell(row, col, !alive);
    }

    fn take_due_tick(&mut self, now: Instant) -> bool {
        let interval = self.interval;
        match self.ticker.as_mut() {
            Some(ticker) if ticker.is_due(now) => {
                *ticker = Ticker::armed(now, interval);
                true
            }
            _ => false,
        }
    }

    fn commit_step(&mut self, live: usize) {
        self.generation += 1;
        trace!(generation = self.generation, live, "step");
        self.renderer
            .on_generation_computed(self.generations.current(), live);

        if live == 0 {
            self.cycle_detected = false;
            if self.is_running() {
                info!(generation = self.generation, "population extinct, stopping");
            }
            self.halt();
            return;
        }

        self.cycle_detected = self.history.check_for_cycle(self.generations.current());
        if self.cycle_detected && self.stop_on_cycle && self.is_running() {
            info!(generation = self.generation, "board repeats a recent generation, stopping");
            self.halt();
        }
    }

    fn halt(&mut self) {
        self.state = RunState::Idle;
        self.ticker = None;
    }

    fn reset_counters(&mut self) {
        self.generation = 0;
        self.history.reset();
        self.cycle_detected = false;
    }

    fn publish(&mut self) {
        let grid = self.generations.current();
        self.renderer.on_generation_computed(grid, grid.live_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    fn idle_session(rows: usize, cols: usize) -> Session<RecordingRenderer> {
        let config = SessionConfig {
            rows,
            cols,
            seed_on_start: false,
            rng_seed: Some(1),
            ..SessionConfig::default()
        };
        Session::new(&config, RecordingRenderer::default())
    }

    fn later(session: &Session<RecordingRenderer>) -> Instant {
        Instant::now() + session.interval() * 2
    }

    #[test]
    fn construction_paints_initial_board() {
        let session = idle_session(4, 4);
        assert_eq!(session.renderer().generations, vec![0]);
        assert_eq!(session.state(), RunState::Idle);
    }

    #[test]
    fn autostart_begins_running() {
        let config = SessionConfig { autostart: true, rng_seed: Some(3), ..SessionConfig::default() };
        let session = Session::new(&config, RecordingRenderer::default());
        assert!(session.is_running());
    }

    #[test]
    fn poll_before_due_does_nothing() {
        let mut session = idle_session(5, 5);
        session.set_cell(1, 1, true);
        session.start();
        assert!(!session.poll(Instant::now()));
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn poll_while_idle_never_steps() {
        let mut session = idle_session(5, 5);
        let now = later(&session);
        assert!(!session.poll(now));
    }

    #[test]
    fn one_step_per_poll() {
        let mut session = idle_session(6, 6);
        for (r, c) in [(1, 0), (1, 1), (1, 2)] {
            session.set_cell(r, c, true);
        }
        session.start();
        let now = later(&session);
        assert!(session.poll(now));
        assert!(!session.poll(now), "ticker was not re-armed");
        assert!(session.poll(now + session.interval()));
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn extinction_auto_stops() {
        let mut session = idle_session(5, 5);
        session.set_cell(2, 2, true);
        session.start();
        let now = later(&session);
        assert!(session.poll(now));
        assert_eq!(session.state(), RunState::Idle);
        assert_eq!(session.renderer().generations.last(), Some(&0));
        assert!(!session.poll(now + Duration::from_secs(60)));
    }

    #[test]
    fn extinction_clears_cycle_flag() {
        let mut session = idle_session(5, 5);
        session.set_cell(2, 2, true);
        session.cycle_detected = true;
        assert!(session.step_once());
        assert_eq!(session.grid().live_count(), 0);
        assert!(!session.cycle_detected());
    }

    #[test]
    fn step_once_ignored_while_running() {
        let mut session = idle_session(5, 5);
        session.set_cell(0, 0, true);
        session.start();
        assert!(!session.step_once());
        session.stop();
        assert!(session.step_once());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn stop_on_cycle_halts_still_life() {
        let config = SessionConfig {
            rows: 6,
            cols: 6,
            seed_on_start: false,
            stop_on_cycle: true,
            ..SessionConfig::default()
        };
        let mut session = Session::new(&config, RecordingRenderer::default());
        for (r, c) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            session.set_cell(r, c, true);
        }
        session.start();
        let mut now = later(&session);
        session.poll(now);
        assert!(session.is_running());
        now += session.interval();
        session.poll(now);
        assert!(session.cycle_detected());
        assert!(!session.is_running());
    }

    #[test]
    fn cycles_do_not_stop_by_default() {
        let mut session = idle_session(6, 6);
        for (r, c) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            session.set_cell(r, c, true);
        }
        session.start();
        let mut now = later(&session);
        for _ in 0..3 {
            session.poll(now);
            now += session.interval();
        }
        assert!(session.cycle_detected());
        assert!(session.is_running());
    }

    #[test]
    fn set_interval_applies_on_rearm() {
        let mut session = idle_session(5, 5);
        session.set_cell(1, 1, true);
        session.set_cell(1, 2, true);
        session.set_cell(2, 1, true);
        session.set_cell(2, 2, true);
        session.start();
        let now = later(&session);
        session.set_interval(Duration::from_secs(10));
        assert!(session.poll(now));
        assert!(!session.poll(now + Duration::from_secs(5)));
        assert!(session.poll(now + Duration::from_secs(10)));
    }

    #[test]
    fn load_pattern_keeps_run_state() {
        let mut session = idle_session(10, 10);
        session.load_pattern(crate::patterns::find("Glider").unwrap());
        assert_eq!(session.grid().live_count(), 5);
        assert!(!session.is_running());
        session.start();
        session.load_pattern(crate::patterns::find("Blinker").unwrap());
        assert!(session.is_running());
        assert_eq!(session.grid().live_count(), 3);
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let config = SessionConfig { rng_seed: Some(99), ..SessionConfig::default() };
        let a = Session::new(&config, RecordingRenderer::default());
        let b = Session::new(&config, RecordingRenderer::default());
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    #[should_panic]
    fn out_of_range_edit_panics() {
        let mut session = idle_session(3, 3);
        session.set_cell(3, 0, true);
    }
}
