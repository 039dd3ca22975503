use crate::domain::{LifeEngine, Rule};
use crate::rendering::{DisplayWindow, InstanceBufferCache, SyncOutcome};

use super::{BackgroundCompute, PatternSource, SessionConfig, SessionError};

/// Session orchestrates one run: the engine, the render cache and the
/// window the UI has selected. This is the application layer that
/// coordinates domain logic for the frame loop.
pub struct Session {
    pub engine: LifeEngine,
    pub cache: InstanceBufferCache,
    pub window: DisplayWindow,
    pub config: SessionConfig,
    /// Keep the window spanning the whole history as it grows
    pub follow_history: bool,
    pending: Option<BackgroundCompute>,
    pub last_compute_time_ms: f32,
    pub last_sync_time_ms: f32,
}

impl Session {
    /// Seed generation 0 from the config and start computing the rest
    pub fn from_config(config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_cache(config, InstanceBufferCache::new())
    }

    /// Same as [`Session::from_config`] with a caller-sized arena
    pub fn with_cache(config: SessionConfig, cache: InstanceBufferCache) -> Result<Self, SessionError> {
        let engine = Self::seeded_engine(&config)?;
        let mut session = Self {
            window: DisplayWindow::full(engine.history().len()),
            engine,
            cache,
            config,
            follow_history: true,
            pending: None,
            last_compute_time_ms: 0.0,
            last_sync_time_ms: 0.0,
        };
        session.start_compute();
        Ok(session)
    }

    fn seeded_engine(config: &SessionConfig) -> Result<LifeEngine, SessionError> {
        let cells = config.pattern.cells()?;
        let mut engine = LifeEngine::new(config.grid_size)
            .with_toroidal(config.toroidal)
            .with_rule(config.rule)
            .with_algorithm(config.algorithm);
        engine.initialize_from_pattern(&cells)?;
        log::info!(
            "seeded {}x{} {} grid with {} cells, rule {}",
            config.grid_size,
            config.grid_size,
            if config.toroidal { "toroidal" } else { "bounded" },
            engine.latest().map_or(0, |g| g.population()),
            config.rule
        );
        Ok(engine)
    }

    /// Hand a copy of the engine to a worker. Any job still running is
    /// abandoned; its result is dropped when it arrives.
    fn start_compute(&mut self) {
        let remaining = self.config.generations;
        self.pending = Some(BackgroundCompute::spawn(self.engine.clone(), remaining));
    }

    pub fn is_computing(&self) -> bool {
        self.pending.is_some()
    }

    /// Swap in a finished engine if the worker is done.
    /// Returns true when the history changed.
    pub fn poll(&mut self) -> bool {
        let Some(job) = &self.pending else {
            return false;
        };
        match job.try_finish() {
            Ok(Some(engine)) => {
                self.last_compute_time_ms = job.elapsed_ms();
                self.install(engine);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("generation worker ended without a result: {}", e);
                self.pending = None;
                false
            }
        }
    }

    /// Block until the pending job finishes and install it
    pub fn wait(&mut self) -> bool {
        let Some(job) = self.pending.take() else {
            return false;
        };
        let started = job.started();
        match job.wait() {
            Some(engine) => {
                self.last_compute_time_ms = started.elapsed().as_secs_f32() * 1000.0;
                self.install(engine);
                true
            }
            None => false,
        }
    }

    fn install(&mut self, engine: LifeEngine) {
        self.pending = None;
        self.engine = engine;
        self.cache.invalidate();
        if self.follow_history {
            self.window = DisplayWindow::full(self.engine.history().len());
        }
        log::info!(
            "history ready: {} generations in {:.1}ms",
            self.engine.history().len(),
            self.last_compute_time_ms
        );
    }

    /// Switch rule and recompute from the same seed
    pub fn set_rule(&mut self, rule: Rule) -> Result<(), SessionError> {
        self.reconfigure(SessionConfig { rule, ..self.config.clone() })
    }

    /// Switch edge policy and recompute from the same seed
    pub fn set_toroidal(&mut self, toroidal: bool) -> Result<(), SessionError> {
        self.reconfigure(SessionConfig { toroidal, ..self.config.clone() })
    }

    /// Reseed from a different pattern source
    pub fn set_pattern(&mut self, pattern: PatternSource) -> Result<(), SessionError> {
        self.reconfigure(SessionConfig { pattern, ..self.config.clone() })
    }

    /// Discard the history and rebuild it from the configured seed
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.reconfigure(self.config.clone())
    }

    /// Seed from `next` and adopt it. On error the running engine and
    /// config stay as they were.
    pub fn reconfigure(&mut self, next: SessionConfig) -> Result<(), SessionError> {
        self.engine = Self::seeded_engine(&next)?;
        self.config = next;
        self.cache.invalidate();
        if self.follow_history {
            self.window = DisplayWindow::full(self.engine.history().len());
        }
        self.start_compute();
        Ok(())
    }

    /// Pin the window to an explicit range
    pub fn set_window(&mut self, start: i64, end: i64) {
        self.follow_history = false;
        self.window = DisplayWindow::new(start, end);
    }

    /// Follow the whole history again
    pub fn show_all(&mut self) {
        self.follow_history = true;
        self.window = DisplayWindow::full(self.engine.history().len());
    }

    /// Slide the pinned window along the history
    pub fn slide_window(&mut self, delta: i64) {
        self.follow_history = false;
        self.window = self.window.slide(delta, self.engine.history().len());
    }

    /// Bring the cache in line with the current history and window
    pub fn sync(&mut self) -> SyncOutcome {
        let start = std::time::Instant::now();
        let outcome = self
            .cache
            .sync(self.engine.history(), self.window.start, self.window.end);
        if outcome != SyncOutcome::Unchanged {
            self.last_sync_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        }
        outcome
    }
}
