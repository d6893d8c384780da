//=========================================================================
// Session (Frame Scheduler)
//
// Owns all per-game runtime state and drives the update/draw cycle.
//
// Lifecycle:
// ```text
//            start()              stop()
//   Idle ───────────> Running ───────────> Stopped
//                        ↑                    │
//                        └──── start() ───────┘
// ```
//
// Tick order (one call per display refresh):
// ```text
//   drain device events → dt → shake → update(dt) → clear
//        → save + translate(shake offset) → draw(canvas) → restore
//        → Continue | Exit
// ```
//
// Notes:
// The session never blocks. Device events arrive through a channel and
// are applied at the start of the tick, so one update call always sees a
// consistent input snapshot. Re-arming is the caller's job: the platform
// schedules another refresh only when `tick` returns `Continue`.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use super::assets::{AssetError, Assets};
use super::config::{Config, ConfigError};
use super::input::{InputAggregator, InputEvent};
use super::render::{Canvas, Image};
use super::shake::{Shake, DEFAULT_SHAKE_DURATION, DEFAULT_SHAKE_INTENSITY};
use super::viewport::Viewport;

//=== RunState ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, never started.
    Idle,

    /// Ticks are processed and re-armed.
    Running,

    /// Halted; pending ticks exit without doing work.
    Stopped,
}

//=== TickControl =========================================================

/// Whether the scheduler should arm another tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== SessionError ========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `start` was called while the session was already running.
    AlreadyRunning,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "Session is already running"),
        }
    }
}

impl std::error::Error for SessionError {}

//=== Callbacks ===========================================================

/// User update callback: receives the per-tick context and `dt` in seconds.
pub type UpdateFn = Box<dyn FnMut(&mut UpdateContext<'_>, f64)>;

/// User draw callback: receives the freshly cleared, shake-translated canvas.
pub type DrawFn = Box<dyn FnMut(&mut Canvas)>;

//=== UpdateContext =======================================================

/// What user code may touch during `update`.
pub struct UpdateContext<'a> {
    input: &'a InputAggregator,
    shake: &'a mut Shake,
    state: &'a mut RunState,
    assets: &'a Assets,
    logical: (u32, u32),
    next_update: &'a mut Option<UpdateFn>,
    next_draw: &'a mut Option<DrawFn>,
}

impl UpdateContext<'_> {
    pub fn input(&self) -> &InputAggregator {
        self.input
    }

    pub fn assets(&self) -> &Assets {
        self.assets
    }

    pub fn width(&self) -> u32 {
        self.logical.0
    }

    pub fn height(&self) -> u32 {
        self.logical.1
    }

    /// Starts a camera shake, replacing any shake in progress.
    ///
    /// The new offset is first sampled on the next tick.
    pub fn shake(&mut self, intensity: f32, duration: f64) {
        self.shake.start(intensity, duration);
    }

    /// Shake with intensity 5 for half a second.
    pub fn shake_default(&mut self) {
        self.shake(DEFAULT_SHAKE_INTENSITY, DEFAULT_SHAKE_DURATION);
    }

    /// Replaces the update callback from the next tick on.
    pub fn set_update<F>(&mut self, update: F)
    where
        F: FnMut(&mut UpdateContext<'_>, f64) + 'static,
    {
        *self.next_update = Some(Box::new(update));
    }

    /// Replaces the draw callback once this tick has finished drawing.
    pub fn set_draw<F>(&mut self, draw: F)
    where
        F: FnMut(&mut Canvas) + 'static,
    {
        *self.next_draw = Some(Box::new(draw));
    }

    /// Stops the session once this tick has finished drawing.
    pub fn stop(&mut self) {
        if *self.state == RunState::Running {
            info!(target: "session", "Stop requested from update");
            *self.state = RunState::Stopped;
        }
    }
}

//=== Session =============================================================

pub struct Session {
    //--- Configuration ---------------------------------------------------
    config: Config,
    viewport: Viewport,

    //--- Scheduling ------------------------------------------------------
    state: RunState,
    epoch: Instant,
    last_time: f64,

    //--- Transient Effects -----------------------------------------------
    shake: Shake,
    rng: StdRng,

    //--- Input -----------------------------------------------------------
    input: InputAggregator,
    event_sender: Sender<InputEvent>,
    event_receiver: Receiver<InputEvent>,

    //--- Rendering & Resources -------------------------------------------
    canvas: Canvas,
    assets: Assets,

    //--- User Callbacks --------------------------------------------------
    update: UpdateFn,
    draw: DrawFn,

    /// Replacements requested from inside `update`, installed between steps.
    next_update: Option<UpdateFn>,
    next_draw: Option<DrawFn>,
}

impl Session {
    //--- Construction -----------------------------------------------------

    /// Validates `config` and creates an idle session.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (event_sender, event_receiver) = unbounded();

        info!(
            target: "session",
            "Session created ({}x{} @ {}x, container: '{}')",
            config.width,
            config.height,
            config.scale,
            config.container_name()
        );

        Ok(Self {
            viewport: Viewport::new(config.width, config.height, config.scale, config.auto_fit),
            state: RunState::Idle,
            epoch: Instant::now(),
            last_time: 0.0,
            shake: Shake::new(),
            rng,
            input: InputAggregator::new(config.width, config.height),
            event_sender,
            event_receiver,
            canvas: Canvas::new(config.width, config.height),
            assets: Assets::new(),
            update: Box::new(|_, _| {}),
            draw: Box::new(|_| {}),
            next_update: None,
            next_draw: None,
            config,
        })
    }

    //--- Callbacks --------------------------------------------------------

    /// Replaces the update callback.
    pub fn set_update<F>(&mut self, update: F)
    where
        F: FnMut(&mut UpdateContext<'_>, f64) + 'static,
    {
        self.update = Box::new(update);
    }

    /// Replaces the draw callback.
    pub fn set_draw<F>(&mut self, draw: F)
    where
        F: FnMut(&mut Canvas) + 'static,
    {
        self.draw = Box::new(draw);
    }

    // Callbacks may also be swapped from inside `update` through
    // `UpdateContext::set_update`/`set_draw`; those take effect only after
    // the running callback has returned.

    //--- Lifecycle --------------------------------------------------------

    /// Starts ticking, using the current time as the `dt` baseline.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyRunning`] if the session is running; the
    /// existing tick chain is left untouched.
    pub fn start(&mut self) -> Result<(), SessionError> {
        let now = self.now_ms();
        self.start_at(now)
    }

    /// Like [`start`](Self::start) with an explicit baseline timestamp (ms).
    pub fn start_at(&mut self, now_ms: f64) -> Result<(), SessionError> {
        if self.state == RunState::Running {
            warn!(target: "session", "start() ignored: session already running");
            return Err(SessionError::AlreadyRunning);
        }

        info!(target: "session", "Session started (from {:?})", self.state);
        self.state = RunState::Running;
        self.last_time = now_ms;
        Ok(())
    }

    /// Halts scheduling. A tick already in progress still completes.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            info!(target: "session", "Session stopped");
            self.state = RunState::Stopped;
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Milliseconds since the session was created (monotonic).
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Timestamp (ms) of the last tick, or of `start` before the first tick.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    //--- tick() -----------------------------------------------------------
    //
    // One update → clear → draw cycle. `dt` is passed through unclamped:
    // a long pause yields one large step, not several small ones.
    //
    pub fn tick(&mut self, now_ms: f64) -> TickControl {
        if self.state != RunState::Running {
            trace!(target: "session", "Tick skipped ({:?})", self.state);
            return TickControl::Exit;
        }

        //--- Step 0: Apply queued device events ---------------------------
        for event in self.event_receiver.try_iter() {
            self.input.apply(event);
        }

        //--- Step 1-2: Delta time -----------------------------------------
        let dt = (now_ms - self.last_time) / 1000.0;
        self.last_time = now_ms;

        //--- Step 3: Transient effects ------------------------------------
        self.shake.advance(dt, &mut self.rng);

        //--- Step 4: User update ------------------------------------------
        {
            let mut ctx = UpdateContext {
                input: &self.input,
                shake: &mut self.shake,
                state: &mut self.state,
                assets: &self.assets,
                logical: (self.config.width, self.config.height),
                next_update: &mut self.next_update,
                next_draw: &mut self.next_draw,
            };
            (self.update)(&mut ctx, dt);
        }
        if let Some(update) = self.next_update.take() {
            trace!(target: "session", "Update callback replaced");
            self.update = update;
        }

        //--- Step 5: Clear ------------------------------------------------
        self.canvas.clear();

        //--- Step 6-7: Shaken draw pass -----------------------------------
        {
            let (ox, oy) = self.shake.offset();
            let mut scoped = self.canvas.save();
            scoped.translate(ox, oy);
            (self.draw)(&mut *scoped);
        }
        if let Some(draw) = self.next_draw.take() {
            trace!(target: "session", "Draw callback replaced");
            self.draw = draw;
        }

        //--- Step 8: Re-arm -----------------------------------------------
        if self.state == RunState::Running {
            TickControl::Continue
        } else {
            info!(target: "session", "Tick chain ended");
            TickControl::Exit
        }
    }

    //--- Effects ----------------------------------------------------------

    /// Starts a camera shake, replacing any shake in progress.
    pub fn shake(&mut self, intensity: f32, duration: f64) {
        self.shake.start(intensity, duration);
    }

    pub fn shake_state(&self) -> &Shake {
        &self.shake
    }

    //--- Input ------------------------------------------------------------

    /// Handle for delivering device events; applied on the next tick.
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.event_sender.clone()
    }

    pub fn input(&self) -> &InputAggregator {
        &self.input
    }

    //--- Assets -----------------------------------------------------------

    /// Loads a batch of images into the session's cache, all or nothing.
    pub fn load<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<Vec<Arc<Image>>, AssetError> {
        self.assets.load(paths)
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut Assets {
        &mut self.assets
    }

    //--- Surface & Viewport -----------------------------------------------

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
