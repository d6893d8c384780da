//=========================================================================
// LilyPad Engine
//
// Main entry point: configure, attach callbacks, run.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Platform event loop]
//         │                          │
//         ├─ with_size()             ├─ on_update() / on_draw()
//         ├─ with_scale()            ├─ load()
//         ├─ with_background()       └─ session() / session_mut()
//         └─ ...
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::Path;
use std::sync::Arc;

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetError;
use crate::core::color::Color;
use crate::core::config::{Config, ConfigError};
use crate::core::render::{Canvas, Image};
use crate::core::session::{Session, UpdateContext};
use crate::platform::{Platform, PlatformError};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// Every option falls back to [`Config::default`]; values are validated
/// once, in [`build`](Self::build).
///
/// # Examples
///
/// ```no_run
/// use lilypad::prelude::*;
///
/// let engine = EngineBuilder::new()
///     .with_size(160, 144)
///     .with_scale(3.0)
///     .with_background_hex("#1b3a2a")
///     .with_container("Pond")
///     .build()?;
///
/// engine
///     .on_update(|ctx, _dt| {
///         if ctx.input().is_pressed(KeyCode::Space) {
///             ctx.shake_default();
///         }
///     })
///     .on_draw(|canvas| canvas.fill_rect(10.0, 10.0, 8.0, 8.0, Color::GREEN))
///     .run()?;
/// # Ok::<(), lilypad::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: Config,

    /// Hex text passed to `with_background_hex` that failed to parse.
    invalid_color: Option<String>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: Config) -> Self {
        Self { config, invalid_color: None }
    }

    /// Sets the logical resolution. Default: 160x144
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Sets the visual scale multiplier. Default: 4.0
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.config.scale = scale;
        self
    }

    /// Sets the advisory target frame rate. Default: 60
    ///
    /// Ticks always follow the display refresh; this value is kept for the
    /// game's own use.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.config.fps = fps;
        self
    }

    /// Sets the color shown behind the canvas. Default: black
    pub fn with_background(mut self, color: Color) -> Self {
        self.config.background = color;
        self.invalid_color = None;
        self
    }

    /// Sets the background from `#rgb`, `#rrggbb` or `#rrggbbaa` text.
    ///
    /// Unparseable text makes [`build`](Self::build) fail with
    /// [`ConfigError::InvalidColor`].
    pub fn with_background_hex(mut self, text: &str) -> Self {
        match Color::from_hex(text) {
            Some(color) => {
                self.config.background = color;
                self.invalid_color = None;
            }
            None => self.invalid_color = Some(text.to_string()),
        }
        self
    }

    /// Names the hosting window. Blank names fall back to "LilyPad".
    pub fn with_container(mut self, name: impl Into<String>) -> Self {
        self.config.container = Some(name.into());
        self
    }

    /// Refits the scale to the window on every resize. Default: off
    pub fn with_auto_fit(mut self, auto_fit: bool) -> Self {
        self.config.auto_fit = auto_fit;
        self
    }

    /// Seeds the shake jitter for reproducible runs. Default: entropy
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// The configuration as currently assembled.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates the configuration and builds an idle engine.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found; no engine is created.
    pub fn build(self) -> Result<Engine, ConfigError> {
        if let Some(text) = self.invalid_color {
            return Err(ConfigError::InvalidColor(text));
        }

        info!(
            "Building engine ({}x{} @ {}x, {} fps)",
            self.config.width, self.config.height, self.config.scale, self.config.fps
        );

        Ok(Engine {
            session: Session::new(self.config)?,
        })
    }
}

//=== Engine ==============================================================

/// LilyPad runtime: one session plus the window that drives it.
///
/// Create via [`EngineBuilder`]. The engine is idle until [`run`](Self::run)
/// opens the window, starts the session and ticks it once per display
/// refresh.
pub struct Engine {
    session: Session,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Sets the per-tick update callback (`dt` in seconds).
    pub fn on_update<F>(mut self, update: F) -> Self
    where
        F: FnMut(&mut UpdateContext<'_>, f64) + 'static,
    {
        self.session.set_update(update);
        self
    }

    /// Sets the per-tick draw callback.
    pub fn on_draw<F>(mut self, draw: F) -> Self
    where
        F: FnMut(&mut Canvas) + 'static,
    {
        self.session.set_draw(draw);
        self
    }

    /// Loads images into the session's cache before running, all or nothing.
    pub fn load<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<Vec<Arc<Image>>, AssetError> {
        self.session.load(paths)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and blocks until it closes or the game stops.
    ///
    /// # Lifecycle
    ///
    /// 1. Platform creates window + surface, session starts
    /// 2. Each display refresh: session tick, present, re-arm
    /// 3. Window closed or session stopped: event loop exits
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop, window or surface fails.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime");

        let platform = Platform::new(self.session);
        match platform.run() {
            Ok(session) => {
                info!("Engine shutdown complete ({:?})", session.state());
                Ok(())
            }
            Err(e) => {
                warn!("Engine stopped on platform error");
                Err(e)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
