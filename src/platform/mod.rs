//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS window, device events, display refresh) with the
// session, and presents each frame through a pixels surface.
//
// Architecture:
// ```text
//  Main Thread
//  ┌──────────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                        │
//  │   ├─ Keyboard/Mouse/Touch ─> InputProcessor ─> channel ──┼─┐
//  │   ├─ Resized ─> Viewport::fit_to + surface resize        │ │
//  │   └─ RedrawRequested                                     │ │
//  │        ↓                                                 │ │
//  │      Session::tick(now) <─── drains channel ─────────────┼─┘
//  │        ↓                                                 │
//  │      present(canvas → frame) ─> pixels.render()          │
//  │        ↓                                                 │
//  │      Continue → request_redraw()  |  Exit → no re-arm    │
//  └──────────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = tick**: one session tick per display refresh, and
//   the next refresh is requested only while the session keeps running
// - **Device coordinates + rect**: pointer and touch positions are sent
//   with the canvas rect current at event time; the session maps them
// - **Window-sized frame buffer**: the canvas is scaled into it by the
//   presenter so letterboxing follows the viewport exactly
// - **Main thread requirement**: winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;
mod presenter;

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::session::{Session, TickControl};
use input_processor::InputProcessor;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: the event loop exits and the error is returned from
/// [`Engine::run`](crate::Engine::run).
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),

    /// The OS refused to create the window.
    WindowCreation(winit::error::OsError),

    /// The pixels surface could not be created or rendered.
    Renderer(pixels::Error),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::Renderer(e) => write!(f, "Renderer error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
            Self::WindowCreation(e) => Some(e),
            Self::Renderer(e) => Some(e),
        }
    }
}

//=== Platform ============================================================

/// Window owner and per-refresh driver of a [`Session`].
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(session)`; no window yet
/// 2. **Execution**: `platform.run()` enters the winit event loop
/// 3. **resumed()**: window + surface created, session started
/// 4. **Shutdown**: window closed, session stopped or fatal error
///
/// This type is NOT Send/Sync and must remain on the main thread.
pub(crate) struct Platform {
    /// The game being driven.
    session: Session,

    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    /// GPU surface the frame buffer is uploaded to.
    pixels: Option<Pixels<'static>>,

    /// Current window inner size in physical pixels.
    window_size: (u32, u32),

    /// Channel into the session's input queue.
    event_sender: Sender<InputEvent>,

    /// Converts winit events to engine InputEvents.
    input_processor: InputProcessor,

    /// First fatal error hit inside the event loop.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform for `session`. The window is created lazily.
    pub(crate) fn new(session: Session) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            event_sender: session.input_sender(),
            session,
            window: None,
            pixels: None,
            window_size: (0, 0),
            input_processor: InputProcessor::new(),
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or the session stops.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created, or
    /// the first fatal error raised while it ran (window or surface
    /// creation, rendering).
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub(crate) fn run(mut self) -> Result<Session, PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        info!(target: "platform", "Event loop exited");
        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(self.session),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        error!(target: "platform", "{}", error);
        self.session.stop();
        if self.failure.is_none() {
            self.failure = Some(error);
        }
        event_loop.exit();
    }

    fn send(&self, event: InputEvent) {
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform::input", "Input channel disconnected, event dropped");
        }
    }

    /// Canvas rect within the window right now, in physical pixels.
    fn display_rect(&self) -> crate::core::viewport::DisplayRect {
        let (w, h) = self.window_size;
        self.session.viewport().display_rect(w, h)
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let (vw, vh) = self.session.viewport().visual_size();
        let config = self.session.config();

        let attrs = WindowAttributes::default()
            .with_title(config.container_name())
            .with_inner_size(PhysicalSize::new(vw.round() as u32, vh.round() as u32))
            .with_resizable(config.auto_fit);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(PlatformError::WindowCreation)?,
        );

        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(size.width.max(1), size.height.max(1), surface)
            .map_err(PlatformError::Renderer)?;

        self.window_size = (size.width, size.height);
        self.session.viewport_mut().fit_to(size.width, size.height);

        self.pixels = Some(pixels);
        self.window = Some(window);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            trace!(target: "platform", "Ignoring zero-sized resize (minimized?)");
            return;
        }

        self.window_size = (size.width, size.height);
        self.session.viewport_mut().fit_to(size.width, size.height);

        if let Some(pixels) = self.pixels.as_mut() {
            if let Err(e) = pixels.resize_surface(size.width, size.height) {
                warn!(target: "platform", "Surface resize failed: {}", e);
            }
            if let Err(e) = pixels.resize_buffer(size.width, size.height) {
                warn!(target: "platform", "Buffer resize failed: {}", e);
            }
        }
    }

    /// One display refresh: tick, present, re-arm.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.session.now_ms();
        let control = self.session.tick(now);

        let rect = self.display_rect();
        let (w, h) = self.window_size;
        let background = self.session.config().background;

        if let Some(pixels) = self.pixels.as_mut() {
            presenter::present(self.session.canvas(), rect, background, pixels.frame_mut(), w, h);
            if let Err(e) = pixels.render() {
                self.fail(event_loop, PlatformError::Renderer(e));
                return;
            }
        }

        match control {
            TickControl::Continue => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            TickControl::Exit => {
                info!(target: "platform", "Session no longer running, closing window");
                event_loop.exit();
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window and surface on first call, then starts the
    /// session and arms the first refresh.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        if let Err(e) = self.session.start() {
            debug!(target: "platform", "{}", e);
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.session.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.resize(size),

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(&key_event) {
                    self.send(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let rect = self.display_rect();
                if let Some(event) = self.input_processor.process_mouse_move(
                    position.x as f32,
                    position.y as f32,
                    rect,
                ) {
                    self.send(event);
                }
            }

            WindowEvent::CursorLeft { .. } => self.input_processor.process_cursor_left(),

            WindowEvent::MouseInput { state, button, .. } => {
                let rect = self.display_rect();
                match self.input_processor.process_mouse_button(button, state, rect) {
                    Some(event) => self.send(event),
                    None => trace!(target: "platform::input", "Press outside canvas ignored"),
                }
            }

            WindowEvent::Touch(touch) => {
                let rect = self.display_rect();
                let event = self.input_processor.process_touch(
                    touch.id,
                    touch.phase,
                    touch.location.x as f32,
                    touch.location.y as f32,
                    rect,
                );
                self.send(event);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {
                // Ignore: Focused, Moved, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::input::KeyCode;

    fn platform() -> Platform {
        let session = Session::new(Config::default()).expect("default config is valid");
        Platform::new(session)
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert!(platform.pixels.is_none());
        assert!(platform.failure.is_none());
    }

    #[test]
    fn sent_events_reach_the_session() {
        let mut platform = platform();
        platform.session.start_at(0.0).expect("idle session starts");

        platform.send(InputEvent::KeyDown(KeyCode::Space));
        assert!(!platform.session.input().is_pressed(KeyCode::Space), "applied on tick");

        platform.session.tick(16.0);
        assert!(platform.session.input().is_pressed(KeyCode::Space));
    }

    #[test]
    fn display_rect_tracks_window_size() {
        let mut platform = platform();
        platform.window_size = (800, 576);

        // Default 160x144 @ 4x is 640x576, centred horizontally
        let rect = platform.display_rect();
        assert_eq!(rect.x, 80.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!((rect.width, rect.height), (640.0, 576.0));
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
