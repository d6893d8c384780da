//=========================================================================
// Core Runtime
//
// Platform-independent part of the runtime. Nothing in here touches the
// window system; the platform layer feeds it device events and display
// refreshes, and presents the canvas it produces.
//
// Components (leaves first):
// - `input`:    device events → pollable key/pointer/touch snapshot
// - `render`:   canvas, images and transforms
// - `sprite`:   positioned, transformable drawable
// - `session`:  run/stop state machine and the per-tick update/draw cycle
// - `viewport`: logical resolution ↔ on-screen rectangle
// - `assets`:   named image cache
// - `config`:   construction options and validation
//
//=========================================================================

//=== Submodules ==========================================================

pub mod assets;
pub mod color;
pub mod config;
pub mod input;
pub mod render;
pub mod session;
pub mod shake;
pub mod sprite;
pub mod viewport;

//=== Re-exports ==========================================================

pub use assets::{AssetError, Assets};
pub use color::Color;
pub use config::{Config, ConfigError};
pub use input::{InputAggregator, InputEvent, KeyCode, MouseButton, Pointer, TouchPoint};
pub use render::{Canvas, CanvasGuard, Image, Transform};
pub use session::{RunState, Session, SessionError, TickControl, UpdateContext};
pub use shake::Shake;
pub use sprite::Sprite;
pub use viewport::{DisplayRect, Viewport};
