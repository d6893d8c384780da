//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use lilypad::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::Error;

// Session and per-tick context
pub use crate::core::session::{RunState, Session, TickControl, UpdateContext};

// Drawing
pub use crate::core::color::Color;
pub use crate::core::render::{Canvas, Image};
pub use crate::core::sprite::Sprite;

// Input
pub use crate::core::input::{KeyCode, MouseButton, Pointer, TouchPoint};
