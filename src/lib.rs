//=========================================================================
// LilyPad Library Root
//
// A small fixed-resolution 2D game runtime: a per-refresh update/draw
// loop, sprites drawn onto a pixel-crisp logical canvas, camera shake and
// pollable keyboard/pointer/touch input.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Keep the window/event-loop integration (`platform`) private
// - Expose the platform-independent runtime (`core`) for direct use and
//   headless testing
//
// Typical usage:
// ```no_run
// use lilypad::prelude::*;
//
// fn main() -> Result<(), lilypad::Error> {
//     EngineBuilder::new().build()?.run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the session, canvas, sprites, input and assets. It never
// touches the window system, so a `Session` can be ticked by hand.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window, the pixels surface and the
// winit → engine event conversion. Only its error type is public.
//
mod engine;
mod error;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use error::Error;
pub use platform::PlatformError;
