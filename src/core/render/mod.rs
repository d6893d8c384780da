//=========================================================================
// Rendering
//
// Software rendering primitives used by the frame loop and by sprites.
//
// - `Canvas`:    logical-resolution pixel surface with a scoped state stack
// - `Image`:     decoded, immutable RGBA image shared between sprites
// - `Transform`: 2D affine matrix with canvas composition order
//
//=========================================================================

//=== Submodules ==========================================================

mod canvas;
mod image;
mod transform;

//=== Public Exports ======================================================

pub use canvas::{Canvas, CanvasGuard};
pub use image::Image;
pub use transform::Transform;
