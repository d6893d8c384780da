//=========================================================================
// Canvas
//
// Software drawing surface at the session's logical resolution.
//
// Architecture:
// ```text
//   Canvas
//     ├─ pixels: Vec<Color>        (width * height, row-major)
//     ├─ state:  DrawState         (transform + global alpha)
//     └─ stack:  Vec<DrawState>    (saved states)
//
//   save() ──> CanvasGuard ──(drop)──> state restored
// ```
//
// Every primitive maps device pixel centres back into local space through
// the inverse transform and samples with nearest-neighbour, so sprites
// stay pixel-crisp under any rotation or flip.
//
// State is scoped: `save()` returns a guard that restores the transform
// and alpha when dropped, including on unwind and including any inner
// saves the guarded code left unbalanced.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::ops::{Deref, DerefMut};

//=== Internal Dependencies ===============================================

use super::image::Image;
use super::transform::Transform;
use crate::core::color::Color;

//=== DrawState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawState {
    transform: Transform,
    alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self { transform: Transform::IDENTITY, alpha: 1.0 }
    }
}

//=== Canvas ==============================================================

#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl Canvas {
    //--- Construction -----------------------------------------------------

    /// Creates a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
            state: DrawState::default(),
            stack: Vec::with_capacity(8),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Row-major pixel buffer.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    pub fn alpha(&self) -> f32 {
        self.state.alpha
    }

    /// Number of currently saved states.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    //--- State ------------------------------------------------------------

    /// Saves transform and alpha; they are restored when the guard drops.
    pub fn save(&mut self) -> CanvasGuard<'_> {
        let depth = self.stack.len();
        self.stack.push(self.state);
        CanvasGuard { canvas: self, depth }
    }

    fn restore_to(&mut self, depth: usize) {
        if let Some(saved) = self.stack.get(depth).copied() {
            self.state = saved;
            self.stack.truncate(depth);
        }
    }

    /// Sets the global opacity used by subsequent primitives.
    ///
    /// Values above 1 are passed through unclamped.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha;
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.state.transform = self.state.transform.then(&Transform::translation(tx, ty));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.state.transform = self.state.transform.then(&Transform::rotation(radians));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform = self.state.transform.then(&Transform::scaling(sx, sy));
    }

    //--- Primitives -------------------------------------------------------

    /// Resets every pixel to transparent, ignoring the current transform.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::TRANSPARENT);
    }

    /// Fills a rectangle given in local coordinates.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.rasterize(x, y, width, height, |_, _| Some(color));
    }

    /// Draws `image` stretched over the local rectangle `(x, y, width, height)`.
    ///
    /// Negative extents mirror the image, as on a browser canvas.
    pub fn draw_image(&mut self, image: &Image, x: f32, y: f32, width: f32, height: f32) {
        let (iw, ih) = (image.width(), image.height());
        if iw == 0 || ih == 0 {
            return;
        }

        self.rasterize(x, y, width, height, |u, v| {
            let sx = ((u * iw as f32) as u32).min(iw - 1);
            let sy = ((v * ih as f32) as u32).min(ih - 1);
            image.pixel(sx, sy)
        });
    }

    //--- Internal Helpers -------------------------------------------------

    /// Covers the transformed local rectangle, asking `shade(u, v)` for the
    /// color at normalised rectangle coordinates `u, v ∈ [0, 1)`.
    fn rasterize<F>(&mut self, x: f32, y: f32, width: f32, height: f32, shade: F)
    where
        F: Fn(f32, f32) -> Option<Color>,
    {
        let opacity = self.state.alpha;
        if opacity <= 0.0 || width == 0.0 || height == 0.0 {
            return;
        }

        let transform = self.state.transform;
        let Some(inverse) = transform.invert() else {
            return;
        };

        //--- Device-space bounding box ------------------------------------
        let corners = [
            transform.apply(x, y),
            transform.apply(x + width, y),
            transform.apply(x, y + height),
            transform.apply(x + width, y + height),
        ];
        if corners.iter().any(|(cx, cy)| !cx.is_finite() || !cy.is_finite()) {
            return;
        }

        let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max);

        let x0 = (min_x.floor().max(0.0) as u32).min(self.width);
        let x1 = (max_x.ceil().max(0.0) as u32).min(self.width);
        let y0 = (min_y.floor().max(0.0) as u32).min(self.height);
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.height);

        //--- Per-pixel inverse mapping ------------------------------------
        for py in y0..y1 {
            for px in x0..x1 {
                let (lx, ly) = inverse.apply(px as f32 + 0.5, py as f32 + 0.5);
                let u = (lx - x) / width;
                let v = (ly - y) / height;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }

                if let Some(src) = shade(u, v) {
                    let idx = (py * self.width + px) as usize;
                    self.pixels[idx] = self.pixels[idx].blend(src, opacity);
                }
            }
        }
    }
}

//=== CanvasGuard =========================================================

/// Scoped canvas state. Dereferences to the [`Canvas`] and restores the
/// saved transform and alpha on drop.
pub struct CanvasGuard<'a> {
    canvas: &'a mut Canvas,
    depth: usize,
}

impl Deref for CanvasGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for CanvasGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for CanvasGuard<'_> {
    fn drop(&mut self) {
        self.canvas.restore_to(self.depth);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
