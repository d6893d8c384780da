//=========================================================================
// Sprite
//
// A positioned, transformable image: the basic drawable unit.
//
// Draw order (each step relative to the sprite's own centre):
// ```text
//   save → alpha → translate(centre) → rotate → flip → draw(-w/2, -h/2) → restore
// ```
//
// Rotation and flips must be applied around the centre. Applying them
// around the top-left corner would swing the sprite away from (x, y) and
// break sprite-sheet alignment.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== Internal Dependencies ===============================================

use crate::core::render::{Canvas, Image};

//=== Sprite ==============================================================

#[derive(Debug, Clone)]
pub struct Sprite {
    pub image: Arc<Image>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// Clockwise rotation in radians.
    pub rotation: f32,
    pub flip_x: bool,
    pub flip_y: bool,

    /// Opacity; nothing is drawn at or below zero.
    pub alpha: f32,
}

impl Sprite {
    /// Creates a sprite at `(x, y)` with the image's natural size.
    pub fn new(image: Arc<Image>, x: f32, y: f32) -> Self {
        let width = image.width() as f32;
        let height = image.height() as f32;
        Self {
            image,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
            alpha: 1.0,
        }
    }

    /// Overrides the drawn size (the image is stretched to fit).
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Centre of the sprite in canvas coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    //--- draw() -----------------------------------------------------------

    pub fn draw(&self, canvas: &mut Canvas) {
        let mut scoped = canvas.save();
        let (cx, cy) = self.center();

        scoped.set_alpha(self.alpha);
        scoped.translate(cx, cy);
        scoped.rotate(self.rotation);
        scoped.scale(
            if self.flip_x { -1.0 } else { 1.0 },
            if self.flip_y { -1.0 } else { 1.0 },
        );
        scoped.draw_image(
            &self.image,
            -self.width / 2.0,
            -self.height / 2.0,
            self.width,
            self.height,
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use std::f32::consts::PI;

    //--- Test Helpers -----------------------------------------------------

    /// Left half red, right half blue; top row of the left half green.
    fn marker(width: u32, height: u32) -> Arc<Image> {
        Arc::new(Image::from_fn(width, height, |x, y| {
            if x < width / 2 && y == 0 {
                Color::GREEN
            } else if x < width / 2 {
                Color::RED
            } else {
                Color::BLUE
            }
        }))
    }

    fn bounds(canvas: &Canvas) -> Option<(u32, u32, u32, u32)> {
        let mut out: Option<(u32, u32, u32, u32)> = None;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y).is_some_and(|c| c.a > 0) {
                    out = Some(match out {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        out
    }

    //=====================================================================
    // Placement Tests
    //=====================================================================

    #[test]
    fn defaults_to_natural_size() {
        let sprite = Sprite::new(marker(12, 7), 0.0, 0.0);
        assert_eq!((sprite.width, sprite.height), (12.0, 7.0));
        assert_eq!(sprite.alpha, 1.0);
        assert!(!sprite.flip_x && !sprite.flip_y);
    }

    #[test]
    fn unrotated_sprite_is_anchored_at_top_left() {
        let mut canvas = Canvas::new(64, 64);
        let sprite = Sprite::new(marker(8, 8), 10.0, 10.0).with_size(16.0, 16.0);
        sprite.draw(&mut canvas);

        assert_eq!(bounds(&canvas), Some((10, 10, 25, 25)));
        assert_eq!(canvas.pixel(10, 10), Some(Color::GREEN));
        assert_eq!(canvas.pixel(25, 25), Some(Color::BLUE));
    }

    #[test]
    fn draw_leaves_canvas_state_untouched() {
        let mut canvas = Canvas::new(32, 32);
        let mut sprite = Sprite::new(marker(4, 4), 3.0, 3.0);
        sprite.rotation = 1.2;
        sprite.flip_x = true;
        sprite.alpha = 0.3;
        sprite.draw(&mut canvas);

        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.alpha(), 1.0);
        assert_eq!(canvas.transform(), crate::core::render::Transform::IDENTITY);
    }

    //=====================================================================
    // Flip & Rotation Tests
    //=====================================================================

    #[test]
    fn flip_x_mirrors_in_place() {
        let mut canvas = Canvas::new(32, 32);
        let mut sprite = Sprite::new(marker(4, 4), 4.0, 4.0);
        sprite.flip_x = true;
        sprite.draw(&mut canvas);

        assert_eq!(bounds(&canvas), Some((4, 4, 7, 7)), "flip must not move the sprite");
        assert_eq!(canvas.pixel(4, 5), Some(Color::BLUE));
        assert_eq!(canvas.pixel(7, 5), Some(Color::RED));
    }

    #[test]
    fn flip_y_mirrors_in_place() {
        let mut canvas = Canvas::new(32, 32);
        let mut sprite = Sprite::new(marker(4, 4), 4.0, 4.0);
        sprite.flip_y = true;
        sprite.draw(&mut canvas);

        assert_eq!(bounds(&canvas), Some((4, 4, 7, 7)));
        assert_eq!(canvas.pixel(4, 7), Some(Color::GREEN));
        assert_eq!(canvas.pixel(4, 4), Some(Color::RED));
    }

    #[test]
    fn half_turn_rotates_around_centre() {
        let mut canvas = Canvas::new(32, 32);
        let mut sprite = Sprite::new(marker(4, 4), 4.0, 4.0);
        sprite.rotation = PI;
        sprite.draw(&mut canvas);

        assert_eq!(bounds(&canvas), Some((4, 4, 7, 7)));
        // top-left green row ends up bottom-right
        assert_eq!(canvas.pixel(7, 7), Some(Color::GREEN));
        assert_eq!(canvas.pixel(4, 4), Some(Color::BLUE));
    }

    //=====================================================================
    // Opacity Tests
    //=====================================================================

    #[test]
    fn invisible_sprite_draws_nothing() {
        let mut canvas = Canvas::new(16, 16);
        let mut sprite = Sprite::new(marker(4, 4), 0.0, 0.0);
        sprite.alpha = 0.0;
        sprite.draw(&mut canvas);
        assert_eq!(bounds(&canvas), None);
    }

    #[test]
    fn opacity_above_one_is_not_an_error() {
        let mut canvas = Canvas::new(16, 16);
        let mut sprite = Sprite::new(marker(4, 4), 0.0, 0.0);
        sprite.alpha = 3.0;
        sprite.draw(&mut canvas);
        assert_eq!(canvas.pixel(3, 3), Some(Color::BLUE));
    }
}
