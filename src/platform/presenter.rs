//=========================================================================
// Presenter
//
// Copies the logical canvas into the window-sized RGBA frame owned by the
// pixels surface.
//
// The canvas lands in the viewport's DisplayRect, scaled with nearest
// neighbour sampling so pixel art stays crisp at any (even fractional)
// scale. The canvas is composited over the configured background; the
// area outside the rect is letterboxed black.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::color::Color;
use crate::core::render::Canvas;
use crate::core::viewport::DisplayRect;

//=== Presentation ========================================================

/// Color of the bars around the canvas when the window aspect differs.
pub(crate) const LETTERBOX: Color = Color::BLACK;

/// Writes `canvas` into `frame` (`frame_width * frame_height * 4` bytes).
///
/// Frames of the wrong length are left untouched.
pub(crate) fn present(
    canvas: &Canvas,
    rect: DisplayRect,
    background: Color,
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
) {
    let expected = frame_width as usize * frame_height as usize * 4;
    if frame.len() != expected {
        return;
    }

    let (cw, ch) = (canvas.width(), canvas.height());
    let pixels = canvas.pixels();

    for (i, out) in frame.chunks_exact_mut(4).enumerate() {
        let fx = (i % frame_width as usize) as f32 + 0.5;
        let fy = (i / frame_width as usize) as f32 + 0.5;

        let color = if rect.contains(fx, fy) && cw > 0 && ch > 0 {
            let cx = (((fx - rect.x) * cw as f32 / rect.width) as u32).min(cw - 1);
            let cy = (((fy - rect.y) * ch as f32 / rect.height) as u32).min(ch - 1);
            let src = pixels[(cy * cw + cx) as usize];
            background.blend(src, 1.0)
        } else {
            LETTERBOX
        };

        out.copy_from_slice(&color.rgba());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    #[test]
    fn integer_scale_fills_blocks() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill_rect(1.0, 0.0, 1.0, 1.0, Color::RED);

        let mut frame = vec![0u8; 4 * 4 * 4];
        present(&canvas, DisplayRect::new(0.0, 0.0, 4.0, 4.0), Color::BLUE, &mut frame, 4, 4);

        // Top-right 2x2 block is the red canvas pixel, the rest background.
        assert_eq!(frame_pixel(&frame, 4, 2, 0), Color::RED.rgba());
        assert_eq!(frame_pixel(&frame, 4, 3, 1), Color::RED.rgba());
        assert_eq!(frame_pixel(&frame, 4, 1, 1), Color::BLUE.rgba());
        assert_eq!(frame_pixel(&frame, 4, 3, 3), Color::BLUE.rgba());
    }

    #[test]
    fn outside_rect_is_letterboxed() {
        let canvas = Canvas::new(2, 2);
        let mut frame = vec![255u8; 6 * 2 * 4];

        // 2x2 canvas centred in a 6x2 window
        present(&canvas, DisplayRect::new(2.0, 0.0, 2.0, 2.0), Color::WHITE, &mut frame, 6, 2);

        assert_eq!(frame_pixel(&frame, 6, 0, 0), LETTERBOX.rgba());
        assert_eq!(frame_pixel(&frame, 6, 5, 1), LETTERBOX.rgba());
        assert_eq!(frame_pixel(&frame, 6, 2, 0), Color::WHITE.rgba());
        assert_eq!(frame_pixel(&frame, 6, 3, 1), Color::WHITE.rgba());
    }

    #[test]
    fn translucent_canvas_blends_over_background() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set_alpha(0.5);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);

        let mut frame = vec![0u8; 4];
        present(&canvas, DisplayRect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK, &mut frame, 1, 1);

        let [r, g, b, a] = frame_pixel(&frame, 1, 0, 0);
        assert!((126..=129).contains(&r), "r = {}", r);
        assert_eq!((r, r), (g, b));
        assert_eq!(a, 255);
    }

    #[test]
    fn mismatched_frame_is_ignored() {
        let canvas = Canvas::new(2, 2);
        let mut frame = vec![7u8; 10];
        present(&canvas, DisplayRect::new(0.0, 0.0, 2.0, 2.0), Color::WHITE, &mut frame, 2, 2);
        assert!(frame.iter().all(|&b| b == 7));
    }
}
