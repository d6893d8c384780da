//=========================================================================
// Viewport
//
// Maps the fixed logical resolution onto the window.
//
// ```text
//   window (device px)
//   ┌─────────────────────────────┐
//   │      ┌───────────────┐      │
//   │      │  DisplayRect  │      │   DisplayRect = logical * scale,
//   │      │ (canvas shown)│      │   centred in the window
//   │      └───────────────┘      │
//   └─────────────────────────────┘
// ```
//
// Input positions are reported in device pixels; `DisplayRect::to_logical`
// brings them back to canvas coordinates, independent of the scale.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== DisplayRect =========================================================

/// Where the canvas is currently shown inside the window, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Converts a device position into logical canvas coordinates.
    ///
    /// Divides by the ratio of rendered size to logical size on each axis.
    /// A zero-sized rect yields non-finite coordinates rather than an error.
    pub fn to_logical(&self, device_x: f32, device_y: f32, logical: (u32, u32)) -> (f32, f32) {
        let ratio_x = self.width / logical.0 as f32;
        let ratio_y = self.height / logical.1 as f32;
        ((device_x - self.x) / ratio_x, (device_y - self.y) / ratio_y)
    }

    /// Returns `true` if the device position falls inside the rect.
    pub fn contains(&self, device_x: f32, device_y: f32) -> bool {
        device_x >= self.x
            && device_y >= self.y
            && device_x < self.x + self.width
            && device_y < self.y + self.height
    }
}

//=== Viewport ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    scale: f32,
    auto_fit: bool,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale: f32, auto_fit: bool) -> Self {
        Self { width, height, scale, auto_fit }
    }

    //--- Queries ----------------------------------------------------------

    pub fn logical_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn auto_fit(&self) -> bool {
        self.auto_fit
    }

    /// On-screen size of the canvas at the current scale.
    pub fn visual_size(&self) -> (f32, f32) {
        (self.width as f32 * self.scale, self.height as f32 * self.scale)
    }

    /// Canvas placement for a window of the given device size.
    pub fn display_rect(&self, window_width: u32, window_height: u32) -> DisplayRect {
        let (w, h) = self.visual_size();
        DisplayRect {
            x: ((window_width as f32 - w) / 2.0).max(0.0),
            y: ((window_height as f32 - h) / 2.0).max(0.0),
            width: w,
            height: h,
        }
    }

    //--- Scaling ----------------------------------------------------------

    /// Replaces the scale factor.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Refits the scale to the parent bounds when auto-fit is enabled.
    ///
    /// The largest scale at which the whole canvas remains visible is used:
    /// `min(parent_w / width, parent_h / height)`. Returns `true` if the
    /// scale was recomputed.
    pub fn fit_to(&mut self, parent_width: u32, parent_height: u32) -> bool {
        if !self.auto_fit {
            return false;
        }

        let sx = parent_width as f32 / self.width as f32;
        let sy = parent_height as f32 / self.height as f32;
        self.scale = sx.min(sy);

        debug!(
            target: "platform",
            "Viewport refit to {}x{} (scale: {:.3})",
            parent_width,
            parent_height,
            self.scale
        );
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_size_applies_scale() {
        let viewport = Viewport::new(160, 144, 4.0, false);
        assert_eq!(viewport.visual_size(), (640.0, 576.0));
    }

    #[test]
    fn center_click_maps_to_logical_center_at_any_scale() {
        for scale in [1.0, 2.5, 4.0, 7.0] {
            let viewport = Viewport::new(160, 144, scale, false);
            let (w, h) = viewport.visual_size();
            let rect = viewport.display_rect(w as u32, h as u32);
            let logical = rect.to_logical(w / 2.0, h / 2.0, (160, 144));
            assert!(
                (logical.0 - 80.0).abs() < 1e-3 && (logical.1 - 72.0).abs() < 1e-3,
                "scale {} mapped centre to {:?}",
                scale,
                logical
            );
        }
    }

    #[test]
    fn letterboxed_rect_subtracts_offset() {
        let viewport = Viewport::new(160, 144, 4.0, false);
        let rect = viewport.display_rect(840, 576);
        assert_eq!(rect.x, 100.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.to_logical(100.0, 0.0, (160, 144)), (0.0, 0.0));
        assert!(!rect.contains(99.0, 10.0));
        assert!(rect.contains(100.0, 10.0));
    }

    #[test]
    fn fit_uses_smaller_axis_ratio() {
        let mut viewport = Viewport::new(160, 144, 4.0, true);
        assert!(viewport.fit_to(800, 288));
        assert_eq!(viewport.scale(), 2.0);
        assert_eq!(viewport.visual_size(), (320.0, 288.0));
    }

    #[test]
    fn fit_is_ignored_without_auto_fit() {
        let mut viewport = Viewport::new(160, 144, 4.0, false);
        assert!(!viewport.fit_to(100, 100));
        assert_eq!(viewport.scale(), 4.0);
    }
}
