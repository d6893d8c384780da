//=========================================================================
// Input Aggregator
//
// Pollable input interface for user code.
// Applies device events to the `InputState` and answers point-in-time
// queries during update.
//
// Responsibilities:
// - Track held keys independently, with no limit and no debouncing
// - Map pointer and touch positions from device pixels to logical
//   canvas coordinates, invariant to the visual scale
// - Replace the touch sequence wholesale on every touch event
//
// Notes:
// Events reach the aggregator through the session's channel and are
// applied between ticks, so the state seen by one update call is stable
// for the whole call.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod input_state;

//=== External Crates =====================================================

use log::trace;

//=== Internal Imports ====================================================

pub use event::{InputEvent, KeyCode, MouseButton, TouchPoint};
pub use input_state::{InputState, Pointer};

//=== InputAggregator =====================================================

#[derive(Debug, Clone)]
pub struct InputAggregator {
    state: InputState,
    logical: (u32, u32),
}

impl InputAggregator {
    //--- Construction -----------------------------------------------------

    /// Creates an empty aggregator for a canvas of the given logical size.
    pub fn new(logical_width: u32, logical_height: u32) -> Self {
        Self {
            state: InputState::new(),
            logical: (logical_width, logical_height),
        }
    }

    //--- apply() ----------------------------------------------------------
    //
    // Overwrites the affected part of the state with the event's payload.
    //
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                if self.state.set_key(key, true) {
                    trace!(target: "input", "{} pressed", key);
                }
            }

            InputEvent::KeyUp(key) => {
                if self.state.set_key(key, false) {
                    trace!(target: "input", "{} released", key);
                }
            }

            InputEvent::PointerMoved { x, y, rect } => {
                let (lx, ly) = rect.to_logical(x, y, self.logical);
                self.state.pointer.x = lx;
                self.state.pointer.y = ly;
            }

            InputEvent::PointerDown(button) => {
                trace!(target: "input", "Pointer down ({:?})", button);
                self.state.pointer.down = true;
            }

            InputEvent::PointerUp(button) => {
                trace!(target: "input", "Pointer up ({:?})", button);
                self.state.pointer.down = false;
            }

            InputEvent::Touches { points, rect } => {
                let logical = self.logical;
                self.state.touches = points
                    .into_iter()
                    .map(|(x, y)| {
                        let (x, y) = rect.to_logical(x, y, logical);
                        TouchPoint { x, y }
                    })
                    .collect();
                trace!(target: "input", "{} active touches", self.state.touches.len());
            }
        }
    }

    //--- Query Methods ----------------------------------------------------

    /// Returns `true` while the key is held. Never-seen keys return `false`.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.state.key(key)
    }

    /// Like [`is_pressed`](Self::is_pressed), keyed by code name (`"KeyX"`).
    ///
    /// Unrecognised names return `false`.
    pub fn is_pressed_code(&self, code: &str) -> bool {
        KeyCode::from_code(code).is_some_and(|key| self.is_pressed(key))
    }

    /// Pointer position in logical coordinates plus its pressed flag.
    pub fn pointer(&self) -> Pointer {
        self.state.pointer()
    }

    /// Active touch contacts, in logical coordinates.
    pub fn touches(&self) -> &[TouchPoint] {
        self.state.touches()
    }

    /// Read-only access to the full snapshot.
    pub fn state(&self) -> &InputState {
        &self.state
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::{DisplayRect, Viewport};

    //--- Test Helpers -----------------------------------------------------

    fn aggregator() -> InputAggregator {
        InputAggregator::new(160, 144)
    }

    fn rect_at_scale(scale: f32) -> DisplayRect {
        let viewport = Viewport::new(160, 144, scale, false);
        let (w, h) = viewport.visual_size();
        viewport.display_rect(w as u32, h as u32)
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_lifecycle_press_then_release() {
        let mut input = aggregator();
        assert!(!input.is_pressed_code("KeyX"), "unseen key must read released");

        input.apply(InputEvent::KeyDown(KeyCode::KeyX));
        assert!(input.is_pressed_code("KeyX"));
        assert!(input.is_pressed(KeyCode::KeyX));

        input.apply(InputEvent::KeyUp(KeyCode::KeyX));
        assert!(!input.is_pressed_code("KeyX"));
    }

    #[test]
    fn simultaneous_keys_are_independent() {
        let mut input = aggregator();
        for key in KeyCode::ALL {
            input.apply(InputEvent::KeyDown(*key));
        }
        input.apply(InputEvent::KeyUp(KeyCode::Space));

        assert!(!input.is_pressed(KeyCode::Space));
        assert!(input.is_pressed(KeyCode::ArrowLeft));
        assert_eq!(input.state().keys_down().count(), KeyCode::ALL.len() - 1);
    }

    #[test]
    fn press_and_release_between_polls_shows_final_state() {
        let mut input = aggregator();
        input.apply(InputEvent::KeyDown(KeyCode::KeyZ));
        input.apply(InputEvent::KeyUp(KeyCode::KeyZ));
        assert!(!input.is_pressed(KeyCode::KeyZ));
    }

    #[test]
    fn unknown_code_name_is_not_pressed() {
        let input = aggregator();
        assert!(!input.is_pressed_code("NotAKey"));
    }

    //=====================================================================
    // Pointer Tests
    //=====================================================================

    #[test]
    fn pointer_center_maps_to_logical_center() {
        let mut input = aggregator();
        let rect = rect_at_scale(4.0);
        input.apply(InputEvent::PointerMoved { x: 320.0, y: 288.0, rect });

        let pointer = input.pointer();
        assert_eq!((pointer.x, pointer.y), (80.0, 72.0));
    }

    #[test]
    fn pointer_mapping_ignores_visual_scale() {
        for scale in [1.0, 3.0, 4.0, 6.5] {
            let mut input = aggregator();
            let rect = rect_at_scale(scale);
            input.apply(InputEvent::PointerMoved {
                x: rect.width / 2.0,
                y: rect.height / 2.0,
                rect,
            });
            let pointer = input.pointer();
            assert!((pointer.x - 80.0).abs() < 1e-3, "scale {}: x = {}", scale, pointer.x);
            assert!((pointer.y - 72.0).abs() < 1e-3, "scale {}: y = {}", scale, pointer.y);
        }
    }

    #[test]
    fn pointer_buttons_are_latest_value() {
        let mut input = aggregator();
        assert!(!input.pointer().down);

        input.apply(InputEvent::PointerDown(MouseButton::Left));
        assert!(input.pointer().down);

        input.apply(InputEvent::PointerDown(MouseButton::Right));
        input.apply(InputEvent::PointerUp(MouseButton::Left));
        assert!(!input.pointer().down, "any release clears the flag");
    }

    //=====================================================================
    // Touch Tests
    //=====================================================================

    #[test]
    fn touches_are_mapped_and_replaced() {
        let mut input = aggregator();
        let rect = rect_at_scale(4.0);

        input.apply(InputEvent::Touches {
            points: vec![(40.0, 40.0), (400.0, 200.0)],
            rect,
        });
        assert_eq!(
            input.touches(),
            &[TouchPoint { x: 10.0, y: 10.0 }, TouchPoint { x: 100.0, y: 50.0 }]
        );

        input.apply(InputEvent::Touches { points: vec![(400.0, 200.0)], rect });
        assert_eq!(input.touches().len(), 1, "one lift leaves exactly one contact");
    }

    #[test]
    fn last_lift_empties_touches() {
        let mut input = aggregator();
        let rect = rect_at_scale(2.0);
        input.apply(InputEvent::Touches { points: vec![(1.0, 1.0)], rect });
        input.apply(InputEvent::Touches { points: vec![], rect });
        assert!(input.touches().is_empty());
    }
}
