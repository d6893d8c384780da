//=========================================================================
// Input Event Types
//
// Platform-independent representation of device input.
//
// The platform layer (winit) converts raw window events into these types
// and enqueues them for the session, which applies them to the
// `InputState` before the next update.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)   ── crossbeam channel ──┐
//                                                      ↓
//                                   InputAggregator::apply()
//                                                      ↓
//                                   is_pressed / pointer / touches
// ```
//
// Positions travel in device pixels together with the `DisplayRect` the
// canvas occupied when the event fired; the aggregator maps them to
// logical canvas coordinates.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::viewport::DisplayRect;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side buttons, thumb buttons, macro keys.
    Other,
}

//=== KeyCode =============================================================

macro_rules! key_codes {
    ($($variant:ident => $code:literal),* $(,)?) => {
        /// Physical keyboard key identifier.
        ///
        /// Represents the key location, not the character produced. Every
        /// variant has a stable code name (`"KeyA"`, `"ArrowLeft"`,
        /// `"Space"`, ...) used by [`KeyCode::as_str`] and
        /// [`KeyCode::from_code`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum KeyCode {
            $($variant,)*
        }

        impl KeyCode {
            /// Every known key, in declaration order.
            pub const ALL: &'static [KeyCode] = &[$(KeyCode::$variant,)*];

            /// Returns the code name of this key.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(KeyCode::$variant => $code,)*
                }
            }

            /// Looks up a key by its code name. Unknown names return `None`.
            pub fn from_code(code: &str) -> Option<KeyCode> {
                match code {
                    $($code => Some(KeyCode::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

key_codes! {
    //--- Numeric Keys -----------------------------------------------------
    Digit0 => "Digit0", Digit1 => "Digit1", Digit2 => "Digit2",
    Digit3 => "Digit3", Digit4 => "Digit4", Digit5 => "Digit5",
    Digit6 => "Digit6", Digit7 => "Digit7", Digit8 => "Digit8",
    Digit9 => "Digit9",

    //--- Alphabetic Keys --------------------------------------------------
    KeyA => "KeyA", KeyB => "KeyB", KeyC => "KeyC", KeyD => "KeyD",
    KeyE => "KeyE", KeyF => "KeyF", KeyG => "KeyG", KeyH => "KeyH",
    KeyI => "KeyI", KeyJ => "KeyJ", KeyK => "KeyK", KeyL => "KeyL",
    KeyM => "KeyM", KeyN => "KeyN", KeyO => "KeyO", KeyP => "KeyP",
    KeyQ => "KeyQ", KeyR => "KeyR", KeyS => "KeyS", KeyT => "KeyT",
    KeyU => "KeyU", KeyV => "KeyV", KeyW => "KeyW", KeyX => "KeyX",
    KeyY => "KeyY", KeyZ => "KeyZ",

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown => "ArrowDown", ArrowLeft => "ArrowLeft",
    ArrowRight => "ArrowRight", ArrowUp => "ArrowUp",

    //--- Modifier Keys ----------------------------------------------------
    ShiftLeft => "ShiftLeft", ShiftRight => "ShiftRight",
    ControlLeft => "ControlLeft", ControlRight => "ControlRight",
    AltLeft => "AltLeft", AltRight => "AltRight",

    //--- Special Keys -----------------------------------------------------
    Space => "Space", Enter => "Enter", Escape => "Escape", Tab => "Tab",
    Backspace => "Backspace", Delete => "Delete",

    //--- Function Keys ----------------------------------------------------
    F1 => "F1", F2 => "F2", F3 => "F3", F4 => "F4", F5 => "F5", F6 => "F6",
    F7 => "F7", F8 => "F8", F9 => "F9", F10 => "F10", F11 => "F11",
    F12 => "F12",
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//=== TouchPoint ==========================================================

/// One active contact, in logical canvas coordinates.
///
/// Carries no identity: the sequence is rebuilt on every touch event, so
/// index `i` in one snapshot need not be the same finger in the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

//=== InputEvent ==========================================================

/// Device input event as delivered by the platform layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed (OS auto-repeat included).
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Cursor moved, in device pixels relative to the window.
    PointerMoved { x: f32, y: f32, rect: DisplayRect },

    /// Mouse button pressed over the canvas.
    PointerDown(MouseButton),

    /// Mouse button released over the canvas.
    PointerUp(MouseButton),

    /// Full snapshot of the active touch contacts, in device pixels.
    ///
    /// Sent on every touch start, move, end and cancel.
    Touches { points: Vec<(f32, f32)>, rect: DisplayRect },
}

//=========================================================================
// Unit Tests
//=========================================================================
