//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into engine InputEvents.
//
// Architecture:
//   winit WindowEvent → InputProcessor → InputEvent → channel → Session
//
// Positions are forwarded in device pixels together with the canvas
// DisplayRect at event time; mapping to logical coordinates happens in
// the InputAggregator. Touches are tracked by winit id here only so each
// touch event can be turned into a full snapshot of active contacts.
// Pointer moves and presses outside the canvas rect (letterbox bars) are
// dropped. Releases always pass so the pressed flag never sticks.
// Unmapped keys (media keys, numpad, F13+) are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};
use crate::core::viewport::DisplayRect;

//=== InputProcessor ======================================================

/// Converts winit events to InputEvents, tracking active touch contacts.
#[derive(Debug, Default)]
pub(crate) struct InputProcessor {
    /// Active contacts in start order: (winit touch id, device position).
    touches: Vec<(u64, (f32, f32))>,

    /// Last cursor position in device pixels, wherever it was.
    cursor: Option<(f32, f32)>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a winit KeyEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };
        let key = map_key_code(code)?;

        Some(match key_event.state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }

    /// Converts a button change (filters presses off the canvas).
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
        rect: DisplayRect,
    ) -> Option<InputEvent> {
        let button = MouseButton::from(button);
        match state {
            ElementState::Pressed => {
                let (x, y) = self.cursor?;
                rect.contains(x, y).then_some(InputEvent::PointerDown(button))
            }
            ElementState::Released => Some(InputEvent::PointerUp(button)),
        }
    }

    /// Records the cursor and converts the move (filters moves off the canvas).
    pub(crate) fn process_mouse_move(
        &mut self,
        x: f32,
        y: f32,
        rect: DisplayRect,
    ) -> Option<InputEvent> {
        self.cursor = Some((x, y));
        rect.contains(x, y).then_some(InputEvent::PointerMoved { x, y, rect })
    }

    /// Forgets the cursor once it leaves the window.
    pub(crate) fn process_cursor_left(&mut self) {
        self.cursor = None;
    }

    /// Updates the active contact list and returns its full snapshot.
    pub(crate) fn process_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        rect: DisplayRect,
    ) -> InputEvent {
        match phase {
            TouchPhase::Started | TouchPhase::Moved => {
                match self.touches.iter_mut().find(|(tid, _)| *tid == id) {
                    Some((_, pos)) => *pos = (x, y),
                    None => self.touches.push((id, (x, y))),
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.retain(|(tid, _)| *tid != id);
            }
        }

        InputEvent::Touches {
            points: self.touches.iter().map(|(_, pos)| *pos).collect(),
            rect,
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

/// Maps winit physical key codes to engine key codes.
fn map_key_code(code: WinitKeyCode) -> Option<KeyCode> {
    use WinitKeyCode::*;
    let key = match code {
        //--- Digits -------------------------------------------------------
        Digit0 => KeyCode::Digit0,
        Digit1 => KeyCode::Digit1,
        Digit2 => KeyCode::Digit2,
        Digit3 => KeyCode::Digit3,
        Digit4 => KeyCode::Digit4,
        Digit5 => KeyCode::Digit5,
        Digit6 => KeyCode::Digit6,
        Digit7 => KeyCode::Digit7,
        Digit8 => KeyCode::Digit8,
        Digit9 => KeyCode::Digit9,

        //--- Letters ------------------------------------------------------
        KeyA => KeyCode::KeyA,
        KeyB => KeyCode::KeyB,
        KeyC => KeyCode::KeyC,
        KeyD => KeyCode::KeyD,
        KeyE => KeyCode::KeyE,
        KeyF => KeyCode::KeyF,
        KeyG => KeyCode::KeyG,
        KeyH => KeyCode::KeyH,
        KeyI => KeyCode::KeyI,
        KeyJ => KeyCode::KeyJ,
        KeyK => KeyCode::KeyK,
        KeyL => KeyCode::KeyL,
        KeyM => KeyCode::KeyM,
        KeyN => KeyCode::KeyN,
        KeyO => KeyCode::KeyO,
        KeyP => KeyCode::KeyP,
        KeyQ => KeyCode::KeyQ,
        KeyR => KeyCode::KeyR,
        KeyS => KeyCode::KeyS,
        KeyT => KeyCode::KeyT,
        KeyU => KeyCode::KeyU,
        KeyV => KeyCode::KeyV,
        KeyW => KeyCode::KeyW,
        KeyX => KeyCode::KeyX,
        KeyY => KeyCode::KeyY,
        KeyZ => KeyCode::KeyZ,

        //--- Arrows -------------------------------------------------------
        ArrowUp => KeyCode::ArrowUp,
        ArrowDown => KeyCode::ArrowDown,
        ArrowLeft => KeyCode::ArrowLeft,
        ArrowRight => KeyCode::ArrowRight,

        //--- Modifiers ----------------------------------------------------
        ShiftLeft => KeyCode::ShiftLeft,
        ShiftRight => KeyCode::ShiftRight,
        ControlLeft => KeyCode::ControlLeft,
        ControlRight => KeyCode::ControlRight,
        AltLeft => KeyCode::AltLeft,
        AltRight => KeyCode::AltRight,

        //--- Special ------------------------------------------------------
        Space => KeyCode::Space,
        Enter => KeyCode::Enter,
        Escape => KeyCode::Escape,
        Tab => KeyCode::Tab,
        Backspace => KeyCode::Backspace,
        Delete => KeyCode::Delete,

        //--- Function -----------------------------------------------------
        F1 => KeyCode::F1,
        F2 => KeyCode::F2,
        F3 => KeyCode::F3,
        F4 => KeyCode::F4,
        F5 => KeyCode::F5,
        F6 => KeyCode::F6,
        F7 => KeyCode::F7,
        F8 => KeyCode::F8,
        F9 => KeyCode::F9,
        F10 => KeyCode::F10,
        F11 => KeyCode::F11,
        F12 => KeyCode::F12,

        _ => return None,
    };
    Some(key)
}

//=========================================================================
// Unit Tests
//=========================================================================
