//=========================================================================
// Input State
//
// Latest-value snapshot of every input device.
//
// Responsibilities:
// - Key identifier → pressed flag (absent keys read as released)
// - Single pointer position + pressed flag, in logical coordinates
// - Sequence of active touch contacts, in logical coordinates
//
// Notes:
// No history is kept. A key pressed and released between two updates is
// only observable in its final state. Mutation happens exclusively through
// `InputAggregator::apply`; queries go through the aggregator as well.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, TouchPoint};

//=== Pointer =============================================================

/// Mouse pointer snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

//=== InputState ==========================================================

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub(super) keys: HashMap<KeyCode, bool>,
    pub(super) pointer: Pointer,
    pub(super) touches: Vec<TouchPoint>,
}

impl InputState {
    pub fn new() -> Self {
        const KEY_BASE: usize = 32;
        Self {
            keys: HashMap::with_capacity(KEY_BASE),
            pointer: Pointer::default(),
            touches: Vec::new(),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Records a key's pressed flag. Returns `true` if the value changed.
    pub(super) fn set_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let previous = self.keys.insert(key, pressed).unwrap_or(false);
        previous != pressed
    }

    //--- Queries ----------------------------------------------------------

    pub fn key(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Keys currently held, in no particular order.
    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys
            .iter()
            .filter_map(|(key, pressed)| pressed.then_some(*key))
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_reads_released() {
        let state = InputState::new();
        assert!(!state.key(KeyCode::KeyQ));
    }

    #[test]
    fn set_key_reports_changes_only() {
        let mut state = InputState::new();
        assert!(state.set_key(KeyCode::KeyA, true));
        assert!(!state.set_key(KeyCode::KeyA, true), "repeat press is not a change");
        assert!(state.set_key(KeyCode::KeyA, false));
        assert!(!state.set_key(KeyCode::KeyB, false), "releasing an unseen key is not a change");
    }

    #[test]
    fn keys_down_lists_only_held_keys() {
        let mut state = InputState::new();
        state.set_key(KeyCode::KeyA, true);
        state.set_key(KeyCode::KeyB, true);
        state.set_key(KeyCode::KeyB, false);

        let held: Vec<_> = state.keys_down().collect();
        assert_eq!(held, vec![KeyCode::KeyA]);
    }
}
