//! Keyboard modifier tracking
//!
//! The pointer manager does not watch keyboards. Whatever reads key events
//! feeds them through [`KeyboardHandler`], which keeps the modifier state on
//! the shared [`InputContext`] current.

use std::rc::Rc;

use smallvec::SmallVec;

use super::context::InputContext;
use super::Modifiers;

// linux/input-event-codes.h
const KEY_LEFTCTRL: u32 = 29;
const KEY_LEFTSHIFT: u32 = 42;
const KEY_RIGHTSHIFT: u32 = 54;
const KEY_LEFTALT: u32 = 56;
const KEY_RIGHTCTRL: u32 = 97;
const KEY_RIGHTALT: u32 = 100;
const KEY_LEFTMETA: u32 = 125;
const KEY_RIGHTMETA: u32 = 126;

fn modifier_for_key(code: u32) -> Option<Modifiers> {
    match code {
        KEY_LEFTSHIFT | KEY_RIGHTSHIFT => Some(Modifiers::SHIFT),
        KEY_LEFTCTRL | KEY_RIGHTCTRL => Some(Modifiers::CONTROL),
        KEY_LEFTALT => Some(Modifiers::ALT),
        KEY_RIGHTALT => Some(Modifiers::GROUP_SWITCH),
        KEY_LEFTMETA | KEY_RIGHTMETA => Some(Modifiers::META),
        _ => None,
    }
}

pub struct KeyboardHandler {
    context: Rc<InputContext>,
    held: SmallVec<[u32; 8]>,
}

impl KeyboardHandler {
    pub fn new(context: Rc<InputContext>) -> Self {
        Self {
            context,
            held: SmallVec::new(),
        }
    }

    /// Feed one key event; non-modifier keys are ignored
    pub fn handle_key(&mut self, code: u32, pressed: bool) {
        if modifier_for_key(code).is_none() {
            return;
        }

        if pressed {
            if !self.held.contains(&code) {
                self.held.push(code);
            }
        } else {
            self.held.retain(|held| *held != code);
        }

        self.context.set_keyboard_modifiers(self.modifiers());
    }

    pub fn modifiers(&self) -> Modifiers {
        self.held
            .iter()
            .filter_map(|code| modifier_for_key(*code))
            .fold(Modifiers::empty(), |acc, m| acc | m)
    }
}
