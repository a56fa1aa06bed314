//! Simulated key presses through `SendInput`.

use std::mem;

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, VIRTUAL_KEY, VK_CONTROL, VK_ESCAPE, VK_HOME, VK_LEFT,
    VK_RIGHT,
};

use crate::error::{DriverError, DriverResult};
use crate::presentation::{Key, KeySender, KeyStroke};

fn virtual_key(key: Key) -> VIRTUAL_KEY {
    match key {
        Key::Left => VK_LEFT,
        Key::Right => VK_RIGHT,
        Key::Home => VK_HOME,
        Key::Escape => VK_ESCAPE,
        // 'A'..'Z' share their ASCII codes
        Key::Letter(c) => VIRTUAL_KEY(c.to_ascii_uppercase() as u16),
    }
}

fn is_extended(vk: VIRTUAL_KEY) -> bool {
    matches!(vk, VK_LEFT | VK_RIGHT | VK_HOME)
}

fn key_input(vk: VIRTUAL_KEY, up: bool) -> INPUT {
    let mut flags = if is_extended(vk) {
        KEYEVENTF_EXTENDEDKEY
    } else {
        KEYBD_EVENT_FLAGS(0)
    };
    if up {
        flags |= KEYEVENTF_KEYUP;
    }
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

/// Sends to whichever window has focus.
#[derive(Default)]
pub struct SendInputKeys;

impl KeySender for SendInputKeys {
    fn send(&mut self, stroke: KeyStroke) -> DriverResult<()> {
        let vk = virtual_key(stroke.key);
        let mut inputs = Vec::with_capacity(4);
        if stroke.ctrl {
            inputs.push(key_input(VK_CONTROL, false));
        }
        inputs.push(key_input(vk, false));
        inputs.push(key_input(vk, true));
        if stroke.ctrl {
            inputs.push(key_input(VK_CONTROL, true));
        }

        let sent = unsafe { SendInput(&inputs, mem::size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(DriverError::call("SendInput", "input was blocked"));
        }
        Ok(())
    }
}
