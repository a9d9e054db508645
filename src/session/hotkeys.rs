/// Physical key of a keyboard event, reduced to what the loop reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// The space bar.
    Space,
    /// A printable character as reported by the host (case as typed).
    Char(char),
    /// Anything else.
    Other,
}

/// Modifier state of a keyboard event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
    /// Command / Super / Windows key held.
    pub meta: bool,
    /// Alt / Option held.
    pub alt: bool,
}

impl Modifiers {
    /// Platform "command" modifier: Cmd on macOS, Ctrl elsewhere. Either one counts.
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    /// The key.
    pub key: Key,
    /// Modifiers held while pressing it.
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// Key press without modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Key press with the command modifier (and optionally shift).
    pub fn command(key: Key, shift: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                shift,
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }
}

/// What a hotkey asks the loop to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Space: pause or resume.
    TogglePlay,
    /// Cmd/Ctrl+S: export the current frame.
    SaveFrame,
    /// Cmd/Ctrl+Shift+S: start recording, or stop an active recording.
    ToggleRecording,
}

/// Map a key press to a loop action.
pub fn hotkey_action(input: &KeyInput) -> Option<HotkeyAction> {
    let m = input.modifiers;
    match input.key {
        Key::Space => Some(HotkeyAction::TogglePlay),
        // Hosts report 'S' for shift+s on most layouts.
        Key::Char(c) if c.eq_ignore_ascii_case(&'s') && m.command() => Some(if m.shift {
            HotkeyAction::ToggleRecording
        } else {
            HotkeyAction::SaveFrame
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/hotkeys.rs"]
mod tests;
