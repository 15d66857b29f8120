use crate::config::Tool;
use crate::session::messages::{Key, Modifiers, Msg};

/// Map a key press to a message.
///
/// Digit shortcuts only apply while no text is being typed, so digits can
/// be entered into text annotations.
pub fn handle_key_event(key: Key, modifiers: Modifiers, text_editing: bool) -> Option<Msg> {
    match key {
        Key::Escape => Some(Msg::escape()),
        Key::Enter => Some(Msg::confirm()),
        Key::Backspace if text_editing => Some(Msg::backspace()),
        // Undo/redo shortcuts
        Key::Character(c)
            if c.eq_ignore_ascii_case(&'z') && modifiers.control() && !modifiers.shift() =>
        {
            Some(Msg::undo())
        }
        Key::Character(c)
            if (c.eq_ignore_ascii_case(&'y') && modifiers.control())
                || (c.eq_ignore_ascii_case(&'z') && modifiers.control() && modifiers.shift()) =>
        {
            Some(Msg::redo())
        }
        // Tool selection by toolbar position
        Key::Character(c) if !modifiers.control() && !text_editing => c
            .to_digit(10)
            .and_then(Tool::from_shortcut)
            .map(Msg::select_tool),
        _ => None,
    }
}
