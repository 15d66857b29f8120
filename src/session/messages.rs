//! Message types for the editing session
//!
//! This module contains:
//! - `InputEvent`, the platform-neutral input stream fed into a session
//! - `Msg` enum with nested sub-enums for organized message handling
//! - The session outcome and result types

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::config::{ShapeColor, Tool};

// ============================================================================
// Input Events
// ============================================================================

/// Named or character key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Enter,
    Backspace,
    Character(char),
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
    };

    pub fn control(&self) -> bool {
        self.ctrl
    }

    pub fn shift(&self) -> bool {
        self.shift
    }
}

/// One input event in screen coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Primary button pressed
    PointerDown { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    PointerUp { x: i32, y: i32 },
    /// Primary button double activation
    DoubleClick { x: i32, y: i32 },
    /// Secondary (right) button pressed
    SecondaryDown { x: i32, y: i32 },
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Text input, delivered separately from key presses
    Char { ch: char },
}

impl InputEvent {
    pub fn pointer_down(x: i32, y: i32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: i32, y: i32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: i32, y: i32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_with(key: Key, modifiers: Modifiers) -> Self {
        Self::Key { key, modifiers }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// History messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMsg {
    /// Undo last annotation
    Undo,
    /// Redo undone annotation
    Redo,
}

/// Tool and style selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMsg {
    Select(Tool),
    SetStrokeWidth(u32),
    SetColor(ShapeColor),
}

/// Text entry while editing a text annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMsg {
    Insert(char),
    /// Remove the last character
    Backspace,
}

/// Session-level actions whose effect depends on the interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMsg {
    /// Escape: abort the current action, or cancel the session
    Escape,
    /// Enter: finish text entry, or commit the session
    Confirm,
    /// Toolbar save: finish pending text and commit
    Save,
    /// Toolbar cancel
    Cancel,
}

/// Main message enum with nested sub-enums
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Draw(DrawMsg),
    Tool(ToolMsg),
    Text(TextMsg),
    Session(SessionMsg),
}

impl Msg {
    pub fn undo() -> Self {
        Msg::Draw(DrawMsg::Undo)
    }

    pub fn redo() -> Self {
        Msg::Draw(DrawMsg::Redo)
    }

    pub fn select_tool(tool: Tool) -> Self {
        Msg::Tool(ToolMsg::Select(tool))
    }

    pub fn stroke_width(width: u32) -> Self {
        Msg::Tool(ToolMsg::SetStrokeWidth(width))
    }

    pub fn color(color: ShapeColor) -> Self {
        Msg::Tool(ToolMsg::SetColor(color))
    }

    pub fn insert_char(ch: char) -> Self {
        Msg::Text(TextMsg::Insert(ch))
    }

    pub fn backspace() -> Self {
        Msg::Text(TextMsg::Backspace)
    }

    pub fn escape() -> Self {
        Msg::Session(SessionMsg::Escape)
    }

    pub fn confirm() -> Self {
        Msg::Session(SessionMsg::Confirm)
    }

    pub fn save() -> Self {
        Msg::Session(SessionMsg::Save)
    }

    pub fn cancel() -> Self {
        Msg::Session(SessionMsg::Cancel)
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Committed,
    Cancelled,
}

/// Result handed back to the caller of an editing session
#[derive(Debug, Clone, PartialEq)]
pub struct EditorResult {
    /// Flattened selection with annotations; `None` when cancelled
    pub image: Option<RgbaImage>,
    pub cancelled: bool,
}

impl EditorResult {
    pub fn cancelled() -> Self {
        Self {
            image: None,
            cancelled: true,
        }
    }

    pub fn committed(image: RgbaImage) -> Self {
        Self {
            image: Some(image),
            cancelled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_script_parses() {
        let json = r#"[
            {"type": "pointer_down", "x": 10, "y": 20},
            {"type": "key", "key": {"character": "z"}, "modifiers": {"ctrl": true}},
            {"type": "key", "key": "enter"},
            {"type": "char", "ch": "é"}
        ]"#;
        let events: Vec<InputEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::pointer_down(10, 20),
                InputEvent::key_with(Key::Character('z'), Modifiers::CTRL),
                InputEvent::key(Key::Enter),
                InputEvent::Char { ch: 'é' },
            ]
        );
    }
}
