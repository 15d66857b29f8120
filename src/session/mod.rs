//! Editing session
//!
//! This module contains:
//! - Input events and the messages they are translated into
//! - Keyboard shortcut mapping
//! - The session state machine driving selection edits and annotation

pub mod messages;
pub mod shortcuts;
pub mod state;

pub use messages::{EditorResult, InputEvent, Key, Modifiers, Msg, SessionOutcome};
pub use state::{EditorSession, InteractionState, SceneSnapshot, run_session};
