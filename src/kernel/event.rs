use super::time::Turn;
use crate::services::lookup::{LookupError, LookupSummary};

/// Identifies one spoken/displayed output within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputId {
    pub turn: u64,
    pub ordinal: u16,
}

impl OutputId {
    pub fn new(turn: Turn, ordinal: u16) -> Self {
        Self { turn: turn.index, ordinal }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// Something the user typed or said.
    Input(InputEvent),
    /// An encyclopedia lookup started by an earlier response has finished.
    LookupCompleted {
        topic: String,
        outcome: Result<LookupSummary, LookupError>,
    },
    /// The input source is exhausted (e.g. stdin reached EOF).
    InputClosed,
}

#[derive(Debug, Clone)]
pub struct InputEvent {
    pub source: String,
    pub content: InputContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputContent {
    Text(String),
    Control(Control),
}

/// Console controls that bypass interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    ShowHistory,
    ClearHistory,
}

impl InputEvent {
    pub fn text(source: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::Text(text.to_string()),
        }
    }

    pub fn control(source: &str, control: Control) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::Control(control),
        }
    }
}
