use serde::{Deserialize, Serialize};

use super::{Action, TravelOption};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    Idle,
    AwaitingCity,
    OptionsOffered,
    AwaitingConfirmation,
    AwaitingName,
}

impl DialogueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueState::Idle => "idle",
            DialogueState::AwaitingCity => "awaiting_city",
            DialogueState::OptionsOffered => "options_offered",
            DialogueState::AwaitingConfirmation => "awaiting_confirmation",
            DialogueState::AwaitingName => "awaiting_name",
        }
    }
}

/// Per-session dialogue memory.
///
/// Fields are public for inspection and serialization; the state machine
/// only changes them through the transition methods below, which keep the
/// following true:
/// - at most one of `awaiting_city` / `awaiting_name` is set,
/// - `selected_option` is only set while `offered_options` is non-empty,
/// - `awaiting_name` is only set once an option has been selected and affirmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationContext {
    pub pending_action: Option<Action>,
    pub city: Option<String>,
    pub offered_options: Vec<TravelOption>,
    pub selected_option: Option<TravelOption>,
    pub awaiting_city: bool,
    pub awaiting_name: bool,
}

impl ConversationContext {
    pub fn state(&self) -> DialogueState {
        if self.awaiting_name {
            DialogueState::AwaitingName
        } else if self.selected_option.is_some() {
            DialogueState::AwaitingConfirmation
        } else if !self.offered_options.is_empty() {
            DialogueState::OptionsOffered
        } else if self.awaiting_city {
            DialogueState::AwaitingCity
        } else {
            DialogueState::Idle
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Park `action` until the next turn supplies a city. Any in-flight
    /// selection is abandoned; the last known city is kept.
    pub fn await_city(&mut self, action: Action) {
        self.clear_flow();
        self.pending_action = Some(action);
        self.awaiting_city = true;
    }

    /// Record a list of options awaiting selection.
    pub fn offer(&mut self, action: Action, city: String, options: Vec<TravelOption>) {
        self.clear_flow();
        self.pending_action = Some(action);
        self.city = Some(city);
        self.offered_options = options;
    }

    /// Record a single-shot answer (weather, attractions) about `city`.
    pub fn answered(&mut self, city: String) {
        self.clear_flow();
        self.city = Some(city);
    }

    /// Select the 1-based `choice` from the offered options.
    pub fn select(&mut self, choice: usize) -> Option<&TravelOption> {
        let option = self.offered_options.get(choice.checked_sub(1)?)?.clone();
        self.selected_option = Some(option);
        self.selected_option.as_ref()
    }

    pub fn await_name(&mut self) {
        if self.selected_option.is_some() {
            self.awaiting_city = false;
            self.awaiting_name = true;
        }
    }

    fn clear_flow(&mut self) {
        self.pending_action = None;
        self.offered_options.clear();
        self.selected_option = None;
        self.awaiting_city = false;
        self.awaiting_name = false;
    }
}
