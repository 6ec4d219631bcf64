use std::sync::Arc;

use chrono::Utc;

use crate::errors::DialogueError;
use crate::models::{Action, Affirmation, ConversationContext, DialogueState};
use crate::services::booking::{self, BookingStore};
use crate::services::catalog;
use crate::services::nlu::{self, NormalizedText};
use crate::services::providers::{AttractionsProvider, WeatherProvider};
use crate::state::AppState;

const HELP_TEXT: &str =
    "You can ask about hotels, flights, weather or attractions. Say 'exit' to quit.";

/// The external collaborators a turn may call.
pub struct Collaborators<'a> {
    pub weather: &'a dyn WeatherProvider,
    pub attractions: &'a dyn AttractionsProvider,
    pub store: &'a dyn BookingStore,
}

#[derive(Debug, Clone)]
pub struct TurnReply {
    pub reply: String,
    pub state: DialogueState,
}

/// Run one turn for `session_id`. Never fails: collaborator errors come
/// back as apology text with the session left as it was.
pub async fn handle_turn(state: &Arc<AppState>, session_id: &str, utterance: &str) -> TurnReply {
    let session = state.sessions.checkout(session_id);
    let mut ctx = session.lock().await;

    let collaborators = Collaborators {
        weather: state.weather.as_ref(),
        attractions: state.attractions.as_ref(),
        store: state.store.as_ref(),
    };

    let before = ctx.state();
    let reply = respond(&mut ctx, utterance, &collaborators).await;
    let after = ctx.state();

    tracing::info!(
        session = session_id,
        from = before.as_str(),
        to = after.as_str(),
        "processed turn"
    );

    TurnReply { reply, state: after }
}

/// What one utterance says, extracted once per turn.
struct Turn {
    text: NormalizedText,
    affirmation: Affirmation,
    bare_action: Option<Action>,
    action: Option<Action>,
    choice: Option<usize>,
    city: Option<String>,
    /// The city when the utterance answers a city prompt.
    reply_city: Option<String>,
}

impl Turn {
    fn analyze(utterance: &str) -> Self {
        let text = nlu::normalize(utterance);
        let city = nlu::extract_city(&text).filter(|c| nlu::is_plausible_city(c));
        let reply_city =
            nlu::city::extract_city_reply(&text).filter(|c| nlu::is_plausible_city(c));
        Self {
            affirmation: nlu::classify(&text),
            bare_action: nlu::bare_action(&text),
            action: nlu::detect_action(&text),
            choice: nlu::extract_choice(&text),
            city,
            reply_city,
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    GlobalCancel,
    PendingCity,
    PendingName,
    BareKeyword,
    IntentDetection,
    Selection,
    Confirmation,
}

/// Evaluated in order every turn; the first rule that applies produces the
/// reply. When none applies the fallback reply is used.
const RULES: [Rule; 7] = [
    Rule::GlobalCancel,
    Rule::PendingCity,
    Rule::PendingName,
    Rule::BareKeyword,
    Rule::IntentDetection,
    Rule::Selection,
    Rule::Confirmation,
];

impl Rule {
    fn as_str(&self) -> &'static str {
        match self {
            Rule::GlobalCancel => "global_cancel",
            Rule::PendingCity => "pending_city",
            Rule::PendingName => "pending_name",
            Rule::BareKeyword => "bare_keyword",
            Rule::IntentDetection => "intent_detection",
            Rule::Selection => "selection",
            Rule::Confirmation => "confirmation",
        }
    }

    /// Apply the rule if its precondition holds, returning the reply.
    async fn apply(
        self,
        ctx: &mut ConversationContext,
        turn: &Turn,
        deps: &Collaborators<'_>,
    ) -> Option<String> {
        match self {
            Rule::GlobalCancel => {
                // A "no" at the confirmation step is handled by that step. At
                // the name prompt only a bare negation cancels, since names
                // may start with anything.
                let cancels = match ctx.state() {
                    DialogueState::AwaitingConfirmation => false,
                    DialogueState::AwaitingName => nlu::affirmation::is_negation(&turn.text),
                    _ => turn.affirmation == Affirmation::Deny,
                };
                if !cancels {
                    return None;
                }
                ctx.reset();
                Some(cancel_reply(&turn.text))
            }
            Rule::PendingCity => {
                if !ctx.awaiting_city {
                    return None;
                }
                let action = ctx.pending_action?;
                let city = turn.reply_city.clone()?;
                Some(perform(ctx, action, city, deps).await)
            }
            Rule::PendingName => {
                if !ctx.awaiting_name {
                    return None;
                }
                Some(finalize_booking(ctx, &turn.text, deps.store).await)
            }
            Rule::BareKeyword => {
                let action = turn.bare_action?;
                if ctx.city.is_some() {
                    return None;
                }
                ctx.await_city(action);
                Some(city_prompt(action))
            }
            Rule::IntentDetection => {
                let action = turn.action?;
                // "the second hotel" picks from the current offer.
                if ctx.state() == DialogueState::OptionsOffered
                    && ctx.pending_action == Some(action)
                    && turn.city.is_none()
                    && turn.choice.is_some()
                {
                    return None;
                }
                match turn.city.clone().or_else(|| ctx.city.clone()) {
                    Some(city) => Some(perform(ctx, action, city, deps).await),
                    None => {
                        ctx.await_city(action);
                        Some(city_prompt(action))
                    }
                }
            }
            Rule::Selection => {
                if ctx.state() != DialogueState::OptionsOffered {
                    return None;
                }
                Some(select_option(ctx, turn.choice))
            }
            Rule::Confirmation => {
                if ctx.state() != DialogueState::AwaitingConfirmation {
                    return None;
                }
                Some(confirm_selection(ctx, turn.affirmation))
            }
        }
    }
}

/// Advance `ctx` by one utterance and return the reply.
pub async fn respond(
    ctx: &mut ConversationContext,
    utterance: &str,
    deps: &Collaborators<'_>,
) -> String {
    let turn = Turn::analyze(utterance);

    for rule in RULES {
        if let Some(reply) = rule.apply(ctx, &turn, deps).await {
            tracing::debug!(rule = rule.as_str(), "dialogue rule applied");
            return reply;
        }
    }

    fallback_reply(ctx)
}

/// Carry out `action` for `city`. On a provider failure the context is left
/// untouched and the apology is returned.
async fn perform(
    ctx: &mut ConversationContext,
    action: Action,
    city: String,
    deps: &Collaborators<'_>,
) -> String {
    match action {
        Action::Hotel | Action::Flight => {
            let options = if action == Action::Hotel {
                catalog::list_hotels(&city)
            } else {
                catalog::list_flights(&city)
            };
            let heading = match action {
                Action::Hotel => format!("Here are the hotel options in {city}:"),
                _ => format!("Here are the flight options to {city}:"),
            };
            let lines: Vec<String> = options
                .iter()
                .enumerate()
                .map(|(i, option)| format!("{}. {}", i + 1, option.describe()))
                .collect();
            let reply = format!(
                "{heading}\n{}\nReply with the option number to book.",
                lines.join("\n")
            );
            ctx.offer(action, city, options);
            reply
        }
        Action::Weather => match deps.weather.lookup(&city).await {
            Ok(report) => {
                ctx.answered(city);
                report
            }
            Err(e) => unavailable("weather", &city, e),
        },
        Action::Attractions => match deps.attractions.lookup(&city).await {
            Ok(places) => {
                let places = if places.is_empty() {
                    catalog::canned_attractions(&city)
                } else {
                    places
                };
                let reply = format!("Top attractions in {city}:\n{}", places.join("\n"));
                ctx.answered(city);
                reply
            }
            Err(e) => unavailable("attractions", &city, e),
        },
    }
}

fn unavailable(provider: &'static str, city: &str, e: anyhow::Error) -> String {
    let err = DialogueError::ProviderUnavailable {
        provider,
        reason: format!("{e:#}"),
    };
    tracing::warn!(city, error = %err, "provider lookup failed");
    err.apology()
}

fn select_option(ctx: &mut ConversationContext, choice: Option<usize>) -> String {
    let count = ctx.offered_options.len();
    let selected = choice.and_then(|choice| ctx.select(choice).cloned());

    match selected {
        Some(option) => format!(
            "You picked {}. Shall I book this {}? (yes/no)",
            option.describe(),
            option.kind().as_str()
        ),
        None => format!("Please choose an option between 1 and {count}."),
    }
}

fn confirm_selection(ctx: &mut ConversationContext, affirmation: Affirmation) -> String {
    match affirmation {
        Affirmation::Affirm => {
            ctx.await_name();
            "Great! Please tell me your name to complete the booking.".to_string()
        }
        Affirmation::Deny => {
            ctx.reset();
            "Booking cancelled. Let me know if there's anything else I can help with.".to_string()
        }
        Affirmation::Neither => {
            let pending = ctx
                .selected_option
                .as_ref()
                .map(|o| o.describe())
                .unwrap_or_default();
            format!("Please reply yes or no. Shall I book {pending}?")
        }
    }
}

async fn finalize_booking(
    ctx: &mut ConversationContext,
    text: &NormalizedText,
    store: &dyn BookingStore,
) -> String {
    let name = nlu::title_case(text.as_str());
    if name.is_empty() {
        return "Please tell me your name to complete the booking.".to_string();
    }

    let (Some(option), Some(city)) = (ctx.selected_option.clone(), ctx.city.clone()) else {
        tracing::warn!("name received without a selected option, resetting");
        ctx.reset();
        return "Sorry, I lost track of your booking. Could you start over?".to_string();
    };

    let record = booking::build_record(
        uuid::Uuid::new_v4().to_string(),
        option,
        city,
        name,
        Utc::now().date_naive(),
    );

    match booking::finalize(store, record).await {
        Ok(confirmation) => {
            ctx.reset();
            confirmation
        }
        Err(e) => {
            tracing::error!(error = %e, "booking finalization failed");
            e.apology()
        }
    }
}

fn city_prompt(action: Action) -> String {
    match action {
        Action::Hotel => "Which city would you like to book a hotel in?",
        Action::Flight => "Which city would you like to book a flight to?",
        Action::Weather => "Which city would you like the weather for?",
        Action::Attractions => "Which city would you like attractions for?",
    }
    .to_string()
}

fn cancel_reply(text: &NormalizedText) -> String {
    if nlu::affirmation::is_exit(text) {
        "Goodbye! Your conversation has been reset.".to_string()
    } else {
        "Okay, cancelled. What else can I help you with?".to_string()
    }
}

fn fallback_reply(ctx: &ConversationContext) -> String {
    match (ctx.state(), ctx.pending_action) {
        (DialogueState::AwaitingCity, Some(action)) => city_prompt(action),
        _ => format!("Sorry, I didn't understand that. {HELP_TEXT}"),
    }
}
