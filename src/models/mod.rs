pub mod booking;
pub mod conversation;
pub mod intent;
pub mod option;

pub use booking::{BookingKind, BookingRecord};
pub use conversation::{ConversationContext, DialogueState};
pub use intent::{Action, Affirmation};
pub use option::{FlightOption, HotelOption, TravelOption};
