pub mod booking;
pub mod catalog;
pub mod conversation;
pub mod nlu;
pub mod providers;
pub mod sessions;
