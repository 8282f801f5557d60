//! Views of the application
//!
//! Listings own their state and render through the table contract or the
//! card templates; the other views are rendered straight from templates.

pub mod details;
pub mod home;
pub mod login;
pub mod not_found;
pub mod rockets;
pub mod ships;

pub use details::{Detail, DetailState};
pub use login::{LoginForm, LoginOutcome};
pub use rockets::{RocketTab, RocketsPage};
