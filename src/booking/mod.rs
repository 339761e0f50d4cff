//! The booking wizard core: state reducer, pricing, validation, steps,
//! and final submission.

pub mod contact;
pub mod pickup;
pub mod pricing;
pub mod questions;
pub mod state;
pub mod submission;
pub mod wizard;

pub use contact::{ContactDetails, ContactField};
pub use pickup::{PickupTimes, pickup_times};
pub use pricing::{Discount, DiscountKind, PriceBreakdown, price};
pub use questions::{Answer, AnswerValue};
pub use state::BookingState;
pub use wizard::{Step, Wizard};
