//! Immutable data model for experiences and time slots as served by the
//! booking API.

pub mod experience;
pub mod timeslot;

pub use experience::{
    BookingQuestion, Experience, InputType, PricingCategory, QuestionScope, RequiredStage,
};
pub use timeslot::{CancellationPolicy, CategoryPrice, PickupPlace, SlotExtra, TimeSlot};
