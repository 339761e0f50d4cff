//! Remote booking API — wire types and HTTP client.

pub mod client;
pub mod types;

pub use client::{BookingApi, HttpBookingApi};
pub use types::{
    AvailabilityRequest, AvailableSlot, BookingConfirmation, BookingRequest, CustomerPayload,
    DiscountRequest, ParticipantCount,
};
