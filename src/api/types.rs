//! Request/response payloads for the booking API.
//!
//! The backend is a JS service; everything on the wire is camelCase.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::booking::pricing::{Discount, DiscountKind};
use crate::booking::questions::AnswerValue;
use crate::catalog::{Experience, TimeSlot};

/// Response of `GET /widget/list/{listID}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceListResponse {
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

/// One participant category with its requested quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantCount {
    pub category: String,
    pub quantity: u32,
}

/// Body of `POST /widget/available`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub experience_id: String,
    pub participants: Vec<ParticipantCount>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// One availability result: a slot plus the composed price for the
/// requested participant mix.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub time_slot: TimeSlot,
    #[serde(default)]
    pub price: Decimal,
}

/// Response of `POST /widget/available`.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub slots: Vec<AvailableSlot>,
}

/// Body of `POST /widget/discountcode`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRequest {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<DateTime<Utc>>,
    /// Experience id.
    pub experience: String,
    pub extras: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_place_id: Option<String>,
}

/// Successful response of `POST /widget/discountcode`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResponse {
    pub discount: Decimal,
    pub discount_type: DiscountKind,
    #[serde(default)]
    pub applicable_extras: Vec<String>,
    #[serde(default)]
    pub applicable_pickup_places: Vec<String>,
}

impl DiscountResponse {
    /// Attach the validated code and produce the domain discount.
    pub fn into_discount(self, code: impl Into<String>) -> Discount {
        Discount {
            code: code.into(),
            kind: self.discount_type,
            amount: self.discount,
            applicable_extras: self.applicable_extras,
            applicable_pickup_places: self.applicable_pickup_places,
        }
    }
}

/// Error body the API returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
}

/// One recorded answer as submitted to the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: AnswerValue,
}

/// Customer block of the booking payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub newsletter: bool,
}

/// Body of `POST /widget/book`.
///
/// Maps are `BTreeMap` so serialized payloads are deterministic in tests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub experience_id: String,
    pub time_slot_id: String,
    /// Category id → count; zero counts are dropped before building this.
    pub participants: BTreeMap<String, u32>,
    /// Extra id → quantity; zero quantities are dropped.
    pub extras: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_place_id: Option<String>,
    pub customer: CustomerPayload,
    /// Booking-scoped answers only (no per-participant keys).
    pub booking_questions: BTreeMap<String, AnswerPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub agreed_to_cancellation_policy: bool,
    pub source: String,
    pub frontend_url: String,
}

/// Response of `POST /widget/book`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(default)]
    pub session_url: Option<String>,
    #[serde(default)]
    pub booking_id: Option<String>,
}

/// A successful submission: where to redirect the visitor for payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub session_url: String,
    pub booking_id: Option<String>,
}
