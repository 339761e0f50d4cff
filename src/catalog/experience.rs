//! Experience model — the bookable product as listed by the API.
//!
//! Experiences are immutable once loaded; all mutable booking data lives in
//! `booking::state::BookingState`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::timeslot::PickupPlace;

/// An age-banded participant type with its own per-slot price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age_from: u32,
    #[serde(default)]
    pub age_to: u32,
    /// Seats one participant of this category consumes in a slot.
    #[serde(default)]
    pub places: u32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub required: bool,
}

impl PricingCategory {
    /// Human-readable age band, e.g. "7-12 years".
    pub fn age_band(&self) -> String {
        format!("{}-{} years", self.age_from, self.age_to)
    }
}

/// Wire shape: the list nests the category under a `category` key together
/// with a list-level default price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedPricingCategory {
    pub category: PricingCategory,
    #[serde(default)]
    pub price: Decimal,
}

/// When an answer to a question becomes mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiredStage {
    BeforeCheckout,
    AfterBooking,
}

/// Input widget the host should render for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    ShortText,
    Textarea,
    Checkbox,
    List,
}

/// What a question is scoped to — asked once, per participant category, or
/// per selected extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Booking,
    Category,
    Extra,
}

/// Tagged view over a question's scope with its applicability list.
///
/// Validation and rendering both go through this single variant instead of
/// re-branching on `kind` + applicability fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionScope<'a> {
    /// Asked once per booking.
    Booking,
    /// Asked only when a listed category has participants.
    Category { applicable: &'a [String] },
    /// Asked only when a listed extra is selected.
    Extra { applicable: &'a [String] },
}

/// A question the operator attached to an experience.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub required_stage: RequiredStage,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub per_person: bool,
    pub input_type: InputType,
    #[serde(default)]
    pub applicable_categories: Vec<String>,
    #[serde(default)]
    pub applicable_extras: Vec<String>,
}

impl BookingQuestion {
    /// The tagged scope view used by answer-slot expansion.
    pub fn scope(&self) -> QuestionScope<'_> {
        match self.kind {
            QuestionKind::Booking => QuestionScope::Booking,
            QuestionKind::Category => QuestionScope::Category {
                applicable: &self.applicable_categories,
            },
            QuestionKind::Extra => QuestionScope::Extra {
                applicable: &self.applicable_extras,
            },
        }
    }

    /// Whether this question must be answered before checkout.
    pub fn required_before_checkout(&self) -> bool {
        self.required && self.required_stage == RequiredStage::BeforeCheckout
    }
}

/// A bookable experience. Immutable once loaded from the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    /// Duration in minutes.
    #[serde(default)]
    pub duration: u32,
    /// The API is inconsistent about the field name; `timeZone` wins when set.
    #[serde(default, alias = "timeZone")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    /// Default display price when no slot is selected yet.
    #[serde(default)]
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub meeting_point: String,
    /// Booking cutoff in hours before the slot start.
    #[serde(default)]
    pub cutoff_time: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub transport_available: bool,
    #[serde(default)]
    pub all_pickup_places: Vec<PickupPlace>,
    #[serde(default)]
    pub used_pricing_categories: Vec<UsedPricingCategory>,
    #[serde(default)]
    pub booking_questions: Vec<BookingQuestion>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Experience {
    /// Timezone with the original's fallback chain (`timeZone` → `timezone` → UTC).
    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or("UTC")
    }

    /// The participant categories offered on this experience.
    pub fn pricing_categories(&self) -> impl Iterator<Item = &PricingCategory> {
        self.used_pricing_categories.iter().map(|u| &u.category)
    }

    pub fn pricing_category(&self, id: &str) -> Option<&PricingCategory> {
        self.pricing_categories().find(|c| c.id == id)
    }

    /// Questions that must be answered before checkout.
    pub fn checkout_questions(&self) -> impl Iterator<Item = &BookingQuestion> {
        self.booking_questions
            .iter()
            .filter(|q| q.required_before_checkout())
    }
}
