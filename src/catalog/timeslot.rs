//! Time slot model — one bookable date/time instance of an experience.
//!
//! Slots are fetched fresh on every availability query and never cached
//! beyond the current poll.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-slot price for one pricing category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPrice {
    pub category_id: String,
    pub price: Decimal,
}

/// An optional add-on offered on a slot, priced per booking or per person.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotExtra {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub per_person: bool,
}

/// A transportation pickup option tied to a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupPlace {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Minutes before slot start the pickup departs.
    #[serde(default)]
    pub pickup_time: String,
    #[serde(default)]
    pub pickup_window: u32,
    #[serde(default)]
    pub price: Decimal,
}

/// One rule of a cancellation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRule {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub days_before: u32,
}

/// Cancellation policy attached to a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationPolicy {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rules: Vec<CancellationRule>,
    #[serde(default)]
    pub fixed_fee: Decimal,
}

/// A specific bookable date/time instance of an experience with its own
/// capacity and pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "experience")]
    pub experience_id: String,
    pub start: DateTime<Utc>,
    pub max_participants: u32,
    #[serde(default)]
    pub booked_places: u32,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub currency: Option<String>,
    /// Fallback display price when no per-category price matches.
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub pricing_categories: Vec<CategoryPrice>,
    #[serde(default)]
    pub extras: Vec<SlotExtra>,
    #[serde(default)]
    pub pickup_places: Vec<PickupPlace>,
    #[serde(default)]
    pub transport_per_person: bool,
    #[serde(default)]
    pub cancellation_policy: Option<CancellationPolicy>,
    #[serde(default)]
    pub rate_description: String,
}

impl TimeSlot {
    /// Seats still open on this slot.
    pub fn remaining_places(&self) -> u32 {
        self.max_participants.saturating_sub(self.booked_places)
    }

    /// Remaining capacity as a fraction of the maximum, in `0.0..=1.0`.
    pub fn capacity_ratio(&self) -> f64 {
        if self.max_participants == 0 {
            return 0.0;
        }
        f64::from(self.remaining_places()) / f64::from(self.max_participants)
    }

    /// The calendar date (UTC) this slot starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Local clock time label for the slot start, e.g. "09:30".
    pub fn time_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn category_price(&self, category_id: &str) -> Option<Decimal> {
        self.pricing_categories
            .iter()
            .find(|p| p.category_id == category_id)
            .map(|p| p.price)
    }

    pub fn extra(&self, extra_id: &str) -> Option<&SlotExtra> {
        self.extras.iter().find(|e| e.id == extra_id)
    }

    pub fn pickup_place(&self, pickup_id: &str) -> Option<&PickupPlace> {
        self.pickup_places.iter().find(|p| p.id == pickup_id)
    }
}
