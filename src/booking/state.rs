//! Booking state reducer.
//!
//! `BookingState` is the single mutable aggregate for one in-progress
//! booking. Every mutation recomputes `total`/`tax` synchronously through
//! the pricing calculator; the two are never written from anywhere else.
//! The state is created when an experience is selected and discarded when
//! the booking modal closes.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::booking::contact::{ContactDetails, ContactField};
use crate::booking::pickup::{self, PickupTimes};
use crate::booking::pricing::{self, Discount};
use crate::booking::questions::{Answer, AnswerValue, answer_key};
use crate::catalog::{Experience, TimeSlot};
use chrono::NaiveDate;

/// The wizard's mutable data for one booking in progress.
#[derive(Debug, Clone, Serialize)]
pub struct BookingState {
    #[serde(skip)]
    pub experience: Arc<Experience>,
    pub date: Option<NaiveDate>,
    /// Clock-time label of the chosen slot, e.g. "09:30".
    pub time: Option<String>,
    pub time_slot: Option<TimeSlot>,
    /// Category id → participant count. Zero counts are kept so the UI can
    /// render steppers; submission filters them out.
    pub participants: HashMap<String, u32>,
    /// Selected extra ids in selection order.
    pub extras: Vec<String>,
    /// Extra id → quantity for per-person extras.
    pub extra_quantities: HashMap<String, u32>,
    /// Selected pickup place id, if any.
    pub pickup: Option<String>,
    pub contact: ContactDetails,
    /// Keyed by `questionId` or `questionId-participantSlot`.
    pub answers: HashMap<String, Answer>,
    pub discount: Option<Discount>,
    pub agreed_to_cancellation_policy: bool,
    pub total: Decimal,
    pub tax: Decimal,
}

impl BookingState {
    /// Start a booking for an experience. Contact details survive across
    /// experience switches so the visitor never retypes them.
    pub fn new(experience: Arc<Experience>, contact: ContactDetails) -> Self {
        Self {
            experience,
            date: None,
            time: None,
            time_slot: None,
            participants: HashMap::new(),
            extras: Vec::new(),
            extra_quantities: HashMap::new(),
            pickup: None,
            contact,
            answers: HashMap::new(),
            discount: None,
            agreed_to_cancellation_policy: false,
            total: Decimal::ZERO,
            tax: Decimal::ZERO,
        }
    }

    /// Recompute `total`/`tax` from the pricing calculator. Called at the
    /// end of every mutation that can change the price.
    fn recompute(&mut self) {
        let breakdown = pricing::price(self);
        self.total = breakdown.total;
        self.tax = breakdown.tax;
    }

    pub fn participant_count(&self, category_id: &str) -> u32 {
        self.participants.get(category_id).copied().unwrap_or(0)
    }

    /// Sum of participants across all categories.
    pub fn total_participants(&self) -> u32 {
        self.participants.values().sum()
    }

    pub fn extra_quantity(&self, extra_id: &str) -> u32 {
        self.extra_quantities.get(extra_id).copied().unwrap_or(1)
    }

    pub fn has_participants(&self) -> bool {
        self.participants.values().any(|&count| count > 0)
    }

    /// Pickup departure and return times for the selected pickup place.
    pub fn pickup_times(&self) -> Option<PickupTimes> {
        let slot = self.time_slot.as_ref()?;
        let place = slot.pickup_place(self.pickup.as_deref()?)?;
        Some(pickup::pickup_times(slot, place, self.experience.duration))
    }

    /// Currency the booking is quoted in: slot wins over experience.
    pub fn currency(&self) -> &str {
        self.time_slot
            .as_ref()
            .and_then(|s| s.currency.as_deref())
            .unwrap_or(&self.experience.currency)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Adjust a category's participant count by a delta, clamping at zero.
    pub fn update_participants(&mut self, category_id: &str, delta: i32) {
        let current = self.participant_count(category_id);
        let updated = current.saturating_add_signed(delta);
        self.participants.insert(category_id.to_string(), updated);
        self.recompute();
    }

    /// Select a date. Clears time, slot, and pickup; totals go to zero.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.time = None;
        self.time_slot = None;
        self.pickup = None;
        self.recompute();
    }

    /// Select a time slot. Pickup resets because pickup places belong to
    /// the slot; totals are recomputed from the new slot's prices.
    pub fn select_time(&mut self, time: &str, slot: TimeSlot) {
        self.date.get_or_insert(slot.date());
        self.time = Some(time.to_string());
        self.time_slot = Some(slot);
        self.pickup = None;
        self.recompute();
    }

    /// Select (or clear) a pickup place on the current slot. Ids not
    /// offered by the slot are treated as no pickup.
    pub fn select_pickup(&mut self, pickup_id: Option<&str>) {
        let Some(slot) = self.time_slot.as_ref() else {
            return;
        };
        self.pickup = pickup_id
            .filter(|id| slot.pickup_place(id).is_some())
            .map(str::to_string);
        self.recompute();
    }

    /// Toggle a non-per-person extra. First selection records quantity 1;
    /// removal deletes the quantity entry.
    pub fn toggle_extra(&mut self, extra_id: &str) {
        if let Some(pos) = self.extras.iter().position(|id| id == extra_id) {
            self.extras.remove(pos);
            self.extra_quantities.remove(extra_id);
        } else {
            self.extras.push(extra_id.to_string());
            self.extra_quantities
                .entry(extra_id.to_string())
                .or_insert(1);
        }
        self.recompute();
    }

    /// Set a per-person extra's quantity, capped at the total participant
    /// count. Zero removes the extra.
    pub fn set_extra_quantity(&mut self, extra_id: &str, quantity: u32) {
        let capped = quantity.min(self.total_participants());
        if capped == 0 {
            self.extras.retain(|id| id != extra_id);
            self.extra_quantities.remove(extra_id);
        } else {
            if !self.extras.iter().any(|id| id == extra_id) {
                self.extras.push(extra_id.to_string());
            }
            self.extra_quantities.insert(extra_id.to_string(), capped);
        }
        self.recompute();
    }

    pub fn update_contact(&mut self, contact: ContactDetails) {
        self.contact = contact;
    }

    /// Edit one contact field in place, as the contact form does per input.
    pub fn set_contact_field(&mut self, field: ContactField, value: &str) {
        self.contact.set(field, value);
    }

    /// Record an answer for a question, optionally scoped to a participant
    /// slot (`{categoryId}-{index}` or `extra-{index}`).
    pub fn set_answer(
        &mut self,
        question_id: &str,
        value: impl Into<AnswerValue>,
        participant_slot: Option<&str>,
    ) {
        let key = answer_key(question_id, participant_slot);
        self.answers.insert(
            key,
            Answer {
                value: value.into(),
                participant_slot: participant_slot.map(str::to_string),
            },
        );
    }

    pub fn apply_discount(&mut self, discount: Discount) {
        self.discount = Some(discount);
        self.recompute();
    }

    pub fn clear_discount(&mut self) {
        self.discount = None;
        self.recompute();
    }

    pub fn set_policy_agreement(&mut self, agreed: bool) {
        self.agreed_to_cancellation_policy = agreed;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::booking::pricing;

    fn experience() -> Arc<Experience> {
        Arc::new(
            serde_json::from_value(serde_json::json!({
                "_id": "exp-1",
                "name": "Rafting",
                "currency": "EUR",
                "usedPricingCategories": [
                    { "category": { "_id": "cat-adult", "name": "Adult" }, "price": 50 }
                ]
            }))
            .unwrap(),
        )
    }

    fn slot() -> TimeSlot {
        serde_json::from_value(serde_json::json!({
            "_id": "slot-1",
            "experience": "exp-1",
            "start": "2026-09-12T09:30:00Z",
            "maxParticipants": 12,
            "transportPerPerson": false,
            "pricingCategories": [ { "categoryId": "cat-adult", "price": 50 } ],
            "extras": [
                { "_id": "extra-lunch", "name": "Lunch", "price": 12, "perPerson": true },
                { "_id": "extra-photos", "name": "Photos", "price": 15, "perPerson": false }
            ],
            "pickupPlaces": [ { "_id": "pickup-hotel", "name": "Hotel", "price": 10 } ]
        }))
        .unwrap()
    }

    fn totals_match_calculator(state: &BookingState) -> bool {
        let p = pricing::price(state);
        state.total == p.total && state.tax == p.tax
    }

    #[test]
    fn every_mutation_keeps_totals_in_sync_with_calculator() {
        let mut s = BookingState::new(experience(), Default::default());
        s.update_participants("cat-adult", 2);
        assert!(totals_match_calculator(&s));
        s.select_time("09:30", slot());
        assert!(totals_match_calculator(&s));
        s.select_pickup(Some("pickup-hotel"));
        assert!(totals_match_calculator(&s));
        s.toggle_extra("extra-photos");
        assert!(totals_match_calculator(&s));
        s.set_extra_quantity("extra-lunch", 2);
        assert!(totals_match_calculator(&s));
        s.update_participants("cat-adult", -1);
        assert!(totals_match_calculator(&s));
    }

    #[test]
    fn participant_decrement_clamps_at_zero() {
        let mut s = BookingState::new(experience(), Default::default());
        s.update_participants("cat-adult", 1);
        s.update_participants("cat-adult", -3);
        assert_eq!(s.participant_count("cat-adult"), 0);
    }

    #[test]
    fn selecting_a_new_date_clears_slot_pickup_and_totals() {
        let mut s = BookingState::new(experience(), Default::default());
        s.update_participants("cat-adult", 2);
        s.select_time("09:30", slot());
        s.select_pickup(Some("pickup-hotel"));
        assert!(s.total > Decimal::ZERO);

        s.select_date("2026-09-13".parse().unwrap());
        assert!(s.time.is_none());
        assert!(s.time_slot.is_none());
        assert!(s.pickup.is_none());
        assert_eq!(s.total, Decimal::ZERO);
        assert_eq!(s.tax, Decimal::ZERO);
    }

    #[test]
    fn selecting_a_time_resets_pickup() {
        let mut s = BookingState::new(experience(), Default::default());
        s.update_participants("cat-adult", 2);
        s.select_time("09:30", slot());
        s.select_pickup(Some("pickup-hotel"));
        assert!(s.pickup.is_some());

        s.select_time("11:30", slot());
        assert!(s.pickup.is_none());
        assert_eq!(s.total, dec!(100));
    }

    #[test]
    fn pickup_selection_without_slot_is_a_noop() {
        let mut s = BookingState::new(experience(), Default::default());
        s.select_pickup(Some("pickup-hotel"));
        assert!(s.pickup.is_none());
    }

    #[test]
    fn unknown_pickup_id_clears_selection() {
        let mut s = BookingState::new(experience(), Default::default());
        s.select_time("09:30", slot());
        s.select_pickup(Some("pickup-nowhere"));
        assert!(s.pickup.is_none());
    }

    #[test]
    fn extra_toggle_defaults_quantity_and_removal_deletes_it() {
        let mut s = BookingState::new(experience(), Default::default());
        s.update_participants("cat-adult", 2);
        s.select_time("09:30", slot());

        s.toggle_extra("extra-photos");
        assert_eq!(s.extra_quantities.get("extra-photos"), Some(&1));

        s.toggle_extra("extra-photos");
        assert!(!s.extras.contains(&"extra-photos".to_string()));
        assert!(s.extra_quantities.get("extra-photos").is_none());
    }

    #[test]
    fn per_person_quantity_caps_at_participant_count() {
        let mut s = BookingState::new(experience(), Default::default());
        s.update_participants("cat-adult", 2);
        s.select_time("09:30", slot());

        s.set_extra_quantity("extra-lunch", 5);
        assert_eq!(s.extra_quantity("extra-lunch"), 2);

        s.set_extra_quantity("extra-lunch", 0);
        assert!(!s.extras.contains(&"extra-lunch".to_string()));
    }

    #[test]
    fn pickup_times_follow_the_selected_place() {
        let experience: Arc<Experience> = Arc::new(
            serde_json::from_value(serde_json::json!({
                "_id": "exp-1",
                "name": "Rafting",
                "duration": 120,
                "usedPricingCategories": [
                    { "category": { "_id": "cat-adult", "name": "Adult" }, "price": 50 }
                ]
            }))
            .unwrap(),
        );
        let slot: TimeSlot = serde_json::from_value(serde_json::json!({
            "_id": "slot-1",
            "experience": "exp-1",
            "start": "2026-09-12T09:30:00Z",
            "maxParticipants": 12,
            "pickupPlaces": [
                { "_id": "pickup-hotel", "name": "Hotel", "pickupTime": "30",
                  "pickupWindow": 15, "price": 10 }
            ]
        }))
        .unwrap();

        let mut s = BookingState::new(experience, Default::default());
        assert!(s.pickup_times().is_none());

        s.select_time("09:30", slot);
        assert!(s.pickup_times().is_none());

        s.select_pickup(Some("pickup-hotel"));
        let times = s.pickup_times().unwrap();
        assert_eq!(times.pickup_label(), "09:00-09:15");
        assert_eq!(times.return_label(), "11:30");
    }

    #[test]
    fn contact_fields_are_editable_one_at_a_time() {
        let mut s = BookingState::new(experience(), Default::default());
        s.set_contact_field(ContactField::FirstName, "Jo");
        s.set_contact_field(ContactField::LastName, "Doe");
        s.set_contact_field(ContactField::Email, "jo@example.com");
        s.set_contact_field(ContactField::Phone, "+358 40123456");
        s.set_contact_field(ContactField::Nationality, "FI");
        assert!(s.contact.is_complete());

        s.set_contact_field(ContactField::Email, "broken");
        assert!(!s.contact.is_complete());
    }

    #[test]
    fn contact_details_survive_experience_switch() {
        let mut s = BookingState::new(experience(), Default::default());
        s.update_contact(ContactDetails {
            first_name: "Jo".into(),
            ..Default::default()
        });
        let s2 = BookingState::new(experience(), s.contact.clone());
        assert_eq!(s2.contact.first_name, "Jo");
        assert!(s2.participants.is_empty());
    }
}
