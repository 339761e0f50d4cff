//! End-to-end booking flow tests.
//!
//! Each test mounts a widget against an in-memory `BookingApi`, walks the
//! wizard with real state mutations, and asserts on the payload the mock
//! receives — the same contract the live backend sees.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;

use booking_widget::api::types::{
    AvailabilityRequest, AvailableSlot, BookingConfirmation, BookingRequest, DiscountRequest,
};
use booking_widget::api::BookingApi;
use booking_widget::booking::{submission, ContactDetails, Discount, DiscountKind, Step};
use booking_widget::catalog::{Experience, TimeSlot};
use booking_widget::config::WidgetConfig;
use booking_widget::error::{ApiError, BookingError, DiscountError, Error};
use booking_widget::widget::{Widget, WidgetRegistry};

/// Mock backend: canned catalog and slots, recorded booking submissions.
struct MockApi {
    experiences: Vec<Experience>,
    slots: Vec<AvailableSlot>,
    discount: Option<Discount>,
    discount_error: Option<&'static str>,
    reject_booking_with: Option<&'static str>,
    bookings: Mutex<Vec<BookingRequest>>,
}

impl MockApi {
    fn new() -> Self {
        Self {
            experiences: vec![rafting_experience()],
            slots: vec![available_slot()],
            discount: None,
            discount_error: None,
            reject_booking_with: None,
            bookings: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BookingApi for MockApi {
    async fn list_experiences(&self, _list_id: &str) -> Result<Vec<Experience>, ApiError> {
        Ok(self.experiences.clone())
    }

    async fn available_slots(
        &self,
        _request: &AvailabilityRequest,
    ) -> Result<Vec<AvailableSlot>, ApiError> {
        Ok(self.slots.clone())
    }

    async fn validate_discount(&self, _request: &DiscountRequest) -> Result<Discount, Error> {
        if let Some(message) = self.discount_error {
            return Err(DiscountError::from_api_message(message).into());
        }
        self.discount
            .clone()
            .ok_or_else(|| DiscountError::Invalid.into())
    }

    async fn submit_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, Error> {
        if let Some(reason) = self.reject_booking_with {
            if reason.contains("Not enough space in time slot") {
                return Err(BookingError::SlotFull.into());
            }
            return Err(BookingError::Rejected {
                reason: reason.to_string(),
            }
            .into());
        }
        self.bookings.lock().unwrap().push(request.clone());
        Ok(BookingConfirmation {
            session_url: "https://pay.example/session/abc".into(),
            booking_id: Some("bk-1".into()),
        })
    }
}

fn rafting_experience() -> Experience {
    serde_json::from_value(serde_json::json!({
        "_id": "exp-1",
        "name": "River Rafting",
        "currency": "EUR",
        "usedPricingCategories": [
            { "category": { "_id": "cat-adult", "name": "Adult" }, "price": 50 },
            { "category": { "_id": "cat-child", "name": "Child" }, "price": 25 }
        ],
        "bookingQuestions": [
            {
                "_id": "q-diet",
                "question": "Dietary restrictions?",
                "required": true,
                "requiredStage": "beforeCheckout",
                "type": "booking",
                "inputType": "short_text"
            }
        ]
    }))
    .unwrap()
}

fn slot() -> TimeSlot {
    serde_json::from_value(serde_json::json!({
        "_id": "slot-1",
        "experience": "exp-1",
        "start": "2026-09-12T09:30:00Z",
        "maxParticipants": 12,
        "bookedPlaces": 2,
        "pricingCategories": [
            { "categoryId": "cat-adult", "price": 50 },
            { "categoryId": "cat-child", "price": 25 }
        ],
        "extras": [
            { "_id": "extra-lunch", "name": "Lunch", "price": 12, "perPerson": true }
        ],
        "pickupPlaces": [
            { "_id": "pickup-hotel", "name": "Hotel pickup", "price": 10 }
        ]
    }))
    .unwrap()
}

fn available_slot() -> AvailableSlot {
    AvailableSlot {
        time_slot: slot(),
        price: dec!(100),
    }
}

fn complete_contact() -> ContactDetails {
    ContactDetails {
        first_name: "Jo".into(),
        last_name: "Doe".into(),
        email: "jo@example.com".into(),
        phone: "+358401234567".into(),
        nationality: "FI".into(),
        newsletter: false,
    }
}

fn config() -> WidgetConfig {
    WidgetConfig::new("key", "https://api.example.com/api/v1", "list-1", "#widget")
}

async fn mounted_widget(api: Arc<MockApi>) -> Widget {
    Widget::mount(config(), api, Arc::new(WidgetRegistry::new()))
        .await
        .unwrap()
}

#[tokio::test]
async fn full_wizard_walk_submits_the_expected_payload() {
    let api = Arc::new(MockApi::new());
    let mut widget = mounted_widget(api.clone()).await;

    widget.select_experience("exp-1").await.unwrap();
    widget.update_participants("cat-adult", 2).await;
    widget.update_participants("cat-child", 1).await;
    widget.update_participants("cat-child", -1).await;

    let session = widget.session_mut().unwrap();
    assert_eq!(session.wizard.advance(&session.state), Step::Participants);
    assert_eq!(session.wizard.advance(&session.state), Step::DateTime);

    // No slot yet: the gate holds.
    assert_eq!(session.wizard.advance(&session.state), Step::DateTime);
    session.state.select_time("09:30", slot());
    session.state.select_pickup(Some("pickup-hotel"));
    assert_eq!(session.wizard.advance(&session.state), Step::Contact);

    session.state.update_contact(complete_contact());
    assert_eq!(session.wizard.advance(&session.state), Step::Options);

    session.state.set_extra_quantity("extra-lunch", 2);

    // Required booking question unanswered: Options routes to Questions.
    assert_eq!(session.wizard.advance(&session.state), Step::Questions);
    assert_eq!(session.wizard.advance(&session.state), Step::Questions);
    session.state.set_answer("q-diet", "none", None);
    assert_eq!(session.wizard.advance(&session.state), Step::Review);

    session.state.set_policy_agreement(true);
    // 2 × 50 + 2 × 12 + flat 10 pickup
    assert_eq!(session.state.total, dec!(134));

    let confirmation = widget
        .confirm_booking("https://host.example/tours?tab=all#calendar")
        .await
        .unwrap();
    assert_eq!(confirmation.session_url, "https://pay.example/session/abc");

    let bookings = api.bookings.lock().unwrap();
    let request = &bookings[0];
    assert_eq!(request.experience_id, "exp-1");
    assert_eq!(request.time_slot_id, "slot-1");
    // The zeroed child count is dropped from the payload.
    assert_eq!(
        request.participants,
        std::collections::BTreeMap::from([("cat-adult".to_string(), 2)])
    );
    assert_eq!(request.extras.get("extra-lunch"), Some(&2));
    assert_eq!(request.pickup_place_id.as_deref(), Some("pickup-hotel"));
    assert!(request.booking_questions.contains_key("q-diet"));
    assert_eq!(request.source, "widget");
    assert_eq!(request.frontend_url, "https://host.example/tours");
}

#[tokio::test]
async fn availability_poller_feeds_the_session_calendar() {
    let api = Arc::new(MockApi::new());
    let mut widget = mounted_widget(api.clone()).await;
    widget.select_experience("exp-1").await.unwrap();
    widget.update_participants("cat-adult", 2).await;

    let mut snapshots = widget.session().unwrap().availability();
    let snapshot = loop {
        snapshots.changed().await.unwrap();
        let snap = snapshots.borrow_and_update().clone();
        if !snap.loading && !snap.slots.is_empty() {
            break snap;
        }
    };

    // First response jumps to the slot's month and flags its date.
    assert_eq!(snapshot.window.year, 2026);
    assert_eq!(snapshot.window.month, 9);
    assert_eq!(
        snapshot.auto_selected_date,
        Some("2026-09-12".parse().unwrap())
    );
}

#[tokio::test]
async fn percentage_discount_applies_to_participants_only() {
    let mut api = MockApi::new();
    api.discount = Some(Discount {
        code: "SUMMER10".into(),
        kind: DiscountKind::Percentage,
        amount: dec!(10),
        applicable_extras: vec![],
        applicable_pickup_places: vec![],
    });
    let api = Arc::new(api);
    let mut widget = mounted_widget(api.clone()).await;
    widget.select_experience("exp-1").await.unwrap();
    widget.update_participants("cat-adult", 2).await;

    let session = widget.session_mut().unwrap();
    session.state.select_time("09:30", slot());
    session.state.set_extra_quantity("extra-lunch", 2);

    submission::apply_discount_code(api.as_ref(), &mut session.state, " SUMMER10 ")
        .await
        .unwrap();

    // 10% of the 100 participant subtotal; the lunch extra is not
    // whitelisted, so 124 − 10.
    assert_eq!(session.state.total, dec!(114.0));
}

#[tokio::test]
async fn rejected_discount_clears_any_previous_code() {
    let mut api = MockApi::new();
    api.discount_error = Some("Discount code has expired");
    let api = Arc::new(api);
    let mut widget = mounted_widget(api.clone()).await;
    widget.select_experience("exp-1").await.unwrap();
    widget.update_participants("cat-adult", 2).await;

    let session = widget.session_mut().unwrap();
    session.state.select_time("09:30", slot());
    session.state.apply_discount(Discount {
        code: "OLD".into(),
        kind: DiscountKind::Fixed,
        amount: dec!(5),
        applicable_extras: vec![],
        applicable_pickup_places: vec![],
    });

    let err = submission::apply_discount_code(api.as_ref(), &mut session.state, "EXPIRED1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Discount(DiscountError::Expired)
    ));
    assert!(session.state.discount.is_none());
    assert_eq!(session.state.total, dec!(100));
}

#[tokio::test]
async fn slot_full_rejection_surfaces_distinctly() {
    let mut api = MockApi::new();
    api.reject_booking_with = Some("Not enough space in time slot slot-1");
    let api = Arc::new(api);
    let mut widget = mounted_widget(api.clone()).await;
    widget.select_experience("exp-1").await.unwrap();
    widget.update_participants("cat-adult", 2).await;

    let session = widget.session_mut().unwrap();
    session.state.select_time("09:30", slot());
    session.state.update_contact(complete_contact());
    session.state.set_policy_agreement(true);

    let err = widget
        .confirm_booking("https://host.example/")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Booking(BookingError::SlotFull)));
}

#[tokio::test]
async fn confirm_without_policy_agreement_is_blocked() {
    let api = Arc::new(MockApi::new());
    let mut widget = mounted_widget(api.clone()).await;
    widget.select_experience("exp-1").await.unwrap();
    widget.update_participants("cat-adult", 1).await;

    let session = widget.session_mut().unwrap();
    session.state.select_time("09:30", slot());
    session.state.update_contact(complete_contact());

    let err = widget
        .confirm_booking("https://host.example/")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Booking(BookingError::Incomplete(_))));
    assert!(api.bookings.lock().unwrap().is_empty());
}
