//! Final payload assembly and booking confirmation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::api::types::{AnswerPayload, BookingConfirmation, BookingRequest, CustomerPayload};
use crate::api::{BookingApi, DiscountRequest};
use crate::booking::pricing::Discount;
use crate::booking::state::BookingState;
use crate::error::{BookingError, DiscountError, Error};

/// Strip query and fragment from the host page URL; the API appends its own
/// `status`/`bookingId` parameters on payment return.
pub fn frontend_url(page_url: &str) -> String {
    let without_fragment = page_url.split('#').next().unwrap_or(page_url);
    without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment)
        .to_string()
}

/// Assemble the submission payload from a finished booking state.
///
/// Zero participant counts and zero extra quantities are dropped, and only
/// booking-scoped answers (keys without a participant slot) are submitted;
/// per-participant answers stay widget-side in the current API contract.
pub fn build_payload(state: &BookingState, page_url: &str) -> Result<BookingRequest, BookingError> {
    let slot = state
        .time_slot
        .as_ref()
        .ok_or(BookingError::Incomplete("time slot"))?;

    let participants: BTreeMap<String, u32> = state
        .participants
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(id, &count)| (id.clone(), count))
        .collect();
    if participants.is_empty() {
        return Err(BookingError::Incomplete("participants"));
    }

    let extras: BTreeMap<String, u32> = state
        .extras
        .iter()
        .map(|id| (id.clone(), state.extra_quantity(id)))
        .filter(|(_, quantity)| *quantity > 0)
        .collect();

    let booking_questions: BTreeMap<String, AnswerPayload> = state
        .answers
        .iter()
        .filter(|(_, answer)| answer.participant_slot.is_none())
        .map(|(key, answer)| {
            (
                key.clone(),
                AnswerPayload {
                    answer: answer.value.clone(),
                },
            )
        })
        .collect();

    Ok(BookingRequest {
        experience_id: state.experience.id.clone(),
        time_slot_id: slot.id.clone(),
        participants,
        extras,
        pickup_place_id: state.pickup.clone(),
        customer: CustomerPayload {
            first_name: state.contact.first_name.clone(),
            last_name: state.contact.last_name.clone(),
            email: state.contact.email.clone(),
            phone: state.contact.phone.clone(),
            nationality: state.contact.nationality.clone(),
            newsletter: state.contact.newsletter,
        },
        booking_questions,
        discount_code: state.discount.as_ref().map(|d| d.code.clone()),
        agreed_to_cancellation_policy: state.agreed_to_cancellation_policy,
        source: "widget".to_string(),
        frontend_url: frontend_url(page_url),
    })
}

/// Submit the booking and return the payment redirect target.
pub async fn confirm(
    api: &dyn BookingApi,
    state: &BookingState,
    page_url: &str,
) -> Result<BookingConfirmation, Error> {
    if !state.agreed_to_cancellation_policy {
        return Err(BookingError::Incomplete("cancellation policy agreement").into());
    }
    let payload = build_payload(state, page_url).map_err(Error::from)?;
    let confirmation = api.submit_booking(&payload).await?;
    info!(
        experience = %payload.experience_id,
        time_slot = %payload.time_slot_id,
        "Booking accepted, redirecting to payment"
    );
    Ok(confirmation)
}

/// Validate a discount code for the current booking attempt and apply it to
/// the state on success. On failure the previous discount is cleared, like
/// the review screen does.
pub async fn apply_discount_code(
    api: &dyn BookingApi,
    state: &mut BookingState,
    code: &str,
) -> Result<Discount, Error> {
    let code = code.trim();
    if code.is_empty() {
        return Err(DiscountError::EmptyCode.into());
    }

    let booking_date: Option<DateTime<Utc>> = state
        .date
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc());

    let request = DiscountRequest {
        code: code.to_string(),
        booking_date,
        experience: state.experience.id.clone(),
        extras: state.extras.clone(),
        pickup_place_id: state.pickup.clone(),
    };

    match api.validate_discount(&request).await {
        Ok(discount) => {
            state.apply_discount(discount.clone());
            Ok(discount)
        }
        Err(err) => {
            state.clear_discount();
            Err(err)
        }
    }
}
