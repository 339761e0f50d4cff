//! Pricing and discount calculator.
//!
//! Pure over `BookingState` — no clocks, no I/O — so every reducer mutation
//! can recompute totals synchronously and tests can assert exact amounts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::booking::state::BookingState;

/// VAT rate baked into all totals. Must be revisited if the platform's VAT
/// rate changes.
pub const VAT_RATE: Decimal = dec!(0.14);

/// How a discount reduces the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// A validated discount code.
///
/// `applicable_extras`/`applicable_pickup_places` widen the base a
/// percentage discount applies to; an empty list means participants only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub code: String,
    pub kind: DiscountKind,
    /// Percent (0–100) for `Percentage`, face value for `Fixed`.
    pub amount: Decimal,
    #[serde(default)]
    pub applicable_extras: Vec<String>,
    #[serde(default)]
    pub applicable_pickup_places: Vec<String>,
}

/// Full price decomposition for one booking state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub participants_subtotal: Decimal,
    pub extras_total: Decimal,
    pub pickup_total: Decimal,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    pub tax: Decimal,
}

/// Compute the full price decomposition for a booking state.
///
/// Without a selected time slot everything is zero: category prices, extras,
/// and pickup prices all live on the slot.
pub fn price(state: &BookingState) -> PriceBreakdown {
    let Some(slot) = state.time_slot.as_ref() else {
        return PriceBreakdown::default();
    };

    let participants_subtotal: Decimal = state
        .participants
        .iter()
        .filter_map(|(category_id, &count)| {
            slot.category_price(category_id)
                .map(|p| p * Decimal::from(count))
        })
        .sum();

    let extras_total: Decimal = state
        .extras
        .iter()
        .filter_map(|extra_id| slot.extra(extra_id))
        .map(|extra| {
            if extra.per_person {
                let quantity = state.extra_quantity(&extra.id);
                extra.price * Decimal::from(quantity)
            } else {
                extra.price
            }
        })
        .sum();

    let selected_pickup = state
        .pickup
        .as_deref()
        .and_then(|id| slot.pickup_place(id));
    let pickup_total = match selected_pickup {
        Some(place) if slot.transport_per_person => {
            place.price * Decimal::from(state.total_participants())
        }
        Some(place) => place.price,
        None => Decimal::ZERO,
    };

    let subtotal = participants_subtotal + extras_total + pickup_total;

    let discount_amount = match state.discount.as_ref() {
        None => Decimal::ZERO,
        Some(discount) => match discount.kind {
            DiscountKind::Fixed => discount.amount.min(subtotal),
            DiscountKind::Percentage => {
                // Percentage codes discount participants plus whatever the
                // code's applicability lists explicitly whitelist. Fixed
                // codes discount the whole subtotal. The asymmetry matches
                // the live platform and is kept intentionally.
                let mut base = participants_subtotal;

                if !discount.applicable_extras.is_empty() {
                    base += state
                        .extras
                        .iter()
                        .filter(|id| discount.applicable_extras.contains(id))
                        .filter_map(|id| slot.extra(id))
                        .map(|extra| {
                            if extra.per_person {
                                extra.price * Decimal::from(state.extra_quantity(&extra.id))
                            } else {
                                extra.price
                            }
                        })
                        .sum::<Decimal>();
                }

                if let Some(place) = selected_pickup
                    && discount.applicable_pickup_places.contains(&place.id)
                {
                    base += pickup_total;
                }

                base * discount.amount / dec!(100)
            }
        },
    };

    let total = (subtotal - discount_amount).max(Decimal::ZERO);
    let tax = total - total / (Decimal::ONE + VAT_RATE);

    PriceBreakdown {
        participants_subtotal,
        extras_total,
        pickup_total,
        subtotal,
        discount_amount,
        total,
        tax,
    }
}
