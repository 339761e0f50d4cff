//! Pickup departure and activity return times.
//!
//! Pickup places carry a departure offset (minutes before the slot start)
//! and an optional pickup window; together with the experience duration
//! they give the host everything shown next to a pickup option: when to be
//! ready and when the activity returns.

use chrono::{DateTime, Duration, Utc};

use crate::catalog::{PickupPlace, TimeSlot};

/// Computed pickup and return instants for one slot + pickup place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupTimes {
    /// Slot start minus the full pickup offset.
    pub earliest_pickup: DateTime<Utc>,
    /// Slot start minus (offset − window); equals `earliest_pickup` when
    /// the place has no window.
    pub latest_pickup: DateTime<Utc>,
    /// Slot start plus the experience duration.
    pub return_time: DateTime<Utc>,
}

impl PickupTimes {
    /// Clock label for the pickup: a range when the place has a window.
    pub fn pickup_label(&self) -> String {
        if self.latest_pickup > self.earliest_pickup {
            format!(
                "{}-{}",
                self.earliest_pickup.format("%H:%M"),
                self.latest_pickup.format("%H:%M")
            )
        } else {
            self.earliest_pickup.format("%H:%M").to_string()
        }
    }

    pub fn return_label(&self) -> String {
        self.return_time.format("%H:%M").to_string()
    }
}

/// Compute pickup and return times for a pickup place on a slot.
///
/// The API sends the departure offset as a string of minutes; non-numeric
/// values count as zero offset, same as the original widget.
pub fn pickup_times(slot: &TimeSlot, place: &PickupPlace, duration_minutes: u32) -> PickupTimes {
    let offset = place.pickup_time.trim().parse::<i64>().unwrap_or(0);
    let window = i64::from(place.pickup_window);

    PickupTimes {
        earliest_pickup: slot.start - Duration::minutes(offset),
        latest_pickup: slot.start - Duration::minutes(offset - window),
        return_time: slot.start + Duration::minutes(i64::from(duration_minutes)),
    }
}
