//! Calendar aggregation over availability query results.
//!
//! Slots arrive as a flat list for one month window; the calendar view
//! needs them grouped per day with a capacity band and the cheapest
//! composed price for the current participant mix.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::types::AvailableSlot;

/// A calendar month used as the availability query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthWindow {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl MonthWindow {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First instant of the month, UTC.
    pub fn start(&self) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Last instant of the month, UTC (23:59:59.999 on the last day).
    pub fn end(&self) -> chrono::DateTime<Utc> {
        self.next().start() - chrono::Duration::milliseconds(1)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl std::fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Visual availability band for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityBand {
    /// More than 66% of places still open.
    High,
    /// 33–66% open.
    Medium,
    /// Less than 33% open.
    Low,
    /// No slots on this day.
    NoSlots,
}

impl CapacityBand {
    /// Bucket a mean remaining-capacity percentage.
    pub fn from_percent(percent: f64) -> Self {
        if percent <= 33.0 {
            Self::Low
        } else if percent <= 66.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Per-day aggregation rendered as one calendar cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Mean remaining capacity across the day's slots, 0–100.
    pub capacity_percent: f64,
    pub band: CapacityBand,
    /// Cheapest composed price for the current participant mix.
    pub lowest_price: Option<Decimal>,
    pub currency: String,
}

/// Price one slot for a participant mix; falls back to the slot's flat
/// price when no category price matches.
fn composed_price(slot: &AvailableSlot, participants: &HashMap<String, u32>) -> Decimal {
    let total: Decimal = participants
        .iter()
        .filter_map(|(category_id, &count)| {
            slot.time_slot
                .category_price(category_id)
                .map(|p| p * Decimal::from(count))
        })
        .sum();
    if total.is_zero() {
        slot.time_slot.price
    } else {
        total
    }
}

/// Group slots per day with capacity band and lowest composed price.
pub fn day_summaries(
    slots: &[AvailableSlot],
    participants: &HashMap<String, u32>,
    default_currency: &str,
) -> Vec<DaySummary> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&AvailableSlot>> = BTreeMap::new();
    for slot in slots {
        by_date.entry(slot.time_slot.date()).or_default().push(slot);
    }

    by_date
        .into_iter()
        .map(|(date, day_slots)| {
            let capacity_percent = day_slots
                .iter()
                .map(|s| s.time_slot.capacity_ratio() * 100.0)
                .sum::<f64>()
                / day_slots.len() as f64;
            let lowest_price = day_slots
                .iter()
                .map(|s| composed_price(s, participants))
                .min();
            let currency = day_slots
                .iter()
                .find_map(|s| s.time_slot.currency.clone())
                .unwrap_or_else(|| default_currency.to_string());
            DaySummary {
                date,
                capacity_percent,
                band: CapacityBand::from_percent(capacity_percent),
                lowest_price,
                currency,
            }
        })
        .collect()
}

/// Band for one calendar cell; days without a summary have no slots.
pub fn band_for_date(summaries: &[DaySummary], date: NaiveDate) -> CapacityBand {
    summaries
        .iter()
        .find(|s| s.date == date)
        .map(|s| s.band)
        .unwrap_or(CapacityBand::NoSlots)
}

/// Slots starting on one day, ordered by start time.
pub fn slots_for_date<'a>(slots: &'a [AvailableSlot], date: NaiveDate) -> Vec<&'a AvailableSlot> {
    let mut day: Vec<&AvailableSlot> = slots
        .iter()
        .filter(|s| s.time_slot.date() == date)
        .collect();
    day.sort_by_key(|s| s.time_slot.start);
    day
}

/// Month of the earliest slot, for auto-navigation on first load.
pub fn first_slot_month(slots: &[AvailableSlot]) -> Option<MonthWindow> {
    slots
        .iter()
        .map(|s| s.time_slot.start)
        .min()
        .map(|start| MonthWindow::containing(start.date_naive()))
}

/// Earliest available date, for the one-shot auto-select.
pub fn first_available_date(slots: &[AvailableSlot]) -> Option<NaiveDate> {
    slots.iter().map(|s| s.time_slot.date()).min()
}
