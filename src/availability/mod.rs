//! Availability calendar — month windows, per-day summaries, and the
//! polling task that keeps them fresh.

pub mod calendar;
pub mod poller;

pub use calendar::{CapacityBand, DaySummary, MonthWindow};
pub use poller::{AvailabilityHandle, AvailabilitySnapshot, PollerCommand, spawn_poller};
