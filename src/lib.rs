//! Booking Widget — embeddable booking flow core.

pub mod api;
pub mod availability;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod countries;
pub mod error;
pub mod format;
pub mod widget;

pub use error::{Error, Result};
