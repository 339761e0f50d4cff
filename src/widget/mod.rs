//! Widget mount, lifecycle, and payment-return handling.

pub mod lifecycle;
pub mod payment;
pub mod registry;

pub use lifecycle::{BookingSession, Widget};
pub use payment::{PaymentOutcome, PaymentReturn, PaymentScan, scan_page_url};
pub use registry::WidgetRegistry;
