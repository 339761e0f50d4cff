//! Error types for the booking widget.

/// Top-level error type for the widget.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Discount error: {0}")]
    Discount(#[from] DiscountError),

    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),

    #[error("Widget error: {0}")]
    Widget(#[from] WidgetError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Remote booking API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("Request to {endpoint} rejected with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Discount code validation failures, mapped from raw API error text.
///
/// The API returns free-form error strings; everything unrecognized
/// collapses into `Invalid` so the user never sees raw backend text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscountError {
    #[error("Invalid discount code")]
    Invalid,

    #[error("This discount code is not valid yet")]
    NotYetValid,

    #[error("This discount code has expired")]
    Expired,

    #[error("This discount code is not valid for your selected date")]
    WrongDate,

    #[error("This discount code cannot be used with this experience")]
    WrongExperience,

    #[error("Please enter a discount code")]
    EmptyCode,
}

impl DiscountError {
    /// Map a raw API error string to a user-facing variant.
    pub fn from_api_message(message: &str) -> Self {
        if message.contains("not found") {
            Self::Invalid
        } else if message.contains("not valid yet") {
            Self::NotYetValid
        } else if message.contains("has expired") {
            Self::Expired
        } else if message.contains("not valid for this booking date") {
            Self::WrongDate
        } else if message.contains("not valid for this experience") {
            Self::WrongExperience
        } else {
            Self::Invalid
        }
    }
}

/// Booking submission failures.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(
        "Sorry, but this time slot no longer has enough space for your group. \
         Please try reducing the number of participants or selecting a different time."
    )]
    SlotFull,

    #[error("There was an error processing your booking. Please try again.")]
    Rejected { reason: String },

    #[error("No payment URL received from server")]
    MissingPaymentUrl,

    #[error("Missing required booking data: {0}")]
    Incomplete(&'static str),
}

/// Widget mount/lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Container {container} already has a mounted widget")]
    ContainerOccupied { container: String },

    #[error("No experience selected")]
    NoExperienceSelected,

    #[error("Experience {id} not found in loaded list")]
    ExperienceNotFound { id: String },
}

/// Result type alias for the widget.
pub type Result<T> = std::result::Result<T, Error>;
