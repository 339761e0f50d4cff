//! Booking API client — `BookingApi` trait plus the reqwest implementation.
//!
//! The trait is the seam the widget and the availability poller depend on,
//! so tests can swap in an in-memory mock instead of a live backend.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::api::types::{
    ApiErrorBody, AvailabilityRequest, AvailabilityResponse, AvailableSlot, BookingConfirmation,
    BookingRequest, BookingResponse, DiscountRequest, DiscountResponse, ExperienceListResponse,
};
use crate::booking::pricing::Discount;
use crate::catalog::Experience;
use crate::config::WidgetConfig;
use crate::error::{ApiError, BookingError, DiscountError, Error};

/// Substring the API uses to signal insufficient slot capacity.
const SLOT_FULL_MARKER: &str = "Not enough space in time slot";

/// The remote booking API surface the widget depends on.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Fetch the experience list for a widget list id.
    async fn list_experiences(&self, list_id: &str) -> Result<Vec<Experience>, ApiError>;

    /// Query available slots for an experience, participant mix, and window.
    async fn available_slots(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<Vec<AvailableSlot>, ApiError>;

    /// Validate a discount code against the current booking attempt.
    async fn validate_discount(&self, request: &DiscountRequest) -> Result<Discount, Error>;

    /// Submit the final booking and return the payment redirect.
    async fn submit_booking(&self, request: &BookingRequest)
    -> Result<BookingConfirmation, Error>;
}

/// HTTP implementation backed by `reqwest`.
pub struct HttpBookingApi {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl HttpBookingApi {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .header("x-api-key", self.api_key.expose_secret())
    }

    async fn read_error_body(response: reqwest::Response) -> String {
        let raw = response.text().await.unwrap_or_default();
        // The API usually wraps errors as {"error": "..."} but not always.
        match serde_json::from_str::<ApiErrorBody>(&raw) {
            Ok(body) if !body.error.is_empty() => body.error,
            _ => raw,
        }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn list_experiences(&self, list_id: &str) -> Result<Vec<Experience>, ApiError> {
        let endpoint = format!("/widget/list/{list_id}");
        let response = self
            .client
            .get(self.url(&endpoint))
            .header("x-api-key", self.api_key.expose_secret())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = Self::read_error_body(response).await;
            return Err(ApiError::Status {
                endpoint,
                status,
                body,
            });
        }

        let list: ExperienceListResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse {
                    endpoint: endpoint.clone(),
                    reason: e.to_string(),
                })?;

        debug!(count = list.experiences.len(), "Loaded experience list");
        Ok(list.experiences)
    }

    async fn available_slots(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<Vec<AvailableSlot>, ApiError> {
        let endpoint = "/widget/available";
        let response = self.post(endpoint).json(request).send().await.map_err(|e| {
            ApiError::RequestFailed {
                endpoint: endpoint.into(),
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = Self::read_error_body(response).await;
            return Err(ApiError::Status {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let availability: AvailabilityResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse {
                    endpoint: endpoint.into(),
                    reason: e.to_string(),
                })?;

        Ok(availability.slots)
    }

    async fn validate_discount(&self, request: &DiscountRequest) -> Result<Discount, Error> {
        let endpoint = "/widget/discountcode";
        let response = self.post(endpoint).json(request).send().await.map_err(|e| {
            ApiError::RequestFailed {
                endpoint: endpoint.into(),
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            let message = Self::read_error_body(response).await;
            warn!(code = %request.code, %message, "Discount code rejected");
            return Err(DiscountError::from_api_message(&message).into());
        }

        let validated: DiscountResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse {
                    endpoint: endpoint.into(),
                    reason: e.to_string(),
                })?;

        Ok(validated.into_discount(request.code.clone()))
    }

    async fn submit_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, Error> {
        let endpoint = "/widget/book";
        let response = self.post(endpoint).json(request).send().await.map_err(|e| {
            ApiError::RequestFailed {
                endpoint: endpoint.into(),
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            let message = Self::read_error_body(response).await;
            warn!(experience = %request.experience_id, %message, "Booking rejected");
            if message.contains(SLOT_FULL_MARKER) {
                return Err(BookingError::SlotFull.into());
            }
            return Err(BookingError::Rejected { reason: message }.into());
        }

        let body: BookingResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                endpoint: endpoint.into(),
                reason: e.to_string(),
            })?;

        let session_url = body
            .session_url
            .filter(|u| !u.is_empty())
            .ok_or(BookingError::MissingPaymentUrl)?;

        Ok(BookingConfirmation {
            session_url,
            booking_id: body.booking_id,
        })
    }
}
