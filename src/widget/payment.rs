//! Post-payment return handling.
//!
//! The payment provider redirects back to the host page with `status` and
//! `bookingId` query parameters. Both must be present to show an outcome
//! panel; either one alone is still stripped from the URL so a reload never
//! re-triggers the panel.

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Failure,
}

/// A recognized payment redirect: what to show the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReturn {
    pub outcome: PaymentOutcome,
    pub booking_id: String,
}

/// Result of inspecting the page URL on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentScan {
    /// Present only when both parameters were found and `status` is known.
    pub payment: Option<PaymentReturn>,
    /// URL with the payment parameters removed, when any were present.
    pub cleaned_url: Option<String>,
}

/// Inspect a page URL for payment return parameters.
///
/// Unparseable URLs and URLs without payment parameters scan to nothing.
pub fn scan_page_url(page_url: &str) -> PaymentScan {
    let Ok(mut url) = Url::parse(page_url) else {
        return PaymentScan {
            payment: None,
            cleaned_url: None,
        };
    };

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let status = pairs.iter().find(|(k, _)| k == "status").map(|(_, v)| v);
    let booking_id = pairs.iter().find(|(k, _)| k == "bookingId").map(|(_, v)| v);

    if status.is_none() && booking_id.is_none() {
        return PaymentScan {
            payment: None,
            cleaned_url: None,
        };
    }

    let payment = match (status.map(String::as_str), booking_id) {
        (Some("success"), Some(id)) => Some(PaymentReturn {
            outcome: PaymentOutcome::Success,
            booking_id: id.clone(),
        }),
        (Some("failure"), Some(id)) => Some(PaymentReturn {
            outcome: PaymentOutcome::Failure,
            booking_id: id.clone(),
        }),
        _ => None,
    };

    let remaining: Vec<(String, String)> = pairs
        .into_iter()
        .filter(|(k, _)| k != "status" && k != "bookingId")
        .collect();
    if remaining.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(remaining);
    }

    PaymentScan {
        payment,
        cleaned_url: Some(url.to_string()),
    }
}
