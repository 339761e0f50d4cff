//! Country dial-code table used by phone validation.
//!
//! Covers the markets the booking platform serves. Nationality is stored as
//! an ISO 3166-1 alpha-2 code; the dial code is stripped from the phone
//! number before digit-count validation.

/// A country with its international dial code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    pub dial_code: &'static str,
}

pub const COUNTRIES: &[Country] = &[
    Country { name: "Finland", code: "FI", dial_code: "+358" },
    Country { name: "Sweden", code: "SE", dial_code: "+46" },
    Country { name: "Norway", code: "NO", dial_code: "+47" },
    Country { name: "Denmark", code: "DK", dial_code: "+45" },
    Country { name: "Iceland", code: "IS", dial_code: "+354" },
    Country { name: "Estonia", code: "EE", dial_code: "+372" },
    Country { name: "Latvia", code: "LV", dial_code: "+371" },
    Country { name: "Lithuania", code: "LT", dial_code: "+370" },
    Country { name: "Czech Republic", code: "CZ", dial_code: "+420" },
    Country { name: "Slovakia", code: "SK", dial_code: "+421" },
    Country { name: "Poland", code: "PL", dial_code: "+48" },
    Country { name: "Germany", code: "DE", dial_code: "+49" },
    Country { name: "Austria", code: "AT", dial_code: "+43" },
    Country { name: "Switzerland", code: "CH", dial_code: "+41" },
    Country { name: "Netherlands", code: "NL", dial_code: "+31" },
    Country { name: "Belgium", code: "BE", dial_code: "+32" },
    Country { name: "Luxembourg", code: "LU", dial_code: "+352" },
    Country { name: "France", code: "FR", dial_code: "+33" },
    Country { name: "Spain", code: "ES", dial_code: "+34" },
    Country { name: "Portugal", code: "PT", dial_code: "+351" },
    Country { name: "Italy", code: "IT", dial_code: "+39" },
    Country { name: "United Kingdom", code: "GB", dial_code: "+44" },
    Country { name: "Ireland", code: "IE", dial_code: "+353" },
    Country { name: "Hungary", code: "HU", dial_code: "+36" },
    Country { name: "Romania", code: "RO", dial_code: "+40" },
    Country { name: "Bulgaria", code: "BG", dial_code: "+359" },
    Country { name: "Greece", code: "GR", dial_code: "+30" },
    Country { name: "Croatia", code: "HR", dial_code: "+385" },
    Country { name: "Slovenia", code: "SI", dial_code: "+386" },
    Country { name: "Ukraine", code: "UA", dial_code: "+380" },
    Country { name: "United States", code: "US", dial_code: "+1" },
    Country { name: "Canada", code: "CA", dial_code: "+1" },
    Country { name: "Australia", code: "AU", dial_code: "+61" },
    Country { name: "New Zealand", code: "NZ", dial_code: "+64" },
    Country { name: "Japan", code: "JP", dial_code: "+81" },
    Country { name: "South Korea", code: "KR", dial_code: "+82" },
    Country { name: "China", code: "CN", dial_code: "+86" },
    Country { name: "India", code: "IN", dial_code: "+91" },
    Country { name: "Brazil", code: "BR", dial_code: "+55" },
    Country { name: "Mexico", code: "MX", dial_code: "+52" },
    Country { name: "South Africa", code: "ZA", dial_code: "+27" },
    Country { name: "United Arab Emirates", code: "AE", dial_code: "+971" },
    Country { name: "Israel", code: "IL", dial_code: "+972" },
    Country { name: "Turkey", code: "TR", dial_code: "+90" },
    Country { name: "Singapore", code: "SG", dial_code: "+65" },
    Country { name: "Thailand", code: "TH", dial_code: "+66" },
];

/// Look up a country by its alpha-2 code, case-insensitively.
pub fn by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Dial code for a nationality, if known.
pub fn dial_code_for(code: &str) -> Option<&'static str> {
    by_code(code).map(|c| c.dial_code)
}
