//! Display-only price formatting.
//!
//! No currency conversion happens anywhere in the widget; this module only
//! decides symbol and symbol position for the currency the API quoted.

use rust_decimal::Decimal;

/// Currencies whose symbol conventionally follows the amount.
const SUFFIX_CURRENCIES: &[&str] = &[
    "EUR", "CZK", "PLN", "HUF", "SEK", "NOK", "DKK", "RON", "ISK", "AED",
];

fn symbol(currency: &str) -> &str {
    match currency {
        "EUR" => "€",
        "USD" | "CAD" | "AUD" | "NZD" | "MXN" | "SGD" | "HKD" => "$",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "RUB" => "₽",
        "INR" => "₹",
        "BRL" => "R$",
        "ZAR" => "R",
        "CZK" => "Kč",
        "PLN" => "zł",
        "HUF" => "Ft",
        "SEK" | "NOK" | "DKK" | "ISK" => "kr",
        "RON" => "lei",
        "TRY" => "₺",
        "THB" => "฿",
        "MYR" => "RM",
        "PHP" => "₱",
        "IDR" => "Rp",
        other => other,
    }
}

/// Format an amount with two decimal places and the currency's symbol.
pub fn format_price(amount: Decimal, currency: &str) -> String {
    let amount = amount.round_dp(2);
    let sym = symbol(currency);
    if SUFFIX_CURRENCIES.contains(&currency) {
        format!("{amount:.2} {sym}")
    } else {
        format!("{sym}{amount:.2}")
    }
}
