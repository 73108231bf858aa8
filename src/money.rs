//! Monetary value normalization and pt-BR currency rendering.
//!
//! Upstream amounts arrive as floats, integer-like numbers or localized
//! strings. Every amount is read as major units (reais). Integers are never
//! reinterpreted as centavos: `288` stays `R$ 288,00`.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CURRENCY_SYMBOL: &str = "R$";

/// Positive numbers below this were divided by [`CORRUPTION_FACTOR`] upstream.
pub const CORRUPTION_CEILING: f64 = 0.1;
pub const CORRUPTION_FACTOR: f64 = 10_000.0;

/// A monetary field as the data source sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// True for values in the known-corrupt range `(0, 0.1)`.
pub fn is_corrupted_amount(value: f64) -> bool {
    value > 0.0 && value < CORRUPTION_CEILING
}

/// Convert a raw monetary field into major units. Never fails: anything
/// unreadable degrades to `0.0`.
pub fn parse_money(raw: Option<&RawAmount>) -> f64 {
    match raw {
        None => 0.0,
        Some(RawAmount::Number(value)) => parse_number(*value),
        Some(RawAmount::Text(text)) => parse_text(text),
    }
}

fn parse_number(value: f64) -> f64 {
    if !value.is_finite() {
        debug!(raw = value, "non-finite amount, using 0");
        return 0.0;
    }
    if is_corrupted_amount(value) {
        let corrected = value * CORRUPTION_FACTOR;
        debug!(raw = value, corrected, "amount below 0.1, scaling by 10000");
        return corrected;
    }
    value
}

fn currency_noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[R$\s]").expect("invalid currency noise regex"))
}

/// Longest numeric prefix, so "12abc" reads as 12.
fn numeric_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("invalid numeric prefix regex")
    })
}

fn parse_text(text: &str) -> f64 {
    let mut clean = currency_noise_re().replace_all(text, "").into_owned();

    // A comma means pt-BR notation: '.' groups thousands, ',' is the decimal mark
    if clean.contains(',') {
        clean = clean.replace('.', "").replacen(',', ".", 1);
    }

    let value = numeric_prefix_re()
        .find(&clean)
        .and_then(|m| m.as_str().parse::<f64>().ok());
    match value {
        Some(value) if value.is_finite() => value,
        _ => {
            debug!(raw = text, "unparseable amount, using 0");
            0.0
        }
    }
}

/// Render a raw monetary field as `R$ 1.234,56`.
pub fn format_currency(raw: Option<&RawAmount>) -> String {
    render_brl(parse_money(raw))
}

/// Shorthand for [`format_currency`] on an already numeric amount. The
/// value still goes through the parser, so corrupt values are corrected.
pub fn format_amount(value: f64) -> String {
    format_currency(Some(&RawAmount::Number(value)))
}

fn render_brl(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{CURRENCY_SYMBOL} {grouped},{frac}")
    } else {
        format!("{CURRENCY_SYMBOL} {grouped},{frac}")
    }
}

/// Format a date the way pt-BR locales show it: 15/01/2024
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
