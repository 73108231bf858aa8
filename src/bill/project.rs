use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use super::{AmountSource, Bill, RawOverdueRecord, Stage};
use crate::money::{parse_money, RawAmount};

const MS_PER_DAY: u64 = 86_400_000;

/// Whole days between `now` and `due`, rounded up, ignoring direction.
///
/// A due date in the future also counts as "overdue". Use
/// [`signed_day_difference`] when the direction matters.
pub fn day_difference(now: DateTime<Utc>, due: DateTime<Utc>) -> u32 {
    let ms = (now - due).num_milliseconds().unsigned_abs();
    u32::try_from(ms.div_ceil(MS_PER_DAY)).unwrap_or(u32::MAX)
}

/// Like [`day_difference`], but negative when `due` is still ahead of `now`.
pub fn signed_day_difference(now: DateTime<Utc>, due: DateTime<Utc>) -> i64 {
    let days = i64::from(day_difference(now, due));
    if now < due {
        -days
    } else {
        days
    }
}

/// Project a raw store record into a [`Bill`] as of `now`.
///
/// The stage is always derived from the age; whatever status the store
/// carries is ignored.
pub fn project(raw: &RawOverdueRecord, now: DateTime<Utc>) -> Bill {
    let due_date = raw.due_date_str().and_then(parse_due_date);
    if due_date.is_none() {
        debug!(id = %raw.id, due = ?raw.due_date_str(), "missing or unreadable due date");
    }

    let days_overdue = due_date.map_or(0, |due| day_difference(now, due));
    let (amount_field, amount_source) = select_amount(raw);
    let amount = parse_money(amount_field);
    debug!(
        id = %raw.id,
        source = amount_source.field_name(),
        amount,
        "projected bill amount"
    );

    Bill {
        id: raw.id.clone(),
        title: raw.titulo.clone().unwrap_or_default(),
        code: raw.codigo.clone().unwrap_or_default(),
        due_date,
        days_overdue,
        stage: Stage::from_days(days_overdue),
        amount,
        amount_source,
        paid: raw.pago.unwrap_or(false),
        notifications: Vec::new(),
        contacts: Vec::new(),
    }
}

/// First usable amount field in priority order `valot_num`, `valor_num`, `valor`.
/// Zero, NaN and empty strings count as missing.
fn select_amount(raw: &RawOverdueRecord) -> (Option<&RawAmount>, AmountSource) {
    let candidates = [
        (raw.valot_num.as_ref(), AmountSource::ValotNum),
        (raw.valor_num.as_ref(), AmountSource::ValorNum),
        (raw.valor.as_ref(), AmountSource::Valor),
    ];

    candidates
        .into_iter()
        .find_map(|(field, source)| field.filter(|v| is_usable(v)).map(|v| (Some(v), source)))
        .unwrap_or((None, AmountSource::None))
}

fn is_usable(value: &RawAmount) -> bool {
    match value {
        RawAmount::Number(n) => *n != 0.0 && !n.is_nan(),
        RawAmount::Text(s) => !s.is_empty(),
    }
}

/// Accepts `YYYY-MM-DD` (UTC midnight), RFC 3339, or a naive timestamp taken as UTC.
fn parse_due_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.and_utc())
}
