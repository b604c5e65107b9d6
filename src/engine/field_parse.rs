// ==========================================
// Abrazaderas - lenient numeric field parsing
// ==========================================
// Text coming from forms and JSON bodies; errors carry the offending field
// and a localized message.
// ==========================================

use crate::domain::error::{ClampError, ClampResult};
use crate::domain::types::ClampField;
use crate::i18n::{t, t_with_args};
use rust_decimal::Decimal;
use std::str::FromStr;

fn field_label(field: ClampField) -> String {
    t(&field.label_key())
}

fn required(field: ClampField, label: &str) -> ClampError {
    ClampError::validation(field, t_with_args("number.required", &[("field", label)]))
}

fn below_min(field: ClampField, label: &str, min: &str) -> ClampError {
    ClampError::validation(
        field,
        t_with_args("number.below_min", &[("field", label), ("min", min)]),
    )
}

/// Decimal field: comma accepted as separator, `min` inclusive.
pub(crate) fn parse_decimal_field(
    raw: &str,
    field: ClampField,
    min: Decimal,
) -> ClampResult<Decimal> {
    let label = field_label(field);
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Err(required(field, &label));
    }
    let value = Decimal::from_str(&cleaned).map_err(|_| {
        ClampError::validation(field, t_with_args("number.invalid", &[("field", &label)]))
    })?;
    if value < min {
        return Err(below_min(field, &label, &min.normalize().to_string()));
    }
    Ok(value)
}

/// Integer field: digits only, `min` inclusive.
pub(crate) fn parse_int_field(raw: &str, field: ClampField, min: u32) -> ClampResult<u32> {
    let label = field_label(field);
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Err(required(field, &label));
    }
    if !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClampError::validation(
            field,
            t_with_args("number.not_integer", &[("field", &label)]),
        ));
    }
    let value = cleaned.parse::<u32>().map_err(|_| {
        ClampError::validation(field, t_with_args("number.invalid", &[("field", &label)]))
    })?;
    if value < min {
        return Err(below_min(field, &label, &min.to_string()));
    }
    Ok(value)
}
