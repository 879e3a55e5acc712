//! Request form numbering: `FORM-<year>-<sequence>`.
//!
//! The sequence is a per-year counter starting at 1. It is allocated by the
//! database (see `FormRepo::create`); this module only formats and parses.

use crate::error::CoreError;

pub const FORM_NUMBER_PREFIX: &str = "FORM";

/// Minimum digits in the sequence part. Longer sequences keep every digit.
pub const SEQUENCE_WIDTH: usize = 3;

/// Format a form number, e.g. `FORM-2026-007`.
pub fn format_form_number(year: i32, sequence: i32) -> String {
    format!("{FORM_NUMBER_PREFIX}-{year}-{sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// Split a form number back into `(year, sequence)`.
pub fn parse_form_number(number: &str) -> Result<(i32, i32), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid form number '{number}'"));

    let mut parts = number.trim().splitn(3, '-');
    let (Some(prefix), Some(year), Some(seq)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    if prefix != FORM_NUMBER_PREFIX
        || year.len() != 4
        || seq.len() < SEQUENCE_WIDTH
        || !all_digits(year)
        || !all_digits(seq)
    {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let seq: i32 = seq.parse().map_err(|_| invalid())?;
    if seq < 1 {
        return Err(invalid());
    }
    Ok((year, seq))
}

/// `str::parse` alone would also take a leading `+`.
fn all_digits(part: &str) -> bool {
    part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_form_of_the_year() {
        assert_eq!(format_form_number(2026, 1), "FORM-2026-001");
    }

    #[test]
    fn nth_form_is_zero_padded() {
        assert_eq!(format_form_number(2025, 42), "FORM-2025-042");
        assert_eq!(format_form_number(2025, 999), "FORM-2025-999");
    }

    #[test]
    fn sequences_past_999_keep_all_digits() {
        assert_eq!(format_form_number(2025, 1000), "FORM-2025-1000");
    }

    #[test]
    fn parse_round_trips() {
        assert_eq!(parse_form_number("FORM-2026-014").unwrap(), (2026, 14));
        assert_eq!(parse_form_number("FORM-2026-1203").unwrap(), (2026, 1203));
    }

    #[test]
    fn parse_rejects_signs() {
        for bad in ["FORM-2026-+01", "FORM-2026-+001", "FORM-+202-001", "FORM-2026--01"] {
            assert!(parse_form_number(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn parse_rejects_malformed_numbers() {
        for bad in ["", "FORM-2026", "FORM-26-001", "REQ-2026-001", "FORM-2026-01", "FORM-2026-000", "FORM-2026-abc"] {
            assert!(parse_form_number(bad).is_err(), "{bad} should be rejected");
        }
    }
}
