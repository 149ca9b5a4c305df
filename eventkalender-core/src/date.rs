use chrono::NaiveDate;

/// Textual date pattern used for parsing input and for every rendered date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// Anything that is not exactly four year digits, two month digits and two
/// day digits separated by `-`, or that names a day missing from the
/// calendar, yields `None`. This never fails loudly: an unusable date is an
/// ordinary outcome and callers treat it as absent.
#[must_use]
pub fn normalize(input: Option<&str>) -> Option<NaiveDate> {
    let raw = input?.trim();
    if raw.is_empty() {
        return None;
    }

    let date = has_date_shape(raw)
        .then(|| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok())
        .flatten();

    if date.is_none() {
        tracing::debug!(input = raw, "discarding unparsable date");
    }

    date
}

/// Formats a date in the same pattern [`normalize`] accepts.
#[must_use]
pub fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// chrono alone would also take `2014-5-3` or `+2014-05-03`.
fn has_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
