//! Duration literal parsing.
//!
//! Two literal syntaxes are accepted, both case-insensitive:
//!
//! - **ISO-8601** durations beginning with `P` (optionally signed), limited
//!   to days, hours, minutes and (fractional) seconds: `P2DT3H3M5.22S`,
//!   `PT51H3M5.22S`, `-PT5M`.
//! - **Free-form** sequences of `<number><unit>` tokens with optional
//!   whitespace: `2 days 3 hours`, `2d3h3m5.22s`, `7 min 12s`.
//!
//! Free-form units:
//!
//! | Field   | Spellings                                   |
//! |---------|---------------------------------------------|
//! | days    | `d`, `day`, `days`                          |
//! | hours   | `h`, `hr`, `hrs`, `hour`, `hours`           |
//! | minutes | `m`, `min`, `mins`, `minute`, `minutes`     |
//! | seconds | `s`, `sec`, `secs`, `second`, `seconds`     |
//!
//! Only the seconds field may carry a decimal fraction (up to nanosecond
//! precision), each field may appear at most once, and a day is always 24
//! hours.
//!
//! # Examples
//!
//! ```
//! use knobs::duration;
//!
//! let iso = duration::parse("PT51H3M5.22S").unwrap();
//! assert_eq!(duration::parse("2 days 3 hours 3 minutes 5.22 seconds").unwrap(), iso);
//! assert_eq!(duration::parse("2d3h3m5.22s").unwrap(), iso);
//! assert_eq!(duration::format_iso(iso), "PT51H3M5.22S");
//! ```

mod human;
mod iso;

use chrono::TimeDelta;

use crate::error::{Error, Result};

/// Name used for duration values in parse errors.
pub(crate) const VALUE_KIND: &str = "duration";

const NANOS_PER_SECOND: u32 = 1_000_000_000;
const MAX_FRACTION_DIGITS: usize = 9;

/// Parses a duration literal in either ISO-8601 or free-form syntax.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the literal is empty, uses an unknown unit,
/// repeats a field, carries a fraction on a field other than seconds, or
/// does not fit in a [`TimeDelta`].
pub fn parse(literal: &str) -> Result<TimeDelta> {
    let text = literal.trim();
    if text.is_empty() {
        return Err(Error::parse(VALUE_KIND, "empty literal"));
    }

    let unsigned = text.trim_start_matches(['+', '-']);
    if unsigned.starts_with(['P', 'p']) {
        iso::parse(text)
    } else {
        human::parse(text)
    }
}

/// Formats a duration in the ISO-8601 form produced by [`parse`] inputs,
/// expressing days as hours (`PT51H3M5.22S`).
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use knobs::duration::format_iso;
///
/// assert_eq!(format_iso(TimeDelta::zero()), "PT0S");
/// assert_eq!(format_iso(TimeDelta::minutes(4)), "PT4M");
/// assert_eq!(format_iso(-TimeDelta::milliseconds(1500)), "-PT1.5S");
/// ```
#[must_use]
pub fn format_iso(duration: TimeDelta) -> String {
    let seconds = duration.num_seconds();
    let nanos = duration.subsec_nanos();
    if seconds == 0 && nanos == 0 {
        return "PT0S".to_string();
    }

    let negative = seconds < 0 || nanos < 0;
    let seconds = seconds.unsigned_abs();
    let nanos = nanos.unsigned_abs();

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut out = String::from(if negative { "-PT" } else { "PT" });
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if secs > 0 || nanos > 0 {
        out.push_str(&secs.to_string());
        if nanos > 0 {
            let fraction = format!("{nanos:09}");
            out.push('.');
            out.push_str(fraction.trim_end_matches('0'));
        }
        out.push('S');
    }
    out
}

/// The four fields a literal may set, shared by both syntaxes.
#[derive(Debug, Default)]
struct Fields {
    days: Option<i64>,
    hours: Option<i64>,
    minutes: Option<i64>,
    seconds: Option<(i64, i64)>,
}

impl Fields {
    fn is_empty(&self) -> bool {
        self.days.is_none()
            && self.hours.is_none()
            && self.minutes.is_none()
            && self.seconds.is_none()
    }

    /// Sums all present fields into one duration.
    fn total(&self) -> Result<TimeDelta> {
        let overflow = || Error::parse(VALUE_KIND, "duration out of range");

        let mut total = TimeDelta::zero();
        let parts = [
            self.days.map(TimeDelta::try_days),
            self.hours.map(TimeDelta::try_hours),
            self.minutes.map(TimeDelta::try_minutes),
        ];
        for part in parts.into_iter().flatten() {
            let part = part.ok_or_else(overflow)?;
            total = total.checked_add(&part).ok_or_else(overflow)?;
        }

        if let Some((seconds, nanos)) = self.seconds {
            let whole = TimeDelta::try_seconds(seconds).ok_or_else(overflow)?;
            total = total
                .checked_add(&whole)
                .and_then(|t| t.checked_add(&TimeDelta::nanoseconds(nanos)))
                .ok_or_else(overflow)?;
        }
        Ok(total)
    }
}

/// Byte cursor over an ASCII-oriented literal.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn is_done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Consumes `expected` (ASCII, case-insensitive) if it is next.
    fn eat(&mut self, expected: u8) -> bool {
        match self.peek() {
            Some(byte) if byte.eq_ignore_ascii_case(&expected) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Consumes a leading `+` or `-`, returning `true` for a minus sign.
    fn sign(&mut self) -> bool {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        }
    }

    fn take_while(&mut self, predicate: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&predicate) {
            self.pos += 1;
        }
        // Only ASCII bytes are ever matched, so the slice is valid UTF-8.
        std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default()
    }

    /// Consumes a run of ASCII digits and converts it to an integer.
    fn integer(&mut self) -> Result<Option<i64>> {
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            return Ok(None);
        }
        digits
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::parse(VALUE_KIND, format!("number '{digits}' is too large")))
    }

    /// Consumes a fraction (after its separator) and returns it in nanoseconds.
    fn fraction(&mut self) -> Result<i64> {
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() || digits.len() > MAX_FRACTION_DIGITS {
            return Err(Error::parse(
                VALUE_KIND,
                format!("fraction must have between 1 and {MAX_FRACTION_DIGITS} digits"),
            ));
        }
        let padded = format!("{digits:0<width$}", width = MAX_FRACTION_DIGITS);
        let nanos = padded
            .parse::<u32>()
            .map_err(|_| Error::parse(VALUE_KIND, format!("invalid fraction '{digits}'")))?;
        debug_assert!(nanos < NANOS_PER_SECOND);
        Ok(i64::from(nanos))
    }

    fn rest(&self) -> String {
        String::from_utf8_lossy(&self.bytes[self.pos..]).into_owned()
    }
}
