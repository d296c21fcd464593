//! Free-form duration syntax: `<number><unit>` tokens such as `2d 3h 5.22s`.

use chrono::TimeDelta;

use super::{Cursor, Fields, VALUE_KIND};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    fn lookup(spelling: &str) -> Option<Self> {
        match spelling {
            "d" | "day" | "days" => Some(Self::Days),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(Self::Hours),
            "m" | "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "s" | "sec" | "secs" | "second" | "seconds" => Some(Self::Seconds),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

pub(super) fn parse(text: &str) -> Result<TimeDelta> {
    let mut cursor = Cursor::new(text);
    let mut fields = Fields::default();

    cursor.skip_whitespace();
    while !cursor.is_done() {
        let value = cursor.integer()?.ok_or_else(|| {
            Error::parse(
                VALUE_KIND,
                format!("expected a number at '{}'", cursor.rest()),
            )
        })?;

        let fraction = if cursor.peek() == Some(b'.') {
            cursor.bump();
            Some(cursor.fraction()?)
        } else {
            None
        };

        cursor.skip_whitespace();
        let spelling = cursor
            .take_while(|b| b.is_ascii_alphabetic())
            .to_ascii_lowercase();
        if spelling.is_empty() {
            return Err(Error::parse(
                VALUE_KIND,
                format!("missing unit after number {value}"),
            ));
        }
        let unit = Unit::lookup(&spelling)
            .ok_or_else(|| Error::parse(VALUE_KIND, format!("unknown unit '{spelling}'")))?;

        if fraction.is_some() && unit != Unit::Seconds {
            return Err(Error::parse(
                VALUE_KIND,
                format!("only seconds may have a fractional part, not {}", unit.name()),
            ));
        }

        let slot_taken = match unit {
            Unit::Days => fields.days.replace(value).is_some(),
            Unit::Hours => fields.hours.replace(value).is_some(),
            Unit::Minutes => fields.minutes.replace(value).is_some(),
            Unit::Seconds => fields
                .seconds
                .replace((value, fraction.unwrap_or(0)))
                .is_some(),
        };
        if slot_taken {
            return Err(Error::parse(
                VALUE_KIND,
                format!("{} specified more than once", unit.name()),
            ));
        }

        cursor.skip_whitespace();
    }

    fields.total()
}
