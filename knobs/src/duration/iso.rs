//! ISO-8601 duration syntax: `[+-]P[nD][T[nH][nM][n[.f]S]]`.

use chrono::TimeDelta;

use super::{Cursor, Fields, VALUE_KIND};
use crate::error::{Error, Result};

pub(super) fn parse(text: &str) -> Result<TimeDelta> {
    let mut cursor = Cursor::new(text);
    let negate = cursor.sign();
    if !cursor.eat(b'P') {
        return Err(Error::parse(VALUE_KIND, "ISO duration must start with 'P'"));
    }

    let mut fields = Fields::default();

    // Date section: only days are representable as a fixed duration.
    if !cursor.is_done() && !matches!(cursor.peek(), Some(b'T' | b't')) {
        let days = signed_integer(&mut cursor)?;
        if !cursor.eat(b'D') {
            return Err(unexpected(&cursor));
        }
        fields.days = Some(days);
    }

    if cursor.eat(b'T') {
        let mut last_rank = 0;
        while !cursor.is_done() {
            let negative = cursor.sign();
            let value = cursor
                .integer()?
                .ok_or_else(|| unexpected(&cursor))?;
            let value = if negative { -value } else { value };

            let fraction = if matches!(cursor.peek(), Some(b'.' | b',')) {
                cursor.bump();
                Some(cursor.fraction()?)
            } else {
                None
            };

            let designator = cursor
                .bump()
                .map(|b| b.to_ascii_uppercase())
                .ok_or_else(|| Error::parse(VALUE_KIND, "missing time designator"))?;
            let rank = match designator {
                b'H' => 1,
                b'M' => 2,
                b'S' => 3,
                other => {
                    return Err(Error::parse(
                        VALUE_KIND,
                        format!("unknown time designator '{}'", char::from(other)),
                    ))
                }
            };
            if rank <= last_rank {
                return Err(Error::parse(
                    VALUE_KIND,
                    "time designators must appear once, in H, M, S order",
                ));
            }
            last_rank = rank;

            if fraction.is_some() && designator != b'S' {
                return Err(Error::parse(
                    VALUE_KIND,
                    "only seconds may have a fractional part",
                ));
            }

            match designator {
                b'H' => fields.hours = Some(value),
                b'M' => fields.minutes = Some(value),
                _ => {
                    let nanos = fraction.unwrap_or(0);
                    fields.seconds = Some((value, if negative { -nanos } else { nanos }));
                }
            }
        }
        if last_rank == 0 {
            return Err(Error::parse(VALUE_KIND, "'T' must be followed by a time field"));
        }
    }

    if !cursor.is_done() {
        return Err(unexpected(&cursor));
    }
    if fields.is_empty() {
        return Err(Error::parse(VALUE_KIND, "ISO duration has no fields"));
    }

    let total = fields.total()?;
    Ok(if negate { -total } else { total })
}

fn signed_integer(cursor: &mut Cursor<'_>) -> Result<i64> {
    let negative = cursor.sign();
    let value = cursor.integer()?.ok_or_else(|| unexpected(cursor))?;
    Ok(if negative { -value } else { value })
}

fn unexpected(cursor: &Cursor<'_>) -> Error {
    let rest = cursor.rest();
    if rest.is_empty() {
        Error::parse(VALUE_KIND, "unexpected end of ISO duration")
    } else {
        Error::parse(VALUE_KIND, format!("unexpected input '{rest}' in ISO duration"))
    }
}
