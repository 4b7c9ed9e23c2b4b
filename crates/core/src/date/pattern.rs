//! Calendar-style date patterns (`yyyy-MM-dd HH:mm:ss`) compiled to
//! chrono `strftime` specifications, with `yyyy` rendered unsigned.
//!
//! Supported tokens:
//!
//! | Token  | Meaning                       |
//! |--------|-------------------------------|
//! | `yyyy` | four-digit year               |
//! | `yy`   | two-digit year                |
//! | `MM`/`M` | month, padded / unpadded    |
//! | `dd`/`d` | day of month               |
//! | `HH`/`H` | hour, 24h                  |
//! | `mm`/`m` | minute                     |
//! | `ss`/`s` | second                     |
//! | `SSS`  | milliseconds                  |
//!
//! Text between single quotes is copied verbatim and `''` is a literal
//! quote. Any other unquoted ASCII letter is rejected, so typos such as
//! `YYYY` fail loudly instead of rendering garbage.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Timezone a date is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    #[default]
    Local,
    Utc,
}

impl std::str::FromStr for Zone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" => Ok(Self::Utc),
            other => Err(CoreError::InvalidInput(format!(
                "unknown zone '{other}', expected 'local' or 'utc'"
            ))),
        }
    }
}

/// One compiled piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// A chrono strftime specification, literals already escaped.
    Spec(String),
    /// `yyyy`: at least four digits, no sign for years past 9999.
    FullYear,
}

/// A validated date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    segments: Vec<Segment>,
}

impl DatePattern {
    /// Compile a calendar-style pattern.
    pub fn parse(pattern: &str) -> Result<Self, CoreError> {
        let mut segments = Vec::new();
        let mut spec = String::with_capacity(pattern.len() * 2);
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\'' => {
                    // `''` outside a quoted run is a literal quote.
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        spec.push('\'');
                        continue;
                    }
                    // Quoted literal; an unterminated quote runs to the end.
                    while let Some(inner) = chars.next() {
                        if inner == '\'' {
                            if chars.peek() == Some(&'\'') {
                                chars.next();
                                spec.push('\'');
                                continue;
                            }
                            break;
                        }
                        push_literal(&mut spec, inner);
                    }
                }
                letter if letter.is_ascii_alphabetic() => {
                    let mut count = 1;
                    while chars.peek() == Some(&letter) {
                        chars.next();
                        count += 1;
                    }
                    if (letter, count) == ('y', 4) {
                        if !spec.is_empty() {
                            segments.push(Segment::Spec(std::mem::take(&mut spec)));
                        }
                        segments.push(Segment::FullYear);
                        continue;
                    }
                    spec.push_str(token_spec(letter, count).ok_or_else(|| {
                        CoreError::InvalidPattern(format!(
                            "unsupported token '{}' in '{pattern}'",
                            letter.to_string().repeat(count)
                        ))
                    })?);
                }
                other => push_literal(&mut spec, other),
            }
        }

        if !spec.is_empty() {
            segments.push(Segment::Spec(spec));
        }
        Ok(Self { segments })
    }

    /// Render an instant in the given zone.
    pub fn render(&self, instant: DateTime<Utc>, zone: Zone) -> String {
        match zone {
            Zone::Utc => self.render_with(&instant),
            Zone::Local => self.render_with(&instant.with_timezone(&Local)),
        }
    }

    fn render_with<Tz>(&self, dt: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Spec(spec) => out.push_str(&dt.format(spec).to_string()),
                // chrono's `%Y` adds a `+` above 9999.
                Segment::FullYear => out.push_str(&format!("{:04}", dt.year())),
            }
        }
        out
    }
}

fn push_literal(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}

fn token_spec(letter: char, count: usize) -> Option<&'static str> {
    let spec = match (letter, count) {
        ('y', 2) => "%y",
        ('M', 2) => "%m",
        ('M', 1) => "%-m",
        ('d', 2) => "%d",
        ('d', 1) => "%-d",
        ('H', 2) => "%H",
        ('H', 1) => "%-H",
        ('m', 2) => "%M",
        ('m', 1) => "%-M",
        ('s', 2) => "%S",
        ('s', 1) => "%-S",
        ('S', 3) => "%3f",
        _ => return None,
    };
    Some(spec)
}
