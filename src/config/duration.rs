//! Human-readable durations for configuration fields.
//!
//! Durations travel as strings such as `"5s"`, `"1m30s"` or `"250ms"`.
//! Parsing and formatting of the magnitude is done by `humantime`; this
//! module adds a sign so that negative values survive a load and can be
//! rejected by validation instead of failing opaquely.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::config::error::ConfigError;

/// A signed time span.
///
/// Zero is always stored as non-negative, so `-0s` and `0s` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SignedDuration {
    negative: bool,
    magnitude: Duration,
}

impl SignedDuration {
    pub const ZERO: SignedDuration = SignedDuration {
        negative: false,
        magnitude: Duration::ZERO,
    };

    pub const fn from_std(magnitude: Duration) -> Self {
        Self {
            negative: false,
            magnitude,
        }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self::from_std(Duration::from_secs(secs))
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self::from_std(Duration::from_millis(millis))
    }

    fn with_sign(negative: bool, magnitude: Duration) -> Self {
        Self {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.negative && !self.magnitude.is_zero()
    }

    /// Absolute value of the span.
    pub fn magnitude(&self) -> Duration {
        self.magnitude
    }

    /// The span as a `std` duration, `None` when negative.
    pub fn to_std(&self) -> Option<Duration> {
        if self.negative {
            None
        } else {
            Some(self.magnitude)
        }
    }

    /// Interprets the span as a timeout where zero means "no timeout".
    ///
    /// Returns `None` for zero and negative spans.
    pub fn as_timeout(&self) -> Option<Duration> {
        if self.is_positive() {
            Some(self.magnitude)
        } else {
            None
        }
    }
}

impl From<Duration> for SignedDuration {
    fn from(d: Duration) -> Self {
        Self::from_std(d)
    }
}

impl Neg for SignedDuration {
    type Output = SignedDuration;

    fn neg(self) -> Self::Output {
        Self::with_sign(!self.negative, self.magnitude)
    }
}

impl fmt::Display for SignedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        // humantime separates units with spaces ("1m 30s"), keep it compact.
        let text = humantime::format_duration(self.magnitude).to_string();
        f.write_str(&text.replace(' ', ""))
    }
}

/// Error returned when a duration string cannot be parsed.
#[derive(Debug, Error)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("invalid duration {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: humantime::DurationError,
    },
}

impl FromStr for SignedDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, rest) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };

        if rest.is_empty() {
            return Err(DurationParseError::Empty);
        }
        if rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DurationParseError::MissingUnit(s.to_string()));
        }

        let magnitude = humantime::parse_duration(rest).map_err(|source| {
            DurationParseError::Invalid {
                input: s.to_string(),
                source,
            }
        })?;

        Ok(Self::with_sign(negative, magnitude))
    }
}

/// One entry of a batch duration parse.
pub struct DurationOpt<'a> {
    /// External field name, used in error messages.
    pub name: &'static str,
    /// Serialized value. Empty keeps the current value of `dst`.
    pub input: &'a str,
    pub dst: &'a mut SignedDuration,
}

/// Parse several duration fields in order.
///
/// Each successfully parsed value is written to its destination right away.
/// The first failure is returned and the remaining entries are not looked at,
/// so their destinations keep whatever they held before the call.
pub fn parse_durations<'a>(
    component: &'static str,
    opts: impl IntoIterator<Item = DurationOpt<'a>>,
) -> Result<(), ConfigError> {
    for opt in opts {
        if opt.input.is_empty() {
            tracing::debug!(component, field = opt.name, "duration not set, keeping default");
            continue;
        }

        let parsed = opt
            .input
            .parse::<SignedDuration>()
            .map_err(|source| ConfigError::DurationParse {
                component,
                field: opt.name,
                source,
            })?;
        *opt.dst = parsed;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_and_composite() {
        assert_eq!("5s".parse::<SignedDuration>().unwrap(), SignedDuration::from_secs(5));
        assert_eq!("1h30m".parse::<SignedDuration>().unwrap(), SignedDuration::from_secs(5400));
        assert_eq!("250ms".parse::<SignedDuration>().unwrap(), SignedDuration::from_millis(250));
        assert_eq!("0s".parse::<SignedDuration>().unwrap(), SignedDuration::ZERO);
    }

    #[test]
    fn test_parse_negative() {
        let d: SignedDuration = "-10s".parse().unwrap();
        assert!(d.is_negative());
        assert_eq!(d.magnitude(), Duration::from_secs(10));
        assert_eq!(d.to_std(), None);

        let zero: SignedDuration = "-0s".parse().unwrap();
        assert_eq!(zero, SignedDuration::ZERO);
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_parse_rejects_bare_numbers_and_garbage() {
        assert!(matches!(
            "-10".parse::<SignedDuration>(),
            Err(DurationParseError::MissingUnit(_))
        ));
        assert!(matches!(
            "10".parse::<SignedDuration>(),
            Err(DurationParseError::MissingUnit(_))
        ));
        assert!(matches!("".parse::<SignedDuration>(), Err(DurationParseError::Empty)));
        assert!(matches!("-".parse::<SignedDuration>(), Err(DurationParseError::Empty)));
        assert!(matches!(
            "5 parsecs".parse::<SignedDuration>(),
            Err(DurationParseError::Invalid { .. })
        ));
    }

    #[test]
    fn test_display_is_compact() {
        assert_eq!(SignedDuration::from_secs(5).to_string(), "5s");
        assert_eq!(SignedDuration::from_secs(60).to_string(), "1m");
        assert_eq!(SignedDuration::from_secs(90).to_string(), "1m30s");
        assert_eq!(SignedDuration::ZERO.to_string(), "0s");
        assert_eq!((-SignedDuration::from_secs(10)).to_string(), "-10s");
    }

    #[test]
    fn test_display_parses_back() {
        for d in [
            SignedDuration::from_millis(1500),
            SignedDuration::from_secs(3600 + 61),
            -SignedDuration::from_millis(2),
        ] {
            assert_eq!(d.to_string().parse::<SignedDuration>().unwrap(), d);
        }
    }

    #[test]
    fn test_as_timeout() {
        assert_eq!(SignedDuration::ZERO.as_timeout(), None);
        assert_eq!((-SignedDuration::from_secs(1)).as_timeout(), None);
        assert_eq!(
            SignedDuration::from_secs(5).as_timeout(),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_parse_durations_keeps_default_on_empty() {
        let mut a = SignedDuration::from_secs(1);
        let mut b = SignedDuration::from_secs(2);
        parse_durations(
            "test",
            [
                DurationOpt { name: "a", input: "", dst: &mut a },
                DurationOpt { name: "b", input: "7s", dst: &mut b },
            ],
        )
        .unwrap();
        assert_eq!(a, SignedDuration::from_secs(1));
        assert_eq!(b, SignedDuration::from_secs(7));
    }

    #[test]
    fn test_parse_durations_stops_at_first_failure() {
        let mut a = SignedDuration::from_secs(1);
        let mut b = SignedDuration::from_secs(2);
        let mut c = SignedDuration::from_secs(3);
        let err = parse_durations(
            "test",
            [
                DurationOpt { name: "a", input: "9s", dst: &mut a },
                DurationOpt { name: "b", input: "nope", dst: &mut b },
                DurationOpt { name: "c", input: "9s", dst: &mut c },
            ],
        )
        .unwrap_err();

        assert_eq!(err.field(), Some("b"));
        assert!(err.to_string().starts_with("error parsing test.b"));
        assert_eq!(a, SignedDuration::from_secs(9));
        assert_eq!(b, SignedDuration::from_secs(2));
        assert_eq!(c, SignedDuration::from_secs(3));
    }
}
