//! Point-subset filters, parsed from compact text tokens.
//!
//! Grammar: `("all" | "1ret") ["_ge" <int> "cm"] ["_lt" <int> "cm"]`.
//! Bounds are whole centimetres in the filter's fixed-point unit and select
//! the half-open height interval `[min, max)`. An omitted bound defaults to
//! the unit type's minimum or maximum; a bound pair that leaves no interval
//! is rejected at construction, never clamped.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable point-subset selector. Field order carries the derived total
/// order: unrestricted-return filters sort before first-return-only ones,
/// then by the height bounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Filter {
    first_only: bool,
    min_cm: u16,
    max_cm: u16,
}

impl Filter {
    /// Every point, any height.
    pub fn all() -> Self {
        Self { first_only: false, min_cm: 0, max_cm: u16::MAX }
    }

    /// First returns only, any height.
    pub fn first_returns() -> Self {
        Self { first_only: true, min_cm: 0, max_cm: u16::MAX }
    }

    pub fn with_bounds(
        first_only: bool,
        min_cm: u16,
        max_cm: u16,
    ) -> Result<Self, ConfigError> {
        if min_cm >= max_cm {
            return Err(ConfigError::EmptyInterval(format!(
                "{}..{}cm",
                min_cm, max_cm
            )));
        }
        Ok(Self { first_only, min_cm, max_cm })
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let (first_only, mut rest) = if let Some(r) = text.strip_prefix("all") {
            (false, r)
        } else if let Some(r) = text.strip_prefix("1ret") {
            (true, r)
        } else {
            return Err(ConfigError::UnknownFilter(text.to_string()));
        };

        let mut min_cm = 0u16;
        let mut max_cm = u16::MAX;
        if let Some(r) = rest.strip_prefix("_ge") {
            let (v, r) = take_centimetres(r, text)?;
            min_cm = v;
            rest = r;
        }
        if let Some(r) = rest.strip_prefix("_lt") {
            let (v, r) = take_centimetres(r, text)?;
            max_cm = v;
            rest = r;
        }
        if !rest.is_empty() {
            return Err(ConfigError::BadHeightBound(text.to_string()));
        }
        if min_cm >= max_cm {
            return Err(ConfigError::EmptyInterval(text.to_string()));
        }
        Ok(Self { first_only, min_cm, max_cm })
    }

    /// Canonical token; `parse(f.to_text())` round-trips.
    pub fn to_text(&self) -> String {
        let mut s =
            String::from(if self.first_only { "1ret" } else { "all" });
        if self.min_cm > 0 {
            s.push_str(&format!("_ge{}cm", self.min_cm));
        }
        if self.max_cm < u16::MAX {
            s.push_str(&format!("_lt{}cm", self.max_cm));
        }
        s
    }

    #[inline]
    pub fn first_only(&self) -> bool {
        self.first_only
    }

    #[inline]
    pub fn min_cm(&self) -> u16 {
        self.min_cm
    }

    #[inline]
    pub fn max_cm(&self) -> u16 {
        self.max_cm
    }

    /// Lower bound in metres (inclusive).
    #[inline]
    pub fn min_m(&self) -> f64 {
        self.min_cm as f64 / 100.0
    }

    /// Upper bound in metres (exclusive). The default `u16::MAX` means
    /// unbounded.
    #[inline]
    pub fn max_m(&self) -> f64 {
        if self.max_cm == u16::MAX {
            f64::INFINITY
        } else {
            self.max_cm as f64 / 100.0
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Read `<digits>cm` from the head of `rest`.
fn take_centimetres<'a>(
    rest: &'a str,
    whole: &str,
) -> Result<(u16, &'a str), ConfigError> {
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(ConfigError::BadHeightBound(whole.to_string()));
    }
    let v: u16 = digits
        .parse()
        .map_err(|_| ConfigError::BadHeightBound(whole.to_string()))?;
    let rest = rest[end..]
        .strip_prefix("cm")
        .ok_or_else(|| ConfigError::BadHeightBound(whole.to_string()))?;
    Ok((v, rest))
}
