//! Exact arbitrary-precision amounts.
//!
//! A [`NumericValue`] is `magnitude / 10^scale`, tagged with the denomination
//! exponent it is currently expressed in and the radix it prints in. The
//! magnitude is a `BigUint`, so full 256-bit chain values are exact.
//!
//! Every operation returns a new value. Nothing is discarded until
//! [`NumericValue::round`] is called; rescaling between denominations only
//! moves the decimal point.

use std::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use rust_decimal::Decimal;

use crate::error::DisplayError;

/// How [`NumericValue::round_with`] resolves a discarded remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Ties round away from zero (`0.5 → 1`).
    #[default]
    HalfUp,
    /// Ties round toward zero (`0.5 → 0`).
    HalfDown,
    /// Truncate.
    Down,
}

/// Unsigned exact decimal tagged with a denomination exponent and a radix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericValue {
    magnitude: BigUint,
    /// Number of decimal digits after the point. Always normalized so the
    /// magnitude carries no trailing zero while `scale > 0`.
    scale: u32,
    /// Power-of-ten exponent of the denomination, relative to the smallest unit.
    unit: u32,
    radix: u32,
}

#[inline]
fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

fn check_radix(radix: u32) -> Result<(), DisplayError> {
    if (2..=36).contains(&radix) {
        Ok(())
    } else {
        Err(DisplayError::UnsupportedRadix(radix))
    }
}

fn checked_scale(scale: u32, extra: u32) -> Result<u32, DisplayError> {
    scale.checked_add(extra).ok_or_else(|| {
        DisplayError::ScaleOverflow(format!("{} + {} fractional digits", scale, extra))
    })
}

impl NumericValue {
    /// Parse `text` as digits in `radix`, expressed in the denomination with
    /// exponent `unit`.
    ///
    /// In radix 16 a leading `0x`/`0X` is accepted. In radix 10 a single
    /// decimal point is accepted. Empty input is an error, never zero.
    pub fn parse(text: &str, radix: u32, unit: u32) -> Result<Self, DisplayError> {
        check_radix(radix)?;
        let invalid = |reason: String| DisplayError::InvalidNumericInput {
            input: text.to_string(),
            reason,
        };

        let body = if radix == 16 {
            text.strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text)
        } else {
            text
        };
        if body.is_empty() {
            return Err(invalid("empty amount".to_string()));
        }

        let (int_part, frac_part) = match body.split_once('.') {
            Some(_) if radix != 10 => {
                return Err(invalid(format!(
                    "fractional digits are not accepted in radix {}",
                    radix
                )))
            }
            Some(parts) => parts,
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("no digits".to_string()));
        }

        let digits = format!("{}{}", int_part, frac_part);
        if let Some(c) = digits.chars().find(|c| !c.is_digit(radix)) {
            return Err(invalid(format!("'{}' is not a base-{} digit", c, radix)));
        }
        let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix)
            .ok_or_else(|| invalid("unparseable digits".to_string()))?;

        Ok(Self {
            magnitude,
            scale: frac_part.len() as u32,
            unit,
            radix,
        }
        .normalized())
    }

    /// Lift a non-negative `Decimal` into an exact value in denomination `unit`.
    pub fn from_decimal(value: &Decimal, unit: u32) -> Result<Self, DisplayError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DisplayError::InvalidNumericInput {
                input: value.to_string(),
                reason: "negative amounts are not supported".to_string(),
            });
        }
        Ok(Self {
            magnitude: BigUint::from(value.mantissa().unsigned_abs()),
            scale: value.scale(),
            unit,
            radix: 10,
        }
        .normalized())
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Denomination exponent the value is currently expressed in.
    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Number of significant fractional decimal digits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Re-express the value in the denomination with exponent `target`.
    ///
    /// Moving to a smaller unit multiplies by `10^(unit - target)`; moving to
    /// a larger unit divides and keeps the full fractional remainder.
    pub fn to_denomination(&self, target: u32) -> Result<Self, DisplayError> {
        let mut next = self.clone();
        next.unit = target;

        if self.unit >= target {
            let shift = self.unit - target;
            if self.scale >= shift {
                next.scale = self.scale - shift;
            } else {
                next.magnitude = &self.magnitude * pow10(shift - self.scale);
                next.scale = 0;
            }
        } else {
            next.scale = checked_scale(self.scale, target - self.unit)?;
        }

        Ok(next.normalized())
    }

    /// Round to `decimals` fractional digits, half-up.
    pub fn round(&self, decimals: u32) -> Self {
        self.round_with(decimals, RoundingMode::default())
    }

    /// Round to `decimals` fractional digits with an explicit mode.
    pub fn round_with(&self, decimals: u32, mode: RoundingMode) -> Self {
        if self.scale <= decimals {
            return self.clone();
        }

        let divisor = pow10(self.scale - decimals);
        let (quotient, remainder) = self.magnitude.div_rem(&divisor);
        let twice = remainder * 2u32;
        let round_up = match mode {
            RoundingMode::HalfUp => twice >= divisor,
            RoundingMode::HalfDown => twice > divisor,
            RoundingMode::Down => false,
        };

        Self {
            magnitude: if round_up { quotient + 1u32 } else { quotient },
            scale: decimals,
            unit: self.unit,
            radix: self.radix,
        }
        .normalized()
    }

    /// Select the radix used when printing.
    pub fn to_base(&self, radix: u32) -> Result<Self, DisplayError> {
        check_radix(radix)?;
        Ok(Self {
            radix,
            ..self.clone()
        })
    }

    /// Exact product. Keeps the denomination and radix of `self`.
    pub fn mul(&self, other: &NumericValue) -> Result<Self, DisplayError> {
        Ok(Self {
            magnitude: &self.magnitude * &other.magnitude,
            scale: checked_scale(self.scale, other.scale)?,
            unit: self.unit,
            radix: self.radix,
        }
        .normalized())
    }

    /// Decimal rendering with exactly `decimals` fractional digits
    /// (half-up), e.g. `"2000.00"`.
    pub fn to_fixed(&self, decimals: u32) -> String {
        self.round(decimals).render_decimal(decimals)
    }

    fn render_decimal(&self, decimals: u32) -> String {
        debug_assert!(self.scale <= decimals);
        let scaled = &self.magnitude * pow10(decimals - self.scale);
        let digits = scaled.to_str_radix(10);
        if decimals == 0 {
            return digits;
        }

        let width = decimals as usize + 1;
        let padded = if digits.len() < width {
            format!("{}{}", "0".repeat(width - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - decimals as usize);
        format!("{}.{}", int_part, frac_part)
    }

    /// Non-decimal rendering. The fraction is expanded digit by digit and
    /// truncated after `scale` digits if it does not terminate.
    fn render_radix(&self) -> String {
        let denominator = pow10(self.scale);
        let (int_part, mut remainder) = self.magnitude.div_rem(&denominator);
        let mut out = int_part.to_str_radix(self.radix);
        if remainder.is_zero() {
            return out;
        }

        out.push('.');
        for _ in 0..self.scale {
            remainder *= self.radix;
            let (digit, rest) = remainder.div_rem(&denominator);
            out.push_str(&digit.to_str_radix(self.radix));
            remainder = rest;
            if remainder.is_zero() {
                break;
            }
        }
        out
    }

    fn normalized(mut self) -> Self {
        if self.magnitude.is_zero() {
            self.scale = 0;
            return self;
        }
        let ten = BigUint::from(10u32);
        while self.scale > 0 {
            let (quotient, remainder) = self.magnitude.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            self.magnitude = quotient;
            self.scale -= 1;
        }
        self
    }
}

/// Canonical rendering in the value's radix: no trailing fractional zeros,
/// no leading zeros, and a single `0` before the point for values below one.
impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.radix == 10 {
            write!(f, "{}", self.render_decimal(self.scale))
        } else {
            write!(f, "{}", self.render_radix())
        }
    }
}
