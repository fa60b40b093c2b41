//! # Shipping quotes
//!
//! A [`Quote`] is a non-negative currency amount split into whole `units` and
//! `subunits` (hundredths, always in `0..=99`). Quotes are produced by the
//! [`QuoteGenerator`], which draws a synthetic cost from a [`CostSource`] and
//! simulates pricing latency through a [`LatencySimulator`].
//!
//! ## Rendering
//!
//! [`Quote`] implements [`Display`](core::fmt::Display) as `$<units>.<subunits>`
//! without zero padding, so five cents renders as `$3.5`:
//!
//! ```
//! use shipping_core::Quote;
//!
//! let quote = Quote::new(3, 5).unwrap();
//! assert_eq!(quote.to_string(), "$3.5");
//! ```
//!
//! ## Wire format
//!
//! [`Quote::to_wire_money`] converts to the protobuf [`Money`] message, where
//! the fractional part is expressed in nanos: `subunits * 10_000_000`.

mod generator;
mod latency;
mod source;

pub use generator::{COUNT_DELAY, QuoteGenerator, VALUE_DELAY};
pub use latency::{LatencySimulator, NoLatency, TokioLatency};
pub use source::{CostSource, FixedCost, MAX_DOLLARS, ThreadRandomCost};

use crate::proto::Money;
use core::fmt;

/// Largest valid value of [`Quote::subunits`].
pub const MAX_SUBUNITS: u32 = 99;

/// Nanos of the base currency unit per hundredth.
pub const NANOS_PER_SUBUNIT: u32 = 10_000_000;

/// A currency amount as whole units plus hundredths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Quote {
    units: u32,
    subunits: u32,
}

impl Quote {
    /// Creates a quote, or `None` if `subunits` is larger than
    /// [`MAX_SUBUNITS`].
    pub const fn new(units: u32, subunits: u32) -> Option<Self> {
        if subunits > MAX_SUBUNITS {
            return None;
        }
        Some(Self { units, subunits })
    }

    /// Splits a real-valued cost into units and hundredths.
    ///
    /// The fractional part is truncated toward zero, never rounded:
    /// `3.567` becomes `3` units and `56` subunits. Negative, `NaN` and
    /// infinite inputs yield a zero quote; values above `u32::MAX` saturate.
    pub fn from_value(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::default();
        }

        let whole = value.trunc();
        let fraction = ((value - whole) * 100.0).trunc();

        Self {
            units: whole as u32,
            subunits: (fraction as u32).min(MAX_SUBUNITS),
        }
    }

    pub const fn units(&self) -> u32 {
        self.units
    }

    pub const fn subunits(&self) -> u32 {
        self.subunits
    }

    /// Converts the quote into a protobuf [`Money`] in `currency_code`.
    pub fn to_wire_money(&self, currency_code: impl Into<String>) -> Money {
        Money {
            currency_code: currency_code.into(),
            units: i64::from(self.units),
            // At most 990_000_000, well inside i32.
            nanos: (self.subunits * NANOS_PER_SUBUNIT) as i32,
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{}", self.units, self.subunits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_truncates_fraction() {
        let quote = Quote::from_value(3.567);
        assert_eq!(quote.units(), 3);
        assert_eq!(quote.subunits(), 56);

        let quote = Quote::from_value(12.999);
        assert_eq!(quote.units(), 12);
        assert_eq!(quote.subunits(), 99);
    }

    #[test]
    fn from_value_of_integral_sample_has_no_subunits() {
        for dollars in 0..MAX_DOLLARS {
            let quote = Quote::from_value(f64::from(dollars));
            assert_eq!(quote.units(), dollars);
            assert_eq!(quote.subunits(), 0);
        }
    }

    #[test]
    fn from_value_clamps_unrepresentable_inputs_to_zero() {
        assert_eq!(Quote::from_value(-4.25), Quote::default());
        assert_eq!(Quote::from_value(f64::NAN), Quote::default());
        assert_eq!(Quote::from_value(f64::INFINITY), Quote::default());
    }

    #[test]
    fn new_rejects_out_of_range_subunits() {
        assert!(Quote::new(1, 99).is_some());
        assert!(Quote::new(1, 100).is_none());
    }

    #[test]
    fn display_does_not_pad_subunits() {
        assert_eq!(Quote::new(3, 5).unwrap().to_string(), "$3.5");
        assert_eq!(Quote::new(3, 50).unwrap().to_string(), "$3.50");
        assert_eq!(Quote::default().to_string(), "$0.0");
    }

    #[test]
    fn wire_money_scales_subunits_to_nanos() {
        let money = Quote::new(17, 25).unwrap().to_wire_money("USD");
        assert_eq!(money.currency_code, "USD");
        assert_eq!(money.units, 17);
        assert_eq!(money.nanos, 250_000_000);

        let money = Quote::new(0, MAX_SUBUNITS).unwrap().to_wire_money("EUR");
        assert_eq!(money.nanos, 990_000_000);
    }
}
