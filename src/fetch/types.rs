//! Fetched value types

use serde::Serialize;

/// Latest funding and reference rates, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroRates {
    /// Secured overnight funding rate (SOFR)
    pub funding_rate: f64,
    /// Interest on reserve balances (IORB)
    pub reference_rate: f64,
}

impl MacroRates {
    /// Funding rate minus reference rate; positive means funding stress
    pub fn spread(&self) -> f64 {
        self.funding_rate - self.reference_rate
    }
}

/// Values the rules and the card are computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readings {
    pub spread: f64,
    /// Dollar index close, `0.0` when unavailable
    pub dxy: f64,
}

impl Readings {
    pub fn new(rates: MacroRates, dxy: f64) -> Self {
        Self {
            spread: rates.spread(),
            dxy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread() {
        let rates = MacroRates {
            funding_rate: 4.40,
            reference_rate: 4.40,
        };
        assert_eq!(rates.spread(), 0.0);

        let rates = MacroRates {
            funding_rate: 4.0,
            reference_rate: 3.5,
        };
        assert_eq!(rates.spread(), 0.5);
    }

    #[test]
    fn test_readings_from_rates() {
        let rates = MacroRates {
            funding_rate: 4.0,
            reference_rate: 4.25,
        };
        let readings = Readings::new(rates, 104.2);
        assert_eq!(readings.spread, -0.25);
        assert_eq!(readings.dxy, 104.2);
    }
}
