// File: crates/screener-chart/src/metric.rs
// Summary: Supported valuation/quality metrics and their display labels.

use std::fmt;

/// One of the four ratios a screened instrument can be compared on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKey {
    Pe,
    Pb,
    De,
    Roe,
}

impl MetricKey {
    pub const ALL: [MetricKey; 4] = [Self::Pe, Self::Pb, Self::De, Self::Roe];

    /// Field name used in the row-oriented datasets.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Pe => "pe",
            Self::Pb => "pb",
            Self::De => "de",
            Self::Roe => "roe",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pe => "P/E Ratio",
            Self::Pb => "P/B Ratio",
            Self::De => "Debt/Equity (%)",
            Self::Roe => "ROE (%)",
        }
    }

    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.field() == field)
    }
}

/// Metric requested by the caller. Unrecognized keys are carried through
/// rather than rejected: they render with an empty label and whatever raw
/// values the records happen to hold under that key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Known(MetricKey),
    Unknown(String),
}

impl Metric {
    /// Parse a metric key. Never fails.
    pub fn parse(key: &str) -> Self {
        match MetricKey::from_field(key) {
            Some(m) => Self::Known(m),
            None => Self::Unknown(key.to_string()),
        }
    }

    /// Display label; empty for unrecognized keys.
    pub fn label(&self) -> &str {
        match self {
            Self::Known(m) => m.label(),
            Self::Unknown(_) => "",
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Known(m) => m.field(),
            Self::Unknown(key) => key,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<MetricKey> for Metric {
    fn from(m: MetricKey) -> Self {
        Self::Known(m)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}
