// File: crates/screener-chart/src/title.rs
// Summary: Chart title policy: metric label plus a population suffix.

use crate::metric::Metric;
use crate::sector::SectorFilter;

/// Label used when no sectors are selected and the whole universe is averaged.
pub const DEFAULT_UNIVERSE_LABEL: &str = "FTSE 250";

pub fn compose_title(metric: &Metric, sectors: &SectorFilter, universe_label: &str) -> String {
    let mut title = format!("{} Comparison", metric.label());
    if let Some(sector) = sectors.single() {
        title.push_str(&format!(" for {sector} Sector"));
    } else if sectors.len() > 1 {
        title.push_str(&format!(" for {} Selected Sectors", sectors.len()));
    } else {
        title.push_str(&format!(" for {universe_label}"));
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricKey;

    #[test]
    fn single_sector_suffix() {
        let t = compose_title(&MetricKey::Pe.into(), &SectorFilter::new(["Tech"]), DEFAULT_UNIVERSE_LABEL);
        assert_eq!(t, "P/E Ratio Comparison for Tech Sector");
    }

    #[test]
    fn multiple_sectors_are_counted() {
        let f = SectorFilter::new(["Tech", "Energy", "Utilities"]);
        let t = compose_title(&MetricKey::De.into(), &f, DEFAULT_UNIVERSE_LABEL);
        assert_eq!(t, "Debt/Equity (%) Comparison for 3 Selected Sectors");
    }

    #[test]
    fn no_sectors_uses_universe_label() {
        let t = compose_title(&MetricKey::Roe.into(), &SectorFilter::all(), DEFAULT_UNIVERSE_LABEL);
        assert_eq!(t, "ROE (%) Comparison for FTSE 250");
        let t = compose_title(&MetricKey::Roe.into(), &SectorFilter::all(), "S&P 500");
        assert_eq!(t, "ROE (%) Comparison for S&P 500");
    }

    #[test]
    fn unknown_metric_has_empty_label() {
        let t = compose_title(&Metric::parse("xyz"), &SectorFilter::all(), DEFAULT_UNIVERSE_LABEL);
        assert_eq!(t, " Comparison for FTSE 250");
    }
}
