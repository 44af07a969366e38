// File: crates/screener-chart/src/stats.rs
// Summary: Reference-average computation over the averaging population.

use crate::instrument::Dataset;
use crate::metric::Metric;
use crate::sector::SectorFilter;

/// Arithmetic mean of the defined values. Absent and non-finite values are
/// excluded from both numerator and denominator; `None` when nothing is left.
pub fn mean_defined<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, n) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return None;
    }
    let mean = sum / n as f64;
    mean.is_finite().then_some(mean)
}

/// Sector (or whole-universe) average of `metric`, together with how many
/// records contributed a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopulationAverage {
    pub population: usize,
    pub defined: usize,
    pub mean: Option<f64>,
}

pub fn sector_average(universe: &Dataset, metric: &Metric, sectors: &SectorFilter) -> PopulationAverage {
    let values: Vec<Option<f64>> = sectors.select(universe).map(|inst| inst.value(metric)).collect();
    PopulationAverage {
        population: values.len(),
        defined: values.iter().flatten().count(),
        mean: mean_defined(values),
    }
}
