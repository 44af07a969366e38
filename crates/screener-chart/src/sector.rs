// File: crates/screener-chart/src/sector.rs
// Summary: Sector selection restricting the averaging population.

use crate::instrument::{Dataset, Instrument};

/// Zero or more sector labels. Empty means "the whole universe".
///
/// Duplicates collapse; first-appearance order is kept so titles are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectorFilter {
    sectors: Vec<String>,
}

impl SectorFilter {
    /// Filter that selects the entire universe.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new<I, S>(sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for s in sectors {
            let s = s.into();
            if !out.contains(&s) {
                out.push(s);
            }
        }
        Self { sectors: out }
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    /// The selected sector when exactly one is selected.
    pub fn single(&self) -> Option<&str> {
        match self.sectors.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn matches(&self, inst: &Instrument) -> bool {
        self.is_empty() || self.sectors.iter().any(|s| *s == inst.sector)
    }

    /// Averaging population: the universe records this filter admits, in order.
    pub fn select<'a>(&'a self, universe: &'a Dataset) -> impl Iterator<Item = &'a Instrument> + 'a {
        universe.iter().filter(move |inst| self.matches(inst))
    }
}

impl<S: Into<String>> FromIterator<S> for SectorFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
