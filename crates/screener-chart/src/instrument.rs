// File: crates/screener-chart/src/instrument.rs
// Summary: Instrument records and ordered datasets decoded from row-oriented JSON or CSV.
// Notes:
// - `ticker` and `sector` are the only required fields; a row without them is
//   rejected with its position so the caller can find it.
// - Metric cells that are missing, null, non-numeric or non-finite decode to `None`.

use std::collections::BTreeMap;
use std::io;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChartError, DatasetKind, Result};
use crate::metric::{Metric, MetricKey};

#[derive(Clone, Debug, PartialEq)]
pub struct Instrument {
    pub ticker: String,
    pub sector: String,
    pub pe: Option<f64>,
    pub pb: Option<f64>,
    pub de: Option<f64>,
    pub roe: Option<f64>,
    /// Other numeric columns, keyed by field name.
    pub extra: BTreeMap<String, f64>,
}

impl Instrument {
    pub fn new(ticker: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            sector: sector.into(),
            pe: None,
            pb: None,
            de: None,
            roe: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style setter for one of the known metrics.
    pub fn with(mut self, key: MetricKey, value: f64) -> Self {
        *self.slot_mut(key) = finite(value);
        self
    }

    fn slot_mut(&mut self, key: MetricKey) -> &mut Option<f64> {
        match key {
            MetricKey::Pe => &mut self.pe,
            MetricKey::Pb => &mut self.pb,
            MetricKey::De => &mut self.de,
            MetricKey::Roe => &mut self.roe,
        }
    }

    pub fn metric(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Pe => self.pe,
            MetricKey::Pb => self.pb,
            MetricKey::De => self.de,
            MetricKey::Roe => self.roe,
        }
    }

    /// Value for `metric`; unrecognized keys fall back to the raw extra columns.
    pub fn value(&self, metric: &Metric) -> Option<f64> {
        match metric {
            Metric::Known(key) => self.metric(*key),
            Metric::Unknown(field) => self.extra.get(field).copied(),
        }
    }

    fn set_field(&mut self, field: &str, value: Option<f64>) {
        match MetricKey::from_field(field) {
            Some(key) => *self.slot_mut(key) = value,
            None => {
                if let Some(v) = value {
                    self.extra.insert(field.to_string(), v);
                }
            }
        }
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Ordered sequence of instruments. Order is preserved from input to output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Instrument>,
}

#[derive(Deserialize)]
struct JsonRow {
    #[serde(default)]
    ticker: Option<Value>,
    #[serde(default)]
    sector: Option<Value>,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl Dataset {
    pub fn new(records: Vec<Instrument>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instrument> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Instrument] {
        &self.records
    }

    /// Decode a JSON array of row objects.
    pub fn from_json_str(kind: DatasetKind, json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|source| ChartError::Json { dataset: kind, source })?;
        Self::from_json_value(kind, value)
    }

    pub fn from_json_value(kind: DatasetKind, value: Value) -> Result<Self> {
        let rows = match value {
            Value::Array(rows) => rows,
            other => {
                return Err(ChartError::InvalidDataset {
                    dataset: kind,
                    reason: format!("expected an array, found {}", json_type(&other)),
                })
            }
        };

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            if !row.is_object() {
                return Err(ChartError::malformed(
                    kind,
                    index,
                    format!("expected an object, found {}", json_type(&row)),
                ));
            }
            let row = JsonRow::deserialize(row)
                .map_err(|e| ChartError::malformed(kind, index, e.to_string()))?;
            let ticker = required_str(kind, index, "ticker", row.ticker)?;
            let sector = required_str(kind, index, "sector", row.sector)?;

            let mut inst = Instrument::new(ticker, sector);
            for (field, cell) in &row.fields {
                inst.set_field(field, cell.as_f64().and_then(finite));
            }
            records.push(inst);
        }
        Ok(Self { records })
    }

    /// Decode CSV with a header row. Empty or non-numeric metric cells are absent.
    pub fn from_csv_reader<R: io::Read>(kind: DatasetKind, reader: R) -> Result<Self> {
        let csv_err = |source| ChartError::Csv { dataset: kind, source };
        // flexible: a short row must surface as MalformedInput at its own index
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers().map_err(csv_err)?.clone();
        let ticker_col = headers.iter().position(|h| h == "ticker");
        let sector_col = headers.iter().position(|h| h == "sector");

        let mut records = Vec::new();
        for (index, row) in rdr.records().enumerate() {
            let row = row.map_err(csv_err)?;
            let cell = |col: Option<usize>, name: &str| {
                col.and_then(|c| row.get(c))
                    .map(str::to_string)
                    .ok_or_else(|| ChartError::malformed(kind, index, format!("missing `{name}` field")))
            };
            let mut inst = Instrument::new(cell(ticker_col, "ticker")?, cell(sector_col, "sector")?);
            for (col, field) in headers.iter().enumerate() {
                if Some(col) == ticker_col || Some(col) == sector_col {
                    continue;
                }
                let value = row.get(col).and_then(|s| s.parse::<f64>().ok()).and_then(finite);
                inst.set_field(field, value);
            }
            records.push(inst);
        }
        Ok(Self { records })
    }
}

impl From<Vec<Instrument>> for Dataset {
    fn from(records: Vec<Instrument>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Instrument> for Dataset {
    fn from_iter<I: IntoIterator<Item = Instrument>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Instrument;
    type IntoIter = std::slice::Iter<'a, Instrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn required_str(kind: DatasetKind, index: usize, name: &str, cell: Option<Value>) -> Result<String> {
    match cell {
        Some(Value::String(s)) => Ok(s),
        None | Some(Value::Null) => Err(ChartError::malformed(kind, index, format!("missing `{name}` field"))),
        Some(other) => Err(ChartError::malformed(
            kind,
            index,
            format!("`{name}` must be a string, found {}", json_type(&other)),
        )),
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
