//! Long-format table of pairwise proportionality statistics.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Statistics for one unordered feature pair.
///
/// `row` is the later feature in column order and `col` the earlier one.
/// `b` and `phi` are orientation-dependent and are reported for that
/// `(row, col)` orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairStat {
    /// Label of the higher-index feature.
    pub row: String,
    /// Label of the lower-index feature.
    pub col: String,
    /// SMA slope of `row` on `col`.
    pub b: f64,
    /// P-value of the SMA slope-equals-one test.
    pub p: f64,
    /// Squared correlation.
    pub r2: f64,
    /// Variance of the log-ratio.
    pub vlr: f64,
    /// Asymmetric phi.
    pub phi: f64,
    /// Symmetric phi.
    pub phisym: f64,
}

/// Column of a [`PairTable`] to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairMetric {
    B,
    P,
    R2,
    Vlr,
    Phi,
    Phisym,
}

impl PairMetric {
    /// Value of this metric for a pair.
    pub fn value(&self, pair: &PairStat) -> f64 {
        match self {
            PairMetric::B => pair.b,
            PairMetric::P => pair.p,
            PairMetric::R2 => pair.r2,
            PairMetric::Vlr => pair.vlr,
            PairMetric::Phi => pair.phi,
            PairMetric::Phisym => pair.phisym,
        }
    }
}

/// All pairs, in lower-triangle column-major order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairTable {
    pub pairs: Vec<PairStat>,
}

impl PairTable {
    /// Create a table from pairs.
    pub fn new(pairs: Vec<PairStat>) -> Self {
        Self { pairs }
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over pairs.
    pub fn iter(&self) -> std::slice::Iter<'_, PairStat> {
        self.pairs.iter()
    }

    /// Find a pair by its exact orientation.
    pub fn get(&self, row: &str, col: &str) -> Option<&PairStat> {
        self.pairs.iter().find(|p| p.row == row && p.col == col)
    }

    /// Find a pair regardless of orientation.
    pub fn find(&self, a: &str, b: &str) -> Option<&PairStat> {
        self.get(a, b).or_else(|| self.get(b, a))
    }

    /// Pairs sorted ascending by a metric, NaN last.
    pub fn sorted_by(&self, metric: PairMetric) -> Vec<&PairStat> {
        let mut sorted: Vec<_> = self.pairs.iter().collect();
        sorted.sort_by(|a, b| metric.value(a).total_cmp(&metric.value(b)));
        // total_cmp orders negative NaN first; push every NaN to the end
        sorted.sort_by_key(|p| metric.value(p).is_nan());
        sorted
    }

    /// Keep only pairs with `phi` at or below `max_phi`.
    pub fn filter_phi(&self, max_phi: f64) -> PairTable {
        PairTable::new(
            self.pairs
                .iter()
                .filter(|p| p.phi <= max_phi)
                .cloned()
                .collect(),
        )
    }

    /// Write the table to a TSV file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_tsv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the table as TSV to any writer.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "row\tcol\tb\tp\tr2\tvlr\tphi\tphisym")?;
        for p in &self.pairs {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                p.row, p.col, p.b, p.p, p.r2, p.vlr, p.phi, p.phisym
            )?;
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a PairTable {
    type Item = &'a PairStat;
    type IntoIter = std::slice::Iter<'a, PairStat>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
