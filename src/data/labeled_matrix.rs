//! Dense labeled matrix for compositional data.

use crate::error::{ProprError, Result};
use nalgebra::DMatrix;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A dense matrix carrying row and column identifiers.
///
/// Rows represent observations (samples), columns represent features
/// (parts of the composition). Every transformation and pairwise statistic
/// in this crate takes and returns a `LabeledMatrix`, so feature names flow
/// through to the final pair table.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    /// Values (observations × features).
    data: DMatrix<f64>,
    /// Row identifiers.
    row_ids: Vec<String>,
    /// Column identifiers.
    col_ids: Vec<String>,
}

impl LabeledMatrix {
    /// Create a new LabeledMatrix from a dense matrix and identifiers.
    pub fn new(data: DMatrix<f64>, row_ids: Vec<String>, col_ids: Vec<String>) -> Result<Self> {
        let (nrows, ncols) = data.shape();
        if nrows != row_ids.len() {
            return Err(ProprError::DimensionMismatch {
                expected: nrows,
                actual: row_ids.len(),
            });
        }
        if ncols != col_ids.len() {
            return Err(ProprError::DimensionMismatch {
                expected: ncols,
                actual: col_ids.len(),
            });
        }
        Ok(Self {
            data,
            row_ids,
            col_ids,
        })
    }

    /// Build from row-major values.
    pub fn from_row_slice(
        nrows: usize,
        ncols: usize,
        values: &[f64],
        row_ids: Vec<String>,
        col_ids: Vec<String>,
    ) -> Result<Self> {
        if values.len() != nrows * ncols {
            return Err(ProprError::DimensionMismatch {
                expected: nrows * ncols,
                actual: values.len(),
            });
        }
        Self::new(DMatrix::from_row_slice(nrows, ncols, values), row_ids, col_ids)
    }

    /// Wrap a matrix with generated labels: rows `1..=N`, columns `V1..=VD`.
    pub fn with_default_labels(data: DMatrix<f64>) -> Self {
        let row_ids = (1..=data.nrows()).map(|i| i.to_string()).collect();
        let col_ids = (1..=data.ncols()).map(|j| format!("V{}", j)).collect();
        Self {
            data,
            row_ids,
            col_ids,
        }
    }

    /// Square matrix labeled on both axes by the same feature names.
    pub(crate) fn square(data: DMatrix<f64>, ids: &[String]) -> Self {
        debug_assert_eq!(data.nrows(), ids.len());
        debug_assert_eq!(data.ncols(), ids.len());
        Self {
            data,
            row_ids: ids.to_vec(),
            col_ids: ids.to_vec(),
        }
    }

    /// Same labels, new values of identical shape.
    pub(crate) fn with_data(&self, data: DMatrix<f64>) -> Self {
        debug_assert_eq!(data.shape(), self.data.shape());
        Self {
            data,
            row_ids: self.row_ids.clone(),
            col_ids: self.col_ids.clone(),
        }
    }

    /// Load a labeled matrix from a TSV file.
    ///
    /// Expected format:
    /// - First row: a corner label, then column IDs
    /// - Subsequent rows: row ID followed by values
    ///
    /// `NA`, `NaN` and empty cells are read as missing (NaN).
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header_line = lines
            .next()
            .ok_or_else(|| ProprError::EmptyData("Empty TSV file".to_string()))??;
        let header: Vec<&str> = header_line.split('\t').collect();
        if header.len() < 2 {
            return Err(ProprError::EmptyData(
                "TSV must have at least one column".to_string(),
            ));
        }
        let col_ids: Vec<String> = header[1..].iter().map(|s| s.trim().to_string()).collect();
        let n_cols = col_ids.len();

        let mut row_ids = Vec::new();
        let mut values = Vec::new();

        for line_result in lines {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() - 1 != n_cols {
                return Err(ProprError::DimensionMismatch {
                    expected: n_cols,
                    actual: fields.len() - 1,
                });
            }
            let row_idx = row_ids.len();
            row_ids.push(fields[0].trim().to_string());
            for (col_idx, token) in fields[1..].iter().enumerate() {
                values.push(parse_value(token, row_idx, col_idx)?);
            }
        }

        if row_ids.is_empty() {
            return Err(ProprError::EmptyData("No rows in TSV".to_string()));
        }

        let n_rows = row_ids.len();
        Self::from_row_slice(n_rows, n_cols, &values, row_ids, col_ids)
    }

    /// Write the matrix to a TSV file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        write!(writer, "id")?;
        for col_id in &self.col_ids {
            write!(writer, "\t{}", col_id)?;
        }
        writeln!(writer)?;

        for (i, row_id) in self.row_ids.iter().enumerate() {
            write!(writer, "{}", row_id)?;
            for j in 0..self.ncols() {
                write!(writer, "\t{}", format_value(self.data[(i, j)]))?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Get the value at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    /// Number of rows (observations).
    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns (features).
    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Row identifiers.
    #[inline]
    pub fn row_ids(&self) -> &[String] {
        &self.row_ids
    }

    /// Column identifiers.
    #[inline]
    pub fn col_ids(&self) -> &[String] {
        &self.col_ids
    }

    /// Get reference to the underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Consume and return the underlying matrix.
    pub fn into_matrix(self) -> DMatrix<f64> {
        self.data
    }

    /// Get a row as a vector.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.data.row(row).iter().cloned().collect()
    }

    /// Get a column as a vector.
    pub fn col(&self, col: usize) -> Vec<f64> {
        self.data.column(col).iter().cloned().collect()
    }

    /// Position of a column by name.
    pub fn col_index(&self, name: &str) -> Option<usize> {
        self.col_ids.iter().position(|c| c == name)
    }

    /// Look up a value by row and column names.
    pub fn get_named(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.row_ids.iter().position(|r| r == row)?;
        let j = self.col_index(col)?;
        Some(self.data[(i, j)])
    }

    /// Row sums.
    pub fn row_sums(&self) -> Vec<f64> {
        self.data.row_iter().map(|r| r.sum()).collect()
    }

    /// Row means.
    pub fn row_means(&self) -> Vec<f64> {
        let n = self.ncols() as f64;
        self.data.row_iter().map(|r| r.sum() / n).collect()
    }

    /// True when the matrix equals its transpose, within `tol`.
    ///
    /// NaN entries are compared by position: a NaN must mirror a NaN.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        if self.nrows() != self.ncols() {
            return false;
        }
        let n = self.nrows();
        for i in 0..n {
            for j in 0..i {
                let (a, b) = (self.data[(i, j)], self.data[(j, i)]);
                if a.is_nan() || b.is_nan() {
                    if a.is_nan() != b.is_nan() {
                        return false;
                    }
                } else if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

fn parse_value(token: &str, row: usize, col: usize) -> Result<f64> {
    let token = token.trim();
    match token {
        "" | "NA" | "NaN" | "nan" => Ok(f64::NAN),
        _ => token.parse().map_err(|_| ProprError::InvalidValue {
            value: token.to_string(),
            row,
            col,
        }),
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NA".to_string()
    } else {
        value.to_string()
    }
}
