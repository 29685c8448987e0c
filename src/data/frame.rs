use itertools::Itertools;
use polars::functions::diag_concat_df;
use polars::prelude::*;
use serde_json::{Map, Value};

use crate::error::AnalysisError;

/// One benchmark record as parsed from the report, before it is folded into
/// a column-typed table.
pub type Row = Map<String, Value>;

/// The pipeline's tabular dataset: a thin wrapper over a Polars DataFrame.
/// Stages hand a `Frame` off by value; nothing aliases it across stage
/// boundaries.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub df: DataFrame,
}

impl Frame {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Build a frame from report records. Columns holding any string value
    /// become text columns; everything else is read as f64. Columns we do
    /// not know about pass through untouched.
    pub fn from_records(rows: Vec<Row>) -> Result<Self, AnalysisError> {
        let names: Vec<String> = rows
            .iter()
            .flat_map(|row| row.keys().cloned())
            .unique()
            .collect();
        let mut columns = Vec::with_capacity(names.len());
        for name in &names {
            let textual = rows
                .iter()
                .any(|row| matches!(row.get(name), Some(Value::String(_))));
            let series = if textual {
                let values: Vec<Option<String>> = rows
                    .iter()
                    .map(|row| row.get(name).and_then(Value::as_str).map(str::to_string))
                    .collect();
                Series::new(name, values)
            } else {
                let values: Vec<Option<f64>> = rows
                    .iter()
                    .map(|row| row.get(name).and_then(Value::as_f64))
                    .collect();
                Series::new(name, values)
            };
            columns.push(series);
        }
        Ok(Frame::new(DataFrame::new(columns)?))
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Write `value` into every row under `name`.
    pub fn set_column(&mut self, name: &str, value: &str) -> Result<(), AnalysisError> {
        let column = Series::new(name, vec![value; self.df.height()]);
        self.df.with_column(column)?;
        Ok(())
    }

    /// Remove the named columns. A column absent from the frame means the
    /// report format changed; that must not pass silently.
    pub fn drop_columns(mut self, columns: &[&str]) -> Result<Self, AnalysisError> {
        for column in columns {
            self.df
                .drop_in_place(column)
                .map_err(|_| AnalysisError::SchemaMismatch((*column).to_string()))?;
        }
        Ok(self)
    }

    /// Concatenate tables, keeping row order within each source and source
    /// order across sources. Sources with mismatched column sets come out
    /// as the column union, with missing cells null. No deduplication.
    pub fn concat(frames: impl IntoIterator<Item = Frame>) -> Result<Frame, AnalysisError> {
        let dfs: Vec<DataFrame> = frames.into_iter().map(|frame| frame.df).collect();
        if dfs.is_empty() {
            return Ok(Frame::default());
        }
        Ok(Frame::new(diag_concat_df(&dfs)?))
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Extract a numeric column as Vec<f64>, failing if it is absent or not
    /// a float column.
    pub fn column_f64(&self, column: &str) -> Result<Vec<f64>, AnalysisError> {
        let series = self
            .df
            .column(column)
            .map_err(|_| AnalysisError::SchemaMismatch(column.to_string()))?;
        let values = series
            .f64()
            .map_err(|_| AnalysisError::SchemaMismatch(column.to_string()))?;
        Ok(values.into_no_null_iter().collect())
    }

    /// Extract an integral column as Vec<i64>.
    pub fn column_i64(&self, column: &str) -> Result<Vec<i64>, AnalysisError> {
        let series = self
            .df
            .column(column)
            .map_err(|_| AnalysisError::SchemaMismatch(column.to_string()))?;
        let values = series
            .i64()
            .map_err(|_| AnalysisError::SchemaMismatch(column.to_string()))?;
        Ok(values.into_no_null_iter().collect())
    }

    /// Extract a text column as Vec<String>.
    pub fn column_str(&self, column: &str) -> Result<Vec<String>, AnalysisError> {
        let series = self
            .df
            .column(column)
            .map_err(|_| AnalysisError::SchemaMismatch(column.to_string()))?;
        let values = series
            .utf8()
            .map_err(|_| AnalysisError::SchemaMismatch(column.to_string()))?;
        Ok(values.into_no_null_iter().map(str::to_string).collect())
    }
}
