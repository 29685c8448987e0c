use std::collections::HashMap;

use itertools::Itertools;
use ordered_float::OrderedFloat;
use polars::prelude::*;

use crate::data::frame::Frame;
use crate::data::loader::SETTINGS_COLUMN;
use crate::error::AnalysisError;

/// Variant code column written by the harness as a counter.
pub const VARIANT_COLUMN: &str = "type";
/// Independent variable: the problem size the harness was run at.
pub const SIZE_COLUMN: &str = "columns";
/// Raw size counters replaced by the canonical `shape` field.
pub const RAW_SIZE_COLUMNS: &[&str] = &["rows", "columns"];
pub const SHAPE_COLUMN: &str = "shape";

/// Rows sharing one (variant, settings) pair, sorted ascending by problem
/// size with positional indexing reset.
#[derive(Debug, Clone)]
pub struct Group {
    pub variant: i64,
    pub settings: String,
    pub frame: Frame,
}

impl Group {
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }
}

/// Partition the unified dataset into groups keyed by (variant, settings).
/// Groups come out in the order their key first appears while scanning the
/// aggregated rows, so lines follow the caller's run order.
pub fn group_frame(frame: Frame) -> Result<Vec<Group>, AnalysisError> {
    if frame.is_empty() {
        return Ok(Vec::new());
    }
    let variants = frame.column_f64(VARIANT_COLUMN)?;
    let settings = frame.column_str(SETTINGS_COLUMN)?;
    let sizes = frame.column_f64(SIZE_COLUMN)?;

    let keys: Vec<(i64, String)> = variants
        .iter()
        .zip(&settings)
        .map(|(variant, settings)| (*variant as i64, settings.clone()))
        .collect();
    let mut buckets: HashMap<(i64, String), Vec<(u32, f64)>> = HashMap::new();
    for (i, key) in keys.iter().enumerate() {
        buckets
            .entry(key.clone())
            .or_default()
            .push((i as u32, sizes[i]));
    }
    keys.into_iter()
        .unique()
        .map(|(variant, settings)| {
            let members = buckets
                .remove(&(variant, settings.clone()))
                .unwrap_or_default();
            finish_group(&frame, variant, settings, members)
        })
        .collect()
}

/// Pull one group's rows out in size order (stable), cast the key columns
/// to integers, and fold `rows`/`columns` into a single `shape` field.
fn finish_group(
    frame: &Frame,
    variant: i64,
    settings: String,
    mut members: Vec<(u32, f64)>,
) -> Result<Group, AnalysisError> {
    if members.is_empty() {
        return Err(AnalysisError::EmptyGroup { variant, settings });
    }
    members.sort_by_key(|(_, size)| OrderedFloat(*size));
    let indices: Vec<u32> = members.iter().map(|(i, _)| *i).collect();
    let mut df = frame.df.take(&IdxCa::from_vec("", indices))?;

    let mut shape = df.column(SIZE_COLUMN)?.cast(&DataType::Int64)?;
    shape.rename(SHAPE_COLUMN);
    let variant_column = df.column(VARIANT_COLUMN)?.cast(&DataType::Int64)?;
    for column in RAW_SIZE_COLUMNS {
        let _ = df.drop_in_place(column);
    }
    df.with_column(shape)?;
    df.with_column(variant_column)?;

    Ok(Group {
        variant,
        settings,
        frame: Frame::new(df),
    })
}
