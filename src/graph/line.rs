use serde::Serialize;

use crate::error::AnalysisError;
use crate::graph::group::{Group, SHAPE_COLUMN};

pub const REAL_TIME_COLUMN: &str = "real_time";
pub const CPU_TIME_COLUMN: &str = "cpu_time";

/// Which measurement a line carries on its y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Raw wall-clock time per sample.
    RealTime,
    /// Raw processor time per sample.
    CpuTime,
    /// Workload operations per estimated clock cycle. Raw elapsed time is
    /// not comparable across machines; this is architecture-normalized.
    Throughput,
}

impl Metric {
    pub fn y_axis_title(self) -> &'static str {
        match self {
            Metric::RealTime | Metric::CpuTime => "nanoseconds",
            Metric::Throughput => "operations per cycle",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            Metric::RealTime => "time",
            Metric::CpuTime => "cpu",
            Metric::Throughput => "throughput",
        }
    }
}

/// A labeled (x, y) series ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub label: String,
    pub xs: Vec<i64>,
    pub ys: Vec<f64>,
}

/// Resolve a variant code against a closed label table. Codes outside the
/// table fail rather than silently mislabeling an unrecognized variant.
pub fn variant_label(
    labels: &'static [&'static str],
    code: i64,
) -> Result<&'static str, AnalysisError> {
    usize::try_from(code)
        .ok()
        .and_then(|i| labels.get(i).copied())
        .ok_or(AnalysisError::UnknownVariant(code))
}

/// Reduce one group to a single labeled series. `workload` gives the
/// operation count for one sample of a given size; it only matters in
/// throughput mode.
pub fn extract_line(
    group: &Group,
    labels: &'static [&'static str],
    metric: Metric,
    clock_ghz: f64,
    workload: fn(i64) -> f64,
) -> Result<Line, AnalysisError> {
    let label = format!("{} {}", variant_label(labels, group.variant)?, group.settings);

    let xs = group.frame.column_i64(SHAPE_COLUMN)?;
    let ys = match metric {
        Metric::RealTime => group.frame.column_f64(REAL_TIME_COLUMN)?,
        Metric::CpuTime => group.frame.column_f64(CPU_TIME_COLUMN)?,
        Metric::Throughput => {
            let times = group.frame.column_f64(REAL_TIME_COLUMN)?;
            // elapsed ns times cycles-per-ns gives estimated cycles
            xs.iter()
                .zip(times)
                .map(|(shape, time)| workload(*shape) / (time * clock_ghz))
                .collect()
        }
    };
    Ok(Line { label, xs, ys })
}
