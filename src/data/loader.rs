use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::Config;
use crate::data::frame::Frame;
use crate::error::AnalysisError;

pub const REPORT_FILE: &str = "report.json";
pub const DESCRIPTOR_FILE: &str = "config.txt";
pub const SETTINGS_COLUMN: &str = "settings";

/// One benchmark execution: where its files live and how the binary that
/// produced them was built.
#[derive(Debug, Clone)]
pub struct RunDescriptor {
    pub dir: PathBuf,
    pub flags: String,
    pub threads: u32,
}

impl RunDescriptor {
    /// Label distinguishing this run's rows from every other run's, even
    /// when all measured columns collide.
    pub fn settings_label(&self) -> String {
        format!("FLAGS: {} | THREADS: {}", self.flags, self.threads)
    }
}

fn read_file(path: &Path) -> Result<String, AnalysisError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AnalysisError::MissingReport(path.to_path_buf())
        } else {
            AnalysisError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Parse the two-line descriptor: build flags, then a thread count.
fn read_descriptor(dir: &Path) -> Result<RunDescriptor, AnalysisError> {
    let path = dir.join(DESCRIPTOR_FILE);
    let text = read_file(&path)?;
    let mut lines = text.lines();
    let flags = lines.next().unwrap_or("").trim_end().to_string();
    let threads_line = lines.next().unwrap_or("").trim().to_string();
    let threads = threads_line
        .parse()
        .map_err(|_| AnalysisError::MalformedDescriptor {
            path,
            line: threads_line.clone(),
        })?;
    Ok(RunDescriptor {
        dir: dir.to_path_buf(),
        flags,
        threads,
    })
}

/// Parse the report: one row per record under the `benchmarks` key.
fn parse_report(path: &Path) -> Result<Frame, AnalysisError> {
    let text = read_file(path)?;
    let report: Value = serde_json::from_str(&text).map_err(|e| AnalysisError::InvalidReport {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let records = report
        .get("benchmarks")
        .and_then(Value::as_array)
        .ok_or_else(|| AnalysisError::InvalidReport {
            path: path.to_path_buf(),
            reason: "no `benchmarks` list".to_string(),
        })?;
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        match record {
            Value::Object(map) => rows.push(map.clone()),
            _ => {
                return Err(AnalysisError::InvalidReport {
                    path: path.to_path_buf(),
                    reason: "`benchmarks` entry is not an object".to_string(),
                })
            }
        }
    }
    Frame::from_records(rows)
}

/// Load one run directory under `<reports_root>/<benchmark_type>/<name>`:
/// the report rows plus a synthesized `settings` column.
pub fn load_run(config: &Config, benchmark_type: &str, name: &str) -> Result<Frame, AnalysisError> {
    let dir = config.reports_root.join(benchmark_type).join(name);
    let descriptor = read_descriptor(&dir)?;
    let mut frame = parse_report(&dir.join(REPORT_FILE))?;
    frame.set_column(SETTINGS_COLUMN, &descriptor.settings_label())?;
    Ok(frame)
}

/// Load and normalize every named run in caller order and concatenate the
/// results into one table. No deduplication, no row reordering.
pub fn load_runs(
    config: &Config,
    benchmark_type: &str,
    drop_columns: &[&str],
    names: &[String],
) -> Result<Frame, AnalysisError> {
    let mut frames = Vec::with_capacity(names.len());
    for name in names {
        println!("[INFO] loading {benchmark_type}/{name} ...");
        let frame = load_run(config, benchmark_type, name)?.drop_columns(drop_columns)?;
        frames.push(frame);
    }
    Frame::concat(frames)
}
