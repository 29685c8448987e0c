use std::path::PathBuf;

use comfy_table::Table;

use crate::config::Config;
use crate::data::loader;
use crate::error::AnalysisError;
use crate::graph::group::group_frame;
use crate::graph::line::{extract_line, Line, Metric};
use crate::plot::plot_html;

/// Everything that distinguishes one benchmark suite's chart from another's.
/// Only the dot-product suite exists today; a new suite means a new
/// `GraphSpec` value, not a new pipeline.
pub struct GraphSpec {
    pub benchmark_type: &'static str,
    pub drop_columns: &'static [&'static str],
    pub variant_labels: &'static [&'static str],
    pub workload: fn(i64) -> f64,
    pub title: &'static str,
}

pub struct Pipeline<'a> {
    config: &'a Config,
    spec: GraphSpec,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, spec: GraphSpec) -> Self {
        Self { config, spec }
    }

    /// load -> normalize -> aggregate -> group -> extract, one line per
    /// (variant, settings) group.
    pub fn lines(&self, names: &[String], metric: Metric) -> Result<Vec<Line>, AnalysisError> {
        let frame = loader::load_runs(
            self.config,
            self.spec.benchmark_type,
            self.spec.drop_columns,
            names,
        )?;
        let groups = group_frame(frame)?;
        groups
            .iter()
            .map(|group| {
                extract_line(
                    group,
                    self.spec.variant_labels,
                    metric,
                    self.config.clock_ghz,
                    self.spec.workload,
                )
            })
            .collect()
    }

    /// Run the whole pipeline and write the chart next to the working
    /// directory. Returns the written path.
    pub fn run(&self, names: &[String], metric: Metric) -> Result<PathBuf, AnalysisError> {
        let lines = self.lines(names, metric)?;
        let out = PathBuf::from(format!(
            "{}_{}.html",
            self.spec.benchmark_type,
            metric.file_stem()
        ));
        plot_html::render(&lines, self.spec.title, metric, &out)?;
        Ok(out)
    }

    /// Merged, normalized dataset as a text table.
    pub fn show(&self, names: &[String]) -> Result<String, AnalysisError> {
        let frame = loader::load_runs(
            self.config,
            self.spec.benchmark_type,
            self.spec.drop_columns,
            names,
        )?;
        let mut table = Table::new();
        table.set_header(frame.column_names());
        for i in 0..frame.len() {
            if let Some(row) = frame.df.get(i) {
                let cells: Vec<String> = row.iter().map(|value| value.to_string()).collect();
                table.add_row(cells);
            }
        }
        Ok(table.to_string())
    }
}
