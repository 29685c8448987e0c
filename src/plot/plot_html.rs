use std::fs;
use std::path::Path;

use plotly::common::{Mode, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};

use crate::error::AnalysisError;
use crate::graph::line::{Line, Metric};

fn add_traces(plot: &mut Plot, lines: &[Line]) {
    for line in lines {
        let scatter = Scatter::new(line.xs.clone(), line.ys.clone())
            .mode(Mode::Lines)
            .name(&line.label);
        plot.add_trace(scatter);
    }
}

/// Draw every line on shared axes and write a standalone HTML page.
pub fn render(lines: &[Line], title: &str, metric: Metric, path: &Path) -> Result<(), AnalysisError> {
    let mut plot = Plot::new();
    add_traces(&mut plot, lines);

    let layout = Layout::new()
        .title(Title::new(title))
        .x_axis(Axis::new().title(Title::new("matrix size")))
        .y_axis(Axis::new().title(Title::new(metric.y_axis_title())));
    plot.set_layout(layout);

    // This already contains <div id="..."> + <script>...</script>
    let plot_html = plot.to_inline_html(None);

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-latest.min.js"></script>
</head>
<body>
{plot_html}
</body>
</html>
"#
    );

    fs::write(path, html).map_err(|e| AnalysisError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
