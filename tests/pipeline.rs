use std::fs;
use std::path::{Path, PathBuf};

use bench_analysis::config::Config;
use bench_analysis::data::loader;
use bench_analysis::graph::dot_product;
use bench_analysis::graph::line::Metric;
use bench_analysis::graph::pipeline::Pipeline;
use bench_analysis::plot::plot_html;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "bench_analysis_e2e_{}_{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

// One harness record per (variant, size), carrying the full report schema
// including the bookkeeping columns the normalizer strips. Sizes are written
// out of order so the grouper has something to sort.
fn report(run_name: &str) -> String {
    let mut records = Vec::new();
    for variant in [0, 1] {
        for size in [32, 16] {
            records.push(format!(
                r#"{{
                    "name": "CPUFixture/BatchedDotProduct/{size}/{size}/{variant}",
                    "run_name": "{run_name}",
                    "run_type": "iteration",
                    "family_index": 0,
                    "per_family_instance_index": 0,
                    "repetitions": 1,
                    "repetition_index": 0,
                    "threads": 1,
                    "iterations": 1000,
                    "real_time": {real},
                    "cpu_time": {cpu},
                    "time_unit": "ns",
                    "rows": {size}.0,
                    "columns": {size}.0,
                    "type": {variant}.0
                }}"#,
                real = (size * (variant + 1)) as f64,
                cpu = (size * (variant + 1)) as f64 * 0.9,
            ));
        }
    }
    format!(r#"{{"context": {{}}, "benchmarks": [{}]}}"#, records.join(","))
}

fn write_run(root: &Path, name: &str, flags: &str, threads: u32) {
    let dir = root.join("dot_product").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.txt"), format!("{flags}\n{threads}\n")).unwrap();
    fs::write(dir.join("report.json"), report(name)).unwrap();
}

fn fixture(name: &str) -> (Config, Vec<String>) {
    let root = scratch(name);
    write_run(&root, "run_a", "-O2", 4);
    write_run(&root, "run_b", "-O3", 8);
    let config = Config {
        reports_root: root,
        clock_ghz: 2.5,
    };
    (config, vec!["run_a".to_string(), "run_b".to_string()])
}

#[test]
fn aggregation_keeps_every_row() {
    let (config, runs) = fixture("rows");
    let frame = loader::load_runs(
        &config,
        "dot_product",
        dot_product::DROP_COLUMNS,
        &runs,
    )
    .unwrap();
    // 2 runs x 2 variants x 2 sizes
    assert_eq!(frame.len(), 8);
}

#[test]
fn two_runs_two_variants_make_four_sorted_groups() {
    let (config, runs) = fixture("groups");
    let pipeline = Pipeline::new(&config, dot_product::graph_spec());
    let lines = pipeline.lines(&runs, Metric::RealTime).unwrap();

    // group order follows first appearance in the aggregated dataset:
    // run_a's variants first, then run_b's
    let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "naive FLAGS: -O2 | THREADS: 4",
            "parallel FLAGS: -O2 | THREADS: 4",
            "naive FLAGS: -O3 | THREADS: 8",
            "parallel FLAGS: -O3 | THREADS: 8",
        ]
    );
    for line in &lines {
        assert_eq!(line.xs, vec![16, 32]);
        assert_eq!(line.ys.len(), 2);
    }
    // naive rows carry real_time == size in the fixture
    assert_eq!(lines[0].ys, vec![16.0, 32.0]);
    // parallel rows carry real_time == 2 * size
    assert_eq!(lines[1].ys, vec![32.0, 64.0]);
}

#[test]
fn throughput_lines_are_architecture_normalized() {
    let (config, runs) = fixture("throughput");
    let pipeline = Pipeline::new(&config, dot_product::graph_spec());
    let lines = pipeline.lines(&runs, Metric::Throughput).unwrap();
    // naive, size 16: workload 16*(2*16+3) = 560, cycles 16 * 2.5 = 40
    assert!((lines[0].ys[0] - 560.0 / 40.0).abs() < 1e-12);
}

#[test]
fn rendered_chart_lists_every_group_in_the_legend() {
    let (config, runs) = fixture("render");
    let pipeline = Pipeline::new(&config, dot_product::graph_spec());
    let lines = pipeline.lines(&runs, Metric::RealTime).unwrap();

    let out = config.reports_root.join("dot_product_time.html");
    plot_html::render(
        &lines,
        "batched dot product computation time",
        Metric::RealTime,
        &out,
    )
    .unwrap();
    let html = fs::read_to_string(&out).unwrap();
    for label in [
        "naive FLAGS: -O2 | THREADS: 4",
        "parallel FLAGS: -O3 | THREADS: 8",
    ] {
        assert!(html.contains(label));
    }
}

#[test]
fn merged_table_shows_settings_and_sizes() {
    let (config, runs) = fixture("table");
    let pipeline = Pipeline::new(&config, dot_product::graph_spec());
    let table = pipeline.show(&runs).unwrap();
    assert!(table.contains("settings"));
    assert!(table.contains("FLAGS: -O2 | THREADS: 4"));
    assert!(table.contains("real_time"));
}
