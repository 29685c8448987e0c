use crate::graph::pipeline::GraphSpec;

/// Report-schema bookkeeping columns the harness writes into every record.
/// None carry analytical value and several collide across variants.
pub const DROP_COLUMNS: &[&str] = &[
    "name",
    "run_name",
    "family_index",
    "per_family_instance_index",
    "repetitions",
    "repetition_index",
    "threads",
    "run_type",
];

/// Closed enumeration of the dot-product kernel implementations under test,
/// indexed by the harness's `type` counter.
pub const VARIANT_LABELS: &[&str] = &[
    "naive",
    "parallel",
    "parallel-simd",
    "parallel-blocked",
    "parallel-blocked-simd",
    "parallel-row-split-simd",
];

/// Operation count of one batched dot product over `shape`-length rows.
fn workload(shape: i64) -> f64 {
    let s = shape as f64;
    s * (2.0 * s + 3.0)
}

pub fn graph_spec() -> GraphSpec {
    GraphSpec {
        benchmark_type: "dot_product",
        drop_columns: DROP_COLUMNS,
        variant_labels: VARIANT_LABELS,
        workload,
        title: "batched dot product computation time",
    }
}
