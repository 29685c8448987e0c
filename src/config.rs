use std::env;
use std::path::PathBuf;

use anyhow::Context;

/// Directory the benchmark harness drops its reports into, relative to the
/// working directory unless overridden.
pub const DEFAULT_REPORTS_ROOT: &str = "benchmarks/reports";

/// Clock frequency (GHz) of the machine the benchmarks ran on. Used to turn
/// elapsed nanoseconds into an estimated cycle count.
pub const DEFAULT_CLOCK_GHZ: f64 = 2.5;

#[derive(Debug, Clone)]
pub struct Config {
    pub reports_root: PathBuf,
    pub clock_ghz: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reports_root: PathBuf::from(DEFAULT_REPORTS_ROOT),
            clock_ghz: DEFAULT_CLOCK_GHZ,
        }
    }
}

impl Config {
    /// Defaults, overridable through `BENCH_REPORTS_ROOT` and
    /// `BENCH_CLOCK_GHZ`.
    pub fn from_env() -> anyhow::Result<Self> {
        let reports_root = match env::var("BENCH_REPORTS_ROOT") {
            Ok(root) => PathBuf::from(root),
            Err(_) => PathBuf::from(DEFAULT_REPORTS_ROOT),
        };
        let clock_ghz = match env::var("BENCH_CLOCK_GHZ") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("BENCH_CLOCK_GHZ {raw:?} is not a number"))?,
            Err(_) => DEFAULT_CLOCK_GHZ,
        };
        Ok(Self {
            reports_root,
            clock_ghz,
        })
    }
}
