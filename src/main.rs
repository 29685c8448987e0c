use std::env;

use anyhow::Result;
use bench_analysis::config::Config;
use bench_analysis::graph::dot_product;
use bench_analysis::graph::line::Metric;
use bench_analysis::graph::pipeline::Pipeline;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage: bench_analysis <dp|dp-cpu|dp-tp|dp-show> <run>...");
        return Ok(());
    }

    let config = Config::from_env()?;
    let pipeline = Pipeline::new(&config, dot_product::graph_spec());
    let runs = &args[2..];

    match args[1].as_str() {
        "dp" => {
            let out = pipeline.run(runs, Metric::RealTime)?;
            println!("[INFO] wrote {}", out.display());
        }
        "dp-cpu" => {
            let out = pipeline.run(runs, Metric::CpuTime)?;
            println!("[INFO] wrote {}", out.display());
        }
        "dp-tp" => {
            let out = pipeline.run(runs, Metric::Throughput)?;
            println!("[INFO] wrote {}", out.display());
        }
        "dp-show" => {
            println!("{}", pipeline.show(runs)?);
        }
        _ => println!("Unknown command. Use 'dp', 'dp-cpu', 'dp-tp' or 'dp-show'."),
    }

    Ok(())
}
