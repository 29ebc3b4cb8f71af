use float_workload::{report, run, WorkloadConfig};
use log::info;

fn main() {
    env_logger::init();

    let config = WorkloadConfig::new();
    info!("running float workload with {} iterations", config.iterations);

    let sum = run(&config);
    println!("{}", report(sum));
}
