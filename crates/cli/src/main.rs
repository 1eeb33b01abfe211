//! perf-c2c CLI entry point.

fn main() {
    if let Err(e) = perf_c2c_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
