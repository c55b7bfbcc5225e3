//! duke - line-oriented task tracking assistant
//!
//! Reads one command per line from stdin and answers on stdout.

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = duke::cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
