mod app;
mod cli;

fn main() {
    let cli = cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(ffopt::logging::default_log_path);
    if let Err(e) = ffopt::logging::init(&log_path) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    app::run(cli);
}
