fn main() {
    if let Err(e) = shortlink_analytics::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
