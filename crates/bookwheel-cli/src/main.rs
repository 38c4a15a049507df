fn main() {
    if let Err(error) = bookwheel_cli::run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
