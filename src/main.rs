use std::process;

fn main() {
    if let Err(e) = wapi::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
