// src/bin/dcdump.rs
use dcdump::cli;

fn main() {
    // Pretty panic reports; parse/network failures take the typed path below.
    let _ = color_eyre::install();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
