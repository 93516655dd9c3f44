//! Walks through the logger's sinks: console, file capture and verbose output.

use logger::{
    debug, enable_debug, enable_verbose, error, info, init_file_logging, set_level,
    shutdown_file_logging, verbose, warn, Level,
};

fn main() {
    println!("=== Logger Demo ===\n");

    set_level(Level::Debug);
    enable_debug();

    println!("--- Console sink ---");
    error!("an error on stderr");
    warn!("a warning on stderr");
    info!("an info line on stdout");
    debug!("a debug line on stdout");

    let log_file = std::env::temp_dir().join("logger_demo.log");
    if init_file_logging(&log_file) {
        println!("\n✓ File sink active: {}", log_file.display());
    } else {
        println!("\n✗ Failed to open the file sink");
    }

    println!("--- These lines go to the file, stamped with uptime ---");
    error!("captured error");
    info!("captured info");

    enable_verbose();
    println!("\n--- Verbose output stays on the console ---");
    verbose!("step {} of {}", 1, 2);
    verbose!("step {} of {}", 2, 2);

    shutdown_file_logging();
    println!("\nFile sink closed. Inspect it with: cat {}", log_file.display());
}
