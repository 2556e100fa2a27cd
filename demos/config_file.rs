//! Configuring the default context from a file
//!
//! Writes a configuration to a temporary directory, loads it with
//! `setup_file`, and logs through the configured outputs.
//!
//! Run with: cargo run --example config_file

use rust_logger_hierarchy::{self as logging, warn, LoggerError, Result};
use std::fs;

const CONFIG: &str = "
; everything INFO and up goes to stderr
[loggers]
root = INFO, console
app.db = DEBUG, dbfile, nopropagate

[console]
type = console
stream = stderr
format = $time [$level] $logger: $msg

[dbfile]
type = file
file = db_example.log
format = $datetime $level $file:$line $msg
";

fn main() -> Result<()> {
    println!("=== Rust Logger Hierarchy - Config File Example ===\n");

    let dir = std::env::temp_dir().join("logger_hierarchy_example");
    fs::create_dir_all(&dir).map_err(|e| LoggerError::io_operation("creating example dir", dir.display().to_string(), e))?;
    let config_path = dir.join("logging.ini");
    let log_path = dir.join("db_example.log");
    fs::write(&config_path, CONFIG.replace("db_example.log", &log_path.display().to_string()))
        .map_err(|e| LoggerError::io_operation("writing example config", config_path.display().to_string(), e))?;

    logging::setup_file(&config_path)?;

    let app = logging::get("app");
    let db = logging::get("app.db");

    app.info("application started");
    app.debug("hidden: below INFO");
    db.debug("SELECT 1 (file only)");
    warn!(db, "slow query: {} ms", 1200);

    // Configuring again replaces the tree instead of stacking outputs
    logging::setup_file(&config_path)?;
    app.info("still logged exactly once");

    println!("\nFile output written to {}:", log_path.display());
    let content = fs::read_to_string(&log_path)
        .map_err(|e| LoggerError::io_operation("reading example log", log_path.display().to_string(), e))?;
    print!("{}", content);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
