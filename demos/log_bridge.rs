//! Routing the `log` crate facade into the hierarchy
//!
//! Run with: cargo run --example log_bridge

use rust_logger_hierarchy::bridge::LogBridge;
use rust_logger_hierarchy::{self as logging, Config, Result};

fn main() -> Result<()> {
    let config: Config = "
    [loggers]
    root = WARN, console
    demo.chatty = TRACE

    [console]
    type = console
    stream = stdout
    format = [$level] $logger ($file:$line): $msg
    "
    .parse()?;
    logging::context().reconfigure(&config)?;

    if let Err(e) = LogBridge::new(logging::context().clone()).init() {
        eprintln!("failed to install bridge: {}", e);
        return Ok(());
    }

    log::info!(target: "demo::quiet", "hidden: below WARN");
    log::warn!(target: "demo::quiet", "visible warning");
    log::trace!(target: "demo::chatty", "visible trace from {}", "demo.chatty");

    Ok(())
}
