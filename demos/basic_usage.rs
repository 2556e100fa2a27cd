//! Basic logger hierarchy usage
//!
//! Demonstrates named loggers, threshold inheritance and propagation with
//! programmatically attached outputters.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_hierarchy::plugins::ConsoleWriter;
use rust_logger_hierarchy::prelude::*;
use rust_logger_hierarchy::{info, StringOutputter};

fn main() -> Result<()> {
    println!("=== Rust Logger Hierarchy - Basic Usage Example ===\n");

    let context = LoggerContext::new();

    // Root writes everything it receives to stdout
    let root = context.root();
    let formatter = BasicFormatter::new("$time [$level] $logger: $msg\n")?;
    root.add_outputter(StringOutputter::new(formatter, ConsoleWriter::Stdout));
    root.set_threshold(LogLevel::INFO);

    // A noisier subsystem
    context.get("net").set_threshold(LogLevel::DEBUG);
    context.configure();

    println!("1. Thresholds are inherited:");
    let http = context.get("net.http");
    println!("   net.http threshold = {}", http.threshold());
    http.debug("accepted connection (visible, inherited DEBUG from net)");
    context.get("db").debug("query plan (hidden, inherited INFO from root)");
    context.get("db").info("connected (visible)");

    println!("\n2. Custom levels sit between the defaults:");
    let audit = LogLevel::custom(450);
    http.log(audit, "audit event");

    println!("\n3. Stopping propagation:");
    let quiet = context.get("net.quiet");
    quiet.set_no_propagate(true);
    info!(quiet, "never reaches root's outputter ({} outputs here)", quiet.output_count());

    let metrics = context.metrics();
    println!(
        "\nDispatched: {}, filtered: {}",
        metrics.dispatched(),
        metrics.filtered()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
