//! Basic usage example for the drainlog library.
//!
//! This example demonstrates:
//! - Parsing a plain application log line
//! - Parsing and normalizing a Heroku router log line
//! - Error handling for malformed lines
//! - Feeding lines from stdin, one call per line, the way an ingestion endpoint would
//!
//! Run with `RUST_LOG=drainlog=trace` to see the library's tracing events:
//!
//! ```sh
//! echo '89 <45>1 2016-10-15T08:59:08.723822+00:00 host heroku web.1 - up' | cargo run --example basic
//! ```

use drainlog::{HerokuParser, LineParser};
use std::io::{self, BufRead, IsTerminal};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("drainlog Basic Usage Examples");
    println!("=============================\n");

    application_log_example()?;
    router_log_example()?;
    error_handling_example();
    stdin_example()?;

    Ok(())
}

/// Example 1: A plain application log line
fn application_log_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("1. Application Log Line");
    println!("-----------------------");

    let line = "89 <45>1 2016-10-15T08:59:08.723822+00:00 host heroku web.1 - State changed from up to down";
    println!("Line: {}", line);

    let entry = drainlog::parse(line.as_bytes())?;
    println!("  Time:    {}", entry.time());
    println!("  Message: {}", entry.message());

    println!("\n");
    Ok(())
}

/// Example 2: A router line, rewritten into positional form
fn router_log_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("2. Router Log Line");
    println!("------------------");

    let line = r#"1119 <40>1 2012-11-30T06:45:26+00:00 host heroku router - at=info method=GET path="/api/v1/places/7285/groups/6133" host=shiftmessenger-api.herokuapp.com request_id=c8fa11d0-fdae-486d-a6cf-8adf2fdb8bb7 fwd="174.227.132.4" dyno=web.2 connect=1ms service=3375ms status=200 bytes=91021"#;
    println!("Line: {}", line);

    let entry = HerokuParser.parse_line(line.as_bytes())?;
    println!("  Time:    {}", entry.time());
    println!("  Message: {}", entry.message());

    println!("\n");
    Ok(())
}

/// Example 3: Error handling scenarios
fn error_handling_example() {
    println!("3. Error Handling");
    println!("-----------------");

    let lines = [
        "",
        "89 <45>1",
        "89 <45>1 yesterday host heroku web.1 - msg",
        "<45>1 2016-10-15T08:59:08.723822+00:00 host heroku web.1 - - State changed",
    ];

    for line in lines {
        match drainlog::parse(line.as_bytes()) {
            Ok(entry) => println!("  Unexpected success: {}", entry),
            Err(e) => println!("  {:?} -> {} ({:?})", line, e, e.kind()),
        }
    }

    println!("\n");
}

/// Example 4: Lines piped on stdin
fn stdin_example() -> io::Result<()> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(());
    }

    println!("4. Lines From Stdin");
    println!("-------------------");

    let parser = HerokuParser::new();
    let (mut parsed, mut rejected) = (0u64, 0u64);

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parser.parse_line(line.as_bytes()) {
            Ok(entry) => {
                parsed += 1;
                println!("  {}", entry);
            }
            Err(e) => {
                rejected += 1;
                tracing::warn!(error = %e, "skipping line");
            }
        }
    }

    println!();
    println!("  Parsed:   {}", parsed);
    println!("  Rejected: {}", rejected);
    Ok(())
}
