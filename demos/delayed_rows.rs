//! Example: Rows arriving after a delay
//!
//! The demo binary simulates a slow backend by delivering its sample rows
//! through a channel after a fixed delay. This example runs the same source
//! headless, so the loading phase and the moment of arrival are visible as
//! plain output.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example delayed_rows
//! ```

use std::thread;
use std::time::{Duration, Instant};

use gridfield::data::sample_users;
use gridfield::source::{ChannelSource, RowSource};

fn main() {
    println!("Delayed rows example");
    println!("Sample rows will arrive after 500ms...\n");

    let mut source =
        ChannelSource::delayed(sample_users(), Duration::from_millis(500), "sample data");

    let started = Instant::now();
    loop {
        if let Some(users) = source.poll() {
            println!(
                "\nReceived {} rows after {:?} from '{}':",
                users.len(),
                started.elapsed(),
                source.description()
            );
            for user in &users {
                println!(
                    "  #{} {:10} {:24} {}",
                    user.id,
                    user.name,
                    user.email,
                    user.last_login.as_deref().unwrap_or("never signed in")
                );
            }
            break;
        }

        println!("  still loading ({:?})", started.elapsed());
        thread::sleep(Duration::from_millis(100));
    }
}
