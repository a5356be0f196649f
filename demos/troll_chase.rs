//! Troll Chase (named transitions)
//!
//! The same patrol/chase behavior written against the label-addressed
//! machine: states are created by name and hooks ask for the next state
//! directly.
//!
//! Key concepts:
//! - Lazy entry into the initial state on the first `update`
//! - Optional enter/exit/frame hooks
//! - Hooks requesting transitions by name
//!
//! Run with: RUST_LOG=tickstate=debug cargo run --example troll_chase

use std::cell::Cell;
use std::rc::Rc;

use tickstate::named::NamedMachine;

const START_CHASING: f32 = 5.0;
const STOP_CHASING: f32 = 10.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "tickstate=info".to_string()))
        .init();

    println!("=== Troll Chase ===\n");

    let distance = Rc::new(Cell::new(20.0_f32));
    let mut fsm = NamedMachine::new();

    let seen = Rc::clone(&distance);
    fsm.create_state("Patrolling")?
        .on_enter(|_| println!("  Entering patrolling state"))
        .on_frame(move |requests| {
            if seen.get() < START_CHASING {
                requests.request("Chasing");
            }
        })
        .on_exit(|_| println!("  Exiting patrolling state"));

    let lost = Rc::clone(&distance);
    fsm.create_state("Chasing")?
        .on_enter(|_| println!("  Entering chasing state"))
        .on_frame(move |requests| {
            if lost.get() > STOP_CHASING {
                requests.request("Patrolling");
            }
        })
        .on_exit(|_| println!("  Exiting chasing state"));

    for (tick, d) in [20.0, 12.0, 4.0, 6.0, 9.0, 11.0, 15.0].into_iter().enumerate() {
        distance.set(d);
        fsm.update()?;
        println!(
            "tick {tick}: distance {d:4.1}  state {}",
            fsm.current_state_name().unwrap_or("<none>")
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
