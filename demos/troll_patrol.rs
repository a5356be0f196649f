//! Troll Patrol (labeled transitions)
//!
//! A troll walks between waypoints on a line. When the player comes within
//! sight it starts chasing; when the player gets far enough away it goes
//! back to its path.
//!
//! Key concepts:
//! - States identified by enums declared with `symbol_enum!`
//! - Per-state transition tables keyed by label
//! - `reason` then `act` on every tick
//!
//! Run with: RUST_LOG=tickstate=debug cargo run --example troll_patrol

use tickstate::builder::SystemBuilder;
use tickstate::core::{FsmError, TransitionRequests};
use tickstate::labeled::{Behavior, LabeledState};
use tickstate::symbol_enum;

symbol_enum! {
    enum StateId {
        Null,
        FollowingPath,
        ChasingPlayer,
    }
    null: Null
}

symbol_enum! {
    enum Transition {
        Null,
        SawPlayer,
        LostPlayer,
    }
    null: Null
}

const SIGHT_RANGE: f32 = 15.0;
const GIVE_UP_RANGE: f32 = 30.0;

struct Arena {
    troll: f32,
    player: f32,
}

impl Arena {
    fn distance(&self) -> f32 {
        (self.player - self.troll).abs()
    }
}

struct FollowPath {
    waypoints: Vec<f32>,
    current: usize,
}

impl Behavior<Arena, Transition> for FollowPath {
    fn reason(&mut self, arena: &Arena, requests: &mut TransitionRequests<Transition>) {
        if arena.distance() < SIGHT_RANGE {
            requests.request(Transition::SawPlayer);
        }
    }

    fn act(&mut self, arena: &mut Arena) {
        let target = self.waypoints[self.current];
        let offset = target - arena.troll;
        if offset.abs() < 1.0 {
            self.current = (self.current + 1) % self.waypoints.len();
        } else {
            arena.troll += offset.signum() * 2.0;
        }
    }
}

struct ChasePlayer;

impl Behavior<Arena, Transition> for ChasePlayer {
    fn reason(&mut self, arena: &Arena, requests: &mut TransitionRequests<Transition>) {
        if arena.distance() > GIVE_UP_RANGE {
            requests.request(Transition::LostPlayer);
        }
    }

    fn act(&mut self, arena: &mut Arena) {
        arena.troll += (arena.player - arena.troll).signum() * 3.0;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "tickstate=info".to_string()))
        .init();

    println!("=== Troll Patrol ===\n");

    let mut troll = SystemBuilder::new()
        .state(
            LabeledState::new(
                StateId::FollowingPath,
                FollowPath {
                    waypoints: vec![0.0, 20.0, 40.0],
                    current: 1,
                },
            )
            .with_transition(Transition::SawPlayer, StateId::ChasingPlayer)?
            .before_enter(|_| println!("  (troll returns to its path)")),
        )
        .state(
            LabeledState::new(StateId::ChasingPlayer, ChasePlayer)
                .with_transition(Transition::LostPlayer, StateId::FollowingPath)?
                .before_enter(|_| println!("  (troll spots the player!)")),
        )
        .build()?;

    // Player walks toward the troll, then runs off.
    let player_path = [90.0, 80.0, 70.0, 60.0, 50.0, 45.0, 45.0, 60.0, 80.0, 100.0, 120.0];
    let mut arena = Arena {
        troll: 0.0,
        player: player_path[0],
    };

    for (tick, player) in player_path.into_iter().enumerate() {
        arena.player = player;
        match troll.tick(&mut arena) {
            Ok(()) => {}
            Err(FsmError::UnresolvedTransition { label, .. }) => {
                println!("  ignored transition {label}");
            }
            Err(err) => return Err(err.into()),
        }
        println!(
            "tick {tick:2}: player {:5.1}  troll {:5.1}  state {:?}",
            arena.player,
            arena.troll,
            troll.current_state_id()
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
