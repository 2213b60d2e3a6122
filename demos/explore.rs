//! Exhaustive Exploration
//!
//! This example walks every interleaving of a small message-passing model and
//! groups the complete runs into equivalence classes of the dependency
//! relation. A partial-order-reduction driver only needs to visit one run per
//! class.
//!
//! Key concepts:
//! - Branching from the same state many times
//! - Enabled-transition frontier and wait gating
//! - Trace equivalence under the dependency relation
//!
//! Run with: cargo run --example explore

use unfolding::builder::StateBuilder;
use unfolding::core::{State, Trace, Transition};

fn explore(state: &State, trace: Trace, runs: &mut Vec<(Trace, State)>) {
    let enabled = state.enabled_transitions();
    if enabled.is_empty() {
        runs.push((trace, state.clone()));
        return;
    }
    for t in enabled {
        match state.execute(&t) {
            Ok(next) => explore(&next, trace.record(t), runs),
            Err(e) => eprintln!("cannot execute {t}: {e}"),
        }
    }
}

fn main() {
    println!("=== Exhaustive Exploration Example ===\n");

    let initial = StateBuilder::new()
        .actor(0, vec![Transition::send(1, 0), Transition::write(0)])
        .actor(1, vec![Transition::receive(1, 0), Transition::wait(1, 0)])
        .actor(2, vec![Transition::read(0), Transition::read(1)])
        .mailbox(1)
        .build()
        .unwrap();

    let mut runs = Vec::new();
    explore(&initial, Trace::new(), &mut runs);

    let mut classes: Vec<&Trace> = Vec::new();
    for (trace, _) in &runs {
        if !classes.iter().any(|c| c.is_equivalent(trace)) {
            classes.push(trace);
        }
    }

    println!("Complete runs explored: {}", runs.len());
    println!("Equivalence classes:    {}", classes.len());

    for (i, class) in classes.iter().enumerate() {
        let steps: Vec<String> = class
            .transitions()
            .iter()
            .map(|t| format!("{t}:{}", t.kind()))
            .collect();
        println!("  class {i}: {}", steps.join(" "));
    }

    if let Some((_, last)) = runs.last() {
        println!("\nFinal state of the last run: {last}");
    }

    println!("\n=== Example Complete ===");
}
