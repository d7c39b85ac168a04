//! Compiles a one-way tape table so that it runs on a two-way infinite tape.
//!
//! A two-way tape already offers everything a one-way machine needs. The entry state steps
//! left onto the boundary state `%`, which leaves an erasure marker in the cell left of the
//! input and starts the source machine in `1`. Every source state skips erasure markers to
//! the right, so the marker never disturbs the resumed machine.

use crate::types::{Direction, State, StateId, Symbol, Transition};
use std::collections::BTreeSet;
use tracing::debug;

/// Emits the entry, boundary and marker-skipping transitions.
///
/// Always emits exactly `2 + |states|` transitions.
pub fn compile(states: &BTreeSet<StateId>) -> Vec<Transition> {
    let mut transitions = vec![
        Transition::new(
            State::Entry,
            Symbol::wildcard(),
            Symbol::wildcard(),
            Direction::Left,
            State::Boundary,
        ),
        Transition::new(
            State::Boundary,
            Symbol::blank(),
            Symbol::erasure(),
            Direction::Right,
            State::exit(),
        ),
    ];

    transitions.extend(states.iter().map(|state| {
        Transition::new(
            state.clone(),
            Symbol::erasure(),
            Symbol::erasure(),
            Direction::Right,
            state.clone(),
        )
    }));

    debug!(
        states = states.len(),
        transitions = transitions.len(),
        "compiled boundary gadgets"
    );

    transitions
}
