//! Compiles a two-way tape table so that it runs on a one-way tape.
//!
//! The two-way tape is folded at its origin and kept as a one-way sequence that grows at the
//! front. The fold boundary is marked with `%`. Whenever the simulated head steps onto the
//! boundary, every cell to its right is shifted one position further right, opening a fresh
//! cell next to the boundary. Cells in flight are marked with `#`, and `|` remembers where the
//! content ends.
//!
//! For every source state `s` five gadget families are emitted:
//!
//! 1. left-space crossing: `s` on `%` walks right to the cursor (`LEFT_s`), plants it one cell
//!    further (`MARK_s`) and turns back (`BACK_s`),
//! 2. symbol shifting: for each symbol `a`, `BACK_s` lifts `a` and `SHIFT_s%a` drops it one
//!    cell to the right,
//! 3. right-space crossing: on reaching `%` again, `RIGHT_s` clears the erasure run and
//!    returns to `s`,
//! 4. pointer restore: `s` on the cursor moves it one cell right via `END_s`.
//!
//! A one-time initialization family, specialized by the first input symbol, lays out the
//! folded representation from the entry state `0` and hands control to `1`.

use crate::normalizer::Alphabet;
use crate::types::{Direction, Gadget, State, StateId, Symbol, Transition};
use std::collections::BTreeSet;
use tracing::debug;

use Direction::{Left, Right};

/// Emits every gadget transition for the given states and alphabet.
///
/// Emits `|states| * (2 * |alphabet| + 10) + |alphabet| * (2 * |alphabet| + 8)`
/// transitions. Empty inputs produce no transitions.
pub fn compile(states: &BTreeSet<StateId>, alphabet: &Alphabet) -> Vec<Transition> {
    let mut transitions = Vec::new();

    for state in states {
        transitions.extend(left_space(state));
        transitions.extend(shifting(state, alphabet));
        transitions.extend(right_space(state));
    }

    transitions.extend(initialization(alphabet));

    debug!(
        states = states.len(),
        symbols = alphabet.len(),
        transitions = transitions.len(),
        "compiled fold gadgets"
    );

    transitions
}

/// Crosses the boundary on the way right and opens room past the cursor.
fn left_space(state: &StateId) -> [Transition; 5] {
    let s = State::from(state.clone());
    let left = Gadget::Left(state.clone());
    let mark = Gadget::Mark(state.clone());
    let back = Gadget::Back(state.clone());

    [
        Transition::new(s, Symbol::boundary(), Symbol::boundary(), Right, left.clone()),
        Transition::new(left.clone(), Symbol::wildcard(), Symbol::wildcard(), Right, left.clone()),
        Transition::new(left, Symbol::cursor(), Symbol::erasure(), Right, mark.clone()),
        Transition::new(mark, Symbol::blank(), Symbol::cursor(), Left, back.clone()),
        Transition::new(back.clone(), Symbol::erasure(), Symbol::erasure(), Left, back),
    ]
}

/// Moves each cell one position right, leaving an erasure marker behind it.
fn shifting(state: &StateId, alphabet: &Alphabet) -> Vec<Transition> {
    let back = Gadget::Back(state.clone());

    alphabet
        .iter()
        .flat_map(|symbol| {
            let shift = Gadget::Shift(state.clone(), symbol.clone());
            [
                Transition::new(
                    back.clone(),
                    symbol.clone(),
                    Symbol::erasure(),
                    Right,
                    shift.clone(),
                ),
                Transition::new(shift, Symbol::erasure(), symbol.clone(), Left, back.clone()),
            ]
        })
        .collect()
}

/// Clears the erasure run, restores the boundary and resumes `state`.
fn right_space(state: &StateId) -> [Transition; 5] {
    let s = State::from(state.clone());
    let back = Gadget::Back(state.clone());
    let right = Gadget::Right(state.clone());
    let end = Gadget::End(state.clone());

    [
        Transition::new(back, Symbol::boundary(), Symbol::boundary(), Right, right.clone()),
        Transition::new(right.clone(), Symbol::erasure(), Symbol::blank(), Left, right.clone()),
        Transition::new(right, Symbol::boundary(), Symbol::boundary(), Right, s.clone()),
        Transition::new(s.clone(), Symbol::cursor(), Symbol::blank(), Right, end.clone()),
        Transition::new(end, Symbol::blank(), Symbol::cursor(), Left, s),
    ]
}

/// Lays out the folded tape from the entry state, once per possible first symbol.
fn initialization(alphabet: &Alphabet) -> Vec<Transition> {
    let mut transitions = Vec::with_capacity(alphabet.len() * (2 * alphabet.len() + 8));

    for first in alphabet {
        let init = Gadget::Init(first.clone());
        let finish = Gadget::Finish(first.clone());
        let boundary = Gadget::BoundaryBySymbol(first.clone());
        let restore = Gadget::Restore(first.clone());

        transitions.extend([
            Transition::new(State::Entry, first.clone(), Symbol::boundary(), Right, init.clone()),
            Transition::new(
                init.clone(),
                Symbol::wildcard(),
                Symbol::wildcard(),
                Right,
                init.clone(),
            ),
            Transition::new(init, Symbol::blank(), Symbol::erasure(), Right, finish.clone()),
            Transition::new(finish, Symbol::blank(), Symbol::cursor(), Left, boundary.clone()),
            Transition::new(
                boundary.clone(),
                Symbol::erasure(),
                Symbol::erasure(),
                Left,
                boundary.clone(),
            ),
        ]);

        for carried in alphabet {
            let shift = Gadget::ShiftByPair(first.clone(), carried.clone());
            transitions.push(Transition::new(
                boundary.clone(),
                carried.clone(),
                Symbol::erasure(),
                Right,
                shift.clone(),
            ));
            transitions.push(Transition::new(
                shift,
                Symbol::erasure(),
                carried.clone(),
                Left,
                boundary.clone(),
            ));
        }

        transitions.extend([
            Transition::new(
                boundary,
                Symbol::boundary(),
                Symbol::boundary(),
                Right,
                restore.clone(),
            ),
            Transition::new(
                restore.clone(),
                Symbol::erasure(),
                first.clone(),
                Left,
                restore.clone(),
            ),
            Transition::new(restore, Symbol::boundary(), Symbol::boundary(), Right, State::exit()),
        ]);
    }

    transitions
}
