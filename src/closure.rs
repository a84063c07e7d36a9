use std::collections::BTreeSet;

use crate::automaton::Automaton;
use crate::stateid::StateId;

/// All states reachable from `seed` using only epsilon transitions,
/// including `seed` itself.
///
/// Worklist fixed point: no state is processed twice, so this terminates on
/// any finite automaton, cyclic or not. The `BTreeSet` result is already the
/// canonical (sorted) form subset construction relies on.
pub fn epsilon_closure(automaton: &Automaton, seed: &BTreeSet<StateId>) -> BTreeSet<StateId> {
    let mut stack: Vec<StateId> = seed.iter().copied().collect();
    let mut states = BTreeSet::new();
    while let Some(q) = stack.pop() {
        states.insert(q);
        for &q_e in automaton.transitions_from(q, None) {
            if states.insert(q_e) {
                stack.push(q_e);
            }
        }
    }
    states
}
