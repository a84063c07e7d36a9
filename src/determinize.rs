//! Subset construction: an NFA with epsilon transitions becomes an
//! equivalent DFA whose states are epsilon-closed subsets of NFA states.

use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use crate::automaton::{Automaton, Builder, Dfa};
use crate::closure::epsilon_closure;
use crate::stateid::StateId;

/// Union of transition targets on `symbol` from every state in `from`.
pub(crate) fn move_on(
    automaton: &Automaton,
    from: &BTreeSet<StateId>,
    symbol: char,
) -> BTreeSet<StateId> {
    from.iter()
        .flat_map(|&id| automaton.transitions_from(id, Some(symbol)).iter().copied())
        .collect()
}

/// Determinize `nfa` over its own alphabet.
pub fn determinize(nfa: &Automaton) -> Dfa {
    let alphabet: Vec<char> = nfa.alphabet().collect();
    determinize_over(nfa, alphabet)
}

/// Determinize `nfa` over an explicit alphabet. Epsilon is not a symbol and
/// never appears here.
///
/// Each reachable canonical subset becomes one DFA state; `BTreeSet` over
/// the ordered [`StateId`] makes two equal subsets canonicalize identically
/// no matter the discovery order. The visited map doubles as the dedup that
/// bounds the worklist: every subset is enqueued at most once, so the loop
/// terminates even on cyclic automata. An empty move target produces no
/// transition at all; the DFA stays partial and a missing edge means reject.
pub fn determinize_over(nfa: &Automaton, alphabet: impl IntoIterator<Item = char>) -> Dfa {
    let alphabet: Vec<char> = alphabet.into_iter().collect();
    let mut dfa = Builder::new();
    for &symbol in &alphabet {
        dfa.ensure_symbol(symbol);
    }

    let mut subset_ids: BTreeMap<BTreeSet<StateId>, StateId> = BTreeMap::new();
    let mut accepting = BTreeSet::new();

    let start = epsilon_closure(nfa, &iter::once(nfa.initial_state()).collect());
    let start_id = dfa.fresh_named(subset_name(nfa, &start));
    if intersects_accepting(nfa, &start) {
        accepting.insert(start_id);
    }
    subset_ids.insert(start.clone(), start_id);

    let mut stack = vec![start];
    while let Some(subset) = stack.pop() {
        let from_id = subset_ids[&subset];
        for &symbol in &alphabet {
            let moved = move_on(nfa, &subset, symbol);
            if moved.is_empty() {
                continue;
            }
            let target = epsilon_closure(nfa, &moved);
            let to_id = match subset_ids.get(&target) {
                Some(&id) => id,
                None => {
                    let id = dfa.fresh_named(subset_name(nfa, &target));
                    if intersects_accepting(nfa, &target) {
                        accepting.insert(id);
                    }
                    subset_ids.insert(target.clone(), id);
                    stack.push(target);
                    id
                }
            };
            dfa.connect(from_id, to_id, symbol);
        }
    }

    Dfa::trusted(dfa.finish(start_id, accepting))
}

fn intersects_accepting(nfa: &Automaton, subset: &BTreeSet<StateId>) -> bool {
    subset.iter().any(|&id| nfa.is_accepting(id))
}

/// Render a subset as `{q0,q2}` for diagnostics and DOT output.
fn subset_name(nfa: &Automaton, subset: &BTreeSet<StateId>) -> String {
    let mut name = String::from("{");
    for (i, &id) in subset.iter().enumerate() {
        if i > 0 {
            name.push(',');
        }
        name.push_str(nfa.name(id));
    }
    name.push('}');
    name
}
