//! Word recognition. Rejections are ordinary results carrying the visited
//! path and a reason, not errors.

use std::collections::BTreeSet;
use std::iter;

use crate::automaton::{Automaton, Dfa};
use crate::closure::epsilon_closure;
use crate::determinize::move_on;
use crate::stateid::StateId;

/// Why a word was rejected, or that it wasn't.
///
/// `S` is the simulation state: [`StateId`] for a DFA run, a frontier set
/// for a direct NFA run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<S> {
    Accepted,
    /// The word has a symbol with no transition out of the current state.
    NoTransition { from: S, symbol: char },
    /// The word was consumed but the run halted outside the accepting set.
    NotAccepting { halted: S },
}

/// The outcome of simulating one word: the verdict plus every state the run
/// visited, in order. The path is populated on rejection too, as the
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<S> {
    pub path: Vec<S>,
    pub verdict: Verdict<S>,
}

impl<S> Run<S> {
    pub fn is_accepted(&self) -> bool {
        matches!(self.verdict, Verdict::Accepted)
    }
}

impl Dfa {
    /// Simulate `word`, one transition per symbol. No epsilon handling;
    /// a DFA has none.
    pub fn recognize(&self, word: &str) -> Run<StateId> {
        let automaton = self.as_automaton();
        let mut current = automaton.initial_state();
        let mut path = vec![current];
        for symbol in word.chars() {
            match automaton.transitions_from(current, Some(symbol)).first() {
                Some(&next) => {
                    current = next;
                    path.push(current);
                }
                None => {
                    return Run {
                        path,
                        verdict: Verdict::NoTransition {
                            from: current,
                            symbol,
                        },
                    }
                }
            }
        }
        if automaton.is_accepting(current) {
            Run {
                path,
                verdict: Verdict::Accepted,
            }
        } else {
            Run {
                path,
                verdict: Verdict::NotAccepting { halted: current },
            }
        }
    }
}

impl Automaton {
    /// Simulate `word` directly on this automaton, nondeterminism and all:
    /// the run tracks a frontier of states and takes the epsilon closure at
    /// every step. Path elements are the frontiers visited.
    pub fn recognize(&self, word: &str) -> Run<BTreeSet<StateId>> {
        let mut frontier = epsilon_closure(self, &iter::once(self.initial_state()).collect());
        let mut path = vec![frontier.clone()];
        for symbol in word.chars() {
            let moved = move_on(self, &frontier, symbol);
            if moved.is_empty() {
                return Run {
                    path,
                    verdict: Verdict::NoTransition {
                        from: frontier,
                        symbol,
                    },
                };
            }
            frontier = epsilon_closure(self, &moved);
            path.push(frontier.clone());
        }
        if frontier.iter().any(|&q| self.is_accepting(q)) {
            Run {
                path,
                verdict: Verdict::Accepted,
            }
        } else {
            Run {
                path,
                verdict: Verdict::NotAccepting { halted: frontier },
            }
        }
    }
}
