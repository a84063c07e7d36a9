//! Thompson construction: a regular expression compiles into an NFA by
//! composing one fragment per AST node.

use crate::ast::Regex;
use crate::automaton::{Automaton, Builder};
use crate::stateid::StateId;

/// A partially-built piece of the automaton: where it starts and where it
/// accepts. Composition wires fragments together with epsilon transitions.
struct Fragment {
    start: StateId,
    accepts: Vec<StateId>,
}

/// Compile `regex` into an equivalent NFA.
///
/// One [`Builder`] is threaded through the whole call, so every fragment
/// draws ids from the same monotone counter and no two sub-fragments can
/// ever share a state. States are named `q0, q1, ...` in allocation order.
pub fn compile(regex: &Regex) -> Automaton {
    let mut nfa = Builder::new();
    let fragment = emit(regex, &mut nfa);
    nfa.finish(fragment.start, fragment.accepts.into_iter().collect())
}

fn emit(regex: &Regex, nfa: &mut Builder) -> Fragment {
    match regex {
        //  >(s) --c--> ((a))
        Regex::Symbol(c) => {
            let s = nfa.fresh();
            let a = nfa.fresh();
            nfa.connect(s, a, *c);
            Fragment {
                start: s,
                accepts: vec![a],
            }
        }
        //  >[left] --ε--> [right]
        Regex::Sequence(l, r) => {
            let left = emit(l, nfa);
            let right = emit(r, nfa);
            for end in left.accepts {
                nfa.epsilon(end, right.start);
            }
            Fragment {
                start: left.start,
                accepts: right.accepts,
            }
        }
        //      /--ε--> [left] --ε--\
        //  >(s)                    ((a))
        //      \--ε--> [right] --ε-/
        Regex::Alternation(l, r) => {
            let s = nfa.fresh();
            let left = emit(l, nfa);
            let right = emit(r, nfa);
            let a = nfa.fresh();
            nfa.epsilon(s, left.start);
            nfa.epsilon(s, right.start);
            for end in left.accepts.into_iter().chain(right.accepts) {
                nfa.epsilon(end, a);
            }
            Fragment {
                start: s,
                accepts: vec![a],
            }
        }
        //      /--------ε--------\
        //  >(s) --ε--> [inner] --ε--> ((a))
        //      \<--------ε--------/
        // One bypass edge (s -> a) and one repeat edge (a -> s).
        Regex::KleeneStar(inner) => {
            let s = nfa.fresh();
            let sub = emit(inner, nfa);
            let a = nfa.fresh();
            nfa.epsilon(s, a);
            nfa.epsilon(s, sub.start);
            for end in sub.accepts {
                nfa.epsilon(end, a);
            }
            nfa.epsilon(a, s);
            Fragment {
                start: s,
                accepts: vec![a],
            }
        }
    }
}
