use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;

use indexmap::IndexSet;

use crate::error::MalformedAutomaton;
use crate::stateid::StateId;

/// A single labelled edge. `label == None` is an epsilon transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub label: Option<char>,
}

/// Adjacency of one state: targets per symbol plus the epsilon targets,
/// both in the order the transitions were declared.
#[derive(Debug, Clone)]
struct StateNode {
    name: String,
    moves: BTreeMap<char, Vec<StateId>>,
    epsilons: Vec<StateId>,
}

/// A finite automaton, possibly nondeterministic and possibly containing
/// epsilon transitions.
///
/// The value is immutable once constructed. All invariants (endpoints and
/// the initial/accepting states are members of the state set, transition
/// symbols are members of the alphabet) are checked exactly once, in
/// [`Automaton::new`]; queries never re-validate.
#[derive(Debug, Clone)]
pub struct Automaton {
    nodes: Vec<StateNode>,
    alphabet: IndexSet<char>,
    transitions: Vec<Transition>,
    initial: StateId,
    accepting: BTreeSet<StateId>,
}

impl Automaton {
    /// Build and validate an automaton from named parts, the shape automata
    /// arrive in from persisted documents.
    pub fn new(
        states: Vec<String>,
        alphabet: Vec<char>,
        transitions: Vec<(String, String, Option<char>)>,
        initial: &str,
        accepting: Vec<String>,
    ) -> Result<Self, MalformedAutomaton> {
        let mut names = IndexSet::new();
        for state in states {
            if names.contains(&state) {
                return Err(MalformedAutomaton::DuplicateState(state));
            }
            names.insert(state);
        }
        let alphabet: IndexSet<char> = alphabet.into_iter().collect();

        let mut edges = Vec::with_capacity(transitions.len());
        for (from, to, label) in transitions {
            let from_id = match names.get_index_of(from.as_str()) {
                Some(i) => StateId::of(i),
                None => return Err(MalformedAutomaton::UnknownEndpoint(from)),
            };
            let to_id = match names.get_index_of(to.as_str()) {
                Some(i) => StateId::of(i),
                None => return Err(MalformedAutomaton::UnknownEndpoint(to)),
            };
            if let Some(symbol) = label {
                if !alphabet.contains(&symbol) {
                    return Err(MalformedAutomaton::SymbolOutsideAlphabet(symbol));
                }
            }
            edges.push(Transition {
                from: from_id,
                to: to_id,
                label,
            });
        }

        let initial_id = match names.get_index_of(initial) {
            Some(i) => StateId::of(i),
            None => return Err(MalformedAutomaton::UnknownInitial(initial.to_string())),
        };
        let mut accepting_ids = BTreeSet::new();
        for state in accepting {
            match names.get_index_of(state.as_str()) {
                Some(i) => {
                    accepting_ids.insert(StateId::of(i));
                }
                None => return Err(MalformedAutomaton::UnknownAccepting(state)),
            }
        }

        Ok(Self::assemble(
            names.into_iter().collect(),
            alphabet,
            edges,
            initial_id,
            accepting_ids,
        ))
    }

    /// Wire up adjacency from an already-consistent set of parts.
    fn assemble(
        names: Vec<String>,
        alphabet: IndexSet<char>,
        transitions: Vec<Transition>,
        initial: StateId,
        accepting: BTreeSet<StateId>,
    ) -> Self {
        let mut nodes: Vec<StateNode> = names
            .into_iter()
            .map(|name| StateNode {
                name,
                moves: BTreeMap::new(),
                epsilons: Vec::new(),
            })
            .collect();
        for t in &transitions {
            let node = &mut nodes[t.from.index()];
            match t.label {
                Some(symbol) => node.moves.entry(symbol).or_insert_with(Vec::new).push(t.to),
                None => node.epsilons.push(t.to),
            }
        }
        Self {
            nodes,
            alphabet,
            transitions,
            initial,
            accepting,
        }
    }

    pub fn state_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> {
        (0..self.nodes.len()).map(StateId::of)
    }

    pub fn is_state(&self, id: StateId) -> bool {
        id.index() < self.nodes.len()
    }

    /// The display name the state was declared with (or assigned by a
    /// compiler/determinizer).
    pub fn name(&self, id: StateId) -> &str {
        &self.nodes[id.index()].name
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(StateId::of)
    }

    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet.iter().copied()
    }

    pub fn contains_symbol(&self, symbol: char) -> bool {
        self.alphabet.contains(&symbol)
    }

    /// The transitions in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn accepting_states(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    pub fn is_accepting(&self, id: StateId) -> bool {
        self.accepting.contains(&id)
    }

    /// Targets reachable from `from` on `label`, in declaration order.
    /// `None` queries the epsilon transitions.
    pub fn transitions_from(&self, from: StateId, label: Option<char>) -> &[StateId] {
        let node = &self.nodes[from.index()];
        match label {
            Some(symbol) => node
                .moves
                .get(&symbol)
                .map(|targets| targets.as_slice())
                .unwrap_or(&[]),
            None => &node.epsilons,
        }
    }
}

/// A deterministic, epsilon-free automaton.
///
/// On top of the [`Automaton`] invariants, every `(state, symbol)` pair has
/// at most one target and no state has epsilon transitions. An undefined
/// transition is an implicit reject; no dead state is materialized.
#[derive(Debug, Clone)]
pub struct Dfa {
    automaton: Automaton,
}

impl Dfa {
    pub fn as_automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn into_automaton(self) -> Automaton {
        self.automaton
    }

    /// Wrap without re-checking. Only for automata that are deterministic
    /// by construction (the determinizer output).
    pub(crate) fn trusted(automaton: Automaton) -> Self {
        Self { automaton }
    }
}

impl TryFrom<Automaton> for Dfa {
    type Error = MalformedAutomaton;

    fn try_from(automaton: Automaton) -> Result<Self, MalformedAutomaton> {
        for node in &automaton.nodes {
            if !node.epsilons.is_empty() {
                return Err(MalformedAutomaton::EpsilonInDfa(node.name.clone()));
            }
            for (&symbol, targets) in &node.moves {
                if targets.len() > 1 {
                    return Err(MalformedAutomaton::Nondeterministic(
                        node.name.clone(),
                        symbol,
                    ));
                }
            }
        }
        Ok(Self { automaton })
    }
}

/// Grows an automaton one fresh state or transition at a time, then seals it.
/// Ids handed out by [`Builder::fresh`] are never reused, which is what keeps
/// composed fragments disjoint.
#[derive(Debug, Default)]
pub(crate) struct Builder {
    names: Vec<String>,
    alphabet: IndexSet<char>,
    transitions: Vec<Transition>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh state named after its allocation index.
    pub(crate) fn fresh(&mut self) -> StateId {
        let name = format!("q{}", self.names.len());
        self.fresh_named(name)
    }

    pub(crate) fn fresh_named(&mut self, name: String) -> StateId {
        let id = StateId::of(self.names.len());
        self.names.push(name);
        id
    }

    /// Record a symbol in the alphabet even if no transition carries it.
    pub(crate) fn ensure_symbol(&mut self, symbol: char) {
        self.alphabet.insert(symbol);
    }

    pub(crate) fn connect(&mut self, from: StateId, to: StateId, symbol: char) {
        self.alphabet.insert(symbol);
        self.transitions.push(Transition {
            from,
            to,
            label: Some(symbol),
        });
    }

    pub(crate) fn epsilon(&mut self, from: StateId, to: StateId) {
        self.transitions.push(Transition {
            from,
            to,
            label: None,
        });
    }

    pub(crate) fn finish(self, initial: StateId, accepting: BTreeSet<StateId>) -> Automaton {
        Automaton::assemble(
            self.names,
            self.alphabet,
            self.transitions,
            initial,
            accepting,
        )
    }
}
