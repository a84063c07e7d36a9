//! Graphviz rendering of a finished automaton. The core never depends on
//! this; it is a one-way exit for visualization tooling.

use crate::automaton::Automaton;

/// Render the automaton as a DOT digraph. Accepting states are drawn as
/// double circles and an anonymous entry arrow marks the initial state.
/// Epsilon transitions are labelled `ε`.
pub fn dot(automaton: &Automaton) -> String {
    let mut out = String::from("digraph automaton {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    __start [shape=point, label=\"\"];\n");
    for id in automaton.state_ids() {
        let shape = if automaton.is_accepting(id) {
            "doublecircle"
        } else {
            "circle"
        };
        out.push_str(&format!(
            "    \"{}\" [shape={}];\n",
            automaton.name(id),
            shape
        ));
    }
    out.push_str(&format!(
        "    __start -> \"{}\";\n",
        automaton.name(automaton.initial_state())
    ));
    for t in automaton.transitions() {
        let label = match t.label {
            Some(symbol) => symbol.to_string(),
            None => "ε".to_string(),
        };
        out.push_str(&format!(
            "    \"{}\" -> \"{}\" [label=\"{}\"];\n",
            automaton.name(t.from),
            automaton.name(t.to),
            label
        ));
    }
    out.push('}');
    out
}
