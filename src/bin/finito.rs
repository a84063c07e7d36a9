use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use finito::{compile, determinize, dot, wire, Automaton, Dfa, StateId, Verdict};

#[derive(Parser, Debug)]
#[command(name = "finito", version, about = "Build, determinize, and run finite automata")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a regular-expression document into an NFA
    Compile {
        /// Input regex JSON file
        input: PathBuf,
        /// Where to write the NFA JSON (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Also write a Graphviz rendering of the result
        #[arg(long, value_name = "FILE")]
        dot: Option<PathBuf>,
    },
    /// Convert an NFA document into an equivalent DFA
    Determinize {
        /// Input NFA JSON file
        input: PathBuf,
        /// Where to write the DFA JSON (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Also write a Graphviz rendering of the result
        #[arg(long, value_name = "FILE")]
        dot: Option<PathBuf>,
    },
    /// Run a word against an automaton and print the visited path
    Recognize {
        /// Automaton JSON file
        input: PathBuf,
        /// The word to recognize
        word: String,
        /// Simulate the automaton directly instead of requiring a DFA
        #[arg(long)]
        nfa: bool,
    },
    /// Render an automaton document as Graphviz DOT
    Render {
        /// Automaton JSON file
        input: PathBuf,
        /// Where to write the DOT output (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}

fn run(args: Args) -> anyhow::Result<i32> {
    match args.command {
        Command::Compile { input, output, dot } => {
            let regex = wire::read_regex_from_path(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let nfa = compile(&regex);
            emit_automaton(&nfa, output.as_deref(), dot.as_deref())?;
            Ok(0)
        }
        Command::Determinize { input, output, dot } => {
            let nfa = wire::read_automaton_from_path(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let dfa = determinize(&nfa);
            emit_automaton(dfa.as_automaton(), output.as_deref(), dot.as_deref())?;
            Ok(0)
        }
        Command::Recognize { input, word, nfa } => {
            let automaton = wire::read_automaton_from_path(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let accepted = if nfa {
                report_nfa_run(&automaton, &word)
            } else {
                let dfa = Dfa::try_from(automaton)
                    .context("not a dfa (pass --nfa to simulate directly)")?;
                report_dfa_run(&dfa, &word)
            };
            Ok(if accepted { 0 } else { 1 })
        }
        Command::Render { input, output } => {
            let automaton = wire::read_automaton_from_path(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let rendered = dot(&automaton);
            match output {
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", rendered),
            }
            Ok(0)
        }
    }
}

fn emit_automaton(
    automaton: &Automaton,
    output: Option<&Path>,
    dot_path: Option<&Path>,
) -> anyhow::Result<()> {
    match output {
        Some(path) => wire::write_automaton_to_path(path, automaton)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            wire::write_automaton(&mut handle, automaton)?;
            writeln!(handle)?;
        }
    }
    if let Some(path) = dot_path {
        fs::write(path, dot(automaton)).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn report_dfa_run(dfa: &Dfa, word: &str) -> bool {
    let automaton = dfa.as_automaton();
    let run = dfa.recognize(word);
    let path: Vec<&str> = run.path.iter().map(|&id| automaton.name(id)).collect();
    println!("path: {}", path.join(" -> "));
    match &run.verdict {
        Verdict::Accepted => {
            println!("accepted");
            true
        }
        Verdict::NoTransition { from, symbol } => {
            println!(
                "rejected: no transition from {} on symbol {:?}",
                automaton.name(*from),
                symbol
            );
            false
        }
        Verdict::NotAccepting { halted } => {
            println!(
                "rejected: halted in non-accepting state {}",
                automaton.name(*halted)
            );
            false
        }
    }
}

fn report_nfa_run(automaton: &Automaton, word: &str) -> bool {
    let run = automaton.recognize(word);
    let path: Vec<String> = run
        .path
        .iter()
        .map(|frontier| frontier_name(automaton, frontier))
        .collect();
    println!("path: {}", path.join(" -> "));
    match &run.verdict {
        Verdict::Accepted => {
            println!("accepted");
            true
        }
        Verdict::NoTransition { from, symbol } => {
            println!(
                "rejected: no transition from {} on symbol {:?}",
                frontier_name(automaton, from),
                symbol
            );
            false
        }
        Verdict::NotAccepting { halted } => {
            println!(
                "rejected: halted in non-accepting states {}",
                frontier_name(automaton, halted)
            );
            false
        }
    }
}

fn frontier_name(automaton: &Automaton, frontier: &BTreeSet<StateId>) -> String {
    let names: Vec<&str> = frontier.iter().map(|&id| automaton.name(id)).collect();
    format!("{{{}}}", names.join(","))
}
