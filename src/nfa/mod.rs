//! # Nondeterministic finite automaton
//!
//! [Nfa] is the output of the front-end lowering stage (see [crate::compile]
//! and [builder]): a Thompson-style NFA with ε-transitions, built fresh for
//! every [crate::compile] call and discarded as soon as [Nfa::to_dfa] has run.
//!
//! Unlike a hand-parsed automaton, an [Nfa] built by this crate's internal
//! Thompson-construction builder never contains states unreachable from its
//! initial state (the builder only ever allocates a state as part of
//! gluing it into the tree it's building), so there is no separate
//! reachability pass here.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dfa::{Dfa, DfaState};
pub use eval::NfaEvaluator;

pub(crate) mod builder;
pub mod eval;

/// A nondeterministic finite automaton with ε-moves, denoted by its
/// alphabet, its states and the index of its initial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) alphabet: Arc<[Arc<str>]>,
    pub(crate) states: Vec<NfaState>,
    pub(crate) initial_state: usize,
}

/// A single NFA state: whether it accepts, its ε-transitions, and its
/// per-symbol transitions (a set of target states for each alphabet symbol,
/// in the alphabet's ordering).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfaState {
    pub(crate) accepting: bool,
    pub(crate) epsilon_transitions: Vec<usize>,
    pub(crate) transitions: Vec<Vec<usize>>,
}

impl NfaState {
    /// Whether this state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// The per-symbol transitions, as sets of state indices, one entry per
    /// alphabet symbol in the alphabet's ordering.
    pub fn transitions(&self) -> &[Vec<usize>] {
        &self.transitions
    }

    /// The ε-transitions, as a set of state indices.
    pub fn epsilon_transitions(&self) -> &[usize] {
        &self.epsilon_transitions
    }
}

impl Nfa {
    /// The alphabet of this NFA.
    pub fn alphabet(&self) -> &[Arc<str>] {
        &self.alphabet
    }

    /// The states of this NFA.
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    /// The index of the initial state.
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }

    /// Gets an evaluator, a structure that tracks the current set of states
    /// while stepping through a query.
    pub fn evaluator(&self) -> NfaEvaluator<'_> {
        self.into()
    }

    /// The ε-closure of `start`: `start` itself plus every state reachable
    /// from it by any number of ε-transitions.
    pub(crate) fn closure(&self, start: usize) -> std::collections::HashSet<usize> {
        let mut all = std::collections::HashSet::new();
        all.insert(start);
        let mut frontier = vec![start];
        while let Some(state) = frontier.pop() {
            for &next in &self.states[state].epsilon_transitions {
                if all.insert(next) {
                    frontier.push(next);
                }
            }
        }
        all
    }

    /// Converts this NFA to a DFA by subset construction: starting from
    /// the ε-closure of the initial state, explore every
    /// reachable subset of NFA states, assigning each subset a dense integer
    /// id as it's first discovered. State 0 is guaranteed to be the DFA's
    /// initial state.
    pub fn to_dfa(&self) -> Dfa {
        let mut ids: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut accepting: Vec<bool> = Vec::new();
        let mut transitions: Vec<Vec<Option<usize>>> = Vec::new();

        let initial_subset = Self::canonical(&self.closure(self.initial_state));
        ids.insert(initial_subset.clone(), 0);
        accepting.push(self.subset_accepts(&initial_subset));
        transitions.push(Vec::new()); // filled in once we reach it below

        let mut worklist = vec![initial_subset];
        while let Some(subset) = worklist.pop() {
            let this_id = ids[&subset];
            let mut row = Vec::with_capacity(self.alphabet.len());
            for symbol_idx in 0..self.alphabet.len() {
                let mut moved = std::collections::HashSet::new();
                for &state in &subset {
                    for &target in &self.states[state].transitions[symbol_idx] {
                        moved.extend(self.closure(target));
                    }
                }
                if moved.is_empty() {
                    row.push(None);
                    continue;
                }
                let moved = Self::canonical(&moved);
                let next_id = *ids.entry(moved.clone()).or_insert_with(|| {
                    let id = accepting.len();
                    accepting.push(self.subset_accepts(&moved));
                    transitions.push(Vec::new());
                    worklist.push(moved.clone());
                    id
                });
                row.push(Some(next_id));
            }
            transitions[this_id] = row;
        }

        let states = accepting
            .into_iter()
            .zip(transitions)
            .map(|(accepting, transitions)| DfaState {
                accepting,
                transitions,
            })
            .collect();

        Dfa {
            alphabet: self.alphabet.clone(),
            states,
            initial_state: 0,
        }
    }

    fn subset_accepts(&self, subset: &[usize]) -> bool {
        subset.iter().any(|&s| self.states[s].accepting)
    }

    /// A deterministic, hashable identity for a set of NFA states.
    fn canonical(set: &std::collections::HashSet<usize>) -> Vec<usize> {
        let mut v: Vec<usize> = set.iter().copied().collect();
        v.sort_unstable();
        v
    }
}
