use std::collections::{HashMap, HashSet};
use std::iter;

use crate::nfa::{Nfa, NfaState};

/// Tracks the current set of live states while stepping an [Nfa] through a
/// query, one symbol at a time.
#[derive(Clone, Debug)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    rev_map: HashMap<&'a str, usize>,
    current_states: HashSet<usize>,
}

impl<'a> NfaEvaluator<'a> {
    /// Whether any currently live state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.current_states().iter().any(|s| s.accepting)
    }

    /// The currently live states.
    pub fn current_states(&self) -> Vec<&NfaState> {
        self.current_states
            .iter()
            .map(|&s| &self.nfa.states[s])
            .collect()
    }

    /// The currently live states, as indices.
    pub fn current_states_idx(&self) -> &HashSet<usize> {
        &self.current_states
    }

    /// Clones this evaluator once per alphabet symbol and steps each clone
    /// on its symbol, useful for exploring every outgoing transition at once
    /// (as [Nfa::to_dfa] does).
    pub fn step_all(&self) -> Vec<NfaEvaluator<'a>> {
        iter::repeat(self.clone())
            .zip(self.nfa.alphabet.iter())
            .map(|(mut eval, elem)| {
                eval.step(elem);
                eval
            })
            .collect()
    }

    /// Steps on one element of the alphabet, replacing the live state set
    /// with the set reachable from it (including through ε-transitions).
    /// Returns `None` if `elem` is not in this NFA's alphabet.
    pub fn step(&mut self, elem: &str) -> Option<()> {
        let &idx = self.rev_map.get(elem)?;
        self.current_states = self
            .current_states
            .iter()
            .flat_map(|&state| self.nfa.states[state].transitions[idx].clone())
            .collect();
        self.include_closure();
        Some(())
    }

    /// Steps on each element in turn, stopping (and returning `None`) at the
    /// first one outside the alphabet.
    pub fn step_multiple(&mut self, elems: &[&str]) -> Option<()> {
        elems.iter().try_for_each(|e| self.step(e))
    }

    fn include_closure(&mut self) {
        let mut updated = true;
        let mut to_push = HashSet::new();
        while updated {
            updated = false;
            for state in self.current_states.iter() {
                for epsilon_state in self.nfa.states[*state].epsilon_transitions.iter() {
                    if !self.current_states.contains(epsilon_state) {
                        updated = true;
                        to_push.insert(*epsilon_state);
                    }
                }
            }
            self.current_states.extend(to_push.drain());
        }
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(value: &'a Nfa) -> Self {
        let map = value
            .alphabet
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.as_ref(), idx))
            .collect();
        let mut evaluator = Self {
            nfa: value,
            rev_map: map,
            current_states: HashSet::new(),
        };
        evaluator.current_states.insert(value.initial_state);
        evaluator.include_closure();
        evaluator
    }
}
