use std::collections::HashMap;
use std::iter;

use crate::dfa::{Dfa, DfaState};

/// Tracks the current state while stepping a [Dfa] through a query. Once a
/// symbol has no transition (either because it's outside the alphabet or
/// because subset construction left that state/symbol pair undefined), the
/// evaluator is permanently stuck and every further step and query is a
/// no-op returning `None`/rejecting.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    rev_map: HashMap<&'a str, usize>,
    current: Option<usize>,
}

impl<'a> DfaEvaluator<'a> {
    /// Whether the current state (if any) is accepting.
    pub fn is_accepting(&self) -> bool {
        self.current_state().is_some_and(DfaState::is_accepting)
    }

    /// The current state, or `None` if this evaluator is stuck.
    pub fn current_state(&self) -> Option<&DfaState> {
        self.current.map(|idx| &self.dfa.states[idx])
    }

    /// The current state's index, or `None` if this evaluator is stuck.
    pub fn current_state_idx(&self) -> Option<usize> {
        self.current
    }

    /// Clones this evaluator once per alphabet symbol and steps each clone
    /// on its symbol.
    pub fn step_all(&self) -> Vec<DfaEvaluator<'a>> {
        iter::repeat(self.clone())
            .zip(self.dfa.alphabet())
            .map(|(mut eval, elem)| {
                eval.step(elem);
                eval
            })
            .collect()
    }

    /// Steps on one element. Returns the new current state, or `None` if
    /// `elem` is outside the alphabet, there is no transition for it, or
    /// this evaluator was already stuck.
    pub fn step(&mut self, elem: &str) -> Option<&DfaState> {
        let current = self.current?;
        let next = self
            .rev_map
            .get(elem)
            .and_then(|&idx| self.dfa.states[current].transitions[idx]);
        self.current = next;
        next.map(|idx| &self.dfa.states[idx])
    }

    /// Steps on each element in turn.
    pub fn step_multiple(&mut self, elems: &[&str]) -> Option<&DfaState> {
        for elem in elems {
            self.step(elem)?;
        }
        self.current.map(|idx| &self.dfa.states[idx])
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        let map = value
            .alphabet
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.as_ref(), idx))
            .collect();
        Self {
            dfa: value,
            rev_map: map,
            current: Some(value.initial_state),
        }
    }
}
