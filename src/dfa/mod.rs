//! # Deterministic finite automaton
//!
//! [Dfa] is produced from an [Nfa](crate::nfa::Nfa) by [Nfa::to_dfa](crate::nfa::Nfa::to_dfa)
//! (subset construction). It is the value [crate::compile] hands back to
//! callers, and the only thing [crate::matches] ever evaluates against.
//!
//! A DFA built by subset construction may genuinely have no transition for
//! some state/symbol pair: there may simply be no reachable NFA state set
//! on that symbol. [DfaState::transitions] is therefore
//! `Vec<Option<usize>>`, and stepping an evaluator on a symbol with no
//! transition drops it into a permanent non-accepting "stuck" state, same
//! as stepping on a symbol outside the alphabet.

use std::sync::Arc;

pub use eval::DfaEvaluator;
use unicode_segmentation::UnicodeSegmentation;

pub mod eval;

/// A deterministic finite automaton, defined by its alphabet, its states,
/// and the index of its initial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: Arc<[Arc<str>]>,
    pub(crate) states: Vec<DfaState>,
    pub(crate) initial_state: usize,
}

/// A single DFA state: whether it accepts, and its transition for each
/// alphabet symbol (`None` if subset construction found no reachable
/// successor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) accepting: bool,
    pub(crate) transitions: Vec<Option<usize>>,
}

impl DfaState {
    /// Whether this state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// The transition for each element of the alphabet, in the alphabet's
    /// ordering, or `None` where subset construction found no reachable
    /// successor.
    pub fn transitions(&self) -> &[Option<usize>] {
        self.transitions.as_slice()
    }
}

impl Dfa {
    /// Checks if this automaton accepts the given sequence of elements.
    /// Equivalent to getting the evaluator, stepping it through the whole
    /// sequence, and checking if it ended up accepting.
    pub fn accepts(&self, elements: &[&str]) -> bool {
        let mut eval = self.evaluator();
        eval.step_multiple(elements);
        eval.is_accepting()
    }

    /// Checks if this automaton accepts `string`, split into extended
    /// unicode grapheme clusters. This is the convenience entry point
    /// [crate::matches] is built on.
    pub fn accepts_graphemes(&self, string: &str) -> bool {
        let graphemes = string.graphemes(true).collect::<Vec<_>>();
        self.accepts(&graphemes)
    }

    /// Gets an evaluator, a struct used to evaluate queries against this
    /// automaton one symbol at a time.
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Gets the alphabet of this DFA.
    pub fn alphabet(&self) -> &[Arc<str>] {
        &self.alphabet
    }

    /// Gets the states of this DFA.
    pub fn states(&self) -> &[DfaState] {
        self.states.as_slice()
    }

    /// Gets the initial state of this DFA.
    pub fn initial_state(&self) -> &DfaState {
        &self.states[self.initial_state]
    }

    /// Gets the index of the initial state of this DFA.
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }
}
