//! # Thompson construction
//!
//! [Builder] assembles an [Nfa] out of small fragments, one fragment per
//! node of an [Expr](crate::expr::Expr), exactly as Thompson's construction
//! is usually presented: every combinator allocates its own fresh start and
//! accept state and wires them to the fragments of its operands with
//! ε-transitions, rather than threading a single "where do I send you on
//! success" continuation state through the recursion. The states and
//! transition tables it builds towards ([Nfa], [super::NfaState]) support
//! either style; the end result is an [Nfa] convertible to a
//! [crate::dfa::Dfa] by the same subset construction regardless.
//!
//! A [Builder] is created fresh for every [crate::compile] call and never
//! shared across threads; its state counter is a plain `usize`, not an
//! atomic.

use std::collections::HashMap;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::expr::{Expr, OpKind};
use crate::nfa::{Nfa, NfaState};

/// A fragment of a not-yet-finished NFA: an entry state and an exit state.
/// Every combinator takes zero or more fragments and returns one, gluing the
/// inputs together with fresh states and ε-edges.
pub(crate) type Fragment = (usize, usize);

#[derive(Default)]
struct RawState {
    epsilon: Vec<usize>,
    on: HashMap<usize, Vec<usize>>,
}

/// Builds up the states and transitions of an [Nfa] one combinator at a
/// time.
pub(crate) struct Builder {
    states: Vec<RawState>,
    symbols: HashMap<Arc<str>, usize>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            states: Vec::new(),
            symbols: HashMap::new(),
        }
    }

    fn fresh(&mut self) -> usize {
        self.states.push(RawState::default());
        self.states.len() - 1
    }

    fn add_epsilon(&mut self, from: usize, to: usize) {
        self.states[from].epsilon.push(to);
    }

    fn symbol_index(&mut self, grapheme: &str) -> usize {
        if let Some(&idx) = self.symbols.get(grapheme) {
            return idx;
        }
        let idx = self.symbols.len();
        self.symbols.insert(Arc::from(grapheme), idx);
        idx
    }

    /// A fragment matching exactly one occurrence of `grapheme`.
    fn symbol(&mut self, grapheme: &str) -> Fragment {
        let start = self.fresh();
        let end = self.fresh();
        let idx = self.symbol_index(grapheme);
        self.states[start].on.entry(idx).or_default().push(end);
        (start, end)
    }

    /// A fragment matching the empty string.
    fn epsilon_fragment(&mut self) -> Fragment {
        let start = self.fresh();
        let end = self.fresh();
        self.add_epsilon(start, end);
        (start, end)
    }

    /// `cat(a, b)`: match `a` then `b`.
    fn cat2(&mut self, a: Fragment, b: Fragment) -> Fragment {
        self.add_epsilon(a.1, b.0);
        (a.0, b.1)
    }

    /// `or(a, b)`: match `a` or `b`.
    fn or2(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let start = self.fresh();
        let end = self.fresh();
        self.add_epsilon(start, a.0);
        self.add_epsilon(start, b.0);
        self.add_epsilon(a.1, end);
        self.add_epsilon(b.1, end);
        (start, end)
    }

    /// `star(a)`: match zero or more repetitions of `a`.
    fn star(&mut self, a: Fragment) -> Fragment {
        let start = self.fresh();
        let end = self.fresh();
        self.add_epsilon(start, a.0);
        self.add_epsilon(start, end);
        self.add_epsilon(a.1, a.0);
        self.add_epsilon(a.1, end);
        (start, end)
    }

    /// `plus(a)`: match one or more repetitions of `a`. Loops back into `a`
    /// itself rather than building a second copy of the fragment.
    fn plus(&mut self, a: Fragment) -> Fragment {
        let end = self.fresh();
        self.add_epsilon(a.1, a.0);
        self.add_epsilon(a.1, end);
        (a.0, end)
    }

    /// `opt(a)`: match zero or one occurrence of `a`.
    fn opt(&mut self, a: Fragment) -> Fragment {
        let empty = self.epsilon_fragment();
        self.or2(a, empty)
    }

    /// Concatenates a non-empty list of fragments left to right.
    fn cat(&mut self, fragments: Vec<Fragment>) -> Fragment {
        let mut iter = fragments.into_iter();
        let first = iter.next().expect("cat requires at least one fragment");
        iter.fold(first, |acc, frag| self.cat2(acc, frag))
    }

    /// Alternates a non-empty list of fragments.
    fn or(&mut self, fragments: Vec<Fragment>) -> Fragment {
        let mut iter = fragments.into_iter();
        let first = iter.next().expect("or requires at least one fragment");
        iter.fold(first, |acc, frag| self.or2(acc, frag))
    }

    /// A fragment matching the literal string `s`, grapheme cluster by
    /// grapheme cluster.
    fn literal(&mut self, s: &str) -> Fragment {
        let fragments = s.graphemes(true).map(|g| self.symbol(g)).collect();
        self.cat(fragments)
    }

    /// Lowers an [Expr] into a fragment. `star`, `plus` and `opt` only ever
    /// look at their first child, leaving any further children unvisited
    /// (and therefore, notably, never checked for validity either).
    fn lower(&mut self, expr: &Expr) -> Fragment {
        match expr {
            Expr::Literal(s) => self.literal(s),
            Expr::Integer(i) => self.literal(&i.to_string()),
            Expr::Op(OpKind::Cat, children) => {
                let fragments = children.iter().map(|c| self.lower(c)).collect();
                self.cat(fragments)
            }
            Expr::Op(OpKind::Or, children) => {
                let fragments = children.iter().map(|c| self.lower(c)).collect();
                self.or(fragments)
            }
            Expr::Op(OpKind::Star, children) => {
                let frag = self.lower(&children[0]);
                self.star(frag)
            }
            Expr::Op(OpKind::Plus, children) => {
                let frag = self.lower(&children[0]);
                self.plus(frag)
            }
            Expr::Op(OpKind::Opt, children) => {
                let frag = self.lower(&children[0]);
                self.opt(frag)
            }
        }
    }

    fn into_nfa(self, initial_state: usize, accept_state: usize) -> Nfa {
        let Builder { states, symbols } = self;
        let alphabet_len = symbols.len();

        let mut alphabet: Vec<Arc<str>> = vec![Arc::from(""); alphabet_len];
        for (grapheme, idx) in symbols {
            alphabet[idx] = grapheme;
        }

        let states = states
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                let mut transitions = vec![Vec::new(); alphabet_len];
                for (sym_idx, targets) in raw.on {
                    transitions[sym_idx] = targets;
                }
                NfaState {
                    accepting: idx == accept_state,
                    epsilon_transitions: raw.epsilon,
                    transitions,
                }
            })
            .collect();

        Nfa {
            alphabet: Arc::from(alphabet),
            states,
            initial_state,
        }
    }
}

/// Lowers `expr` into a fresh [Nfa] by Thompson construction.
pub(crate) fn build(expr: &Expr) -> Nfa {
    let mut builder = Builder::new();
    let (start, end) = builder.lower(expr);
    builder.into_nfa(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(nfa: &Nfa, s: &str) -> bool {
        let graphemes = s.graphemes(true).collect::<Vec<_>>();
        let mut eval = nfa.evaluator();
        eval.step_multiple(&graphemes);
        eval.is_accepting()
    }

    #[test]
    fn literal_matches_only_itself() {
        let nfa = build(&Expr::literal("ab"));
        assert!(accepts(&nfa, "ab"));
        assert!(!accepts(&nfa, "a"));
        assert!(!accepts(&nfa, "abc"));
        assert!(!accepts(&nfa, ""));
    }

    #[test]
    fn star_matches_zero_or_more() {
        let nfa = build(&Expr::star(Expr::literal("ab")));
        assert!(accepts(&nfa, ""));
        assert!(accepts(&nfa, "ab"));
        assert!(accepts(&nfa, "abab"));
        assert!(!accepts(&nfa, "a"));
    }

    #[test]
    fn plus_requires_at_least_one() {
        let nfa = build(&Expr::plus(Expr::literal("ab")));
        assert!(!accepts(&nfa, ""));
        assert!(accepts(&nfa, "ab"));
        assert!(accepts(&nfa, "abab"));
    }

    #[test]
    fn or_matches_either_branch() {
        let nfa = build(&Expr::or([Expr::literal("a"), Expr::literal("b")]));
        assert!(accepts(&nfa, "a"));
        assert!(accepts(&nfa, "b"));
        assert!(!accepts(&nfa, "c"));
        assert!(!accepts(&nfa, "ab"));
    }

    #[test]
    fn opt_matches_zero_or_one() {
        let nfa = build(&Expr::opt(Expr::literal("a")));
        assert!(accepts(&nfa, ""));
        assert!(accepts(&nfa, "a"));
        assert!(!accepts(&nfa, "aa"));
    }

    #[test]
    fn star_plus_opt_ignore_extra_children() {
        let expr = Expr::Op(
            OpKind::Star,
            vec![Expr::literal("a"), Expr::literal("zzz")],
        );
        let nfa = build(&expr);
        assert!(accepts(&nfa, "aaa"));
        assert!(!accepts(&nfa, "zzz"));
    }
}
