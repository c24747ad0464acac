//! # Compiling and matching
//!
//! The two operations a caller actually needs: [compile] turns a validated
//! [Expr] into a [Dfa] by running the lowering-then-determinization
//! pipeline in one call, and [matches]/[expr_matches] run a query against
//! the result.

use thiserror::Error;

use crate::dfa::Dfa;
use crate::expr::Expr;
use crate::nfa::builder;

/// Everything that can go wrong turning an [Expr] into a [Dfa].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A [crate::expr::RawExpr] failed to lower into an [Expr] in the first
    /// place.
    #[error(transparent)]
    Parse(#[from] crate::expr::ParseError),
    /// An [Expr::Literal] with an empty string was compiled. An empty
    /// literal has no grapheme clusters to build a fragment out of, and no
    /// useful automaton meaning (it is not the same as an empty-string
    /// match, which is `star` of anything), so it is rejected here rather
    /// than silently treated as ε.
    #[error("literal expressions must not be empty")]
    EmptyLiteral,
}

/// Compiles a validated expression tree into a [Dfa] by Thompson
/// construction followed by subset construction.
pub fn compile(expr: &Expr) -> Result<Dfa, CompileError> {
    check_structure(expr)?;
    let nfa = builder::build(expr);
    Ok(nfa.to_dfa())
}

/// Validates an [Expr] before it ever reaches [builder::build]: every
/// operator node must carry at least one child (`builder::Builder::lower`
/// indexes `children[0]` for `star`/`plus`/`opt` and folds over `children`
/// for `cat`/`or`, neither of which tolerates an empty list), and no
/// visited literal may be empty.
fn check_structure(expr: &Expr) -> Result<(), CompileError> {
    match expr {
        Expr::Literal(s) if s.is_empty() => Err(CompileError::EmptyLiteral),
        Expr::Literal(_) | Expr::Integer(_) => Ok(()),
        Expr::Op(kind, children) => {
            if children.is_empty() {
                return Err(CompileError::Parse(crate::expr::ParseError::MissingOperand {
                    op: kind.tag(),
                }));
            }
            // star/plus/opt only ever lower their first child (see
            // nfa::builder::Builder::lower); validate the same subset so an
            // empty literal buried in an unvisited extra child doesn't
            // spuriously fail compilation.
            let visited: &[Expr] = match kind {
                crate::expr::OpKind::Star | crate::expr::OpKind::Plus | crate::expr::OpKind::Opt => {
                    &children[..1]
                }
                crate::expr::OpKind::Cat | crate::expr::OpKind::Or => children,
            };
            visited.iter().try_for_each(check_structure)
        }
    }
}

/// Checks whether `query` is accepted by the DFA compiled from `expr`,
/// split into extended unicode grapheme clusters.
pub fn expr_matches(expr: &Expr, query: &str) -> Result<bool, CompileError> {
    Ok(matches(&compile(expr)?, query))
}

/// Checks whether `query` is accepted by `dfa`, split into extended unicode
/// grapheme clusters.
pub fn matches(dfa: &Dfa, query: &str) -> bool {
    dfa.accepts_graphemes(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_literal() {
        let err = compile(&Expr::literal("")).unwrap_err();
        assert_eq!(err, CompileError::EmptyLiteral);
    }

    #[test]
    fn rejects_empty_literal_nested_in_cat() {
        let expr = Expr::cat([Expr::literal("a"), Expr::literal("")]);
        assert_eq!(compile(&expr).unwrap_err(), CompileError::EmptyLiteral);
    }

    #[test]
    fn ignores_empty_literal_in_unvisited_star_child() {
        let expr = Expr::Op(
            crate::expr::OpKind::Star,
            vec![Expr::literal("a"), Expr::literal("")],
        );
        assert!(compile(&expr).is_ok());
    }

    #[test]
    fn compiles_and_matches_simple_literal() {
        let dfa = compile(&Expr::literal("hello")).unwrap();
        assert!(matches(&dfa, "hello"));
        assert!(!matches(&dfa, "hell"));
    }

    #[test]
    fn rejects_cat_with_no_children_instead_of_panicking() {
        let expr = Expr::cat(std::iter::empty());
        assert_eq!(
            compile(&expr).unwrap_err(),
            CompileError::Parse(crate::expr::ParseError::MissingOperand { op: "cat" })
        );
    }

    #[test]
    fn rejects_or_with_no_children_instead_of_panicking() {
        let expr = Expr::or(std::iter::empty());
        assert_eq!(
            compile(&expr).unwrap_err(),
            CompileError::Parse(crate::expr::ParseError::MissingOperand { op: "or" })
        );
    }

    #[test]
    fn rejects_star_with_no_children_instead_of_panicking() {
        let expr = Expr::Op(crate::expr::OpKind::Star, vec![]);
        assert_eq!(
            compile(&expr).unwrap_err(),
            CompileError::Parse(crate::expr::ParseError::MissingOperand { op: "star" })
        );
    }
}
