//! # Expression trees
//!
//! An [Expr] is the in-memory value the rest of this crate compiles. Callers
//! build expressions by composition: a [Expr] is an ordinary Rust value that
//! can be bound to a name, stored in a `Vec`, and combined with others via
//! [Expr::cat], [Expr::or], [Expr::star], [Expr::plus] and [Expr::opt].
//!
//! Hosts that spell their trees in some other shape (a tagged record coming
//! out of a parser, a config file, an embedded scripting language) build a
//! [RawExpr] instead and convert it with [TryFrom]/[TryInto]: parse into a
//! loosely-typed value, then validate into a strict one.

use std::fmt;

use thiserror::Error;

/// A validated expression tree: the only input the NFA builder ever sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A non-empty literal string, matched grapheme-by-grapheme.
    Literal(Box<str>),
    /// An integer, lowered to the decimal string of its value.
    Integer(i64),
    /// An operator node: a tag and its ordered children.
    Op(OpKind, Vec<Expr>),
}

/// The five combinators an [Expr] operator node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Cat,
    Or,
    Star,
    Plus,
    Opt,
}

impl OpKind {
    /// The tag a [RawExpr::Operator] must spell to select this combinator.
    pub fn tag(self) -> &'static str {
        match self {
            OpKind::Cat => "cat",
            OpKind::Or => "or",
            OpKind::Star => "star",
            OpKind::Plus => "plus",
            OpKind::Opt => "opt",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cat" => Some(OpKind::Cat),
            "or" => Some(OpKind::Or),
            "star" => Some(OpKind::Star),
            "plus" => Some(OpKind::Plus),
            "opt" => Some(OpKind::Opt),
            _ => None,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Expr {
    /// A literal string. Does not validate non-emptiness: an empty literal
    /// is accepted here and only rejected at [crate::compile], so that a
    /// tree can be constructed and inspected before it is ever compiled.
    pub fn literal(s: impl Into<Box<str>>) -> Self {
        Expr::Literal(s.into())
    }

    /// An integer literal, lowered to its decimal string on compile.
    pub fn integer(i: i64) -> Self {
        Expr::Integer(i)
    }

    /// `cat(children...)`: concatenation. One or more children.
    pub fn cat(children: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Op(OpKind::Cat, children.into_iter().collect())
    }

    /// `or(children...)`: alternation. One or more children.
    pub fn or(children: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Op(OpKind::Or, children.into_iter().collect())
    }

    /// `star(child)`: zero or more repetitions.
    pub fn star(child: Expr) -> Self {
        Expr::Op(OpKind::Star, vec![child])
    }

    /// `plus(child)`: one or more repetitions.
    pub fn plus(child: Expr) -> Self {
        Expr::Op(OpKind::Plus, vec![child])
    }

    /// `opt(child)`: zero or one repetition.
    pub fn opt(child: Expr) -> Self {
        Expr::Op(OpKind::Opt, vec![child])
    }
}

/// An expression tree in a host's own encoding: a tagged record with an
/// open string tag rather than a fixed Rust enum, the shape a parser,
/// config file, or embedded scripting language would naturally hand back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawExpr {
    Literal(String),
    Integer(i64),
    Operator { tag: String, children: Vec<RawExpr> },
}

/// The front-end lowering's parse failure: a leaf the front end does not
/// recognize. In a statically typed [Expr] the only way this can happen is
/// through a [RawExpr::Operator] with a tag outside `{cat, or, star, plus,
/// opt}`, or one with no children at all (every combinator needs at least
/// one operand).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized operator tag '{0}'")]
    UnknownOperator(Box<str>),
    #[error("operator '{op}' requires at least one operand, found none")]
    MissingOperand { op: &'static str },
}

impl TryFrom<RawExpr> for Expr {
    type Error = ParseError;

    fn try_from(value: RawExpr) -> Result<Self, Self::Error> {
        match value {
            RawExpr::Literal(s) => Ok(Expr::Literal(s.into_boxed_str())),
            RawExpr::Integer(i) => Ok(Expr::Integer(i)),
            RawExpr::Operator { tag, children } => {
                let kind = OpKind::from_tag(&tag)
                    .ok_or_else(|| ParseError::UnknownOperator(tag.into_boxed_str()))?;
                if children.is_empty() {
                    return Err(ParseError::MissingOperand { op: kind.tag() });
                }
                let children = children
                    .into_iter()
                    .map(Expr::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::Op(kind, children))
            }
        }
    }
}

/// `n_or_more(k, expr) < 0` violates `k`'s precondition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("n_or_more requires k >= 0, got {0}")]
pub struct PreconditionError(pub i64);

/// Builds an expression matching `k` or more repetitions of `expr`:
/// `star(expr)` when `k == 0`, else `cat(expr, expr, ..., star(expr))` with
/// `k` leading copies of `expr`.
pub fn n_or_more(k: i64, expr: Expr) -> Result<Expr, PreconditionError> {
    if k < 0 {
        return Err(PreconditionError(k));
    }
    if k == 0 {
        return Ok(Expr::star(expr));
    }
    let k = k as usize;
    let mut children = Vec::with_capacity(k + 1);
    children.extend(std::iter::repeat(expr.clone()).take(k));
    children.push(Expr::star(expr));
    Ok(Expr::cat(children))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_expr_rejects_unknown_tag() {
        let raw = RawExpr::Operator {
            tag: "concat".into(),
            children: vec![RawExpr::Literal("a".into())],
        };
        assert_eq!(
            Expr::try_from(raw).unwrap_err(),
            ParseError::UnknownOperator("concat".into())
        );
    }

    #[test]
    fn raw_expr_rejects_empty_operands() {
        let raw = RawExpr::Operator {
            tag: "cat".into(),
            children: vec![],
        };
        assert_eq!(
            Expr::try_from(raw).unwrap_err(),
            ParseError::MissingOperand { op: "cat" }
        );
    }

    #[test]
    fn raw_expr_lowers_nested_tree() {
        let raw = RawExpr::Operator {
            tag: "cat".into(),
            children: vec![
                RawExpr::Literal("0".into()),
                RawExpr::Operator {
                    tag: "plus".into(),
                    children: vec![RawExpr::Literal("1".into())],
                },
            ],
        };
        let expr = Expr::try_from(raw).unwrap();
        assert_eq!(
            expr,
            Expr::cat([
                Expr::literal("0"),
                Expr::plus(Expr::literal("1")),
            ])
        );
    }

    #[test]
    fn n_or_more_rejects_negative_k() {
        assert_eq!(
            n_or_more(-1, Expr::literal("bar")).unwrap_err(),
            PreconditionError(-1)
        );
    }

    #[test]
    fn n_or_more_zero_is_star() {
        let expr = n_or_more(0, Expr::literal("bar")).unwrap();
        assert_eq!(expr, Expr::star(Expr::literal("bar")));
    }

    #[test]
    fn n_or_more_k_prepends_copies() {
        let expr = n_or_more(2, Expr::literal("bar")).unwrap();
        assert_eq!(
            expr,
            Expr::cat([
                Expr::literal("bar"),
                Expr::literal("bar"),
                Expr::star(Expr::literal("bar")),
            ])
        );
    }
}
