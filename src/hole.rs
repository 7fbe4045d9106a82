//! One-hole contexts: a term with exactly one subterm position abstracted
//! out, kept as inspectable data rather than a closure.
//!
//! A hole freezes the sibling subtrees it captures; filling rebuilds the
//! surrounding structure around a new subterm. Holes compose, and the
//! composition reads outer-to-inner: the first hole is applied last.

use std::rc::Rc;

use crate::expr::Expr;

/// A term with one missing subterm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hole {
    /// The trivial hole; filling returns the argument unchanged.
    Identity,
    /// Filling wraps the argument in `Lam { arg_name, _ }`.
    LambdaBody { arg_name: String },
    /// Filling wraps the argument in `App { _, arg }`.
    AppCallee { arg: Rc<Expr> },
    /// Filling wraps the argument in `App { callee, _ }`.
    AppArg { callee: Rc<Expr> },
    /// Outer-to-inner chain of holes.
    Compose(Vec<Hole>),
}

impl Hole {
    /// Put `expr` in the hole and rebuild the surrounding term.
    pub fn fill(&self, expr: Rc<Expr>) -> Rc<Expr> {
        match self {
            Hole::Identity => expr,
            Hole::LambdaBody { arg_name } => Expr::lam(arg_name.clone(), expr),
            Hole::AppCallee { arg } => Expr::app(expr, Rc::clone(arg)),
            Hole::AppArg { callee } => Expr::app(Rc::clone(callee), expr),
            // Innermost hole first, so the head of the chain is applied last.
            Hole::Compose(holes) => holes.iter().rev().fold(expr, |expr, hole| hole.fill(expr)),
        }
    }

    /// Compose holes outer-to-inner.
    ///
    /// Identity holes vanish and nested compositions flatten, so the result
    /// is never more than one `Compose` deep. `fill` distributes over the
    /// result: `Hole::compose([a, b]).fill(e) == a.fill(b.fill(e))`.
    pub fn compose(holes: impl IntoIterator<Item = Hole>) -> Hole {
        let mut flat = Vec::new();
        for hole in holes {
            match hole {
                Hole::Identity => {}
                Hole::Compose(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Hole::Identity,
            1 => flat.swap_remove(0),
            _ => Hole::Compose(flat),
        }
    }

    /// Extend this hole with a deeper one.
    pub fn then(self, inner: Hole) -> Hole {
        Hole::compose([self, inner])
    }
}
