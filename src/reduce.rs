//! Capture-avoiding beta reduction and redex enumeration.
//!
//! Substitution walks the body structurally; crossing a binder re-indexes
//! the substituted argument by one, and that shift happens lazily so an
//! argument that is never referenced under the binder is never re-indexed.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::expr::Expr;
use crate::hole::Hole;

/// The substituted argument as seen at some binder depth.
///
/// Each `Shifted` layer re-indexes the layer above it by one, computed at
/// most once and cached in its single-assignment cell.
enum Arg<'a> {
    Ready(Rc<Expr>),
    Shifted {
        source: &'a Arg<'a>,
        cell: OnceCell<Rc<Expr>>,
    },
}

impl Arg<'_> {
    fn force(&self) -> Rc<Expr> {
        match self {
            Arg::Ready(expr) => Rc::clone(expr),
            Arg::Shifted { source, cell } => {
                Rc::clone(cell.get_or_init(|| shift(&source.force(), 0)))
            }
        }
    }
}

/// Re-index bound variables in a term that is being moved under one more
/// binder. References below `cutoff` point inside the shifted term itself
/// and stay put; everything else moves one binder further away.
pub fn shift(expr: &Rc<Expr>, cutoff: usize) -> Rc<Expr> {
    match expr.as_ref() {
        Expr::Free(_) => Rc::clone(expr),
        Expr::Bound(index) if *index < cutoff => Rc::clone(expr),
        Expr::Bound(index) => Expr::bound(index + 1),
        Expr::App { callee, arg } => Expr::app(shift(callee, cutoff), shift(arg, cutoff)),
        Expr::Lam { arg_name, body } => Expr::lam(arg_name.clone(), shift(body, cutoff + 1)),
    }
}

fn subst(body: &Rc<Expr>, arg: &Arg<'_>, index: usize) -> Rc<Expr> {
    match body.as_ref() {
        Expr::Free(_) => Rc::clone(body),
        Expr::Bound(i) => match i.cmp(&index) {
            Ordering::Equal => arg.force(),
            // One binder disappears with the application, so references
            // above the substituted one move down to close the gap.
            Ordering::Greater => Expr::bound(i - 1),
            Ordering::Less => Rc::clone(body),
        },
        Expr::App {
            callee,
            arg: app_arg,
        } => Expr::app(subst(callee, arg, index), subst(app_arg, arg, index)),
        Expr::Lam { arg_name, body } => {
            let shifted = Arg::Shifted {
                source: arg,
                cell: OnceCell::new(),
            };
            Expr::lam(arg_name.clone(), subst(body, &shifted, index + 1))
        }
    }
}

/// Apply a lambda to an argument.
///
/// Returns `None` when `lambda` is not actually a lambda abstraction.
pub fn beta_reduce(lambda: &Expr, arg: Rc<Expr>) -> Option<Rc<Expr>> {
    match lambda {
        Expr::Lam { body, .. } => Some(subst(body, &Arg::Ready(arg), 0)),
        _ => None,
    }
}

/// An application-of-a-lambda found somewhere in a term, paired with the
/// hole that puts its reduct back in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redex {
    /// Path from the root of the enumerated term to the matched `App`.
    pub hole: Hole,
    /// Display hint of the eliminated binder.
    pub arg_name: String,
    /// Body of the applied lambda.
    pub body: Rc<Expr>,
    /// Argument of the application.
    pub arg: Rc<Expr>,
}

impl Redex {
    /// The lambda side of the application, rebuilt for display.
    pub fn lambda(&self) -> Rc<Expr> {
        Expr::lam(self.arg_name.clone(), Rc::clone(&self.body))
    }

    /// The matched application itself, rebuilt for display.
    pub fn as_app(&self) -> Rc<Expr> {
        Expr::app(self.lambda(), Rc::clone(&self.arg))
    }

    /// Replace the matched application with its beta-reduct inside the
    /// original whole term; everything outside the hole is shared untouched.
    pub fn reduce(&self) -> Rc<Expr> {
        self.hole
            .fill(subst(&self.body, &Arg::Ready(Rc::clone(&self.arg)), 0))
    }
}

/// Match a term against the redex shape `App(Lam, arg)`.
///
/// The returned hole is `Identity`: the redex is the term itself.
pub fn as_redex(expr: &Rc<Expr>) -> Option<Redex> {
    if let Expr::App { callee, arg } = expr.as_ref() {
        if let Expr::Lam { arg_name, body } = callee.as_ref() {
            return Some(Redex {
                hole: Hole::Identity,
                arg_name: arg_name.clone(),
                body: Rc::clone(body),
                arg: Rc::clone(arg),
            });
        }
    }
    None
}

/// Enumerate every redex in `root`, leftmost-outermost first.
///
/// The traversal is pre-order: a node is tested before its children, the
/// callee subtree before the argument subtree. Each yielded redex carries
/// the composed hole from the root down to it. Which redex to fire is the
/// caller's choice; nothing here commits to a strategy.
pub fn redexes(root: &Rc<Expr>) -> Redexes {
    Redexes {
        stack: vec![(Hole::Identity, Rc::clone(root))],
    }
}

/// Iterator state for [`redexes`]: the pre-order frontier, innermost entries
/// on top, each paired with its root-to-node hole.
pub struct Redexes {
    stack: Vec<(Hole, Rc<Expr>)>,
}

impl Iterator for Redexes {
    type Item = Redex;

    fn next(&mut self) -> Option<Redex> {
        while let Some((hole, expr)) = self.stack.pop() {
            match expr.as_ref() {
                Expr::Lam { arg_name, body } => {
                    self.stack.push((
                        hole.clone().then(Hole::LambdaBody {
                            arg_name: arg_name.clone(),
                        }),
                        Rc::clone(body),
                    ));
                }
                Expr::App { callee, arg } => {
                    // arg pushed first so the callee subtree pops first
                    self.stack.push((
                        hole.clone().then(Hole::AppArg {
                            callee: Rc::clone(callee),
                        }),
                        Rc::clone(arg),
                    ));
                    self.stack.push((
                        hole.clone().then(Hole::AppCallee {
                            arg: Rc::clone(arg),
                        }),
                        Rc::clone(callee),
                    ));
                }
                Expr::Free(_) | Expr::Bound(_) => {}
            }
            if let Some(mut redex) = as_redex(&expr) {
                redex.hole = hole;
                return Some(redex);
            }
        }
        None
    }
}
