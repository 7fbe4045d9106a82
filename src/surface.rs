//! The name-based surface syntax tree.
//!
//! This is what the parser produces; scope resolution turns it into the
//! locally-nameless [`Expr`] the rest of the crate works on. Owned strings
//! throughout — this layer is not performance-sensitive.

use std::fmt::{self, Display};
use std::rc::Rc;

use crate::expr::Expr;

/// A single surface term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A named variable; whether it is bound is decided by resolution.
    Var(String),

    /// A lambda abstraction.
    Lam { param: String, body: Box<Term> },

    /// A function application.
    App { callee: Box<Term>, arg: Box<Term> },
}

impl Term {
    /// Resolve names to the locally-nameless form: a name bound by an
    /// enclosing lambda becomes `Bound` with its binder distance, anything
    /// else stays `Free`.
    pub fn to_expr(&self) -> Rc<Expr> {
        self.resolve(&mut Vec::new())
    }

    fn resolve(&self, bound: &mut Vec<String>) -> Rc<Expr> {
        match self {
            Term::Var(name) => match bound.iter().rev().position(|binder| binder == name) {
                Some(index) => Expr::bound(index),
                None => Expr::free(name.clone()),
            },
            Term::Lam { param, body } => {
                bound.push(param.clone());
                let body = body.resolve(bound);
                bound.pop();
                Expr::lam(param.clone(), body)
            }
            Term::App { callee, arg } => Expr::app(callee.resolve(bound), arg.resolve(bound)),
        }
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Self::Var(name.into())
    }
}

impl From<&str> for Box<Term> {
    fn from(name: &str) -> Self {
        Self::new(name.into())
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => write!(f, "{}", name),
            Self::Lam { param, body } => write!(f, "\\{}. {}", param, body),
            Self::App { callee, arg } => {
                // same parenthesization as the core renderer: lambdas on the
                // left, anything non-atomic on the right
                match callee.as_ref() {
                    Self::Lam { .. } => write!(f, "({})", callee)?,
                    _ => write!(f, "{}", callee)?,
                }
                match arg.as_ref() {
                    Self::Var(_) => write!(f, " {}", arg),
                    _ => write!(f, " ({})", arg),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Term::{App, Lam, Var};

    // takes a name, a surface term, and its expected rendering
    macro_rules! term_display_tests { ($($name:ident: $expected:expr, $term:expr)*) => {
        mod term_display {
            use super::*;

            $(
            #[test]
            fn $name() {
                assert_eq!(format!("{}", $term), $expected);
            }
            )*
        }
    }}

    term_display_tests! {
        identifier: "s", Var("s".into())
        identity: r"\x. x", Lam { param: "x".into(), body: "x".into() }
        one: r"\f. \a. f a", Lam {
            param: "f".into(),
            body: Lam {
                param: "a".into(),
                body: App {
                    callee: "f".into(),
                    arg: "a".into(),
                }
                .into(),
            }
            .into(),
        }
        redex: r"(\x. x) a", App {
            callee: Lam { param: "x".into(), body: "x".into() }.into(),
            arg: "a".into(),
        }
        right_nested: "x (y z)", App {
            callee: "x".into(),
            arg: App { callee: "y".into(), arg: "z".into() }.into(),
        }
    }

    mod resolution {
        use super::*;
        use crate::expr::Expr;

        #[test]
        fn unbound_name_is_free() {
            assert_eq!(*Var("y".into()).to_expr(), Expr::Free("y".into()));
        }

        #[test]
        fn bound_name_counts_from_innermost() {
            let term = Lam {
                param: "x".into(),
                body: Lam {
                    param: "y".into(),
                    body: App {
                        callee: "x".into(),
                        arg: "y".into(),
                    }
                    .into(),
                }
                .into(),
            };
            let expected = Expr::lam(
                "x",
                Expr::lam("y", Expr::app(Expr::bound(1), Expr::bound(0))),
            );
            assert_eq!(term.to_expr(), expected);
        }

        #[test]
        fn shadowing_binds_to_nearest() {
            let term = Lam {
                param: "x".into(),
                body: Lam {
                    param: "x".into(),
                    body: "x".into(),
                }
                .into(),
            };
            let expected = Expr::lam("x", Expr::lam("x", Expr::bound(0)));
            assert_eq!(term.to_expr(), expected);
        }

        #[test]
        fn free_inside_lambda_stays_free() {
            let term = Lam {
                param: "x".into(),
                body: "y".into(),
            };
            assert_eq!(term.to_expr(), Expr::lam("x", Expr::free("y")));
        }

        #[test]
        fn binder_leaves_scope_after_its_body() {
            // (\x. x) x — the second x is outside the lambda
            let term = App {
                callee: Lam {
                    param: "x".into(),
                    body: "x".into(),
                }
                .into(),
                arg: "x".into(),
            };
            let expected = Expr::app(Expr::lam("x", Expr::bound(0)), Expr::free("x"));
            assert_eq!(term.to_expr(), expected);
        }
    }
}
