//! The locally-nameless term representation.
//!
//! Bound variables are de Bruijn indices counted from the innermost binder
//! outward; free variables keep their names. Terms are immutable once built
//! and children are reference-counted, so every transformation produces new
//! nodes while unchanged subtrees are shared.

use std::fmt::{self, Display, Write};
use std::rc::Rc;

/// A single lambda term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A variable not bound by any enclosing lambda, identified by name.
    Free(String),

    /// A reference to an enclosing binder, innermost = 0. An index with no
    /// corresponding binder is a legal value; it renders with an explicit
    /// out-of-scope marker instead of failing.
    Bound(usize),

    /// A lambda abstraction. `arg_name` is a display hint only and never
    /// participates in identity or substitution.
    Lam { arg_name: String, body: Rc<Expr> },

    /// A function application.
    App { callee: Rc<Expr>, arg: Rc<Expr> },
}

impl Expr {
    /// Build a free variable.
    pub fn free(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self::Free(name.into()))
    }

    /// Build a bound-variable reference.
    pub fn bound(index: usize) -> Rc<Self> {
        Rc::new(Self::Bound(index))
    }

    /// Build a lambda abstraction.
    pub fn lam(arg_name: impl Into<String>, body: Rc<Self>) -> Rc<Self> {
        Rc::new(Self::Lam {
            arg_name: arg_name.into(),
            body,
        })
    }

    /// Build an application.
    pub fn app(callee: Rc<Self>, arg: Rc<Self>) -> Rc<Self> {
        Rc::new(Self::App { callee, arg })
    }
}

/// How to render a `Bound` variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayAs {
    /// `index:name`, or `index:<outofscope>` when unresolved.
    #[default]
    Both,
    /// The display name of the binder, or `index:<outofscope>`.
    Name,
    /// The bare index, always.
    Index,
}

/// The stack of display names in scope at some point of a term, plus the
/// rendering mode for bound variables.
///
/// Entering a lambda pushes its display hint, freshened against the names
/// already in scope so that two binders never render identically.
#[derive(Debug, Clone, Default)]
pub struct DisplayContext {
    bound: Vec<String>,
    display_as: DisplayAs,
}

impl DisplayContext {
    pub fn new(display_as: DisplayAs) -> Self {
        Self {
            bound: Vec::new(),
            display_as,
        }
    }

    /// Enter a binder: pick a fresh display name for `name` and return the
    /// extended context alongside it.
    pub fn bind_free(&self, name: &str) -> (Self, String) {
        let fresh = if self.is_bound(name) {
            let mut n = 0;
            loop {
                let candidate = format!("{}_{}", name, n);
                if !self.is_bound(&candidate) {
                    break candidate;
                }
                n += 1;
            }
        } else {
            name.to_string()
        };
        let mut ctx = self.clone();
        ctx.bound.push(fresh.clone());
        (ctx, fresh)
    }

    /// The display name bound `index` binders out, if any.
    pub fn lookup(&self, index: usize) -> Option<&str> {
        self.bound.iter().rev().nth(index).map(String::as_str)
    }

    /// Render a bound-variable reference in this context's mode.
    pub fn bound_var(&self, index: usize) -> String {
        match self.display_as {
            DisplayAs::Index => index.to_string(),
            DisplayAs::Name => match self.lookup(index) {
                Some(name) => name.to_string(),
                None => format!("{}:<outofscope>", index),
            },
            DisplayAs::Both => match self.lookup(index) {
                Some(name) => format!("{}:{}", index, name),
                None => format!("{}:<outofscope>", index),
            },
        }
    }

    fn is_bound(&self, name: &str) -> bool {
        self.bound.iter().any(|bound| bound == name)
    }
}

/// Render a term in one-line lambda notation, e.g. `(\x. x) a`.
pub fn to_lambda_notation(expr: &Expr, display_as: DisplayAs) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_notation(expr, &DisplayContext::new(display_as), &mut out);
    out
}

fn write_notation<W: Write>(expr: &Expr, ctx: &DisplayContext, out: &mut W) -> fmt::Result {
    match expr {
        Expr::Free(name) => out.write_str(name),
        Expr::Bound(index) => out.write_str(&ctx.bound_var(*index)),
        Expr::Lam { arg_name, body } => {
            let (ctx, name) = ctx.bind_free(arg_name);
            write!(out, "\\{}. ", name)?;
            write_notation(body, &ctx, out)
        }
        Expr::App { callee, arg } => {
            // Parenthesize lambda callees and non-atomic arguments, so the
            // output reparses with the same shape.
            match callee.as_ref() {
                Expr::Lam { .. } => {
                    out.write_char('(')?;
                    write_notation(callee, ctx, out)?;
                    out.write_char(')')?;
                }
                _ => write_notation(callee, ctx, out)?,
            }
            out.write_char(' ')?;
            match arg.as_ref() {
                Expr::Lam { .. } | Expr::App { .. } => {
                    out.write_char('(')?;
                    write_notation(arg, ctx, out)?;
                    out.write_char(')')
                }
                _ => write_notation(arg, ctx, out),
            }
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_notation(self, &DisplayContext::new(DisplayAs::Name), f)
    }
}
