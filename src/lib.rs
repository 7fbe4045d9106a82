//! Locally-nameless lambda calculus with stepwise, user-driven reduction.
//!
//! The core is an immutable term representation ([`Expr`]), one-hole
//! contexts ([`Hole`]) used both to locate redexes and to navigate, the
//! capture-avoiding substitution engine ([`beta_reduce`], [`shift`]), a
//! leftmost-outermost redex enumerator ([`redexes`]), and a zipper-style
//! navigator ([`Nav`]). The parser, renderers, and CLI sit at the edges.

mod cli;
mod expr;
mod hole;
mod nav;
mod parse;
mod pretty;
mod reduce;
mod surface;

pub use cli::run;
pub use expr::{to_lambda_notation, DisplayAs, DisplayContext, Expr};
pub use hole::Hole;
pub use nav::{Focus, Nav};
pub use parse::{to_expr, to_term, ParserResult};
pub use pretty::{expr_to_doc, focus_to_doc, hole_to_doc, redex_to_doc, Doc};
pub use reduce::{as_redex, beta_reduce, redexes, shift, Redex, Redexes};
pub use surface::Term;
