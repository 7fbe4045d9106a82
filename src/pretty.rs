//! Box-drawing tree views of terms, holes, and navigator foci.
//!
//! A [`Doc`] is just a vertical list of rendered lines; combinators indent
//! blocks and attach per-line prefixes, which is enough for the λ-box layout:
//!
//! ```text
//! λx ─┬─
//!     │ 0:x
//!     ╰─
//! └► y
//! ```

use std::fmt::{self, Display};
use std::rc::Rc;

use colored::{ColoredString, Colorize};

use crate::expr::{DisplayContext, Expr};
use crate::hole::Hole;
use crate::nav::Focus;
use crate::reduce::Redex;

/// A block of rendered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doc {
    lines: Vec<String>,
}

impl Doc {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            lines: text.into().split('\n').map(String::from).collect(),
        }
    }

    /// Stack blocks vertically.
    pub fn stack(docs: impl IntoIterator<Item = Doc>) -> Self {
        Self {
            lines: docs.into_iter().flat_map(|doc| doc.lines).collect(),
        }
    }

    /// Shift the whole block right by `indent` spaces.
    pub fn indent(self, indent: usize) -> Self {
        let pad = " ".repeat(indent);
        Self {
            lines: self
                .lines
                .into_iter()
                .map(|line| format!("{}{}", pad, line))
                .collect(),
        }
    }

    /// Attach per-line prefixes, padded to equal width; once the prefixes
    /// run out the last one repeats for the remaining lines.
    pub fn prefix_lines(self, prefixes: &[&str]) -> Self {
        let Some(last) = prefixes.last() else {
            return self;
        };
        let width = prefixes
            .iter()
            .map(|prefix| prefix.chars().count())
            .max()
            .unwrap_or(0);
        let lines = self
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let prefix = prefixes.get(i).unwrap_or(last);
                let pad = width - prefix.chars().count();
                format!("{}{}{}", prefix, " ".repeat(pad), line)
            })
            .collect();
        Self { lines }
    }

    /// Recolor every line, e.g. with [`Colorize::yellow`].
    pub fn colored(self, apply: impl Fn(&str) -> ColoredString) -> Self {
        Self {
            lines: self
                .lines
                .into_iter()
                .map(|line| apply(&line).to_string())
                .collect(),
        }
    }
}

impl Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Render a term as a box-drawing tree (bound variables in `index:name`
/// form).
pub fn expr_to_doc(expr: &Expr) -> Doc {
    expr_to_doc_in(expr, &DisplayContext::default())
}

pub fn expr_to_doc_in(expr: &Expr, ctx: &DisplayContext) -> Doc {
    match expr {
        Expr::Free(name) => Doc::text(name.clone()),
        Expr::Bound(index) => Doc::text(ctx.bound_var(*index)),
        Expr::Lam { arg_name, body } => {
            let (ctx, name) = ctx.bind_free(arg_name);
            lambda_box(&name, expr_to_doc_in(body, &ctx))
        }
        Expr::App { callee, arg } => Doc::stack([
            expr_to_doc_in(callee, ctx),
            expr_to_doc_in(arg, ctx).prefix_lines(&["└► ", "   "]),
        ]),
    }
}

/// Render a hole with the missing position supplied by `fill`, which
/// receives the display context accumulated along the hole's binders.
pub fn hole_to_doc(
    hole: &Hole,
    ctx: DisplayContext,
    fill: &mut dyn FnMut(DisplayContext) -> Doc,
) -> Doc {
    match hole {
        Hole::Identity => fill(ctx),
        Hole::LambdaBody { arg_name } => {
            let (ctx, name) = ctx.bind_free(arg_name);
            lambda_box(&name, fill(ctx))
        }
        Hole::AppCallee { arg } => Doc::stack([
            fill(ctx.clone()),
            expr_to_doc_in(arg, &ctx).prefix_lines(&["└► ", "   "]),
        ]),
        Hole::AppArg { callee } => Doc::stack([
            expr_to_doc_in(callee, &ctx),
            fill(ctx).prefix_lines(&["└► ", "   "]),
        ]),
        Hole::Compose(holes) => compose_to_doc(holes, ctx, fill),
    }
}

fn compose_to_doc(
    holes: &[Hole],
    ctx: DisplayContext,
    fill: &mut dyn FnMut(DisplayContext) -> Doc,
) -> Doc {
    match holes {
        [] => fill(ctx),
        [hole, rest @ ..] => hole_to_doc(hole, ctx, &mut |ctx| compose_to_doc(rest, ctx, fill)),
    }
}

/// A redex in its surrounding term, the matched application highlighted.
pub fn redex_to_doc(redex: &Redex) -> Doc {
    hole_to_doc(&redex.hole, DisplayContext::default(), &mut |ctx| {
        expr_to_doc_in(&redex.as_app(), &ctx).colored(|line| line.yellow())
    })
}

/// A navigator focus in its surrounding term, shown in reversed video.
pub fn focus_to_doc(focus: &Focus) -> Doc {
    let expr = Rc::clone(&focus.expr);
    hole_to_doc(&focus.hole, DisplayContext::default(), &mut |ctx| {
        expr_to_doc_in(&expr, &ctx).colored(|line| line.reversed())
    })
}

fn lambda_box(name: &str, body: Doc) -> Doc {
    let width = name.chars().count() + 1;
    Doc::stack([
        Doc::text(format!("λ{} ─┬─", name)),
        body.prefix_lines(&["  │ "]).indent(width),
        Doc::text("  ╰─").indent(width),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::to_expr;

    fn doc(input: &str) -> String {
        expr_to_doc(&to_expr(input).expect("test input parses")).to_string()
    }

    #[test]
    fn free_var_is_a_single_line() {
        assert_eq!(doc("y"), "y");
    }

    #[test]
    fn lambda_draws_a_box() {
        assert_eq!(doc(r"\x. x"), "λx ─┬─\n    │ 0:x\n    ╰─");
    }

    #[test]
    fn application_points_at_argument() {
        assert_eq!(doc("f a"), "f\n└► a");
    }

    #[test]
    fn application_of_lambda() {
        assert_eq!(
            doc(r"(\x. x) y"),
            "λx ─┬─\n    │ 0:x\n    ╰─\n└► y",
        );
    }

    #[test]
    fn multi_line_argument_keeps_arrow_alignment() {
        assert_eq!(
            doc(r"f (\x. x)"),
            "f\n└► λx ─┬─\n       │ 0:x\n       ╰─",
        );
    }

    #[test]
    fn long_binder_name_widens_the_box() {
        assert_eq!(doc(r"\fn. fn"), "λfn ─┬─\n     │ 0:fn\n     ╰─");
    }

    #[test]
    fn hole_doc_threads_binding_context() {
        // focus on the body of \x. •: the callback sees x in scope
        let hole = Hole::LambdaBody {
            arg_name: "x".into(),
        };
        let rendered = hole_to_doc(&hole, DisplayContext::default(), &mut |ctx| {
            Doc::text(ctx.bound_var(0))
        });
        assert_eq!(rendered.to_string(), "λx ─┬─\n    │ 0:x\n    ╰─");
    }

    #[test]
    fn identity_hole_doc_is_just_the_fill() {
        let rendered = hole_to_doc(&Hole::Identity, DisplayContext::default(), &mut |_| {
            Doc::text("here")
        });
        assert_eq!(rendered.to_string(), "here");
    }

    #[test]
    fn prefix_lines_pads_to_widest() {
        let doc = Doc::text("a\nb\nc").prefix_lines(&["└► ", " "]);
        assert_eq!(doc.to_string(), "└► a\n   b\n   c");
    }
}
