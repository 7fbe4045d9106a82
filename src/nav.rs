//! A zipper over terms: a cursor that can move between pre-order positions
//! and rewrite the focused subterm without losing the rest of the tree.
//!
//! The ancestor chain is explicit breadcrumb data (one hole plus the child
//! index taken, per level), not captured closures, so navigator states
//! compare and print structurally. Navigators are persistent: every move
//! returns a new value and old ones stay valid, which is what makes keeping
//! several foci over one term (or an undo history) cheap.

use std::rc::Rc;

use crate::expr::Expr;
use crate::hole::Hole;

/// One ancestor level: the hole that rebuilds the parent around the child,
/// and which child was descended into.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Crumb {
    hole: Hole,
    index: usize,
}

/// A cursor into a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nav {
    crumbs: Vec<Crumb>,
    focus: Rc<Expr>,
}

/// A navigator position flattened to its composed ancestor hole and the
/// focused subterm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focus {
    pub hole: Hole,
    pub expr: Rc<Expr>,
}

impl Focus {
    /// Rebuild the whole term this focus was taken from.
    pub fn realize(&self) -> Rc<Expr> {
        self.hole.fill(Rc::clone(&self.expr))
    }
}

impl Nav {
    /// Start at the root of `expr`.
    pub fn new(expr: Rc<Expr>) -> Self {
        Self {
            crumbs: Vec::new(),
            focus: expr,
        }
    }

    /// The focused subterm.
    pub fn expr(&self) -> &Rc<Expr> {
        &self.focus
    }

    pub fn is_root(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Number of immediate children of the focused node.
    pub fn arity(&self) -> usize {
        match self.focus.as_ref() {
            Expr::Free(_) | Expr::Bound(_) => 0,
            Expr::Lam { .. } => 1,
            Expr::App { .. } => 2,
        }
    }

    /// Descend into the `index`-th child, freezing the untouched sibling in
    /// the pushed hole. `None` past the focused node's arity.
    pub fn child(&self, index: usize) -> Option<Nav> {
        let (hole, child) = match (self.focus.as_ref(), index) {
            (Expr::Lam { arg_name, body }, 0) => (
                Hole::LambdaBody {
                    arg_name: arg_name.clone(),
                },
                Rc::clone(body),
            ),
            (Expr::App { callee, arg }, 0) => (
                Hole::AppCallee {
                    arg: Rc::clone(arg),
                },
                Rc::clone(callee),
            ),
            (Expr::App { callee, arg }, 1) => (
                Hole::AppArg {
                    callee: Rc::clone(callee),
                },
                Rc::clone(arg),
            ),
            _ => return None,
        };
        let mut crumbs = self.crumbs.clone();
        crumbs.push(Crumb { hole, index });
        Some(Nav {
            crumbs,
            focus: child,
        })
    }

    /// Refill the focus into its immediate ancestor hole, reporting which
    /// child index it came from. `None` at the root.
    pub fn parent(&self) -> Option<(Nav, usize)> {
        let mut crumbs = self.crumbs.clone();
        let Crumb { hole, index } = crumbs.pop()?;
        Some((
            Nav {
                crumbs,
                focus: hole.fill(Rc::clone(&self.focus)),
            },
            index,
        ))
    }

    /// Move to the next node of the whole term in pre-order. `None` at the
    /// last node.
    pub fn next(&self) -> Option<Nav> {
        if self.arity() > 0 {
            return self.child(0);
        }
        // leaf: climb until some ancestor still has a sibling to the right
        let mut nav = self.clone();
        loop {
            let (parent, index) = nav.parent()?;
            if index + 1 < parent.arity() {
                return parent.child(index + 1);
            }
            nav = parent;
        }
    }

    /// Move to the previous node in pre-order. `None` at the root.
    pub fn prev(&self) -> Option<Nav> {
        let (parent, index) = self.parent()?;
        if index == 0 {
            return Some(parent);
        }
        // the predecessor is the deepest-last node of the left sibling
        let mut nav = parent.child(index - 1)?;
        loop {
            let arity = nav.arity();
            if arity == 0 {
                return Some(nav);
            }
            nav = nav.child(arity - 1)?;
        }
    }

    /// Replace the focused subterm with `update(current)`.
    ///
    /// An update that signals "no applicable change" with `None` leaves the
    /// navigator untouched; the `None` result reports the no-op.
    pub fn update_expr(
        &self,
        update: impl FnOnce(&Rc<Expr>) -> Option<Rc<Expr>>,
    ) -> Option<Nav> {
        let focus = update(&self.focus)?;
        Some(Nav {
            crumbs: self.crumbs.clone(),
            focus,
        })
    }

    /// The composed ancestor-hole chain plus the focused subterm.
    pub fn focus(&self) -> Focus {
        Focus {
            hole: Hole::compose(self.crumbs.iter().map(|crumb| crumb.hole.clone())),
            expr: Rc::clone(&self.focus),
        }
    }

    /// Reconstruct the entire term the navigator is walking.
    pub fn realize(&self) -> Rc<Expr> {
        self.focus().realize()
    }
}
