use std::rc::Rc;

use criterion::{criterion_group, criterion_main, Criterion};
use lamstep::{redexes, Expr};

/// The Church numeral n: \f. \x. f (f (... x)).
fn church(n: usize) -> Rc<Expr> {
    let mut body = Expr::bound(0);
    for _ in 0..n {
        body = Expr::app(Expr::bound(1), body);
    }
    Expr::lam("f", Expr::lam("x", body))
}

/// \m. \n. \f. m (n f) — Church multiplication.
fn mult() -> Rc<Expr> {
    Expr::lam(
        "m",
        Expr::lam(
            "n",
            Expr::lam(
                "f",
                Expr::app(Expr::bound(2), Expr::app(Expr::bound(1), Expr::bound(0))),
            ),
        ),
    )
}

/// Fire the leftmost-outermost redex until the term is irreducible.
fn normalize(mut expr: Rc<Expr>) -> Rc<Expr> {
    while let Some(redex) = redexes(&expr).next() {
        expr = redex.reduce();
    }
    expr
}

fn benchmark(c: &mut Criterion) {
    c.bench_function("normalize 9 * 9", |b| {
        b.iter(|| {
            normalize(Expr::app(
                Expr::app(mult(), church(9)),
                church(9),
            ))
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
