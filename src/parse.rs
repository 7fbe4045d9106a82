//! Parse lambda notation into surface terms.

use std::rc::Rc;

use pest_consume::{match_nodes, Error, Parser};

use crate::expr::Expr;
use crate::surface::Term;

#[derive(Parser)]
#[grammar = "lambda.pest"]
pub struct LambdaParser;

/// A Result alias for parse errors.
pub type ParserResult<T> = std::result::Result<T, Error<Rule>>;

type Node<'a> = pest_consume::Node<'a, Rule, ()>;

// Deeper nesting than this is rejected up front: the recursive descent (and
// every structural recursion after it) is stack-bounded by term depth.
const MAX_NESTING: usize = 2048;

#[pest_consume::parser]
impl LambdaParser {
    /// Parse an EOI.
    fn EOI(_input: Node) -> ParserResult<()> {
        Ok(())
    }

    /// Parse an ident to a `String`.
    fn ident(input: Node) -> ParserResult<String> {
        Ok(input.as_str().into())
    }

    /// Parse a var to a `Term::Var`.
    fn var(input: Node) -> ParserResult<Term> {
        Ok(match_nodes!(input.into_children();
            [ident(name)] => Term::Var(name),
        ))
    }

    /// Parse a lam to a `Term::Lam`.
    ///
    /// lam = { ("\\" | "λ") ~ ident ~ "." ~ appl }
    fn lam(input: Node) -> ParserResult<Term> {
        Ok(match_nodes!(input.into_children();
            [ident(param), appl(body)] => Term::Lam { param, body: body.into() },
        ))
    }

    /// Parse an appl to a left-heavy `Term::App` chain.
    ///
    /// appl = { term+ }
    fn appl(input: Node) -> ParserResult<Term> {
        Ok(match_nodes!(input.into_children();
            [term(first), term(rest)..] => rest.fold(first, |callee, arg| Term::App {
                callee: callee.into(),
                arg: arg.into(),
            }),
        ))
    }

    /// Parse a term to a `Term`.
    ///
    /// term = { lam | var | "(" ~ appl ~ ")" }
    fn term(input: Node) -> ParserResult<Term> {
        Ok(match_nodes!(input.into_children();
            [lam(lam)] => lam,
            [var(var)] => var,
            [appl(appl)] => appl,
        ))
    }

    /// Parse an expr (a whole input) to a `Term`.
    fn expr(input: Node) -> ParserResult<Term> {
        Ok(match_nodes!(input.into_children();
            [appl(appl), EOI(_)] => appl,
        ))
    }
}

/// Parse a str to a surface term.
pub fn to_term(input: &str) -> ParserResult<Term> {
    check_nesting(input)?;
    let root = LambdaParser::parse(Rule::expr, input)?.single()?;
    LambdaParser::expr(root)
}

/// Parse a str all the way to a locally-nameless term.
pub fn to_expr(input: &str) -> ParserResult<Rc<Expr>> {
    Ok(to_term(input)?.to_expr())
}

fn check_nesting(input: &str) -> ParserResult<()> {
    let mut parens = 0usize;
    let mut deepest = 0usize;
    let mut lambdas = 0usize;
    for c in input.chars() {
        match c {
            '(' => {
                parens += 1;
                deepest = deepest.max(parens);
            }
            ')' => parens = parens.saturating_sub(1),
            '\\' | 'λ' => lambdas += 1,
            _ => {}
        }
    }
    if deepest + lambdas > MAX_NESTING {
        return Err(Error::new_from_pos(
            pest::error::ErrorVariant::CustomError {
                message: format!("term nesting exceeds the limit of {}", MAX_NESTING),
            },
            pest::Position::from_start(input),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use Term::{App, Lam, Var};

    /// macro to generate test cases for the parser
    /// takes a name, a string, and a surface term
    macro_rules! parser_tests { ($($name:ident: $input:expr, $expected:expr)*) => {
        mod parse_term {
            use super::*;

            $(
            #[test]
            fn $name() -> ParserResult<()> {
                assert_eq!(to_term($input)?, $expected);
                Ok(())
            }
            )*
        }
    }}

    parser_tests! {
        identifier: "s", Var("s".into())
        identity: r"\x. x", Lam { param: "x".into(), body: "x".into() }
        unicode_lambda: "λx. x", Lam { param: "x".into(), body: "x".into() }
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
        body_extends_right: r"\x. x x", Lam {
            param: "x".into(),
            body: App {
                callee: "x".into(),
                arg: "x".into(),
            }
            .into(),
        }
        left_associative: "x y z", App {
            callee: App {
                callee: "x".into(),
                arg: "y".into(),
            }
            .into(),
            arg: "z".into(),
        }
        right_associative_parens: "x (y z)", App {
            callee: "x".into(),
            arg: App {
                callee: "y".into(),
                arg: "z".into(),
            }
            .into(),
        }
        redex: r"(\x. x) a", App {
            callee: Lam { param: "x".into(), body: "x".into() }.into(),
            arg: "a".into(),
        }
        extra_parens: "((x))", Var("x".into())
        primed_ident: r"\x'. x'", Lam { param: "x'".into(), body: "x'".into() }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(to_term("").is_err());
    }

    #[test]
    fn unbalanced_parens_are_an_error() {
        assert!(to_term("(x").is_err());
        assert!(to_term("x)").is_err());
    }

    #[test]
    fn lambda_without_body_is_an_error() {
        assert!(to_term(r"\x.").is_err());
    }

    #[test]
    fn nesting_guard_rejects_pathological_input() {
        let deep = format!("{}x{}", "(".repeat(3000), ")".repeat(3000));
        assert!(to_term(&deep).is_err());
    }

    #[test]
    fn nesting_guard_allows_reasonable_input() {
        let deep = format!("{}x{}", "(".repeat(64), ")".repeat(64));
        assert!(to_term(&deep).is_ok());
    }

    #[test]
    fn to_expr_resolves_scopes() {
        use crate::expr::Expr;

        let expr = to_expr(r"\f. \x. f x").expect("parses");
        let expected = Expr::lam(
            "f",
            Expr::lam("x", Expr::app(Expr::bound(1), Expr::bound(0))),
        );
        assert_eq!(expr, expected);
    }
}
