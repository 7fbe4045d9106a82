//! The command-line interface.
//!
//! Three driving loops over the same core: a redex stepper (enumerate, pick,
//! fire), a navigator walk (cursor movement plus reduce-at-focus), and an
//! unattended normalizer with a step cap.

use std::io::{self, BufRead, Write};
use std::rc::Rc;

use colored::Colorize;
use structopt::StructOpt;

use crate::expr::{to_lambda_notation, DisplayAs, Expr};
use crate::nav::Nav;
use crate::parse::{to_expr, ParserResult};
use crate::pretty;
use crate::reduce::{as_redex, redexes, Redex};

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Opt {
    /// Term in lambda notation, e.g. '(\x. x) a' (reads stdin when omitted)
    term: Option<String>,

    /// Step with a cursor over subterms instead of a redex list
    #[structopt(short, long, conflicts_with = "normalize")]
    walk: bool,

    /// Reduce without prompting until no redex remains
    #[structopt(short, long)]
    normalize: bool,

    /// Stop normalizing after this many reductions
    #[structopt(long, default_value = "1000")]
    max_steps: usize,

    /// Print every intermediate term while normalizing
    #[structopt(short, long)]
    verbose: bool,

    /// Show bound variables as bare de Bruijn indices
    #[structopt(short, long)]
    indices: bool,
}

impl Opt {
    fn display_as(&self) -> DisplayAs {
        if self.indices {
            DisplayAs::Index
        } else {
            DisplayAs::Name
        }
    }
}

/// Run the CLI.
///
/// # Errors
/// Returns a parse error if passed an invalid term.
pub fn run() -> ParserResult<()> {
    let opt = Opt::from_args();

    let source = match &opt.term {
        Some(term) => term.clone(),
        None => read_line().unwrap_or_default(),
    };
    let expr = to_expr(source.trim())?;

    if opt.normalize {
        normalize(expr, &opt);
    } else if opt.walk {
        walk(expr, &opt);
    } else {
        step_redexes(expr, &opt);
    }
    Ok(())
}

/// The redex stepper: show every candidate, fire the chosen one, repeat
/// until the term is irreducible or the user quits.
fn step_redexes(mut expr: Rc<Expr>, opt: &Opt) {
    loop {
        println!("{}", to_lambda_notation(&expr, opt.display_as()));
        let candidates: Vec<Redex> = redexes(&expr).collect();
        let Some(first) = candidates.first() else {
            println!("{}", pretty::expr_to_doc(&expr));
            println!("{}", "Irreducible.".green());
            return;
        };

        println!("{}", pretty::redex_to_doc(first));
        for (i, redex) in candidates.iter().enumerate() {
            println!(
                "  {} {}",
                format!("[{}]", i).yellow(),
                to_lambda_notation(&redex.as_app(), opt.display_as()),
            );
        }
        prompt("step [number], enter = 0, q = quit> ");

        match read_line().as_deref().map(str::trim) {
            None | Some("q") => return,
            Some("") => expr = first.reduce(),
            Some(choice) => match choice.parse::<usize>().ok().and_then(|i| candidates.get(i)) {
                Some(redex) => expr = redex.reduce(),
                None => println!("no redex {}", choice),
            },
        }
        println!();
    }
}

/// The navigator walk: a cursor over the pre-order positions of the term,
/// reducing at the focus when asked.
fn walk(expr: Rc<Expr>, opt: &Opt) {
    let mut nav = Nav::new(expr);
    loop {
        println!("{}", to_lambda_notation(&nav.realize(), opt.display_as()));
        println!("{}", pretty::focus_to_doc(&nav.focus()));
        prompt("[n]ext [p]rev [d]own [u]p [r]educe [q]uit> ");

        match read_line().as_deref().map(str::trim) {
            None | Some("q") => return,
            Some("n") => match nav.next() {
                Some(next) => nav = next,
                None => println!("at the last node"),
            },
            Some("p") => match nav.prev() {
                Some(prev) => nav = prev,
                None => println!("at the first node"),
            },
            Some("d") => match nav.child(0) {
                Some(child) => nav = child,
                None => println!("focus has no children"),
            },
            Some("u") => match nav.parent() {
                Some((parent, _)) => nav = parent,
                None => println!("at the root"),
            },
            Some("r") => match nav.update_expr(|expr| as_redex(expr).map(|redex| redex.reduce())) {
                Some(updated) => nav = updated,
                None => println!("focus is not a redex"),
            },
            Some(other) => println!("unknown command {:?}", other),
        }
        println!();
    }
}

/// Fire the leftmost-outermost redex until none remains or the step cap is
/// hit. The cap exists because normalization need not terminate.
fn normalize(mut expr: Rc<Expr>, opt: &Opt) {
    for step in 0..opt.max_steps {
        let Some(redex) = redexes(&expr).next() else {
            break;
        };
        expr = redex.reduce();
        if opt.verbose {
            println!("{}: {}", step + 1, to_lambda_notation(&expr, opt.display_as()));
        }
    }
    println!("{}", to_lambda_notation(&expr, opt.display_as()));
    if redexes(&expr).next().is_some() {
        println!(
            "{}",
            format!("Still reducible after {} steps.", opt.max_steps).yellow()
        );
    } else {
        println!("{}", "Irreducible.".green());
    }
}

fn prompt(message: &str) {
    print!("{}", message);
    // a failed flush only costs the prompt, not the loop
    let _ = io::stdout().flush();
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
