use ariadne::Source;
use std::{io, process::ExitCode};
use symdiff_compute::Function;
use symdiff_error::Error;

/// Report the error to stderr, highlighting the spans it carries in the input.
///
/// The `ariadne` crate's `Report` type does not have a `Display` implementation, so we can only use
/// its `eprint` method to print to stderr.
fn report_to_stderr(err: &Error, input: &str) -> io::Result<()> {
    err.build_report("input").eprint(("input", Source::from(input)))
}

/// Parses the function and prints it, its simplified form, and its partial derivative with
/// respect to each of its variables.
fn run(input: &str, variables: &str) -> Result<(), Error> {
    let variables = variables
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>();
    let f = Function::new(variables, input)?;
    println!("{}", f.to_string_named("f"));

    let mut simplified = f.clone();
    simplified.simplify();
    println!("{}", simplified.to_string_named("f"));

    for variable in f.variables() {
        let mut derivative = f.derivative(variable)?;
        derivative.simplify();
        println!("{}", derivative.to_string_named(&format!("df/d{}", variable)));
    }

    Ok(())
}

fn main() -> io::Result<ExitCode> {
    let mut args = std::env::args();
    args.next();

    let Some(input) = args.next() else {
        eprintln!("usage: derivative <expression> [variables]");
        eprintln!("example: derivative \"(+ (* x x) (sin y))\" x,y");
        return Ok(ExitCode::FAILURE);
    };
    let variables = args.next().unwrap_or_else(|| "x".to_string());

    match run(&input, &variables) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            report_to_stderr(&err, &input)?;
            Ok(ExitCode::FAILURE)
        },
    }
}
