//! The read-eval-print loop (spec.md §6.3).
//!
//! An external collaborator, not part of the tested core (spec.md §1): it
//! consumes the core purely through `parser::parse` and
//! `evaluator::eval_program`. Grounded in the original C++'s
//! `repl.cpp::Start(istream&, ostream&)` — same prompt, same
//! tab-prefixed parse-error formatting, same persistent environment
//! threaded across lines, same EOF-terminates-the-loop behavior.

use std::io::{self, BufRead, Write};

use crate::environment::Environment;
use crate::evaluator::eval_program;
use crate::parser::parse;

const PROMPT: &str = ">>";

/// Run the REPL over arbitrary reader/writer pairs, so it's testable
/// without wiring up real stdin/stdout.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let env = Environment::new();

    loop {
        write!(output, "{} ", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        let bytes_read = input.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(());
        }

        match parse(&line) {
            Ok(program) => {
                let value = eval_program(&program, &env);
                writeln!(output, "{}", value.inspect())?;
            }
            Err(errors) => {
                for error in errors {
                    writeln!(output, "\t{}", error)?;
                }
            }
        }
    }
}

pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    start(stdin.lock(), stdout.lock())
}
