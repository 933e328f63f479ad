use std::env;
use std::fs::File;
use std::io::Read;
use std::process::ExitCode;

use encoding_rs_io::DecodeReaderBytesBuilder;
use mil::{eval_program, parse, Environment};

/// Read `path` as text, decoding whatever encoding it was written in (BOM
/// sniffing, falling back to UTF-8) down to a Rust `String` — the one piece
/// of ambient file-loading plumbing the core's `parse`/`eval` interfaces
/// don't need to know about (spec.md §1: file loading is an external
/// collaborator).
fn read_source_file(path: &str) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut decoder = DecodeReaderBytesBuilder::new().build(file);
    let mut source = String::new();
    decoder.read_to_string(&mut source)?;
    Ok(source)
}

fn run_file(path: &str) -> ExitCode {
    let source = match read_source_file(path) {
        Ok(source) => source,
        Err(err) => {
            log::error!("failed to read {}: {}", path, err);
            eprintln!("could not read {}: {}", path, err);
            return ExitCode::from(66);
        }
    };

    match parse(&source) {
        Ok(program) => {
            let env = Environment::new();
            let value = eval_program(&program, &env);
            if value.is_error() {
                eprintln!("{}", value.inspect());
                ExitCode::from(70)
            } else {
                println!("{}", value.inspect());
                ExitCode::SUCCESS
            }
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("\t{}", error);
            }
            ExitCode::from(65)
        }
    }
}

pub fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => match mil::repl::run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("repl error: {}", err);
                ExitCode::FAILURE
            }
        },
        2 => run_file(&args[1]),
        _ => {
            println!("Usage: mil [script]");
            ExitCode::from(64)
        }
    }
}
