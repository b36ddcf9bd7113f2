//! Parses one Cypher query given on the command line.
//!
//! Prints the canonical rendering and the syntax tree on success, or every
//! diagnostic with source context on failure. Set `RUST_LOG=cypher_parser=debug`
//! to see parser tracing.

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [query] = args.as_slice() else {
        eprintln!("usage: cypher-parse <query>");
        return ExitCode::from(2);
    };

    match cypher_parser::parse(query) {
        Ok(ast) => {
            println!("{ast}");
            println!("{ast:#?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            for report in err.reports() {
                eprintln!("{report:?}");
            }
            ExitCode::from(1)
        }
    }
}
