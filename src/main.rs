use clap::Parser as ClapParser;
use sieve_lang::cli::{self, CliError, MatchOptions, MatchOutcome};
use std::io::{self, Read};
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(name = "sieve")]
#[command(about = "Sieve - match a boolean filter query against a JSON record")]
#[command(version)]
struct Cli {
    /// The filter query, e.g. 'a = 1 AND (b > 5 OR c = "foo")'
    query: String,

    /// JSON record (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Dump the compiled expression tree to stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(MatchOutcome::Matched) => {
            println!("matched");
            ExitCode::SUCCESS
        }
        Ok(MatchOutcome::Unmatched) => {
            println!("unmatched");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<MatchOutcome, CliError> {
    let input = match cli.input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = MatchOptions {
        query: cli.query,
        input,
        debug: cli.debug,
    };

    cli::run_match(&options)
}
