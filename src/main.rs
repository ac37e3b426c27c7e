use std::process::ExitCode;

use clap::Parser;

use spinring::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    match cli::run(&cli) {
        Ok(outcome) => {
            println!("{}", outcome.head);
            println!("{}", outcome.after_head);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
