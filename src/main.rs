use clap::Parser;

mod command_line;

use command_line::cli::{run, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
