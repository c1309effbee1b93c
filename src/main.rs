use clap::Parser;
use intrasim::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
