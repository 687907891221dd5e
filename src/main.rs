use clap::Parser;

use semver_guard::cli::{Cli, Commands};
use semver_guard::commands::{run_check, run_install};

fn main() {
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Install(args) => run_install(args, &cli),
    };

    std::process::exit(exit_code);
}
