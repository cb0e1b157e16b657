use clap::Parser;
use extsort::cli::{Cli, run_cli};

fn main() {
    let cli = Cli::parse();
    extsort::init_logging(cli.verbose);

    // Per-file failures and a bad path are reported, never turned into an exit code.
    run_cli(&cli);
}
