mod shell;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    shell::run(shell::Args::parse())
}
