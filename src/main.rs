use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Scaffold a TypeScript package with yarn or npm", long_about = None)]
struct Cli {
    /// Target directory for the new package
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Output a machine-readable summary as JSON
    #[arg(short, long)]
    json: bool,

    /// Extra arguments; flags (leading dash) are forwarded verbatim to
    /// the package manager's init (e.g. `tsnew my-pkg -y`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    init_args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    commands::create::execute(&cli.dir, &cli.init_args, cli.json)
}
