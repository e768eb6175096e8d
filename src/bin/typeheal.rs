use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use typeheal::cli::args::CliArgs;
use typeheal::cli::driver;

fn main() -> Result<()> {
    // Tracing is opt-in through TYPEHEAL_LOG / RUST_LOG (see src/tracing_config.rs).
    typeheal::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let color = !args.no_color && std::io::stdout().is_terminal();
    let output = driver::run(&args, color)?;
    for line in &output.lines {
        println!("{line}");
    }

    if output.exit_code != driver::EXIT_SUCCESS {
        std::process::exit(output.exit_code);
    }
    Ok(())
}
