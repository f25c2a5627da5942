use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use emul8_core::Component;
use emul8_ls8::loader;
use emul8_ls8::machine::Ls8Machine;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(about = "Run an LS-8 program")]
struct Args {
    /// Program source: one binary instruction literal per line.
    program: PathBuf,

    /// Log a CPU state line before every executed instruction.
    #[arg(long)]
    trace: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.trace {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };
    let stderr_format = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(stderr_format).init();

    tracing::info!("loading LS-8 program from {}", args.program.display());
    let source = fs::read_to_string(&args.program)
        .with_context(|| format!("could not read program file '{}'", args.program.display()))?;
    let program = loader::parse_program(&source)?;

    let mut machine = Ls8Machine::new(&program)?;
    tracing::info!("{}: {} program bytes loaded", machine.id(), program.len());
    machine.run()?;
    Ok(())
}
