use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use regvm_asm::{assemble, parse, Instr, Listing, Program};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble REG/MEM pseudo-assembly into packed VM words")]
struct Opts {
    /// Source file, one statement per line
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Binary output file
    #[arg(value_name = "OUTPUT", required_unless_present = "test")]
    output: Option<PathBuf>,
    /// Print the per-instruction listing instead of writing the binary
    #[arg(short, long)]
    test: bool,
    /// Also dump the intermediate representation as JSON (written after the binary)
    #[arg(long, value_name = "FILE")]
    ir: Option<PathBuf>,
}

#[derive(Serialize)]
struct IrRecord<'a> {
    opcode: u8,
    #[serde(flatten)]
    instr: &'a Instr,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let src = fs::read_to_string(&opts.input)
        .with_context(|| format!("cannot read {}", opts.input.display()))?;
    let program = parse(&src)?;

    if opts.test {
        // Listing mode writes nothing but the optional IR dump.
        if let Some(path) = &opts.ir {
            write_ir(path, &program)?;
        }
        println!("{}", Listing::new(&program));
        return Ok(());
    }

    let out = opts
        .output
        .as_ref()
        .ok_or_else(|| anyhow!("OUTPUT is required unless --test is given"))?;
    let bin = assemble(&program);
    fs::write(out, &bin).with_context(|| format!("cannot write {}", out.display()))?;
    if let Some(path) = &opts.ir {
        write_ir(path, &program)?;
    }
    println!("wrote {} bytes to {}", bin.len(), out.display());
    println!("instructions: {}", program.len());
    Ok(())
}

fn write_ir(path: &Path, program: &Program) -> Result<()> {
    let records: Vec<IrRecord> = program
        .iter()
        .map(|instr| IrRecord { opcode: instr.opcode(), instr })
        .collect();
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    info!(path = %path.display(), "wrote intermediate representation");
    Ok(())
}
