use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use intcode_rs::formatter::disassemble;
use intcode_rs::{Input, Interconnect, Memory, Result};

#[derive(Parser, Debug)]
#[command(name = "intcode")]
#[command(about = "Run an Intcode program")]
struct Args {
    /// Path to the comma separated program
    program: PathBuf,

    /// Input value. Each one is a separate run unless --queue is given
    #[arg(short, long = "input", allow_negative_numbers = true)]
    input: Vec<i64>,

    /// Print every output value instead of only the last one
    #[arg(long)]
    all: bool,

    /// Feed all inputs to a single run, one per input instruction
    #[arg(long)]
    queue: bool,

    /// Print a static listing of the program and exit
    #[arg(long)]
    disassemble: bool,

    /// Trace every executed instruction
    #[arg(long)]
    trace: bool,
}

fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(memory: &Memory, input: Input, args: &Args) -> Result<()> {
    let mut ctx = Interconnect::new(memory.clone(), input);
    ctx.cpu.debug = args.trace;
    let outputs = ctx.run_to_halt()?;

    if args.all {
        for value in &outputs {
            println!("{}", value);
        }
    } else {
        println!("{}", outputs.last().copied().unwrap_or(0));
    }
    info!("Instructions executed: {}", ctx.cpu.cycles);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.trace);

    let memory = match Memory::load_file(&args.program) {
        Ok(memory) => memory,
        Err(e) => {
            error!("Failed to load {}: {}", args.program.display(), e);
            process::exit(1);
        }
    };

    if args.disassemble {
        for (addr, line) in disassemble(&memory) {
            println!("{:04}  {}", addr, line);
        }
        return;
    }

    let inputs = if args.input.is_empty() {
        vec![0]
    } else {
        args.input.clone()
    };

    let runs = if args.queue {
        vec![Input::Queue(inputs.into_iter().collect())]
    } else {
        inputs.into_iter().map(Input::Fixed).collect()
    };

    for input in runs {
        if let Err(e) = execute(&memory, input, &args) {
            error!("Run failed: {}", e);
            process::exit(1);
        }
    }
}
