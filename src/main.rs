/*!
 * SchedOS Driver
 * CLI collaborator: builds a demo workload, drives scheduler cycles until
 * the simulation is idle, and prints the final process table
 */

use anyhow::{bail, Context, Result};
use log::info;
use schedos::{Kernel, Policy, ProcessState, ProcessType};
use std::env;
use std::io::{self, Write};

/// Guard against runaway simulations
const MAX_CYCLES: u64 = 10_000;

struct Args {
    policy: Policy,
    seed: Option<u64>,
    json: bool,
}

fn usage() -> String {
    format!(
        "Usage: schedos <policy> [--seed N] [--json]\nAvailable policies: {}",
        Policy::ALL.map(|p| p.to_string()).join(", ")
    )
}

fn parse_args() -> Result<Args> {
    let mut policy = None;
    let mut seed = None;
    let mut json = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--seed" => {
                let value = args.next().context("--seed requires a value")?;
                seed = Some(value.parse().context("--seed expects an integer")?);
            }
            name if policy.is_none() => {
                policy = Some(name.parse::<Policy>().with_context(|| usage())?);
            }
            other => bail!("Unexpected argument '{}'\n{}", other, usage()),
        }
    }

    let Some(policy) = policy else {
        bail!("{}", usage());
    };
    Ok(Args { policy, seed, json })
}

/// Ten processes with mixed sizes, priorities, and behavioral types
fn spawn_workload(kernel: &mut Kernel, sink: &mut impl Write) -> Result<()> {
    let workload: [(&str, i64, u32, ProcessType); 10] = [
        ("WebBrowser", 50, 5, ProcessType::IoBound),
        ("Calculator", 20, 10, ProcessType::ComputeBound),
        ("TextEditor", 40, 8, ProcessType::Regular),
        ("VideoPlayer", 60, 3, ProcessType::IoBound),
        ("Compiler", 80, 15, ProcessType::ComputeBound),
        ("FileManager", 35, 7, ProcessType::Regular),
        ("Database", 70, 4, ProcessType::IoBound),
        ("Game", 100, 2, ProcessType::ComputeBound),
        ("Terminal", 25, 12, ProcessType::Regular),
        ("ImageEditor", 55, 6, ProcessType::IoBound),
    ];

    for (name, size, priority, ptype) in workload {
        let handle = kernel
            .create_process(name, size, priority, ptype)
            .with_context(|| format!("creating process '{}'", name))?;
        kernel
            .save_process(&handle, sink)
            .with_context(|| format!("dumping process '{}'", name))?;
        writeln!(sink)?;
    }
    Ok(())
}

fn print_final_table(kernel: &Kernel, sink: &mut impl Write) -> Result<()> {
    writeln!(sink, "=== Final Process States ===")?;
    let mut completed = 0u32;
    let mut active = 0u32;
    for snap in kernel.snapshot() {
        writeln!(
            sink,
            "Process {}: {} (PC={}/{})",
            snap.pid, snap.state, snap.pc, snap.size
        )?;
        if snap.state == ProcessState::Dead {
            completed += 1;
        } else {
            active += 1;
        }
    }
    writeln!(sink)?;
    writeln!(sink, "Completed processes: {}", completed)?;
    writeln!(sink, "Active processes:    {}", active)?;

    let stats = kernel.stats();
    writeln!(
        sink,
        "Cycles: {}  dispatches: {}  preemptions: {}  blocks: {}  completions: {}",
        stats.cycles, stats.dispatches, stats.preemptions, stats.blocks, stats.completions
    )?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let mut kernel = match args.seed {
        Some(seed) => Kernel::with_seed(seed),
        None => Kernel::new(),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "=== Creating processes ===")?;
    spawn_workload(&mut kernel, &mut stdout)?;

    info!("Starting scheduling with '{}'", args.policy);
    let cycles = kernel
        .run_until_idle(args.policy, MAX_CYCLES)
        .context("simulation did not settle")?;
    writeln!(
        stdout,
        "All processes completed after {} scheduling cycles\n",
        cycles
    )?;

    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &kernel.snapshot())?;
        writeln!(stdout)?;
    } else {
        print_final_table(&kernel, &mut stdout)?;
    }

    // Teardown: every occupied slot is deleted explicitly.
    for pid in kernel.snapshot().iter().map(|s| s.pid).collect::<Vec<_>>() {
        kernel.delete_process(pid)?;
    }
    Ok(())
}
