//! Print everything the probes can tell us about this machine.
//!
//! Run with: `cargo run --example system_basic`

use lumen_system::{cpu, memory, process, terminal, utils};

fn main() -> lumen_system::SystemResult<()> {
    tracing_subscriber::fmt().with_env_filter("lumen_system=debug").init();

    lumen_system::init()?;

    println!("== lumen-system {} ==\n", lumen_system::VERSION);
    println!("{}\n", lumen_system::summary());

    println!("resident set:   {}", utils::format_bytes(memory::memory_used(true) as u64));
    println!("virtual arena:  {}", utils::format_bytes(memory::memory_used(false) as u64));
    println!("physical RAM:   {}", utils::format_bytes(memory::physical_memory() as u64));
    println!("open-file cap:  {}", memory::max_open_files());
    println!("hw concurrency: {}", cpu::hardware_concurrency());
    println!("executable:     {}", process::this_program_path().display());

    let size = terminal::size();
    println!("terminal:       {}x{}", size.columns, size.rows);

    Ok(())
}
