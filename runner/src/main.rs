use std::io;

use anyhow::Result;
use log::debug;
use processor::{format_logs, format_report, Processor};
use scheduler::{round_robin, sequential, Scheduler};

mod prompt;

use prompt::Prompter;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let (execution_times, quantum) = prompter.workload()?;

    let mut scheduler = round_robin(sequential(&execution_times)?, quantum)?;
    let logs = Processor::run(&mut scheduler);
    debug!("\n{}", format_logs(&logs));

    print!("{}", format_report(&scheduler.completed()));
    Ok(())
}

#[cfg(test)]
mod tests;
