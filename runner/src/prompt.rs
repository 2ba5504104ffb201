use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use scheduler::Ticks;

/// Reads the simulation parameters interactively.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Asks for the number of processes, the execution time of each one
    /// and the quantum size, in that order.
    pub fn workload(&mut self) -> Result<(Vec<Ticks>, Ticks)> {
        let count = self.positive("Enter the number of processes:")?;
        let execution_times = (1..=count)
            .map(|n| {
                self.positive(&format!(
                    "Enter execution time (in time units) for process p{n}:"
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let quantum = self.positive("Enter the quantum size for each process execution:")?;

        Ok((execution_times, quantum))
    }

    /// Repeats `message` until the answer is a positive integer.
    ///
    /// Fails if the input ends first.
    pub fn positive(&mut self, message: &str) -> Result<Ticks> {
        loop {
            write!(self.output, "{message} ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input ended while waiting for: {message}");
            }

            match line.trim().parse::<Ticks>() {
                Ok(value) if value > 0 => return Ok(value),
                _ => writeln!(self.output, "Please enter a positive whole number.")?,
            }
        }
    }
}
