use scheduler::{round_robin, sequential, RoundRobin, Scheduler, Ticks};

use std::env;
use std::fs;

use processor::{format_logs, format_report, Log};


static SCHEDULER: &str = "round-robin";

fn write_logs(folder: &str, name: &str, logs: &str) {
    let quantum = arguments();
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let quantum = arguments();
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"
    ))
    .unwrap()
}

fn run(folder: &str, name: &str, logs: &[Log], scheduler: &impl Scheduler) {
    let output = format!(
        "{}{}",
        format_logs(logs),
        format_report(&scheduler.completed())
    );

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn arguments() -> Ticks {
    env::var("QUANTUM")
        .unwrap_or("3".to_string())
        .parse::<Ticks>()
        .unwrap()
}

fn scheduler(execution_times: &[Ticks]) -> RoundRobin {
    let quantum = arguments();

    println!("Quantum {quantum}");
    round_robin(sequential(execution_times).unwrap(), quantum).unwrap()
}
