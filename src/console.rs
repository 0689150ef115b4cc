//! Line-based console front end
//!
//! Reads one question per line from stdin, runs the blocking loop and prints
//! the transcript. Exits on EOF or a quit command.

use crate::agent::{ExitReason, ReactAgent};
use crate::tools::Tool;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const RULE: &str = "============================================================";

/// What to do with one input line
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Skip,
    Query(&'a str),
}

pub fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Command::Skip;
    }
    match line.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Query(line),
    }
}

fn print_banner(agent: &ReactAgent) {
    println!("Research Assistant (ReAct)");
    println!(
        "Model: {} (up to {} steps per question)",
        agent.model_id(),
        agent.settings().max_iterations
    );
    println!("Available tools ({}):", agent.tools().len());
    for tool in agent.tools().iter() {
        println!("  - {}: {}", tool.name(), tool.description());
    }
    println!("Type 'quit', 'exit' or 'q' to leave.");
}

/// Run the interactive loop until EOF or a quit command
pub async fn run_repl(agent: &ReactAgent) -> Result<(), Box<dyn std::error::Error>> {
    print_banner(agent);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let query = match parse_command(&line) {
            Command::Quit => break,
            Command::Skip => continue,
            Command::Query(query) => query,
        };

        match agent.run(query).await {
            Ok(outcome) => {
                println!("\n{RULE}");
                println!("{}", outcome.transcript);
                println!("{RULE}");
                if outcome.exit == ExitReason::BudgetExhausted {
                    println!(
                        "(stopped after {} iterations without a final answer)",
                        outcome.iterations
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Query failed");
                eprintln!("Error: {e}");
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
