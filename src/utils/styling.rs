//! Terminal styling helpers for the CLI output

use console::style;
use std::time::Duration;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("riskpipe").cyan().bold(),
        style("deterministic risk-model training").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a numbered pipeline step header
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", style("·").cyan(), message);
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: Duration) {
    println!("    {}", style(format!("({:.2?})", elapsed)).dim());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {}",
        style("Training complete - artifacts are frozen and ready to serve.")
            .green()
            .bold()
    );
    println!();
}
