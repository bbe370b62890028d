//! Progress bar and summary reporting for CLI downloads.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Action, RunStats, format_bytes, format_duration};

const SEPARATOR: &str = "────────────────────────────────────────────────────────────";

/// Creates a progress bar over the actions of a plan.
pub fn make_run_progress_bar(total_actions: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_actions);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} actions - {msg}",
        )
        .expect("progress template is valid")
        .progress_chars("━━╌"),
    );
    bar
}

/// Prints the planned directory and file operations.
pub fn print_plan(actions: &[Action]) {
    if actions.is_empty() {
        println!("Nothing to do.");
        return;
    }

    let dirs = actions
        .iter()
        .filter(|a| matches!(a, Action::MkDir(_)))
        .count();
    let files = actions.len() - dirs;

    println!("\n{SEPARATOR}");
    println!("Planned operations:");
    println!("{SEPARATOR}");
    for action in actions {
        println!("  {action}");
    }
    println!("{SEPARATOR}");
    println!("  {dirs} director(ies), {files} file(s)");
    println!("{SEPARATOR}\n");
}

/// Prints a summary of the executed run.
pub fn print_summary(stats: &RunStats) {
    if stats.is_empty() {
        return;
    }

    println!("\n{SEPARATOR}");
    println!("Download Summary");
    println!("{SEPARATOR}");
    println!("  Directories created: {}", stats.dirs_created);
    println!("  Files fetched:       {}", stats.files_fetched);
    println!("  Total size:          {}", format_bytes(stats.bytes_fetched));
    println!("  Total time:          {}", format_duration(stats.elapsed));
    println!(
        "  Average speed:       {}/s",
        format_bytes(stats.average_speed())
    );
    println!("{SEPARATOR}");
}
