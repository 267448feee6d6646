//! Output formatting for CLI

use crate::Summary;
use crate::models::{NO_KEEPER, RemovalDecision};
use crate::services::format::format_size;

/// Print the decision list as human-readable text, grouped by platform.
pub fn format_text(summary: &Summary, decisions: &[RemovalDecision]) {
    if decisions.is_empty() {
        println!("No duplicates found.");
        print_errors(summary);
        return;
    }

    let total_size: u64 = decisions.iter().map(|d| d.size).sum();

    println!(
        "{} ({} files scanned)",
        summary.root,
        summary.collection.roms.len()
    );
    println!();

    let mut current_platform = "";
    for decision in decisions {
        if decision.platform != current_platform {
            if !current_platform.is_empty() {
                println!();
            }
            println!("[{}]", decision.platform);
            current_platform = &decision.platform;
        }

        let keep = decision.keep.as_deref().unwrap_or(NO_KEEPER);
        println!("  remove  {}", decision.remove);
        println!("    keep: {keep}");
        println!("    why:  {} ({})", decision.reason, format_size(decision.size));
    }

    println!();
    println!(
        "{} files marked for removal, {} reclaimable",
        decisions.len(),
        format_size(total_size)
    );

    print_errors(summary);
}

/// Print scan errors to stderr, truncated after the first five
fn print_errors(summary: &Summary) {
    if summary.errors.is_empty() {
        return;
    }

    println!();
    println!("Errors encountered: {}", summary.errors.len());
    if summary.errors.len() <= 5 {
        for error in &summary.errors {
            eprintln!("  {}: {}", error.path, error.message);
        }
    } else {
        for error in &summary.errors[..5] {
            eprintln!("  {}: {}", error.path, error.message);
        }
        eprintln!("  ... and {} more", summary.errors.len() - 5);
    }
}

/// Format the decision list as JSON
pub fn format_json(summary: &Summary, decisions: &[RemovalDecision]) -> String {
    let total_size: u64 = decisions.iter().map(|d| d.size).sum();

    let output = serde_json::json!({
        "root": summary.root,
        "scanned_files": summary.collection.roms.len(),
        "decisions": decisions,
        "reclaimable_bytes": total_size,
        "error_count": summary.errors.len(),
        "errors": if summary.errors.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::json!(summary.errors)
        }
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
