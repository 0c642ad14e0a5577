use std::path::Path;
use std::process;

use rewire_core::grid::{all_filled, count_correct, Answers};
use rewire_core::{accuracy_percent, GridPuzzle};
use serde::Deserialize;
use serde_json::json;

use crate::{print_json, report_error, OutputFormat};

/// A grid plus the player's answers, as the browser submits it.
#[derive(Deserialize)]
struct GridAttempt {
    #[serde(flatten)]
    puzzle: GridPuzzle,
    answers: Answers,
}

pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let doc = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let attempt: GridAttempt = match serde_json::from_str(&doc) {
        Ok(a) => a,
        Err(e) => {
            let msg = format!("error parsing grid in '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let puzzle = &attempt.puzzle;
    if let Err(e) = puzzle.check(&attempt.answers) {
        report_error(&format!("error: {}", e), output, quiet);
        process::exit(1);
    }

    let validation = puzzle.validate(&attempt.answers);
    let correct = count_correct(&validation);
    let total = puzzle.rows() * puzzle.cols();
    let accuracy = accuracy_percent(
        u32::try_from(correct).unwrap_or(u32::MAX),
        u32::try_from(total).unwrap_or(u32::MAX),
    );

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&json!({
            "validation": validation,
            "correctCount": correct,
            "totalCells": total,
            "accuracy": accuracy,
            "complete": all_filled(&attempt.answers),
        })),
        OutputFormat::Text => {
            for row in &validation {
                let marks: Vec<&str> = row.iter().map(|ok| if *ok { "✓" } else { "✗" }).collect();
                println!("{}", marks.join(" "));
            }
            println!("{}/{} correct ({}%)", correct, total, accuracy);
        }
    }
}
