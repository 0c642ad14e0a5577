use std::process;

use rewire_core::{format_elapsed, ModuleKind, Operation, RecallDirection, SessionResult};
use rewire_storage::HistoryStore;
use serde_json::json;

use crate::{now_millis, print_json, report_error, OutputFormat};

pub(crate) struct RecordArgs<'a> {
    pub module: &'a str,
    pub size: &'a str,
    pub total: u32,
    pub correct: u32,
    pub time_ms: Option<u64>,
    pub operation: Option<Operation>,
    pub direction: Option<RecallDirection>,
    pub cap: usize,
}

pub(crate) fn cmd_show<S: HistoryStore>(
    store: &S,
    key: &str,
    limit: usize,
    output: OutputFormat,
    quiet: bool,
) {
    let stats = match store.load(key) {
        Ok(s) => s,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };
    if quiet {
        return;
    }

    let recent: Vec<&SessionResult> = stats.recent(limit).collect();
    match output {
        OutputFormat::Json => print_json(&recent),
        OutputFormat::Text => {
            if recent.is_empty() {
                println!("No sessions recorded.");
                return;
            }
            for s in recent {
                let name = s.module().map_or(s.module_id.as_str(), |m| m.name());
                let time = s.time_ms.map_or_else(|| "-".to_string(), format_elapsed);
                let mut detail = s.grid_size.clone();
                if let Some(op) = s.operation {
                    detail.push_str(&format!(" {}", op));
                }
                if let Some(dir) = s.direction {
                    detail.push_str(&format!(" {}", dir));
                }
                println!(
                    "{:<18} {:<14} {:>3}/{:<3} {:>3}%  {}",
                    name, detail, s.correct_count, s.total_cells, s.accuracy, time
                );
            }
        }
    }
}

pub(crate) fn cmd_record<S: HistoryStore>(
    store: &S,
    key: &str,
    args: RecordArgs<'_>,
    output: OutputFormat,
    quiet: bool,
) {
    let Some(module) = ModuleKind::from_id(args.module) else {
        report_error(
            &format!("error: unknown module '{}'", args.module),
            output,
            quiet,
        );
        process::exit(1);
    };
    if args.correct > args.total {
        report_error("error: --correct cannot exceed --total", output, quiet);
        process::exit(1);
    }

    let mut result = SessionResult::new(now_millis(), module, args.size, args.total, args.correct)
        .with_time_ms(args.time_ms);
    if let Some(op) = args.operation {
        result = result.with_operation(op);
    }
    if let Some(dir) = args.direction {
        result = result.with_direction(dir);
    }

    let stats = match store.record_session(key, result.clone(), args.cap) {
        Ok(s) => s,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&json!({
            "recorded": result,
            "sessions": stats.sessions.len(),
        })),
        OutputFormat::Text => println!(
            "Recorded {} session ({}%). {} in history.",
            module.name(),
            result.accuracy,
            stats.sessions.len()
        ),
    }
}

pub(crate) fn cmd_clear<S: HistoryStore>(store: &S, key: &str, output: OutputFormat, quiet: bool) {
    if let Err(e) = store.clear(key) {
        report_error(&format!("error: {}", e), output, quiet);
        process::exit(1);
    }
    if !quiet && output == OutputFormat::Text {
        println!("History cleared.");
    }
}
