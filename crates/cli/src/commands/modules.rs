use std::process;

use rewire_core::{ModuleKind, Route, View};
use serde_json::json;

use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_modules(output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let list: Vec<serde_json::Value> = ModuleKind::ALL
                .iter()
                .map(|m| {
                    json!({
                        "id": m.id(),
                        "name": m.name(),
                        "description": m.description(),
                        "icon": m.icon(),
                    })
                })
                .collect();
            print_json(&list);
        }
        OutputFormat::Text => {
            for m in ModuleKind::ALL {
                println!("{:<18} {} {}", m.id(), m.icon(), m.name());
                println!("{:<18} {}", "", m.description());
            }
        }
    }
}

pub(crate) fn cmd_route(location: &str, base: &str, output: OutputFormat, quiet: bool) {
    let route = Route::parse(location, base);
    let view = match route.resolve() {
        Ok(v) => v,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&route).unwrap_or_else(|_| json!({}));
            value["path"] = json!(route.to_path(base));
            value["fragment"] = json!(route.to_fragment());
            print_json(&value);
        }
        OutputFormat::Text => match view {
            View::Home => println!("home"),
            View::Module(m) => println!("module {} ({})", m.id(), m.name()),
        },
    }
}
