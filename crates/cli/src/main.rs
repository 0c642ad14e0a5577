mod commands;

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rewire_core::module::Settings;
use rewire_core::{
    Difficulty, Operation, RecallDirection, StroopMode, DEFAULT_HISTORY_CAP,
};
use rewire_storage::DEFAULT_STATS_KEY;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// reWire cognitive-training puzzles and session history.
#[derive(Parser)]
#[command(
    name = "rewire",
    version,
    about = "reWire cognitive-training puzzles and session history"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Directory holding session history (default: $REWIRE_DATA_DIR, then the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered training modules
    Modules,

    /// Resolve a location (path or #fragment) to a view
    Route {
        /// Location, e.g. `#/module/stroop` or `/reWire/module/digit-span`
        location: String,
        /// Base path the app is served under
        #[arg(long, default_value = "/")]
        base: String,
    },

    /// Generate number-sequence puzzles
    Sequence {
        /// easy, medium, hard or mixed
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        #[arg(long, default_value = "1")]
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate an arithmetic grid
    Grid {
        #[arg(long, default_value = "4")]
        rows: usize,
        #[arg(long, default_value = "4")]
        cols: usize,
        /// + - × ÷ (ASCII * and / accepted)
        #[arg(long = "op", default_value = "+", allow_hyphen_values = true)]
        operation: Operation,
        /// Include the filled-in solution
        #[arg(long)]
        solve: bool,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score a filled-in arithmetic grid read from a JSON file
    Check {
        /// JSON with rowHeaders, colHeaders, operation and answers
        file: PathBuf,
    },

    /// Generate mental-map walks
    Maze {
        #[arg(long, default_value = "5")]
        grid_size: i32,
        #[arg(long, default_value = "5")]
        steps: usize,
        #[arg(long, default_value = "1")]
        rounds: usize,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate spell-check trials
    Spell {
        #[arg(long, default_value = "20")]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate Stroop trials
    Stroop {
        #[arg(long, default_value = "20")]
        count: usize,
        /// congruent, incongruent or mixed
        #[arg(long, default_value = "incongruent")]
        mode: StroopMode,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a digit-span sequence
    Digits {
        #[arg(long, default_value = "4")]
        length: usize,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a whole session for a module with its default settings
    Generate {
        /// Module id, e.g. `stroop` or `mental-map`
        module: String,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show, record or clear session history
    History {
        /// Storage key
        #[arg(long, global = true, default_value = DEFAULT_STATS_KEY)]
        key: String,
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Print recent sessions, newest first
    Show {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Append a finished session
    Record {
        /// Module id
        #[arg(long)]
        module: String,
        /// Size descriptor, e.g. `4×4`
        #[arg(long)]
        size: String,
        #[arg(long)]
        total: u32,
        #[arg(long)]
        correct: u32,
        #[arg(long)]
        time_ms: Option<u64>,
        #[arg(long, allow_hyphen_values = true)]
        operation: Option<Operation>,
        #[arg(long)]
        direction: Option<RecallDirection>,
        /// Maximum sessions kept
        #[arg(long, default_value_t = DEFAULT_HISTORY_CAP)]
        cap: usize,
    },

    /// Remove all sessions
    Clear,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let output = cli.output;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Modules => commands::modules::cmd_modules(output, quiet),
        Commands::Route { location, base } => {
            commands::modules::cmd_route(&location, &base, output, quiet);
        }
        Commands::Sequence {
            difficulty,
            count,
            seed,
        } => {
            commands::puzzles::cmd_sequence(difficulty, count, &mut make_rng(seed), output);
        }
        Commands::Grid {
            rows,
            cols,
            operation,
            solve,
            seed,
        } => {
            commands::puzzles::cmd_grid(rows, cols, operation, solve, &mut make_rng(seed), output);
        }
        Commands::Check { file } => commands::check::cmd_check(&file, output, quiet),
        Commands::Maze {
            grid_size,
            steps,
            rounds,
            seed,
        } => {
            let settings = Settings::MentalMap {
                grid_size,
                step_count: steps,
                rounds,
            };
            if let Err(e) = settings.validate() {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
            commands::puzzles::cmd_maze(grid_size, steps, rounds, &mut make_rng(seed), output);
        }
        Commands::Spell { count, seed } => {
            commands::puzzles::cmd_spell(count, &mut make_rng(seed), output);
        }
        Commands::Stroop { count, mode, seed } => {
            commands::puzzles::cmd_stroop(count, mode, &mut make_rng(seed), output);
        }
        Commands::Digits { length, seed } => {
            commands::puzzles::cmd_digits(length, &mut make_rng(seed), output);
        }
        Commands::Generate { module, seed } => {
            commands::puzzles::cmd_generate(&module, &mut make_rng(seed), output, quiet);
        }
        Commands::History { key, command } => {
            let store = rewire_storage::JsonFileStore::new(data_dir(cli.data_dir));
            match command {
                HistoryCommands::Show { limit } => {
                    commands::history::cmd_show(&store, &key, limit, output, quiet);
                }
                HistoryCommands::Record {
                    module,
                    size,
                    total,
                    correct,
                    time_ms,
                    operation,
                    direction,
                    cap,
                } => {
                    commands::history::cmd_record(
                        &store,
                        &key,
                        commands::history::RecordArgs {
                            module: &module,
                            size: &size,
                            total,
                            correct,
                            time_ms,
                            operation,
                            direction,
                            cap,
                        },
                        output,
                        quiet,
                    );
                }
                HistoryCommands::Clear => commands::history::cmd_clear(&store, &key, output, quiet),
            }
        }
    }
}

/// Logs go to stderr so `--output json` stays machine-readable.
fn init_tracing() {
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `--data-dir`, then `$REWIRE_DATA_DIR`, then `<platform data dir>/rewire`.
fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| env::var_os("REWIRE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rewire")
        })
}

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Print a serializable value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", json);
}

/// Report an error message to stderr in the configured format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}
