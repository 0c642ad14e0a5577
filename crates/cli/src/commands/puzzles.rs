use std::process;

use rand::Rng;
use rewire_core::digit_span::generate_digits;
use rewire_core::module::{Puzzle, Settings};
use rewire_core::stroop::generate_trials as generate_stroop_trials;
use rewire_core::{
    maze, spelling, Difficulty, GridPuzzle, ModuleKind, Operation, SequenceGenerator, StroopMode,
};
use serde_json::json;
use tracing::info;

use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_sequence<R: Rng>(
    difficulty: Difficulty,
    count: usize,
    rng: &mut R,
    output: OutputFormat,
) {
    let mut generator = SequenceGenerator::new();
    let sequences: Vec<_> = (0..count)
        .map(|_| generator.generate(difficulty, rng))
        .collect();

    match output {
        OutputFormat::Json => print_json(&sequences),
        OutputFormat::Text => {
            for s in &sequences {
                let shown: Vec<String> = s.numbers.iter().map(|n| n.to_string()).collect();
                println!("{}, ?    [{}] answer: {}", shown.join(", "), s.kind, s.answer);
            }
        }
    }
}

pub(crate) fn cmd_grid<R: Rng>(
    rows: usize,
    cols: usize,
    operation: Operation,
    solve: bool,
    rng: &mut R,
    output: OutputFormat,
) {
    let puzzle = GridPuzzle::generate(rows, cols, operation, rng);

    match output {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&puzzle).unwrap_or_else(|_| json!({}));
            if solve {
                value["solution"] = json!(puzzle.solution());
            }
            print_json(&value);
        }
        OutputFormat::Text => {
            print!("{:>5}", puzzle.operation.symbol());
            for c in &puzzle.col_headers {
                print!("{:>5}", c);
            }
            println!();
            for (r, header) in puzzle.row_headers.iter().enumerate() {
                print!("{:>5}", header);
                for c in 0..puzzle.cols() {
                    match puzzle.correct_answer(r, c) {
                        Some(answer) if solve => print!("{:>5}", answer),
                        _ => print!("{:>5}", "_"),
                    }
                }
                println!();
            }
        }
    }
}

pub(crate) fn cmd_maze<R: Rng>(
    grid_size: i32,
    steps: usize,
    rounds: usize,
    rng: &mut R,
    output: OutputFormat,
) {
    let walks: Vec<_> = (0..rounds)
        .map(|_| maze::generate_directions(grid_size, steps, rng))
        .collect();

    match output {
        OutputFormat::Json => print_json(&walks),
        OutputFormat::Text => {
            for (i, walk) in walks.iter().enumerate() {
                println!(
                    "Round {}: start ({}, {}) facing {} {}",
                    i + 1,
                    walk.start.0,
                    walk.start.1,
                    walk.start_facing.as_str(),
                    walk.start_facing.arrow()
                );
                println!("  {}", walk.to_text());
                println!("  end ({}, {})", walk.end.0, walk.end.1);
            }
        }
    }
}

pub(crate) fn cmd_spell<R: Rng>(count: usize, rng: &mut R, output: OutputFormat) {
    let trials = spelling::generate_trials(count, rng);

    match output {
        OutputFormat::Json => print_json(&trials),
        OutputFormat::Text => {
            for t in &trials {
                let mark = if t.is_correct { "correct" } else { "misspelled" };
                println!("{:<20} {}", t.word, mark);
            }
        }
    }
}

pub(crate) fn cmd_stroop<R: Rng>(count: usize, mode: StroopMode, rng: &mut R, output: OutputFormat) {
    let trials = generate_stroop_trials(count, mode, rng);

    match output {
        OutputFormat::Json => print_json(&trials),
        OutputFormat::Text => {
            for t in &trials {
                println!("{:<8} in {}", t.word.label(), t.ink_color);
            }
        }
    }
}

pub(crate) fn cmd_digits<R: Rng>(length: usize, rng: &mut R, output: OutputFormat) {
    let digits = generate_digits(length, rng);

    match output {
        OutputFormat::Json => print_json(&json!({ "digits": digits })),
        OutputFormat::Text => {
            let shown: Vec<String> = digits.iter().map(|d| d.to_string()).collect();
            println!("{}", shown.join(" "));
        }
    }
}

pub(crate) fn cmd_generate<R: Rng>(module_id: &str, rng: &mut R, output: OutputFormat, quiet: bool) {
    let Some(module) = ModuleKind::from_id(module_id) else {
        let known: Vec<&str> = ModuleKind::ALL.iter().map(|m| m.id()).collect();
        let msg = format!(
            "error: unknown module '{}'. Valid: {}",
            module_id,
            known.join(", ")
        );
        report_error(&msg, output, quiet);
        process::exit(1);
    };

    let settings = Settings::defaults(module);
    let puzzle = settings.generate(&mut SequenceGenerator::new(), rng);
    info!(module = module.id(), size = %settings.size_label(), "generated session");

    match output {
        OutputFormat::Json => print_json(&json!({
            "settings": settings,
            "sizeLabel": settings.size_label(),
            "session": puzzle,
        })),
        OutputFormat::Text => {
            println!("{} ({})", module.name(), settings.size_label());
            print_puzzle_summary(&puzzle);
        }
    }
}

fn print_puzzle_summary(puzzle: &Puzzle) {
    match puzzle {
        Puzzle::ArithmeticGrid(grid) => {
            println!("  rows: {:?}", grid.row_headers);
            println!("  cols: {:?}", grid.col_headers);
            println!("  operation: {}", grid.operation);
        }
        Puzzle::DigitSpan(digits) => println!("  first sequence: {:?}", digits),
        Puzzle::Stroop(trials) => println!("  {} trials", trials.len()),
        Puzzle::NumberSequences(seqs) => {
            for s in seqs {
                println!("  {:?} -> {}", s.numbers, s.answer);
            }
        }
        Puzzle::SpellCheck(trials) => println!("  {} words", trials.len()),
        Puzzle::MentalMap(walks) => {
            for w in walks {
                println!("  {}", w.to_text());
            }
        }
    }
}
