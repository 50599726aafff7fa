use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sort_trace::config::{self, Settings};
use sort_trace::frequency::{self, Analysis, Language};
use sort_trace::input::{self, InputError};
use sort_trace::stack::{self, DemoReport};
use sort_trace::unstable::{lomuto_stack, midpoint_recursive};
use sort_trace::Sorted;

const DEFAULT_INPUT: &str = "64, 34, 25, 12, 22, 11, 90";

/// Rows shown by `frequency --compare`.
const TOP_DEVIATIONS: usize = 10;

#[derive(Parser)]
#[command(name = "sort-trace", version, about = "Step-by-step quicksort, stack and letter frequency demos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a list of numbers and print every step
    Quicksort {
        /// Comma-separated integers, each token keeps its leading integer [default: 64, 34, 25, 12, 22, 11, 90]
        #[arg(long, conflicts_with = "random")]
        input: Option<String>,

        /// Sort generated numbers instead, shaped by SORT_TRACE_RANDOM_LEN and SORT_TRACE_RANDOM_MAX
        #[arg(long)]
        random: bool,

        /// Seed for --random, overrides SORT_TRACE_SEED
        #[arg(long, requires = "random")]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = Variant::Both)]
        variant: Variant,
    },
    /// Check whether brackets are balanced
    Brackets {
        #[arg(required = true)]
        expressions: Vec<String>,
    },
    /// Push items onto a bounded stack, search it, then pop everything
    Stack {
        /// Overrides SORT_TRACE_STACK_CAPACITY
        #[arg(long)]
        capacity: Option<usize>,

        /// Items to look for once everything is pushed
        #[arg(long = "search")]
        queries: Vec<String>,

        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Count letters in a text and compare them with the language's usual frequencies
    Frequency {
        /// english or german
        #[arg(long, default_value = "english")]
        language: Language,

        /// Analyze the built-in sample paragraph of the language
        #[arg(long)]
        sample: bool,

        /// Also list the letters furthest from their expected share
        #[arg(long)]
        compare: bool,

        #[arg(required_unless_present = "sample", conflicts_with = "sample")]
        text: Vec<String>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Variant {
    Iterative,
    Recursive,
    Both,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sort_trace=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quicksort {
            input,
            random,
            seed,
            variant,
        } => {
            let values = if random {
                random_input(config::settings()?, seed)
            } else {
                input::parse_nonempty(input.as_deref().unwrap_or(DEFAULT_INPUT))?
            };

            let run = run_quicksort(values, variant)?;
            print_lines(&run.lines());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Brackets { expressions } => {
            let report = check_expressions(&expressions);
            print_lines(&report.lines);

            if report.all_balanced {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Stack {
            capacity,
            queries,
            items,
        } => {
            let capacity = match capacity {
                Some(capacity) => capacity,
                None => config::settings()?.stack_capacity,
            };
            info!(capacity, items = items.len(), "running stack demo");

            let report = stack::demo(capacity, items, queries);
            print_lines(&stack_lines(&report));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Frequency {
            language,
            sample,
            compare,
            text,
        } => {
            let text = if sample {
                language.sample_text().to_owned()
            } else {
                text.join(" ")
            };

            let analysis = frequency::analyze(&text, language);
            print_lines(&frequency_lines(&analysis, compare));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn random_input(settings: &Settings, seed: Option<u64>) -> Vec<i32> {
    let seed = seed.unwrap_or_else(|| settings.seed_or_random());
    let mut rng = StdRng::seed_from_u64(seed);

    input::random_sequence(settings.random_len, settings.random_max, &mut rng)
}

struct QuicksortRun {
    input: Vec<i32>,
    iterative: Option<Sorted<i32>>,
    recursive: Option<Sorted<i32>>,
}

impl QuicksortRun {
    /// `None` unless both variants ran.
    fn agree(&self) -> Option<bool> {
        match (&self.iterative, &self.recursive) {
            (Some(a), Some(b)) => Some(a.sorted == b.sorted),
            _ => None,
        }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Input: {:?}", self.input)];

        if let Some(sorted) = &self.iterative {
            push_sorted(&mut lines, "Iterative (Lomuto, work list)", sorted);
        }

        if let Some(sorted) = &self.recursive {
            push_sorted(&mut lines, "Recursive (middle pivot)", sorted);
        }

        if let Some(agree) = self.agree() {
            lines.push(String::new());
            lines.push(format!("Both results equal: {agree}"));
        }

        lines
    }
}

// The recursive variant nests once per level and every step copies the buffer.
fn run_quicksort(values: Vec<i32>, variant: Variant) -> Result<QuicksortRun, InputError> {
    input::check_len(&values, midpoint_recursive::MAX_LEN)?;

    let iterative = matches!(variant, Variant::Iterative | Variant::Both)
        .then(|| lomuto_stack::sort_traced(&values));
    let recursive = matches!(variant, Variant::Recursive | Variant::Both)
        .then(|| midpoint_recursive::sort_traced(&values));

    Ok(QuicksortRun {
        input: values,
        iterative,
        recursive,
    })
}

fn push_sorted(lines: &mut Vec<String>, title: &str, sorted: &Sorted<i32>) {
    lines.push(String::new());
    lines.push(format!("== {title} =="));
    lines.push(format!("Result: {:?}", sorted.sorted));

    if sorted.trace.is_empty() {
        return;
    }

    lines.push("Steps:".to_owned());
    lines.extend(sorted.trace.numbered().into_iter().map(|line| format!("  {line}")));
}

struct BracketsReport {
    lines: Vec<String>,
    all_balanced: bool,
}

fn check_expressions(expressions: &[String]) -> BracketsReport {
    let mut lines = Vec::with_capacity(expressions.len());
    let mut all_balanced = true;

    for expr in expressions {
        match stack::check_brackets(expr) {
            Ok(()) => lines.push(format!("ok    {expr}")),
            Err(err) => {
                all_balanced = false;
                lines.push(format!("error {expr}: {err}"));
            }
        }
    }

    BracketsReport {
        lines,
        all_balanced,
    }
}

fn stack_lines(report: &DemoReport<String>) -> Vec<String> {
    let mut lines = Vec::new();

    lines.extend(report.pushed.iter().map(|item| format!("push    {item}")));
    lines.extend(
        report
            .rejected
            .iter()
            .map(|(item, err)| format!("reject  {item}: {err}")),
    );

    lines.push(String::new());
    lines.push("Stack, top first:".to_owned());
    for (position, item) in report.contents.iter().enumerate() {
        let marker = if position == 0 { "  <- top" } else { "" };
        lines.push(format!("  [{position}] {item}{marker}"));
    }

    if let Some(top) = &report.peeked {
        lines.push(String::new());
        lines.push(format!("peek    {top}"));
    }

    for (query, position) in &report.found {
        lines.push(match position {
            Some(position) => format!("search  {query}: position {position} from the top"),
            None => format!("search  {query}: not found"),
        });
    }

    lines.push(String::new());
    lines.extend(report.popped.iter().map(|item| format!("pop     {item}")));

    if let Err(err) = &report.final_pop {
        lines.push(format!("pop     {err}"));
    }

    lines
}

fn frequency_lines(analysis: &Analysis, compare: bool) -> Vec<String> {
    let language = analysis.language;

    if analysis.total_letters == 0 {
        return vec![format!("No letters of the {language} alphabet found")];
    }

    let mut lines = vec![
        format!(
            "Language: {language}, letters: {}, unique: {}",
            analysis.total_letters,
            analysis.unique_letters()
        ),
        String::new(),
        "Letter | Count | Frequency | Expected".to_owned(),
    ];

    for entry in analysis.letters.iter().filter(|entry| entry.count > 0) {
        lines.push(format!(
            "  {:<4} | {:>5} | {:>9} | {:>7.2}%",
            entry.letter.to_uppercase().to_string(),
            entry.count,
            entry.percentage(),
            language.expected_frequency(entry.letter)
        ));
    }

    if compare {
        lines.push(String::new());
        lines.push("Letter | Actual | Expected | Difference".to_owned());

        for deviation in analysis.deviations().iter().take(TOP_DEVIATIONS) {
            lines.push(format!(
                "  {:<4} | {:>5.2}% | {:>7.2}% | {:>10.2}",
                deviation.letter.to_uppercase().to_string(),
                deviation.actual,
                deviation.expected,
                deviation.difference
            ));
        }
    }

    lines
}
