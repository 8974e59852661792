//! Grade a journal entry from a JSON file of form rows.

use anyhow::{bail, Context, Result};
use std::io::Read;

use journal_grader::course::exercise;
use journal_grader::{telemetry, GradeResult, GraderConfig, JournalEntry, LedgerEntryValidator};

const USAGE: &str = "usage: journal_grader [--config <file.json>] [--json] [--exercise <id>] <rows.json | ->
       journal_grader --list-exercises";

#[derive(Debug, Default)]
struct Options {
    config: Option<String>,
    json: bool,
    exercise: Option<String>,
    list_exercises: bool,
    input: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => options.config = Some(args.next().context("--config needs a path")?),
            "--exercise" => options.exercise = Some(args.next().context("--exercise needs an id")?),
            "--json" => options.json = true,
            "--list-exercises" => options.list_exercises = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
            _ if options.input.is_some() => bail!("only one input file is accepted\n{}", USAGE),
            path => options.input = Some(path.to_string()),
        }
    }

    Ok(options)
}

fn read_entry(input: &str) -> Result<JournalEntry> {
    let contents = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read rows from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?
    };

    serde_json::from_str(&contents).with_context(|| format!("{} is not a JSON array of rows", input))
}

fn print_grade(grade: &GradeResult) {
    println!("Total Debits: ${}", grade.total_debits);
    println!("Total Credits: ${}", grade.total_credits);
    if let Some(message) = grade.status.message() {
        println!("{}", message);
    }
    for warning in &grade.warnings {
        println!("warning: {}", warning);
    }
}

fn main() -> Result<()> {
    telemetry::init();
    let options = parse_args(std::env::args().skip(1))?;

    if options.list_exercises {
        for exercise in exercise::catalog() {
            match exercise.date {
                Some(date) => println!("{:<16} {} ({})", exercise.id, exercise.title, date),
                None => println!("{:<16} {}", exercise.id, exercise.title),
            }
        }
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => GraderConfig::load(path).with_context(|| format!("loading config {}", path))?,
        None => GraderConfig::default(),
    };
    let validator = LedgerEntryValidator::with_config(config);

    let input = options.input.as_deref().context(USAGE)?;
    let entry = read_entry(input)?;
    tracing::info!(input, rows = entry.len(), "grading journal entry");

    match &options.exercise {
        Some(id) => {
            let exercise = exercise::find(id)?;
            let feedback = exercise.check_with(&validator, &entry);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&feedback)?);
                return Ok(());
            }

            print_grade(&feedback.grade);
            for disallowed in &feedback.disallowed_accounts {
                println!(
                    "warning: Line {}: '{}' is not one of the offered accounts",
                    disallowed.line + 1,
                    disallowed.account
                );
            }
            if feedback.is_correct() {
                println!("Correct!");
            } else {
                println!("Expected Answer:");
                for line in exercise.expected_answer() {
                    println!("  - {}", line);
                }
            }
        }
        None => {
            let grade = validator.grade(&entry);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&grade)?);
            } else {
                print_grade(&grade);
            }
        }
    }

    Ok(())
}
