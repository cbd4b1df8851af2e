//! quench-edit: edit a JSON document from the command line
//!
//! Targets are addressed by JSON Pointer ("" is the root, "/items/0" the
//! first element of a top-level array field). Add operations prompt for
//! their fields on the terminal; deletes ask for confirmation unless
//! --yes is given.
//!
//! Usage:
//!   # Set items[0].name, write the result to stdout
//!   quench-edit data.json --set /items/0 name Alice
//!
//!   # Append an item to an array, prompting for its fields
//!   quench-edit data.json --add-item /items -o data.json
//!
//!   # Delete a key without the confirmation prompt
//!   quench-edit data.json --delete "" obsolete --yes

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use quench::edit::{Confirmer, EditSession, FieldSpec, FormAnswers, FormPrompter};
use std::io::{BufRead, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "quench-edit")]
#[command(about = "Edit a JSON document in place from the command line", long_about = None)]
struct Args {
    /// Input file
    #[arg(value_name = "FILE")]
    input: String,

    /// Set a value: POINTER KEY TEXT (TEXT is coerced like any edit)
    #[arg(long, num_args = 3, value_names = ["POINTER", "KEY", "TEXT"], action = clap::ArgAction::Append)]
    set: Vec<String>,

    /// Add a field to the object at POINTER (prompts for the form)
    #[arg(long, value_name = "POINTER")]
    add_field: Vec<String>,

    /// Append an item to the array at POINTER (prompts for the form)
    #[arg(long, value_name = "POINTER")]
    add_item: Vec<String>,

    /// Delete KEY from the container at POINTER
    #[arg(long, num_args = 2, value_names = ["POINTER", "KEY"], action = clap::ArgAction::Append)]
    delete: Vec<String>,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<String>,

    /// Answer yes to every delete confirmation
    #[arg(long)]
    yes: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = read_to_string(&args.input)?;
    let mut session = EditSession::from_text(&text, Some(&args.input))
        .context("Failed to parse JSON")?;

    let mut prompter = StdinPrompter;
    let mut confirmer = StdinConfirmer { assume_yes: args.yes };

    for chunk in args.set.chunks(3) {
        let [pointer, key, value] = chunk else { continue };
        session
            .update_value(pointer, key, value)
            .with_context(|| format!("Failed to set {}/{}", pointer, key))?;
    }

    for pointer in &args.add_field {
        let applied = session
            .add_field(pointer, &mut prompter)
            .with_context(|| format!("Failed to add field at {:?}", pointer))?;
        if !applied {
            eprintln!("add-field at {:?} cancelled", pointer);
        }
    }

    for pointer in &args.add_item {
        let applied = session
            .add_item(pointer, &mut prompter)
            .with_context(|| format!("Failed to add item at {:?}", pointer))?;
        if !applied {
            eprintln!("add-item at {:?} cancelled", pointer);
        }
    }

    for chunk in args.delete.chunks(2) {
        let [pointer, key] = chunk else { continue };
        session
            .delete_property(pointer, key, &mut confirmer)
            .with_context(|| format!("Failed to delete {}/{}", pointer, key))?;
    }

    let exported = session.export()?;
    match &args.output {
        Some(path) => std::fs::write(path, exported + "\n")
            .with_context(|| format!("Failed to write {}", path))?,
        None => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{}", exported)?;
        }
    }

    Ok(())
}

fn read_to_string(path: &str) -> Result<String> {
    let mut content = Vec::new();
    std::fs::File::open(path)
        .with_context(|| format!("Failed to open file: {}", path))?
        .read_to_end(&mut content)
        .context("Failed to read input")?;
    Ok(String::from_utf8_lossy(&content).into_owned())
}

/// Prompts for form fields line by line on the terminal. An empty line
/// takes the default; EOF cancels the whole form.
struct StdinPrompter;

impl FormPrompter for StdinPrompter {
    fn prompt(&mut self, title: &str, fields: &[FieldSpec]) -> Option<FormAnswers> {
        eprintln!("{}", title);
        let stdin = std::io::stdin();
        let mut answers = FormAnswers::new();

        for field in fields {
            match &field.default {
                Some(default) if !default.is_empty() => {
                    eprint!("  {} [{}]: ", field.label, default)
                }
                _ => eprint!("  {}: ", field.label),
            }

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            let entered = line.trim_end_matches(['\r', '\n']);
            let text = if entered.is_empty() {
                field.default.clone().unwrap_or_default()
            } else {
                entered.to_string()
            };
            answers.insert(field.name.clone(), text);
        }

        Some(answers)
    }
}

struct StdinConfirmer {
    assume_yes: bool,
}

impl Confirmer for StdinConfirmer {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", message);
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}
