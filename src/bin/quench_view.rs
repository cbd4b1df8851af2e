//! quench-view: dump the selected view tree for a JSON document
//!
//! Shows, without editing anything, how the engine would present each
//! node: wide uniform collections as tables, everything else as nested
//! property grids.
//!
//! Usage:
//!   # Read from file
//!   quench-view data.json
//!
//!   # Read from stdin
//!   echo '{"a": 1}' | quench-view
//!
//!   # Lower the table threshold so 2-field schemas render as tables
//!   quench-view --table-threshold 1 data.json

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use quench::coerce::edit_text;
use quench::view::{deletable, select_view, NodeView, ViewConfig};
use serde_json::Value;
use std::io::{Read, Write};

#[derive(Parser, Debug)]
#[command(name = "quench-view")]
#[command(about = "Show how a JSON document would be presented for editing", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Schema width above which a node is rendered as a table (default: 3)
    #[arg(long)]
    table_threshold: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ViewConfig::default();
    if let Some(threshold) = args.table_threshold {
        config.table_threshold = threshold;
    }

    let root = read_document(args.input.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_node("Root", &root, 0, &config, &mut out)?;

    Ok(())
}

/// Load a document, trying SIMD parsing first with a serde_json fallback.
fn read_document(input: Option<&str>) -> Result<Value> {
    let mut content = Vec::new();
    if let Some(path) = input {
        std::fs::File::open(path)
            .with_context(|| format!("Failed to open file: {}", path))?
            .read_to_end(&mut content)
            .context("Failed to read input")?;
    } else {
        std::io::stdin()
            .read_to_end(&mut content)
            .context("Failed to read stdin")?;
    }

    // simd-json mutates the buffer, so convert through text to get a
    // key-order-preserving serde_json value
    match simd_json::to_owned_value(&mut content.clone()) {
        Ok(parsed) => {
            let json_str = simd_json::to_string(&parsed)?;
            Ok(serde_json::from_str(&json_str)?)
        }
        Err(_) => {
            let text = String::from_utf8_lossy(&content);
            quench::load_document(&text).context("Failed to parse JSON")
        }
    }
}

fn print_node(
    label: &str,
    node: &Value,
    level: usize,
    config: &ViewConfig,
    out: &mut impl Write,
) -> Result<()> {
    let indent = "  ".repeat(level);
    // The root carries no delete affordance; everything below it does.
    let marker = if deletable(level) { "" } else { " (not deletable)" };

    match select_view(node, config) {
        NodeView::Table { descriptor, keys } => {
            writeln!(
                out,
                "{}{}{} [table: {}]",
                indent,
                label,
                marker,
                descriptor.join(", ")
            )?;
            let rows: Vec<&Value> = match node {
                Value::Array(arr) => arr.iter().collect(),
                Value::Object(obj) => obj.values().collect(),
                _ => Vec::new(),
            };
            for (i, row) in rows.iter().enumerate() {
                let row_label = match &keys {
                    Some(keys) => keys[i].clone(),
                    None => i.to_string(),
                };
                let cells: Vec<String> = descriptor
                    .iter()
                    .map(|field| edit_text(row.get(field).unwrap_or(&Value::Null)))
                    .collect();
                writeln!(out, "{}  {} | {}", indent, row_label, cells.join(" | "))?;
            }
        }
        NodeView::PropertyGrid { primitives, nested } => {
            writeln!(out, "{}{}{}", indent, label, marker)?;
            for (key, value) in primitives {
                writeln!(out, "{}  {} = {}", indent, key, edit_text(value))?;
            }
            for (key, child) in nested {
                print_node(&key, child, level + 1, config, out)?;
            }
        }
        NodeView::Leaf(value) => {
            writeln!(out, "{}{}{} = {}", indent, label, marker, edit_text(value))?;
        }
    }

    Ok(())
}
