//! `traject resolve` - resolve a path and print the record chain.

use std::rc::Rc;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use traject::Variables;
use traject::core::join_path;
use traject::route::{Record, RouteTable};

use super::ResolveArgs;

/// One record on the chain from the root.
#[derive(Debug, Serialize)]
struct ChainEntry {
    /// Segment that produced the record (`None` for the root).
    name: Option<String>,
    kind: String,
    vars: Variables,
}

/// Resolution report, printed as text or JSON.
#[derive(Debug, Serialize)]
struct Report {
    path: String,
    consumed: Vec<String>,
    unconsumed: Vec<String>,
    chain: Vec<ChainEntry>,
}

pub fn run(table: &RouteTable, args: &ResolveArgs) -> Result<()> {
    let report = if args.partial {
        let consumed = table.consume(&args.path);
        Report {
            path: join_path(&consumed.consumed),
            chain: chain(table, &consumed.obj),
            consumed: consumed.consumed,
            unconsumed: consumed.unconsumed,
        }
    } else {
        let record = table.resolve(&args.path)?;
        let chain = chain(table, &record);
        let consumed: Vec<String> = chain.iter().filter_map(|e| e.name.clone()).collect();
        Report {
            path: join_path(&consumed),
            consumed,
            unconsumed: Vec::new(),
            chain,
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Records from the root down to `record`.
fn chain(table: &RouteTable, record: &Rc<Record>) -> Vec<ChainEntry> {
    let patterns = table.patterns();
    let mut lineage = patterns.lineage(record);
    lineage.reverse();

    lineage
        .iter()
        .map(|record| ChainEntry {
            name: patterns.name_of(record),
            kind: record.kind.clone(),
            vars: record.vars.clone(),
        })
        .collect()
}

fn print_report(report: &Report) {
    println!("{}", report.path.bold());
    for entry in &report.chain {
        let name = entry.name.as_deref().unwrap_or("/");
        if entry.kind.is_empty() {
            println!("  {}", name.dimmed());
            continue;
        }
        let vars = entry
            .vars
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {}  {}  {}", name, entry.kind.cyan(), vars.dimmed());
    }
    if !report.unconsumed.is_empty() {
        println!(
            "{} {}",
            "unconsumed:".yellow(),
            join_path(&report.unconsumed)
        );
    }
}
