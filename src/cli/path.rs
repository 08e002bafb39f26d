//! `traject path` - render the path of a record.

use anyhow::{Context, Result};
use traject::route::RouteTable;

pub fn run(table: &RouteTable, kind: &str, vars: &[(String, String)]) -> Result<()> {
    let record = table.record(kind, vars)?;
    let path = table
        .path(&record)
        .with_context(|| format!("cannot locate `{kind}`"))?;
    println!("{path}");
    Ok(())
}
