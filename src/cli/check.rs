//! `traject check` - validate the route table.

use anyhow::Result;
use traject::config::{ConfigError, RouteConfig};
use traject::log;
use traject::route::RouteTable;

/// Install every route and report all failures at once.
pub fn run(config: &RouteConfig) -> Result<()> {
    let (table, diagnostics) = RouteTable::build(config);
    diagnostics.print_warnings();
    diagnostics.into_result().map_err(ConfigError::Diagnostics)?;

    log!("check"; "{}", summary(&table));
    Ok(())
}

/// `3 routes installed, 1 kind locatable`
fn summary(table: &RouteTable) -> String {
    let routes = table.routes().len();
    let kinds = table.patterns().inverse_kinds().len();
    format!(
        "{routes} route{} installed, {kinds} kind{} locatable",
        if routes == 1 { "" } else { "s" },
        if kinds == 1 { "" } else { "s" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use traject::config::RouteEntry;

    #[test]
    fn test_summary() {
        let mut config = RouteConfig {
            routes: vec![RouteEntry::new("a/$x", "a"), RouteEntry::new("a/$x/b", "b")],
            ..RouteConfig::default()
        };
        config.routes[1].locate = false;
        let table = RouteTable::from_config(&config).unwrap();

        assert_eq!(summary(&table), "2 routes installed, 1 kind locatable");
    }

    #[test]
    fn test_run_fails_on_conflict() {
        let config = RouteConfig {
            routes: vec![RouteEntry::new("a/$x", "a"), RouteEntry::new("a/$y", "b")],
            ..RouteConfig::default()
        };
        assert!(run(&config).is_err());
    }
}
