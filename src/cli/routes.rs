//! `traject routes` - list installed routes.

use owo_colors::OwoColorize;
use traject::route::RouteTable;

pub fn run(table: &RouteTable, dump: bool) {
    if dump {
        print!("{}", table.patterns().dump());
        return;
    }

    let width = table
        .routes()
        .iter()
        .map(|route| route.pattern.len())
        .max()
        .unwrap_or(0);

    for route in table.routes() {
        let locate = if route.locate { "" } else { " (not located)" };
        println!(
            "{:<width$}  {}{}",
            route.pattern,
            route.kind.cyan(),
            locate.dimmed()
        );
    }
}
