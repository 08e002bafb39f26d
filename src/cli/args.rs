//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use traject::config::CONFIG_FILE;

/// Resolve paths to records and records back to paths
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the route table and report every problem
    #[command(visible_alias = "c")]
    Check,

    /// List installed routes
    #[command(visible_alias = "r")]
    Routes {
        /// Print the raw registry dump instead
        #[arg(short, long)]
        dump: bool,
    },

    /// Resolve a path to its chain of records
    #[command(visible_alias = "s")]
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Build the path of a record from its variables
    #[command(visible_alias = "p")]
    Path {
        /// Kind of the record
        kind: String,

        /// Variable value, repeatable (e.g. -v department_id=1)
        #[arg(short = 'v', long = "var", value_name = "NAME=VALUE", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
    },
}

/// Resolve command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Path to resolve, e.g. departments/1/employees/10
    pub path: String,

    /// Report the longest resolvable prefix instead of failing
    #[arg(short, long)]
    pub partial: bool,

    /// Output JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Parse a `NAME=VALUE` pair.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, found `{s}`"))?;
    if name.is_empty() {
        return Err(format!("missing name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("id=10").unwrap(),
            ("id".to_string(), "10".to_string())
        );
        assert_eq!(
            parse_key_val("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("id").is_err());
        assert!(parse_key_val("=10").is_err());
    }

    #[test]
    fn test_parse_path_command() {
        let cli = Cli::try_parse_from([
            "traject", "p", "employee", "-v", "department_id=1", "--var", "employee_id=10",
        ])
        .unwrap();

        let Commands::Path { kind, vars } = cli.command else {
            panic!("expected path command");
        };
        assert_eq!(kind, "employee");
        assert_eq!(vars.len(), 2);
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn test_parse_resolve_flags() {
        let cli = Cli::try_parse_from(["traject", "-V", "resolve", "a/b", "--partial", "-j"]).unwrap();
        assert!(cli.verbose);

        let Commands::Resolve { args } = cli.command else {
            panic!("expected resolve command");
        };
        assert_eq!(args.path, "a/b");
        assert!(args.partial);
        assert!(args.json);
    }
}
