mod contact;
mod error;
mod shell;
mod trie;

use std::{fs::File, path::PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::shell::{execute_shell, ShellArgs};

/// Keeps contacts in memory and looks them up by name prefix.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "An in-memory contact directory with case-insensitive prefix search."
)]
struct Cli {
    /// File that log output is written to. Stdout is left to the menu.
    #[arg(long, default_value = "contactbook.log")]
    log_file: PathBuf,

    /// Verbosity level (-v, -vv). Without it RUST_LOG is used, defaulting to info.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    shell: ShellArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let file = File::create(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(file)
        .init();

    info!("Logging to {}", cli.log_file.display());

    execute_shell(cli.shell).await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::shell::OutputFormat;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_author(), Some("contactbook developers"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["contactbook"]).unwrap();
        assert_eq!(cli.log_file, PathBuf::from("contactbook.log"));
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.shell.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "contactbook",
            "--format",
            "json",
            "--log-file",
            "/tmp/contacts.log",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.shell.format, OutputFormat::Json);
        assert_eq!(cli.log_file, PathBuf::from("/tmp/contacts.log"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["contactbook", "--format", "xml"]).is_err());
    }
}
