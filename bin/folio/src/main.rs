//! Folio CLI
//!
//! Builds and serves a portfolio site wrapped in a shared header, footer and
//! document shell.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "A portfolio site builder with a shared page shell"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the site
    Build {
        /// Output directory (defaults to `build.output_dir`)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Override site base URL (e.g., https://example.com)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Start development server with live reload
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },
    /// Validate configuration, links and assets
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Write a starter configuration and page fragments
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, base_url } => {
            folio::cmd::build::run(&cli.config, output.as_deref(), base_url.as_deref())?;
        }
        Commands::Serve { port, open } => {
            folio::cmd::serve::run(&cli.config, port, open).await?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Init { force } => {
            folio::cmd::init::run(&cli.config, force)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let cli = Cli::parse_from(["folio", "build", "--output", "dist"]);

        assert_eq!(cli.config, std::path::PathBuf::from("folio.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build { output, base_url } => {
                assert_eq!(output, Some(std::path::PathBuf::from("dist")));
                assert!(base_url.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_defaults() {
        let cli = Cli::parse_from(["folio", "build", "--base-url", "https://example.com"]);

        match cli.command {
            Commands::Build { output, base_url } => {
                assert!(output.is_none());
                assert_eq!(base_url.as_deref(), Some("https://example.com"));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_serve_command_parsing() {
        let cli = Cli::parse_from(["folio", "serve", "--port", "8080", "--open"]);

        match cli.command {
            Commands::Serve { port, open } => {
                assert_eq!(port, 8080);
                assert!(open);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_check_and_init_parsing() {
        let cli = Cli::parse_from(["folio", "check", "--strict"]);
        assert!(matches!(cli.command, Commands::Check { strict: true }));

        let cli = Cli::parse_from(["folio", "-c", "site/folio.toml", "init", "--force"]);
        assert_eq!(cli.config, std::path::PathBuf::from("site/folio.toml"));
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["folio", "-vvv", "build"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["folio"]).is_err());
    }
}
