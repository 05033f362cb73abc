//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Args, Parser, Subcommand};

/// HelpApp API - service marketplace backend
#[derive(Parser, Debug)]
#[command(name = "helpapp-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Insert catalog data
    Seed(SeedArgs),
}

/// Arguments for the serve command. Unset values fall back to the
/// environment configuration.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub target: SeedTarget,
}

/// What to seed
#[derive(Subcommand, Debug)]
pub enum SeedTarget {
    /// Publish a service on behalf of an existing provider
    Service(SeedServiceArgs),
}

#[derive(Args, Debug)]
pub struct SeedServiceArgs {
    /// Email of the provider offering the service
    #[arg(long)]
    pub provider_email: String,

    /// Name of an existing service type
    #[arg(long)]
    pub service_type: String,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_service() {
        let cli = Cli::try_parse_from([
            "helpapp-api",
            "seed",
            "service",
            "--provider-email",
            "pro@example.com",
            "--service-type",
            "Plumbing",
            "--title",
            "Leak repair",
            "--price",
            "80",
        ])
        .unwrap();

        match cli.command {
            Commands::Seed(SeedArgs {
                target: SeedTarget::Service(args),
            }) => {
                assert_eq!(args.provider_email, "pro@example.com");
                assert_eq!(args.service_type, "Plumbing");
                assert_eq!(args.title, "Leak repair");
                assert!(args.description.is_none());
                assert_eq!(args.price, 80.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["helpapp-api", "serve", "--port", "8080"]).unwrap();

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_migrate_requires_action() {
        assert!(Cli::try_parse_from(["helpapp-api", "migrate"]).is_err());
    }
}
