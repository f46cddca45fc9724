mod generate;
mod init_config;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shop-seed")]
#[command(version)]
#[command(about = "Generate SQL seed data for an e-commerce test database", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a seed script with products, views, orders and order items
    Generate {
        /// Output SQL file ("-" for stdout, ".gz" suffix for gzip)
        #[arg(short, long, default_value = "test_data.sql")]
        output: PathBuf,

        /// YAML config file with generation settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Reference time for all date windows (YYYY-MM-DD HH:MM:SS, default: now)
        #[arg(long)]
        anchor: Option<String>,

        /// Number of products
        #[arg(long)]
        products: Option<usize>,

        /// Product views per product
        #[arg(long)]
        views_per_product: Option<usize>,

        /// Number of orders
        #[arg(long)]
        orders: Option<usize>,

        /// Exact number of items per order
        #[arg(long)]
        items_per_order: Option<usize>,

        /// Size of the user id pool (1..=N)
        #[arg(long)]
        users: Option<i64>,

        /// Maximum rows per product view INSERT
        #[arg(long)]
        batch_size: Option<usize>,

        /// Omit id columns and rely on AUTO_INCREMENT insertion order
        #[arg(long)]
        implicit_ids: bool,

        /// Show progress while writing
        #[arg(short, long)]
        progress: bool,

        /// Print the summary as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Generate without writing the output file
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the default configuration as YAML
    InitConfig {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            config,
            seed,
            anchor,
            products,
            views_per_product,
            orders,
            items_per_order,
            users,
            batch_size,
            implicit_ids,
            progress,
            json,
            dry_run,
        } => generate::run(generate::GenerateArgs {
            output,
            config,
            seed,
            anchor,
            products,
            views_per_product,
            orders,
            items_per_order,
            users,
            batch_size,
            implicit_ids,
            progress,
            json,
            dry_run,
        }),
        Commands::InitConfig { output, force } => init_config::run(output, force),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "shop-seed", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["shop-seed", "generate"]);
        match cli.command {
            Commands::Generate {
                output,
                seed,
                implicit_ids,
                ..
            } => {
                assert_eq!(output, PathBuf::from("test_data.sql"));
                assert_eq!(seed, None);
                assert!(!implicit_ids);
            }
            _ => panic!("expected generate"),
        }
    }
}
