//! Generate command CLI handler.

use shop_seed::config::SeedConfig;
use shop_seed::runner::{self, OutputTarget, RunOptions, Summary};
use std::path::PathBuf;

pub struct GenerateArgs {
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub anchor: Option<String>,
    pub products: Option<usize>,
    pub views_per_product: Option<usize>,
    pub orders: Option<usize>,
    pub items_per_order: Option<usize>,
    pub users: Option<i64>,
    pub batch_size: Option<usize>,
    pub implicit_ids: bool,
    pub progress: bool,
    pub json: bool,
    pub dry_run: bool,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;

    let output = if args.dry_run {
        OutputTarget::Discard
    } else {
        OutputTarget::from_arg(&args.output)
    };
    let to_stdout = output == OutputTarget::Stdout;

    if args.json && to_stdout {
        anyhow::bail!("--json cannot be combined with writing the script to stdout");
    }

    let summary = runner::run(RunOptions {
        config,
        output,
        progress: args.progress,
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !to_stdout {
        print_summary(&summary, args.dry_run);
    }

    Ok(())
}

/// Layer CLI overrides on top of the YAML file (or the defaults)
fn build_config(args: &GenerateArgs) -> anyhow::Result<SeedConfig> {
    let mut config = match args.config {
        Some(ref path) => SeedConfig::load(path)?,
        None => SeedConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.anchor.is_some() {
        config.anchor = args.anchor.clone();
    }
    if let Some(n) = args.products {
        config.products.count = n;
    }
    if let Some(n) = args.views_per_product {
        config.views.per_product = n;
    }
    if let Some(n) = args.orders {
        config.orders.count = n;
    }
    if let Some(n) = args.items_per_order {
        config.orders.min_items = n;
        config.orders.max_items = n;
    }
    if let Some(n) = args.users {
        config.orders.users = n;
    }
    if let Some(n) = args.batch_size {
        config.views.batch_size = n;
    }
    if args.implicit_ids {
        config.explicit_ids = false;
    }

    config.validate()?;
    Ok(config)
}

fn print_summary(summary: &Summary, dry_run: bool) {
    if dry_run {
        eprintln!("Dry run: nothing written");
    } else {
        eprintln!("SQL file generated: {}", summary.output);
    }
    eprintln!();
    eprintln!("Generated data:");
    eprintln!("  Products:      {}", summary.products);
    eprintln!("  Product views: {}", summary.product_views);
    eprintln!("  Orders:        {}", summary.orders);
    eprintln!("  Order items:   {}", summary.order_items);
    eprintln!(
        "  Statements:    {} ({} bytes, {} ms)",
        summary.statements, summary.bytes_written, summary.elapsed_ms
    );
    eprintln!("  Seed:          {} (anchor {})", summary.seed, summary.anchor);

    if !dry_run {
        eprintln!();
        eprintln!("To load it:");
        if summary.output.ends_with(".gz") {
            eprintln!(
                "  gunzip -c {} | mysql -u <user> -p <database>",
                summary.output
            );
        } else {
            eprintln!("  mysql -u <user> -p <database> < {}", summary.output);
            eprintln!("  or, from the MySQL console: source {};", summary.output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GenerateArgs {
        GenerateArgs {
            output: PathBuf::from("out.sql"),
            config: None,
            seed: None,
            anchor: None,
            products: None,
            views_per_product: None,
            orders: None,
            items_per_order: None,
            users: None,
            batch_size: None,
            implicit_ids: false,
            progress: false,
            json: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_overrides_apply() {
        let mut a = args();
        a.seed = Some(9);
        a.products = Some(12);
        a.items_per_order = Some(3);
        a.implicit_ids = true;

        let config = build_config(&a).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.products.count, 12);
        assert_eq!(config.orders.min_items, 3);
        assert_eq!(config.orders.max_items, 3);
        assert!(!config.explicit_ids);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut a = args();
        a.products = Some(2);
        assert!(build_config(&a).is_err());
    }
}
