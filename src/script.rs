//! Seed script layout.
//!
//! Writes a dataset as one MySQL script: FK checks disabled, tables
//! truncated, rows inserted parents-first, FK checks re-enabled, and a
//! trailing row-count footer.

use crate::config::DATETIME_FORMAT;
use crate::model::Dataset;
use crate::render::{batch_insert_statement, SqlRow, Table};
use crate::writer::StatementWriter;
use chrono::NaiveDateTime;
use indicatif::ProgressBar;
use std::io::{self, Write};

/// Script-level settings that do not affect the generated data
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    pub anchor: NaiveDateTime,
    pub seed: u64,
    pub explicit_ids: bool,
    /// Maximum rows per product view INSERT
    pub batch_size: usize,
}

/// Write the full script for `data`
pub fn write_script<W: Write>(
    data: &Dataset,
    opts: &ScriptOptions,
    out: &mut StatementWriter<W>,
    progress: Option<&ProgressBar>,
) -> io::Result<()> {
    write_header(opts, out)?;

    out.write_statement("SET FOREIGN_KEY_CHECKS = 0;")?;
    out.blank_line()?;

    out.write_comment("Clear existing data")?;
    for table in Table::ALL {
        out.write_statement(&table.truncate_statement())?;
    }
    out.blank_line()?;

    out.write_comment(&format!("Products ({})", data.products.len()))?;
    for product in &data.products {
        out.write_statement(&product.insert_statement(opts.explicit_ids))?;
    }
    out.blank_line()?;

    out.write_comment(&format!("Product views ({})", data.views.len()))?;
    for batch in data.views.chunks(opts.batch_size.max(1)) {
        out.write_statement(&batch_insert_statement(batch, opts.explicit_ids))?;
        out.blank_line()?;
    }
    out.blank_line()?;

    out.write_comment(&format!("Orders ({})", data.orders.len()))?;
    for order in &data.orders {
        out.write_statement(&order.insert_statement(opts.explicit_ids))?;
        for item in &order.items {
            out.write_statement(&item.insert_statement(opts.explicit_ids))?;
        }
        out.blank_line()?;
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    out.write_statement("SET FOREIGN_KEY_CHECKS = 1;")?;
    out.blank_line()?;

    write_footer(data, out)
}

fn write_header<W: Write>(opts: &ScriptOptions, out: &mut StatementWriter<W>) -> io::Result<()> {
    out.write_comment("Seed data: products, product views, orders, order items")?;
    out.write_comment(&format!(
        "Generated at: {}",
        opts.anchor.format(DATETIME_FORMAT)
    ))?;
    out.write_comment(&format!("Seed: {}", opts.seed))?;
    if opts.explicit_ids {
        out.write_comment("Identities: explicit id columns")?;
    } else {
        out.write_comment(
            "Identities: assigned by AUTO_INCREMENT; references assume ids 1..n in insertion order",
        )?;
    }
    out.blank_line()
}

fn write_footer<W: Write>(data: &Dataset, out: &mut StatementWriter<W>) -> io::Result<()> {
    out.write_comment("Generation complete")?;
    out.write_comment(&format!("Products: {}", data.products.len()))?;
    out.write_comment(&format!("Product views: {}", data.views.len()))?;
    out.write_comment(&format!("Orders: {}", data.orders.len()))?;
    out.write_comment(&format!("Order items: {}", data.item_count()))
}
