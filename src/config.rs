//! Generation parameters.
//!
//! Values come from three layers: built-in defaults, an optional YAML file,
//! and CLI overrides. `SeedConfig::validate` runs before any output is opened.

use crate::model::OrderStatus;
use anyhow::{bail, Context};
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timestamp format used for the anchor and every emitted datetime
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DEFAULT_CATEGORIES: &[&str] = &[
    "Electronics",
    "Clothing",
    "Food",
    "Books",
    "Household",
    "Sports",
    "Toys",
    "Furniture",
    "Cosmetics",
    "Kitchenware",
];

/// Product catalog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductConfig {
    /// Number of products to generate
    pub count: usize,
    /// Category vocabulary used for product names
    pub categories: Vec<String>,
    pub price_min: i64,
    pub price_max: i64,
    /// Prices are multiples of this amount
    pub price_step: i64,
    pub stock_min: i64,
    pub stock_max: i64,
    /// How far before the activity window product creation dates may go
    pub history_days: i64,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            price_min: 1_000,
            price_max: 100_000,
            price_step: 100,
            stock_min: 50,
            stock_max: 500,
            history_days: 365,
        }
    }
}

/// Product view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub per_product: usize,
    /// Maximum rows per multi-row INSERT
    pub batch_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            per_product: 100,
            batch_size: 1000,
        }
    }
}

/// Relative weight of one order status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusWeight {
    pub status: OrderStatus,
    pub weight: u32,
}

impl StatusWeight {
    fn new(status: OrderStatus, weight: u32) -> Self {
        Self { status, weight }
    }
}

/// Order settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderConfig {
    pub count: usize,
    /// User ids are drawn from `1..=users`
    pub users: i64,
    pub min_items: usize,
    pub max_items: usize,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub statuses: Vec<StatusWeight>,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            users: 100,
            min_items: 5,
            max_items: 5,
            min_quantity: 1,
            max_quantity: 5,
            statuses: vec![
                StatusWeight::new(OrderStatus::Completed, 3),
                StatusWeight::new(OrderStatus::Paid, 1),
                StatusWeight::new(OrderStatus::Pending, 1),
            ],
        }
    }
}

/// Complete generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Reference "now" (`YYYY-MM-DD HH:MM:SS`); the local clock when absent
    pub anchor: Option<String>,
    /// Length of the recent activity window for views and orders
    pub window_days: i64,
    /// Emit `id` columns instead of relying on auto-increment order
    pub explicit_ids: bool,
    pub products: ProductConfig,
    pub views: ViewConfig,
    pub orders: OrderConfig,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed: None,
            anchor: None,
            window_days: 30,
            explicit_ids: true,
            products: ProductConfig::default(),
            views: ViewConfig::default(),
            orders: OrderConfig::default(),
        }
    }
}

impl SeedConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Parse the configured anchor, if any
    pub fn anchor_time(&self) -> anyhow::Result<Option<NaiveDateTime>> {
        match self.anchor {
            Some(ref s) => parse_datetime(s).map(Some),
            None => Ok(None),
        }
    }

    /// Number of product views the configuration produces, `None` on overflow
    pub fn total_views(&self) -> Option<usize> {
        self.products.count.checked_mul(self.views.per_product)
    }

    /// Largest order total the configuration can produce, `None` on overflow
    pub fn max_order_total(&self) -> Option<i64> {
        let max_items = i64::try_from(self.orders.max_items).ok()?;
        self.products
            .price_max
            .checked_mul(self.orders.max_quantity)?
            .checked_mul(max_items)
    }

    /// Resolve the product history and activity windows ending at `anchor`
    pub fn time_windows(&self, anchor: NaiveDateTime) -> anyhow::Result<TimeWindows> {
        let window = TimeDelta::try_days(self.window_days)
            .with_context(|| format!("window_days is out of range: {}", self.window_days))?;
        let window_start = anchor.checked_sub_signed(window).with_context(|| {
            format!(
                "window_days ({}) reaches before the earliest supported date",
                self.window_days
            )
        })?;

        let history = TimeDelta::try_days(self.products.history_days).with_context(|| {
            format!(
                "products.history_days is out of range: {}",
                self.products.history_days
            )
        })?;
        let history_start = window_start.checked_sub_signed(history).with_context(|| {
            format!(
                "products.history_days ({}) reaches before the earliest supported date",
                self.products.history_days
            )
        })?;

        Ok(TimeWindows {
            history_start,
            window_start,
            anchor,
        })
    }

    /// Check every constraint the generator relies on
    pub fn validate(&self) -> anyhow::Result<()> {
        let p = &self.products;
        let v = &self.views;
        let o = &self.orders;

        if p.count == 0 {
            bail!("products.count must be greater than 0");
        }
        if p.categories.is_empty() {
            bail!("products.categories must not be empty");
        }
        if p.price_step <= 0 {
            bail!("products.price_step must be greater than 0");
        }
        if p.price_min <= 0 || p.price_min > p.price_max {
            bail!(
                "products price range is invalid: {}..={}",
                p.price_min,
                p.price_max
            );
        }
        if p.price_min % p.price_step != 0 || p.price_max % p.price_step != 0 {
            bail!(
                "products.price_min and price_max must be multiples of price_step ({})",
                p.price_step
            );
        }
        if p.stock_min < 0 || p.stock_min > p.stock_max {
            bail!(
                "products stock range is invalid: {}..={}",
                p.stock_min,
                p.stock_max
            );
        }
        if p.history_days < 0 {
            bail!("products.history_days must not be negative");
        }
        if self.window_days <= 0 {
            bail!("window_days must be greater than 0");
        }
        if v.batch_size == 0 {
            bail!("views.batch_size must be greater than 0");
        }
        if o.users < 1 {
            bail!("orders.users must be at least 1");
        }
        if o.min_items == 0 || o.min_items > o.max_items {
            bail!(
                "orders item range is invalid: {}..={}",
                o.min_items,
                o.max_items
            );
        }
        if o.max_items > p.count {
            bail!(
                "orders.max_items ({}) exceeds products.count ({}); items are drawn without repetition",
                o.max_items,
                p.count
            );
        }
        if o.min_quantity < 1 || o.min_quantity > o.max_quantity {
            bail!(
                "orders quantity range is invalid: {}..={}",
                o.min_quantity,
                o.max_quantity
            );
        }
        if o.statuses.iter().all(|s| s.weight == 0) {
            bail!("orders.statuses needs at least one status with a positive weight");
        }
        if self.total_views().is_none() {
            bail!(
                "products.count ({}) x views.per_product ({}) overflows",
                p.count,
                v.per_product
            );
        }
        if self.max_order_total().is_none() {
            bail!(
                "products.price_max ({}) x orders.max_quantity ({}) x orders.max_items ({}) overflows an order total",
                p.price_max,
                o.max_quantity,
                o.max_items
            );
        }
        if let Some(anchor) = self.anchor_time()? {
            self.time_windows(anchor)?;
        }

        Ok(())
    }
}

/// Time bounds for generated timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindows {
    /// Earliest product creation time
    pub history_start: NaiveDateTime,
    /// Start of the activity window; latest product creation time
    pub window_start: NaiveDateTime,
    /// End of the activity window for views and orders
    pub anchor: NaiveDateTime,
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp
pub fn parse_datetime(s: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
        .with_context(|| format!("Invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SeedConfig::default();
        config.validate().unwrap();
        assert_eq!(config.total_views(), Some(100_000));
        assert_eq!(config.max_order_total(), Some(100_000 * 5 * 5));
        assert_eq!(config.orders.min_items, 5);
        assert_eq!(config.orders.max_items, 5);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
seed: 7
anchor: "2025-01-31 12:00:00"
products:
  count: 20
orders:
  count: 3
  statuses:
    - status: PAID
      weight: 1
"#;
        let config = SeedConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.products.count, 20);
        assert_eq!(config.products.price_step, 100);
        assert_eq!(config.views.batch_size, 1000);
        assert_eq!(config.orders.count, 3);
        assert_eq!(config.orders.statuses.len(), 1);
        assert_eq!(config.orders.statuses[0].status, OrderStatus::Paid);
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(SeedConfig::from_yaml("prodcts:\n  count: 3\n").is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = SeedConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(SeedConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_too_many_items_per_order() {
        let mut config = SeedConfig::default();
        config.products.count = 3;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_items"), "{}", err);
    }

    #[test]
    fn test_price_bounds_must_align_with_step() {
        let mut config = SeedConfig::default();
        config.products.price_min = 1_050;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_weights_rejected() {
        let mut config = SeedConfig::default();
        for s in &mut config.orders.statuses {
            s.weight = 0;
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_anchor_rejected() {
        let config = SeedConfig {
            anchor: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_time_windows() {
        let config = SeedConfig::default();
        let anchor = parse_datetime("2025-03-31 12:00:00").unwrap();
        let windows = config.time_windows(anchor).unwrap();
        assert_eq!(windows.anchor, anchor);
        assert_eq!(
            windows.window_start,
            parse_datetime("2025-03-01 12:00:00").unwrap()
        );
        assert_eq!(
            windows.history_start,
            parse_datetime("2024-03-01 12:00:00").unwrap()
        );
    }

    #[test]
    fn test_huge_window_days_rejected() {
        let config = SeedConfig {
            anchor: Some("2025-01-01 00:00:00".to_string()),
            window_days: 1_000_000_000_000,
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("window_days"), "{}", err);
    }

    #[test]
    fn test_huge_history_days_rejected() {
        let mut config = SeedConfig {
            anchor: Some("2025-01-01 00:00:00".to_string()),
            ..Default::default()
        };
        config.products.history_days = 200_000_000;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("history_days"), "{}", err);

        // Without a configured anchor the check runs against the run's anchor
        config.anchor = None;
        config.validate().unwrap();
        let anchor = parse_datetime("2025-01-01 00:00:00").unwrap();
        assert!(config.time_windows(anchor).is_err());
    }

    #[test]
    fn test_order_total_overflow_rejected() {
        let mut config = SeedConfig::default();
        config.products.price_max = i64::MAX / 100 * 100;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("overflows"), "{}", err);

        let mut config = SeedConfig::default();
        config.orders.max_quantity = i64::MAX / 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_view_count_overflow_rejected() {
        let mut config = SeedConfig::default();
        config.views.per_product = usize::MAX;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("views.per_product"), "{}", err);
    }
}
