//! Data generator that produces every record of the seed script.
//!
//! All random draws come from a single ChaCha8 stream, in a fixed order:
//! products, then views (product-major), then orders with their items.
//! The same seed and anchor therefore always produce the same dataset.

use crate::config::{SeedConfig, TimeWindows};
use crate::fake::FakeData;
use crate::model::{Dataset, ItemStatus, Order, OrderItem, Product, ProductView};
use chrono::NaiveDateTime;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Sequential identity source, one counter per table
#[derive(Debug)]
struct IdSequence {
    next: i64,
}

impl IdSequence {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Main data generator
pub struct Generator {
    config: SeedConfig,
    windows: TimeWindows,
    fake: FakeData<ChaCha8Rng>,
}

impl Generator {
    /// Create a generator after validating `config`.
    ///
    /// `anchor` is the reference "now" every time window is derived from.
    pub fn new(config: &SeedConfig, seed: u64, anchor: NaiveDateTime) -> anyhow::Result<Self> {
        config.validate()?;
        let windows = config.time_windows(anchor)?;
        Ok(Self {
            config: config.clone(),
            windows,
            fake: FakeData::new(ChaCha8Rng::seed_from_u64(seed)),
        })
    }

    /// Start of the recent activity window (views and orders)
    pub fn window_start(&self) -> NaiveDateTime {
        self.windows.window_start
    }

    /// Generate products, views and orders
    pub fn generate(&mut self) -> Dataset {
        let products = self.generate_products();
        debug!(count = products.len(), "generated products");

        let views = self.generate_views(&products);
        debug!(count = views.len(), "generated product views");

        let orders = self.generate_orders(&products);
        debug!(count = orders.len(), "generated orders");

        Dataset {
            products,
            views,
            orders,
        }
    }

    fn generate_products(&mut self) -> Vec<Product> {
        let cfg = self.config.products.clone();
        let TimeWindows {
            history_start,
            window_start,
            ..
        } = self.windows;
        let mut ids = IdSequence::new();

        (1..=cfg.count)
            .map(|index| {
                let category = self.fake.pick(&cfg.categories).clone();
                let price = self.fake.price(cfg.price_min, cfg.price_max, cfg.price_step);
                let stock = self.fake.int_range(cfg.stock_min, cfg.stock_max);
                let created = self.fake.datetime_between(history_start, window_start);

                let name = format!("{} Product {:03}", category, index);
                let description = format!(
                    "Detailed description of {}. A high-quality product with high customer satisfaction.",
                    name
                );

                Product {
                    id: ids.next_id(),
                    name,
                    description,
                    price,
                    stock_quantity: stock,
                    view_count: 0,
                    is_active: true,
                    created_at: created,
                    updated_at: created,
                }
            })
            .collect()
    }

    fn generate_views(&mut self, products: &[Product]) -> Vec<ProductView> {
        let per_product = self.config.views.per_product;
        let TimeWindows {
            window_start,
            anchor,
            ..
        } = self.windows;
        let mut ids = IdSequence::new();
        let mut views = Vec::with_capacity(products.len() * per_product);

        for product in products {
            for _ in 0..per_product {
                views.push(ProductView {
                    id: ids.next_id(),
                    product_id: product.id,
                    viewed_at: self.fake.datetime_between(window_start, anchor),
                });
            }
        }

        views
    }

    fn generate_orders(&mut self, products: &[Product]) -> Vec<Order> {
        let cfg = self.config.orders.clone();
        let TimeWindows {
            window_start,
            anchor,
            ..
        } = self.windows;
        let date_prefix = anchor.format("%Y%m%d").to_string();
        let mut order_ids = IdSequence::new();
        let mut item_ids = IdSequence::new();
        let mut orders = Vec::with_capacity(cfg.count);

        for sequence in 1..=cfg.count {
            let order_id = order_ids.next_id();
            let user_id = self.fake.int_range(1, cfg.users);
            let status = self.fake.weighted_status(&cfg.statuses);
            let created = self.fake.datetime_between(window_start, anchor);
            let item_count = self.fake.count_range(cfg.min_items, cfg.max_items);

            let items: Vec<OrderItem> = self
                .fake
                .distinct_ids(products.len(), item_count)
                .into_iter()
                .map(|product_id| {
                    let product = &products[(product_id - 1) as usize];
                    OrderItem {
                        id: item_ids.next_id(),
                        order_id,
                        product_id,
                        product_name: product.name.clone(),
                        price: product.price,
                        quantity: self.fake.int_range(cfg.min_quantity, cfg.max_quantity),
                        status: ItemStatus::Normal,
                        created_at: created,
                        updated_at: created,
                    }
                })
                .collect();

            let total_amount: i64 = items.iter().map(OrderItem::line_total).sum();
            let discount_amount = 0;

            orders.push(Order {
                id: order_id,
                user_id,
                order_number: format!("ORD-{}-{:06}", date_prefix, sequence),
                total_amount,
                discount_amount,
                final_amount: total_amount - discount_amount,
                status,
                created_at: created,
                updated_at: created,
                version: 0,
                items,
            });
        }

        orders
    }
}
