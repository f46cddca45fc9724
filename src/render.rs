//! SQL rendering for seed records (MySQL syntax).

use crate::config::DATETIME_FORMAT;
use crate::model::{Order, OrderItem, Product, ProductView};
use chrono::NaiveDateTime;

/// SQL value representation
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    String(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl SqlValue {
    /// Format for a MySQL INSERT statement
    pub fn to_mysql(&self) -> String {
        match self {
            SqlValue::Int(n) => n.to_string(),
            SqlValue::String(s) => format!("'{}'", escape_mysql_string(s)),
            SqlValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            SqlValue::DateTime(dt) => format!("'{}'", dt.format(DATETIME_FORMAT)),
        }
    }
}

pub fn escape_mysql_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Target tables, listed in truncation order (children first)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    ProductViews,
    OrderItems,
    Orders,
    Products,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::ProductViews,
        Table::OrderItems,
        Table::Orders,
        Table::Products,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::ProductViews => "product_views",
            Table::OrderItems => "order_items",
            Table::Orders => "orders",
            Table::Products => "products",
        }
    }

    /// Data columns, excluding `id`
    fn data_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Products => &[
                "name",
                "description",
                "price",
                "stock_quantity",
                "view_count",
                "is_active",
                "created_at",
                "updated_at",
            ],
            Table::ProductViews => &["product_id", "viewed_at"],
            Table::Orders => &[
                "user_id",
                "order_number",
                "total_amount",
                "discount_amount",
                "final_amount",
                "status",
                "created_at",
                "updated_at",
                "version",
            ],
            Table::OrderItems => &[
                "order_id",
                "product_id",
                "product_name",
                "price",
                "quantity",
                "status",
                "created_at",
                "updated_at",
            ],
        }
    }

    /// Parenthesized column list for INSERT statements
    pub fn column_list(&self, explicit_ids: bool) -> String {
        let data = self.data_columns().join(", ");
        if explicit_ids {
            format!("(id, {})", data)
        } else {
            format!("({})", data)
        }
    }

    pub fn truncate_statement(&self) -> String {
        format!("TRUNCATE TABLE {};", self.name())
    }
}

/// A record that renders to one row of a target table
pub trait SqlRow {
    const TABLE: Table;

    fn id(&self) -> i64;

    /// Values in `data_columns` order, without the id
    fn data_values(&self) -> Vec<SqlValue>;

    fn values(&self, explicit_ids: bool) -> Vec<SqlValue> {
        let mut values = Vec::with_capacity(Self::TABLE.data_columns().len() + 1);
        if explicit_ids {
            values.push(SqlValue::Int(self.id()));
        }
        values.extend(self.data_values());
        values
    }

    /// `(v1, v2, ...)` tuple for a VALUES clause
    fn value_tuple(&self, explicit_ids: bool) -> String {
        let parts: Vec<String> = self
            .values(explicit_ids)
            .iter()
            .map(SqlValue::to_mysql)
            .collect();
        format!("({})", parts.join(", "))
    }

    /// Single-row INSERT statement
    fn insert_statement(&self, explicit_ids: bool) -> String {
        format!(
            "INSERT INTO {} {} VALUES {};",
            Self::TABLE.name(),
            Self::TABLE.column_list(explicit_ids),
            self.value_tuple(explicit_ids)
        )
    }
}

/// Multi-row INSERT statement, one tuple per line. `rows` must not be empty.
pub fn batch_insert_statement<T: SqlRow>(rows: &[T], explicit_ids: bool) -> String {
    let tuples: Vec<String> = rows.iter().map(|r| r.value_tuple(explicit_ids)).collect();
    format!(
        "INSERT INTO {} {} VALUES\n{};",
        T::TABLE.name(),
        T::TABLE.column_list(explicit_ids),
        tuples.join(",\n")
    )
}

impl SqlRow for Product {
    const TABLE: Table = Table::Products;

    fn id(&self) -> i64 {
        self.id
    }

    fn data_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::String(self.name.clone()),
            SqlValue::String(self.description.clone()),
            SqlValue::Int(self.price),
            SqlValue::Int(self.stock_quantity),
            SqlValue::Int(self.view_count),
            SqlValue::Bool(self.is_active),
            SqlValue::DateTime(self.created_at),
            SqlValue::DateTime(self.updated_at),
        ]
    }
}

impl SqlRow for ProductView {
    const TABLE: Table = Table::ProductViews;

    fn id(&self) -> i64 {
        self.id
    }

    fn data_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(self.product_id),
            SqlValue::DateTime(self.viewed_at),
        ]
    }
}

impl SqlRow for Order {
    const TABLE: Table = Table::Orders;

    fn id(&self) -> i64 {
        self.id
    }

    fn data_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(self.user_id),
            SqlValue::String(self.order_number.clone()),
            SqlValue::Int(self.total_amount),
            SqlValue::Int(self.discount_amount),
            SqlValue::Int(self.final_amount),
            SqlValue::String(self.status.as_str().to_string()),
            SqlValue::DateTime(self.created_at),
            SqlValue::DateTime(self.updated_at),
            SqlValue::Int(self.version),
        ]
    }
}

impl SqlRow for OrderItem {
    const TABLE: Table = Table::OrderItems;

    fn id(&self) -> i64 {
        self.id
    }

    fn data_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(self.order_id),
            SqlValue::Int(self.product_id),
            SqlValue::String(self.product_name.clone()),
            SqlValue::Int(self.price),
            SqlValue::Int(self.quantity),
            SqlValue::String(self.status.as_str().to_string()),
            SqlValue::DateTime(self.created_at),
            SqlValue::DateTime(self.updated_at),
        ]
    }
}
