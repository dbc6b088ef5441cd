use std::time::Instant;

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use storelens_core::{Table, TableName, TableSet, Value};

use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::csv::write_table_set;

const CITIES: [&str; 7] = [
    "São Paulo",
    "Rio de Janeiro",
    "Belo Horizonte",
    "Salvador",
    "Brasília",
    "Fortaleza",
    "Curitiba",
];

const STATES: [&str; 7] = ["SP", "RJ", "MG", "BA", "DF", "CE", "PR"];

const CATEGORIES: [&str; 7] = [
    "Electronics",
    "Fashion",
    "Home",
    "Sports",
    "Books",
    "Beauty",
    "Health",
];

const STATUS_WEIGHTS: [(&str, f64); 4] = [
    ("delivered", 0.70),
    ("shipped", 0.15),
    ("processing", 0.10),
    ("canceled", 0.05),
];

const SCORE_WEIGHTS: [(i64, f64); 5] = [
    (1, 0.05),
    (2, 0.10),
    (3, 0.15),
    (4, 0.30),
    (5, 0.40),
];

/// Entry point for generating the synthetic dataset.
#[derive(Debug, Clone)]
pub struct Generator {
    options: GenerateOptions,
}

struct OrderRecord {
    id: String,
    purchase: NaiveDateTime,
    delivered: Option<NaiveDateTime>,
}

impl Generator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate all six tables; same seed, same bytes.
    pub fn run(&self) -> Result<(TableSet, GenerationReport), GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = GenerationReport::new(run_id.clone(), self.options.seed);

        info!(
            run_id = %run_id,
            seed = self.options.seed,
            orders = self.options.orders,
            "generation started"
        );

        let customer_ids = id_pool("CUST", self.options.customers);
        let product_ids = id_pool("PROD", self.options.products);
        let seller_ids = id_pool("SELL", self.options.sellers);

        let customers = self.generate_customers(&customer_ids)?;
        let products = self.generate_products(&product_ids)?;
        let sellers = self.generate_sellers(&seller_ids)?;
        let (orders, order_records) = self.generate_orders(&customer_ids)?;
        let order_items = self.generate_order_items(&order_records, &product_ids, &seller_ids)?;
        let reviews = self.generate_reviews(&order_records)?;

        let mut set = TableSet::new();
        for (name, table) in [
            (TableName::Customers, customers),
            (TableName::Products, products),
            (TableName::Sellers, sellers),
            (TableName::Orders, orders),
            (TableName::OrderItems, order_items),
            (TableName::Reviews, reviews),
        ] {
            report.record_table(name, table.row_count() as u64);
            info!(table = %name, rows = table.row_count(), "table generated");
            set.insert(name, table);
        }

        if let Some(out_dir) = &self.options.out_dir {
            report.bytes_written = write_table_set(out_dir, &self.options.file_prefix, &set)?;
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok((set, report))
    }

    fn generate_customers(&self, ids: &[String]) -> Result<Table, GenerationError> {
        let mut rng = table_rng(self.options.seed, TableName::Customers);
        let mut rows = Vec::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            rows.push(vec![
                Value::Text(id.clone()),
                Value::Text(format!("UNIQ_{:06}", index + 1)),
                Value::Int(rng.random_range(10000..=99999)),
                Value::Text(pick(&mut rng, &CITIES).to_string()),
                Value::Text(pick(&mut rng, &STATES).to_string()),
            ]);
        }
        let table = Table::new(
            columns(&[
                "customer_id",
                "customer_unique_id",
                "customer_zip_code_prefix",
                "customer_city",
                "customer_state",
            ]),
            rows,
        )?;
        Ok(table)
    }

    fn generate_products(&self, ids: &[String]) -> Result<Table, GenerationError> {
        let mut rng = table_rng(self.options.seed, TableName::Products);
        let mut rows = Vec::with_capacity(ids.len());
        for id in ids {
            rows.push(vec![
                Value::Text(id.clone()),
                Value::Text(pick(&mut rng, &CATEGORIES).to_string()),
                Value::Int(rng.random_range(20..=80)),
                Value::Int(rng.random_range(100..=500)),
                Value::Int(rng.random_range(1..=10)),
                Value::Int(rng.random_range(50..=5000)),
                Value::Int(rng.random_range(5..=50)),
                Value::Int(rng.random_range(2..=30)),
                Value::Int(rng.random_range(5..=40)),
            ]);
        }
        let table = Table::new(
            columns(&[
                "product_id",
                "product_category_name",
                "product_name_length",
                "product_description_length",
                "product_photos_qty",
                "product_weight_g",
                "product_length_cm",
                "product_height_cm",
                "product_width_cm",
            ]),
            rows,
        )?;
        Ok(table)
    }

    fn generate_sellers(&self, ids: &[String]) -> Result<Table, GenerationError> {
        let mut rng = table_rng(self.options.seed, TableName::Sellers);
        let mut rows = Vec::with_capacity(ids.len());
        for id in ids {
            // Sellers cluster in the four largest markets.
            rows.push(vec![
                Value::Text(id.clone()),
                Value::Int(rng.random_range(10000..=99999)),
                Value::Text(pick(&mut rng, &CITIES[..4]).to_string()),
                Value::Text(pick(&mut rng, &STATES[..4]).to_string()),
            ]);
        }
        let table = Table::new(
            columns(&[
                "seller_id",
                "seller_zip_code_prefix",
                "seller_city",
                "seller_state",
            ]),
            rows,
        )?;
        Ok(table)
    }

    fn generate_orders(
        &self,
        customer_ids: &[String],
    ) -> Result<(Table, Vec<OrderRecord>), GenerationError> {
        if self.options.orders > 0 && customer_ids.is_empty() {
            return Err(GenerationError::EmptyPool(
                "orders require at least one customer".to_string(),
            ));
        }

        let mut rng = table_rng(self.options.seed, TableName::Orders);
        let window_start = self
            .options
            .start_date
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default();

        let mut rows = Vec::with_capacity(self.options.orders as usize);
        let mut records = Vec::with_capacity(self.options.orders as usize);
        for index in 0..self.options.orders {
            let id = format!("ORD_{:08}", index + 1);
            let customer = pick(&mut rng, customer_ids).clone();
            let status = *pick_weighted(&mut rng, &STATUS_WEIGHTS);
            let purchase =
                window_start + Duration::days(rng.random_range(0..=self.options.date_span_days) as i64);
            let approved = purchase + Duration::hours(rng.random_range(1..=48));
            let carrier = purchase + Duration::days(rng.random_range(1..=5));
            // Customer delivery stays null unless the order was delivered.
            let delivered = if status == "delivered" {
                Some(purchase + Duration::days(rng.random_range(3..=15)))
            } else {
                None
            };
            let estimated = purchase + Duration::days(rng.random_range(7..=30));

            rows.push(vec![
                Value::Text(id.clone()),
                Value::Text(customer),
                Value::Text(status.to_string()),
                Value::Timestamp(purchase),
                Value::Timestamp(approved),
                Value::Timestamp(carrier),
                delivered.map(Value::Timestamp).unwrap_or(Value::Null),
                Value::Timestamp(estimated),
            ]);
            records.push(OrderRecord {
                id,
                purchase,
                delivered,
            });
        }

        let table = Table::new(
            columns(&[
                "order_id",
                "customer_id",
                "order_status",
                "order_purchase_timestamp",
                "order_approved_at",
                "order_delivered_carrier_date",
                "order_delivered_customer_date",
                "order_estimated_delivery_date",
            ]),
            rows,
        )?;
        Ok((table, records))
    }

    fn generate_order_items(
        &self,
        orders: &[OrderRecord],
        product_ids: &[String],
        seller_ids: &[String],
    ) -> Result<Table, GenerationError> {
        if !orders.is_empty() && (product_ids.is_empty() || seller_ids.is_empty()) {
            return Err(GenerationError::EmptyPool(
                "order items require products and sellers".to_string(),
            ));
        }

        let mut rng = table_rng(self.options.seed, TableName::OrderItems);
        let mut rows = Vec::new();
        for order in orders {
            let items = rng.random_range(1..=4);
            for item in 1..=items {
                let price = round2(rng.random_range(10.0..500.0));
                rows.push(vec![
                    Value::Text(order.id.clone()),
                    Value::Int(item),
                    Value::Text(pick(&mut rng, product_ids).clone()),
                    Value::Text(pick(&mut rng, seller_ids).clone()),
                    Value::Timestamp(order.purchase + Duration::days(7)),
                    Value::Float(price),
                    Value::Float(round2(price * 0.1)),
                ]);
            }
        }

        let table = Table::new(
            columns(&[
                "order_id",
                "order_item_id",
                "product_id",
                "seller_id",
                "shipping_limit_date",
                "price",
                "freight_value",
            ]),
            rows,
        )?;
        Ok(table)
    }

    fn generate_reviews(&self, orders: &[OrderRecord]) -> Result<Table, GenerationError> {
        let mut rng = table_rng(self.options.seed, TableName::Reviews);
        let delivered: Vec<&OrderRecord> = orders
            .iter()
            .filter(|order| order.delivered.is_some())
            .collect();
        let count = delivered.len().min(self.options.review_cap as usize);
        let mut picked = rand::seq::index::sample(&mut rng, delivered.len(), count).into_vec();
        picked.sort_unstable();

        let mut rows = Vec::with_capacity(count);
        for (index, order_index) in picked.into_iter().enumerate() {
            let order = delivered[order_index];
            let anchor = order.delivered.unwrap_or(order.purchase);
            rows.push(vec![
                Value::Text(format!("REV_{:08}", index + 1)),
                Value::Text(order.id.clone()),
                Value::Int(*pick_weighted(&mut rng, &SCORE_WEIGHTS)),
                Value::Text(format!("Review for order {}", order.id)),
                Value::Text(format!("Customer feedback for {}", order.id)),
                Value::Timestamp(anchor + Duration::days(rng.random_range(0..=7))),
                Value::Null,
            ]);
        }

        let table = Table::new(
            columns(&[
                "review_id",
                "order_id",
                "review_score",
                "review_comment_title",
                "review_comment_message",
                "review_creation_date",
                "review_answer_timestamp",
            ]),
            rows,
        )?;
        Ok(table)
    }
}

fn id_pool(prefix: &str, count: u64) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}_{i:06}")).collect()
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn pick<'a, T>(rng: &mut ChaCha8Rng, pool: &'a [T]) -> &'a T {
    &pool[rng.random_range(0..pool.len())]
}

fn pick_weighted<'a, T>(rng: &mut ChaCha8Rng, choices: &'a [(T, f64)]) -> &'a T {
    let total: f64 = choices.iter().map(|(_, weight)| *weight).sum();
    let mut roll = rng.random_range(0.0..total);
    for (value, weight) in choices {
        if roll < *weight {
            return value;
        }
        roll -= *weight;
    }
    &choices[choices.len() - 1].0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive a per-table RNG stream from the run seed.
fn table_rng(seed: u64, table: TableName) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed, table.as_str()))
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_pick_is_exhaustive() {
        let mut rng = table_rng(1, TableName::Orders);
        for _ in 0..200 {
            let status = *pick_weighted(&mut rng, &STATUS_WEIGHTS);
            assert!(STATUS_WEIGHTS.iter().any(|(name, _)| *name == status));
        }
    }

    #[test]
    fn table_streams_are_independent() {
        let mut a = table_rng(42, TableName::Customers);
        let mut b = table_rng(42, TableName::Orders);
        let draws_a: Vec<u64> = (0..4).map(|_| a.random_range(0..u64::MAX)).collect();
        let draws_b: Vec<u64> = (0..4).map(|_| b.random_range(0..u64::MAX)).collect();
        assert_ne!(draws_a, draws_b);
    }
}
