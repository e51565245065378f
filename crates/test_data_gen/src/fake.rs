//! Fake identifier helpers.
//!
//! Provides deterministic table and column names for fixture schemas.

use rand::Rng;

/// Table name stems
const TABLE_NOUNS: &[&str] = &[
    "users", "orders", "products", "invoices", "customers", "payments", "shipments", "accounts",
    "projects", "tasks", "comments", "reviews", "coupons", "vendors", "warehouses", "tickets",
];

/// Column name stems
const COLUMN_WORDS: &[&str] = &[
    "name", "code", "status", "amount", "price", "quantity", "rating", "score", "label", "note",
    "title", "balance", "weight", "region", "channel", "level", "flag", "kind", "source", "ref",
];

/// Fake identifier generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Table name, suffixed with `index` so names stay unique
    pub fn table_name(&mut self, index: usize) -> String {
        let noun = TABLE_NOUNS[self.rng.random_range(0..TABLE_NOUNS.len())];
        format!("{}_{}", noun, index)
    }

    /// Column name, suffixed with `index` so names stay unique in a table
    pub fn column_name(&mut self, index: usize) -> String {
        let word = COLUMN_WORDS[self.rng.random_range(0..COLUMN_WORDS.len())];
        format!("{}_{}", word, index)
    }

    /// Generate a random integer in range
    pub fn int_range(&mut self, min: usize, max: usize) -> usize {
        self.rng.random_range(min..=max)
    }

    /// Generate a boolean with given probability of true
    pub fn bool_with_probability(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }

    /// Pick a random element from a slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }
}
