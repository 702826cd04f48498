//! # Synthetic Data Generator
//!
//! Demo data for a fresh install: a 30-day sales ledger, a customer roster
//! and a business catalog. Everything is drawn from the supplied
//! [`RandomSource`], so a seeded source gives the same data every time.
//!
//! ```text
//! generate_sales_data(days, today, rng)   15-29 records per day, today first
//! generate_customers(rng)                 CUST001..CUST050
//! generate_catalog(rng)                   PROD001..PROD020
//! default_products()                      P001..P005 inventory
//! ```

use chrono::{Duration, NaiveDate};

use crate::random::RandomSource;
use crate::types::{CatalogEntry, Customer, LoyaltyStatus, PaymentMethod, Product, SalesRecord};

/// Products the synthetic ledger sells.
pub const GROCERY_PRODUCTS: [&str; 15] = [
    "Rice (1kg)",
    "Wheat Flour (1kg)",
    "Onions (1kg)",
    "Potatoes (1kg)",
    "Tomatoes (1kg)",
    "Milk (1L)",
    "Bread",
    "Eggs (12pcs)",
    "Cooking Oil (1L)",
    "Sugar (1kg)",
    "Tea Powder (250g)",
    "Biscuits",
    "Dal (1kg)",
    "Salt (1kg)",
    "Bananas (1kg)",
];

/// Name pool for generated customers (suffixed with the customer number).
pub const CUSTOMER_NAMES: [&str; 12] = [
    "Raj Kumar",
    "Priya Singh",
    "Amit Sharma",
    "Sneha Patel",
    "Vikram Reddy",
    "Anita Gupta",
    "Rohit Jain",
    "Kavya Nair",
    "Suresh Yadav",
    "Meera Devi",
    "Ramesh Kumar",
    "Sunita Sharma",
];

/// (name, category) pairs of the business catalog.
pub const CATALOG: [(&str, &str); 20] = [
    ("Rice (1kg)", "Staples"),
    ("Wheat Flour (1kg)", "Staples"),
    ("Onions (1kg)", "Fresh Vegetables"),
    ("Potatoes (1kg)", "Fresh Vegetables"),
    ("Tomatoes (1kg)", "Fresh Vegetables"),
    ("Milk (1L)", "Dairy"),
    ("Bread", "Bakery"),
    ("Eggs (12pcs)", "Dairy"),
    ("Cooking Oil (1L)", "Cooking Essentials"),
    ("Sugar (1kg)", "Staples"),
    ("Tea Powder (250g)", "Beverages"),
    ("Biscuits", "Snacks"),
    ("Dal (1kg)", "Staples"),
    ("Salt (1kg)", "Cooking Essentials"),
    ("Bananas (1kg)", "Fresh Fruits"),
    ("Apples (1kg)", "Fresh Fruits"),
    ("Yogurt (500g)", "Dairy"),
    ("Soap", "Personal Care"),
    ("Shampoo", "Personal Care"),
    ("Detergent (1kg)", "Household"),
];

/// Number of generated customers.
pub const CUSTOMER_COUNT: usize = 50;

/// Customer ids referenced by the ledger go up to this number.
pub const LEDGER_CUSTOMER_RANGE: i64 = 100;

/// Sales ledger for the `days` days ending on `today`, newest day first.
pub fn generate_sales_data(
    days: usize,
    today: NaiveDate,
    rng: &mut dyn RandomSource,
) -> Vec<SalesRecord> {
    let mut sales = Vec::new();

    for back in 0..days {
        let date = today - Duration::days(back as i64);
        let per_day = rng.int_inclusive(15, 29);

        for _ in 0..per_day {
            let product = GROCERY_PRODUCTS[rng.index(GROCERY_PRODUCTS.len())];
            let quantity = rng.int_inclusive(1, 5) as u32;
            let unit_price_cents = rng.int_inclusive(10, 499) * 100;
            let payment_method =
                PaymentMethod::LEDGER_METHODS[rng.index(PaymentMethod::LEDGER_METHODS.len())];
            let customer_id = format!("CUST{:03}", rng.int_inclusive(1, LEDGER_CUSTOMER_RANGE));

            sales.push(SalesRecord {
                date,
                product: product.to_string(),
                quantity,
                unit_price_cents,
                payment_method,
                customer_id,
            });
        }
    }

    sales
}

/// Customer roster. About 80% are Regular; of those, about 60% may buy on
/// credit. New customers never may.
pub fn generate_customers(rng: &mut dyn RandomSource) -> Vec<Customer> {
    (1..=CUSTOMER_COUNT)
        .map(|i| {
            let is_regular = rng.chance(0.8);
            let name = format!("{} {}", CUSTOMER_NAMES[rng.index(CUSTOMER_NAMES.len())], i);
            let credit_allowed = is_regular && rng.chance(0.6);
            let credit_balance_cents = rng.int_inclusive(100, 1999) * 100;

            Customer {
                id: format!("CUST{:03}", i),
                name,
                email: Some(format!("customer{}@example.com", i)),
                loyalty_status: if is_regular {
                    LoyaltyStatus::Regular
                } else {
                    LoyaltyStatus::New
                },
                credit_allowed,
                credit_balance_cents,
            }
        })
        .collect()
}

/// Business catalog with random stock levels (5-54).
pub fn generate_catalog(rng: &mut dyn RandomSource) -> Vec<CatalogEntry> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(index, (name, category))| CatalogEntry {
            product_id: format!("PROD{:03}", index + 1),
            product_name: name.to_string(),
            stock_level: rng.int_inclusive(5, 54),
            category: category.to_string(),
        })
        .collect()
}

/// Inventory used when nothing is cached.
pub fn default_products() -> Vec<Product> {
    [
        ("P001", "Rice (1kg)", 80, 50),
        ("P002", "Milk (1L)", 60, 30),
        ("P003", "Bread", 25, 20),
        ("P004", "Onions (1kg)", 40, 25),
        ("P005", "Eggs (12pcs)", 120, 15),
    ]
    .into_iter()
    .map(|(code, name, price_major, stock)| Product {
        code: code.to_string(),
        name: name.to_string(),
        price_cents: price_major * 100,
        stock,
    })
    .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
