//! Fabricated tables and answers backing the mock backend.
//!
//! Tables are themed by file name so the demo data looks like the kind of
//! spreadsheet the name promises. Values are randomized on every generation.

use chrono::Utc;
use rand::Rng;

use crate::api::types::{ExtractedData, QaResponse, QaSource};
use crate::data::table::DataRow;

/// Generates a themed table for a file based on its name.
pub fn table_for_file(file_name: &str) -> ExtractedData {
    if file_name.contains("sales") {
        sales_table()
    } else if file_name.contains("customer") {
        customer_table()
    } else if file_name.contains("inventory") {
        inventory_table()
    } else if file_name.contains("financial") {
        financial_table()
    } else {
        generic_table()
    }
}

/// Canned answer with two plausible sources.
pub fn qa_response(question: &str) -> QaResponse {
    QaResponse {
        answer: format!(
            "This is a mock answer to your question: \"{}\". In a real implementation, \
             this would be generated by analyzing the data from your uploaded files using AI.",
            question
        ),
        sources: vec![
            QaSource {
                file_id: "mock-file-1".to_string(),
                file_name: "sample-data.csv".to_string(),
                relevance: 0.85,
            },
            QaSource {
                file_id: "mock-file-2".to_string(),
                file_name: "additional-data.xlsx".to_string(),
                relevance: 0.72,
            },
        ],
        timestamp: Utc::now(),
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn pick<'a>(rng: &mut impl Rng, options: &'a [&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

fn date_within_days(rng: &mut impl Rng, days: i64) -> String {
    let offset = chrono::Duration::days(rng.gen_range(0..days));
    (Utc::now() - offset).date_naive().to_string()
}

fn sales_table() -> ExtractedData {
    let mut rng = rand::thread_rng();
    let products = ["Laptop", "Mouse", "Keyboard", "Monitor", "Headphones", "Webcam"];
    let regions = ["North", "South", "East", "West"];

    let rows = (1..=25)
        .map(|i| {
            let quantity: i64 = rng.gen_range(1..=50);
            let price: i64 = rng.gen_range(100..600);
            DataRow::new(format!("row-{}", i))
                .with("product", pick(&mut rng, &products))
                .with("quantity", quantity)
                .with("price", price)
                .with("revenue", quantity * price)
                .with("date", date_within_days(&mut rng, 90))
                .with("region", pick(&mut rng, &regions))
        })
        .collect();

    ExtractedData {
        columns: columns(&["id", "product", "quantity", "price", "revenue", "date", "region"]),
        rows,
    }
}

fn customer_table() -> ExtractedData {
    let mut rng = rand::thread_rng();
    let names = [
        "John Smith",
        "Emma Wilson",
        "Michael Brown",
        "Sarah Davis",
        "James Johnson",
        "Lisa Anderson",
    ];
    let cities = ["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"];
    let statuses = ["Active", "Inactive", "VIP"];

    let rows = (1..=30)
        .map(|i| {
            DataRow::new(format!("row-{}", i))
                .with("name", pick(&mut rng, &names))
                .with("email", format!("user{}@example.com", i))
                .with("phone", format!("555-{}", rng.gen_range(1000..10000)))
                .with("city", pick(&mut rng, &cities))
                .with("status", pick(&mut rng, &statuses))
                .with("joined", date_within_days(&mut rng, 365))
        })
        .collect();

    ExtractedData {
        columns: columns(&["id", "name", "email", "phone", "city", "status", "joined"]),
        rows,
    }
}

fn inventory_table() -> ExtractedData {
    let mut rng = rand::thread_rng();
    let items = ["Widget A", "Component B", "Part C", "Module D", "Unit E"];
    let categories = ["Electronics", "Hardware", "Software", "Accessories"];
    let suppliers = ["Supplier Co", "Global Parts", "Tech Supply", "Direct Wholesale"];

    let rows = (1..=20)
        .map(|i| {
            DataRow::new(format!("row-{}", i))
                .with("sku", format!("SKU-{:05}", i))
                .with("item", pick(&mut rng, &items))
                .with("stock", rng.gen_range(0..500i64))
                .with("price", rng.gen_range(20..220i64))
                .with("category", pick(&mut rng, &categories))
                .with("supplier", pick(&mut rng, &suppliers))
        })
        .collect();

    ExtractedData {
        columns: columns(&["id", "sku", "item", "stock", "price", "category", "supplier"]),
        rows,
    }
}

fn financial_table() -> ExtractedData {
    let mut rng = rand::thread_rng();
    let types = ["Debit", "Credit", "Transfer"];
    let accounts = ["Checking", "Savings", "Business", "Investment"];
    let mut balance: i64 = 50_000;

    let rows = (1..=35)
        .map(|i| {
            let amount: i64 = rng.gen_range(100..5100);
            let kind = pick(&mut rng, &types);
            balance += if kind == "Credit" { amount } else { -amount };

            DataRow::new(format!("row-{}", i))
                .with("transaction", format!("TXN-{:06}", i))
                .with("amount", amount)
                .with("type", kind)
                .with("account", pick(&mut rng, &accounts))
                .with("date", date_within_days(&mut rng, 60))
                .with("balance", balance)
        })
        .collect();

    ExtractedData {
        columns: columns(&["id", "transaction", "amount", "type", "account", "date", "balance"]),
        rows,
    }
}

fn generic_table() -> ExtractedData {
    let mut rng = rand::thread_rng();
    let categories = ["A", "B", "C"];
    let statuses = ["Active", "Pending", "Completed"];

    let rows = (1..=15)
        .map(|i| {
            DataRow::new(format!("row-{}", i))
                .with("name", format!("Item {}", i))
                .with("value", rng.gen_range(0..1000i64))
                .with("category", pick(&mut rng, &categories))
                .with("date", date_within_days(&mut rng, 115))
                .with("status", pick(&mut rng, &statuses))
        })
        .collect();

    ExtractedData {
        columns: columns(&["id", "name", "value", "category", "date", "status"]),
        rows,
    }
}
