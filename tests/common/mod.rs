//! Common test utilities and helpers
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tpch_q5::store::{
    Customer, CustomerKey, LineItem, Nation, NationKey, Order, OrderKey, RecordStore, Region,
    RegionKey, Supplier, SupplierKey,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Builder for small TPC-H datasets, in memory or as `.tbl` files
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    store: RecordStore,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// AMERICA(1) with BRAZIL(2), one customer 10, supplier 20 and order 100
    /// dated 1994-02-15, all in BRAZIL. No line items.
    pub fn brazil() -> Self {
        Self::new()
            .region(1, "AMERICA")
            .nation(2, "BRAZIL", 1)
            .customer(10, 2)
            .supplier(20, 2)
            .order(100, 10, "1994-02-15")
    }

    pub fn region(mut self, key: u64, name: &str) -> Self {
        self.store.regions.push(Region {
            region_key: RegionKey(key),
            name: name.to_string(),
        });
        self
    }

    pub fn nation(mut self, key: u64, name: &str, region: u64) -> Self {
        self.store.nations.push(Nation {
            nation_key: NationKey(key),
            name: name.to_string(),
            region_key: RegionKey(region),
        });
        self
    }

    pub fn supplier(mut self, key: u64, nation: u64) -> Self {
        self.store.suppliers.push(Supplier {
            supplier_key: SupplierKey(key),
            nation_key: NationKey(nation),
        });
        self
    }

    pub fn customer(mut self, key: u64, nation: u64) -> Self {
        self.store.customers.push(Customer {
            customer_key: CustomerKey(key),
            nation_key: NationKey(nation),
        });
        self
    }

    pub fn order(mut self, key: u64, customer: u64, order_date: &str) -> Self {
        self.store.orders.push(Order {
            order_key: OrderKey(key),
            customer_key: CustomerKey(customer),
            order_date: date(order_date),
        });
        self
    }

    pub fn line_item(mut self, order: u64, supplier: u64, price: f64, discount: f64) -> Self {
        self.store.line_items.push(LineItem {
            order_key: OrderKey(order),
            supplier_key: SupplierKey(supplier),
            extended_price: price,
            discount,
        });
        self
    }

    pub fn store(&self) -> RecordStore {
        self.store.clone()
    }

    /// Write the dataset as TPC-H `.tbl` files, filler columns included
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let s = &self.store;
        write_lines(
            dir,
            "region.tbl",
            s.regions
                .iter()
                .map(|r| format!("{}|{}|comment|", r.region_key, r.name)),
        )?;
        write_lines(
            dir,
            "nation.tbl",
            s.nations
                .iter()
                .map(|n| format!("{}|{}|{}|comment|", n.nation_key, n.name, n.region_key)),
        )?;
        write_lines(
            dir,
            "supplier.tbl",
            s.suppliers.iter().map(|x| {
                format!(
                    "{}|Supplier#{}|address|{}|10-000-000-0000|100.00|comment|",
                    x.supplier_key, x.supplier_key, x.nation_key
                )
            }),
        )?;
        write_lines(
            dir,
            "customer.tbl",
            s.customers.iter().map(|c| {
                format!(
                    "{}|Customer#{}|address|{}|10-000-000-0000|100.00|BUILDING|comment|",
                    c.customer_key, c.customer_key, c.nation_key
                )
            }),
        )?;
        write_lines(
            dir,
            "orders.tbl",
            s.orders.iter().map(|o| {
                format!(
                    "{}|{}|O|1000.00|{}|1-URGENT|Clerk#1|0|comment|",
                    o.order_key,
                    o.customer_key,
                    o.order_date.format("%Y-%m-%d")
                )
            }),
        )?;
        write_lines(
            dir,
            "lineitem.tbl",
            s.line_items.iter().enumerate().map(|(i, l)| {
                format!(
                    "{}|1|{}|{}|1|{:.2}|{:.2}|0.00|N|O|\
                     1994-03-01|1994-03-01|1994-03-01|NONE|AIR|comment|",
                    l.order_key,
                    l.supplier_key,
                    i + 1,
                    l.extended_price,
                    l.discount
                )
            }),
        )?;
        Ok(())
    }

    pub fn write_temp(&self) -> Result<TempDir> {
        let dir = TempDir::new()?;
        self.write_to(dir.path())?;
        Ok(dir)
    }
}

fn write_lines(dir: &Path, file: &str, lines: impl Iterator<Item = String>) -> Result<()> {
    let mut body = String::new();
    for line in lines {
        body.push_str(&line);
        body.push('\n');
    }
    fs::write(dir.join(file), body)?;
    Ok(())
}

/// Deterministic multi-nation dataset with `items` line items
pub fn synthetic(items: usize) -> DatasetBuilder {
    let mut builder = DatasetBuilder::new()
        .region(0, "AFRICA")
        .region(1, "AMERICA")
        .region(2, "ASIA");

    let nations = [
        (0, "ALGERIA", 0),
        (1, "ARGENTINA", 1),
        (2, "BRAZIL", 1),
        (3, "CANADA", 1),
        (8, "INDIA", 2),
        (9, "INDONESIA", 2),
    ];
    for (key, name, region) in nations {
        builder = builder.nation(key, name, region);
    }

    for key in 0..30u64 {
        builder = builder
            .customer(key, nations[(key % 6) as usize].0)
            .supplier(key, nations[((key * 7) % 6) as usize].0);
    }

    let dates = ["1993-11-30", "1994-01-01", "1994-07-19", "1994-12-31", "1995-01-01"];
    for key in 0..200u64 {
        builder = builder.order(key, key % 31, dates[(key % 5) as usize]);
    }

    for i in 0..items as u64 {
        let price = 100.0 + (i % 97) as f64 * 3.25;
        let discount = (i % 11) as f64 / 100.0;
        builder = builder.line_item((i * 13) % 211, (i * 5) % 32, price, discount);
    }
    builder
}
