//! Typed records for the six TPC-H relations used by Query 5
//!
//! Each relation gets its own record type and its own key newtype, so a
//! supplier key can never be probed against the customer index. Parsing from
//! a delimited row lives next to the type through [`TableRecord`].

use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date layout of the `o_orderdate` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    };
}

define_key!(
    /// `r_regionkey`
    RegionKey
);
define_key!(
    /// `n_nationkey`
    NationKey
);
define_key!(
    /// `s_suppkey`
    SupplierKey
);
define_key!(
    /// `c_custkey`
    CustomerKey
);
define_key!(
    /// `o_orderkey`
    OrderKey
);

/// A relation that can be built from one pipe-delimited row
pub trait TableRecord: Sized + Send + 'static {
    /// Relation name used in logs and reports
    const TABLE: &'static str;
    /// File holding the relation inside the table directory
    const FILE_NAME: &'static str;
    /// Rows with fewer fields than this are malformed
    const MIN_FIELDS: usize;

    /// Build a record from a row that already has `MIN_FIELDS` fields.
    ///
    /// Returns `None` when a used field does not parse.
    fn from_fields(row: &StringRecord) -> Option<Self>;

    /// Build a record from any row, rejecting short rows.
    fn from_row(row: &StringRecord) -> Option<Self> {
        if row.len() < Self::MIN_FIELDS {
            return None;
        }
        Self::from_fields(row)
    }
}

fn field<T: std::str::FromStr>(row: &StringRecord, index: usize) -> Option<T> {
    row.get(index)?.trim().parse().ok()
}

fn text(row: &StringRecord, index: usize) -> Option<String> {
    row.get(index).map(|s| s.trim().to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub region_key: RegionKey,
    pub name: String,
}

impl TableRecord for Region {
    const TABLE: &'static str = "region";
    const FILE_NAME: &'static str = "region.tbl";
    const MIN_FIELDS: usize = 2;

    fn from_fields(row: &StringRecord) -> Option<Self> {
        Some(Self {
            region_key: field(row, 0)?,
            name: text(row, 1)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nation {
    pub nation_key: NationKey,
    pub name: String,
    pub region_key: RegionKey,
}

impl TableRecord for Nation {
    const TABLE: &'static str = "nation";
    const FILE_NAME: &'static str = "nation.tbl";
    const MIN_FIELDS: usize = 3;

    fn from_fields(row: &StringRecord) -> Option<Self> {
        Some(Self {
            nation_key: field(row, 0)?,
            name: text(row, 1)?,
            region_key: field(row, 2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_key: SupplierKey,
    pub nation_key: NationKey,
}

impl TableRecord for Supplier {
    const TABLE: &'static str = "supplier";
    const FILE_NAME: &'static str = "supplier.tbl";
    const MIN_FIELDS: usize = 4;

    fn from_fields(row: &StringRecord) -> Option<Self> {
        Some(Self {
            supplier_key: field(row, 0)?,
            nation_key: field(row, 3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_key: CustomerKey,
    pub nation_key: NationKey,
}

impl TableRecord for Customer {
    const TABLE: &'static str = "customer";
    const FILE_NAME: &'static str = "customer.tbl";
    const MIN_FIELDS: usize = 4;

    fn from_fields(row: &StringRecord) -> Option<Self> {
        Some(Self {
            customer_key: field(row, 0)?,
            nation_key: field(row, 3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_key: OrderKey,
    pub customer_key: CustomerKey,
    pub order_date: NaiveDate,
}

impl TableRecord for Order {
    const TABLE: &'static str = "orders";
    const FILE_NAME: &'static str = "orders.tbl";
    const MIN_FIELDS: usize = 5;

    fn from_fields(row: &StringRecord) -> Option<Self> {
        let order_date = NaiveDate::parse_from_str(row.get(4)?.trim(), DATE_FORMAT).ok()?;
        Some(Self {
            order_key: field(row, 0)?,
            customer_key: field(row, 1)?,
            order_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub order_key: OrderKey,
    pub supplier_key: SupplierKey,
    pub extended_price: f64,
    /// Fraction in `[0, 1]`
    pub discount: f64,
}

impl LineItem {
    /// `l_extendedprice * (1 - l_discount)`
    pub fn revenue(&self) -> f64 {
        self.extended_price * (1.0 - self.discount)
    }
}

impl TableRecord for LineItem {
    const TABLE: &'static str = "lineitem";
    const FILE_NAME: &'static str = "lineitem.tbl";
    const MIN_FIELDS: usize = 7;

    fn from_fields(row: &StringRecord) -> Option<Self> {
        Some(Self {
            order_key: field(row, 0)?,
            supplier_key: field(row, 2)?,
            extended_price: field(row, 5)?,
            discount: field(row, 6)?,
        })
    }
}
