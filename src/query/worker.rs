//! Join-filter-aggregate evaluation for one partition of line items
//!
//! A worker probes the shared [`JoinIndex`] for every line item in its range
//! and accumulates revenue into a private map. Nothing here touches shared
//! mutable state.

use super::index::JoinIndex;
use super::QueryParams;
use crate::store::LineItem;
use fxhash::FxHashMap;
use serde::Serialize;

/// The gate that rejected a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `l_orderkey` has no order
    MissingOrder,
    /// order date outside `[start, end)`
    OutsideDateRange,
    /// `o_custkey` has no customer
    MissingCustomer,
    /// `l_suppkey` has no supplier
    MissingSupplier,
    /// customer and supplier belong to different nations
    NationMismatch,
    /// nation or region unresolved, or region name differs from the target
    OutsideRegion,
}

/// Per-gate row counters for one or more partitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub scanned: usize,
    pub matched: usize,
    pub missing_order: usize,
    pub outside_date_range: usize,
    pub missing_customer: usize,
    pub missing_supplier: usize,
    pub nation_mismatch: usize,
    pub outside_region: usize,
}

impl ScanStats {
    fn reject(&mut self, rejection: Rejection) {
        let counter = match rejection {
            Rejection::MissingOrder => &mut self.missing_order,
            Rejection::OutsideDateRange => &mut self.outside_date_range,
            Rejection::MissingCustomer => &mut self.missing_customer,
            Rejection::MissingSupplier => &mut self.missing_supplier,
            Rejection::NationMismatch => &mut self.nation_mismatch,
            Rejection::OutsideRegion => &mut self.outside_region,
        };
        *counter += 1;
    }

    /// Add another partition's counters into this one
    pub fn absorb(&mut self, other: &ScanStats) {
        self.scanned += other.scanned;
        self.matched += other.matched;
        self.missing_order += other.missing_order;
        self.outside_date_range += other.outside_date_range;
        self.missing_customer += other.missing_customer;
        self.missing_supplier += other.missing_supplier;
        self.nation_mismatch += other.nation_mismatch;
        self.outside_region += other.outside_region;
    }

    pub fn rejected(&self) -> usize {
        self.scanned - self.matched
    }
}

/// A worker's private result: revenue per attribution nation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAggregate<'a> {
    pub revenue: FxHashMap<&'a str, f64>,
    pub stats: ScanStats,
}

impl<'a> PartialAggregate<'a> {
    pub fn add(&mut self, nation: &'a str, revenue: f64) {
        *self.revenue.entry(nation).or_insert(0.0) += revenue;
    }
}

/// Run the gate chain for one line item.
///
/// Returns the attribution nation's name when every gate passes.
pub fn evaluate<'a>(
    item: &LineItem,
    index: &'a JoinIndex,
    params: &QueryParams,
) -> Result<&'a str, Rejection> {
    let order = index.order(item.order_key).ok_or(Rejection::MissingOrder)?;

    if !params.contains_date(order.order_date) {
        return Err(Rejection::OutsideDateRange);
    }

    let customer_nation = index
        .customer_nation(order.customer_key)
        .ok_or(Rejection::MissingCustomer)?;

    let supplier_nation = index
        .supplier_nation(item.supplier_key)
        .ok_or(Rejection::MissingSupplier)?;

    if customer_nation != supplier_nation {
        return Err(Rejection::NationMismatch);
    }

    let nation = index
        .nation(supplier_nation)
        .ok_or(Rejection::OutsideRegion)?;
    match index.region_name(nation.region_key) {
        Some(region) if region == params.region_name => Ok(nation.name.as_str()),
        _ => Err(Rejection::OutsideRegion),
    }
}

/// Scan `items` and accumulate revenue for every row that passes all gates
pub fn scan_partition<'a>(
    items: &[LineItem],
    index: &'a JoinIndex,
    params: &QueryParams,
) -> PartialAggregate<'a> {
    let mut partial = PartialAggregate::default();

    for item in items {
        partial.stats.scanned += 1;
        match evaluate(item, index, params) {
            Ok(nation) => {
                partial.stats.matched += 1;
                partial.add(nation, item.revenue());
            }
            Err(rejection) => partial.stats.reject(rejection),
        }
    }

    partial
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        Customer, CustomerKey, Nation, NationKey, Order, OrderKey, RecordStore, Region,
        RegionKey, Supplier, SupplierKey,
    };
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn params() -> QueryParams {
        QueryParams::new("AMERICA", date("1994-01-01"), date("1995-01-01"))
    }

    /// BRAZIL (2) and CANADA (3) in AMERICA (1), FRANCE (6) in EUROPE (3)
    fn index() -> JoinIndex {
        let store = RecordStore {
            regions: vec![
                Region {
                    region_key: RegionKey(1),
                    name: "AMERICA".to_string(),
                },
                Region {
                    region_key: RegionKey(3),
                    name: "EUROPE".to_string(),
                },
            ],
            nations: vec![
                Nation {
                    nation_key: NationKey(2),
                    name: "BRAZIL".to_string(),
                    region_key: RegionKey(1),
                },
                Nation {
                    nation_key: NationKey(3),
                    name: "CANADA".to_string(),
                    region_key: RegionKey(1),
                },
                Nation {
                    nation_key: NationKey(6),
                    name: "FRANCE".to_string(),
                    region_key: RegionKey(3),
                },
                Nation {
                    nation_key: NationKey(7),
                    name: "NOWHERE".to_string(),
                    region_key: RegionKey(99),
                },
            ],
            suppliers: vec![
                Supplier {
                    supplier_key: SupplierKey(20),
                    nation_key: NationKey(2),
                },
                Supplier {
                    supplier_key: SupplierKey(30),
                    nation_key: NationKey(3),
                },
                Supplier {
                    supplier_key: SupplierKey(60),
                    nation_key: NationKey(6),
                },
                Supplier {
                    supplier_key: SupplierKey(70),
                    nation_key: NationKey(7),
                },
                Supplier {
                    supplier_key: SupplierKey(80),
                    nation_key: NationKey(8),
                },
            ],
            customers: vec![
                Customer {
                    customer_key: CustomerKey(10),
                    nation_key: NationKey(2),
                },
                Customer {
                    customer_key: CustomerKey(16),
                    nation_key: NationKey(6),
                },
                Customer {
                    customer_key: CustomerKey(17),
                    nation_key: NationKey(7),
                },
                Customer {
                    customer_key: CustomerKey(18),
                    nation_key: NationKey(8),
                },
            ],
            orders: vec![
                Order {
                    order_key: OrderKey(100),
                    customer_key: CustomerKey(10),
                    order_date: date("1994-02-15"),
                },
                Order {
                    order_key: OrderKey(101),
                    customer_key: CustomerKey(10),
                    order_date: date("1995-01-01"),
                },
                Order {
                    order_key: OrderKey(102),
                    customer_key: CustomerKey(999),
                    order_date: date("1994-06-01"),
                },
                Order {
                    order_key: OrderKey(106),
                    customer_key: CustomerKey(16),
                    order_date: date("1994-06-01"),
                },
                Order {
                    order_key: OrderKey(107),
                    customer_key: CustomerKey(17),
                    order_date: date("1994-06-01"),
                },
                Order {
                    order_key: OrderKey(108),
                    customer_key: CustomerKey(18),
                    order_date: date("1994-06-01"),
                },
                Order {
                    order_key: OrderKey(109),
                    customer_key: CustomerKey(10),
                    order_date: date("1994-01-01"),
                },
            ],
            ..Default::default()
        };
        JoinIndex::build(&store)
    }

    fn item(order: u64, supplier: u64, price: f64, discount: f64) -> LineItem {
        LineItem {
            order_key: OrderKey(order),
            supplier_key: SupplierKey(supplier),
            extended_price: price,
            discount,
        }
    }

    #[test]
    fn test_all_gates_pass() {
        let index = index();
        assert_eq!(
            evaluate(&item(100, 20, 100.0, 0.1), &index, &params()),
            Ok("BRAZIL")
        );
    }

    #[test]
    fn test_gate_missing_order() {
        let index = index();
        assert_eq!(
            evaluate(&item(555, 20, 1.0, 0.0), &index, &params()),
            Err(Rejection::MissingOrder)
        );
    }

    #[test]
    fn test_gate_end_date_is_exclusive() {
        let index = index();
        assert_eq!(
            evaluate(&item(101, 20, 1.0, 0.0), &index, &params()),
            Err(Rejection::OutsideDateRange)
        );
    }

    #[test]
    fn test_gate_start_date_is_inclusive() {
        let index = index();
        assert_eq!(
            evaluate(&item(109, 20, 1.0, 0.0), &index, &params()),
            Ok("BRAZIL")
        );
    }

    #[test]
    fn test_gate_missing_customer() {
        let index = index();
        assert_eq!(
            evaluate(&item(102, 20, 1.0, 0.0), &index, &params()),
            Err(Rejection::MissingCustomer)
        );
    }

    #[test]
    fn test_gate_missing_supplier() {
        let index = index();
        assert_eq!(
            evaluate(&item(100, 404, 1.0, 0.0), &index, &params()),
            Err(Rejection::MissingSupplier)
        );
    }

    #[test]
    fn test_gate_nation_mismatch() {
        let index = index();
        assert_eq!(
            evaluate(&item(100, 30, 1.0, 0.0), &index, &params()),
            Err(Rejection::NationMismatch)
        );
    }

    #[test]
    fn test_gate_region_name_differs() {
        let index = index();
        assert_eq!(
            evaluate(&item(106, 60, 1.0, 0.0), &index, &params()),
            Err(Rejection::OutsideRegion)
        );
    }

    #[test]
    fn test_gate_region_unresolved() {
        let index = index();
        assert_eq!(
            evaluate(&item(107, 70, 1.0, 0.0), &index, &params()),
            Err(Rejection::OutsideRegion)
        );
    }

    #[test]
    fn test_gate_nation_unresolved() {
        let index = index();
        assert_eq!(
            evaluate(&item(108, 80, 1.0, 0.0), &index, &params()),
            Err(Rejection::OutsideRegion)
        );
    }

    #[test]
    fn test_region_match_is_case_sensitive() {
        let index = index();
        let lower = QueryParams::new("america", date("1994-01-01"), date("1995-01-01"));
        assert_eq!(
            evaluate(&item(100, 20, 1.0, 0.0), &index, &lower),
            Err(Rejection::OutsideRegion)
        );
    }

    #[test]
    fn test_scan_partition_sums_per_nation() {
        let index = index();
        let items = vec![
            item(100, 20, 100.0, 0.1),
            item(100, 20, 10.0, 0.0),
            item(100, 30, 50.0, 0.0),
            item(555, 20, 50.0, 0.0),
        ];

        let partial = scan_partition(&items, &index, &params());

        assert_eq!(partial.revenue.len(), 1);
        assert!((partial.revenue["BRAZIL"] - 100.0).abs() < 1e-9);
        assert_eq!(partial.stats.scanned, 4);
        assert_eq!(partial.stats.matched, 2);
        assert_eq!(partial.stats.nation_mismatch, 1);
        assert_eq!(partial.stats.missing_order, 1);
        assert_eq!(partial.stats.rejected(), 2);
    }

    #[test]
    fn test_scan_empty_partition() {
        let index = index();
        let partial = scan_partition(&[], &index, &params());
        assert!(partial.revenue.is_empty());
        assert_eq!(partial.stats, ScanStats::default());
    }

    #[test]
    fn test_stats_absorb() {
        let mut total = ScanStats {
            scanned: 3,
            matched: 1,
            missing_order: 2,
            ..Default::default()
        };
        total.absorb(&ScanStats {
            scanned: 2,
            matched: 2,
            ..Default::default()
        });
        assert_eq!(total.scanned, 5);
        assert_eq!(total.matched, 3);
        assert_eq!(total.missing_order, 2);
    }
}
