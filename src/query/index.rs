//! Join indices built from the record store
//!
//! One hash map per dimension relation, each built in a single pass. The
//! indices are immutable after [`JoinIndex::build`] and are read by every
//! worker without synchronization.

use crate::store::{CustomerKey, NationKey, OrderKey, RecordStore, RegionKey, SupplierKey};
use chrono::NaiveDate;
use fxhash::FxHashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationEntry {
    pub name: String,
    pub region_key: RegionKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderEntry {
    pub customer_key: CustomerKey,
    pub order_date: NaiveDate,
}

/// The five lookup structures probed by the join
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinIndex {
    pub region_names: FxHashMap<RegionKey, String>,
    pub nations: FxHashMap<NationKey, NationEntry>,
    pub supplier_nations: FxHashMap<SupplierKey, NationKey>,
    pub customer_nations: FxHashMap<CustomerKey, NationKey>,
    pub orders: FxHashMap<OrderKey, OrderEntry>,
}

impl JoinIndex {
    /// Build every index from `store`. A repeated key keeps the last row.
    pub fn build(store: &RecordStore) -> Self {
        let region_names = store
            .regions
            .iter()
            .map(|r| (r.region_key, r.name.clone()))
            .collect();

        let nations = store
            .nations
            .iter()
            .map(|n| {
                (
                    n.nation_key,
                    NationEntry {
                        name: n.name.clone(),
                        region_key: n.region_key,
                    },
                )
            })
            .collect();

        let supplier_nations = store
            .suppliers
            .iter()
            .map(|s| (s.supplier_key, s.nation_key))
            .collect();

        let customer_nations = store
            .customers
            .iter()
            .map(|c| (c.customer_key, c.nation_key))
            .collect();

        let orders = store
            .orders
            .iter()
            .map(|o| {
                (
                    o.order_key,
                    OrderEntry {
                        customer_key: o.customer_key,
                        order_date: o.order_date,
                    },
                )
            })
            .collect();

        let index = Self {
            region_names,
            nations,
            supplier_nations,
            customer_nations,
            orders,
        };
        debug!(
            "Built join indices: {} regions, {} nations, {} suppliers, {} customers, {} orders",
            index.region_names.len(),
            index.nations.len(),
            index.supplier_nations.len(),
            index.customer_nations.len(),
            index.orders.len()
        );
        index
    }

    pub fn order(&self, key: OrderKey) -> Option<&OrderEntry> {
        self.orders.get(&key)
    }

    pub fn customer_nation(&self, key: CustomerKey) -> Option<NationKey> {
        self.customer_nations.get(&key).copied()
    }

    pub fn supplier_nation(&self, key: SupplierKey) -> Option<NationKey> {
        self.supplier_nations.get(&key).copied()
    }

    pub fn nation(&self, key: NationKey) -> Option<&NationEntry> {
        self.nations.get(&key)
    }

    pub fn region_name(&self, key: RegionKey) -> Option<&str> {
        self.region_names.get(&key).map(String::as_str)
    }

    /// Whether any loaded region carries `name`
    pub fn has_region_named(&self, name: &str) -> bool {
        self.region_names.values().any(|n| n == name)
    }
}
