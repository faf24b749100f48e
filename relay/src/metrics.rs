//! Unified metrics surface, combining the index's row-level view
//! with the trace store's delivery-latency view into one snapshot for the
//! `/metrics` HTTP endpoint.

// Layer 2: Third-party crate imports
use serde::Serialize;

// Layer 3: Internal module imports
use crate::store::index::IndexMetrics;
use crate::store::trace::DeliveryMetrics;

/// A single `/metrics` response: the index's current row counts plus the
/// trace store's delivery/latency aggregates plus Relay-specific counters
/// that don't belong to either store.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayMetrics {
    /// Secondary-index row counts, grouped by status and subject.
    pub index: IndexMetrics,
    /// Delivery latency and outcome aggregates from the trace store.
    pub delivery: DeliveryMetrics,
    /// Dispatches that hit a restored inert subscription handler; a
    /// nonzero value means some subsystem forgot to re-subscribe after
    /// restart.
    pub inert_subscription_hits: u64,
}

impl RelayMetrics {
    /// Combine the three sources into one snapshot.
    pub fn new(index: IndexMetrics, delivery: DeliveryMetrics, inert_subscription_hits: u64) -> Self {
        Self {
            index,
            delivery,
            inert_subscription_hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_are_zeroed() {
        let metrics = RelayMetrics::default();
        assert_eq!(metrics.index.total_messages, 0);
        assert_eq!(metrics.delivery.total_messages, 0);
        assert_eq!(metrics.inert_subscription_hits, 0);
    }

    #[test]
    fn test_new_combines_sources() {
        let index = IndexMetrics {
            total_messages: 3,
            ..Default::default()
        };
        let delivery = DeliveryMetrics {
            total_messages: 3,
            delivered_count: 2,
            ..Default::default()
        };
        let metrics = RelayMetrics::new(index, delivery, 1);
        assert_eq!(metrics.index.total_messages, 3);
        assert_eq!(metrics.delivery.delivered_count, 2);
        assert_eq!(metrics.inert_subscription_hits, 1);
    }
}
