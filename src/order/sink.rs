use parking_lot::Mutex;
use rand::Rng;
use std::sync::Arc;
use tracing::info;

use super::{OrderReceipt, OrderSubmission};
use crate::error::SubmissionError;

/// Receives the final order. Called synchronously from the UI thread.
pub trait OrderSink: Send + Sync {
    fn submit(&self, order: &OrderSubmission) -> Result<OrderReceipt, SubmissionError>;
}

const REFERENCE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const REFERENCE_LEN: usize = 8;

fn new_reference() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..REFERENCE_LEN)
        .map(|_| REFERENCE_CHARSET[rng.gen_range(0..REFERENCE_CHARSET.len())] as char)
        .collect();
    format!("ORD-{suffix}")
}

/// Sink that writes the order to the log and accepts it
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingOrderSink;

impl OrderSink for LoggingOrderSink {
    fn submit(&self, order: &OrderSubmission) -> Result<OrderReceipt, SubmissionError> {
        let payload = serde_json::to_string(order).map_err(SubmissionError::Serialize)?;
        let receipt = OrderReceipt {
            reference: new_reference(),
            item_count: order.serial_numbers.len(),
        };

        info!(
            reference = %receipt.reference,
            items = receipt.item_count,
            "Final order submission: {}",
            payload
        );
        Ok(receipt)
    }
}

/// Sink that keeps submitted orders in memory. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderSink {
    orders: Arc<Mutex<Vec<OrderSubmission>>>,
    reject_with: Option<String>,
}

impl MemoryOrderSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses every order with `reason`
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            orders: Arc::default(),
            reject_with: Some(reason.into()),
        }
    }

    pub fn orders(&self) -> Vec<OrderSubmission> {
        self.orders.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.orders.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.lock().is_empty()
    }
}

impl OrderSink for MemoryOrderSink {
    fn submit(&self, order: &OrderSubmission) -> Result<OrderReceipt, SubmissionError> {
        if let Some(reason) = &self.reject_with {
            return Err(SubmissionError::Rejected(reason.clone()));
        }

        let mut orders = self.orders.lock();
        orders.push(order.clone());
        Ok(OrderReceipt {
            reference: format!("MEM-{:04}", orders.len()),
            item_count: order.serial_numbers.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::ShippingInfo;

    fn sample_order() -> OrderSubmission {
        OrderSubmission {
            serial_numbers: vec!["AB-123456".into(), "CD-654321".into()],
            verification_results: Vec::new(),
            shipping: ShippingInfo::default(),
        }
    }

    #[test]
    fn test_reference_shape() {
        let reference = new_reference();
        assert!(reference.starts_with("ORD-"));
        assert_eq!(reference.len(), 4 + REFERENCE_LEN);
        assert!(reference[4..].bytes().all(|b| REFERENCE_CHARSET.contains(&b)));
    }

    #[test]
    fn test_logging_sink_accepts() {
        let receipt = LoggingOrderSink.submit(&sample_order()).unwrap();
        assert_eq!(receipt.item_count, 2);
    }

    #[test]
    fn test_memory_sink_records_orders() {
        let sink = MemoryOrderSink::new();
        let shared = sink.clone();

        let receipt = sink.submit(&sample_order()).unwrap();
        assert_eq!(receipt.reference, "MEM-0001");
        assert_eq!(shared.len(), 1);
        assert_eq!(shared.orders()[0], sample_order());
    }

    #[test]
    fn test_rejecting_sink() {
        let sink = MemoryOrderSink::rejecting("warehouse closed");
        let err = sink.submit(&sample_order()).unwrap_err();
        assert_eq!(err.to_string(), "Order rejected: warehouse closed");
        assert!(sink.is_empty());
    }
}
