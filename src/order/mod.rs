/// Order submission
///
/// The last wizard step hands the validated shipping information, together
/// with the verified serial numbers, to an [`OrderSink`].

pub mod shipping;
pub mod sink;

pub use shipping::{ShippingField, ShippingInfo};
pub use sink::{LoggingOrderSink, MemoryOrderSink, OrderSink};

use serde::{Deserialize, Serialize};

use crate::verification::VerificationResult;

/// Everything collected by a completed wizard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub serial_numbers: Vec<String>,
    pub verification_results: Vec<VerificationResult>,
    pub shipping: ShippingInfo,
}

/// Acknowledgement returned by an [`OrderSink`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub reference: String,
    pub item_count: usize,
}
