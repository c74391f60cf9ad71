//! Payment Gateway Seam
//!
//! The payment gateway is an external collaborator: the platform asks it to
//! start a payment and receives either a redirect URL or an immediate
//! failure. Completion arrives later through the gateway callback invoking
//! `record_payment`. The gateway's own protocol is not this system's
//! concern.

use crate::error::ChitResult;
use crate::types::common::{CardId, Money};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of asking the gateway to start a payment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentInitiation {
    /// Where to send the payer to complete the payment
    pub redirect_url: String,
    /// Gateway-side reference for correlating the eventual callback
    pub gateway_ref: String,
}

/// External payment gateway contract
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a payment of `amount` against `card_id` for `period_index`.
    ///
    /// Returns a redirect URL on acceptance; an error here means the
    /// gateway rejected the initiation outright (nothing was charged).
    async fn initiate(
        &self,
        card_id: &CardId,
        period_index: u32,
        amount: Money,
    ) -> ChitResult<PaymentInitiation>;
}
