//! Reference Payment Gateway
//!
//! Deterministic gateway implementation: accepts every initiation and hands
//! back a redirect URL under a configurable base. Real deployments swap in
//! a gateway client behind the same trait; completion always arrives
//! through the webhook endpoint either way.

use async_trait::async_trait;
use chit_core::error::ChitResult;
use chit_core::gateway::{PaymentGateway, PaymentInitiation};
use chit_core::types::{CardId, Money};
use uuid::Uuid;

/// Gateway that redirects to a static payment page
#[derive(Debug, Clone)]
pub struct StaticRedirectGateway {
    base_url: String,
}

impl StaticRedirectGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for StaticRedirectGateway {
    fn default() -> Self {
        Self::new("https://pay.chitcore.example")
    }
}

#[async_trait]
impl PaymentGateway for StaticRedirectGateway {
    async fn initiate(
        &self,
        card_id: &CardId,
        period_index: u32,
        amount: Money,
    ) -> ChitResult<PaymentInitiation> {
        let gateway_ref = Uuid::new_v4().to_string();
        Ok(PaymentInitiation {
            redirect_url: format!(
                "{}/pay?card={}&period={}&amount={}&ref={}",
                self.base_url,
                card_id,
                period_index,
                amount.minor_units(),
                gateway_ref
            ),
            gateway_ref,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_redirect_carries_card_and_period() {
        let gateway = StaticRedirectGateway::default();
        let initiation = gateway
            .initiate(&CardId::new("card_1"), 2, Money::from_minor(100_000))
            .await
            .unwrap();
        assert!(initiation.redirect_url.contains("card=card_1"));
        assert!(initiation.redirect_url.contains("period=2"));
        assert!(!initiation.gateway_ref.is_empty());
    }
}
