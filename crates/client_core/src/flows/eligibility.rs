use std::sync::Arc;

use shared::{domain::DonorId, protocol::Eligibility};
use tracing::warn;

use super::error_notice;
use crate::{operator::Operator, RegistryGateway};

/// Asks the registry whether a donor may donate today and relays the answer.
pub struct EligibilityCheck {
    gateway: Arc<dyn RegistryGateway>,
    operator: Arc<dyn Operator>,
}

impl EligibilityCheck {
    pub fn new(gateway: Arc<dyn RegistryGateway>, operator: Arc<dyn Operator>) -> Self {
        Self { gateway, operator }
    }

    pub async fn check(&self, donor_id: DonorId) -> Option<Eligibility> {
        match self.gateway.donor_eligibility(donor_id).await {
            Ok(eligibility) => {
                let notice = if eligibility.message.trim().is_empty() {
                    if eligibility.can_donate {
                        "Donor can donate".to_string()
                    } else {
                        "Donor cannot donate yet".to_string()
                    }
                } else {
                    eligibility.message.clone()
                };
                self.operator.notify(&notice).await;
                Some(eligibility)
            }
            Err(err) => {
                warn!(donor_id = donor_id.0, error = %err, "eligibility check failed");
                self.operator.notify(&error_notice(&err)).await;
                None
            }
        }
    }
}
