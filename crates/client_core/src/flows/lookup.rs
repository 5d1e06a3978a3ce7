use std::sync::Arc;

use shared::domain::{Donor, DonorId};
use tracing::warn;

use super::error_notice;
use crate::{operator::Operator, view::render_donor_detail, RegistryGateway};

/// Loads one donor record and shows it to the operator.
pub struct DonorLookup {
    gateway: Arc<dyn RegistryGateway>,
    operator: Arc<dyn Operator>,
}

impl DonorLookup {
    pub fn new(gateway: Arc<dyn RegistryGateway>, operator: Arc<dyn Operator>) -> Self {
        Self { gateway, operator }
    }

    pub async fn show(&self, donor_id: DonorId) -> Option<Donor> {
        match self.gateway.fetch_donor(donor_id).await {
            Ok(donor) => {
                self.operator.notify(&render_donor_detail(&donor)).await;
                Some(donor)
            }
            Err(err) => {
                warn!(donor_id = donor_id.0, error = %err, "donor lookup failed");
                self.operator.notify(&error_notice(&err)).await;
                None
            }
        }
    }
}
