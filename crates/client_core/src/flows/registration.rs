use std::sync::Arc;

use tracing::{info, warn};

use super::{error_notice, FlowOutcome};
use crate::{
    forms::{registration_payload, FormData},
    operator::Operator,
    RegistryGateway,
};

pub const REGISTRATION_SUCCEEDED: &str = "Donor registered successfully";

pub struct DonorRegistrationFlow {
    gateway: Arc<dyn RegistryGateway>,
    operator: Arc<dyn Operator>,
    listing_destination: String,
}

impl DonorRegistrationFlow {
    pub fn new(
        gateway: Arc<dyn RegistryGateway>,
        operator: Arc<dyn Operator>,
        listing_destination: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            operator,
            listing_destination: listing_destination.into(),
        }
    }

    /// Handles one submission of the registration form. The form itself is
    /// never modified, so a failed submission can be corrected and resent.
    pub async fn submit(&self, form: &FormData) -> FlowOutcome {
        let payload = registration_payload(form);
        match self.gateway.register_donor(&payload).await {
            Ok(ack) => {
                info!(
                    donor_id = ack.donor.as_ref().map(|donor| donor.id.0),
                    "donor registered"
                );
                self.operator.notify(REGISTRATION_SUCCEEDED).await;
                self.operator.navigate(&self.listing_destination).await;
                FlowOutcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "donor registration failed");
                self.operator.notify(&error_notice(&err)).await;
                FlowOutcome::Failed(err)
            }
        }
    }
}
