use std::sync::Arc;

use tracing::{info, warn};

use super::{error_notice, FlowOutcome};
use crate::{
    forms::{donation_payload, FormData},
    operator::Operator,
    RegistryGateway,
};

pub const DONATION_RECORDED: &str = "Donation recorded successfully";

pub struct DonationRecordingFlow {
    gateway: Arc<dyn RegistryGateway>,
    operator: Arc<dyn Operator>,
}

impl DonationRecordingFlow {
    pub fn new(gateway: Arc<dyn RegistryGateway>, operator: Arc<dyn Operator>) -> Self {
        Self { gateway, operator }
    }

    /// Handles one submission of the donation form. On success the form is
    /// cleared for the next entry; on failure it keeps what was typed.
    pub async fn submit(&self, form: &mut FormData) -> FlowOutcome {
        let payload = donation_payload(form);
        match self.gateway.record_donation(&payload).await {
            Ok(_) => {
                info!(
                    donor_id = payload.donor_id.as_ref().and_then(|id| id.value()),
                    "donation recorded"
                );
                self.operator.notify(DONATION_RECORDED).await;
                form.reset();
                FlowOutcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "donation recording failed");
                self.operator.notify(&error_notice(&err)).await;
                FlowOutcome::Failed(err)
            }
        }
    }
}
