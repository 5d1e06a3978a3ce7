//! Operator-triggered flows. Each one makes at most one mutating registry
//! call and always ends in an operator-visible outcome.

mod deletion;
mod donation;
mod eligibility;
mod listing;
mod lookup;
mod registration;

pub use deletion::{DeletionState, DonorDeletionFlow, DELETE_CONFIRMATION, DELETION_SUCCEEDED};
pub use donation::{DonationRecordingFlow, DONATION_RECORDED};
pub use eligibility::EligibilityCheck;
pub use listing::DonorListView;
pub use lookup::DonorLookup;
pub use registration::{DonorRegistrationFlow, REGISTRATION_SUCCEEDED};

use crate::error::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Succeeded,
    Failed(GatewayError),
}

impl FlowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

pub(crate) fn error_notice(err: &GatewayError) -> String {
    format!("Error: {}", err.message())
}
