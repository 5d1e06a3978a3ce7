use std::sync::Arc;

use shared::domain::DonorId;
use tracing::{debug, info, warn};

use super::{error_notice, DonorListView};
use crate::{error::GatewayError, operator::Operator, view::DeleteControl, RegistryGateway};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this donor?";
pub const DELETION_SUCCEEDED: &str = "Donor deleted successfully";

/// Progress of one deletion attempt.
///
/// `Idle -> AwaitingConfirmation -> Confirmed -> Deleting -> Succeeded | Failed`,
/// or `AwaitingConfirmation -> Declined` when the operator says no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionState {
    Idle,
    AwaitingConfirmation,
    Confirmed,
    Deleting,
    Declined,
    Succeeded,
    Failed(GatewayError),
}

impl DeletionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Declined | Self::Succeeded | Self::Failed(_))
    }
}

/// Confirms with the operator, deletes, then refreshes the bound list view.
pub struct DonorDeletionFlow {
    gateway: Arc<dyn RegistryGateway>,
    operator: Arc<dyn Operator>,
    list_view: Arc<DonorListView>,
}

impl DonorDeletionFlow {
    pub fn new(
        gateway: Arc<dyn RegistryGateway>,
        operator: Arc<dyn Operator>,
        list_view: Arc<DonorListView>,
    ) -> Self {
        Self {
            gateway,
            operator,
            list_view,
        }
    }

    /// Entry point for a rendered card's delete control.
    pub async fn activate(&self, control: DeleteControl) -> DeletionState {
        self.run(control.donor_id()).await
    }

    pub async fn run(&self, donor_id: DonorId) -> DeletionState {
        let mut state = DeletionState::Idle;
        advance(&mut state, DeletionState::AwaitingConfirmation, donor_id);

        if !self.operator.confirm(DELETE_CONFIRMATION).await {
            advance(&mut state, DeletionState::Declined, donor_id);
            return state;
        }
        advance(&mut state, DeletionState::Confirmed, donor_id);

        advance(&mut state, DeletionState::Deleting, donor_id);
        match self.gateway.delete_donor(donor_id).await {
            Ok(_) => {
                info!(donor_id = donor_id.0, "donor deleted");
                self.operator.notify(DELETION_SUCCEEDED).await;
                self.list_view.refresh().await;
                advance(&mut state, DeletionState::Succeeded, donor_id);
            }
            Err(err) => {
                warn!(donor_id = donor_id.0, error = %err, "donor deletion failed");
                self.operator.notify(&error_notice(&err)).await;
                advance(&mut state, DeletionState::Failed(err), donor_id);
            }
        }
        state
    }
}

fn advance(state: &mut DeletionState, next: DeletionState, donor_id: DonorId) {
    debug!(donor_id = donor_id.0, from = ?state, to = ?next, "deletion flow transition");
    *state = next;
}
