//! Wires the flows to one gateway, one operator and one display region.

use std::sync::Arc;

use client_core::{
    flows::{
        DeletionState, DonationRecordingFlow, DonorDeletionFlow, DonorListView, DonorLookup,
        DonorRegistrationFlow, EligibilityCheck, FlowOutcome,
    },
    forms::FormData,
    view::DisplayRegion,
    RegistryGateway,
};
use shared::domain::DonorId;

use crate::{console::ConsoleOperator, settings::Settings};

pub struct Page {
    listing_destination: String,
    operator: Arc<ConsoleOperator>,
    management: Arc<DonorListView>,
    public: DonorListView,
    registration: DonorRegistrationFlow,
    deletion: DonorDeletionFlow,
    donation: DonationRecordingFlow,
    eligibility: EligibilityCheck,
    lookup: DonorLookup,
}

impl Page {
    pub fn new(
        settings: &Settings,
        gateway: Arc<dyn RegistryGateway>,
        operator: Arc<ConsoleOperator>,
    ) -> Self {
        let region = DisplayRegion::new();
        let management = Arc::new(DonorListView::management(gateway.clone(), region.clone()));
        Self {
            listing_destination: settings.listing_destination.clone(),
            public: DonorListView::public(gateway.clone(), region),
            registration: DonorRegistrationFlow::new(
                gateway.clone(),
                operator.clone(),
                settings.listing_destination.clone(),
            ),
            deletion: DonorDeletionFlow::new(gateway.clone(), operator.clone(), management.clone()),
            donation: DonationRecordingFlow::new(gateway.clone(), operator.clone()),
            eligibility: EligibilityCheck::new(gateway.clone(), operator.clone()),
            lookup: DonorLookup::new(gateway, operator.clone()),
            management,
            operator,
        }
    }

    pub fn operator(&self) -> &ConsoleOperator {
        &self.operator
    }

    pub async fn show_management(&self) {
        print!("{}", self.management.refresh().await);
    }

    pub async fn show_public(&self) {
        print!("{}", self.public.refresh().await);
    }

    pub async fn register(&self, form: &FormData) -> FlowOutcome {
        let outcome = self.registration.submit(form).await;
        self.follow_navigation().await;
        outcome
    }

    /// Deletes by id without requiring a rendered card.
    pub async fn delete(&self, donor_id: DonorId) -> DeletionState {
        let state = self.deletion.run(donor_id).await;
        self.show_region_after(&state).await;
        state
    }

    /// Deletes through the delete control of a card currently on screen.
    pub async fn delete_rendered(&self, donor_id: DonorId) -> Option<DeletionState> {
        let shown = self.management.region().snapshot().await?;
        let control = shown.delete_control_for(donor_id)?;
        let state = self.deletion.activate(control).await;
        self.show_region_after(&state).await;
        Some(state)
    }

    pub async fn record_donation(&self, form: &mut FormData) -> FlowOutcome {
        self.donation.submit(form).await
    }

    pub async fn check_eligibility(&self, donor_id: DonorId) -> bool {
        self.eligibility.check(donor_id).await.is_some()
    }

    pub async fn show_donor(&self, donor_id: DonorId) -> bool {
        self.lookup.show(donor_id).await.is_some()
    }

    async fn show_region_after(&self, state: &DeletionState) {
        if *state != DeletionState::Succeeded {
            return;
        }
        if let Some(view) = self.management.region().snapshot().await {
            print!("{view}");
        }
    }

    async fn follow_navigation(&self) {
        let Some(destination) = self.operator.take_navigation().await else {
            return;
        };
        if destination == self.listing_destination {
            self.show_management().await;
        } else {
            println!("-> {destination}");
        }
    }
}
