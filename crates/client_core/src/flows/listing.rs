use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    view::{render_donor_list, DisplayRegion, ListVariant, ListView},
    RegistryGateway,
};

/// Fetches the donor collection and renders it into a display region.
pub struct DonorListView {
    gateway: Arc<dyn RegistryGateway>,
    variant: ListVariant,
    region: DisplayRegion,
}

impl DonorListView {
    pub fn new(
        gateway: Arc<dyn RegistryGateway>,
        variant: ListVariant,
        region: DisplayRegion,
    ) -> Self {
        Self {
            gateway,
            variant,
            region,
        }
    }

    pub fn management(gateway: Arc<dyn RegistryGateway>, region: DisplayRegion) -> Self {
        Self::new(gateway, ListVariant::Management, region)
    }

    pub fn public(gateway: Arc<dyn RegistryGateway>, region: DisplayRegion) -> Self {
        Self::new(gateway, ListVariant::Public, region)
    }

    pub fn variant(&self) -> ListVariant {
        self.variant
    }

    pub fn region(&self) -> &DisplayRegion {
        &self.region
    }

    /// Fetches and re-renders, replacing the region's previous content.
    /// Fetch failures are rendered, never returned.
    pub async fn refresh(&self) -> ListView {
        let fetched = self.gateway.list_donors().await;
        if let Err(err) = &fetched {
            warn!(variant = ?self.variant, error = %err, "donor list fetch failed");
        }
        let view = render_donor_list(self.variant, fetched.as_deref());
        debug!(
            variant = ?self.variant,
            cards = view.cards().len(),
            "donor list rendered"
        );
        self.region.replace(view.clone()).await;
        view
    }
}
