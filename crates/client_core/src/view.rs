//! Donor list rendering: a pure mapping from a fetch result to a view
//! description, plus the display region that holds the current view.

use std::{fmt, sync::Arc};

use shared::domain::{Donor, DonorId};
use tokio::sync::RwLock;

use crate::error::GatewayError;

/// Which listing the view renders. Both share one rendering core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListVariant {
    /// Operator listing with a delete control on every card.
    Management,
    /// Read-only listing.
    Public,
}

impl ListVariant {
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Management => "No donors registered yet.",
            Self::Public => "No donors found",
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Self::Management => "Failed to load donors.",
            Self::Public => "Failed loading donors",
        }
    }

    pub fn has_delete_control(self) -> bool {
        matches!(self, Self::Management)
    }
}

/// Delete action for one card. The donor id is fixed when the card is
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteControl {
    donor_id: DonorId,
}

impl DeleteControl {
    pub fn donor_id(&self) -> DonorId {
        self.donor_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorCard {
    pub name: String,
    pub blood_type: String,
    pub age: i64,
    pub email: String,
    pub phone: String,
    pub delete: Option<DeleteControl>,
}

impl DonorCard {
    fn from_donor(donor: &Donor, variant: ListVariant) -> Self {
        Self {
            name: donor.name.clone(),
            blood_type: donor.blood_type.clone(),
            age: donor.age,
            email: donor.email.clone(),
            phone: donor.phone.clone(),
            delete: variant
                .has_delete_control()
                .then_some(DeleteControl { donor_id: donor.id }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty { message: String },
    Cards(Vec<DonorCard>),
    Failed { message: String },
}

impl ListView {
    pub fn cards(&self) -> &[DonorCard] {
        match self {
            Self::Cards(cards) => cards,
            Self::Empty { .. } | Self::Failed { .. } => &[],
        }
    }

    /// Delete control of the rendered card for `donor_id`, if one is shown.
    pub fn delete_control_for(&self, donor_id: DonorId) -> Option<DeleteControl> {
        self.cards()
            .iter()
            .filter_map(|card| card.delete)
            .find(|control| control.donor_id == donor_id)
    }
}

pub fn render_donor_list(
    variant: ListVariant,
    fetched: Result<&[Donor], &GatewayError>,
) -> ListView {
    match fetched {
        Err(_) => ListView::Failed {
            message: variant.error_message().to_string(),
        },
        Ok([]) => ListView::Empty {
            message: variant.empty_message().to_string(),
        },
        Ok(donors) => ListView::Cards(
            donors
                .iter()
                .map(|donor| DonorCard::from_donor(donor, variant))
                .collect(),
        ),
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { message } => writeln!(f, "{message}"),
            Self::Failed { message } => writeln!(f, "! {message}"),
            Self::Cards(cards) => {
                for (index, card) in cards.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for DonorCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Blood Type: {}", self.blood_type)?;
        writeln!(f, "  Age: {}", self.age)?;
        writeln!(f, "  Email: {}", self.email)?;
        writeln!(f, "  Phone: {}", self.phone)?;
        if let Some(control) = self.delete {
            writeln!(f, "  [delete {}]", control.donor_id)?;
        }
        Ok(())
    }
}

/// Full record of one donor: the public card plus the fields the list omits.
pub fn render_donor_detail(donor: &Donor) -> String {
    let mut detail = DonorCard::from_donor(donor, ListVariant::Public).to_string();
    if !donor.address.is_empty() {
        detail.push_str(&format!("  Address: {}\n", donor.address));
    }
    if !donor.emergency_contact.is_empty() {
        detail.push_str(&format!("  Emergency contact: {}\n", donor.emergency_contact));
    }
    detail.push_str(&format!("  Donations: {}\n", donor.total_donations));
    if let Some(last) = donor.last_donation {
        detail.push_str(&format!("  Last donation: {}\n", last.date()));
    }
    detail
}

/// The single rendered area the donor list is written to. Cloning shares the
/// region.
#[derive(Debug, Clone, Default)]
pub struct DisplayRegion {
    content: Arc<RwLock<Option<ListView>>>,
}

impl DisplayRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was shown before with `view`.
    pub async fn replace(&self, view: ListView) {
        *self.content.write().await = Some(view);
    }

    pub async fn snapshot(&self) -> Option<ListView> {
        self.content.read().await.clone()
    }
}
