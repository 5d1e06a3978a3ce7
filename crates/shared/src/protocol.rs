use serde::{Deserialize, Serialize};

use crate::domain::{Donation, Donor, FormNumber};

/// Body of `POST /donors/register`.
///
/// Required fields missing from the submitted form are left out of the JSON
/// body so the server reports them as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorRegistration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<FormNumber<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    pub address: String,
    pub emergency_contact: String,
}

/// Body of `POST /donations/record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<FormNumber<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_ml: Option<FormNumber<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<FormNumber<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    pub notes: String,
}

/// Success body for mutating calls. Every field is optional; the client only
/// needs to know the call succeeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor: Option<Donor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation: Option<Donation>,
}

/// Response of `GET /donors/{id}/can-donate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub can_donate: bool,
    #[serde(default)]
    pub message: String,
}
