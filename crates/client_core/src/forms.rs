//! Submitted form contents and their translation into registry payloads.

use std::collections::BTreeMap;

use shared::{
    domain::{FormNumber, LeadingNumber},
    protocol::{DonationRecord, DonorRegistration},
};

/// Named text fields of a submitted form, as the operator entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(String::is_empty)
    }

    /// Clears every field, leaving the form ready for another entry.
    pub fn reset(&mut self) {
        self.fields.clear();
    }

    fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    fn text_or_empty(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    fn number<T: LeadingNumber>(&self, name: &str) -> Option<FormNumber<T>> {
        self.get(name).map(FormNumber::parse)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (name, value) in iter {
            form.insert(name, value);
        }
        form
    }
}

pub fn registration_payload(form: &FormData) -> DonorRegistration {
    DonorRegistration {
        name: form.text("name"),
        age: form.number("age"),
        email: form.text("email"),
        phone: form.text("phone"),
        blood_type: form.text("blood_type"),
        address: form.text_or_empty("address"),
        emergency_contact: form.text_or_empty("emergency_contact"),
    }
}

pub fn donation_payload(form: &FormData) -> DonationRecord {
    DonationRecord {
        donor_id: form.number("donor_id"),
        donation_date: form.text("donation_date"),
        quantity_ml: form.number("quantity_ml"),
        hemoglobin: form.number("hemoglobin"),
        blood_pressure: form.text("blood_pressure"),
        notes: form.text_or_empty("notes"),
    }
}
