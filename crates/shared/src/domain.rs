use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map($name)
            }
        }
    };
}

id_newtype!(DonorId);

/// Blood groups the registry accepts. The server owns validation; the console
/// only uses this list for prompts.
pub const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,
    pub name: String,
    pub age: i64,
    pub email: String,
    pub phone: String,
    pub blood_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emergency_contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_on: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_donation: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_donations: u32,
}

/// A recorded donation as echoed back by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub donor_id: DonorId,
    pub donation_date: String,
    pub quantity_ml: i64,
    pub hemoglobin: f64,
    pub blood_pressure: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A numeric form field after coercion.
///
/// Only the leading number of the entered text is read (`"29abc"` is 29,
/// `"7.0"` is 7 for integers). Text without a leading number becomes
/// `NotANumber`, sent to the server as `null`; the server owns validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormNumber<T> {
    Parsed(T),
    NotANumber,
}

impl<T: LeadingNumber> FormNumber<T> {
    pub fn parse(raw: &str) -> Self {
        match T::parse_leading(raw) {
            Some(value) => Self::Parsed(value),
            None => Self::NotANumber,
        }
    }
}

impl<T: Copy> FormNumber<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(*value),
            Self::NotANumber => None,
        }
    }
}

impl<T: Serialize> Serialize for FormNumber<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Parsed(value) => value.serialize(serializer),
            Self::NotANumber => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FormNumber<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::NotANumber, Self::Parsed))
    }
}

/// Reads the number at the start of a text field, ignoring leading
/// whitespace and anything after the number.
pub trait LeadingNumber: Sized {
    fn parse_leading(raw: &str) -> Option<Self>;
}

impl LeadingNumber for i64 {
    fn parse_leading(raw: &str) -> Option<Self> {
        let text = raw.trim_start();
        let sign = sign_len(text);
        let end = sign + digits_len(&text[sign..]);
        text[..end].parse().ok()
    }
}

impl LeadingNumber for f64 {
    fn parse_leading(raw: &str) -> Option<Self> {
        let text = raw.trim_start();
        let mut end = sign_len(text);
        let whole = digits_len(&text[end..]);
        end += whole;
        let mut fraction = 0;
        if text[end..].starts_with('.') {
            fraction = digits_len(&text[end + 1..]);
            if whole > 0 || fraction > 0 {
                end += 1 + fraction;
            }
        }
        if whole == 0 && fraction == 0 {
            return None;
        }
        if text[end..].starts_with(['e', 'E']) {
            let exponent_sign = sign_len(&text[end + 1..]);
            let exponent = digits_len(&text[end + 1 + exponent_sign..]);
            if exponent > 0 {
                end += 1 + exponent_sign + exponent;
            }
        }
        text[..end].parse().ok()
    }
}

fn sign_len(text: &str) -> usize {
    usize::from(text.starts_with(['+', '-']))
}

fn digits_len(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}
