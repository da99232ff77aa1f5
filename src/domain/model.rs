use crate::utils::error::RowValidationError;
use serde::{Deserialize, Serialize};

/// Loosely typed row as returned by the data source. May be missing fields
/// or carry wrong types; it is either validated into a [`ServiceRecord`]
/// or discarded, never stored.
pub type RawRow = serde_json::Value;

/// A validated service row. Only constructible through [`ServiceRecord::decode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub organization_fiscal_code: String,
    pub organization_name: String,
    pub quality: f64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ServiceRecord {
    /// Decodes a raw row, rejecting it when a required field is missing or
    /// has the wrong type. Pure; the caller decides what to do with rejects.
    pub fn decode(raw: &RawRow) -> Result<Self, RowValidationError> {
        serde_json::from_value(raw.clone()).map_err(|e| RowValidationError {
            reason: e.to_string(),
        })
    }
}

/// Entry of the compact catalog view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactServiceEntry {
    #[serde(rename = "i")]
    pub id: String,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "q")]
    pub quality: f64,
}

/// Entry of the extended catalog view. Absent optionals are omitted from
/// the serialized form, not rendered as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedServiceEntry {
    #[serde(rename = "i")]
    pub id: String,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "q")]
    pub quality: f64,
    #[serde(rename = "sc", skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(rename = "d", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&ServiceRecord> for CompactServiceEntry {
    fn from(record: &ServiceRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            quality: record.quality,
        }
    }
}

impl From<&ServiceRecord> for ExtendedServiceEntry {
    fn from(record: &ServiceRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            quality: record.quality,
            scope: record.scope.clone(),
            description: record.description.clone(),
        }
    }
}

/// All services of one organization, in the order their rows were scanned.
/// The organization name is the one seen on the group's first row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationGroup<E> {
    #[serde(rename = "fc")]
    pub organization_fiscal_code: String,
    #[serde(rename = "o")]
    pub organization_name: String,
    #[serde(rename = "s")]
    pub services: Vec<E>,
}
