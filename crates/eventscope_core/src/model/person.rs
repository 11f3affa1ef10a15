//! Person registry records and search payloads.
//!
//! # Invariants
//! - `PersonRecord` is read-only; the registry owns it.
//! - Blank criteria fields are omitted from the request body so the registry
//!   treats them as wildcards.

use crate::model::page::Page;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque registry identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One registry entry. Phone and id-card numbers arrive already masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub person_id: PersonId,
    #[serde(rename = "name_cn", default)]
    pub name: String,
    #[serde(rename = "id_card_no", default)]
    pub id_card: String,
    #[serde(rename = "mobile_phone", default)]
    pub phone: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub nationality_code: Option<String>,
    #[serde(default)]
    pub ethnicity_code: Option<String>,
    #[serde(default)]
    pub hukou_province: Option<String>,
    #[serde(default)]
    pub hukou_city: Option<String>,
    #[serde(default)]
    pub hukou_county: Option<String>,
    #[serde(default)]
    pub reside_province: Option<String>,
    #[serde(default)]
    pub reside_city: Option<String>,
    #[serde(default)]
    pub reside_county: Option<String>,
    #[serde(default)]
    pub highest_education: Option<String>,
    #[serde(default)]
    pub occupation_code: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
}

/// Paged registry search result; replaced wholesale on every search.
pub type PersonLookupResult = Page<PersonRecord>;

/// Name/phone/id-card triple used to query the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonCriteria {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub id_card: Option<String>,
}

impl PersonCriteria {
    /// Builds criteria, dropping blank values.
    pub fn new(name: Option<&str>, phone: Option<&str>, id_card: Option<&str>) -> Self {
        Self {
            name: non_blank(name),
            phone: non_blank(phone),
            id_card: non_blank(id_card),
        }
    }

    /// True when no field would filter the search.
    pub fn is_blank(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.id_card.is_none()
    }
}

/// Body of `POST /people/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_card: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl PersonSearchRequest {
    pub fn new(criteria: &PersonCriteria, page: u32, page_size: u32) -> Self {
        Self {
            name: criteria.name.clone(),
            phone: criteria.phone.clone(),
            id_card: criteria.id_card.clone(),
            page: page.max(1),
            page_size,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{PersonCriteria, PersonRecord, PersonSearchRequest};

    #[test]
    fn blank_criteria_fields_are_not_serialized() {
        let criteria = PersonCriteria::new(Some("  "), Some("138****0000"), None);
        let body = serde_json::to_value(PersonSearchRequest::new(&criteria, 0, 10)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"phone": "138****0000", "page": 1, "page_size": 10})
        );
    }

    #[test]
    fn person_record_maps_registry_field_names() {
        let person: PersonRecord = serde_json::from_str(
            r#"{"person_id":"p-9","name_cn":"李四","id_card_no":"3301**********1234",
                "mobile_phone":"139****1111","gender":"男"}"#,
        )
        .unwrap();
        assert_eq!(person.person_id.as_str(), "p-9");
        assert_eq!(person.name, "李四");
        assert_eq!(person.gender.as_deref(), Some("男"));
        assert!(person.birth_date.is_none());
    }
}
