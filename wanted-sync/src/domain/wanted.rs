//! Wanted Record Entity
//!
//! A wanted-person entry as kept in the local store, plus the payload used to
//! create one.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use crate::text::{camel_case, title_case_from_snake};

/// Shown in place of an absent or empty value
pub const NOT_AVAILABLE: &str = "N/A";

/// Detail fields shown on a card and editable by the user, in display order
pub const DETAIL_FIELDS: [&str; 8] = [
    "age_range",
    "eyes",
    "hair",
    "height_max",
    "place_of_birth",
    "race",
    "sex",
    "weight_max",
];

/// One picture of a wanted person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantedImage {
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Height or weight value.
///
/// The FBI feed sends numbers, edited records come back as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(serde_json::Number),
    Text(String),
}

impl Measure {
    /// Parse user input, keeping numbers numeric
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<serde_json::Number>() {
            Ok(n) => Measure::Number(n),
            Err(_) => Measure::Text(input.to_string()),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Measure::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Number(n) => write!(f, "{}", n),
            Measure::Text(s) => f.write_str(s),
        }
    }
}

/// Everything the store keeps about a person except the id.
///
/// This is the body of a create request. Absent values serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WantedFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<WantedImage>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub eyes: Option<String>,
    #[serde(default)]
    pub hair: Option<String>,
    #[serde(default)]
    pub height_min: Option<Measure>,
    #[serde(default)]
    pub height_max: Option<Measure>,
    #[serde(default)]
    pub weight_min: Option<Measure>,
    #[serde(default)]
    pub weight_max: Option<Measure>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub url: String,
}

/// A wanted person stored in the local store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantedRecord {
    /// Assigned by the local store
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(flatten)]
    pub fields: WantedFields,
}

impl WantedRecord {
    pub fn new(id: impl Into<String>, fields: WantedFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Title up to the first dash, e.g. "JOHN DOE - Murder" -> "JOHN DOE"
    pub fn short_title(&self) -> &str {
        self.fields.title.split('-').next().unwrap_or("").trim()
    }

    /// Details if present, otherwise the description. Empty paragraph markup
    /// is dropped before deciding.
    pub fn elaboration(&self) -> Option<String> {
        let clean = |text: &Option<String>| {
            text.as_deref()
                .map(|t| t.split("<p></p>").collect::<String>())
                .filter(|t| !t.trim().is_empty())
        };
        clean(&self.fields.details).or_else(|| clean(&self.fields.description))
    }

    /// Raw value of a detail field, `None` when absent
    pub fn detail(&self, key: &str) -> Option<String> {
        let f = &self.fields;
        match key {
            "age_range" => f.age_range.clone(),
            "eyes" => f.eyes.clone(),
            "hair" => f.hair.clone(),
            "height_min" => f.height_min.as_ref().map(ToString::to_string),
            "height_max" => f.height_max.as_ref().map(ToString::to_string),
            "weight_min" => f.weight_min.as_ref().map(ToString::to_string),
            "weight_max" => f.weight_max.as_ref().map(ToString::to_string),
            "place_of_birth" => f.place_of_birth.clone(),
            "race" => f.race.clone(),
            "sex" => f.sex.clone(),
            _ => None,
        }
    }

    /// Card rows as (label, value), with "N/A" for absent or empty values
    pub fn detail_rows(&self) -> Vec<(String, String)> {
        DETAIL_FIELDS
            .iter()
            .map(|key| {
                let value = self
                    .detail(key)
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                (title_case_from_snake(key), value)
            })
            .collect()
    }

    /// Set one editable detail field, named in snake or camel case.
    /// An empty value clears it.
    pub fn apply_edit(&mut self, key: &str, value: &str) -> DomainResult<()> {
        let key = editable_field(key).ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "'{}' is not an editable field (expected one of: {})",
                key,
                DETAIL_FIELDS.join(", ")
            ))
        })?;

        let text = if value.trim().is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        let measure = text.as_deref().map(Measure::parse).filter(|m| !m.is_blank());

        let f = &mut self.fields;
        match key {
            "age_range" => f.age_range = text,
            "eyes" => f.eyes = text,
            "hair" => f.hair = text,
            "height_max" => f.height_max = measure,
            "place_of_birth" => f.place_of_birth = text,
            "race" => f.race = text,
            "sex" => f.sex = text,
            "weight_max" => f.weight_max = measure,
            other => {
                return Err(DomainError::Internal(format!("no setter for field {}", other)))
            }
        }
        Ok(())
    }

    /// Case-insensitive match against everything a card shows.
    /// An empty term matches every record.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let mut haystack = vec![self.fields.title.clone()];
        haystack.extend(self.elaboration());
        haystack.extend(
            self.fields
                .images
                .iter()
                .filter_map(|image| image.caption.clone()),
        );
        haystack.extend(DETAIL_FIELDS.iter().filter_map(|key| self.detail(key)));

        haystack
            .iter()
            .any(|text| text.to_lowercase().contains(&term))
    }
}

impl Entity for WantedRecord {
    type Id = String;
    type Draft = WantedFields;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Resolve `ageRange` or `age_range` to the canonical field name
pub fn editable_field(key: &str) -> Option<&'static str> {
    let key = key.trim();
    DETAIL_FIELDS
        .iter()
        .copied()
        .find(|field| *field == key || camel_case(field) == key)
}

/// Filter records for a search term, keeping store order
pub fn filter_records<'a>(records: &'a [WantedRecord], term: &str) -> Vec<&'a WantedRecord> {
    records.iter().filter(|r| r.matches_search(term)).collect()
}

/// json-server hands out numeric ids in older versions and strings in newer ones
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
