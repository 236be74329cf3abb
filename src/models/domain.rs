use crate::core::encoding::decode_image;
use crate::services::StylistError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender a clothing item is catalogued under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Male")]
    Male,
    #[serde(rename = "Female")]
    Female,
}

impl Gender {
    /// Wire value sent to the Stylist API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("unknown gender '{}', expected Male or Female", other)),
        }
    }
}

/// Clothing item as stored by the Stylist backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Empty when the backend only acknowledges an upload with `{id, success}`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
    /// Base64 image payload, when the backend includes one
    #[serde(
        default,
        deserialize_with = "deserialize_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

impl ClothingItem {
    /// Decode the attached image into raw bytes.
    ///
    /// Returns `Ok(None)` when the item carries no image.
    pub fn image_bytes(&self) -> Result<Option<Vec<u8>>, StylistError> {
        self.image.as_deref().map(decode_image).transpose()
    }
}

/// A stored item paired with its similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub score: f64,
    pub data_entry: ClothingItem,
}

/// One entry of a similarity response.
///
/// The backend answers either with bare items (ranked by position) or with
/// `{score, data_entry}` records. An entry is treated as scored exactly when
/// its object carries a `score` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimilarityMatch {
    Scored(SimilarityResult),
    Item(ClothingItem),
}

impl SimilarityMatch {
    pub fn item(&self) -> &ClothingItem {
        match self {
            Self::Scored(result) => &result.data_entry,
            Self::Item(item) => item,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Scored(result) => Some(result.score),
            Self::Item(_) => None,
        }
    }

    pub fn into_item(self) -> ClothingItem {
        match self {
            Self::Scored(result) => result.data_entry,
            Self::Item(item) => item,
        }
    }
}

impl<'de> Deserialize<'de> for SimilarityMatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let scored = value
            .as_object()
            .map(|obj| obj.contains_key("score"))
            .unwrap_or(false);

        if scored {
            SimilarityResult::deserialize(value)
                .map(Self::Scored)
                .map_err(de::Error::custom)
        } else {
            ClothingItem::deserialize(value)
                .map(Self::Item)
                .map_err(de::Error::custom)
        }
    }
}

/// Item ids are strings on the client side; the backend may emit integers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
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
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

fn deserialize_image<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|image| !image.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gender_wire_format() {
        assert_eq!(serde_json::to_value(Gender::Male).unwrap(), json!("Male"));
        assert_eq!(serde_json::to_value(Gender::Female).unwrap(), json!("Female"));
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" MALE ".parse::<Gender>().unwrap(), Gender::Male);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_item_with_numeric_id_and_missing_fields() {
        let item: ClothingItem = serde_json::from_value(json!({
            "id": 42,
            "name": "Denim jacket",
        }))
        .unwrap();

        assert_eq!(item.id, "42");
        assert!(item.descriptions.is_empty());
        assert!(item.image.is_none());
        assert_eq!(item.image_bytes().unwrap(), None);
    }

    #[test]
    fn test_signed_and_float_ids_are_kept_as_text() {
        let negative: ClothingItem =
            serde_json::from_value(json!({"id": -3, "name": "Vest"})).unwrap();
        assert_eq!(negative.id, "-3");

        let float: ClothingItem =
            serde_json::from_value(json!({"id": 1.5, "name": "Vest"})).unwrap();
        assert_eq!(float.id, "1.5");
    }

    #[test]
    fn test_upload_acknowledgement_parses() {
        let item: ClothingItem =
            serde_json::from_value(json!({"id": "clothes_id", "success": true})).unwrap();
        assert_eq!(item.id, "clothes_id");
        assert!(item.name.is_empty());
    }

    #[test]
    fn test_empty_image_is_none() {
        let item: ClothingItem = serde_json::from_value(json!({
            "id": "a",
            "name": "Scarf",
            "descriptions": ["wool"],
            "image": "",
        }))
        .unwrap();
        assert!(item.image.is_none());
    }

    #[test]
    fn test_similarity_shape_detection() {
        let scored: SimilarityMatch = serde_json::from_value(json!({
            "score": 0.91,
            "data_entry": {"id": "1", "name": "Coat", "descriptions": []}
        }))
        .unwrap();
        assert_eq!(scored.score(), Some(0.91));
        assert_eq!(scored.item().name, "Coat");

        let flat: SimilarityMatch = serde_json::from_value(json!({
            "id": "2", "name": "Boots", "descriptions": ["leather"]
        }))
        .unwrap();
        assert_eq!(flat.score(), None);
        assert_eq!(flat.into_item().descriptions, vec!["leather".to_string()]);
    }

    #[test]
    fn test_scored_entry_without_data_entry_is_rejected() {
        let result = serde_json::from_value::<SimilarityMatch>(json!({
            "score": 0.5, "id": "1", "name": "Hat"
        }));
        assert!(result.is_err());
    }
}
