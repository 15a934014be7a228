use serde::{Deserialize, Serialize};

use super::decode;

pub type ExperienceId = i64;

/// A bookable activity as served by the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub id: ExperienceId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Absolute URL or a path relative to the API host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "decode::lenient_price")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<Slot>>,
}

/// An offered time unit. The catalog sends either a bare label
/// (`"10:00 AM"`) or a `{date, available}` record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Slot {
    Label(String),
    Scheduled {
        date: String,
        #[serde(default = "default_available")]
        available: bool,
    },
}

fn default_available() -> bool {
    true
}

impl Slot {
    pub fn is_available(&self) -> bool {
        match self {
            Slot::Label(_) => true,
            Slot::Scheduled { available, .. } => *available,
        }
    }
}

impl Experience {
    pub fn slots(&self) -> &[Slot] {
        self.slots.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_with_string_price_and_label_slots() {
        let json = r#"{
            "id": 7,
            "title": "Desert Safari",
            "description": "Dunes at dusk",
            "price": "1499",
            "location": "Dubai",
            "slots": ["10:00 AM", "04:00 PM"]
        }"#;
        let exp: Experience = serde_json::from_str(json).unwrap();
        assert_eq!(exp.price, 1499.0);
        assert_eq!(exp.image, None);
        assert_eq!(
            exp.slots(),
            &[
                Slot::Label("10:00 AM".to_string()),
                Slot::Label("04:00 PM".to_string())
            ]
        );
    }

    #[test]
    fn test_experience_with_scheduled_slots() {
        let json = r#"{
            "id": 3,
            "title": "Mountain Trek",
            "price": 2500,
            "slots": [
                {"date": "2026-11-02T07:30:00+05:30", "available": true},
                {"date": "2026-11-03T07:30:00+05:30", "available": false}
            ]
        }"#;
        let exp: Experience = serde_json::from_str(json).unwrap();
        assert_eq!(exp.description, "");
        assert_eq!(exp.slots().len(), 2);
        assert!(exp.slots()[0].is_available());
        assert!(!exp.slots()[1].is_available());
    }

    #[test]
    fn test_missing_slots_is_empty() {
        let exp: Experience =
            serde_json::from_str(r#"{"id": 1, "title": "Kayak", "price": 800}"#).unwrap();
        assert!(exp.slots().is_empty());
    }
}
