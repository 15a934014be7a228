use bookit_shared::{Experience, ExperienceId};
use serde::Serialize;

use crate::media::{resolve_image, ImageVariant};

const DEFAULT_CARD_BLURB: &str =
    "An unforgettable experience with certified guides and small groups.";

/// One tile on the home or search listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceCard {
    pub id: ExperienceId,
    pub title: String,
    pub location: Option<String>,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub details_path: String,
}

impl ExperienceCard {
    pub fn from_experience(experience: &Experience, api_base_url: &str) -> Self {
        let description = if experience.description.trim().is_empty() {
            DEFAULT_CARD_BLURB.to_string()
        } else {
            experience.description.clone()
        };
        Self {
            id: experience.id,
            title: experience.title.clone(),
            location: experience.location.clone(),
            description,
            image_url: resolve_image(experience.image.as_deref(), api_base_url, ImageVariant::Card),
            price: experience.price,
            details_path: format!("/details/{}", experience.id),
        }
    }
}

/// Header block of the details page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceBanner {
    pub id: ExperienceId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub image_url: String,
}

impl ExperienceBanner {
    pub fn from_experience(experience: &Experience, api_base_url: &str) -> Self {
        Self {
            id: experience.id,
            title: experience.title.clone(),
            description: experience.description.clone(),
            location: experience.location.clone(),
            image_url: resolve_image(
                experience.image.as_deref(),
                api_base_url,
                ImageVariant::Banner,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_fills_blank_description() {
        let exp: Experience = serde_json::from_value(serde_json::json!({
            "id": 9,
            "title": "Backwater Cruise",
            "price": "2200",
            "image": "img/cruise.jpg"
        }))
        .unwrap();

        let card = ExperienceCard::from_experience(&exp, "http://localhost:5000");
        assert_eq!(card.description, DEFAULT_CARD_BLURB);
        assert_eq!(card.image_url, "http://localhost:5000/img/cruise.jpg");
        assert_eq!(card.price, 2200.0);
        assert_eq!(card.details_path, "/details/9");
    }
}
