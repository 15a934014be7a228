/// Stock photo used whenever an experience has no usable image.
const FALLBACK_PHOTO: &str =
    "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?auto=format&fit=crop";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageVariant {
    /// Listing card.
    Card,
    /// Details page header.
    Banner,
}

impl ImageVariant {
    fn fallback(self) -> String {
        match self {
            ImageVariant::Card => format!("{}&w=400&q=60", FALLBACK_PHOTO),
            ImageVariant::Banner => format!("{}&w=1200&q=80", FALLBACK_PHOTO),
        }
    }
}

/// Turn a catalog image reference into something a browser can load.
pub fn resolve_image(image: Option<&str>, api_base_url: &str, variant: ImageVariant) -> String {
    let image = match image.map(str::trim) {
        Some(img) if !img.is_empty() && !img.contains("undefined") => img,
        _ => return variant.fallback(),
    };

    if image.starts_with("http") {
        return image.to_string();
    }

    let base = api_base_url.trim_end_matches('/');
    if image.starts_with('/') {
        format!("{}{}", base, image)
    } else {
        format!("{}/{}", base, image)
    }
}
