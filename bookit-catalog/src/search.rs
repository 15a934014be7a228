use bookit_shared::Experience;

/// Normalised free-text query: trimmed and lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        Self(raw.unwrap_or_default().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substring match against title or location. The empty query matches everything.
    pub fn matches(&self, experience: &Experience) -> bool {
        experience.title.to_lowercase().contains(&self.0)
            || experience
                .location
                .as_deref()
                .map(|loc| loc.to_lowercase().contains(&self.0))
                .unwrap_or(false)
    }
}

pub fn filter_experiences<'a>(
    catalog: &'a [Experience],
    query: &SearchQuery,
) -> Vec<&'a Experience> {
    catalog.iter().filter(|exp| query.matches(exp)).collect()
}
