//! Home and search listings.

use bookit_catalog::{filter_experiences, ExperienceCard, SearchQuery};
use bookit_core::{FetchState, FetchTicket, Loadable};
use bookit_shared::Experience;
use serde::Serialize;

const HOME_TITLE: &str = "BookIt | Discover Experiences";
const HOME_HEADING: &str = "Discover Unique Experiences";
const HOME_EMPTY: &str = "No experiences available at the moment.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage {
    pub page_title: String,
    pub heading: String,
    pub cards: Vec<ExperienceCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

#[derive(Debug)]
enum Listing {
    Home,
    /// Display text (trimmed, case kept) plus the normalised query.
    Search(String, SearchQuery),
}

#[derive(Debug)]
pub struct CatalogView {
    listing: Listing,
    catalog: FetchState<Vec<Experience>>,
}

impl CatalogView {
    pub fn home() -> Self {
        Self {
            listing: Listing::Home,
            catalog: FetchState::new(),
        }
    }

    pub fn search(raw: Option<&str>) -> Self {
        let display = raw.map(str::trim).unwrap_or_default().to_string();
        Self {
            listing: Listing::Search(display, SearchQuery::parse(raw)),
            catalog: FetchState::new(),
        }
    }

    pub fn begin(&mut self) -> FetchTicket {
        self.catalog.begin()
    }

    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Experience>, String>,
    ) -> bool {
        self.catalog.resolve(ticket, outcome)
    }

    pub fn error(&self) -> Option<&str> {
        self.catalog.state().error()
    }

    /// Rendering is a pure function of the query and whatever catalog landed.
    /// A failed or missing catalog renders as empty.
    pub fn page(&self, api_base_url: &str) -> ListingPage {
        let catalog: &[Experience] = match self.catalog.state() {
            Loadable::Ready(experiences) => experiences,
            _ => &[],
        };

        match &self.listing {
            Listing::Home => ListingPage {
                page_title: HOME_TITLE.to_string(),
                heading: HOME_HEADING.to_string(),
                cards: cards(catalog.iter(), api_base_url),
                empty_message: catalog.is_empty().then(|| HOME_EMPTY.to_string()),
            },
            Listing::Search(display, query) => {
                let matches = filter_experiences(catalog, query);
                let shown = if display.is_empty() { "All" } else { display.as_str() };
                ListingPage {
                    page_title: HOME_TITLE.to_string(),
                    heading: format!("Search Results for “{}”", shown),
                    empty_message: matches
                        .is_empty()
                        .then(|| format!("No experiences found for “{}”", display)),
                    cards: cards(matches.into_iter(), api_base_url),
                }
            }
        }
    }
}

fn cards<'a>(
    experiences: impl Iterator<Item = &'a Experience>,
    api_base_url: &str,
) -> Vec<ExperienceCard> {
    experiences
        .map(|exp| ExperienceCard::from_experience(exp, api_base_url))
        .collect()
}
