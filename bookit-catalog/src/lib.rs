pub mod experience;
pub mod media;
pub mod pricing;
pub mod search;
pub mod slots;

pub use experience::{ExperienceBanner, ExperienceCard};
pub use media::{resolve_image, ImageVariant};
pub use pricing::{CheckoutQuote, PricePreview, PricingConfig, PricingEngine, PromoOutcome};
pub use search::{filter_experiences, SearchQuery};
pub use slots::{time_grid, SlotError, TimeOption, DEFAULT_TIMES};
