pub mod checkout;
pub mod draft;
pub mod listing;
pub mod receipt;
pub mod selection;

pub use checkout::{
    CheckoutError, CheckoutForm, CheckoutSession, CheckoutView, PromoState, SubmittedBooking,
};
pub use draft::{BookingDraft, DraftError, DraftParams};
pub use listing::{CatalogView, ListingPage};
pub use receipt::{Receipt, ResultPage, ResultView};
pub use selection::{DetailsView, SlotSelector};
