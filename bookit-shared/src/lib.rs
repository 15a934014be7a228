pub mod models;
pub mod pii;

pub use models::{
    BookingConfirmation, BookingRecord, BookingSubmission, Experience, ExperienceId, Slot,
};
pub use pii::Masked;
