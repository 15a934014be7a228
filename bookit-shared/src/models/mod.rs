pub mod booking;
pub mod decode;
pub mod experience;

pub use booking::{BookingConfirmation, BookingRecord, BookingSubmission};
pub use experience::{Experience, ExperienceId, Slot};
