//! Result page. Failure is decided from the query before anything is fetched;
//! success goes through pending to either a receipt or an inline error.

use bookit_core::{FetchState, FetchTicket, Loadable};
use bookit_shared::BookingRecord;
use serde::Serialize;

const HOME: &str = "/";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub booking_id: String,
    pub name: String,
    pub email: String,
    pub total_paid: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Receipt {
    fn from_record(booking_id: &str, record: &BookingRecord) -> Self {
        Self {
            booking_id: record.booking_id.clone().unwrap_or_else(|| booking_id.to_string()),
            name: record.name.expose().clone(),
            email: record.email.expose().clone(),
            total_paid: record.total_price,
            date: record.date.clone().filter(|d| !d.is_empty()),
            time: record.time.clone().filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultPage {
    Failed {
        heading: String,
        message: String,
        home_link: String,
    },
    Loading {
        message: String,
    },
    Error {
        message: String,
    },
    Confirmed {
        heading: String,
        message: String,
        receipt: Receipt,
        home_link: String,
    },
}

#[derive(Debug)]
pub struct ResultView {
    booking_id: Option<String>,
    booking: FetchState<BookingRecord>,
}

impl ResultView {
    /// Only `success=true` with an id leads to a lookup.
    pub fn from_query(success: Option<&str>, id: Option<&str>) -> Self {
        let booking_id = (success == Some("true"))
            .then(|| id.map(str::trim).filter(|id| !id.is_empty()))
            .flatten()
            .map(str::to_string);
        Self {
            booking_id,
            booking: FetchState::new(),
        }
    }

    /// The booking to fetch, or `None` for the terminal failure state.
    pub fn lookup(&self) -> Option<&str> {
        self.booking_id.as_deref()
    }

    pub fn begin(&mut self) -> Option<FetchTicket> {
        self.booking_id.as_ref()?;
        Some(self.booking.begin())
    }

    pub fn resolve(&mut self, ticket: FetchTicket, outcome: Result<BookingRecord, String>) -> bool {
        self.booking.resolve(ticket, outcome)
    }

    pub fn page(&self) -> ResultPage {
        let Some(booking_id) = self.booking_id.as_deref() else {
            return ResultPage::Failed {
                heading: "Booking Failed".to_string(),
                message: "Something went wrong. Please try again or contact support.".to_string(),
                home_link: HOME.to_string(),
            };
        };

        match self.booking.state() {
            Loadable::Idle | Loadable::Pending => ResultPage::Loading {
                message: "Loading booking details...".to_string(),
            },
            Loadable::Failed(message) => ResultPage::Error {
                message: message.clone(),
            },
            Loadable::Ready(record) => ResultPage::Confirmed {
                heading: "Booking Confirmed".to_string(),
                message: "Your experience has been successfully booked!".to_string(),
                receipt: Receipt::from_record(booking_id, record),
                home_link: HOME.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookit_shared::Masked;

    fn record() -> BookingRecord {
        BookingRecord {
            booking_id: Some("42".to_string()),
            name: Masked::from("Asha"),
            email: Masked::from("asha@example.com"),
            total_price: 1529.0,
            experience_id: Some(1),
            date: Some("2026-10-20".to_string()),
            time: None,
        }
    }

    #[test]
    fn test_failure_query_never_looks_up() {
        let queries = [
            (Some("false"), Some("42")),
            (None, Some("42")),
            (Some("true"), None),
            (Some("true"), Some(" ")),
        ];
        for (success, id) in queries {
            let mut view = ResultView::from_query(success, id);
            assert_eq!(view.lookup(), None);
            assert!(view.begin().is_none());
            assert!(matches!(
                view.page(),
                ResultPage::Failed { ref home_link, .. } if home_link == "/"
            ));
        }
    }

    #[test]
    fn test_pending_then_receipt() {
        let mut view = ResultView::from_query(Some("true"), Some("42"));
        assert_eq!(view.lookup(), Some("42"));

        let ticket = view.begin().unwrap();
        assert!(matches!(view.page(), ResultPage::Loading { .. }));

        assert!(view.resolve(ticket, Ok(record())));
        match view.page() {
            ResultPage::Confirmed { receipt, .. } => {
                assert_eq!(receipt.booking_id, "42");
                assert_eq!(receipt.total_paid, 1529.0);
                assert_eq!(receipt.date.as_deref(), Some("2026-10-20"));
                assert_eq!(receipt.time, None);
            }
            other => panic!("expected receipt, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_error_is_inline() {
        let mut view = ResultView::from_query(Some("true"), Some("42"));
        let ticket = view.begin().unwrap();
        view.resolve(ticket, Err("Failed to load booking details".to_string()));
        assert_eq!(
            view.page(),
            ResultPage::Error {
                message: "Failed to load booking details".to_string()
            }
        );
    }
}
