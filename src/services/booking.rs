use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::DialogueError;
use crate::models::{BookingRecord, TravelOption};

/// Append-only persistence for finalized bookings.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn append(&self, record: &BookingRecord) -> anyhow::Result<()>;
    async fn list_all(&self) -> anyhow::Result<Vec<BookingRecord>>;
}

pub struct SqliteBookingStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteBookingStore {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| anyhow::anyhow!("booking database lock poisoned"))
    }
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    async fn append(&self, record: &BookingRecord) -> anyhow::Result<()> {
        let db = self.lock()?;
        queries::insert_booking(&db, record)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<BookingRecord>> {
        let db = self.lock()?;
        queries::list_bookings(&db)
    }
}

pub fn build_record(
    id: String,
    option: TravelOption,
    city: String,
    user_name: String,
    date: NaiveDate,
) -> BookingRecord {
    BookingRecord {
        id,
        kind: option.kind(),
        city,
        option,
        user_name,
        date,
    }
}

pub fn render_confirmation(record: &BookingRecord) -> String {
    let details = match &record.option {
        TravelOption::Hotel(h) => format!("Hotel: {} in {}", h.name, record.city),
        TravelOption::Flight(f) => {
            format!("Flight: {} {} to {}", f.airline, f.flight_number, record.city)
        }
    };

    format!(
        "Booking confirmed!\n\
         Confirmation ID: {}\n\
         Name: {}\n\
         Type: {}\n\
         {details}\n\
         Date: {}\n\
         Thank you for choosing our service!",
        record.id,
        record.user_name,
        record.kind.title(),
        record.date.format("%Y-%m-%d"),
    )
}

/// Persist `record` and render its confirmation. Nothing is rendered
/// unless the store accepted the record.
pub async fn finalize(store: &dyn BookingStore, record: BookingRecord) -> Result<String, DialogueError> {
    store
        .append(&record)
        .await
        .map_err(|e| DialogueError::PersistenceFailure(format!("{e:#}")))?;

    tracing::info!(
        booking_id = %record.id,
        kind = record.kind.as_str(),
        city = %record.city,
        "booking finalized"
    );

    Ok(render_confirmation(&record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{BookingKind, FlightOption, HotelOption};

    struct FailingStore;

    #[async_trait]
    impl BookingStore for FailingStore {
        async fn append(&self, _record: &BookingRecord) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }

        async fn list_all(&self) -> anyhow::Result<Vec<BookingRecord>> {
            Ok(vec![])
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn hotel() -> TravelOption {
        TravelOption::Hotel(HotelOption {
            name: "Paris Riverside Inn".to_string(),
            price: 140,
            rating: 4.2,
        })
    }

    #[test]
    fn test_build_record_takes_kind_from_option() {
        let flight = TravelOption::Flight(FlightOption {
            airline: "Air France".to_string(),
            flight_number: "AF-123".to_string(),
            departure_time: "07:30".to_string(),
            price: 300,
        });
        let record = build_record("id".into(), flight, "Paris".into(), "Bob".into(), date());
        assert_eq!(record.kind, BookingKind::Flight);
    }

    #[test]
    fn test_render_hotel_confirmation() {
        let record = build_record("abc-123".into(), hotel(), "Paris".into(), "Alice Smith".into(), date());
        let text = render_confirmation(&record);
        assert!(text.starts_with("Booking confirmed!"));
        assert!(text.contains("Confirmation ID: abc-123"));
        assert!(text.contains("Name: Alice Smith"));
        assert!(text.contains("Type: Hotel"));
        assert!(text.contains("Hotel: Paris Riverside Inn in Paris"));
        assert!(text.contains("Date: 2026-10-19"));
    }

    #[test]
    fn test_render_flight_confirmation() {
        let flight = TravelOption::Flight(FlightOption {
            airline: "IndiGo".to_string(),
            flight_number: "6E-451".to_string(),
            departure_time: "18:15".to_string(),
            price: 210,
        });
        let record = build_record("f1".into(), flight, "Hyderabad".into(), "Ravi".into(), date());
        let text = render_confirmation(&record);
        assert!(text.contains("Type: Flight"));
        assert!(text.contains("Flight: IndiGo 6E-451 to Hyderabad"));
    }

    #[tokio::test]
    async fn test_finalize_persists_then_renders() {
        let conn = db::init_db(":memory:").unwrap();
        let store = SqliteBookingStore::new(Arc::new(Mutex::new(conn)));
        let record = build_record("b1".into(), hotel(), "Paris".into(), "Alice".into(), date());

        let text = finalize(&store, record.clone()).await.unwrap();
        assert!(text.contains("b1"));
        assert_eq!(store.list_all().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_finalize_reports_persistence_failure() {
        let record = build_record("b1".into(), hotel(), "Paris".into(), "Alice".into(), date());
        let err = finalize(&FailingStore, record).await.unwrap_err();
        assert!(matches!(err, DialogueError::PersistenceFailure(ref reason) if reason.contains("disk full")));
    }
}
