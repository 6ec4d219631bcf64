use anyhow::Context;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::models::{BookingKind, BookingRecord, TravelOption};

// ── Bookings ──

pub fn insert_booking(conn: &Connection, record: &BookingRecord) -> anyhow::Result<()> {
    let option_json =
        serde_json::to_string(&record.option).context("failed to serialize booking option")?;

    conn.execute(
        "INSERT INTO bookings (id, kind, city, option, user_name, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.id,
            record.kind.as_str(),
            record.city,
            option_json,
            record.user_name,
            record.date.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(())
}

pub fn list_bookings(conn: &Connection) -> anyhow::Result<Vec<BookingRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, city, option, user_name, date
         FROM bookings ORDER BY created_at ASC, rowid ASC",
    )?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<BookingRecord> {
    let id: String = row.get(0)?;
    let kind_str: String = row.get(1)?;
    let city: String = row.get(2)?;
    let option_json: String = row.get(3)?;
    let user_name: String = row.get(4)?;
    let date_str: String = row.get(5)?;

    let kind = BookingKind::parse(&kind_str)
        .ok_or_else(|| anyhow::anyhow!("unknown booking kind '{kind_str}' for {id}"))?;
    let option: TravelOption = serde_json::from_str(&option_json)
        .with_context(|| format!("malformed option for booking {id}"))?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .with_context(|| format!("malformed date for booking {id}"))?;

    Ok(BookingRecord {
        id,
        kind,
        city,
        option,
        user_name,
        date,
    })
}
