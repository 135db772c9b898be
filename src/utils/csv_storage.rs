//! CSV-file storage backend
//!
//! Persists the room roster and the payment journal as two CSV files with
//! fixed schemas. Reads validate every field explicitly and fail fast with
//! a storage error on any malformed row; nothing is silently coerced.
//! Writes stage a complete temporary file next to the target and rename it
//! into place, so a failed write leaves the previous file generation
//! intact.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::traits::*;
use crate::types::*;

const ROOMS_FILE: &str = "room_data.csv";
const PAYMENTS_FILE: &str = "payments_data.csv";

const ROOM_HEADER: [&str; 11] = [
    "room_id",
    "tenant_name",
    "contact_info",
    "rent_price",
    "amount_paid",
    "contract_term",
    "start_date",
    "end_date",
    "due_date",
    "notes",
    "updated_at",
];

const PAYMENT_HEADER: [&str; 5] = ["id", "room_id", "payment_date", "amount", "months_paid"];

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// File-backed [`LedgerStorage`] over two CSV files in one directory
#[derive(Debug, Clone)]
pub struct CsvStorage {
    rooms_path: PathBuf,
    payments_path: PathBuf,
}

impl CsvStorage {
    /// Open a storage rooted at `data_dir`, using the conventional
    /// `room_data.csv` and `payments_data.csv` file names
    ///
    /// Missing files read as empty tables; they are created on first write.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            rooms_path: dir.join(ROOMS_FILE),
            payments_path: dir.join(PAYMENTS_FILE),
        }
    }

    /// Path of the room roster file
    pub fn rooms_path(&self) -> &Path {
        &self.rooms_path
    }

    /// Path of the payment journal file
    pub fn payments_path(&self) -> &Path {
        &self.payments_path
    }

    fn read_rooms(&self) -> LedgerResult<Vec<Room>> {
        if !self.rooms_path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.rooms_path).map_err(storage_err)?;
        check_header(&mut reader, &ROOM_HEADER, ROOMS_FILE)?;

        let mut rooms = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result.map_err(storage_err)?;
            rooms.push(parse_room(&record).map_err(|e| row_err(ROOMS_FILE, line, e))?);
        }
        Ok(rooms)
    }

    fn read_payments(&self) -> LedgerResult<Vec<Payment>> {
        if !self.payments_path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.payments_path).map_err(storage_err)?;
        check_header(&mut reader, &PAYMENT_HEADER, PAYMENTS_FILE)?;

        let mut payments = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result.map_err(storage_err)?;
            payments.push(parse_payment(&record).map_err(|e| row_err(PAYMENTS_FILE, line, e))?);
        }
        Ok(payments)
    }

    /// Write the full roster to a staging file and return its path
    fn stage_rooms(&self, rooms: &[Room]) -> LedgerResult<PathBuf> {
        let tmp = staging_path(&self.rooms_path);
        let mut writer = csv::Writer::from_path(&tmp).map_err(storage_err)?;

        writer.write_record(ROOM_HEADER).map_err(storage_err)?;
        for room in rooms {
            writer
                .write_record(&[
                    room.room_id.clone(),
                    room.tenant_name.clone(),
                    room.contact_info.clone(),
                    room.rent_price.to_string(),
                    room.amount_paid.to_string(),
                    room.contract_term.as_str().to_string(),
                    room.start_date.to_string(),
                    room.end_date.to_string(),
                    room.due_date.to_string(),
                    room.notes.clone(),
                    room.updated_at.format(DATETIME_FORMAT).to_string(),
                ])
                .map_err(storage_err)?;
        }

        sync_writer(writer)?;
        Ok(tmp)
    }

    fn stage_payments(&self, payments: &[Payment]) -> LedgerResult<PathBuf> {
        let tmp = staging_path(&self.payments_path);
        let mut writer = csv::Writer::from_path(&tmp).map_err(storage_err)?;

        writer.write_record(PAYMENT_HEADER).map_err(storage_err)?;
        for payment in payments {
            writer
                .write_record(&[
                    payment.id.clone(),
                    payment.room_id.clone(),
                    payment.payment_date.to_string(),
                    payment.amount.to_string(),
                    payment.months_paid.to_string(),
                ])
                .map_err(storage_err)?;
        }

        sync_writer(writer)?;
        Ok(tmp)
    }
}

#[async_trait]
impl LedgerStorage for CsvStorage {
    async fn load_rooms(&self) -> LedgerResult<Vec<Room>> {
        self.read_rooms()
    }

    async fn save_rooms(&mut self, rooms: &[Room]) -> LedgerResult<()> {
        let tmp = self.stage_rooms(rooms)?;
        fs::rename(&tmp, &self.rooms_path).map_err(storage_err)
    }

    async fn load_payments(&self) -> LedgerResult<Vec<Payment>> {
        self.read_payments()
    }

    async fn commit_payment(&mut self, rooms: &[Room], payment: &Payment) -> LedgerResult<()> {
        let mut payments = self.read_payments()?;
        payments.push(payment.clone());

        // Stage both files completely before renaming either; the rename
        // pair is the only window where the stores can diverge, and the
        // journal goes first so integrity checking can repair the roster
        let rooms_tmp = self.stage_rooms(rooms)?;
        let payments_tmp = self.stage_payments(&payments)?;

        fs::rename(&payments_tmp, &self.payments_path).map_err(storage_err)?;
        fs::rename(&rooms_tmp, &self.rooms_path).map_err(storage_err)
    }
}

fn storage_err(err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(err.to_string())
}

fn row_err(file: &str, line: usize, err: LedgerError) -> LedgerError {
    LedgerError::Storage(format!("{}, row {}: {}", file, line + 1, err))
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn sync_writer(writer: csv::Writer<fs::File>) -> LedgerResult<()> {
    let file = writer.into_inner().map_err(storage_err)?;
    file.sync_all().map_err(storage_err)
}

fn check_header(
    reader: &mut csv::Reader<fs::File>,
    expected: &[&str],
    file: &str,
) -> LedgerResult<()> {
    let headers = reader.headers().map_err(storage_err)?;
    if headers.iter().ne(expected.iter().copied()) {
        return Err(LedgerError::Storage(format!(
            "{}: unexpected header {:?}, expected {:?}",
            file,
            headers.iter().collect::<Vec<_>>(),
            expected
        )));
    }
    Ok(())
}

fn field<'a>(record: &'a csv::StringRecord, index: usize, name: &str) -> LedgerResult<&'a str> {
    record
        .get(index)
        .ok_or_else(|| LedgerError::Storage(format!("Missing field '{}'", name)))
}

fn parse_amount(value: &str, name: &str) -> LedgerResult<BigDecimal> {
    BigDecimal::from_str(value.trim())
        .map_err(|_| LedgerError::Storage(format!("Field '{}' is not a decimal: '{}'", name, value)))
}

fn parse_date(value: &str, name: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Storage(format!("Field '{}' is not a date: '{}'", name, value)))
}

fn parse_datetime(value: &str, name: &str) -> LedgerResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT).map_err(|_| {
        LedgerError::Storage(format!("Field '{}' is not a timestamp: '{}'", name, value))
    })
}

fn parse_months(value: &str) -> LedgerResult<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        LedgerError::Storage(format!("Field 'months_paid' is not an integer: '{}'", value))
    })
}

fn parse_term(value: &str) -> LedgerResult<ContractTerm> {
    ContractTerm::from_str(value).map_err(|_| {
        LedgerError::Storage(format!("Field 'contract_term' is not a known term: '{}'", value))
    })
}

fn parse_room(record: &csv::StringRecord) -> LedgerResult<Room> {
    Ok(Room {
        room_id: field(record, 0, "room_id")?.to_string(),
        tenant_name: field(record, 1, "tenant_name")?.to_string(),
        contact_info: field(record, 2, "contact_info")?.to_string(),
        rent_price: parse_amount(field(record, 3, "rent_price")?, "rent_price")?,
        amount_paid: parse_amount(field(record, 4, "amount_paid")?, "amount_paid")?,
        contract_term: parse_term(field(record, 5, "contract_term")?)?,
        start_date: parse_date(field(record, 6, "start_date")?, "start_date")?,
        end_date: parse_date(field(record, 7, "end_date")?, "end_date")?,
        due_date: parse_date(field(record, 8, "due_date")?, "due_date")?,
        notes: field(record, 9, "notes")?.to_string(),
        updated_at: parse_datetime(field(record, 10, "updated_at")?, "updated_at")?,
    })
}

fn parse_payment(record: &csv::StringRecord) -> LedgerResult<Payment> {
    Ok(Payment {
        id: field(record, 0, "id")?.to_string(),
        room_id: field(record, 1, "room_id")?.to_string(),
        payment_date: parse_date(field(record, 2, "payment_date")?, "payment_date")?,
        amount: parse_amount(field(record, 3, "amount")?, "amount")?,
        months_paid: parse_months(field(record, 4, "months_paid")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_room() -> Room {
        let mut room = Room::new("Room 1".to_string(), date(2024, 1, 1));
        room.tenant_name = "Nguyen, Van A".to_string();
        room.contact_info = "0901 234 567".to_string();
        room.rent_price = BigDecimal::from_str("1500000.50").unwrap();
        room.contract_term = ContractTerm::SixMonths;
        room.notes = "paid deposit\nkeeps a cat".to_string();
        room
    }

    #[tokio::test]
    async fn missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CsvStorage::open(dir.path());

        assert!(storage.load_rooms().await.unwrap().is_empty());
        assert!(storage.load_payments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rooms_round_trip_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = CsvStorage::open(dir.path());

        let rooms = vec![sample_room(), Room::new("Room 2".to_string(), date(2024, 2, 29))];
        storage.save_rooms(&rooms).await.unwrap();

        let loaded = storage.load_rooms().await.unwrap();
        assert_eq!(loaded, rooms);
    }

    #[tokio::test]
    async fn commit_keeps_roster_and_journal_together() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = CsvStorage::open(dir.path());

        let mut room = sample_room();
        storage.save_rooms(std::slice::from_ref(&room)).await.unwrap();

        let amount = BigDecimal::from(1_000_000);
        room.apply_payment(&amount, 2).unwrap();
        let payment = Payment::new("Room 1".to_string(), date(2024, 1, 15), amount, 2);

        storage
            .commit_payment(std::slice::from_ref(&room), &payment)
            .await
            .unwrap();

        let rooms = storage.load_rooms().await.unwrap();
        let payments = storage.load_payments().await.unwrap();
        assert_eq!(rooms[0].amount_paid, BigDecimal::from(1_000_000));
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0], payment);
    }

    #[tokio::test]
    async fn malformed_amount_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ROOMS_FILE);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "{}", ROOM_HEADER.join(",")).unwrap();
        writeln!(
            file,
            "Room 1,,,not-a-number,0,1 month,2024-01-01,2024-01-01,2024-01-01,,2024-01-01T00:00:00"
        )
        .unwrap();

        let storage = CsvStorage::open(dir.path());
        let err = storage.load_rooms().await.unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn malformed_date_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PAYMENTS_FILE);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "{}", PAYMENT_HEADER.join(",")).unwrap();
        writeln!(file, "p1,Room 1,15-01-2024,1000,1").unwrap();

        let storage = CsvStorage::open(dir.path());
        assert!(matches!(
            storage.load_payments().await.unwrap_err(),
            LedgerError::Storage(_)
        ));
    }

    #[tokio::test]
    async fn unexpected_header_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PAYMENTS_FILE);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "Room,Payment Date,Amount Paid,Months Paid").unwrap();

        let storage = CsvStorage::open(dir.path());
        assert!(matches!(
            storage.load_payments().await.unwrap_err(),
            LedgerError::Storage(_)
        ));
    }

    #[tokio::test]
    async fn wrong_column_count_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PAYMENTS_FILE);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "{}", PAYMENT_HEADER.join(",")).unwrap();
        writeln!(file, "p1,Room 1,2024-01-15").unwrap();

        let storage = CsvStorage::open(dir.path());
        assert!(matches!(
            storage.load_payments().await.unwrap_err(),
            LedgerError::Storage(_)
        ));
    }
}
