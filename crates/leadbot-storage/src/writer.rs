// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocking file operations behind the lead log.
//!
//! Callers must serialize access; [`crate::CsvLeadLog`] holds the single
//! writer lock and runs these functions on the blocking pool.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use leadbot_core::{Lead, LeadbotError};
use tracing::warn;

use crate::record::{decode_lead, encode_header, encode_lead};

/// Appends one lead, writing the header first when the file is new or empty.
///
/// Header (when needed) and row go out in a single `write_all` on an
/// append-mode handle, so a row is never separated from its header and never
/// interleaved with another row.
pub fn append_lead(path: &Path, lead: &Lead) -> Result<(), LeadbotError> {
    let row = encode_lead(lead)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LeadbotError::storage)?;

    let is_empty = file.metadata().map_err(LeadbotError::storage)?.len() == 0;
    let buf = if is_empty {
        let mut buf = encode_header()?;
        buf.extend_from_slice(&row);
        buf
    } else {
        row
    };

    file.write_all(&buf).map_err(LeadbotError::storage)?;
    file.flush().map_err(LeadbotError::storage)?;
    file.sync_data().map_err(LeadbotError::storage)?;
    Ok(())
}

/// Reads every lead in file order. A missing file reads as empty.
pub fn read_leads(path: &Path) -> Result<Vec<Lead>, LeadbotError> {
    let mut reader = match csv::ReaderBuilder::new().has_headers(true).from_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            if let csv::ErrorKind::Io(io) = e.kind()
                && io.kind() == ErrorKind::NotFound
            {
                return Ok(Vec::new());
            }
            return Err(LeadbotError::storage(e));
        }
    };

    let mut leads = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(LeadbotError::storage(e));
            }
            Err(e) => {
                let line = e.position().map(|p| p.line());
                warn!(path = %path.display(), line, error = %e, "skipping unreadable lead row");
                continue;
            }
        };
        match decode_lead(&record) {
            Ok(lead) => leads.push(lead),
            Err(e) => {
                let line = record.position().map(|p| p.line());
                warn!(path = %path.display(), line, error = %e, "skipping malformed lead row");
            }
        }
    }
    Ok(leads)
}

/// Checks that the log can be opened for appending without writing to it.
///
/// For a log that does not exist yet, the nearest existing ancestor must be a
/// writable directory, since missing parents are created on initialization.
pub fn probe_writable(path: &Path) -> Result<(), LeadbotError> {
    if path.exists() {
        return OpenOptions::new()
            .append(true)
            .open(path)
            .map(drop)
            .map_err(LeadbotError::storage);
    }

    let ancestor = path
        .ancestors()
        .skip(1)
        .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
        .find(|p| p.exists())
        .unwrap_or_else(|| Path::new("."));

    let meta = std::fs::metadata(ancestor).map_err(LeadbotError::storage)?;
    if !meta.is_dir() {
        return Err(LeadbotError::storage(format!(
            "{} is not a directory",
            ancestor.display()
        )));
    }
    if meta.permissions().readonly() {
        return Err(LeadbotError::storage(format!(
            "directory {} is read-only",
            ancestor.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadbot_core::Sender;

    fn sender() -> Sender {
        Sender {
            id: "555".into(),
            username: Some("client".into()),
        }
    }

    #[test]
    fn first_append_creates_header_and_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");
        assert!(!path.exists());

        let lead = Lead::new("Иван", "+70000000000", &sender()).unwrap();
        append_lead(&path, &lead).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.split_terminator("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "created_at,name,contact,tg_user_id,tg_username");
        assert!(lines[1].ends_with(",Иван,+70000000000,555,@client"));
    }

    #[test]
    fn later_appends_do_not_repeat_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");

        for name in ["a", "b", "c"] {
            append_lead(&path, &Lead::new(name, "x", &sender()).unwrap()).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("created_at,").count(), 1);
        assert_eq!(content.split_terminator("\r\n").count(), 4);
    }

    #[test]
    fn empty_existing_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");
        std::fs::write(&path, "").unwrap();

        append_lead(&path, &Lead::new("a", "b", &sender()).unwrap()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("created_at,name,contact,tg_user_id,tg_username\r\n"));
    }

    #[test]
    fn read_back_preserves_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");
        let first = Lead::new("First, Name", "one@example.com", &sender()).unwrap();
        let second = Lead::new("Second", "+7 999", &Sender { id: "7".into(), username: None }).unwrap();
        append_lead(&path, &first).unwrap();
        append_lead(&path, &second).unwrap();

        let leads = read_leads(&path).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "First, Name");
        assert_eq!(leads[1].username, None);
        assert_eq!(leads[1].user_id, "7");
        assert_eq!(leads[0].created_at_iso(), first.created_at_iso());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_leads(&dir.path().join("absent.csv")).unwrap().is_empty());
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");
        append_lead(&path, &Lead::new("Иван", "+7", &sender()).unwrap()).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            file.write_all(b"not-a-date,Anna,anna@example.com,1,\r\n").unwrap();
            file.write_all(b"2026-01-01T00:00:00.000000+00:00,,blank@example.com,2,\r\n")
                .unwrap();
            file.write_all(b"too,few\r\n").unwrap();
        }
        append_lead(&path, &Lead::new("Анна", "+8", &sender()).unwrap()).unwrap();

        let names: Vec<String> = read_leads(&path)
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Иван", "Анна"]);
    }

    #[test]
    fn probe_accepts_new_file_in_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(probe_writable(&dir.path().join("leads.csv")).is_ok());
    }

    #[test]
    fn probe_accepts_missing_parents_under_writable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("nested").join("leads.csv");
        assert!(probe_writable(&path).is_ok());
    }

    #[test]
    fn probe_rejects_parent_that_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, "").unwrap();
        let err = probe_writable(&blocker.join("leads.csv")).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }
}
