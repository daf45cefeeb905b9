// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row encoding and decoding for the CSV lead log.

use chrono::{DateTime, Utc};
use leadbot_core::{Lead, LeadbotError};

/// Column names, in file order.
pub const HEADER: [&str; 5] = ["created_at", "name", "contact", "tg_user_id", "tg_username"];

/// Serializes the header row into a complete CSV line.
pub fn encode_header() -> Result<Vec<u8>, LeadbotError> {
    encode_row(HEADER)
}

/// Serializes one lead into a complete CSV line, terminator included.
pub fn encode_lead(lead: &Lead) -> Result<Vec<u8>, LeadbotError> {
    let created_at = lead.created_at_iso();
    let handle = lead.handle();
    encode_row([
        created_at.as_str(),
        lead.name.as_str(),
        lead.contact.as_str(),
        lead.user_id.as_str(),
        handle.as_str(),
    ])
}

fn encode_row(fields: [&str; 5]) -> Result<Vec<u8>, LeadbotError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(fields).map_err(LeadbotError::storage)?;
    writer
        .into_inner()
        .map_err(|e| LeadbotError::storage(e.into_error()))
}

/// Parses one data row back into a lead.
pub fn decode_lead(record: &csv::StringRecord) -> Result<Lead, LeadbotError> {
    let field = |i: usize| record.get(i).unwrap_or_default();

    let created_at = DateTime::parse_from_rfc3339(field(0))
        .map(|t| t.with_timezone(&Utc))
        .map_err(LeadbotError::storage)?;

    let username = field(4).strip_prefix('@').unwrap_or(field(4));
    let sender = leadbot_core::Sender {
        id: field(3).to_string(),
        username: (!username.is_empty()).then(|| username.to_string()),
    };

    Lead::with_timestamp(field(1), field(2), &sender, created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use leadbot_core::Sender;

    fn lead(name: &str, contact: &str, username: Option<&str>) -> Lead {
        let sender = Sender {
            id: "100".into(),
            username: username.map(str::to_string),
        };
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        Lead::with_timestamp(name, contact, &sender, at).unwrap()
    }

    #[test]
    fn header_line_matches_log_format() {
        let bytes = encode_header().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "created_at,name,contact,tg_user_id,tg_username\r\n"
        );
    }

    #[test]
    fn lead_line_has_five_columns() {
        let bytes = encode_lead(&lead("Иван", "+70000000000", Some("ivan"))).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "2026-03-04T05:06:07.000000+00:00,Иван,+70000000000,100,@ivan\r\n"
        );
    }

    #[test]
    fn fields_with_commas_and_quotes_are_quoted() {
        let bytes = encode_lead(&lead("Smith, \"J\"", "a@b.c", None)).unwrap();
        let line = String::from_utf8(bytes).unwrap();
        assert!(line.contains("\"Smith, \"\"J\"\"\""), "got: {line}");
        assert!(line.ends_with(",100,\r\n"));
    }

    #[test]
    fn decode_restores_username_without_at() {
        let original = lead("Anna", "anna@example.com", Some("anna"));
        let record = csv::StringRecord::from(vec![
            original.created_at_iso(),
            original.name.clone(),
            original.contact.clone(),
            original.user_id.clone(),
            original.handle(),
        ]);
        assert_eq!(decode_lead(&record).unwrap(), original);
    }

    #[test]
    fn decode_rejects_bad_timestamp() {
        let record = csv::StringRecord::from(vec!["yesterday", "a", "b", "1", ""]);
        assert!(decode_lead(&record).is_err());
    }
}
