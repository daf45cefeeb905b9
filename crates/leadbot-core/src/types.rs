// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the conversation controller.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::LeadbotError;

/// Unique identifier for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Storage,
}

/// The user who sent an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Platform user identifier, used as the session key.
    pub id: String,
    /// Platform username without the leading `@`, if the user has one.
    pub username: Option<String>,
}

impl Sender {
    /// Returns `@username`, or an empty string when the user has none.
    pub fn handle(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => format!("@{name}"),
            _ => String::new(),
        }
    }
}

/// Content of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Plain text typed by the user or sent by a keyboard button.
    Text(String),
    /// A bot command such as `/start`, without the slash.
    Command { name: String, args: String },
}

/// An inbound message received from a channel adapter.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub channel: String,
    /// Chat the reply must go back to.
    pub chat_id: String,
    pub sender: Sender,
    pub content: MessageContent,
    /// RFC 3339 timestamp reported by the platform.
    pub timestamp: String,
}

/// A reply keyboard shown beneath the input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<String>>,
    pub resize: bool,
    pub one_time: bool,
    pub selective: bool,
}

impl ReplyKeyboard {
    /// Builds a resizable, persistent, selective keyboard from button label rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            resize: true,
            one_time: false,
            selective: true,
        }
    }
}

/// An outbound message to be sent via a channel adapter.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub channel: String,
    pub chat_id: String,
    pub content: String,
    pub keyboard: Option<ReplyKeyboard>,
}

/// A captured prospective-customer contact record.
///
/// Constructed only through [`Lead::new`] or [`Lead::with_timestamp`], both of
/// which reject blank names and contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub contact: String,
    pub user_id: String,
    pub username: Option<String>,
}

impl Lead {
    /// Creates a lead stamped with the current UTC time.
    pub fn new(name: &str, contact: &str, sender: &Sender) -> Result<Self, LeadbotError> {
        Self::with_timestamp(name, contact, sender, Utc::now())
    }

    /// Creates a lead with an explicit creation time.
    pub fn with_timestamp(
        name: &str,
        contact: &str,
        sender: &Sender,
        created_at: DateTime<Utc>,
    ) -> Result<Self, LeadbotError> {
        let name = non_blank("name", name)?;
        let contact = non_blank("contact", contact)?;
        Ok(Self {
            created_at,
            name,
            contact,
            user_id: sender.id.clone(),
            username: sender.username.clone().filter(|u| !u.is_empty()),
        })
    }

    /// ISO-8601 timestamp with microseconds and an explicit `+00:00` offset.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Micros, false)
    }

    /// `@username`, or an empty string.
    pub fn handle(&self) -> String {
        self.username
            .as_deref()
            .map(|u| format!("@{u}"))
            .unwrap_or_default()
    }
}

fn non_blank(field: &str, value: &str) -> Result<String, LeadbotError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeadbotError::Validation {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn sender(username: Option<&str>) -> Sender {
        Sender {
            id: "42".into(),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn handle_prefixes_at() {
        assert_eq!(sender(Some("ivan")).handle(), "@ivan");
        assert_eq!(sender(None).handle(), "");
        assert_eq!(sender(Some("")).handle(), "");
    }

    #[test]
    fn lead_trims_fields() {
        let lead = Lead::new("  Иван ", " +70000000000 ", &sender(Some("ivan"))).unwrap();
        assert_eq!(lead.name, "Иван");
        assert_eq!(lead.contact, "+70000000000");
        assert_eq!(lead.user_id, "42");
        assert_eq!(lead.handle(), "@ivan");
    }

    #[test]
    fn lead_rejects_blank_name() {
        let err = Lead::new("   ", "+7", &sender(None)).unwrap_err();
        assert!(matches!(err, LeadbotError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn lead_rejects_blank_contact() {
        let err = Lead::new("Иван", "\t\n", &sender(None)).unwrap_err();
        assert!(matches!(err, LeadbotError::Validation { ref field, .. } if field == "contact"));
    }

    #[test]
    fn created_at_uses_utc_offset() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let lead = Lead::with_timestamp("a", "b", &sender(None), at).unwrap();
        assert_eq!(lead.created_at_iso(), "2026-01-02T03:04:05.000000+00:00");
    }

    #[test]
    fn keyboard_defaults_match_menu_behaviour() {
        let kb = ReplyKeyboard::new(vec![vec!["a".into(), "b".into()], vec!["c".into()]]);
        assert!(kb.resize);
        assert!(!kb.one_time);
        assert!(kb.selective);
        assert_eq!(kb.rows[1], vec!["c".to_string()]);
    }

    proptest! {
        #[test]
        fn whitespace_only_never_forms_a_lead(ws in "[ \t\r\n]{0,8}") {
            prop_assert!(Lead::new(&ws, "contact", &sender(None)).is_err());
            prop_assert!(Lead::new("name", &ws, &sender(None)).is_err());
        }
    }
}
