// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Leadbot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types shared by the conversation controller, the lead log and the
//! messaging channel adapters.

pub mod error;
pub mod text;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LeadbotError;
pub use text::normalize_text;
pub use types::{
    AdapterType, HealthStatus, InboundMessage, Lead, MessageContent, MessageId, OutboundMessage,
    ReplyKeyboard, Sender,
};

pub use traits::{ChannelAdapter, LeadStore, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leadbot_error_has_all_variants() {
        let _config = LeadbotError::Config("test".into());
        let _validation = LeadbotError::Validation {
            field: "name".into(),
            message: "must not be empty".into(),
        };
        let _storage = LeadbotError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = LeadbotError::Channel {
            message: "test".into(),
            source: None,
        };
        let _internal = LeadbotError::Internal("test".into());
    }

    #[test]
    fn adapter_type_display_round_trip() {
        use std::str::FromStr;

        for variant in [AdapterType::Channel, AdapterType::Storage] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        assert_ne!(HealthStatus::Unhealthy("down".into()), healthy);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_channel_adapter<T: ChannelAdapter>() {}
        fn _assert_lead_store<T: LeadStore>() {}
    }
}
