// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable lead log for Leadbot.
//!
//! Leads are appended to a UTF-8 CSV file with the header
//! `created_at,name,contact,tg_user_id,tg_username`. The file is created with
//! its header on first write and only ever appended to afterwards.

pub mod adapter;
pub mod record;
pub mod writer;

pub use adapter::CsvLeadLog;
pub use record::HEADER;
