// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadbot leads` command implementation.

use leadbot_config::LeadbotConfig;
use leadbot_core::{Lead, LeadStore, LeadbotError};
use leadbot_storage::CsvLeadLog;

/// Prints the `limit` most recent leads, oldest first.
pub async fn run_leads(config: &LeadbotConfig, limit: usize) -> Result<(), LeadbotError> {
    let log = CsvLeadLog::new(&config.storage);
    let leads = log.list().await?;

    if leads.is_empty() {
        println!("No leads recorded in {}.", log.path().display());
        return Ok(());
    }

    let recent = most_recent(&leads, limit);
    println!(
        "Showing {} of {} lead(s) from {}:",
        recent.len(),
        leads.len(),
        log.path().display()
    );
    for lead in recent {
        println!("{}", format_lead(lead));
    }
    Ok(())
}

fn most_recent(leads: &[Lead], limit: usize) -> &[Lead] {
    &leads[leads.len().saturating_sub(limit)..]
}

fn format_lead(lead: &Lead) -> String {
    let handle = lead.handle();
    let who = if handle.is_empty() {
        lead.user_id.clone()
    } else {
        format!("{} {handle}", lead.user_id)
    };
    format!(
        "  {}  {}  {}  ({who})",
        lead.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        lead.name,
        lead.contact
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use leadbot_core::Sender;

    fn lead(name: &str, username: Option<&str>) -> Lead {
        let sender = Sender {
            id: "42".into(),
            username: username.map(str::to_string),
        };
        let at = Utc.with_ymd_and_hms(2026, 5, 6, 7, 8, 9).unwrap();
        Lead::with_timestamp(name, "+70000000000", &sender, at).unwrap()
    }

    #[test]
    fn most_recent_keeps_tail() {
        let leads = vec![lead("a", None), lead("b", None), lead("c", None)];
        let names: Vec<_> = most_recent(&leads, 2).iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(most_recent(&leads, 10).len(), 3);
        assert!(most_recent(&leads, 0).is_empty());
    }

    #[test]
    fn format_includes_handle_when_present() {
        assert_eq!(
            format_lead(&lead("Иван", Some("ivan"))),
            "  2026-05-06 07:08:09 UTC  Иван  +70000000000  (42 @ivan)"
        );
        assert_eq!(
            format_lead(&lead("Иван", None)),
            "  2026-05-06 07:08:09 UTC  Иван  +70000000000  (42)"
        );
    }
}
