// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end conversation tests: controller, mock channel and a real CSV log.

use leadbot_agent::SessionState;
use leadbot_test_utils::harness::TEST_ADMIN_CHAT_ID;
use leadbot_test_utils::TestHarness;

const MENU_FAQ: &str = "FAQ";
const MENU_LEAD: &str = "Оставить заявку";
const MENU_HUMAN: &str = "Позвать человека";
const MENU_BACK: &str = "В меню";

async fn harness() -> TestHarness {
    TestHarness::builder().build().await.unwrap()
}

#[tokio::test]
async fn lead_intake_writes_header_and_one_row() {
    let mut h = harness().await;
    assert!(!h.leads_path().exists());

    h.send_text_as("77", "ivan", MENU_LEAD).await.unwrap();
    h.send_text_as("77", "ivan", "Иван").await.unwrap();
    h.send_text_as("77", "ivan", "+70000000000").await.unwrap();

    let content = std::fs::read_to_string(h.leads_path()).unwrap();
    let lines: Vec<&str> = content.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "created_at,name,contact,tg_user_id,tg_username");
    assert!(lines[1].ends_with(",Иван,+70000000000,77,@ivan"));
    assert!(lines[1].contains("+00:00,"));

    let admin = h.admin_messages().await;
    assert_eq!(admin.len(), 1);
    assert_eq!(
        admin[0].content,
        "Новая заявка:\nИмя: Иван\nКонтакт: +70000000000\nuser_id: 77\nusername: @ivan"
    );
    assert_eq!(h.state_of("77"), SessionState::Idle);
    assert_eq!(
        h.last_reply("77").await.as_deref(),
        Some(h.config().messages.lead_accepted.as_str())
    );
}

#[tokio::test]
async fn second_lead_appends_without_repeating_header() {
    let mut h = harness().await;
    for (name, contact) in [("Иван", "+7"), ("Анна", "anna@example.com")] {
        h.send_text("1", MENU_LEAD).await.unwrap();
        h.send_text("1", name).await.unwrap();
        h.send_text("1", contact).await.unwrap();
    }

    let leads = h.leads().await.unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[1].name, "Анна");
    assert_eq!(leads[1].username, None);

    let content = std::fs::read_to_string(h.leads_path()).unwrap();
    assert_eq!(content.matches("created_at,name").count(), 1);
}

#[tokio::test]
async fn blank_inputs_reprompt_without_writing() {
    let mut h = harness().await;
    h.send_text("1", MENU_LEAD).await.unwrap();
    h.send_text("1", "   ").await.unwrap();
    assert_eq!(h.state_of("1"), SessionState::AwaitingLeadName);
    assert_eq!(
        h.last_reply("1").await.as_deref(),
        Some(h.config().messages.lead_name_empty.as_str())
    );

    h.send_text("1", " Иван ").await.unwrap();
    h.send_text("1", "\t").await.unwrap();
    assert_eq!(
        h.state_of("1"),
        SessionState::AwaitingLeadContact {
            name: "Иван".into()
        }
    );
    assert!(h.leads().await.unwrap().is_empty());
    assert!(h.admin_messages().await.is_empty());
}

#[tokio::test]
async fn back_discards_pending_name() {
    let mut h = harness().await;
    h.send_text("1", MENU_LEAD).await.unwrap();
    h.send_text("1", "Иван").await.unwrap();
    h.send_text("1", MENU_BACK).await.unwrap();
    assert_eq!(h.state_of("1"), SessionState::Idle);

    // A fresh intake starts over from the name step.
    h.send_text("1", MENU_LEAD).await.unwrap();
    assert_eq!(h.state_of("1"), SessionState::AwaitingLeadName);
    assert!(h.leads().await.unwrap().is_empty());
}

#[tokio::test]
async fn faq_flow_answers_and_returns_to_menu() {
    let mut h = harness().await;
    h.send_text("5", MENU_FAQ).await.unwrap();
    assert_eq!(h.state_of("5"), SessionState::AwaitingFaqQuery);

    h.send_text("5", "Есть ли ДОСТАВКА   в область?").await.unwrap();
    assert_eq!(h.state_of("5"), SessionState::Idle);
    let reply = h.sent_to("5").await.pop().unwrap();
    assert!(reply.content.starts_with("Есть доставка."));
    let keyboard = reply.keyboard.unwrap();
    assert_eq!(keyboard.rows.len(), 2);

    h.send_text("5", MENU_FAQ).await.unwrap();
    h.send_text("5", "погода").await.unwrap();
    assert_eq!(
        h.last_reply("5").await.as_deref(),
        Some(h.config().messages.faq_fallback.as_str())
    );
}

#[tokio::test]
async fn human_escalation_notifies_admin_after_reply() {
    let mut h = harness().await;
    h.send_text("9", MENU_HUMAN).await.unwrap();

    let sent = h.sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].chat_id, "9");
    assert_eq!(sent[1].chat_id, TEST_ADMIN_CHAT_ID.to_string());
    assert_eq!(
        sent[1].content,
        "Пользователь попросил человека.\nuser_id: 9\nusername: "
    );
    assert_eq!(h.state_of("9"), SessionState::Idle);
}

#[tokio::test]
async fn start_cancels_intake_in_progress() {
    let mut h = harness().await;
    h.send_text("3", MENU_LEAD).await.unwrap();
    h.send_text("3", "Иван").await.unwrap();
    h.send_command("3", "start").await.unwrap();

    assert_eq!(h.state_of("3"), SessionState::Idle);
    assert_eq!(
        h.last_reply("3").await.as_deref(),
        Some(h.config().messages.greeting.as_str())
    );
}

#[tokio::test]
async fn failed_admin_notification_keeps_state_and_surfaces_error() {
    let mut h = harness().await;
    h.send_text("4", MENU_LEAD).await.unwrap();
    h.send_text("4", "Иван").await.unwrap();

    h.channel().fail_sends(true);
    assert!(h.send_text("4", "+7").await.is_err());
    assert_eq!(
        h.state_of("4"),
        SessionState::AwaitingLeadContact {
            name: "Иван".into()
        }
    );
    // The row was appended before the notification failed.
    assert_eq!(h.leads().await.unwrap().len(), 1);
}
