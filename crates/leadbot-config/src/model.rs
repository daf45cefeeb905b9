// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Leadbot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};

/// Top-level Leadbot configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section has defaults except the two Telegram
/// secrets, which validation requires.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadbotConfig {
    /// Process-level settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram credentials and the administrator destination.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Lead log location.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Keyboard button labels.
    #[serde(default)]
    pub menu: MenuConfig,

    /// Reply texts.
    #[serde(default)]
    pub messages: MessagesConfig,

    /// Ordered FAQ table. Earlier entries win when several keywords match.
    #[serde(default = "default_faq")]
    pub faq: Vec<FaqEntryConfig>,
}

impl Default for LeadbotConfig {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            telegram: TelegramConfig::default(),
            storage: StorageConfig::default(),
            menu: MenuConfig::default(),
            messages: MessagesConfig::default(),
            faq: default_faq(),
        }
    }
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Chat that receives lead and escalation notifications. Required.
    ///
    /// Accepts an integer or a numeric string (environment variables arrive
    /// as strings); a blank string counts as unset.
    #[serde(default, deserialize_with = "deserialize_chat_id")]
    pub admin_chat_id: Option<i64>,
}

fn deserialize_chat_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawChatId {
        Int(i64),
        Text(String),
    }

    match Option::<RawChatId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawChatId::Int(id)) => Ok(Some(id)),
        Some(RawChatId::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<i64>().map(Some).map_err(|_| {
                de::Error::invalid_value(Unexpected::Str(trimmed), &"a numeric chat id")
            })
        }
    }
}

/// Lead log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the CSV lead log. Relative paths resolve against the working directory.
    #[serde(default = "default_leads_path")]
    pub leads_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            leads_path: default_leads_path(),
        }
    }
}

fn default_leads_path() -> String {
    "leads.csv".to_string()
}

/// Keyboard button labels. Menu selections are matched against these exactly.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MenuConfig {
    #[serde(default = "default_menu_faq")]
    pub faq: String,
    #[serde(default = "default_menu_lead")]
    pub lead: String,
    #[serde(default = "default_menu_human")]
    pub human: String,
    #[serde(default = "default_menu_back")]
    pub back: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            faq: default_menu_faq(),
            lead: default_menu_lead(),
            human: default_menu_human(),
            back: default_menu_back(),
        }
    }
}

fn default_menu_faq() -> String {
    "FAQ".to_string()
}

fn default_menu_lead() -> String {
    "Оставить заявку".to_string()
}

fn default_menu_human() -> String {
    "Позвать человека".to_string()
}

fn default_menu_back() -> String {
    "В меню".to_string()
}

/// Reply texts sent to users. Unset keys keep their defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct MessagesConfig {
    /// Reply to `/start`.
    pub greeting: String,

    /// Reply to unrecognized text in the menu.
    pub choose_action: String,

    /// Reply after returning to the menu.
    pub back_to_menu: String,

    /// Prompt after choosing FAQ.
    pub faq_prompt: String,

    /// Reply when no FAQ keyword matches.
    pub faq_fallback: String,

    /// Prompt after choosing lead intake.
    pub lead_name_prompt: String,

    /// Re-prompt for a blank name.
    pub lead_name_empty: String,

    /// Prompt for the contact once a name is stored.
    pub lead_contact_prompt: String,

    /// Re-prompt for a blank contact.
    pub lead_contact_empty: String,

    /// Confirmation after a lead is stored.
    pub lead_accepted: String,

    /// Confirmation after escalating to a human.
    pub human_ack: String,

    /// Administrator notice for "call a human". Placeholders: `{user_id}`, `{username}`.
    pub admin_human_request: String,

    /// Administrator notice for a new lead. Placeholders: `{name}`, `{contact}`,
    /// `{user_id}`, `{username}`.
    pub admin_new_lead: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            greeting: "Привет! Я FAQ-бот. Могу ответить на частые вопросы, принять заявку или позвать человека.".to_string(),
            choose_action: "Выберите действие кнопкой из меню.".to_string(),
            back_to_menu: "Вернул в меню.".to_string(),
            faq_prompt: "Напишите короткий вопрос или ключевое слово (например: цена, график, адрес).".to_string(),
            faq_fallback: "Не нашёл готового ответа. Можете оставить заявку, и мы свяжемся с вами.".to_string(),
            lead_name_prompt: "Ок. Как вас зовут?".to_string(),
            lead_name_empty: "Имя не может быть пустым. Напишите ваше имя.".to_string(),
            lead_contact_prompt: "Спасибо. Оставьте контакт (телефон/telegram/email).".to_string(),
            lead_contact_empty: "Контакт не может быть пустым. Введите телефон/telegram/email.".to_string(),
            lead_accepted: "Заявка принята! Мы свяжемся с вами.".to_string(),
            human_ack: "Ок, передал команде.".to_string(),
            admin_human_request:
                "Пользователь попросил человека.\nuser_id: {user_id}\nusername: {username}"
                    .to_string(),
            admin_new_lead: "Новая заявка:\nИмя: {name}\nКонтакт: {contact}\nuser_id: {user_id}\nusername: {username}"
                .to_string(),
        }
    }
}

impl MessagesConfig {
    /// `(key, text)` pairs, used by validation.
    pub fn entries(&self) -> [(&'static str, &str); 13] {
        [
            ("greeting", self.greeting.as_str()),
            ("choose_action", self.choose_action.as_str()),
            ("back_to_menu", self.back_to_menu.as_str()),
            ("faq_prompt", self.faq_prompt.as_str()),
            ("faq_fallback", self.faq_fallback.as_str()),
            ("lead_name_prompt", self.lead_name_prompt.as_str()),
            ("lead_name_empty", self.lead_name_empty.as_str()),
            ("lead_contact_prompt", self.lead_contact_prompt.as_str()),
            ("lead_contact_empty", self.lead_contact_empty.as_str()),
            ("lead_accepted", self.lead_accepted.as_str()),
            ("human_ack", self.human_ack.as_str()),
            ("admin_human_request", self.admin_human_request.as_str()),
            ("admin_new_lead", self.admin_new_lead.as_str()),
        ]
    }
}

/// One FAQ table entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FaqEntryConfig {
    /// Normalized keyword (lower-case, single spaces).
    pub keyword: String,
    /// Answer sent when the keyword matches.
    pub answer: String,
}

impl FaqEntryConfig {
    fn new(keyword: &str, answer: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            answer: answer.to_string(),
        }
    }
}

fn default_faq() -> Vec<FaqEntryConfig> {
    vec![
        FaqEntryConfig::new(
            "цена",
            "Цены зависят от задачи. Напишите, что именно нужно, и я передам команде.",
        ),
        FaqEntryConfig::new(
            "стоимость",
            "Стоимость зависит от объёма работ. Опишите запрос, и мы ответим точнее.",
        ),
        FaqEntryConfig::new(
            "адрес",
            "Напишите ваш город/район, и мы пришлём актуальный адрес и схему проезда.",
        ),
        FaqEntryConfig::new(
            "график",
            "Обычно работаем в будни. Уточните удобное время, и мы подтвердим.",
        ),
        FaqEntryConfig::new(
            "доставка",
            "Есть доставка. Оставьте контакт, и менеджер расскажет условия.",
        ),
        FaqEntryConfig::new(
            "оплата",
            "Возможны разные способы оплаты. Оставьте контакт, и мы уточним детали.",
        ),
        FaqEntryConfig::new(
            "контакты",
            "Оставьте ваш контакт, и мы свяжемся с вами в ближайшее время.",
        ),
    ]
}
