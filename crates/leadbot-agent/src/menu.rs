// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu labels and the two fixed reply keyboards.

use leadbot_config::model::MenuConfig;
use leadbot_core::ReplyKeyboard;

/// A main-menu button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Faq,
    Lead,
    Human,
}

/// Button labels, compared exactly against trimmed user input.
#[derive(Debug, Clone)]
pub struct Menu {
    faq: String,
    lead: String,
    human: String,
    back: String,
}

impl Menu {
    pub fn from_config(config: &MenuConfig) -> Self {
        Self {
            faq: config.faq.clone(),
            lead: config.lead.clone(),
            human: config.human.clone(),
            back: config.back.clone(),
        }
    }

    /// Two rows: FAQ and lead intake, then "call a human".
    pub fn main_keyboard(&self) -> ReplyKeyboard {
        ReplyKeyboard::new(vec![
            vec![self.faq.clone(), self.lead.clone()],
            vec![self.human.clone()],
        ])
    }

    /// A single "back to menu" button.
    pub fn back_keyboard(&self) -> ReplyKeyboard {
        ReplyKeyboard::new(vec![vec![self.back.clone()]])
    }

    /// Maps a main-menu button press to its choice.
    pub fn choice(&self, text: &str) -> Option<MenuChoice> {
        let text = text.trim();
        if text == self.faq {
            Some(MenuChoice::Faq)
        } else if text == self.lead {
            Some(MenuChoice::Lead)
        } else if text == self.human {
            Some(MenuChoice::Human)
        } else {
            None
        }
    }

    pub fn is_back(&self, text: &str) -> bool {
        text.trim() == self.back
    }
}
