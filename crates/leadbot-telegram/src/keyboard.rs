// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply keyboard conversion.

use leadbot_core::ReplyKeyboard;
use teloxide::types::{KeyboardButton, KeyboardMarkup};

/// Builds a Telegram reply keyboard from the channel-agnostic model.
pub fn to_markup(keyboard: &ReplyKeyboard) -> KeyboardMarkup {
    let rows = keyboard
        .rows
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone())).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut markup = KeyboardMarkup::new(rows);
    markup.resize_keyboard = keyboard.resize;
    markup.one_time_keyboard = keyboard.one_time;
    markup.selective = keyboard.selective;
    markup
}
