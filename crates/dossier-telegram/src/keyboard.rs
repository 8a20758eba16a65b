//! Inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

#[must_use]
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        [InlineKeyboardButton::callback("Search my documents", "search")],
        [InlineKeyboardButton::callback("Upload a file", "upload")],
        [InlineKeyboardButton::callback("Delete my files", "delete")],
    ])
}

#[must_use]
pub fn back_to_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback("Menu", "menu")]])
}
