//! URL input component

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, row, text, text_input, tooltip};
use iced::{Alignment, Element, Length};

/// URL field with paste, clear and fetch buttons
///
/// The field and its buttons are inert while `editable` is false; the fetch
/// button additionally needs `fetch_enabled`.
pub fn url_input(
    value: &str,
    editable: bool,
    fetch_enabled: bool,
    is_fetching: bool,
) -> Element<'static, Message> {
    let input = text_input("Paste video URL here...", value)
        .on_submit(Message::FetchPressed)
        .padding(12)
        .width(Length::Fill)
        .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle)));
    let input = if editable {
        input.on_input(Message::UrlInputChanged)
    } else {
        input
    };

    row![
        input,
        tooltip(
            button(text("Paste").size(14))
                .on_press_maybe(editable.then_some(Message::PasteFromClipboard))
                .padding([8, 12])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
            "Paste from clipboard",
            tooltip::Position::Bottom,
        ),
        button(text("Clear").size(14))
            .on_press_maybe(editable.then_some(Message::ClearUrlInput))
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        button(text(if is_fetching { "Fetching..." } else { "Fetch Info" }).size(15))
            .on_press_maybe(fetch_enabled.then_some(Message::FetchPressed))
            .padding([10, 20])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
    ]
    .spacing(10)
    .align_items(Alignment::Center)
    .into()
}
