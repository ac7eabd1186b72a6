//! Main view implementation - Light Theme

use crate::controller::{InteractionController, Phase};
use crate::gui::app::Message;
use crate::gui::components::{console, stream_picker, url_input, StreamChoices};
use crate::gui::theme;
use crate::utils::config::SelectionMode;
use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

/// Which controls are live, derived from the interaction controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub can_fetch: bool,
    pub can_download: bool,
    pub can_edit_selection: bool,
    pub is_fetching: bool,
    pub is_downloading: bool,
}

impl Controls {
    pub fn from_controller(controller: &InteractionController) -> Self {
        Self {
            can_fetch: controller.can_fetch(),
            can_download: controller.can_download(),
            can_edit_selection: controller.can_edit_selection(),
            is_fetching: controller.is_fetching(),
            is_downloading: controller.phase() == Phase::Downloading,
        }
    }
}

/// Create the main view
#[allow(clippy::too_many_arguments)]
pub fn main_view(
    url_value: &str,
    title: Option<&str>,
    mode: SelectionMode,
    choices: &StreamChoices,
    destination: &str,
    console_lines: &[String],
    status_message: &str,
    controls: Controls,
    can_open_folder: bool,
) -> Element<'static, Message> {
    let card = |content: Element<'static, Message>| {
        container(content)
            .padding(20)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(theme::CardContainer)))
    };

    let source_section = card(
        column![
            text("Download Video")
                .size(26)
                .style(iced::theme::Text::Color(theme::INK)),
            url_input(
                url_value,
                !controls.is_downloading,
                controls.can_fetch,
                controls.is_fetching,
            ),
            text(format!("Title: {}", title.unwrap_or("-")))
                .size(15)
                .style(theme::INK),
        ]
        .spacing(14)
        .into(),
    );

    let selection_section = card(stream_picker(
        mode,
        choices,
        !controls.is_downloading,
        controls.can_edit_selection,
    ));

    let destination_input = text_input("Choose where to save the video", destination)
        .padding(10)
        .width(Length::Fill)
        .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle)));
    let destination_input = if controls.is_downloading {
        destination_input
    } else {
        destination_input.on_input(Message::DestinationChanged)
    };

    let browse = (!controls.is_downloading).then_some(Message::BrowseDestination);
    let download_section = card(
        column![
            row![
                text("Save to").size(13).style(theme::MUTED),
                destination_input,
                button(text("Browse").size(14))
                    .on_press_maybe(browse)
                    .padding([8, 12])
                    .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            row![
                text(status_message).size(13).style(theme::MUTED),
                Space::with_width(Length::Fill),
                button(text("Open Folder").size(14))
                    .on_press_maybe(can_open_folder.then_some(Message::OpenDownloadFolder))
                    .padding([10, 16])
                    .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
                button(
                    text(if controls.is_downloading {
                        "Downloading..."
                    } else {
                        "Download"
                    })
                    .size(16)
                )
                .on_press_maybe(controls.can_download.then_some(Message::DownloadPressed))
                .padding([12, 28])
                .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            console(console_lines),
        ]
        .spacing(14)
        .into(),
    );

    column![source_section, selection_section, download_section]
        .spacing(16)
        .into()
}
