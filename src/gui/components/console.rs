//! Scrolling console for download log lines

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{column, container, scrollable, text, Column};
use iced::{Element, Font, Length};

/// Id used to keep the console pinned to its last line
pub fn console_id() -> scrollable::Id {
    scrollable::Id::new("console")
}

pub fn console(lines: &[String]) -> Element<'static, Message> {
    let body: Column<'static, Message> = if lines.is_empty() {
        column![text("Download output will appear here")
            .size(13)
            .style(theme::FAINT)]
    } else {
        Column::with_children(
            lines
                .iter()
                .map(|line| -> Element<'static, Message> {
                    text(line.clone())
                        .font(Font::MONOSPACE)
                        .size(13)
                        .style(theme::CONSOLE_TEXT)
                        .into()
                })
                .collect::<Vec<_>>(),
        )
    };

    container(
        scrollable(body.spacing(2).padding(12).width(Length::Fill))
            .id(console_id())
            .height(Length::Fill)
            .style(iced::theme::Scrollable::Custom(Box::new(
                theme::ConsoleScrollable,
            ))),
    )
    .width(Length::Fill)
    .height(Length::Fixed(200.0))
    .style(iced::theme::Container::Custom(Box::new(
        theme::ConsoleContainer,
    )))
    .into()
}
