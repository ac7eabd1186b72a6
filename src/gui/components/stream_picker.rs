//! Stream selection lists for both selection modes

use crate::catalogue::{StreamCatalogueResult, StreamDescriptor};
use crate::controller::InteractionController;
use crate::gui::app::Message;
use crate::gui::theme;
use crate::selection::Selection;
use crate::utils::config::SelectionMode;
use iced::widget::{button, checkbox, column, pick_list, row, text};
use iced::{Alignment, Element, Length};
use std::fmt;

/// Pick-list entry wrapping one catalogue descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOption {
    pub format_id: String,
    label: String,
}

impl StreamOption {
    pub fn new(descriptor: &StreamDescriptor) -> Self {
        Self {
            format_id: descriptor.format_id.clone(),
            label: descriptor.display_label(),
        }
    }
}

impl fmt::Display for StreamOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// List contents and current picks for the loaded catalogue
#[derive(Debug, Clone)]
pub struct StreamChoices {
    pub all: Vec<StreamOption>,
    pub video: Vec<StreamOption>,
    pub audio: Vec<StreamOption>,
    pub single: Option<StreamOption>,
    pub video_pick: Option<StreamOption>,
    pub audio_pick: Option<StreamOption>,
    pub want_video: bool,
    pub want_audio: bool,
}

impl Default for StreamChoices {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            video: Vec::new(),
            audio: Vec::new(),
            single: None,
            video_pick: None,
            audio_pick: None,
            want_video: true,
            want_audio: true,
        }
    }
}

impl StreamChoices {
    /// Refill every list from `catalogue` and preselect each list's first
    /// entry. Include toggles keep their current state.
    pub fn repopulate(&mut self, catalogue: &StreamCatalogueResult) {
        self.all = catalogue.descriptors.iter().map(StreamOption::new).collect();
        self.video = catalogue.video_candidates().map(StreamOption::new).collect();
        self.audio = catalogue.audio_candidates().map(StreamOption::new).collect();

        self.single = self.all.first().cloned();
        self.video_pick = self.video.first().cloned();
        self.audio_pick = self.audio.first().cloned();
    }

    /// Include toggles only move while the controller allows selection edits
    pub fn set_want_video(&mut self, checked: bool, controller: &InteractionController) {
        if controller.can_edit_selection() {
            self.want_video = checked;
        }
    }

    pub fn set_want_audio(&mut self, checked: bool, controller: &InteractionController) {
        if controller.can_edit_selection() {
            self.want_audio = checked;
        }
    }

    /// Current picks as a selection in `mode`
    pub fn selection(&self, mode: SelectionMode) -> Selection {
        let id = |pick: &Option<StreamOption>| pick.as_ref().map(|o| o.format_id.clone());
        match mode {
            SelectionMode::Single => Selection::Single {
                format_id: id(&self.single),
            },
            SelectionMode::Split => Selection::Split {
                want_video: self.want_video,
                video_format_id: id(&self.video_pick),
                want_audio: self.want_audio,
                audio_format_id: id(&self.audio_pick),
            },
        }
    }
}

/// Mode switch followed by the lists of the active mode
pub fn stream_picker(
    mode: SelectionMode,
    choices: &StreamChoices,
    mode_switchable: bool,
    editable: bool,
) -> Element<'static, Message> {
    let mode_button = |label: &'static str, target: SelectionMode| {
        let style = if mode == target {
            theme::ModeButton::Active
        } else {
            theme::ModeButton::Inactive
        };
        button(text(label).size(14))
            .on_press_maybe(mode_switchable.then_some(Message::SelectionModeChanged(target)))
            .padding([6, 14])
            .style(iced::theme::Button::Custom(Box::new(style)))
    };

    let switch = row![
        text("Selection").size(13).style(theme::MUTED),
        mode_button("Single format", SelectionMode::Single),
        mode_button("Video + audio", SelectionMode::Split),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    let lists: Element<'static, Message> = match mode {
        SelectionMode::Single => column![
            text("Format").size(12).style(theme::MUTED),
            pick_list(
                choices.all.clone(),
                choices.single.clone(),
                Message::SingleStreamSelected
            )
            .placeholder("Fetch video info first")
            .text_size(13)
            .width(Length::Fill),
        ]
        .spacing(4)
        .into(),
        SelectionMode::Split => {
            let mut video_toggle = checkbox("Include video", choices.want_video).size(16);
            let mut audio_toggle = checkbox("Include audio", choices.want_audio).size(16);
            if editable {
                video_toggle = video_toggle.on_toggle(Message::WantVideoToggled);
                audio_toggle = audio_toggle.on_toggle(Message::WantAudioToggled);
            }

            column![
                video_toggle,
                pick_list(
                    choices.video.clone(),
                    choices.video_pick.clone(),
                    Message::VideoStreamSelected
                )
                .placeholder("No video streams")
                .text_size(13)
                .width(Length::Fill),
                audio_toggle,
                pick_list(
                    choices.audio.clone(),
                    choices.audio_pick.clone(),
                    Message::AudioStreamSelected
                )
                .placeholder("No audio streams")
                .text_size(13)
                .width(Length::Fill),
            ]
            .spacing(6)
            .into()
        }
    };

    column![switch, lists].spacing(12).into()
}
