//! Light palette and widget style sheets

use iced::gradient::Linear;
use iced::widget::{button, container, scrollable, text_input};
use iced::{Background, Border, Color, Gradient, Radians, Shadow, Theme, Vector};

pub const INK: Color = Color::from_rgb(0.122, 0.161, 0.216);
pub const MUTED: Color = Color::from_rgb(0.420, 0.447, 0.502);
pub const FAINT: Color = Color::from_rgb(0.616, 0.639, 0.667);
pub const CONSOLE_TEXT: Color = Color::from_rgb(0.820, 0.980, 0.898);

const SKY: Color = Color::from_rgb(0.941, 0.976, 1.0);
const LILAC: Color = Color::from_rgb(0.953, 0.910, 1.0);
const ACCENT: Color = Color::from_rgb(0.388, 0.400, 0.945);
const ACCENT_SOFT: Color = Color::from_rgb(0.506, 0.549, 0.973);
const ACCENT_DEEP: Color = Color::from_rgb(0.545, 0.361, 0.965);
const LINE: Color = Color::from_rgb(0.898, 0.906, 0.922);
const SURFACE: Color = Color::WHITE;
const SURFACE_DIM: Color = Color::from_rgb(0.953, 0.957, 0.965);
const LABEL: Color = Color::from_rgb(0.216, 0.255, 0.318);
const CONSOLE_BG: Color = Color::from_rgb(0.067, 0.094, 0.153);

fn border(radius: f32, width: f32, color: Color) -> Border {
    Border {
        color,
        width,
        radius: radius.into(),
    }
}

fn gradient(angle: f32, from: Color, to: Color) -> Background {
    Background::Gradient(Gradient::Linear(
        Linear::new(Radians(angle))
            .add_stop(0.0, from)
            .add_stop(1.0, to),
    ))
}

/// Accent color at `alpha`, used for glows and text selection
fn accent(alpha: f32) -> Color {
    Color { a: alpha, ..ACCENT }
}

fn glow(alpha: f32, offset: f32, blur_radius: f32) -> Shadow {
    Shadow {
        color: accent(alpha),
        offset: Vector::new(0.0, offset),
        blur_radius,
    }
}

pub struct WindowBackground;

impl container::StyleSheet for WindowBackground {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(INK),
            // diagonal, top-left to bottom-right
            background: Some(gradient(2.356, SKY, LILAC)),
            ..Default::default()
        }
    }
}

pub struct CardContainer;

impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(INK),
            background: Some(Background::Color(Color { a: 0.85, ..SURFACE })),
            border: border(16.0, 1.0, LINE),
            shadow: glow(0.12, 6.0, 18.0),
        }
    }
}

pub struct ConsoleContainer;

impl container::StyleSheet for ConsoleContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(CONSOLE_TEXT),
            background: Some(Background::Color(CONSOLE_BG)),
            border: border(10.0, 1.0, LABEL),
            ..Default::default()
        }
    }
}

/// Fetch and Download
pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(gradient(0.0, ACCENT, ACCENT_DEEP)),
            text_color: SURFACE,
            border: border(12.0, 0.0, Color::TRANSPARENT),
            shadow: glow(0.3, 3.0, 10.0),
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            shadow: glow(0.45, 3.0, 16.0),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(LINE)),
            text_color: FAINT,
            shadow: Shadow::default(),
            ..self.active(style)
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SURFACE)),
            text_color: LABEL,
            border: border(10.0, 1.0, LINE),
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SURFACE_DIM)),
            ..self.active(style)
        }
    }
}

/// Segmented switch between selection modes
pub enum ModeButton {
    Active,
    Inactive,
}

impl button::StyleSheet for ModeButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let (background, text_color) = match self {
            Self::Active => (Some(Background::Color(ACCENT)), SURFACE),
            Self::Inactive => (None, LABEL),
        };
        button::Appearance {
            background,
            text_color,
            border: border(8.0, 1.0, ACCENT_SOFT),
            ..Default::default()
        }
    }
}

pub struct InputStyle;

impl text_input::StyleSheet for InputStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(SURFACE),
            border: border(10.0, 1.5, LINE),
            icon_color: MUTED,
        }
    }

    fn focused(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(SURFACE),
            border: border(10.0, 1.5, ACCENT_SOFT),
            icon_color: MUTED,
        }
    }

    fn disabled(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(SURFACE_DIM),
            border: border(10.0, 1.5, LINE),
            icon_color: FAINT,
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        FAINT
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        INK
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        FAINT
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        accent(0.3)
    }
}

/// Thin light scroller over the dark console
pub struct ConsoleScrollable;

impl ConsoleScrollable {
    fn with_scroller_alpha(alpha: f32) -> scrollable::Appearance {
        scrollable::Appearance {
            container: container::Appearance::default(),
            scrollbar: scrollable::Scrollbar {
                background: None,
                border: Border::default(),
                scroller: scrollable::Scroller {
                    color: Color { a: alpha, ..SURFACE },
                    border: border(4.0, 0.0, Color::TRANSPARENT),
                },
            },
            gap: None,
        }
    }
}

impl scrollable::StyleSheet for ConsoleScrollable {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> scrollable::Appearance {
        Self::with_scroller_alpha(0.25)
    }

    fn hovered(&self, _style: &Self::Style, over_scrollbar: bool) -> scrollable::Appearance {
        Self::with_scroller_alpha(if over_scrollbar { 0.45 } else { 0.25 })
    }
}
