//! Custom theme definitions for the application - Light Theme

use iced::widget::{button, container, progress_bar};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// --- Light Color Palette ---

pub const INDIGO_500: Color = Color::from_rgb(0.388, 0.400, 0.945); // Primary actions
pub const INDIGO_400: Color = Color::from_rgb(0.506, 0.549, 0.973); // Hover state

pub const EMERALD_500: Color = Color::from_rgb(0.063, 0.725, 0.506); // Success state
pub const RED_500: Color = Color::from_rgb(0.937, 0.267, 0.267); // Danger state

pub const GRAY_800: Color = Color::from_rgb(0.122, 0.161, 0.216); // Primary text
pub const GRAY_500: Color = Color::from_rgb(0.420, 0.447, 0.502); // Secondary text
pub const GRAY_200: Color = Color::from_rgb(0.898, 0.906, 0.922); // Light borders
pub const GRAY_100: Color = Color::from_rgb(0.953, 0.957, 0.965); // Very light bg

pub const WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);

// --- Container Styles ---

/// Card wrapping the download form.
pub struct CardContainer;

impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(GRAY_800),
            background: Some(Background::Color(WHITE)),
            border: Border {
                color: GRAY_200,
                width: 1.0,
                radius: 12.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.122, 0.161, 0.216, 0.08),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
        }
    }
}

// --- Button Styles ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(INDIGO_500)),
            text_color: WHITE,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(INDIGO_400)),
            ..self.active(style)
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GRAY_100)),
            text_color: GRAY_800,
            border: Border {
                color: GRAY_200,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }
}

// --- Progress Bar ---

pub struct ProgressBarStyle;

impl progress_bar::StyleSheet for ProgressBarStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> progress_bar::Appearance {
        progress_bar::Appearance {
            background: Background::Color(GRAY_200),
            bar: Background::Color(INDIGO_500),
            border_radius: 6.0.into(),
        }
    }
}
