//! Download form view

use crate::gui::app::Message;
use crate::gui::theme;
use crate::job::{DownloadMode, MediaFormat};
use iced::widget::{button, column, container, pick_list, progress_bar, radio, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

/// Render the single download form.
#[allow(clippy::too_many_arguments)]
pub fn main_view(
    url_value: &str,
    format: MediaFormat,
    mode: DownloadMode,
    destination_value: &str,
    progress: f32,
    status_message: &str,
    resolved_title: Option<&str>,
    job_active: bool,
    show_open_folder: bool,
) -> Element<'static, Message> {
    let url_row = row![
        text_input("Paste video URL here...", url_value)
            .on_input(Message::UrlInputChanged)
            .padding(12)
            .width(Length::Fill),
        button(text("Paste").size(14))
            .on_press(Message::PasteFromClipboard)
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(
                theme::SecondaryButton
            ))),
        button(text("Clear").size(14))
            .on_press(Message::ClearUrlInput)
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(
                theme::SecondaryButton
            ))),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    let format_column = column![
        text("Format").size(12).style(iced::theme::Text::Color(theme::GRAY_500)),
        pick_list(&MediaFormat::ALL[..], Some(format), Message::FormatSelected)
            .text_size(14)
            .padding([6, 10]),
    ]
    .spacing(4);

    let mode_column = column![
        text("Download Type").size(12).style(iced::theme::Text::Color(theme::GRAY_500)),
        row![
            radio("Video", DownloadMode::Video, Some(mode), Message::ModeSelected).size(16),
            radio("Audio", DownloadMode::Audio, Some(mode), Message::ModeSelected).size(16),
            radio("Playlist", DownloadMode::Playlist, Some(mode), Message::ModeSelected).size(16),
        ]
        .spacing(16),
    ]
    .spacing(4);

    let destination_row = column![
        text("Save Directory").size(12).style(iced::theme::Text::Color(theme::GRAY_500)),
        row![
            text_input("Where to save downloads", destination_value)
                .on_input(Message::DestinationChanged)
                .padding(12)
                .width(Length::Fill),
            button(text("Browse").size(14))
                .on_press(Message::BrowseDestination)
                .padding([8, 12])
                .style(iced::theme::Button::Custom(Box::new(
                    theme::SecondaryButton
                ))),
        ]
        .spacing(8)
        .align_items(Alignment::Center),
    ]
    .spacing(4);

    let download_button = button(
        text(if job_active { "Downloading..." } else { "Download" }).size(16),
    )
    .on_press_maybe(if job_active {
        None
    } else {
        Some(Message::DownloadPressed)
    })
    .padding([12, 32])
    .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)));

    let mut actions = row![download_button].spacing(8).align_items(Alignment::Center);
    if show_open_folder {
        actions = actions.push(
            button(text("Open Folder").size(14))
                .on_press(Message::OpenDestinationFolder)
                .padding([10, 16])
                .style(iced::theme::Button::Custom(Box::new(
                    theme::SecondaryButton
                ))),
        );
    }

    let mut status_column = column![].spacing(6);
    if let Some(title) = resolved_title {
        status_column = status_column.push(
            text(title.to_string())
                .size(14)
                .style(iced::theme::Text::Color(theme::GRAY_500)),
        );
    }
    status_column = status_column.push(
        text(status_message.to_string())
            .size(14)
            .style(iced::theme::Text::Color(status_color(status_message))),
    );

    let form = container(
        column![
            text("Video Downloader").size(28).style(iced::theme::Text::Color(theme::GRAY_800)),
            url_row,
            row![format_column, Space::with_width(Length::Fixed(24.0)), mode_column]
                .align_items(Alignment::End),
            destination_row,
            actions,
            progress_bar(0.0..=1.0, progress)
                .height(Length::Fixed(10.0))
                .style(iced::theme::ProgressBar::Custom(Box::new(
                    theme::ProgressBarStyle
                ))),
            status_column,
        ]
        .spacing(20),
    )
    .padding(32)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::CardContainer,
    )));

    container(form)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(24)
        .into()
}

fn status_color(status: &str) -> iced::Color {
    if status == "Download Complete" {
        theme::EMERALD_500
    } else if status.starts_with("Error:") {
        theme::RED_500
    } else {
        theme::GRAY_800
    }
}
