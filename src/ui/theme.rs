use ratatui::style::{Color, Style};

pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}
