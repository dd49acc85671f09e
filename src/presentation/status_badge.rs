use colored::{Color, Colorize};

use crate::models::AiStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStyle {
    pub label: &'static str,
    pub color: Color,
    pub symbol: &'static str,
}

/// Estilo del badge según el estado IA; sin estado se usa el gris por defecto
pub fn badge_style(status: Option<AiStatus>) -> BadgeStyle {
    match status {
        Some(AiStatus::Normal) => BadgeStyle {
            label: "Normal",
            color: Color::Green,
            symbol: "✔",
        },
        Some(AiStatus::Warning) => BadgeStyle {
            label: "Warning",
            color: Color::Yellow,
            symbol: "⚠",
        },
        Some(AiStatus::Risk) => BadgeStyle {
            label: "Risk",
            color: Color::Red,
            symbol: "✖",
        },
        None => BadgeStyle {
            label: "-",
            color: Color::BrightBlack,
            symbol: "•",
        },
    }
}

pub fn render_badge(status: Option<AiStatus>) -> String {
    let style = badge_style(status);
    format!("{} {}", style.symbol, style.label)
        .color(style.color)
        .bold()
        .to_string()
}
