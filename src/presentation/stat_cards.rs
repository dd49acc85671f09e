use colored::{Color, Colorize};

use crate::dashboard::FleetStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: usize,
    pub color: Color,
}

pub fn stat_cards(stats: &FleetStats) -> [StatCard; 4] {
    [
        StatCard {
            title: "Total Vehicles",
            value: stats.total,
            color: Color::BrightBlue,
        },
        StatCard {
            title: "Normal Status",
            value: stats.normal,
            color: Color::Green,
        },
        StatCard {
            title: "Warnings",
            value: stats.warning,
            color: Color::Yellow,
        },
        StatCard {
            title: "At Risk",
            value: stats.risk,
            color: Color::Red,
        },
    ]
}

pub fn render_stat_cards(stats: &FleetStats) -> String {
    stat_cards(stats)
        .iter()
        .map(|card| {
            format!("{}: {}", card.title, card.value)
                .color(card.color)
                .bold()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("   ")
}
