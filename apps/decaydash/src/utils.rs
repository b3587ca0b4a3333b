//! Supporting helpers: message prefixes, color gating, number formatting.

use crate::classify::Hue;
use owo_colors::OwoColorize;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "⟦error⟧".red().bold().to_string()
    } else {
        "⟦error⟧".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "⟦note⟧".cyan().bold().to_string()
    } else {
        "⟦note⟧".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "⟦info⟧".blue().bold().to_string()
    } else {
        "⟦info⟧".to_string()
    }
}

/// Paint `s` in the terminal color closest to `hue`.
pub fn paint(s: &str, hue: Hue, color: bool) -> String {
    if !color {
        return s.to_string();
    }
    match hue {
        Hue::Red => s.red().to_string(),
        Hue::Yellow => s.yellow().to_string(),
        Hue::Green => s.green().to_string(),
        Hue::Gray => s.bright_black().to_string(),
        Hue::Blue => s.blue().to_string(),
        Hue::Purple => s.magenta().to_string(),
    }
}

pub fn bold(s: &str, color: bool) -> String {
    if color {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

pub fn dim(s: &str, color: bool) -> String {
    if color {
        s.dimmed().to_string()
    } else {
        s.to_string()
    }
}

/// Group digits with commas: `17100` -> `17,100`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Cost in whole thousands: `1710000` -> `$1710K`.
pub fn cost_k(cost: u64) -> String {
    format!("${}K", (cost as f64 / 1000.0).round() as u64)
}
