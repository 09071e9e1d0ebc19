use crossterm::style::Color;

use crate::config::PlayerColor;
use crate::game::port::{Ink, Weight};

/// Terminal color for a player
pub fn player_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Cyan => Color::Cyan,
        PlayerColor::Magenta => Color::Magenta,
        PlayerColor::Green => Color::Green,
        PlayerColor::Yellow => Color::Yellow,
        PlayerColor::Red => Color::Red,
        PlayerColor::Blue => Color::Blue,
        PlayerColor::White => Color::White,
        PlayerColor::Orange => Color::AnsiValue(208),
    }
}

/// Resolve an ink to a foreground color and bold flag.
/// Dim weight drops the bright variant where one exists.
pub fn ink_color(ink: Ink, weight: Weight) -> (Option<Color>, bool) {
    let bold = weight == Weight::Bold;
    match ink {
        Ink::Trail(c) | Ink::Head(c) => {
            let color = player_color(c);
            if weight == Weight::Dim {
                (Some(dimmed(color)), false)
            } else {
                (Some(color), bold)
            }
        }
        Ink::Wall => (Some(Color::DarkCyan), false),
        Ink::Hud => (Some(Color::White), bold),
        Ink::Dim => (Some(Color::DarkGrey), false),
    }
}

fn dimmed(color: Color) -> Color {
    match color {
        Color::Cyan => Color::DarkCyan,
        Color::Magenta => Color::DarkMagenta,
        Color::Green => Color::DarkGreen,
        Color::Yellow => Color::DarkYellow,
        Color::Red => Color::DarkRed,
        Color::Blue => Color::DarkBlue,
        Color::White => Color::Grey,
        Color::AnsiValue(208) => Color::AnsiValue(166),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orange_uses_256_color_palette() {
        assert_eq!(player_color(PlayerColor::Orange), Color::AnsiValue(208));
    }

    #[test]
    fn every_player_color_is_distinct() {
        let colors: Vec<Color> = PlayerColor::ALL.iter().map(|&c| player_color(c)).collect();
        for (i, a) in colors.iter().enumerate() {
            assert!(!colors[i + 1..].contains(a));
        }
    }

    #[test]
    fn weight_controls_bold_and_dim() {
        assert_eq!(ink_color(Ink::Head(PlayerColor::Red), Weight::Bold), (Some(Color::Red), true));
        assert_eq!(ink_color(Ink::Trail(PlayerColor::Red), Weight::Dim), (Some(Color::DarkRed), false));
        assert_eq!(ink_color(Ink::Wall, Weight::Bold), (Some(Color::DarkCyan), false));
    }
}
