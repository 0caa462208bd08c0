//! Colors carried by particles and fireworks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Rgb(u8, u8, u8),
    /// Hue in degrees, saturation and lightness in percent.
    Hsl { h: f32, s: f32, l: f32 },
}

impl Color {
    pub const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);
    pub const GOLD: Color = Color::Rgb(0xff, 0xd7, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Color::Hsl { h, s, l }
    }

    /// Linear-ish RGBA in 0..=1, alpha always 1.
    pub fn to_rgba(self) -> [f32; 4] {
        match self {
            Color::Rgb(r, g, b) => [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0],
            Color::Hsl { h, s, l } => {
                let [r, g, b] = hsl_to_rgb(h, s / 100.0, l / 100.0);
                [r, g, b, 1.0]
            }
        }
    }

    /// CSS color string, handy for canvas-style renderers.
    pub fn css(self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("#{r:02x}{g:02x}{b:02x}"),
            Color::Hsl { h, s, l } => {
                format!("hsl({:.0}, {:.0}%, {:.0}%)", h.rem_euclid(360.0), s, l)
            }
        }
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}
