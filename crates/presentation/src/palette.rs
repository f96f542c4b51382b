use crate::band::ReturnBand;
use core_types::Theme;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS-style hex notation, e.g. `#22c55e`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for comfy_table::Color {
    fn from(rgb: Rgb) -> Self {
        comfy_table::Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Band and text colours for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    theme: Theme,
    bands: [Rgb; 5],
    foreground: Rgb,
}

const LIGHT: Palette = Palette {
    theme: Theme::Light,
    bands: [
        Rgb::new(0xf8, 0xb4, 0xb4),
        Rgb::new(0xfd, 0xe6, 0x8a),
        Rgb::new(0xd9, 0xf9, 0x9d),
        Rgb::new(0x86, 0xef, 0xac),
        Rgb::new(0x22, 0xc5, 0x5e),
    ],
    foreground: Rgb::new(0x1f, 0x29, 0x37),
};

const DARK: Palette = Palette {
    theme: Theme::Dark,
    bands: [
        Rgb::new(0x7f, 0x1d, 0x1d),
        Rgb::new(0x78, 0x35, 0x0f),
        Rgb::new(0x3f, 0x62, 0x12),
        Rgb::new(0x16, 0x65, 0x34),
        Rgb::new(0x15, 0x80, 0x3d),
    ],
    foreground: Rgb::new(0xf9, 0xfa, 0xfb),
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn color(&self, band: ReturnBand) -> Rgb {
        self.bands[band as usize]
    }

    /// Text colour that stays readable on every band colour.
    pub fn foreground(&self) -> Rgb {
        self.foreground
    }
}
