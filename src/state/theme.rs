//! Named color themes for the map and the surrounding chrome.

use eframe::egui::Color32;

/// Available color themes.
///
/// The string keys are what gets persisted and written to the URL.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeKey {
    #[default]
    Classic,
    Dark,
    Earth,
    Sepia,
    Monochrome,
    NeonBlue,
    NeonPink,
    NeonGreen,
    Cyberpunk,
    Retrowave,
}

/// Immutable palette for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeDefinition {
    pub name: &'static str,
    /// Ocean / map background.
    pub background: Color32,
    pub land: Color32,
    pub land_stroke: Color32,
    pub country_stroke: Color32,
    pub graticule: Color32,
    /// Window background behind the map.
    pub ui_background: Color32,
    pub ui_text: Color32,
    pub ui_accent: Color32,
    /// Translucent fill for floating panels.
    pub ui_menu_bg: Color32,
}

const fn hex(rgb: u32) -> Color32 {
    Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Menu backgrounds are 90% opaque (premultiplied).
const fn menu(r: u8, g: u8, b: u8) -> Color32 {
    const A: u16 = 230;
    Color32::from_rgba_premultiplied(
        (r as u16 * A / 255) as u8,
        (g as u16 * A / 255) as u8,
        (b as u16 * A / 255) as u8,
        A as u8,
    )
}

const CLASSIC: ThemeDefinition = ThemeDefinition {
    name: "Classic",
    background: hex(0xcae8ff),
    land: hex(0xe8e8e8),
    land_stroke: hex(0x999999),
    country_stroke: hex(0x555555),
    graticule: hex(0xcccccc),
    ui_background: hex(0xffffff),
    ui_text: hex(0x000000),
    ui_accent: hex(0x0066cc),
    ui_menu_bg: menu(255, 255, 255),
};

const DARK: ThemeDefinition = ThemeDefinition {
    name: "Dark",
    background: hex(0x1a1a2e),
    land: hex(0x2a2a4a),
    land_stroke: hex(0x4a4a6a),
    country_stroke: hex(0x6a6a8a),
    graticule: hex(0x4a4a6a),
    ui_background: hex(0x121212),
    ui_text: hex(0xffffff),
    ui_accent: hex(0x6a8caf),
    ui_menu_bg: menu(18, 18, 18),
};

const EARTH: ThemeDefinition = ThemeDefinition {
    name: "Earth",
    background: hex(0xa4d1e9),
    land: hex(0xc4dea0),
    land_stroke: hex(0x75a37c),
    country_stroke: hex(0x5a7a5a),
    graticule: hex(0x75a3a3),
    ui_background: hex(0xf0f7e9),
    ui_text: hex(0x2c3e50),
    ui_accent: hex(0x3d8b40),
    ui_menu_bg: menu(240, 247, 233),
};

const SEPIA: ThemeDefinition = ThemeDefinition {
    name: "Sepia",
    background: hex(0xf0e6d2),
    land: hex(0xe0c9a6),
    land_stroke: hex(0xb5a285),
    country_stroke: hex(0x8a7a65),
    graticule: hex(0xc0b090),
    ui_background: hex(0xf5f0e6),
    ui_text: hex(0x5d4037),
    ui_accent: hex(0xa1887f),
    ui_menu_bg: menu(245, 240, 230),
};

const MONOCHROME: ThemeDefinition = ThemeDefinition {
    name: "Monochrome",
    background: hex(0xf5f5f5),
    land: hex(0xd9d9d9),
    land_stroke: hex(0xa0a0a0),
    country_stroke: hex(0x707070),
    graticule: hex(0xc0c0c0),
    ui_background: hex(0xffffff),
    ui_text: hex(0x333333),
    ui_accent: hex(0x666666),
    ui_menu_bg: menu(255, 255, 255),
};

const NEON_BLUE: ThemeDefinition = ThemeDefinition {
    name: "Neon Blue",
    background: hex(0x000033),
    land: hex(0x0033cc),
    land_stroke: hex(0x00ccff),
    country_stroke: hex(0x00ffff),
    graticule: hex(0x0066ff),
    ui_background: hex(0x000033),
    ui_text: hex(0x00ffff),
    ui_accent: hex(0x00ccff),
    ui_menu_bg: menu(0, 0, 51),
};

const NEON_PINK: ThemeDefinition = ThemeDefinition {
    name: "Neon Pink",
    background: hex(0x330033),
    land: hex(0x990099),
    land_stroke: hex(0xff00ff),
    country_stroke: hex(0xff66ff),
    graticule: hex(0xcc00cc),
    ui_background: hex(0x330033),
    ui_text: hex(0xff66ff),
    ui_accent: hex(0xff00ff),
    ui_menu_bg: menu(51, 0, 51),
};

const NEON_GREEN: ThemeDefinition = ThemeDefinition {
    name: "Neon Green",
    background: hex(0x001a00),
    land: hex(0x006600),
    land_stroke: hex(0x00ff00),
    country_stroke: hex(0x66ff66),
    graticule: hex(0x00cc00),
    ui_background: hex(0x001a00),
    ui_text: hex(0x66ff66),
    ui_accent: hex(0x00ff00),
    ui_menu_bg: menu(0, 26, 0),
};

const CYBERPUNK: ThemeDefinition = ThemeDefinition {
    name: "Cyberpunk",
    background: hex(0x0b0b2b),
    land: hex(0x3d0066),
    land_stroke: hex(0xff00ff),
    country_stroke: hex(0x00ffff),
    graticule: hex(0xffff00),
    ui_background: hex(0x0b0b2b),
    ui_text: hex(0x00ffff),
    ui_accent: hex(0xff00ff),
    ui_menu_bg: menu(11, 11, 43),
};

const RETROWAVE: ThemeDefinition = ThemeDefinition {
    name: "Retrowave",
    background: hex(0x000033),
    land: hex(0x330066),
    land_stroke: hex(0xff00cc),
    country_stroke: hex(0x00ffff),
    graticule: hex(0x9900ff),
    ui_background: hex(0x000033),
    ui_text: hex(0x00ffff),
    ui_accent: hex(0xff00cc),
    ui_menu_bg: menu(0, 0, 51),
};

impl ThemeKey {
    /// Persisted / URL key.
    pub fn key(&self) -> &'static str {
        match self {
            ThemeKey::Classic => "classic",
            ThemeKey::Dark => "dark",
            ThemeKey::Earth => "earth",
            ThemeKey::Sepia => "sepia",
            ThemeKey::Monochrome => "monochrome",
            ThemeKey::NeonBlue => "neonBlue",
            ThemeKey::NeonPink => "neonPink",
            ThemeKey::NeonGreen => "neonGreen",
            ThemeKey::Cyberpunk => "cyberpunk",
            ThemeKey::Retrowave => "retrowave",
        }
    }

    /// Parses a persisted key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<ThemeKey> {
        Self::all().iter().copied().find(|t| t.key() == key)
    }

    pub fn label(&self) -> &'static str {
        self.definition().name
    }

    pub fn definition(&self) -> &'static ThemeDefinition {
        match self {
            ThemeKey::Classic => &CLASSIC,
            ThemeKey::Dark => &DARK,
            ThemeKey::Earth => &EARTH,
            ThemeKey::Sepia => &SEPIA,
            ThemeKey::Monochrome => &MONOCHROME,
            ThemeKey::NeonBlue => &NEON_BLUE,
            ThemeKey::NeonPink => &NEON_PINK,
            ThemeKey::NeonGreen => &NEON_GREEN,
            ThemeKey::Cyberpunk => &CYBERPUNK,
            ThemeKey::Retrowave => &RETROWAVE,
        }
    }

    pub fn all() -> &'static [ThemeKey] {
        &[
            ThemeKey::Classic,
            ThemeKey::Dark,
            ThemeKey::Earth,
            ThemeKey::Sepia,
            ThemeKey::Monochrome,
            ThemeKey::NeonBlue,
            ThemeKey::NeonPink,
            ThemeKey::NeonGreen,
            ThemeKey::Cyberpunk,
            ThemeKey::Retrowave,
        ]
    }

    /// Whether the chrome should use egui's dark visuals as a base.
    pub fn is_dark(&self) -> bool {
        let bg = self.definition().ui_background;
        let luma = 0.299 * bg.r() as f32 + 0.587 * bg.g() as f32 + 0.114 * bg.b() as f32;
        luma < 128.0
    }
}
