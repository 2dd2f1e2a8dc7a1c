/// A selectable UI theme. Colors live with the renderer; only identity is
/// tracked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub is_dark: bool,
}

pub const DEFAULT_THEME_ID: &str = "classic-light";

pub const THEMES: [Theme; 4] = [
    Theme { id: "classic-light", name: "Classic", emoji: "☀️", is_dark: false },
    Theme { id: "ocean-light", name: "Ocean", emoji: "🌊", is_dark: false },
    Theme { id: "midnight-dark", name: "Midnight", emoji: "🌙", is_dark: true },
    Theme { id: "forest-dark", name: "Forest", emoji: "🌲", is_dark: true },
];

pub fn find(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}

/// Theme for an id, falling back to the default for unknown ids
pub fn resolve(id: &str) -> &'static Theme {
    find(id).unwrap_or(&THEMES[0])
}
