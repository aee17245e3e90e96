//! Stable per-listing colour palettes.
//!
//! A listing's palette is picked by hashing its title and id, so the same
//! listing keeps its colours across sessions and devices.

use estate_types::Theme;

/// Card colours for one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub accent: &'static str,
    pub label_bg: &'static str,
}

const fn palette(bg: &'static str, accent: &'static str, label_bg: &'static str) -> Palette {
    Palette {
        bg,
        accent,
        label_bg,
    }
}

pub const LIGHT: [Palette; 6] = [
    palette("#EFF6FF", "#3B82F6", "#DBEAFE"),
    palette("#FAF5FF", "#8B5CF6", "#F3E8FF"),
    palette("#FFF7ED", "#F97316", "#FFEDD5"),
    palette("#ECFDF5", "#10B981", "#D1FAE5"),
    palette("#F0F9FF", "#06B6D4", "#CFFAFE"),
    palette("#FFF1F2", "#F43F5E", "#FFE4E6"),
];

pub const DARK: [Palette; 6] = [
    palette("#1e1b4b", "#818cf8", "#312e81"),
    palette("#2e1065", "#a78bfa", "#4c1d95"),
    palette("#431407", "#fb923c", "#7c2d12"),
    palette("#064e3b", "#34d399", "#065f46"),
    palette("#164e63", "#22d3ee", "#155e75"),
    palette("#881337", "#fb7185", "#9f1239"),
];

/// Accent used for holdings whose listing is no longer known.
pub const UNKNOWN_ACCENT: &str = "#ccc";

/// Index into a palette table of `len` entries.
///
/// Runs `h = c + ((h << 5) - h)` over the UTF-16 code units of `key`, where the
/// shift operates on `h` truncated to a wrapping 32-bit integer and the
/// subtraction does not. Web clients compute the same index for the same key.
pub fn palette_index(key: &str, len: usize) -> usize {
    let mut h: i64 = 0;
    for unit in key.encode_utf16() {
        let shifted = (h as i32).wrapping_shl(5) as i64;
        h = (unit as i64).wrapping_add(shifted.wrapping_sub(h));
    }
    (h.unsigned_abs() % len as u64) as usize
}

/// Palette for the listing identified by `key` (title followed by id).
pub fn palette_for(key: &str, theme: Theme) -> Palette {
    let table = if theme.is_dark() { &DARK } else { &LIGHT };
    table[palette_index(key, table.len())]
}
