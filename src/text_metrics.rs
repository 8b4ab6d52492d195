use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

// Width of a glyph we cannot resolve, as a fraction of the font size.
const FALLBACK_ADVANCE: f32 = 0.56;

static FONT_STORE: Lazy<Mutex<FontStore>> = Lazy::new(|| Mutex::new(FontStore::new()));

/// Source of label text dimensions. The engine only needs a width; the
/// label box height follows from the theme's font size and padding.
pub trait LabelMeasurer {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32;
}

/// Measures against real font metrics via the system font database. Falls
/// back to a per-character estimate when no face matches, so it always
/// returns a usable width.
#[derive(Debug, Default)]
pub struct FontMeasurer;

impl LabelMeasurer for FontMeasurer {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        measure_text_width(text, font_size, font_family)
            .unwrap_or_else(|| estimate_width(text, font_size))
    }
}

/// Deterministic estimate: every character advances by a fixed fraction of
/// the font size. Used in tests and in hosts without font access (wasm).
#[derive(Debug, Clone, Copy)]
pub struct CharCellMeasurer {
    pub advance: f32,
}

impl Default for CharCellMeasurer {
    fn default() -> Self {
        Self {
            advance: FALLBACK_ADVANCE,
        }
    }
}

impl LabelMeasurer for CharCellMeasurer {
    fn text_width(&self, text: &str, font_size: f32, _font_family: &str) -> f32 {
        text.chars().count() as f32 * self.advance * font_size
    }
}

fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * FALLBACK_ADVANCE * font_size
}

fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut store = FONT_STORE.lock().ok()?;
    store.measure(text, font_size, font_family)
}

struct FontStore {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl FontStore {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get_mut(&key).and_then(|f| f.as_mut())?;
        Some(face.width_of(text, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = Vec::with_capacity(names.len() + 1);
        for name in &names {
            match name.to_ascii_lowercase().as_str() {
                "serif" => families.push(Family::Serif),
                "sans-serif" => families.push(Family::SansSerif),
                "monospace" | "ui-monospace" => families.push(Family::Monospace),
                "cursive" => families.push(Family::Cursive),
                "fantasy" => families.push(Family::Fantasy),
                "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    families.push(Family::SansSerif)
                }
                _ => families.push(Family::Name(name.as_str())),
            }
        }
        if families.is_empty() {
            families.push(Family::Monospace);
        }

        let id = self.db.query(&Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })?;
        self.db
            .with_face_data(id, |data, index| LoadedFace::parse(data.to_vec(), index))
            .flatten()
    }
}

struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    advance_cache: HashMap<char, Option<u16>>,
}

impl LoadedFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        Some(Self {
            data,
            index,
            units_per_em,
            advance_cache: HashMap::new(),
        })
    }

    fn width_of(&mut self, text: &str, font_size: f32) -> f32 {
        let Ok(face) = Face::parse(&self.data, self.index) else {
            return estimate_width(text, font_size);
        };
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * FALLBACK_ADVANCE;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = *self.advance_cache.entry(ch).or_insert_with(|| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
            });
            match advance {
                Some(units) => width += units as f32 * scale,
                None => width += fallback,
            }
        }
        width.max(0.0)
    }
}

fn family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "monospace".to_string()
    } else {
        trimmed.to_string()
    }
}
