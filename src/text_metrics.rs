use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Horizontal and vertical extents of one line of text at a font size, in
/// the same units as the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineExtents {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// Measures one line against the first system font matching `font_family`.
/// Returns `None` when no usable font exists, which callers treat as a cue
/// to estimate instead.
pub fn measure_line(text: &str, font_size: f32, font_family: &str) -> Option<LineExtents> {
    if font_size <= 0.0 {
        return None;
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    slots: HashMap<String, Option<FontSlot>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            slots: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<LineExtents> {
        let key = normalize_family_key(font_family);
        if !self.slots.contains_key(&key) {
            let slot = self.load_slot(font_family);
            self.slots.insert(key.clone(), slot);
        }
        let slot = self.slots.get_mut(&key).and_then(|slot| slot.as_mut())?;
        let normalized = text.replace('\t', "    ");
        Some(slot.measure(&normalized, font_size))
    }

    fn load_slot(&mut self, font_family: &str) -> Option<FontSlot> {
        let stack = parse_family_stack(font_family);
        let families: Vec<Family<'_>> = stack
            .iter()
            .map(|(name, generic)| generic.unwrap_or(Family::Name(name.as_str())))
            .collect();

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut slot = None;
        self.db.with_face_data(id, |data, index| {
            slot = FontSlot::from_bytes(data.to_vec(), index);
        });
        slot
    }
}

struct FontSlot {
    data: Vec<u8>,
    index: u32,
    units_per_em: f32,
    ascent: f32,
    descent: f32,
    ascii: [u16; 128],
    exotic: HashMap<char, u16>,
}

impl FontSlot {
    fn from_bytes(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1) as f32;
        let ascent = face.ascender() as f32;
        let descent = -(face.descender() as f32);
        let mut ascii = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        Some(Self {
            data,
            index,
            units_per_em,
            ascent,
            descent,
            ascii,
            exotic: HashMap::new(),
        })
    }

    fn measure(&mut self, text: &str, font_size: f32) -> LineExtents {
        let scale = font_size / self.units_per_em;
        let fallback = font_size * 0.56;
        let ascent = self.ascent * scale;
        let descent = self.descent * scale;

        let Self {
            data,
            index,
            ascii,
            exotic,
            ..
        } = self;
        // The face is only re-parsed when a character misses both advance
        // caches, so ascii-only text never touches the parser.
        let mut face: Option<Face<'_>> = None;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if ch.is_ascii() {
                ascii[ch as usize]
            } else if let Some(units) = exotic.get(&ch) {
                *units
            } else {
                if face.is_none() {
                    face = Face::parse(data, *index).ok();
                }
                let units = face
                    .as_ref()
                    .and_then(|face| {
                        let glyph = face.glyph_index(ch)?;
                        face.glyph_hor_advance(glyph)
                    })
                    .unwrap_or(0);
                exotic.insert(ch, units);
                units
            };
            if advance == 0 {
                width += fallback;
            } else {
                width += advance as f32 * scale;
            }
        }

        LineExtents {
            width: width.max(0.0),
            ascent,
            descent,
        }
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_family_stack(font_family: &str) -> Vec<(String, Option<Family<'static>>)> {
    let mut stack = Vec::new();
    for part in font_family.split(',') {
        let name = part.trim().trim_matches('"').trim_matches('\'');
        if name.is_empty() {
            continue;
        }
        stack.push((name.to_string(), generic_family(name)));
    }
    if stack.is_empty() {
        stack.push((String::new(), Some(Family::SansSerif)));
    }
    stack
}

fn generic_family(name: &str) -> Option<Family<'static>> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Some(Family::Serif),
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Some(Family::SansSerif),
        "monospace" | "ui-monospace" => Some(Family::Monospace),
        "cursive" => Some(Family::Cursive),
        "fantasy" => Some(Family::Fantasy),
        _ => None,
    }
}
