//! System font lookup for text elements.
//!
//! Fonts are resolved through fontdb by family name, weight, and style,
//! loaded once, leaked, and cached for the process lifetime. When a
//! family is missing the generic sans-serif face stands in; on systems
//! with no fonts at all the lookup returns `None` and text rendering
//! degrades to a logged skip.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{
    collections::{HashMap, HashSet},
    fs,
    sync::{Mutex, OnceLock},
};

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// All font family names known to the system, sorted.
pub fn list_font_families() -> Vec<String> {
    let mut set = HashSet::new();
    for face in db().faces() {
        for (name, _) in &face.families {
            set.insert(name.clone());
        }
    }
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}

/// Resolve a font for the family/weight/style combination.
///
/// Falls back to the generic sans-serif face when the family has no
/// match; returns `None` only when the system has no usable font.
pub fn get_font_for(family: &str, bold: bool, italic: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
        italic,
    };

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *font;
    }

    let loaded = load_font_from_system(family, bold, italic)
        .or_else(|| load_font_from_system("Sans", bold, italic))
        .map(|font| &*Box::leak(Box::new(font)));
    if loaded.is_none() {
        tracing::warn!("No system font found for family {:?}", family);
    }

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, loaded);
    loaded
}

/// The generic sans-serif face, if the system has one.
pub fn default_font() -> Option<&'static Font<'static>> {
    get_font_for("Sans", false, false)
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}
