//! Choosing the Regular face of a family among located font files.

use std::{
    fs::read,
    path::{Path, PathBuf},
};

use anyhow::Result;
use log::{info, warn};
use read_fonts::{FontRef, TableProvider};

use crate::{config::FontPreference, error::Error};

const NAME_ID_SUBFAMILY: u16 = 2;
const NAME_ID_TYPOGRAPHIC_SUBFAMILY: u16 = 17;
const WEIGHT_REGULAR: u16 = 400;

/// How a face was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// File name and directory matched the preference.
    Preferred,
    /// Nothing matched by path; the first located file, whose own name and OS/2
    /// tables say Regular.
    Metadata,
    /// Nothing matched; first located file.
    FirstAvailable,
}

/// Pick the Regular face out of `fonts`, keeping the order they were located in.
///
/// Tries the path heuristic first, then falls back to the first file. Font metadata
/// never changes which file is chosen: it only confirms the fallback or names a likely
/// better candidate in the log. Fails only when `fonts` is empty.
pub fn select_regular(
    fonts: &[PathBuf],
    preference: &FontPreference,
    label: &str,
    dir: &Path,
    pattern: &str,
) -> Result<(PathBuf, Selection)> {
    if let Some(font) = fonts.iter().find(|p| preference.matches(p)) {
        info!("Using {label} font: {}", font.display());
        return Ok((font.clone(), Selection::Preferred));
    }

    let Some(first) = fonts.first() else {
        return Err(Error::NoFontsFound {
            label: label.to_string(),
            pattern: pattern.to_string(),
            dir: dir.to_path_buf(),
        }
        .into());
    };

    if is_regular_face(first) {
        info!("Using {label} font (Regular by metadata): {}", first.display());
        return Ok((first.clone(), Selection::Metadata));
    }

    warn!("Could not find {label} Regular font, using first available");
    if let Some(candidate) = fonts.iter().skip(1).find(|p| is_regular_face(p)) {
        info!(
            "{label}: {} looks like the Regular face by its metadata",
            candidate.display()
        );
    }
    info!("Using {label} font: {}", first.display());
    Ok((first.clone(), Selection::FirstAvailable))
}

/// Whether the file parses as a font whose metadata marks it as the upright Regular.
pub fn is_regular_face(path: &Path) -> bool {
    read(path).is_ok_and(|data| regular_face_data(&data))
}

fn regular_face_data(data: &[u8]) -> bool {
    let Ok(font) = FontRef::new(data) else {
        return false;
    };

    if let Ok(os2) = font.os2()
        && os2.us_weight_class() != WEIGHT_REGULAR
    {
        return false;
    }

    subfamily_name(&font).is_some_and(|s| s == "Regular")
}

fn subfamily_name(font: &FontRef) -> Option<String> {
    let name = font.name().ok()?;
    let lookup = |wanted: u16| {
        name.name_record()
            .iter()
            .filter(|record| record.name_id().to_u16() == wanted)
            .find_map(|record| record.string(name.string_data()).ok())
            .map(|s| s.chars().collect::<String>())
    };
    lookup(NAME_ID_TYPOGRAPHIC_SUBFAMILY).or_else(|| lookup(NAME_ID_SUBFAMILY))
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;
    use write_fonts::{
        FontBuilder,
        tables::{
            name::{Name, NameRecord},
            os2::{Os2, SelectionFlags},
        },
        types::{NameId, Tag},
    };

    use super::*;

    fn make_font(subfamily: &str, weight: u16) -> Vec<u8> {
        let records = vec![
            NameRecord::new(3, 1, 0x409, NameId::new(1), "Test".to_string().into()),
            NameRecord::new(3, 1, 0x409, NameId::new(2), subfamily.to_string().into()),
        ];
        let os2 = Os2 {
            x_avg_char_width: 500,
            us_weight_class: weight,
            us_width_class: 5,
            fs_type: 0,
            y_subscript_x_size: 650,
            y_subscript_y_size: 600,
            y_subscript_x_offset: 0,
            y_subscript_y_offset: 75,
            y_superscript_x_size: 650,
            y_superscript_y_size: 600,
            y_superscript_x_offset: 0,
            y_superscript_y_offset: 350,
            y_strikeout_size: 50,
            y_strikeout_position: 300,
            s_family_class: 0,
            panose_10: [0; 10],
            ul_unicode_range_1: 0,
            ul_unicode_range_2: 0,
            ul_unicode_range_3: 0,
            ul_unicode_range_4: 0,
            ach_vend_id: Tag::new(b"NONE"),
            fs_selection: SelectionFlags::REGULAR,
            us_first_char_index: 0x20,
            us_last_char_index: 0x7E,
            s_typo_ascender: 800,
            s_typo_descender: -200,
            s_typo_line_gap: 0,
            us_win_ascent: 1000,
            us_win_descent: 300,
            ul_code_page_range_1: Some(0),
            ul_code_page_range_2: Some(0),
            sx_height: Some(500),
            s_cap_height: Some(700),
            us_default_char: Some(0),
            us_break_char: Some(0x20),
            us_max_context: Some(0),
            us_lower_optical_point_size: None,
            us_upper_optical_point_size: None,
        };

        let mut builder = FontBuilder::new();
        builder.add_table(&Name::new(records)).unwrap();
        builder.add_table(&os2).unwrap();
        builder.build()
    }

    #[test]
    fn test_metadata_regular() {
        assert!(regular_face_data(&make_font("Regular", 400)));
    }

    #[test]
    fn test_metadata_bold_is_not_regular() {
        assert!(!regular_face_data(&make_font("Bold", 700)));
        assert!(!regular_face_data(&make_font("Regular", 700)));
    }

    #[test]
    fn test_metadata_garbage() {
        assert!(!regular_face_data(b"definitely not a font"));
    }

    #[test]
    fn test_prefers_path_match() {
        let fonts = vec![
            PathBuf::from("x/ttf/JetBrainsMono-Bold.ttf"),
            PathBuf::from("x/variable/JetBrainsMono-Regular.ttf"),
            PathBuf::from("x/ttf/JetBrainsMono-Regular.ttf"),
        ];
        let pref = FontPreference::new(&["Regular"]).in_dir("ttf");
        let (font, how) = select_regular(&fonts, &pref, "JetBrains Mono", Path::new("x"), "*.ttf")
            .unwrap();
        assert_eq!(font, fonts[2]);
        assert_eq!(how, Selection::Preferred);
    }

    #[test]
    fn test_later_regular_metadata_does_not_win() {
        let dir = tempdir().unwrap();
        let bold = dir.path().join("LXGWWenKaiMono-Bold.ttf");
        let book = dir.path().join("LXGWWenKaiMono-Book.ttf");
        write(&bold, make_font("Bold", 700)).unwrap();
        write(&book, make_font("Regular", 400)).unwrap();

        let fonts = vec![bold.clone(), book];
        let pref = FontPreference::new(&["Regular", "Mono"]);
        let (font, how) = select_regular(&fonts, &pref, "LXGW", dir.path(), "*.ttf").unwrap();
        assert_eq!(font, bold);
        assert_eq!(how, Selection::FirstAvailable);
    }

    #[test]
    fn test_metadata_confirms_first() {
        let dir = tempdir().unwrap();
        let book = dir.path().join("LXGWWenKaiMono-Book.ttf");
        let bold = dir.path().join("LXGWWenKaiMono-Bold.ttf");
        write(&book, make_font("Regular", 400)).unwrap();
        write(&bold, make_font("Bold", 700)).unwrap();

        let fonts = vec![book.clone(), bold];
        let pref = FontPreference::new(&["Regular", "Mono"]);
        let (font, how) = select_regular(&fonts, &pref, "LXGW", dir.path(), "*.ttf").unwrap();
        assert_eq!(font, book);
        assert_eq!(how, Selection::Metadata);
    }

    #[test]
    fn test_falls_back_to_first() {
        let fonts = vec![PathBuf::from("b/Light.ttf"), PathBuf::from("a/Bold.ttf")];
        let pref = FontPreference::new(&["Regular"]);
        let (font, how) = select_regular(&fonts, &pref, "LXGW", Path::new("a"), "*.ttf").unwrap();
        assert_eq!(font, fonts[0]);
        assert_eq!(how, Selection::FirstAvailable);
    }

    #[test]
    fn test_no_fonts_is_named() {
        let err = select_regular(&[], &FontPreference::default(), "LXGW", Path::new("d"), "*.ttf")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NoFontsFound { .. })
        ));
    }
}
