//! Font loading tests
//!
//! Fonts are written to a temporary directory as a `.fnt` file plus a PNG
//! sheet, then loaded through the public API.

use std::path::PathBuf;

use bmf_text::*;
use tempfile::TempDir;

const PRIMARY_FNT: &str = r#"info face="Primary" size=16
common lineHeight=20 base=16 scaleW=8 scaleH=4 pages=1
page id=0 file="primary.png"
chars count=4
char id=65 x=0 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=10 page=0 chnl=15
char id=66 x=4 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=8 page=0 chnl=15
char id=32 x=0 y=0 width=0 height=0 xoffset=0 yoffset=0 xadvance=5 page=0 chnl=15
char id=66 x=4 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=9 page=0 chnl=15
"#;

const FALLBACK_FNT: &str = r#"common lineHeight=24
char id=20013 x=0 y=0 width=4 height=4 xadvance=16
char id=66 x=0 y=0 width=4 height=4 xadvance=12
"#;

fn sheet(left: Color, right: Color) -> Vec<u8> {
    let mut canvas = Canvas::new(8, 4).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            canvas.set_pixel(x, y, left);
            canvas.set_pixel(x + 4, y, right);
        }
    }
    canvas.encode_png().unwrap()
}

fn write_font(dir: &TempDir, name: &str, fnt: &str, png: &[u8]) -> (PathBuf, PathBuf) {
    let fnt_path = dir.path().join(format!("{name}.fnt"));
    let png_path = dir.path().join(format!("{name}.png"));
    std::fs::write(&fnt_path, fnt).unwrap();
    std::fs::write(&png_path, png).unwrap();
    (fnt_path, png_path)
}

// ============================================================================
// LOADING
// ============================================================================

#[test]
fn test_load_counts_distinct_codepoints() {
    let dir = tempfile::tempdir().unwrap();
    let (fnt, png) = write_font(&dir, "primary", PRIMARY_FNT, &sheet(Color::RED, Color::BLUE));

    let font = Font::load(&fnt, &png).unwrap();
    assert_eq!(font.glyph_count(), 3);
    assert_eq!(font.line_height(), 20);
    assert_eq!(font.subfont_count(), 0);
    // Duplicate id 66: last entry wins
    assert_eq!(font.advance('B'), 9);
}

#[test]
fn test_load_missing_metrics_file() {
    let dir = tempfile::tempdir().unwrap();
    let (_, png) = write_font(&dir, "primary", PRIMARY_FNT, &sheet(Color::RED, Color::BLUE));

    let err = Font::load(dir.path().join("missing.fnt"), &png).unwrap_err();
    assert!(matches!(err, FontError::Io { ref path, .. } if path.ends_with("missing.fnt")));
}

#[test]
fn test_load_missing_image_file() {
    let dir = tempfile::tempdir().unwrap();
    let (fnt, _) = write_font(&dir, "primary", PRIMARY_FNT, &sheet(Color::RED, Color::BLUE));

    let err = Font::load(&fnt, dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, FontError::Io { .. }));
}

#[test]
fn test_load_malformed_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let (fnt, png) = write_font(
        &dir,
        "broken",
        "common lineHeight=twenty\n",
        &sheet(Color::RED, Color::BLUE),
    );

    let err = Font::load(&fnt, &png).unwrap_err();
    match err {
        FontError::Parse { source, .. } => assert_eq!(source.line, 1),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_load_corrupt_image() {
    let dir = tempfile::tempdir().unwrap();
    let (fnt, png) = write_font(&dir, "primary", PRIMARY_FNT, b"GIF89a but not really");

    let err = Font::load(&fnt, &png).unwrap_err();
    assert!(matches!(err, FontError::Decode { .. }));
    assert!(err.to_string().contains("primary.png"));
}

// ============================================================================
// SUBFONTS
// ============================================================================

#[test]
fn test_add_subfont_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let (fnt, png) = write_font(&dir, "primary", PRIMARY_FNT, &sheet(Color::RED, Color::BLUE));
    let fallback_sheet = sheet(Color::GREEN, Color::BLACK);
    let (sub_fnt, sub_png) = write_font(&dir, "fallback", FALLBACK_FNT, &fallback_sheet);

    let mut font = Font::load(&fnt, &png).unwrap();
    font.add_subfont(&sub_fnt, &sub_png).unwrap();

    assert_eq!(font.subfont_count(), 1);
    assert_eq!(font.advance('中'), 16);
    // Subfont covers 'B' too and takes priority over the primary
    assert_eq!(font.advance('B'), 12);
    assert_eq!(font.advance('A'), 10);
    // Line height still comes from the primary
    assert_eq!(font.line_height(), 20);
}

#[test]
fn test_failed_subfont_is_atomic() {
    let dir = tempfile::tempdir().unwrap();
    let (fnt, png) = write_font(&dir, "primary", PRIMARY_FNT, &sheet(Color::RED, Color::BLUE));
    let fallback_sheet = sheet(Color::GREEN, Color::BLACK);
    let (sub_fnt, _) = write_font(&dir, "fallback", FALLBACK_FNT, &fallback_sheet);

    let mut font = Font::load(&fnt, &png).unwrap();
    assert!(font.add_subfont(&sub_fnt, dir.path().join("nope.png")).is_err());
    assert_eq!(font.subfont_count(), 0);
    assert_eq!(font.advance('中'), 0);
}

#[test]
fn test_subfont_glyph_drawn_from_its_own_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let (fnt, png) = write_font(&dir, "primary", PRIMARY_FNT, &sheet(Color::RED, Color::BLUE));
    let fallback_sheet = sheet(Color::GREEN, Color::BLACK);
    let (sub_fnt, sub_png) = write_font(&dir, "fallback", FALLBACK_FNT, &fallback_sheet);

    let mut font = Font::load(&fnt, &png).unwrap();
    font.add_subfont(&sub_fnt, &sub_png).unwrap();

    let mut canvas = Canvas::new(64, 8).unwrap();
    let end = render_string(&mut canvas, 0, 0, "A中", &font);

    assert_eq!(end, 26);
    assert_eq!(canvas.get_pixel(0, 0), Some(Color::RED));
    assert_eq!(canvas.get_pixel(10, 0), Some(Color::GREEN));
}

#[test]
fn test_from_sources_matches_load() {
    let png = sheet(Color::RED, Color::BLUE);
    let font = Font::from_sources(PRIMARY_FNT, &png).unwrap();
    assert_eq!(font.glyph_count(), 3);
    assert_eq!(measure_text("A B", &font), 10 + 5 + 9);
}
