//! BMFont text-format parser
//!
//! Each line is a tag followed by `key=value` pairs:
//!
//! ```text
//! info face="Pixel Sans" size=16
//! common lineHeight=20 base=16 scaleW=256 scaleH=256 pages=1
//! page id=0 file="sheet.png"
//! chars count=1
//! char id=65 x=0 y=0 width=8 height=12 xoffset=0 yoffset=4 xadvance=10 page=0 chnl=15
//! ```

use super::{FontMetrics, GlyphMetrics, PageInfo, ParseError, ParseErrorKind};

/// Parse a BMFont text file
pub fn parse(source: &str) -> Result<FontMetrics, ParseError> {
    let mut metrics = FontMetrics::default();
    let mut seen_common = false;

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let record = Record::parse(line, idx + 1)?;
        match record.tag {
            "info" => {
                metrics.face = record.string("face").unwrap_or_default().to_string();
                metrics.size = record.int_or_zero("size")?;
            }
            "common" => {
                metrics.line_height = record.require("common", "lineHeight")?;
                metrics.base = record.int_or_zero("base")?;
                metrics.scale_w = record.int_or_zero("scaleW")?;
                metrics.scale_h = record.int_or_zero("scaleH")?;
                seen_common = true;
            }
            "page" => {
                metrics.pages.push(PageInfo {
                    id: record.unsigned("id")?.unwrap_or(0),
                    file: record.string("file").unwrap_or_default().to_string(),
                });
            }
            "char" => metrics.glyphs.push(record.glyph()?),
            // Counts, kerning and anything newer tools emit
            _ => {}
        }
    }

    if !seen_common {
        return Err(ParseError::new(0, ParseErrorKind::MissingCommon));
    }

    Ok(metrics)
}

/// One tokenized line
struct Record<'a> {
    line: usize,
    tag: &'a str,
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Record<'a> {
    fn parse(line: &'a str, line_no: usize) -> Result<Self, ParseError> {
        let (tag, mut rest) = match line.find(char::is_whitespace) {
            Some(i) => (&line[..i], &line[i..]),
            None => (line, ""),
        };

        let mut pairs = Vec::new();
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            let key_end = rest
                .find(|c: char| c == '=' || c.is_whitespace())
                .unwrap_or(rest.len());
            let key = &rest[..key_end];
            if !rest[key_end..].starts_with('=') {
                return Err(ParseError::new(
                    line_no,
                    ParseErrorKind::ExpectedPair(key.to_string()),
                ));
            }
            rest = &rest[key_end + 1..];

            let value = if let Some(quoted) = rest.strip_prefix('"') {
                let close = quoted
                    .find('"')
                    .ok_or(ParseError::new(line_no, ParseErrorKind::UnterminatedQuote))?;
                rest = &quoted[close + 1..];
                &quoted[..close]
            } else {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let value = &rest[..end];
                rest = &rest[end..];
                value
            };

            pairs.push((key, value));
        }

        Ok(Self { line: line_no, tag, pairs })
    }

    /// Last value for `key`; later duplicates on a line override earlier ones
    fn string(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    fn int(&self, key: &str) -> Result<Option<i32>, ParseError> {
        self.string(key)
            .map(|value| {
                value.parse::<i32>().map_err(|_| {
                    ParseError::new(
                        self.line,
                        ParseErrorKind::InvalidNumber {
                            key: key.to_string(),
                            value: value.to_string(),
                        },
                    )
                })
            })
            .transpose()
    }

    fn int_or_zero(&self, key: &str) -> Result<i32, ParseError> {
        Ok(self.int(key)?.unwrap_or(0))
    }

    fn unsigned(&self, key: &str) -> Result<Option<u32>, ParseError> {
        self.string(key)
            .map(|value| {
                value.parse::<u32>().map_err(|_| {
                    ParseError::new(
                        self.line,
                        ParseErrorKind::InvalidNumber {
                            key: key.to_string(),
                            value: value.to_string(),
                        },
                    )
                })
            })
            .transpose()
    }

    fn require(&self, tag: &'static str, key: &'static str) -> Result<i32, ParseError> {
        self.int(key)?
            .ok_or(ParseError::new(self.line, ParseErrorKind::MissingKey { tag, key }))
    }

    fn glyph(&self) -> Result<GlyphMetrics, ParseError> {
        let missing_id = ParseErrorKind::MissingKey { tag: "char", key: "id" };
        let id = self
            .unsigned("id")?
            .ok_or(ParseError::new(self.line, missing_id))?;

        let width = self.non_negative(id, "width")?;
        let height = self.non_negative(id, "height")?;
        let x_advance = self.non_negative(id, "xadvance")?;

        Ok(GlyphMetrics {
            codepoint: id,
            atlas_x: self.int_or_zero("x")?,
            atlas_y: self.int_or_zero("y")?,
            width: width as u32,
            height: height as u32,
            x_offset: self.int_or_zero("xoffset")?,
            y_offset: self.int_or_zero("yoffset")?,
            x_advance,
            page: self.unsigned("page")?.unwrap_or(0),
            channel: self.unsigned("chnl")?.unwrap_or(0),
        })
    }

    fn non_negative(&self, id: u32, key: &'static str) -> Result<i32, ParseError> {
        let value = self.int_or_zero(key)?;
        if value < 0 {
            return Err(ParseError::new(
                self.line,
                ParseErrorKind::NegativeMetric { id, key, value },
            ));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"info face="Pixel Sans" size=16 bold=0 padding=0,0,0,0 spacing=1,1
common lineHeight=20 base=16 scaleW=64 scaleH=32 pages=1 packed=0
page id=0 file="pixel sans_0.png"
chars count=3
char id=65 x=0 y=0 width=8 height=12 xoffset=0 yoffset=4 xadvance=10 page=0 chnl=15
char id=66   x=8 y=0 width=7 height=12 xoffset=1 yoffset=4 xadvance=8 page=0 chnl=15
char id=32 x=0 y=0 width=0 height=0 xoffset=0 yoffset=0 xadvance=5 page=0 chnl=15
kernings count=1
kerning first=65 second=66 amount=-1
"#;

    #[test]
    fn test_parse_sample() {
        let metrics = parse(SAMPLE).unwrap();
        assert_eq!(metrics.face, "Pixel Sans");
        assert_eq!(metrics.size, 16);
        assert_eq!(metrics.line_height, 20);
        assert_eq!(metrics.base, 16);
        assert_eq!(metrics.scale_w, 64);
        assert_eq!(metrics.pages, vec![PageInfo { id: 0, file: "pixel sans_0.png".into() }]);
        assert_eq!(metrics.glyphs.len(), 3);

        let b = metrics.glyphs[1];
        assert_eq!(b.codepoint, 66);
        assert_eq!((b.atlas_x, b.atlas_y), (8, 0));
        assert_eq!((b.width, b.height), (7, 12));
        assert_eq!((b.x_offset, b.y_offset), (1, 4));
        assert_eq!(b.x_advance, 8);
        assert_eq!(b.channel, 15);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let metrics = parse("common lineHeight=10\nchar id=97 xadvance=3\n").unwrap();
        let glyph = metrics.glyphs[0];
        assert_eq!(glyph.codepoint, 97);
        assert_eq!(glyph.x_advance, 3);
        assert_eq!(glyph.width, 0);
        assert_eq!(glyph.x_offset, 0);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let source = "common lineHeight=10\nchar id=65 xadvance=3\nchar id=65 xadvance=4\n";
        let metrics = parse(source).unwrap();
        assert_eq!(metrics.glyphs.len(), 2);
        assert_eq!(metrics.glyphs[1].x_advance, 4);
    }

    #[test]
    fn test_unknown_tags_ignored() {
        let metrics = parse("\nfuture thing=1\ncommon lineHeight=7\n\n").unwrap();
        assert_eq!(metrics.line_height, 7);
    }

    #[test]
    fn test_missing_common() {
        let err = parse("info face=x\nchar id=1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingCommon);
    }

    #[test]
    fn test_missing_line_height() {
        let err = parse("common base=3\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingKey { tag: "common", key: "lineHeight" }
        );
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = parse("common lineHeight=10\nchar id=65 xadvance=wide\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(
            err.kind,
            ParseErrorKind::InvalidNumber { ref key, .. } if key == "xadvance"
        ));
    }

    #[test]
    fn test_bare_token_rejected() {
        let err = parse("common lineHeight=10 oops\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedPair("oops".into()));
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse("info face=\"Broken\ncommon lineHeight=1\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, ParseErrorKind::UnterminatedQuote);
    }

    #[test]
    fn test_char_without_id() {
        let err = parse("common lineHeight=10\nchar x=1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingKey { tag: "char", key: "id" });
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = parse("common lineHeight=10\nchar id=65 width=-2\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::NegativeMetric { id: 65, key: "width", value: -2 }
        );
    }

    #[test]
    fn test_from_str() {
        let metrics: FontMetrics = "common lineHeight=12".parse().unwrap();
        assert_eq!(metrics.line_height, 12);
    }
}
