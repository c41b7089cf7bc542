//! Command-line configuration

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use bmf_raster::Color;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

const DEFAULT_WIDTH: u32 = 512;
const DEFAULT_HEIGHT: u32 = 256;
const DEFAULT_OUTPUT: &str = "text.png";

/// Everything needed for one render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Primary font metrics file
    pub font: PathBuf,
    /// Primary glyph sheet
    pub image: PathBuf,
    /// Fallback fonts as (metrics, sheet), in priority-ascending order
    pub subfonts: Vec<(PathBuf, PathBuf)>,
    pub text: String,
    pub output: PathBuf,
    /// Canvas size
    pub width: u32,
    pub height: u32,
    /// Text box anchor
    pub x: i32,
    pub y: i32,
    /// Text box size, defaults to the canvas size
    pub box_width: i32,
    pub box_height: i32,
    pub center_x: bool,
    pub center_y: bool,
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: PathBuf::new(),
            image: PathBuf::new(),
            subfonts: Vec::new(),
            text: String::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: 0,
            y: 0,
            box_width: DEFAULT_WIDTH as i32,
            box_height: DEFAULT_HEIGHT as i32,
            center_x: false,
            center_y: false,
            background: Color::TRANSPARENT,
        }
    }
}

impl RenderConfig {
    /// Build from parsed arguments
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let defaults = Self::default();

        let subfonts = matches
            .get_many::<PathBuf>("subfont")
            .map(|values| {
                let values: Vec<&PathBuf> = values.collect();
                values
                    .chunks_exact(2)
                    .map(|pair| (pair[0].clone(), pair[1].clone()))
                    .collect()
            })
            .unwrap_or_default();

        let width = matches.get_one::<u32>("width").copied().unwrap_or(defaults.width);
        let height = matches.get_one::<u32>("height").copied().unwrap_or(defaults.height);

        let background = match matches.get_one::<String>("background") {
            Some(hex) => Color::from_hex(hex)
                .ok_or_else(|| anyhow!("Invalid background color: {hex}"))?,
            None => defaults.background,
        };

        Ok(Self {
            font: required_path(matches, "font")?,
            image: required_path(matches, "image")?,
            subfonts,
            text: matches
                .get_one::<String>("text")
                .cloned()
                .context("Missing --text")?,
            output: matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or(defaults.output),
            width,
            height,
            x: matches.get_one::<i32>("x").copied().unwrap_or(defaults.x),
            y: matches.get_one::<i32>("y").copied().unwrap_or(defaults.y),
            box_width: matches
                .get_one::<i32>("box-width")
                .copied()
                .unwrap_or(width as i32),
            box_height: matches
                .get_one::<i32>("box-height")
                .copied()
                .unwrap_or(height as i32),
            center_x: matches.get_flag("center-x"),
            center_y: matches.get_flag("center-y"),
            background,
        })
    }
}

fn required_path(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .with_context(|| format!("Missing --{id}"))
}

/// Argument definitions
pub fn cli() -> Command {
    Command::new("bmfont-render")
        .about("Renders text with a bitmap font into a PNG")
        .arg(
            Arg::new("font")
                .short('f')
                .long("font")
                .value_name("FNT")
                .help("BMFont metrics file (text format)")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("image")
                .short('i')
                .long("image")
                .value_name("IMAGE")
                .help("Glyph sheet for --font")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("subfont")
                .long("subfont")
                .value_names(["FNT", "IMAGE"])
                .num_args(2)
                .help("Fallback font; later subfonts take priority")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("text")
                .short('t')
                .long("text")
                .value_name("TEXT")
                .help("Text to render")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PNG")
                .help("Output file")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PX")
                .help("Canvas width")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PX")
                .help("Canvas height")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("x")
                .long("x")
                .value_name("PX")
                .help("Box anchor x")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("y")
                .long("y")
                .value_name("PX")
                .help("Box anchor y")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("box-width")
                .long("box-width")
                .value_name("PX")
                .help("Wrap width (defaults to canvas width)")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("box-height")
                .long("box-height")
                .value_name("PX")
                .help("Height budget (defaults to canvas height)")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("center-x")
                .long("center-x")
                .help("Center each line on the anchor x")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("center-y")
                .long("center-y")
                .help("Center the block of lines on the anchor y")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("background")
                .long("background")
                .value_name("RRGGBB[AA]")
                .help("Canvas fill color (default transparent)"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<RenderConfig> {
        let matches = cli().try_get_matches_from(
            std::iter::once("bmfont-render").chain(args.iter().copied()),
        )?;
        RenderConfig::from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["-f", "a.fnt", "-i", "a.png", "-t", "hi"]).unwrap();
        assert_eq!(config.font, PathBuf::from("a.fnt"));
        assert_eq!(config.text, "hi");
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(config.box_width, DEFAULT_WIDTH as i32);
        assert!(config.subfonts.is_empty());
        assert!(!config.center_x && !config.center_y);
        assert_eq!(config.background, Color::TRANSPARENT);
    }

    #[test]
    fn test_box_defaults_follow_canvas() {
        let config = parse(&[
            "-f", "a.fnt", "-i", "a.png", "-t", "hi",
            "--width", "300", "--height", "90",
        ])
        .unwrap();
        assert_eq!((config.box_width, config.box_height), (300, 90));
    }

    #[test]
    fn test_subfonts_in_order() {
        let config = parse(&[
            "-f", "a.fnt", "-i", "a.png", "-t", "hi",
            "--subfont", "b.fnt", "b.png",
            "--subfont", "c.fnt", "c.png",
        ])
        .unwrap();
        assert_eq!(
            config.subfonts,
            vec![
                (PathBuf::from("b.fnt"), PathBuf::from("b.png")),
                (PathBuf::from("c.fnt"), PathBuf::from("c.png")),
            ]
        );
    }

    #[test]
    fn test_negative_anchor_and_centering() {
        let config = parse(&[
            "-f", "a.fnt", "-i", "a.png", "-t", "hi",
            "--x", "-12", "--y", "40", "--center-x", "--center-y",
        ])
        .unwrap();
        assert_eq!((config.x, config.y), (-12, 40));
        assert!(config.center_x && config.center_y);
    }

    #[test]
    fn test_background_color() {
        let with_background = |hex| {
            parse(&["-f", "a.fnt", "-i", "a.png", "-t", "hi", "--background", hex])
        };
        assert_eq!(with_background("ffffff").unwrap().background, Color::WHITE);
        assert!(with_background("zz").is_err());
    }

    #[test]
    fn test_missing_required() {
        assert!(parse(&["-f", "a.fnt", "-t", "hi"]).is_err());
    }
}
