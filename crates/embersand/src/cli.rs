use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::prefs::PreviewStyle;

#[derive(Parser, Debug)]
#[command(
    name = "embersand",
    author,
    version,
    about = "Ember shader sandbox",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every catalog entry with its resolved function name.
    List(ListArgs),
    /// Show the declared inputs of a single effect.
    Show(ShowArgs),
    /// Rebuild and print an effect's invocation once per simulated frame.
    Preview(PreviewArgs),
    /// Step a transition's insertion and removal invocations through progress.
    Transition(TransitionArgs),
    /// Generate a blur mask PNG and print the two blur pass invocations.
    Mask(MaskArgs),
    /// Show or change the persisted sandbox preferences.
    Prefs(PrefsCommand),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON instead of the table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Display name or function identifier (e.g. `Gradient Fill` or `gradientFill`).
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Display name or function identifier of the effect to preview.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Number of simulated frames to run.
    #[arg(long, value_name = "COUNT", default_value_t = 10)]
    pub frames: u32,

    /// Simulated frame rate.
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Preview surface size (e.g. `400x400`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Slider value; defaults to the midpoint of the effect's range.
    #[arg(long, value_name = "VALUE")]
    pub value: Option<f32>,

    /// Replacement color as `R,G,B[,A]` components in 0-1.
    #[arg(long, value_name = "COLOR", value_parser = parse_color, default_value = "1,0,0,1")]
    pub color: [f32; 4],

    /// Fixed pointer position as `X,Y`; defaults to a sweep across the view.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub touch: Option<[f32; 2]>,

    /// Emit one JSON object per frame instead of the text log.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct TransitionArgs {
    /// Display name of the transition (e.g. `Crosswarp (→)`).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Number of progress steps between 0 and 1 inclusive.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    pub steps: u32,

    /// Preview surface size (e.g. `400x400`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Emit machine-readable JSON instead of the text log.
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKindArg {
    /// Vertical linear gradient (progressive blur).
    Gradient,
    /// Ellipse inset from the bounds (vignette).
    Vignette,
    /// Rounded rectangle inset from the bounds.
    Rounded,
}

#[derive(Parser, Debug)]
pub struct MaskArgs {
    /// Which mask to draw.
    #[arg(value_enum, value_name = "KIND")]
    pub kind: MaskKindArg,

    /// Mask size in pixels (e.g. `400x400`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size, default_value = "400x400")]
    pub size: (u32, u32),

    /// Gradient start offset, proportional from the top.
    #[arg(long, value_name = "OFFSET", default_value_t = 0.0)]
    pub start: f32,

    /// Gradient end offset, proportional from the top.
    #[arg(long, value_name = "OFFSET", default_value_t = 1.0)]
    pub end: f32,

    /// Shape inset relative to the bounds (0 = none, 0.5 = collapsed).
    #[arg(long, value_name = "PROPORTION", default_value_t = 0.25)]
    pub inset: f32,

    /// Edge feather radius in pixels.
    #[arg(long, value_name = "PIXELS", default_value_t = 5.0)]
    pub feather: f32,

    /// Corner radius for the rounded rectangle mask.
    #[arg(long, value_name = "PIXELS", default_value_t = 25.0)]
    pub corner_radius: f32,

    /// Blur outside the shape instead of inside it.
    #[arg(long)]
    pub invert: bool,

    /// Blur radius used for the printed blur passes.
    #[arg(long, value_name = "PIXELS", default_value_t = 10.0)]
    pub radius: f32,

    /// Maximum per-direction sample count for the blur passes.
    #[arg(long, value_name = "COUNT", default_value_t = 15)]
    pub max_samples: u32,

    /// Run the vertical blur pass before the horizontal one.
    #[arg(long)]
    pub vertical_first: bool,

    /// Where to write the mask PNG.
    #[arg(long, value_name = "PATH", default_value = "mask.png")]
    pub out: PathBuf,
}

#[derive(Parser, Debug)]
pub struct PrefsCommand {
    /// Use an explicit preferences file instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub action: PrefsAction,
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Print the current preferences and where they live.
    Show,
    /// Update one or more preferences.
    Set(PrefsSetArgs),
}

#[derive(Parser, Debug)]
pub struct PrefsSetArgs {
    /// Preview content style shown behind effects.
    #[arg(long, value_enum, value_name = "STYLE")]
    pub preview: Option<PreviewStyle>,

    /// Default simulated frame rate.
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Default preview surface size (e.g. `400x400`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{width}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{height}'"))?;
    if width == 0 || height == 0 {
        return Err("size components must be non-zero".to_string());
    }
    Ok((width, height))
}

fn parse_color(value: &str) -> Result<[f32; 4], String> {
    let components: Vec<f32> = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|_| format!("invalid color component '{}'", part.trim()))
        })
        .collect::<Result<_, _>>()?;
    match components.as_slice() {
        [r, g, b] => Ok([*r, *g, *b, 1.0]),
        [r, g, b, a] => Ok([*r, *g, *b, *a]),
        _ => Err(format!("expected R,G,B[,A], got '{value}'")),
    }
}

fn parse_point(value: &str) -> Result<[f32; 2], String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{value}'"))?;
    let x: f32 = x.trim().parse().map_err(|_| format!("invalid x '{x}'"))?;
    let y: f32 = y.trim().parse().map_err(|_| format!("invalid y '{y}'"))?;
    Ok([x, y])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes_and_rejects_zero() {
        assert_eq!(parse_size("400x400"), Ok((400, 400)));
        assert_eq!(parse_size("1280X720"), Ok((1280, 720)));
        assert!(parse_size("400").is_err());
        assert!(parse_size("0x10").is_err());
    }

    #[test]
    fn parses_colors_with_optional_alpha() {
        assert_eq!(parse_color("1,0,0"), Ok([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse_color("0.2, 0.4, 0.6, 0.8"), Ok([0.2, 0.4, 0.6, 0.8]));
        assert!(parse_color("1,0").is_err());
    }

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("200, 150"), Ok([200.0, 150.0]));
        assert!(parse_point("200").is_err());
    }
}
