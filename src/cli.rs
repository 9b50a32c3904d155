// Command line: which file to heal and where `s` writes the result.
//
//   healing-brush                          reads blemish.png, saves blemish_fix.png
//   healing-brush -i face.jpg              saves face_fix.jpg next to it
//   healing-brush -i face.jpg -o out.png   saves out.png

use std::path::{Path, PathBuf};

use clap::Parser;
use log::warn;

use crate::brush::{BrushSize, DEFAULT_BRUSH, DEFAULT_MAX_BRUSH};
use crate::clone::CloneParams;

pub const DEFAULT_INPUT: &str = "blemish.png";
pub const DEFAULT_OUTPUT: &str = "blemish_fix.png";

/// Interactive healing brush: click a blemish, then click clean skin to clone from.
#[derive(Parser, Debug)]
#[command(name = "healing-brush", version)]
pub struct Args {
    /// Image to heal (defaults to blemish.png).
    #[arg(short, long, value_name = "INPUT_PATH")]
    pub input: Option<PathBuf>,

    /// Where `s` saves. Defaults to <input stem>_fix<ext> beside the input.
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Starting brush radius in pixels.
    #[arg(long, default_value_t = DEFAULT_BRUSH, value_name = "PX")]
    pub brush: u32,

    /// Largest brush radius reachable from the keys and the wheel.
    #[arg(long, default_value_t = DEFAULT_MAX_BRUSH, value_name = "PX")]
    pub max_brush: u32,

    /// Cap on solver sweeps per clone.
    #[arg(long, default_value_t = CloneParams::default().max_iterations, value_name = "N")]
    pub iterations: usize,
}

/// Everything the driver needs once the arguments are settled.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub brush: BrushSize,
    pub clone: CloneParams,
}

impl Args {
    pub fn into_config(self) -> Config {
        let (input, output) = match (self.input, self.output) {
            (None, output) => (PathBuf::from(DEFAULT_INPUT), output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))),
            (Some(input), Some(output)) => (input, output),
            (Some(input), None) => {
                let output = fixed_path(&input);
                (input, output)
            }
        };

        if self.brush > self.max_brush {
            warn!("brush {} is above the maximum {}, using {}", self.brush, self.max_brush, self.max_brush);
        }

        Config {
            input,
            output,
            brush: BrushSize::new(self.brush, self.max_brush),
            clone: CloneParams { max_iterations: self.iterations, ..CloneParams::default() },
        }
    }
}

/// `dir/name.ext` -> `dir/name_fix.ext`
pub fn fixed_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}_fix.{}", ext.to_string_lossy()),
        None => format!("{stem}_fix"),
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("healing-brush").chain(argv.iter().copied()))
    }

    #[test]
    fn no_arguments_use_the_fixed_names() {
        let cfg = parse(&[]).unwrap().into_config();
        assert_eq!(cfg.input, PathBuf::from("blemish.png"));
        assert_eq!(cfg.output, PathBuf::from("blemish_fix.png"));
        assert_eq!(cfg.brush, BrushSize::new(20, 50));
        assert_eq!(cfg.clone, CloneParams::default());
    }

    #[test]
    fn output_defaults_next_to_input() {
        let cfg = parse(&["-i", "photos/face.jpg"]).unwrap().into_config();
        assert_eq!(cfg.input, PathBuf::from("photos/face.jpg"));
        assert_eq!(cfg.output, PathBuf::from("photos/face_fix.jpg"));
    }

    #[test]
    fn explicit_output_wins() {
        let cfg = parse(&["-i", "a.png", "-o", "b.tif"]).unwrap().into_config();
        assert_eq!(cfg.output, PathBuf::from("b.tif"));
    }

    #[test]
    fn extensionless_input() {
        assert_eq!(fixed_path(Path::new("scan")), PathBuf::from("scan_fix"));
    }

    #[test]
    fn brush_options_are_clamped() {
        let cfg = parse(&["--brush", "70", "--max-brush", "60", "--iterations", "50"]).unwrap().into_config();
        assert_eq!(cfg.brush.get(), 60);
        assert_eq!(cfg.brush.max(), 60);
        assert_eq!(cfg.clone.max_iterations, 50);
    }

    #[test]
    fn malformed_options_are_errors() {
        assert!(parse(&["-x"]).is_err());
        assert!(parse(&["-i"]).is_err());
        assert!(parse(&["--brush", "-4"]).is_err());
        assert_eq!(parse(&["-h"]).unwrap_err().kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
