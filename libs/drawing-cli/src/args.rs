use clap::{Parser, ValueEnum};
use config::{ContourPolicy, ConversionConfig, ExtrusionPolicy};
use std::path::PathBuf;

/// How the drawing is carried along the depth axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Extrusion {
    /// Every slice copies the profile (prismatic solid with through-holes).
    HolePreserving,
    /// Slices fade towards both ends (closed lens-shaped solid).
    Tapered,
}

impl From<Extrusion> for ExtrusionPolicy {
    fn from(value: Extrusion) -> Self {
        match value {
            Extrusion::HolePreserving => ExtrusionPolicy::HolePreserving,
            Extrusion::Tapered => ExtrusionPolicy::Tapered,
        }
    }
}

/// Which traced borders become part of the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Contours {
    /// Main contour plus its holes.
    HoleAware,
    /// Main contour only.
    OuterOnly,
}

impl From<Contours> for ContourPolicy {
    fn from(value: Contours) -> Self {
        match value {
            Contours::HoleAware => ContourPolicy::HoleAware,
            Contours::OuterOnly => ContourPolicy::OuterOnly,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "drawing2mesh", version, about = "Convert technical drawings into STL meshes")]
pub struct Args {
    /// Drawing images to convert.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long, default_value = "meshes")]
    pub output_dir: PathBuf,

    /// JSON configuration; missing fields take their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of extrusion slices.
    #[arg(long)]
    pub depth: Option<usize>,

    #[arg(long, value_enum)]
    pub extrusion: Option<Extrusion>,

    #[arg(long, value_enum)]
    pub contours: Option<Contours>,

    /// Explicit isolevel; defaults to the extrusion policy's level.
    #[arg(long)]
    pub isolevel: Option<f64>,

    /// Pad the volume with empty voxels so the mesh is closed at the border.
    #[arg(long, default_value_t = false)]
    pub pad: bool,

    /// Write ASCII STL instead of binary.
    #[arg(long, default_value_t = false)]
    pub ascii: bool,

    /// Write `<stem>.json` with the conversion report next to each mesh.
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Dump intermediate images into `<dir>/<stem>/`.
    #[arg(long)]
    pub debug_dir: Option<PathBuf>,
}

impl Args {
    /// Applies the command-line overrides on top of `cfg`.
    pub fn apply_overrides(&self, cfg: &mut ConversionConfig) {
        if let Some(depth) = self.depth {
            cfg.extrusion.depth = depth;
        }
        if let Some(extrusion) = self.extrusion {
            cfg.extrusion.policy = extrusion.into();
        }
        if let Some(contours) = self.contours {
            cfg.contour.policy = contours.into();
        }
        if self.isolevel.is_some() {
            cfg.mesher.isolevel = self.isolevel;
        }
        if self.pad {
            cfg.mesher.pad_boundary = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("drawing2mesh").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_leave_config_untouched() {
        let args = parse(&["plate.png"]);
        assert_eq!(args.output_dir, PathBuf::from("meshes"));

        let mut cfg = ConversionConfig::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg, ConversionConfig::default());
    }

    #[test]
    fn overrides_reach_the_config() {
        let args = parse(&[
            "a.png",
            "b.png",
            "--depth",
            "12",
            "--extrusion",
            "tapered",
            "--contours",
            "outer-only",
            "--isolevel",
            "0.4",
            "--pad",
        ]);
        assert_eq!(args.inputs.len(), 2);

        let mut cfg = ConversionConfig::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.extrusion.depth, 12);
        assert_eq!(cfg.extrusion.policy, ExtrusionPolicy::Tapered);
        assert_eq!(cfg.contour.policy, ContourPolicy::OuterOnly);
        assert_eq!(cfg.isolevel(), 0.4);
        assert!(cfg.mesher.pad_boundary);
    }

    #[test]
    fn inputs_are_required() {
        assert!(Args::try_parse_from(["drawing2mesh"]).is_err());
    }
}
