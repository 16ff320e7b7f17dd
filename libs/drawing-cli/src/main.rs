//! # drawing2mesh
//!
//! ```text
//! drawing2mesh [OPTIONS] <INPUTS>...
//!
//! for each input:  load ─► Pipeline ─► <output-dir>/<stem>.stl
//!                                    └► <output-dir>/<stem>.json (--report)
//! ```
//!
//! Inputs are independent: a failed or meshless conversion is logged and the
//! batch moves on. The exit status is non-zero only when no input produced a
//! mesh. Log filtering follows `RUST_LOG` (default `info`).

mod args;
mod stl;

use anyhow::{bail, Context, Result};
use args::Args;
use clap::Parser;
use config::ConversionConfig;
use drawing_pipeline::{
    ConversionOutcome, ConvertedMesh, DebugImageWriter, NoopObserver, Pipeline, StageObserver,
};
use log::{error, info, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);
    let pipeline = Pipeline::new(cfg).context("invalid configuration")?;
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("cannot create {}", args.output_dir.display()))?;

    let start = Instant::now();
    let mut meshes = 0usize;
    for input in &args.inputs {
        match convert_one(&pipeline, &args, input) {
            Ok(Some(path)) => {
                meshes += 1;
                info!("{} -> {}", input.display(), path.display());
            }
            Ok(None) => {}
            Err(err) => error!("{}: {err:#}", input.display()),
        }
    }
    info!(
        "{meshes}/{} inputs converted in {:.2}s",
        args.inputs.len(),
        start.elapsed().as_secs_f64()
    );

    if meshes == 0 {
        bail!("no mesh produced");
    }
    Ok(())
}

/// Defaults, or the JSON document at `path` with missing fields defaulted.
fn load_config(path: Option<&Path>) -> Result<ConversionConfig> {
    let Some(path) = path else {
        return Ok(ConversionConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("cannot parse {}", path.display()))
}

/// Converts one input. `Ok(None)` means the drawing yielded no surface.
fn convert_one(pipeline: &Pipeline, args: &Args, input: &Path) -> Result<Option<PathBuf>> {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "drawing".to_string());

    let mut noop = NoopObserver;
    let mut debug_writer = args
        .debug_dir
        .as_ref()
        .map(|dir| DebugImageWriter::new(dir.join(&stem)));
    let observer: &mut dyn StageObserver = match debug_writer.as_mut() {
        Some(writer) => writer,
        None => &mut noop,
    };

    let converted = match pipeline.convert_path(input, observer)? {
        ConversionOutcome::Mesh(converted) => converted,
        ConversionOutcome::NoMesh { reason } => {
            warn!("{}: no mesh produced ({reason})", input.display());
            return Ok(None);
        }
    };

    let stl_path = args.output_dir.join(format!("{stem}.stl"));
    write_mesh(&converted, &stl_path, &stem, args.ascii)?;
    if args.report {
        let report_path = args.output_dir.join(format!("{stem}.json"));
        let file = File::create(&report_path)
            .with_context(|| format!("cannot create {}", report_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &converted.report)
            .map_err(io::Error::from)
            .and_then(|()| writer.flush())
            .with_context(|| format!("cannot write {}", report_path.display()))?;
    }
    Ok(Some(stl_path))
}

fn write_mesh(converted: &ConvertedMesh, path: &Path, name: &str, ascii: bool) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let written = if ascii {
        stl::write_stl_ascii(&converted.mesh, &mut writer, name)
    } else {
        stl::write_stl_binary(&converted.mesh, &mut writer, &format!("drawing2mesh {name}"))
    };
    written
        .and_then(|()| writer.flush())
        .with_context(|| format!("cannot write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_file_fills_defaults() {
        let path = std::env::temp_dir().join(format!("drawing2mesh-{}.json", std::process::id()));
        fs::write(&path, r#"{ "extrusion": { "depth": 7 } }"#).unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(cfg.extrusion.depth, 7);
        assert_eq!(cfg.binarize, ConversionConfig::default().binarize);
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let err = load_config(Some(Path::new("no/such/config.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("no/such/config.json"));
    }
}
