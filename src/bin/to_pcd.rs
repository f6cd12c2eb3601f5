use anyhow::{Context, Result};
use clap::Parser;
use cloudio::{CloudFormat, PointCloudIo};
use kdam::tqdm;
use log::{info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Converts .bin, .pcd and .ply point clouds to ascii .pcd files
///
/// Only x, y and z are kept. Each input is written to
/// `<output_dir>/<file stem>.pcd`.
#[derive(Parser)]
struct Args {
    #[clap(short, long)]
    output_dir: PathBuf,

    /// Drop points with a NaN or infinite coordinate before writing
    #[clap(long)]
    drop_non_finite: bool,

    /// Files or directories (not searched recursively)
    files: Vec<OsString>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args: Args = Args::parse();

    let files = find_supported_files(&args.files)?;
    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let io = PointCloudIo::new();
    let mut converted = 0;
    for file in tqdm!(files.into_iter()) {
        match convert(&io, &file, &args) {
            Ok(()) => converted += 1,
            Err(e) => warn!("Failed to convert {}: {e:#}", file.display()),
        }
    }
    info!("converted {converted} file(s)");
    Ok(())
}

fn convert(io: &PointCloudIo, file: &Path, args: &Args) -> Result<()> {
    let mut point_cloud = io.read(file)?;
    if point_cloud.is_truncated() {
        warn!(
            "{} holds {} of {} declared points",
            file.display(),
            point_cloud.number_of_points,
            point_cloud.declared_points.unwrap_or_default()
        );
    }
    if args.drop_non_finite {
        point_cloud = point_cloud.remove_non_finite();
    }

    let stem = file
        .file_stem()
        .with_context(|| format!("{} has no file name", file.display()))?;
    let mut name = stem.to_os_string();
    name.push(".pcd");
    let output = args.output_dir.join(name);
    io.write_pcd(&point_cloud.points, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "{} -> {} ({} points)",
        file.display(),
        output.display(),
        point_cloud.number_of_points
    );
    Ok(())
}

/// Expands directories one level deep and keeps files with a readable
/// extension.
fn find_supported_files(inputs: &[OsString]) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            for entry in path
                .read_dir()
                .with_context(|| format!("Failed to read directory {}", path.display()))?
            {
                let entry = entry?.path();
                // We do not recursively search
                if entry.is_file() && CloudFormat::from_path(&entry).is_ok() {
                    files.push(entry);
                }
            }
        } else {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
