// This is free and unencumbered software released into the public domain.

#[cfg(not(feature = "std"))]
compile_error!("still-capture-inspect requires the 'std' feature");

use asimov_module::SysexitsError::{self, *};
use clap::Parser;
use clientele::StandardOptions;
use serde_json::json;
use std::{error::Error as StdError, path::PathBuf};
use still_capture::{
    cli::{self, parse_orientation, parse_rotation},
    shared::{
        CameraError, CameraInfo, ExifOrientationReader, Facing, OrientationReader, Rotation,
        calculate_capture_rotation,
    },
};

/// Prints the display rotation of captured JPEGs, and the capture rotation
/// for a given sensor mount.
#[derive(Debug, Parser)]
struct Options {
    #[clap(flatten)]
    flags: StandardOptions,

    /// JPEG files to inspect.
    #[arg(value_name = "FILE", required_unless_present = "sensor")]
    files: Vec<PathBuf>,

    #[arg(
        value_name = "FORMAT",
        short = 'o',
        long = "output",
        value_enum,
        default_value = "text"
    )]
    output: OutputFormat,

    /// Sensor mount orientation in degrees; prints the capture rotation.
    #[arg(long, value_parser = parse_rotation, allow_hyphen_values = true)]
    sensor: Option<Rotation>,

    #[arg(long, value_enum, default_value = "back")]
    facing: Facing,

    /// Display orientation in degrees.
    #[arg(long, value_parser = parse_orientation, default_value = "0", allow_hyphen_values = true)]
    display: i32,

    /// Device orientation in degrees.
    #[arg(long, value_parser = parse_orientation, default_value = "0", allow_hyphen_values = true)]
    device: i32,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Jsonl,
}

pub fn main() -> Result<SysexitsError, Box<dyn StdError>> {
    asimov_module::dotenv().ok();
    let args = asimov_module::args_os()?;
    let options = Options::parse_from(args);

    if options.flags.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(EX_OK);
    }

    if options.flags.license {
        print!("{}", include_str!("../../UNLICENSE"));
        return Ok(EX_OK);
    }

    #[cfg(feature = "tracing")]
    asimov_module::init_tracing_subscriber(&options.flags).expect("failed to initialize logging");

    let exit_code = match run_inspect(&options) {
        Ok(()) => EX_OK,
        Err(err) => cli::handle_error(&err, &options.flags),
    };

    Ok(exit_code)
}

fn run_inspect(options: &Options) -> Result<(), CameraError> {
    if let Some(sensor) = options.sensor {
        let info = CameraInfo {
            facing: options.facing,
            orientation: sensor,
        };
        let rotation = calculate_capture_rotation(info, options.display, options.device);
        match options.output {
            OutputFormat::Text => println!("capture rotation: {rotation}"),
            OutputFormat::Jsonl => println!(
                "{}",
                json!({
                    "facing": options.facing.to_string(),
                    "sensor": sensor.degrees(),
                    "display": options.display,
                    "device": options.device,
                    "rotation": rotation.degrees(),
                })
            ),
        }
    }

    let reader = ExifOrientationReader;
    let mut unreadable = 0usize;

    for path in &options.files {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                cli::warn_user_with_error(
                    &options.flags,
                    &format!("skipping {}", path.display()),
                    &err,
                );
                unreadable += 1;
                continue;
            },
        };

        let (rotation, error) = match reader.read_orientation(&data) {
            Ok(orientation) => (Rotation::from(orientation), None),
            Err(err) => (Rotation::Deg0, Some(err)),
        };

        match options.output {
            OutputFormat::Text => match &error {
                None => println!("{}: {rotation}", path.display()),
                Some(err) => println!("{}: {rotation} ({err})", path.display()),
            },
            OutputFormat::Jsonl => println!(
                "{}",
                json!({
                    "file": path.display().to_string(),
                    "bytes": data.len(),
                    "rotation": rotation.degrees(),
                    "error": error.map(|e| e.to_string()),
                })
            ),
        }
    }

    if unreadable > 0 && unreadable == options.files.len() {
        return Err(CameraError::other("none of the input files could be read"));
    }

    cli::info_user(
        &options.flags,
        &format!("inspected {} file(s)", options.files.len() - unreadable),
    );
    Ok(())
}
