// This is free and unencumbered software released into the public domain.

#[cfg(not(feature = "std"))]
compile_error!("still-capture-replay requires the 'std' feature");

use asimov_module::SysexitsError::{self, *};
use clap::Parser;
use clientele::StandardOptions;
use serde_json::json;
use std::{
    error::Error as StdError,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
        mpsc,
    },
    time::Duration,
};
use still_capture::{
    cli::{self, parse_orientation, parse_rotation},
    shared::{
        CameraError, CameraInfoSource, CaptureConfig, CaptureCoordinator, CaptureResult,
        CaptureSession, Facing, Frame, PreviewSink, Rotation, calculate_capture_rotation,
        drivers::replay::ReplayConfig, open_camera,
    },
};

/// Runs one still capture against a camera that replays a stored JPEG.
#[derive(Debug, Parser)]
struct Options {
    #[clap(flatten)]
    flags: StandardOptions,

    /// Picture to replay, as a path or a `replay:` / `file:` URL.
    #[arg(short, long)]
    input: String,

    /// Write the captured picture here.
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Rotation to set on the camera before the capture, in degrees
    /// [default: calculated from the sensor mount and the orientations]
    #[arg(short, long, value_parser = parse_rotation, allow_hyphen_values = true)]
    rotation: Option<Rotation>,

    #[arg(long, value_enum, default_value = "back")]
    facing: Facing,

    /// Display orientation, in degrees.
    #[arg(long, value_parser = parse_orientation, default_value = "0", allow_hyphen_values = true)]
    display: i32,

    /// Device orientation, in degrees.
    #[arg(long, value_parser = parse_orientation, default_value = "0", allow_hyphen_values = true)]
    device: i32,

    /// Give up on the driver after this many milliseconds (0 waits forever).
    #[arg(long = "timeout", value_name = "MS", default_value = "10000")]
    timeout_ms: u64,

    #[arg(
        value_name = "FORMAT",
        short = 'o',
        long = "output",
        value_enum,
        default_value = "text"
    )]
    output: OutputFormat,
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

    let exit_code = match run_replay(&options) {
        Ok(()) => EX_OK,
        Err(err) => cli::handle_error(&err, &options.flags),
    };

    Ok(exit_code)
}

fn run_replay(opts: &Options) -> Result<(), CameraError> {
    cli::info_user(&opts.flags, &format!("replaying {}", opts.input));

    let replay = ReplayConfig::default();
    let calculated = calculate_capture_rotation(
        replay.camera_info(opts.facing)?,
        opts.display,
        opts.device,
    );
    let rotation = opts.rotation.unwrap_or(calculated);

    let camera = open_camera(&opts.input, replay)?;
    let mut camera = scopeguard::guard(camera, |mut camera| {
        let _ = camera.stop_preview();
    });

    let frames = Arc::new(AtomicU64::new(0));
    let preview: PreviewSink = {
        let frames = Arc::clone(&frames);
        Arc::new(move |_: Frame| {
            frames.fetch_add(1, Ordering::Relaxed);
        })
    };
    camera.set_preview_callback(Some(Arc::clone(&preview)))?;
    camera.start_preview()?;
    // let a few preview frames through before capturing
    std::thread::sleep(Duration::from_millis(100));

    let session = CaptureSession::new(rotation, opts.display, opts.device)
        .with_facing(opts.facing);
    let mut config =
        CaptureConfig::new().with_diagnostics(opts.flags.debug || opts.flags.verbose >= 3);
    config = match opts.timeout_ms {
        0 => config.without_timeout(),
        ms => config.with_timeout(Duration::from_millis(ms)),
    };

    let (tx, rx) = mpsc::channel();
    let sink = move |result: CaptureResult| {
        let _ = tx.send(result);
    };

    let preview_frames = {
        let mut coordinator = CaptureCoordinator::initiate(&mut **camera, session, config, sink)?
            .with_preview_callback(preview);
        coordinator.take()?;
        let before = frames.load(Ordering::Relaxed);
        coordinator.await_result()?;
        before
    };

    let result = rx
        .try_recv()
        .map_err(|_| CameraError::other("capture finished without a result"))?;

    if let Some(path) = &opts.save {
        std::fs::write(path, &result.data)
            .map_err(|e| CameraError::driver("writing captured picture", e))?;
        cli::info_user(&opts.flags, &format!("saved {}", path.display()));
    }

    match opts.output {
        OutputFormat::Text => println!(
            "captured {} bytes, rotation {} (requested {}, calculated {}), facing {}, {} preview frame(s) before capture",
            result.data.len(),
            result.rotation,
            rotation,
            calculated,
            result.facing,
            preview_frames,
        ),
        OutputFormat::Jsonl => println!(
            "{}",
            json!({
                "input": opts.input,
                "bytes": result.data.len(),
                "rotation": result.rotation.degrees(),
                "requested_rotation": rotation.degrees(),
                "calculated_rotation": calculated.degrees(),
                "facing": result.facing.to_string(),
                "preview_frames": preview_frames,
                "saved": opts.save.as_ref().map(|p| p.display().to_string()),
            })
        ),
    }

    Ok(())
}
