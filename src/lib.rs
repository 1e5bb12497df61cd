use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;

pub mod core;
pub mod error;
pub mod util;

pub use core::geometry;
pub use core::geometry::{compute_normals, DegeneratePolicy, NormalOptions, TriangleSoup};
pub use core::{
    Axis, Color, FrameSetup, OrbitCamera, RenderConfig, ResourcePaths, ShadingMode, Spin,
    TextureMode, ViewPreset, ViewTransform,
};
pub use error::{ShadeError, ShadeResult};
pub use util::{format_mat3, format_mat4};

/// Window size of the teapot demo when none is given.
pub const DEFAULT_FRAME_SIZE: (u32, u32) = (800, 600);
/// Window size of the color cube demo.
pub const DEFAULT_VIEW_SIZE: (u32, u32) = (512, 512);

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Normals {
        /// `None` means the built-in color cube
        model: Option<PathBuf>,
        shading: ShadingMode,
        degenerate: DegeneratePolicy,
        dump: bool,
    },
    View {
        preset: ViewPreset,
        width: u32,
        height: u32,
        spin: Axis,
        frames: u32,
    },
    Frame {
        model: Option<PathBuf>,
        shading: ShadingMode,
        texture: Option<TextureMode>,
        assets: PathBuf,
        width: u32,
        height: u32,
        degenerate: DegeneratePolicy,
    },
}

fn model_arg() -> Arg {
    Arg::new("model")
        .short('f')
        .long("model")
        .value_name("FILE")
        .help("Path to the .obj model to use. If not supplied, the color cube is used.")
        .value_parser(value_parser!(PathBuf))
        .required(false)
}

fn shading_arg() -> Arg {
    Arg::new("shading")
        .short('s')
        .long("shading")
        .value_name("MODE")
        .help("Shading technique, which decides between flat and smoothed normals")
        .value_parser(["flat", "gouraud", "phong"])
        .default_value("flat")
}

fn allow_degenerate_arg() -> Arg {
    Arg::new("allow-degenerate")
        .long("allow-degenerate")
        .help("Emit zero normals for degenerate geometry instead of failing")
        .action(ArgAction::SetTrue)
}

fn size_args(width: &'static str, height: &'static str) -> [Arg; 2] {
    [
        Arg::new("width")
            .long("width")
            .value_name("PIXELS")
            .value_parser(value_parser!(u32))
            .default_value(width),
        Arg::new("height")
            .long("height")
            .value_name("PIXELS")
            .value_parser(value_parser!(u32))
            .default_value(height),
    ]
}

pub fn create_clap_command() -> Command {
    Command::new("shading_lab")
        .about("Normals, cameras and render setup for the flat/Gouraud/Phong shading demos")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Also write a debug log to this file")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("More terminal logging (repeat for more)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("normals")
                .about("Compute per-vertex normals for a model and summarise them")
                .arg(model_arg())
                .arg(shading_arg())
                .arg(allow_degenerate_arg())
                .arg(
                    Arg::new("dump")
                        .long("dump")
                        .help("Print every position with its normal")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("view")
                .about("Print the color cube's camera matrices for a view preset")
                .arg(
                    Arg::new("preset")
                        .short('p')
                        .long("preset")
                        .value_name("PRESET")
                        .value_parser(["perspective", "ortho", "cavalier"])
                        .default_value("ortho"),
                )
                .args(size_args("512", "512"))
                .arg(
                    Arg::new("spin")
                        .long("spin")
                        .value_name("AXIS")
                        .help("Axis the cube spins about")
                        .value_parser(["x", "y", "z"])
                        .default_value("x"),
                )
                .arg(
                    Arg::new("frames")
                        .long("frames")
                        .value_name("N")
                        .help("Number of idle steps to spin the cube before printing")
                        .value_parser(value_parser!(u32))
                        .default_value("0"),
                ),
        )
        .subcommand(
            Command::new("frame")
                .about("Build the buffers and uniforms for a shading/texture selection")
                .arg(model_arg())
                .arg(shading_arg())
                .arg(
                    Arg::new("texture")
                        .short('t')
                        .long("texture")
                        .value_name("MODE")
                        .value_parser(["decal", "bump", "spherical"]),
                )
                .arg(
                    Arg::new("assets")
                        .long("assets")
                        .value_name("DIR")
                        .help("Directory holding res/ and shaders/")
                        .value_parser(value_parser!(PathBuf))
                        .default_value("."),
                )
                .args(size_args("800", "600"))
                .arg(allow_degenerate_arg()),
        )
}

fn degenerate_policy(matches: &clap::ArgMatches) -> DegeneratePolicy {
    if matches.get_flag("allow-degenerate") {
        DegeneratePolicy::ZeroVector
    } else {
        DegeneratePolicy::Reject
    }
}

fn shading_mode(matches: &clap::ArgMatches) -> ShadeResult<ShadingMode> {
    matches
        .get_one::<String>("shading")
        .map(|s| s.parse())
        .unwrap_or(Ok(ShadingMode::Flat))
}

pub fn handle_clap_matches(matches: &clap::ArgMatches) -> ShadeResult<(LogSettings, Invocation)> {
    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let logging = LogSettings {
        level,
        file: matches.get_one::<PathBuf>("log-file").cloned(),
    };

    let invocation = match matches.subcommand() {
        Some(("normals", sub)) => Invocation::Normals {
            model: sub.get_one::<PathBuf>("model").cloned(),
            shading: shading_mode(sub)?,
            degenerate: degenerate_policy(sub),
            dump: sub.get_flag("dump"),
        },
        Some(("view", sub)) => {
            let preset = match sub.get_one::<String>("preset").map(|s| s.as_str()) {
                Some("perspective") => ViewPreset::Perspective,
                Some("cavalier") => ViewPreset::ObliqueCavalier,
                _ => ViewPreset::OrthographicXY,
            };
            let spin = match sub.get_one::<String>("spin").map(|s| s.as_str()) {
                Some("y") => Axis::Y,
                Some("z") => Axis::Z,
                _ => Axis::X,
            };
            Invocation::View {
                preset,
                width: sub.get_one::<u32>("width").copied().unwrap_or(DEFAULT_VIEW_SIZE.0),
                height: sub.get_one::<u32>("height").copied().unwrap_or(DEFAULT_VIEW_SIZE.1),
                spin,
                frames: sub.get_one::<u32>("frames").copied().unwrap_or(0),
            }
        }
        Some(("frame", sub)) => Invocation::Frame {
            model: sub.get_one::<PathBuf>("model").cloned(),
            shading: shading_mode(sub)?,
            texture: sub
                .get_one::<String>("texture")
                .map(|s| s.parse())
                .transpose()?,
            assets: sub
                .get_one::<PathBuf>("assets")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            width: sub.get_one::<u32>("width").copied().unwrap_or(DEFAULT_FRAME_SIZE.0),
            height: sub.get_one::<u32>("height").copied().unwrap_or(DEFAULT_FRAME_SIZE.1),
            degenerate: degenerate_policy(sub),
        },
        // Default behavior when no subcommand is provided
        _ => Invocation::Normals {
            model: None,
            shading: ShadingMode::Flat,
            degenerate: DegeneratePolicy::Reject,
            dump: false,
        },
    };

    Ok((logging, invocation))
}
