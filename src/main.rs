use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;

use log::{error, info, warn, LevelFilter};
use shading_lab::{
    create_clap_command, format_mat3, format_mat4, handle_clap_matches, Axis, DegeneratePolicy,
    FrameSetup, Invocation, LogSettings, NormalOptions, OrbitCamera, RenderConfig,
    ResourcePaths, ShadeResult, ShadingMode, Spin, TextureMode, TriangleSoup, ViewPreset,
    ViewTransform,
};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

fn main() -> ExitCode {
    let matches = create_clap_command().get_matches();
    let result = handle_clap_matches(&matches).and_then(|(logging, invocation)| {
        init_logging(&logging)?;
        run(invocation)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(settings: &LogSettings) -> ShadeResult<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        settings.level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = &settings.file {
        let log_file = OpenOptions::new().create(true).append(true).open(path)?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), log_file));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}

fn load(model: Option<&Path>) -> ShadeResult<(String, TriangleSoup)> {
    match model {
        Some(path) => Ok((path.display().to_string(), TriangleSoup::from_obj(path)?)),
        None => Ok(("color cube".to_string(), TriangleSoup::color_cube())),
    }
}

fn run(invocation: Invocation) -> ShadeResult<()> {
    match invocation {
        Invocation::Normals {
            model,
            shading,
            degenerate,
            dump,
        } => run_normals(model.as_deref(), shading, degenerate, dump),
        Invocation::View {
            preset,
            width,
            height,
            spin,
            frames,
        } => run_view(preset, width, height, spin, frames),
        Invocation::Frame {
            model,
            shading,
            texture,
            assets,
            width,
            height,
            degenerate,
        } => run_frame(model.as_deref(), shading, texture, &assets, (width, height), degenerate),
    }
}

fn run_normals(
    model: Option<&Path>,
    shading: ShadingMode,
    degenerate: DegeneratePolicy,
    dump: bool,
) -> ShadeResult<()> {
    let (name, soup) = load(model)?;
    let options = NormalOptions {
        smoothed: shading.smoothed_normals(),
        degenerate,
    };
    let (normals, stats) = soup.normals_with_stats(&options)?;

    println!("model:     {name}");
    println!(
        "shading:   {shading} ({})",
        if options.smoothed { "smoothed normals" } else { "flat normals" }
    );
    println!("triangles: {}", stats.triangles);
    println!("vertices:  {}", soup.vertex_count());
    if let Some(unique) = stats.unique_positions {
        println!("unique positions: {unique}");
    }
    println!(
        "degenerate faces: {}, degenerate vertices: {}",
        stats.degenerate_faces, stats.degenerate_vertices
    );

    if dump {
        for (i, (pos, normal)) in soup.positions().iter().zip(&normals).enumerate() {
            println!(
                "{i:6}: [{:9.4},{:9.4},{:9.4}] -> [{:7.4},{:7.4},{:7.4}]",
                pos.x, pos.y, pos.z, normal.x, normal.y, normal.z
            );
        }
    }
    Ok(())
}

fn run_view(
    preset: ViewPreset,
    width: u32,
    height: u32,
    axis: Axis,
    frames: u32,
) -> ShadeResult<()> {
    let mut camera = OrbitCamera::from_preset(preset);
    camera.reshape(width, height)?;

    let mut spin = Spin::new();
    spin.set_axis(axis);
    for _ in 0..frames {
        spin.step();
    }
    info!("spun the cube {} frames about {:?}", frames, axis);

    let cube = TriangleSoup::color_cube();
    let model = spin.model_mat();
    let moved = cube.transformed(&model);

    println!("preset: {}", preset.label());
    let eye = camera.eye();
    println!("eye:    [{:8.3},{:8.3},{:8.3}]", eye.x, eye.y, eye.z);
    println!("{} ({frames} frames): {:?}", axis.motion_label(), spin.angles());
    print!("{}", format_mat4("model", &model));
    print!("{}", format_mat4("model_view", &camera.model_view()));
    print!("{}", format_mat4("projection", &camera.projection_matrix()));
    if let Some(first) = moved.first() {
        println!("first vertex: [{:8.3},{:8.3},{:8.3}]", first.x, first.y, first.z);
    }
    Ok(())
}

fn run_frame(
    model: Option<&Path>,
    shading: ShadingMode,
    texture: Option<TextureMode>,
    assets: &Path,
    (width, height): (u32, u32),
    degenerate: DegeneratePolicy,
) -> ShadeResult<()> {
    let paths = ResourcePaths::under(assets);
    let mut config = RenderConfig::initial(&paths).with_shading(shading, &paths);
    if let Some(texture) = texture {
        config = config.with_texture(texture, &paths);
    }

    let (name, soup) = load(model)?;
    let view = ViewTransform::new(width as f32, height as f32);
    let frame = FrameSetup::build(&config, &soup, &view, degenerate)?;

    println!("model:    {name}");
    println!("vertex shader:   {}", frame.config.shaders.vertex.display());
    println!("fragment shader: {}", frame.config.shaders.fragment.display());
    match &frame.config.texture {
        Some(path) => println!("texture:  {}", path.display()),
        None => println!("texture:  none"),
    }
    println!(
        "buffers:  {} positions, {} normals, {} uvs",
        frame.positions.len(),
        frame.normals.len(),
        frame.uvs.len()
    );
    if frame.uniforms.use_texture && frame.uvs.is_empty() {
        warn!("texturing is on but {name} has no texture coordinates");
    }
    print!("{}", format_mat4("projection", &frame.uniforms.projection));
    print!("{}", format_mat4("view", &frame.uniforms.view));
    print!("{}", format_mat4("model", &frame.uniforms.model));
    print!("{}", format_mat3("normal", &frame.uniforms.normal_matrix));
    Ok(())
}
