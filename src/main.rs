use std::path::PathBuf;

use linecaster::display::{
    BoundsPolicy, DisplayBackend, HeadlessDisplay, PixelBuffer, SdlDisplay, SdlSurface,
    WindowOptions,
};
use linecaster::pipeline::FramePipeline;
use linecaster::scene::Scene;
use linecaster::RasterError;
use log::{error, info};

/// Window size used with `--windowed` or `--headless` when none is given
const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

#[derive(Debug, Default, PartialEq)]
struct Options {
    width: Option<u32>,
    height: Option<u32>,
    windowed: bool,
    no_vsync: bool,
    scene: Option<PathBuf>,
    headless: bool,
    frames: Option<u64>,
    policy: Option<BoundsPolicy>,
    help: bool,
}

impl Options {
    /// Explicit size, `None` means fullscreen at the desktop resolution
    fn window_size(&self) -> Option<(u32, u32)> {
        if self.windowed || self.headless || self.width.is_some() || self.height.is_some() {
            Some((
                self.width.unwrap_or(DEFAULT_WIDTH),
                self.height.unwrap_or(DEFAULT_HEIGHT),
            ))
        } else {
            None
        }
    }

    fn window_options(&self) -> WindowOptions {
        WindowOptions {
            size: self.window_size(),
            vsync: !self.no_vsync,
            ..WindowOptions::default()
        }
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, RasterError> {
    let value = value.ok_or_else(|| RasterError::Usage(format!("{} needs a value", flag)))?;
    value
        .parse()
        .map_err(|_| RasterError::Usage(format!("invalid value for {}: {:?}", flag, value)))
}

/// Parse command line arguments (without the program name)
fn parse_args(args: &[String]) -> Result<Options, RasterError> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--width" | "-w" => options.width = Some(parse_value(arg, iter.next())?),
            "--height" | "-h" => options.height = Some(parse_value(arg, iter.next())?),
            "--resolution" | "-r" => {
                // WxH format (e.g., 1920x1080)
                let value: String = parse_value(arg, iter.next())?;
                let (w, h) = value
                    .split_once('x')
                    .ok_or_else(|| RasterError::Usage(format!("expected WxH, got {:?}", value)))?;
                options.width = Some(parse_value(arg, Some(&w.to_string()))?);
                options.height = Some(parse_value(arg, Some(&h.to_string()))?);
            },
            "--windowed" => options.windowed = true,
            "--no-vsync" => options.no_vsync = true,
            "--scene" => options.scene = Some(parse_value(arg, iter.next())?),
            "--headless" => options.headless = true,
            "--frames" => options.frames = Some(parse_value(arg, iter.next())?),
            "--strict" => options.policy = Some(BoundsPolicy::Strict),
            "--clip" => options.policy = Some(BoundsPolicy::Clip),
            "--help" => options.help = true,
            other => return Err(RasterError::Usage(format!("unknown argument {:?}", other))),
        }
    }

    if options.width == Some(0) || options.height == Some(0) {
        return Err(RasterError::Usage("width and height must be non-zero".to_string()));
    }

    Ok(options)
}

fn print_usage() {
    println!("Usage: linecaster [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --width W, -w W           Window width (default: {})", DEFAULT_WIDTH);
    println!("  --height H, -h H          Window height (default: {})", DEFAULT_HEIGHT);
    println!("  --resolution WxH, -r WxH  Window size (e.g., 1920x1080)");
    println!("  --windowed                Open a window instead of fullscreen desktop");
    println!("  --no-vsync                Disable VSync for uncapped framerate");
    println!("  --scene PATH              Load scene from a JSON file");
    println!("  --headless                Render without opening a window");
    println!("  --frames N                Stop after N frames (headless default: 1)");
    println!("  --strict                  Out-of-bounds pixels are errors");
    println!("  --clip                    Out-of-bounds pixels are dropped");
    println!("  --help                    Show this help message");
    println!();
    println!("Press Escape or close the window to quit. RUST_LOG sets log verbosity.");
}

fn render_on<B: DisplayBackend>(
    pipeline: &FramePipeline,
    backend: &mut B,
    options: &Options,
) -> Result<(), RasterError> {
    let (width, height) = backend.output_size();
    let mut buffer =
        PixelBuffer::with_size(width, height)?.with_policy(options.policy.unwrap_or_default());
    info!(
        "Pixel buffer {}x{}, bounds policy {:?}",
        width,
        height,
        buffer.policy()
    );

    let scene = pipeline.scene();
    info!(
        "Scene: background {}, {} shapes, grid {:?}",
        scene.background,
        scene.shapes.len(),
        scene.grid.map(|g| g.spacing)
    );

    let frames = pipeline.run(backend, &mut buffer, options.frames)?;
    info!("Rendered {} frames", frames);
    Ok(())
}

fn run(args: &[String]) -> Result<(), RasterError> {
    let mut options = parse_args(args)?;
    if options.help {
        print_usage();
        return Ok(());
    }

    let scene = match &options.scene {
        Some(path) => {
            let scene = Scene::load(path)?;
            info!("Scene loaded from {}", path.display());
            scene
        },
        None => Scene::demo(),
    };
    let pipeline = FramePipeline::new(scene);

    if options.headless {
        options.frames.get_or_insert(1);
        let (width, height) = options
            .window_size()
            .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
        let mut display = HeadlessDisplay::new(width, height);
        render_on(&pipeline, &mut display, &options)?;
        info!(
            "Headless: {} uploads, {} flips, {} pixels visible",
            display.uploads(),
            display.flips(),
            display.visible().len()
        );
        return Ok(());
    }

    let window_options = options.window_options();
    info!(
        "Opening {} window, VSync {}",
        match window_options.size {
            Some((w, h)) => format!("{}x{}", w, h),
            None => "fullscreen".to_string(),
        },
        if window_options.vsync { "on" } else { "off" }
    );
    let (display, texture_creator) = SdlDisplay::create_surface(&window_options)?;
    let mut surface = SdlSurface::new(display, &texture_creator)?;
    render_on(&pipeline, &mut surface, &options)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
