use anyhow::{Context, Result, bail};
use clap::Parser;
use nds::{
    input::{Keys, TouchPosition},
    sim::SimDevice,
};
use orange_shuttle::{Chapter, Demo, DemoConfig, assets::AssetBuffers};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "orange-shuttle")]
#[command(version, about = "Run the orange shuttle demos on a simulated DS", long_about = None)]
struct Cli {
    /// Which demo to run
    #[arg(short, long, value_enum, default_value_t = Chapter::Sounds)]
    chapter: Chapter,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Scripted input, KEYS[@X,Y]:FRAMES (e.g. `up:30`, `left+up:10`, `@120,80:5`).
    /// Steps play in order; no keys are held once the script runs out.
    #[arg(short, long = "input", value_parser = parse_step)]
    input: Vec<InputStep>,

    /// Speed gained per frame of thrust
    #[arg(long)]
    thrust: Option<f32>,

    /// Speed cap in pixels per frame
    #[arg(long)]
    max_speed: Option<f32>,

    /// Heading change per frame of turning, in 1/512ths of a turn
    #[arg(long)]
    turn_step: Option<i32>,

    /// Show the main screen on the top display
    #[arg(long)]
    main_on_top: bool,
}

impl Cli {
    fn config(&self) -> Result<DemoConfig> {
        let mut config = DemoConfig {
            chapter: self.chapter,
            main_on_bottom: !self.main_on_top,
            ..DemoConfig::default()
        };

        if let Some(thrust) = self.thrust {
            config.ship.thrust = thrust;
        }
        if let Some(max_speed) = self.max_speed {
            config.ship.max_speed = max_speed;
        }
        if let Some(turn_step) = self.turn_step {
            config.ship.turn_step = turn_step;
        }

        if !(config.ship.thrust > 0.0) {
            bail!("thrust must be positive, got {}", config.ship.thrust);
        }
        if !(config.ship.max_speed > 0.0) {
            bail!("max speed must be positive, got {}", config.ship.max_speed);
        }
        Ok(config)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct InputStep {
    keys: Keys,
    touch: Option<TouchPosition>,
    frames: u32,
}

fn parse_step(s: &str) -> Result<InputStep> {
    let (head, frames) = s
        .rsplit_once(':')
        .with_context(|| format!("`{s}` is missing `:FRAMES`"))?;
    let frames: u32 = frames
        .parse()
        .with_context(|| format!("bad frame count `{frames}`"))?;

    let (names, touch) = match head.split_once('@') {
        Some((names, at)) => {
            let (x, y) = at
                .split_once(',')
                .with_context(|| format!("touch position `{at}` should be X,Y"))?;
            let x: u16 = x.trim().parse().with_context(|| format!("bad touch x `{x}`"))?;
            let y: u16 = y.trim().parse().with_context(|| format!("bad touch y `{y}`"))?;
            if i32::from(x) >= nds::SCREEN_WIDTH || i32::from(y) >= nds::SCREEN_HEIGHT {
                bail!("touch position {x},{y} is off the screen");
            }
            (names, Some(TouchPosition::new(x, y)))
        }
        None => (head, None),
    };

    let mut keys = Keys::empty();
    for name in names.split('+').map(str::trim).filter(|n| !n.is_empty()) {
        let upper = name.to_ascii_uppercase();
        if upper == "TOUCH" {
            bail!("give a touch position with @X,Y instead of `{name}`");
        }
        keys |= Keys::from_name(&upper).with_context(|| format!("unknown key `{name}`"))?;
    }

    Ok(InputStep { keys, touch, frames })
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .finish()
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    let config = cli.config()?;

    let mut device = SimDevice::new();
    for step in &cli.input {
        device.push_input(step.keys, step.touch, step.frames);
    }

    let mut buffers = Box::new(AssetBuffers::new());
    buffers.generate();
    let assets = buffers.assets();

    let mut demo = Demo::new(device, &config, &assets).context("loading sprites")?;
    for _ in 0..cli.frames {
        demo.frame();
    }

    let dev = &demo.console.device;
    info!(
        frames = demo.console.frame(),
        ship_x = demo.ship.position.x,
        ship_y = demo.ship.position.y,
        heading = demo.ship.heading.units(),
        speed = demo.ship.speed(),
        moon_x = demo.moon.position.x,
        moon_y = demo.moon.position.y,
        sounds = dev.sounds().len(),
        "{} finished",
        config.chapter
    );
    if dev.input_pending() > 0 && config.chapter.is_interactive() {
        warn!("{} scripted frames were never played", dev.input_pending());
    }
    if dev.tearing_writes() > 0 {
        bail!("{} sprite table writes happened outside vblank", dev.tearing_writes());
    }
    Ok(())
}
