use chordwheel::config;
use chordwheel::gui::app::AppModel;
use chordwheel::gui::wheel::WheelState;
use chordwheel::snapshot;
use chordwheel::sys::{assets, runtime};
use clap::Parser;
use detent::RotationMode;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Drag behaviour: discrete, continuous or free
    #[arg(short, long)]
    mode: Option<RotationMode>,

    /// Detent (0-11) the cover starts on
    #[arg(short, long)]
    position: Option<usize>,

    /// Render a single frame to this PNG and exit
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Edge length of the snapshot in pixels
    #[arg(long, default_value_t = 400)]
    size: i32,

    /// Write the default config file (if missing) and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (cache, stylesheet) = assets::prepare();

    if args.write_config {
        let contents = match &cache {
            Some(cache) => cache.fetch(assets::DEFAULT_CONFIG_FILE, assets::bundled)?,
            None => assets::bundled(assets::DEFAULT_CONFIG_FILE)?,
        };
        println!("{}", config::write_default_config(&contents)?.display());
        return Ok(());
    }

    let mut config = config::load_or_default();
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(position) = args.position {
        config.initial_position = position;
    }

    let state = WheelState::new(&config);

    if let Some(path) = args.snapshot {
        snapshot::write_png(&state, args.size, &path)?;
        log::info!("Wrote {}", path.display());
        return Ok(());
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.chordwheel.ChordWheel").with_args(Vec::new());

    app.run::<AppModel>((state, stylesheet, rx));
    Ok(())
}
