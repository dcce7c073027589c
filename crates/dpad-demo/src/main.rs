use clap::Parser;
use dpad_demo::config;
use dpad_demo::gui::app::{AppInit, AppModel};
use dpad_demo::gui::pad::DEFAULT_PAD_SIZE;
use dpad_demo::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file to load and watch (defaults to the user config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Side of the pad in pixels
    #[arg(short = 's', long, default_value_t = DEFAULT_PAD_SIZE)]
    size: i32,

    /// Write the default settings file if none exists, then exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if args.init_config {
        config::write_default_config(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(config_path.clone(), tx);

    let app = RelmApp::new("org.dpad.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config_path,
        size: args.size,
        rx,
    });
    Ok(())
}
