extern crate year_progress as lib;

use chrono::{NaiveDate, Utc};
use flexi_logger::{Duplicate, FileSpec, Logger};
use lib::engine::{Redraw, Trigger, WallpaperEngine};
use lib::events::Dispatcher;
use lib::surface::PngSurface;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "yp",
    about = "Renders a wallpaper showing how much of the year has passed."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(
        short = "d",
        long = "date",
        help = "render this date (YYYY-MM-DD) instead of today",
        parse(try_from_str = lib::calendar::parse_date)
    )]
    pub date: Option<NaiveDate>,

    #[structopt(short = "W", long = "width", help = "surface width in pixels")]
    pub width: Option<u32>,

    #[structopt(short = "H", long = "height", help = "surface height in pixels")]
    pub height: Option<u32>,

    #[structopt(
        short = "o",
        long = "output",
        help = "path of the PNG to write",
        parse(from_os_str)
    )]
    pub output: Option<PathBuf>,

    #[structopt(
        short = "w",
        long = "watch",
        help = "keep running and redraw on every refresh tick"
    )]
    pub watch: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger =
        Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?.duplicate_to_stderr(Duplicate::Warn);

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        eprintln!("yp ran into a fatal error!");
        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(output) = args.output {
        config.output = output;
    }

    let surface = PngSurface::new(&config.output, config.width, config.height);
    let mut engine = WallpaperEngine::new(surface, &config);

    if let Some(date) = args.date {
        report(engine.redraw(date)?);
        return Ok(());
    }

    if !args.watch {
        report(engine.handle(Trigger::SurfaceCreated, Utc::now())?);
        return Ok(());
    }

    let dispatcher = Dispatcher::from_config(&config);
    while let Ok(trigger) = dispatcher.next() {
        match engine.handle(trigger, Utc::now()) {
            Ok(redraw) => report(redraw),
            Err(e) => log::warn!("{}", e),
        }
    }

    Ok(())
}

fn report(redraw: Redraw) {
    match redraw {
        Redraw::Drawn(date) => log::info!("Rendered year progress for {}", date),
        Redraw::Skipped => log::debug!("Surface unavailable, nothing drawn"),
        Redraw::NotRequested => {}
    }
}
