use anyhow::Result;
use gui::{Gui, GuiFlags};
use iced::{window, Application, Settings};
use log::info;

use crate::gui::starfield::Starfield;
use crate::sim::{initial_parameters::InitialParameters, system::StellarSystem};

mod gui;
mod sim;

fn setup_logging() -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .level_for("wgpu_core", log::LevelFilter::Warn)
        .level_for("wgpu_hal", log::LevelFilter::Warn)
        .level_for("naga", log::LevelFilter::Warn)
        .level_for("iced_wgpu", log::LevelFilter::Warn)
        .level_for("iced_winit", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn main() -> Result<()> {
    setup_logging()?;

    let params = InitialParameters::default();
    let system = StellarSystem::new(&params)?;
    let starfield = Starfield::new(params.background_star_count)?;
    let (width, height) = (params.window_width, params.window_height);
    let fps = params.frames_per_second;
    let time_step = params.time_step;
    let stars = starfield.len();
    info!(
        "Opening {}x{} window at {} fps, {} s per step, {} background stars",
        width, height, fps, time_step, stars
    );

    let window_settings = window::Settings {
        size: (width, height),
        ..window::Settings::default()
    };
    Gui::run(Settings {
        window: window_settings,
        antialiasing: true,
        ..Settings::with_flags(GuiFlags {
            params,
            system,
            starfield,
        })
    })?;

    info!("Simulation window closed");
    Ok(())
}
