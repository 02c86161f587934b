use iced::time::{self, Duration};
use iced::widget::canvas::{Cache, Canvas};
use iced::{executor, Application, Command, Element, Length, Subscription, Theme};
use log::error;

use crate::sim::{
    error::SimulationError, initial_parameters::InitialParameters, system::StellarSystem,
};

use self::{starfield::Starfield, system_canvas::SystemCanvas};

pub(crate) mod starfield;
mod system_canvas;

/// Everything built before the window opens.
pub(crate) struct GuiFlags {
    pub(crate) params: InitialParameters,
    pub(crate) system: StellarSystem,
    pub(crate) starfield: Starfield,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Message {
    Tick,
}

pub(crate) struct Gui {
    params: InitialParameters,
    system: StellarSystem,
    starfield: Starfield,
    background: Cache,
    halted: Option<SimulationError>,
}

impl Application for Gui {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = GuiFlags;

    fn new(flags: GuiFlags) -> (Self, Command<Message>) {
        let gui = Gui {
            params: flags.params,
            system: flags.system,
            starfield: flags.starfield,
            background: Cache::new(),
            halted: None,
        };
        (gui, Command::none())
    }

    fn title(&self) -> String {
        String::from("Planet Simulation")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Tick => {
                if self.halted.is_some() {
                    return Command::none();
                }
                if let Err(err) = self.system.advance(self.params.time_step) {
                    let steps = self.system.step_count;
                    let time = self.system.current_time;
                    error!("Stopping after {steps} steps at t = {time:e} s: {err}");
                    self.halted = Some(err);
                }
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<'_, Message> {
        Canvas::new(SystemCanvas {
            system: &self.system,
            scale: self.params.scale(),
            starfield: &self.starfield,
            background: &self.background,
            halted: self.halted.as_ref(),
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.halted.is_some() {
            return Subscription::none();
        }
        let frame_time = Duration::from_secs_f64(1. / self.params.frames_per_second.max(1) as f64);
        time::every(frame_time).map(|_| Message::Tick)
    }
}
