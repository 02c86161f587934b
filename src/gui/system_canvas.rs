use iced::widget::canvas::{self, Cache, Frame, Geometry, Path, Stroke, Text};
use iced::{alignment, mouse, Color, Point, Rectangle, Renderer, Theme};

use crate::sim::{
    body::{Body, BodyColor},
    error::SimulationError,
    system::StellarSystem,
    units::{Float, Vector, METERS_PER_KM},
};

use super::starfield::Starfield;

const TRAIL_WIDTH: f32 = 2.;
const LABEL_SIZE: f32 = 16.;

/// One frame's worth of borrowed state; rebuilt on every `view`.
pub(crate) struct SystemCanvas<'a> {
    pub(crate) system: &'a StellarSystem,
    pub(crate) scale: Float,
    pub(crate) starfield: &'a Starfield,
    pub(crate) background: &'a Cache,
    pub(crate) halted: Option<&'a SimulationError>,
}

fn to_point(screen: Vector) -> Point {
    Point::new(screen[0] as f32, screen[1] as f32)
}

fn to_color(color: BodyColor) -> Color {
    Color::from_rgb8(color.0, color.1, color.2)
}

fn draw_body(frame: &mut Frame, body: &Body, scale: Float, offset: Vector) {
    let color = to_color(body.color);
    let (position, trail) = body.drawable_state(scale, offset);
    let center = to_point(position);

    if trail.clone().next().is_some() {
        let polyline = Path::new(|builder| {
            let mut points = trail.map(to_point);
            if let Some(first) = points.next() {
                builder.move_to(first);
                for point in points {
                    builder.line_to(point);
                }
            }
        });
        frame.stroke(
            &polyline,
            Stroke::default().with_color(color).with_width(TRAIL_WIDTH),
        );
    }

    frame.fill(&Path::circle(center, body.radius as f32), color);

    if !body.is_anchor {
        frame.fill_text(Text {
            content: format!("{:.0}km", body.distance_to_anchor / METERS_PER_KM),
            position: center,
            color: Color::WHITE,
            size: LABEL_SIZE,
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            ..Text::default()
        });
    }
}

impl<'a, Message> canvas::Program<Message> for SystemCanvas<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &(),
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let background = self.background.draw(renderer, bounds.size(), |frame| {
            frame.fill_rectangle(Point::ORIGIN, frame.size(), Color::BLACK);
            self.starfield.draw(frame);
        });

        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let offset = [center.x as Float, center.y as Float];
        for body in self.system.bodies.iter() {
            draw_body(&mut frame, body, self.scale, offset);
        }

        if let Some(error) = self.halted {
            frame.fill_text(Text {
                content: format!("Simulation halted: {}", error),
                position: Point::new(10., 10.),
                color: Color::from_rgb8(220, 20, 60),
                size: LABEL_SIZE,
                ..Text::default()
            });
        }

        vec![background, frame.into_geometry()]
    }
}
