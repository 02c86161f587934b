use iced::widget::canvas::{Frame, Path};
use iced::{Color, Point, Size};
use rand_distr::{Distribution, Normal, NormalError, Uniform};

const STAR_SIZE: f32 = 1.;
const MEAN_BRIGHTNESS: f32 = 0.85;
const BRIGHTNESS_SPREAD: f32 = 0.1;

struct Star {
    // Fractions of the canvas width and height, so the field fills any window size.
    anchor: (f32, f32),
    brightness: f32,
}

impl Star {
    fn position(&self, size: Size) -> Point {
        Point::new(self.anchor.0 * size.width, self.anchor.1 * size.height)
    }
}

pub(crate) struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub(crate) fn new(count: usize) -> Result<Starfield, NormalError> {
        let mut rng = rand::thread_rng();
        let placement = Uniform::new(0., 1.);
        let brightness = Normal::new(MEAN_BRIGHTNESS, BRIGHTNESS_SPREAD)?;
        let stars = (0..count)
            .map(|_| Star {
                anchor: (placement.sample(&mut rng), placement.sample(&mut rng)),
                brightness: brightness.sample(&mut rng).clamp(0.3, 1.),
            })
            .collect();
        Ok(Starfield { stars })
    }

    pub(crate) fn len(&self) -> usize {
        self.stars.len()
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let size = frame.size();
        for star in self.stars.iter() {
            let gray = star.brightness;
            frame.fill(
                &Path::circle(star.position(size), STAR_SIZE),
                Color::from_rgb(gray, gray, gray),
            );
        }
    }
}
