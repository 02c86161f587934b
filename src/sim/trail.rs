use std::collections::VecDeque;

use super::units::{Float, Vector, DIMENSIONALITY};

/// Fewer points than this do not make a visible line.
pub(crate) const MIN_TRAIL_POINTS: usize = 3;

/// Positions a body has passed through, oldest first.
///
/// The default trail grows for as long as the simulation runs. A capped trail
/// behaves like a ring buffer and drops its oldest point once full; the physics
/// only ever calls [`Trail::record`], so either kind can be used.
#[derive(Clone, Debug, Default)]
pub(crate) struct Trail {
    points: VecDeque<Vector>,
    capacity: Option<usize>,
}

impl Trail {
    pub(crate) fn unbounded() -> Trail {
        Trail {
            points: VecDeque::new(),
            capacity: None,
        }
    }

    pub(crate) fn capped(capacity: usize) -> Trail {
        Trail {
            points: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub(crate) fn record(&mut self, point: Vector) {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while self.points.len() >= capacity {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn points(&self) -> std::collections::vec_deque::Iter<'_, Vector> {
        self.points.iter()
    }
}

pub(crate) fn to_screen(point: &Vector, scale: Float, offset: Vector) -> Vector {
    let mut screen = [0.; DIMENSIONALITY];
    for i in 0..DIMENSIONALITY {
        screen[i] = point[i] * scale + offset[i];
    }
    screen
}

/// Maps every recorded point to screen space as `physical * scale + offset`.
///
/// The returned iterator borrows the history and recomputes each point when
/// advanced, so cloning it restarts the projection. Histories with two points
/// or fewer project to nothing.
pub(crate) fn project<'a, I>(
    history: I,
    scale: Float,
    offset: Vector,
) -> impl Iterator<Item = Vector> + Clone + 'a
where
    I: IntoIterator<Item = &'a Vector> + 'a,
    I::IntoIter: ExactSizeIterator + Clone + 'a,
{
    let points = history.into_iter();
    let count = if points.len() >= MIN_TRAIL_POINTS {
        points.len()
    } else {
        0
    };
    points
        .take(count)
        .map(move |point| to_screen(point, scale, offset))
}
