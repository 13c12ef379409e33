use crate::view::ViewRect;

use super::PointOfInterest;

/// Number of nearby off-screen points in each direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionHints {
    pub above: usize,
    pub below: usize,
    pub left: usize,
    pub right: usize,
}

impl DirectionHints {
    pub fn any(&self) -> bool {
        self.above + self.below + self.left + self.right > 0
    }
}

/// Count points within `reach` pixels (horizontally, from the screen's left
/// edge) that lie off-screen.
///
/// A point straight above or below the screen counts vertically; a point
/// beside the screen counts horizontally.
pub fn direction_hints(view: &ViewRect, points: &[PointOfInterest], reach: f64) -> DirectionHints {
    let mut hints = DirectionHints::default();

    for point in points {
        if (point.x - view.left).abs() >= reach {
            continue;
        }

        if view.shows_column(point.x) {
            if point.y < view.top {
                hints.above += 1;
            } else if point.y > view.bottom() {
                hints.below += 1;
            }
        }

        if point.x < view.left {
            hints.left += 1;
        } else if point.x > view.right() {
            hints.right += 1;
        }
    }

    hints
}
