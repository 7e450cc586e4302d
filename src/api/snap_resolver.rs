use smallvec::SmallVec;
use tracing::trace;

use crate::core::PricePoint;
use crate::render::Renderer;

use super::{ChartEngine, InvalidationTopic};

/// Resolves the sample nearest to `time` in a date-sorted series.
///
/// Binary search yields the insertion index `i` of `time`; the candidates are
/// `i - 1` and `i`, and both must exist, so times before the first sample or
/// after the last one resolve to `None`. The left candidate wins only when it
/// is strictly closer: exact ties go right.
#[must_use]
pub fn nearest_point_index(points: &[PricePoint], time: f64) -> Option<usize> {
    let index = points.partition_point(|point| point.time() < time);
    if index == 0 || index >= points.len() {
        return None;
    }

    let candidates: SmallVec<[(usize, f64); 2]> = [index - 1, index]
        .into_iter()
        .map(|i| (i, (points[i].time() - time).abs()))
        .collect();
    let (left, right) = (candidates[0], candidates[1]);
    if left.1 < right.1 {
        Some(left.0)
    } else {
        Some(right.0)
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Tracks the pointer in container coordinates.
    ///
    /// Returns `true` when the hover selection was updated. Positions outside
    /// the plot area, or whose inverted date has no neighbour on both sides,
    /// leave the previous guideline and tooltip untouched.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.hit_region().contains(x, y) {
            return false;
        }
        self.interaction.on_pointer_move(x, y);
        let Some(time_scale) = self.time_scale else {
            return false;
        };
        if self.price_scale.is_none() {
            return false;
        }

        let plot_x = x - self.config.margins.left;
        let time = time_scale.pixel_to_time(plot_x);
        let Some(index) = nearest_point_index(&self.points, time) else {
            return false;
        };

        let previous = self.interaction.hover();
        self.interaction.select(index);
        if previous != self.interaction.hover() {
            self.invalidation.insert(InvalidationTopic::Cursor);
        }
        trace!(plot_x, index, date = %self.points[index].date, "hover selection");
        true
    }

    /// Hides guideline and tooltip.
    pub fn pointer_leave(&mut self) {
        if self.interaction.hover().visible {
            self.invalidation.insert(InvalidationTopic::Cursor);
        }
        self.interaction.on_pointer_leave();
    }

    /// Sample under the guideline, when it is shown.
    #[must_use]
    pub fn hovered_point(&self) -> Option<&PricePoint> {
        let hover = self.interaction.hover();
        if !hover.visible {
            return None;
        }
        hover.point_index.and_then(|index| self.points.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::nearest_point_index;
    use crate::core::PricePoint;
    use chrono::NaiveDate;

    fn series() -> Vec<PricePoint> {
        (1..=3)
            .map(|d| {
                PricePoint::new(
                    NaiveDate::from_ymd_opt(2024, 1, d).expect("date"),
                    100.0 + f64::from(d),
                    1_000,
                )
            })
            .collect()
    }

    #[test]
    fn outside_extent_resolves_to_none() {
        let points = series();
        let first = points[0].time();
        let last = points[2].time();
        assert_eq!(nearest_point_index(&points, first - 1.0), None);
        assert_eq!(nearest_point_index(&points, last + 1.0), None);
        assert_eq!(nearest_point_index(&[], first), None);
    }

    #[test]
    fn exact_first_date_has_no_left_neighbour() {
        let points = series();
        assert_eq!(nearest_point_index(&points, points[0].time()), None);
    }

    #[test]
    fn midpoint_tie_goes_right() {
        let points = series();
        let mid = (points[0].time() + points[1].time()) / 2.0;
        assert_eq!(nearest_point_index(&points, mid), Some(1));
        assert_eq!(nearest_point_index(&points, mid - 1.0), Some(0));
    }
}
