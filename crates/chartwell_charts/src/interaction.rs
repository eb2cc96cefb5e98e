//! Pointer hover and click handling for line charts.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::line_chart::LineChart;
use crate::series::{Series, SeriesId};

/// A data point found under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointHit {
    pub series: SeriesId,
    /// Index of the point within its series.
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Click notification: the point that was clicked.
pub type PointSelection = PointHit;

/// Listener for point clicks; receives the owning series and the point.
pub type PointClickListener = Box<dyn FnMut(&Series, &PointSelection) + Send>;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum HoverState {
    #[default]
    Idle,
    /// Points under the pointer, in hit-test order.
    Hovered(Vec<PointHit>),
}

impl HoverState {
    pub fn from_hits(hits: Vec<PointHit>) -> Self {
        if hits.is_empty() {
            HoverState::Idle
        } else {
            HoverState::Hovered(hits)
        }
    }

    pub fn hits(&self) -> &[PointHit] {
        match self {
            HoverState::Idle => &[],
            HoverState::Hovered(hits) => hits,
        }
    }
}

fn group_by_series(hits: &[PointHit]) -> FxHashMap<SeriesId, FxHashSet<usize>> {
    let mut map: FxHashMap<SeriesId, FxHashSet<usize>> = FxHashMap::default();
    for hit in hits {
        map.entry(hit.series).or_default().insert(hit.index);
    }
    map
}

impl LineChart {
    /// Update highlighted points for the pointer at `(x, y)`.
    ///
    /// Uses the hit regions of the last draw. Returns `true` (and requests a
    /// redraw) only when some series' highlighted set changed.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        let hits: Vec<PointHit> = self.hit_tester().query(x, y).into_iter().copied().collect();
        let mut by_series = group_by_series(&hits);

        let mut changed = false;
        for series in self.series_store_mut().iter_mut() {
            let set = by_series.remove(&series.id()).unwrap_or_default();
            changed |= series.set_highlighted(set);
        }
        self.set_hover_state(HoverState::from_hits(hits));

        if changed {
            tracing::trace!(x, y, "highlighted points changed");
            self.request_redraw();
        }
        changed
    }

    /// Points under `(x, y)`; each one is also delivered to every listener
    /// registered with [`connect_point_clicked`](Self::connect_point_clicked).
    pub fn on_button_press(&mut self, x: f32, y: f32) -> Vec<PointSelection> {
        let hits: Vec<PointSelection> =
            self.hit_tester().query(x, y).into_iter().copied().collect();
        if hits.is_empty() {
            return hits;
        }
        let (store, listeners) = self.store_and_listeners();
        for hit in &hits {
            if let Some(series) = store.get(hit.series) {
                for listener in listeners.iter_mut() {
                    listener(series, hit);
                }
            }
        }
        tracing::debug!(x, y, points = hits.len(), "point clicked");
        hits
    }

    pub fn connect_point_clicked<F>(&mut self, listener: F)
    where
        F: FnMut(&Series, &PointSelection) + Send + 'static,
    {
        self.listeners_mut().push(Box::new(listener));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_state_follows_hits() {
        assert_eq!(HoverState::from_hits(Vec::new()), HoverState::Idle);
        let hit = PointHit {
            series: Series::from_points("s", &[]).id(),
            index: 0,
            x: 0.0,
            y: 0.0,
        };
        let state = HoverState::from_hits(vec![hit]);
        assert_eq!(state.hits(), &[hit]);
    }

    #[test]
    fn hits_are_grouped_per_series() {
        let a = Series::from_points("a", &[]).id();
        let b = Series::from_points("b", &[]).id();
        let hit = |series, index| PointHit {
            series,
            index,
            x: 0.0,
            y: 0.0,
        };
        let map = group_by_series(&[hit(a, 1), hit(b, 0), hit(a, 3)]);
        assert_eq!(map[&a].len(), 2);
        assert!(map[&b].contains(&0));
    }
}
