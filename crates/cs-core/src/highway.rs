//! Geometry of the linear highway.
//!
//! The road is `station_count` contiguous cells of equal length laid end to
//! end.  Cell `s` covers absolute positions `[s * d, (s + 1) * d)` where `d`
//! is the cell diameter.  The road has hard edges: there is no wraparound,
//! and positions outside `[0, road_length)` belong to no cell.

use crate::StationId;

/// Cell diameter of the reference network, in metres.
pub const DEFAULT_CELL_DIAMETER_M: f64 = 2_000.0;

/// Station count of the reference network (20 × 2 km = 40 km of road).
pub const DEFAULT_STATION_COUNT: u32 = 20;

/// Cell layout of the road.  Cheap to copy; holds no heap data.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Highway {
    /// Length of one cell, in metres.
    pub cell_diameter: f64,
    /// Number of base stations (and cells).
    pub station_count: u32,
}

impl Default for Highway {
    fn default() -> Self {
        Self {
            cell_diameter: DEFAULT_CELL_DIAMETER_M,
            station_count: DEFAULT_STATION_COUNT,
        }
    }
}

impl Highway {
    pub fn new(cell_diameter: f64, station_count: u32) -> Self {
        Self { cell_diameter, station_count }
    }

    /// Total length of the covered road, in metres.
    #[inline]
    pub fn road_length(&self) -> f64 {
        self.cell_diameter * self.station_count as f64
    }

    /// `true` if `position` lies on the covered road.
    #[inline]
    pub fn contains(&self, position: f64) -> bool {
        (0.0..self.road_length()).contains(&position)
    }

    /// Raw (unclamped) cell index of an absolute position.  Negative or
    /// `>= station_count` off the road.
    #[inline]
    pub fn cell_index(&self, position: f64) -> i64 {
        (position / self.cell_diameter).floor() as i64
    }

    /// Station covering `position`, clamped to the first/last station off
    /// either end of the road.
    pub fn station_at(&self, position: f64) -> StationId {
        let last = self.station_count.saturating_sub(1) as i64;
        StationId(self.cell_index(position).clamp(0, last) as u32)
    }

    /// `Some(station)` if `index` names a real station.
    pub fn station(&self, index: i64) -> Option<StationId> {
        (0..self.station_count as i64)
            .contains(&index)
            .then_some(StationId(index as u32))
    }

    /// Absolute position of the western edge of `station`'s cell.
    #[inline]
    pub fn cell_start(&self, station: StationId) -> f64 {
        station.0 as f64 * self.cell_diameter
    }

    /// Iterator over every station id, west to east.
    pub fn stations(&self) -> impl Iterator<Item = StationId> {
        (0..self.station_count).map(StationId)
    }
}
