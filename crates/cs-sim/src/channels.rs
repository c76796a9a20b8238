//! Per-station channel occupancy.

use cs_core::StationId;

use crate::{SimError, SimResult};

/// Occupied-channel counters, one per station.
///
/// New calls may only take a channel while occupancy is below
/// `total - reserved`; handovers may use every channel.
#[derive(Clone, Debug)]
pub struct ChannelTable {
    occupancy:            Vec<u32>,
    total:                u32,
    initiation_threshold: u32,
}

impl ChannelTable {
    pub fn new(station_count: u32, total: u32, reserved_for_handover: u32) -> Self {
        Self {
            occupancy:            vec![0; station_count as usize],
            total,
            initiation_threshold: total.saturating_sub(reserved_for_handover),
        }
    }

    /// `true` if a new call may take a channel at `station`.
    #[inline]
    pub fn can_initiate(&self, station: StationId) -> bool {
        self.occupancy[station.index()] < self.initiation_threshold
    }

    /// `true` if a handed-over call may take a channel at `station`.
    #[inline]
    pub fn can_hand_over(&self, station: StationId) -> bool {
        self.occupancy[station.index()] < self.total
    }

    pub fn acquire(&mut self, station: StationId) -> SimResult<()> {
        if !self.can_hand_over(station) {
            return Err(SimError::ChannelOverflow(station));
        }
        self.occupancy[station.index()] += 1;
        Ok(())
    }

    pub fn release(&mut self, station: StationId) -> SimResult<()> {
        let slot = &mut self.occupancy[station.index()];
        *slot = slot.checked_sub(1).ok_or(SimError::ChannelUnderflow(station))?;
        Ok(())
    }

    /// Occupied channels at `station`.
    ///
    /// # Panics
    /// Panics if `station` is not on the highway.
    #[inline]
    pub fn occupancy(&self, station: StationId) -> u32 {
        self.occupancy[station.index()]
    }

    /// Occupancy of every station, west to east.
    pub fn as_slice(&self) -> &[u32] {
        &self.occupancy
    }

    /// Channels in use across the whole highway.
    pub fn total_in_use(&self) -> u32 {
        self.occupancy.iter().sum()
    }

    pub fn capacity(&self) -> u32 {
        self.total
    }
}
