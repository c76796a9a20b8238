//! Unit tests for cs-vehicle.

use cs_core::{Highway, SimTime, StationId, VehicleId};

use crate::Vehicle;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 20 cells of 2 km, like the reference network.
fn road() -> Highway {
    Highway::new(2_000.0, 20)
}

fn car(velocity: f64, position: f64, station: u32) -> Vehicle {
    Vehicle::new(VehicleId(1), velocity, 120.0, position, StationId(station), SimTime::ZERO)
}

// ── Direction and position ────────────────────────────────────────────────────

#[cfg(test)]
mod position {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn direction_is_velocity_sign() {
        assert_eq!(car(60.0, 0.0, 5).direction(), 1);
        assert_eq!(car(-60.0, 0.0, 5).direction(), -1);
        assert_eq!(car(0.0, 0.0, 5).direction(), 0);
    }

    #[test]
    fn absolute_position_is_closed_form() {
        let hw = road();
        let v = Vehicle::new(VehicleId(0), 25.0, 60.0, 500.0, StationId(3), SimTime(10.0));
        assert_eq!(v.absolute_position(&hw, SimTime(10.0)), 6_500.0);
        assert_eq!(v.absolute_position(&hw, SimTime(14.0)), 6_600.0);
        // Queries before the root time extrapolate backwards.
        assert_eq!(v.absolute_position(&hw, SimTime(6.0)), 6_400.0);
    }

    #[test]
    fn current_station_follows_position() {
        let hw = road();
        let v = car(10.0, 1_900.0, 5);
        assert_eq!(v.current_station(&hw, SimTime(0.0)), StationId(5));
        assert_eq!(v.current_station(&hw, SimTime(10.0)), StationId(6));
        assert_eq!(v.current_station(&hw, SimTime(9.99)), StationId(5));
    }

    #[test]
    fn current_station_clamps_at_road_ends() {
        let hw = road();
        let east = car(10.0, 1_990.0, 19);
        assert_eq!(east.current_station(&hw, SimTime(100.0)), StationId(19));
        let west = car(-10.0, 10.0, 0);
        assert_eq!(west.current_station(&hw, SimTime(100.0)), StationId(0));
    }

    #[test]
    fn queries_are_pure() {
        let hw = road();
        let v = car(33.3, 123.4, 7);
        let t = SimTime(17.25);
        assert_approx_eq!(v.absolute_position(&hw, t), v.absolute_position(&hw, t));
        assert_eq!(v.current_station(&hw, t), v.current_station(&hw, t));
    }
}

// ── Next station ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod next_station {
    use super::*;

    #[test]
    fn next_station_follows_direction() {
        let hw = road();
        assert_eq!(car(60.0, 1_000.0, 5).next_station(&hw, SimTime::ZERO), 6);
        assert_eq!(car(-60.0, 1_000.0, 5).next_station(&hw, SimTime::ZERO), 4);
        assert_eq!(car(0.0, 1_000.0, 5).next_station(&hw, SimTime::ZERO), 5);
    }

    #[test]
    fn next_station_validity_at_edges() {
        let hw = road();
        assert!(car(60.0, 1_000.0, 5).next_station_is_valid(&hw, SimTime::ZERO));
        assert!(!car(60.0, 1_000.0, 19).next_station_is_valid(&hw, SimTime::ZERO));
        assert!(!car(-60.0, 1_000.0, 0).next_station_is_valid(&hw, SimTime::ZERO));
    }
}

// ── Time to next station ──────────────────────────────────────────────────────

#[cfg(test)]
mod time_to_next {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::KinematicsError;

    #[test]
    fn forward_distance_to_eastern_edge() {
        let hw = road();
        let v = car(10.0, 1_000.0, 5);
        assert_approx_eq!(v.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 100.0);
    }

    #[test]
    fn backward_distance_to_western_edge() {
        let hw = road();
        let v = car(-10.0, 1_000.0, 5);
        assert_approx_eq!(v.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 100.0);
        let v = car(-4.0, 400.0, 5);
        assert_approx_eq!(v.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 100.0);
    }

    #[test]
    fn later_query_time_shortens_the_wait() {
        let hw = road();
        let v = car(10.0, 1_000.0, 5);
        assert_approx_eq!(v.time_to_next_station(&hw, SimTime(40.0)).unwrap(), 60.0);
    }

    #[test]
    fn exactly_on_boundary_is_a_full_cell() {
        let hw = road();
        let forward = car(0.5, 0.0, 5);
        assert_eq!(forward.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 4_000.0);
        // Westbound vehicle rooted on the eastern edge of cell 4.
        let backward = car(-0.5, 2_000.0, 4);
        assert_eq!(backward.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 4_000.0);
    }

    #[test]
    fn boundary_reached_by_travel_is_a_full_cell() {
        let hw = road();
        let v = car(10.0, 1_000.0, 5);
        // At t = 100 the vehicle sits on the 5|6 boundary.
        assert_approx_eq!(v.time_to_next_station(&hw, SimTime(100.0)).unwrap(), 200.0);
    }

    #[test]
    fn offset_before_root_cell_counts_from_its_far_edge() {
        let hw = road();
        // 20 m short of cell 6, still counted as in cell 6.
        let east = car(0.5, -20.0, 6);
        assert_approx_eq!(east.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 4_040.0);
        let west = car(-0.5, 2_020.0, 6);
        assert_approx_eq!(west.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 4_040.0);
        assert_eq!(east.current_station(&hw, SimTime::ZERO), StationId(5));
    }

    #[test]
    fn offset_past_root_cell_follows_the_grid() {
        let hw = road();
        let v = car(0.5, 2_500.0, 6);
        assert_approx_eq!(v.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 3_000.0);
        let v = car(-0.5, -500.0, 6);
        assert_approx_eq!(v.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 3_000.0);
    }

    #[test]
    fn off_road_vehicle_still_has_a_crossing_time() {
        let hw = road();
        let v = car(-1.0, -50.0, 0);
        assert_approx_eq!(v.time_to_next_station(&hw, SimTime::ZERO).unwrap(), 1_950.0);
    }

    #[test]
    fn zero_velocity_has_no_crossing() {
        let hw = road();
        let v = car(0.0, 1_000.0, 5);
        assert_eq!(
            v.time_to_next_station(&hw, SimTime::ZERO),
            Err(KinematicsError::InvalidDirection(VehicleId(1)))
        );
    }
}

// ── Call window ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod activity {
    use super::*;

    #[test]
    fn end_time_is_root_plus_duration() {
        let v = Vehicle::new(VehicleId(0), 10.0, 90.0, 0.0, StationId(2), SimTime(30.0));
        assert_eq!(v.end_time(), SimTime(120.0));
        assert_eq!(v.call_start(), SimTime(30.0));
    }

    #[test]
    fn active_window_is_inclusive() {
        let hw = road();
        let v = Vehicle::new(VehicleId(0), 10.0, 90.0, 0.0, StationId(2), SimTime(30.0));
        assert!(!v.is_still_active(&hw, SimTime(29.9)));
        assert!(v.is_still_active(&hw, SimTime(30.0)));
        assert!(v.is_still_active(&hw, SimTime(120.0)));
        assert!(!v.is_still_active(&hw, SimTime(120.1)));
    }

    #[test]
    fn leaving_the_road_ends_activity() {
        let hw = road();
        let v = Vehicle::new(VehicleId(0), 10.0, 600.0, 1_900.0, StationId(19), SimTime::ZERO);
        assert!(v.is_still_active(&hw, SimTime(9.9)));
        assert!(!v.is_on_road(&hw, SimTime(10.0)));
        assert!(!v.is_still_active(&hw, SimTime(10.0)));
    }
}

// ── Re-anchoring ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod reanchor {
    use super::*;

    #[test]
    fn eastbound_roots_at_western_edge() {
        let hw = road();
        let v = Vehicle::new(VehicleId(4), 0.5, 7_200.0, 0.0, StationId(5), SimTime::ZERO);
        let next = v.reanchored(&hw, StationId(6), SimTime(4_000.0));
        assert_eq!(next.root_station(), StationId(6));
        assert_eq!(next.root_position(), 0.0);
        assert_eq!(next.root_time(), SimTime(4_000.0));
        assert_eq!(next.absolute_position(&hw, SimTime(4_000.0)), 12_000.0);
    }

    #[test]
    fn westbound_roots_at_eastern_edge() {
        let hw = road();
        let v = Vehicle::new(VehicleId(4), -1.0, 1_000.0, 10.0, StationId(5), SimTime::ZERO);
        let next = v.reanchored(&hw, StationId(4), SimTime(10.0));
        assert_eq!(next.root_position(), 2_000.0);
        assert_eq!(next.absolute_position(&hw, SimTime(10.0)), 10_000.0);
        assert_eq!(next.current_station(&hw, SimTime(11.0)), StationId(4));
    }

    #[test]
    fn identity_and_call_window_survive() {
        let hw = road();
        let v = Vehicle::new(VehicleId(9), 0.5, 7_200.0, 0.0, StationId(5), SimTime(3.0));
        let next = v.reanchored(&hw, StationId(6), SimTime(4_003.0));
        assert_eq!(next.id(), v.id());
        assert_eq!(next.velocity(), v.velocity());
        assert_eq!(next.end_time(), v.end_time());
        // The receiver is untouched.
        assert_eq!(v.root_station(), StationId(5));
        assert_eq!(v.root_time(), SimTime(3.0));
    }
}
