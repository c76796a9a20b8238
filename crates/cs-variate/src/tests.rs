//! Unit tests for cs-variate.

use crate::{ConstantSource, DistributionSource, VariateConfig, VariateSource};

/// Draw one vehicle's worth of variates in the simulator's order.
fn draw<V: VariateSource>(src: &mut V) -> (f64, f64, i64, f64, u32, f64) {
    (
        src.next_inter_arrival_time(),
        src.next_velocity(),
        src.next_direction(),
        src.next_position(),
        src.next_base_station(),
        src.next_call_duration(),
    )
}

#[cfg(test)]
mod distribution {
    use assert_approx_eq::assert_approx_eq;
    use cs_core::Highway;

    use super::*;
    use crate::VariateError;

    #[test]
    fn same_seed_same_sequence() {
        let cfg = VariateConfig::default();
        let mut a = DistributionSource::new(&cfg, 42).unwrap();
        let mut b = DistributionSource::new(&cfg, 42).unwrap();
        for _ in 0..200 {
            assert_eq!(draw(&mut a), draw(&mut b));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let cfg = VariateConfig::default();
        let mut a = DistributionSource::new(&cfg, 1).unwrap();
        let mut b = DistributionSource::new(&cfg, 2).unwrap();
        let same = (0..50).filter(|_| draw(&mut a) == draw(&mut b)).count();
        assert!(same < 50);
    }

    #[test]
    fn samples_respect_their_ranges() {
        let cfg = VariateConfig::default();
        let mut src = DistributionSource::new(&cfg, 7).unwrap();
        for _ in 0..5_000 {
            let (gap, speed, dir, pos, station, duration) = draw(&mut src);
            assert!(gap >= 0.0);
            assert!(speed.is_finite());
            assert!(dir == 1 || dir == -1, "direction {dir}");
            assert!((0.0..2_000.0).contains(&pos), "position {pos}");
            assert!(station <= 19, "station {station}");
            assert!(duration >= cfg.call_duration_min, "duration {duration}");
        }
    }

    #[test]
    fn sample_means_match_parameters() {
        let cfg = VariateConfig::default();
        let mut src = DistributionSource::new(&cfg, 11).unwrap();
        let n = 50_000;
        let mut gaps = 0.0;
        let mut speeds = 0.0;
        let mut durations = 0.0;
        for _ in 0..n {
            gaps += src.next_inter_arrival_time();
            speeds += src.next_velocity();
            durations += src.next_call_duration();
        }
        let n = n as f64;
        assert_approx_eq!(gaps / n, 1.369, 0.05);
        // 120.072 km/h in m/s.
        assert_approx_eq!(speeds / n, 33.353, 0.2);
        assert_approx_eq!(durations / n, 109.83, 2.5);
    }

    #[test]
    fn both_directions_occur() {
        let mut src = DistributionSource::new(&VariateConfig::default(), 3).unwrap();
        let east = (0..1_000).filter(|_| src.next_direction() == 1).count();
        assert!((350..650).contains(&east), "eastbound {east}/1000");
    }

    #[test]
    fn for_highway_covers_every_cell() {
        let cfg = VariateConfig::for_highway(&Highway::new(500.0, 4));
        assert_eq!(cfg.base_station_max, 3);
        assert_eq!(cfg.position_max, 500.0);
    }

    #[test]
    fn rejects_invalid_parameters() {
        let base = VariateConfig::default();
        let cases = [
            (VariateConfig { inter_arrival_rate: 0.0, ..base.clone() }, "inter_arrival_rate"),
            (VariateConfig { call_duration_rate: -1.0, ..base.clone() }, "call_duration_rate"),
            (VariateConfig { call_duration_min: f64::NAN, ..base.clone() }, "call_duration_min"),
            (VariateConfig { velocity_variance_kmh: -4.0, ..base.clone() }, "velocity"),
            (VariateConfig { base_station_min: 5, base_station_max: 4, ..base.clone() }, "base_station"),
            (VariateConfig { position_min: 10.0, position_max: 10.0, ..base.clone() }, "position"),
        ];
        for (cfg, expected) in cases {
            match DistributionSource::new(&cfg, 0) {
                Err(VariateError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                Ok(_) => panic!("accepted invalid {expected}"),
            }
        }
    }
}

#[cfg(test)]
mod constant {
    use super::*;

    #[test]
    fn returns_configured_values() {
        let mut src = ConstantSource {
            inter_arrival_time: 2.0,
            velocity:           0.5,
            direction:          -1,
            position:           100.0,
            base_station:       3,
            call_duration:      60.0,
        };
        for _ in 0..3 {
            assert_eq!(draw(&mut src), (2.0, 0.5, -1, 100.0, 3, 60.0));
        }
    }

    #[test]
    fn boxed_sources_delegate() {
        let mut src: Box<dyn VariateSource> = Box::new(ConstantSource::default());
        assert_eq!(src.next_base_station(), 5);
        assert_eq!(src.next_direction(), 1);
    }
}
