//! Minimum-cost fuel stop selection under a range limit.
//!
//! Given stations projected onto the route axis, decide where to stop and
//! how much to buy so the vehicle never runs dry and total spend is
//! minimal. The destination acts as a virtual zero-price final node.
//!
//! The implementation is the classic greedy that is cost-equivalent to the
//! dynamic-programming optimum for this problem class: the tank is a
//! price-ordered sequence of *planned* fuel slices. Arriving at a station,
//! any planned slice costlier than the local price is discarded (it was
//! never actually bought) and the tank is topped up on paper at the local
//! price. Driving consumes the cheapest slices first, and only consumed
//! fuel is ever paid for — leftover planned fuel at the destination costs
//! nothing.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::domain::{PlanError, VehicleProfile};

use super::plan::{FuelStop, StopPlan};
use super::projector::ProjectedStation;

/// Slack for floating-point distance comparisons (miles).
const EPS: f64 = 1e-9;

/// A planned purchase sitting in the tank, measured in miles of range.
struct FuelSlice {
    price: Decimal,
    /// Index into the projected sequence; `None` for the free tank of
    /// fuel the vehicle starts with.
    station: Option<usize>,
    miles: f64,
}

/// Compute the cheapest feasible stop plan.
///
/// `projected` must be ordered by ascending distance (the projector's
/// output); the vehicle starts at mile 0 with a full tank and must reach
/// `total_route_miles`.
///
/// # Errors
///
/// - `PlanError::InvalidInput` for non-positive totals, invalid vehicle
///   profiles, or out-of-order/out-of-range projections.
/// - `PlanError::Infeasible` when some gap between consecutive fuel
///   events exceeds the vehicle's range, carrying the offending segment.
pub fn optimize(
    projected: &[ProjectedStation],
    total_route_miles: f64,
    profile: &VehicleProfile,
) -> Result<StopPlan, PlanError> {
    profile.validate()?;
    validate_projection(projected, total_route_miles)?;

    let max_range = profile.max_range_miles();
    check_gaps(projected, total_route_miles, max_range)?;

    // After the gap check every consecutive hop fits in a full tank, so
    // the simulation below cannot strand the vehicle.
    let mut tank: VecDeque<FuelSlice> = VecDeque::new();
    tank.push_back(FuelSlice {
        price: Decimal::ZERO,
        station: None,
        miles: max_range,
    });

    let mut bought_miles = vec![0.0; projected.len()];
    let mut position = 0.0;

    for node in 0..=projected.len() {
        let target = projected
            .get(node)
            .map_or(total_route_miles, |p| p.distance_miles);

        // Drive to the next node, consuming cheapest planned fuel first.
        let mut need = (target - position).max(0.0);
        while need > EPS {
            let Some(front) = tank.front_mut() else { break };
            let take = need.min(front.miles);
            front.miles -= take;
            need -= take;
            if let Some(idx) = front.station {
                bought_miles[idx] += take;
            }
            if front.miles <= EPS {
                tank.pop_front();
            }
        }
        position = target;

        if let Some(p) = projected.get(node) {
            let price = p.station.price_per_gallon;

            // Planned fuel costlier than this station would never be
            // bought by an optimal plan: replace it. Strict comparison
            // keeps the earlier station on price ties.
            while tank.back().is_some_and(|slice| slice.price > price) {
                tank.pop_back();
            }

            let in_tank: f64 = tank.iter().map(|s| s.miles).sum();
            let room = max_range - in_tank;
            if room > EPS {
                tank.push_back(FuelSlice {
                    price,
                    station: Some(node),
                    miles: room,
                });
            }
        }
    }

    build_plan(projected, &bought_miles, profile)
}

fn validate_projection(
    projected: &[ProjectedStation],
    total_route_miles: f64,
) -> Result<(), PlanError> {
    if !total_route_miles.is_finite() || total_route_miles <= 0.0 {
        return Err(PlanError::InvalidInput(
            "total route distance must be positive".to_string(),
        ));
    }

    let mut prev = 0.0;
    for p in projected {
        let d = p.distance_miles;
        if !d.is_finite() || d < -EPS || d > total_route_miles + EPS {
            return Err(PlanError::InvalidInput(format!(
                "station {} projects outside the route (mile {d:.1})",
                p.station.id
            )));
        }
        if d + EPS < prev {
            return Err(PlanError::InvalidInput(
                "projected stations must be ordered by distance".to_string(),
            ));
        }
        if p.station.price_per_gallon <= Decimal::ZERO {
            return Err(PlanError::InvalidInput(format!(
                "station {} has a non-positive fuel price",
                p.station.id
            )));
        }
        prev = d;
    }
    Ok(())
}

/// Reject early when any consecutive gap exceeds the range, considering
/// all candidates plus origin and destination.
fn check_gaps(
    projected: &[ProjectedStation],
    total_route_miles: f64,
    max_range: f64,
) -> Result<(), PlanError> {
    let mut last = 0.0;
    for p in projected {
        if p.distance_miles - last > max_range + EPS {
            return Err(PlanError::Infeasible {
                gap_start: last,
                gap_end: p.distance_miles,
                max_range,
            });
        }
        last = p.distance_miles;
    }
    if total_route_miles - last > max_range + EPS {
        return Err(PlanError::Infeasible {
            gap_start: last,
            gap_end: total_route_miles,
            max_range,
        });
    }
    Ok(())
}

fn build_plan(
    projected: &[ProjectedStation],
    bought_miles: &[f64],
    profile: &VehicleProfile,
) -> Result<StopPlan, PlanError> {
    let mut stops = Vec::new();
    let mut total = Decimal::ZERO;

    for (idx, &miles) in bought_miles.iter().enumerate() {
        if miles <= EPS {
            continue;
        }
        let gallons = miles / profile.mpg;
        let gallons_dec = Decimal::from_f64(gallons).ok_or_else(|| {
            PlanError::InvalidInput("purchase amount is not representable".to_string())
        })?;
        let cost = gallons_dec * projected[idx].station.price_per_gallon;
        total += cost;
        stops.push(FuelStop {
            station: projected[idx].station.clone(),
            distance_miles: projected[idx].distance_miles,
            gallons,
            cost,
        });
    }

    // Cents rounding happens once, on the total.
    Ok(StopPlan {
        stops,
        total_cost: total.round_dp(2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, Station, StationId};
    use std::sync::Arc;

    fn projected(id: u32, miles: f64, price: &str) -> ProjectedStation {
        ProjectedStation {
            station: Arc::new(Station {
                id: StationId(id),
                name: format!("Station {id}"),
                address: String::new(),
                city: String::new(),
                state: "OK".to_string(),
                rack_id: id,
                price_per_gallon: price.parse().unwrap(),
                position: Coord::new(35.0, -97.0).unwrap(),
            }),
            distance_miles: miles,
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    /// 400-mile range at 10 mpg.
    fn profile() -> VehicleProfile {
        VehicleProfile::new(40.0, 10.0).unwrap()
    }

    #[test]
    fn no_stations_short_route() {
        let plan = optimize(&[], 300.0, &profile()).unwrap();
        assert!(plan.stops.is_empty());
        assert_eq!(plan.total_cost, Decimal::ZERO);
    }

    #[test]
    fn no_stations_long_route_is_infeasible() {
        let err = optimize(&[], 500.0, &profile()).unwrap_err();
        assert_eq!(
            err,
            PlanError::Infeasible {
                gap_start: 0.0,
                gap_end: 500.0,
                max_range: 400.0
            }
        );
    }

    #[test]
    fn leading_gap_too_wide_is_reported() {
        // Tank range 250 but the first station sits at mile 300.
        let stations = [projected(1, 300.0, "2.50")];
        let tight = VehicleProfile::new(25.0, 10.0).unwrap();
        let err = optimize(&stations, 1000.0, &tight).unwrap_err();
        assert_eq!(
            err,
            PlanError::Infeasible {
                gap_start: 0.0,
                gap_end: 300.0,
                max_range: 250.0
            }
        );
    }

    #[test]
    fn single_station_buys_exactly_whats_needed() {
        // 600-mile route, station at 300: free tank covers the first 400,
        // so 200 miles (20 gallons) are bought at mile 300.
        let stations = [projected(1, 300.0, "3.00")];
        let plan = optimize(&stations, 600.0, &profile()).unwrap();

        assert_eq!(plan.stops.len(), 1);
        assert!((plan.stops[0].gallons - 20.0).abs() < 1e-9);
        assert_eq!(plan.total_cost, dec("60.00"));
    }

    #[test]
    fn worked_scenario_from_the_brief() {
        // 1000-mile route; stations at 0 ($3.00), 300 ($2.50), 600
        // ($4.00), 900 ($2.00); 400-mile tank, starting full.
        //
        // Optimal: skip mile 0 (the free tank already covers 400), fill
        // at 300 (cheap), buy the minimum at 600 to bridge to 900, and
        // finish on $2.00 fuel.
        let stations = [
            projected(1, 0.0, "3.00"),
            projected(2, 300.0, "2.50"),
            projected(3, 600.0, "4.00"),
            projected(4, 900.0, "2.00"),
        ];
        let plan = optimize(&stations, 1000.0, &profile()).unwrap();

        let summary: Vec<(u32, f64)> = plan
            .stops
            .iter()
            .map(|s| (s.station.id.0, s.gallons))
            .collect();
        assert_eq!(summary, vec![(2, 30.0), (3, 20.0), (4, 10.0)]);

        // 30 * 2.50 + 20 * 4.00 + 10 * 2.00
        assert_eq!(plan.total_cost, dec("175.00"));
    }

    #[test]
    fn skips_expensive_station_when_cheaper_is_reachable() {
        // From mile 300 the vehicle can reach mile 650 directly, so the
        // $4.00 station at 500 is never used.
        let stations = [
            projected(1, 300.0, "2.50"),
            projected(2, 500.0, "4.00"),
            projected(3, 650.0, "2.00"),
        ];
        let plan = optimize(&stations, 900.0, &profile()).unwrap();

        let ids: Vec<u32> = plan.stops.iter().map(|s| s.station.id.0).collect();
        assert_eq!(ids, vec![1, 3]);

        // Buy 250 miles (25 gal) at 300 to arrive at 650 empty, then 250
        // miles (25 gal) at 650 to finish.
        assert!((plan.stops[0].gallons - 25.0).abs() < 1e-9);
        assert!((plan.stops[1].gallons - 25.0).abs() < 1e-9);
        assert_eq!(plan.total_cost, dec("112.50"));
    }

    #[test]
    fn unused_stations_are_omitted_from_the_plan() {
        let stations = [
            projected(1, 100.0, "9.99"),
            projected(2, 200.0, "2.00"),
        ];
        let plan = optimize(&stations, 500.0, &profile()).unwrap();
        let ids: Vec<u32> = plan.stops.iter().map(|s| s.station.id.0).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn price_tie_prefers_earlier_station() {
        let stations = [
            projected(1, 100.0, "3.00"),
            projected(2, 200.0, "3.00"),
        ];
        let plan = optimize(&stations, 500.0, &profile()).unwrap();
        // 100 miles must be bought; at equal prices the earlier station
        // supplies all of it.
        assert_eq!(plan.stops.len(), 1);
        assert_eq!(plan.stops[0].station.id, StationId(1));
        assert!((plan.stops[0].gallons - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            optimize(&[], 0.0, &profile()),
            Err(PlanError::InvalidInput(_))
        ));
        assert!(matches!(
            optimize(&[], -5.0, &profile()),
            Err(PlanError::InvalidInput(_))
        ));

        let out_of_order = [projected(1, 200.0, "3.00"), projected(2, 100.0, "3.00")];
        assert!(matches!(
            optimize(&out_of_order, 500.0, &profile()),
            Err(PlanError::InvalidInput(_))
        ));

        let outside = [projected(1, 800.0, "3.00")];
        assert!(matches!(
            optimize(&outside, 500.0, &profile()),
            Err(PlanError::InvalidInput(_))
        ));

        let free_fuel = [projected(1, 100.0, "0.00")];
        assert!(matches!(
            optimize(&free_fuel, 500.0, &profile()),
            Err(PlanError::InvalidInput(_))
        ));
    }

    #[test]
    fn determinism_exact_replay() {
        let stations = [
            projected(1, 150.0, "3.10"),
            projected(2, 350.0, "2.80"),
            projected(3, 550.0, "3.40"),
            projected(4, 700.0, "2.60"),
        ];
        let a = optimize(&stations, 900.0, &profile()).unwrap();
        let b = optimize(&stations, 900.0, &profile()).unwrap();

        assert_eq!(a.total_cost, b.total_cost);
        let ids_a: Vec<u32> = a.stops.iter().map(|s| s.station.id.0).collect();
        let ids_b: Vec<u32> = b.stops.iter().map(|s| s.station.id.0).collect();
        assert_eq!(ids_a, ids_b);
        for (sa, sb) in a.stops.iter().zip(b.stops.iter()) {
            assert_eq!(sa.gallons, sb.gallons);
            assert_eq!(sa.cost, sb.cost);
        }
    }

    /// Exhaustive search over purchase decisions for small instances.
    ///
    /// At each station the only purchase amounts worth considering are
    /// "just enough to arrive empty at some later node" and "fill the
    /// tank"; an optimal plan always uses one of these.
    fn brute_force_cost(
        stations: &[ProjectedStation],
        total: f64,
        profile: &VehicleProfile,
    ) -> Option<Decimal> {
        let max_range = profile.max_range_miles();

        fn search(
            idx: usize,
            fuel: f64,
            stations: &[ProjectedStation],
            total: f64,
            max_range: f64,
            mpg: f64,
        ) -> Option<Decimal> {
            if idx == stations.len() {
                return Some(Decimal::ZERO);
            }
            let here = stations[idx].distance_miles;
            let price = stations[idx].station.price_per_gallon;

            let mut amounts: Vec<f64> = vec![0.0, max_range - fuel];
            for later in stations[idx + 1..]
                .iter()
                .map(|p| p.distance_miles)
                .chain(std::iter::once(total))
            {
                let need = later - here - fuel;
                if need > 0.0 && fuel + need <= max_range + 1e-6 {
                    amounts.push(need);
                }
            }

            let next = stations
                .get(idx + 1)
                .map_or(total, |p| p.distance_miles);
            let hop = next - here;

            let mut best: Option<Decimal> = None;
            for buy in amounts {
                if buy < 0.0 {
                    continue;
                }
                let after = fuel + buy - hop;
                if after < -1e-6 {
                    continue;
                }
                if let Some(rest) =
                    search(idx + 1, after.max(0.0), stations, total, max_range, mpg)
                {
                    let cost = Decimal::from_f64(buy / mpg).unwrap() * price + rest;
                    best = Some(best.map_or(cost, |b: Decimal| b.min(cost)));
                }
            }
            best
        }

        let first = stations.first().map_or(total, |p| p.distance_miles);
        if first > max_range + 1e-6 {
            return None;
        }
        search(
            0,
            max_range - first,
            stations,
            total,
            max_range,
            profile.mpg,
        )
    }

    #[test]
    fn matches_brute_force_on_fixed_instances() {
        let cases: Vec<(Vec<ProjectedStation>, f64)> = vec![
            (
                vec![
                    projected(1, 0.0, "3.00"),
                    projected(2, 300.0, "2.50"),
                    projected(3, 600.0, "4.00"),
                    projected(4, 900.0, "2.00"),
                ],
                1000.0,
            ),
            (
                vec![
                    projected(1, 100.0, "5.00"),
                    projected(2, 250.0, "1.00"),
                    projected(3, 400.0, "3.00"),
                ],
                750.0,
            ),
            (
                vec![
                    projected(1, 200.0, "2.00"),
                    projected(2, 390.0, "2.00"),
                    projected(3, 395.0, "6.00"),
                ],
                780.0,
            ),
        ];

        for (stations, total) in cases {
            let plan = optimize(&stations, total, &profile()).unwrap();
            let oracle = brute_force_cost(&stations, total, &profile()).unwrap();
            let diff = (plan.total_cost - oracle.round_dp(2)).abs();
            assert!(
                diff <= dec("0.01"),
                "greedy {} vs oracle {} on total {total}",
                plan.total_cost,
                oracle
            );
        }
    }
}
