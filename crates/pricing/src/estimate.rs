use serde::{Deserialize, Serialize};

use phonemart_core::{DomainError, DomainResult, ValueObject};

/// Unconditional depreciation applied to the base price (the "pivot").
pub const PIVOT_FACTOR: f64 = 0.75;
/// Share of the pivot paid for a device with a broken screen.
pub const SCREEN_FACTOR: f64 = 0.30;
/// Flat amount removed for a weak battery.
pub const BATTERY_PENALTY: f64 = 20_000.0;
pub const FACE_ID_FACTOR: f64 = 0.60;
pub const CAMERA_FACTOR: f64 = 0.80;
pub const AVERAGE_CONDITION_FACTOR: f64 = 0.90;
/// Minimum payable estimate, applied to every result.
pub const MIN_ESTIMATE: u64 = 5_000;

/// Device condition flags reported by the diagnostic flow.
///
/// Wire names follow the front-end (`ecran_casse`, ...); English aliases are
/// accepted. Missing flags are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    #[serde(rename = "ecran_casse", alias = "screen_broken")]
    pub screen_broken: bool,
    #[serde(rename = "batterie_faible", alias = "battery_weak")]
    pub battery_weak: bool,
    #[serde(rename = "face_id_hs", alias = "face_id_broken")]
    pub face_id_broken: bool,
    #[serde(rename = "camera_hs", alias = "camera_broken")]
    pub camera_broken: bool,
    #[serde(rename = "etat_moyen", alias = "average_condition")]
    pub average_condition: bool,
}

impl ValueObject for Diagnostics {}

impl Diagnostics {
    /// A device with no reported defect.
    pub fn pristine() -> Self {
        Self::default()
    }
}

/// Estimate the buy-back price of a used device.
///
/// Rules run in a fixed order on a running value that starts at the pivot
/// (`base_price * 0.75`):
///
/// 1. a broken screen short-circuits to `pivot * 0.30`;
/// 2. otherwise a weak battery subtracts a flat 20000, then Face ID, camera and
///    average-condition penalties multiply in that order.
///
/// The result is rounded to a whole currency unit and never below
/// [`MIN_ESTIMATE`].
pub fn estimate(base_price: f64, diagnostics: &Diagnostics) -> DomainResult<u64> {
    if !base_price.is_finite() {
        return Err(DomainError::invalid_input("base price must be a finite number"));
    }
    if base_price < 0.0 {
        return Err(DomainError::invalid_input("base price must not be negative"));
    }

    let pivot = base_price * PIVOT_FACTOR;

    let value = if diagnostics.screen_broken {
        pivot * SCREEN_FACTOR
    } else {
        let mut value = pivot;
        if diagnostics.battery_weak {
            value -= BATTERY_PENALTY;
        }
        if diagnostics.face_id_broken {
            value *= FACE_ID_FACTOR;
        }
        if diagnostics.camera_broken {
            value *= CAMERA_FACTOR;
        }
        if diagnostics.average_condition {
            value *= AVERAGE_CONDITION_FACTOR;
        }
        value
    };

    Ok(floor_and_round(value))
}

fn floor_and_round(value: f64) -> u64 {
    let rounded = value.round();
    if rounded <= MIN_ESTIMATE as f64 {
        MIN_ESTIMATE
    } else {
        // Finite and above the floor here; `as` saturates on the (unreachable) upper end.
        rounded as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(f: impl FnOnce(&mut Diagnostics)) -> Diagnostics {
        let mut d = Diagnostics::pristine();
        f(&mut d);
        d
    }

    fn all_flags() -> Diagnostics {
        Diagnostics {
            screen_broken: true,
            battery_weak: true,
            face_id_broken: true,
            camera_broken: true,
            average_condition: true,
        }
    }

    #[test]
    fn perfect_condition_pays_the_pivot() {
        assert_eq!(estimate(100_000.0, &Diagnostics::pristine()).unwrap(), 75_000);
    }

    #[test]
    fn broken_screen_overrides_every_other_flag() {
        assert_eq!(estimate(100_000.0, &all_flags()).unwrap(), 22_500);
        assert_eq!(
            estimate(100_000.0, &with(|d| d.screen_broken = true)).unwrap(),
            22_500
        );
    }

    #[test]
    fn weak_battery_subtracts_flat_amount() {
        assert_eq!(estimate(100_000.0, &with(|d| d.battery_weak = true)).unwrap(), 55_000);
    }

    #[test]
    fn face_id_cuts_forty_percent() {
        assert_eq!(estimate(100_000.0, &with(|d| d.face_id_broken = true)).unwrap(), 45_000);
    }

    #[test]
    fn camera_cuts_twenty_percent() {
        assert_eq!(estimate(100_000.0, &with(|d| d.camera_broken = true)).unwrap(), 60_000);
    }

    #[test]
    fn average_condition_cuts_ten_percent() {
        assert_eq!(
            estimate(100_000.0, &with(|d| d.average_condition = true)).unwrap(),
            67_500
        );
    }

    #[test]
    fn penalties_apply_sequentially() {
        // 75000 - 20000 = 55000, then * 0.90
        let d = with(|d| {
            d.battery_weak = true;
            d.average_condition = true;
        });
        assert_eq!(estimate(100_000.0, &d).unwrap(), 49_500);
    }

    #[test]
    fn battery_penalty_runs_before_multipliers() {
        // (75000 - 20000) * 0.60 = 33000; multiplying first would give 25000.
        let d = with(|d| {
            d.battery_weak = true;
            d.face_id_broken = true;
        });
        assert_eq!(estimate(100_000.0, &d).unwrap(), 33_000);
    }

    #[test]
    fn floor_applies_on_screen_path() {
        assert_eq!(estimate(10_000.0, &with(|d| d.screen_broken = true)).unwrap(), 5_000);
    }

    #[test]
    fn floor_applies_on_penalty_path() {
        // Pivot 15000 minus battery goes negative.
        assert_eq!(estimate(20_000.0, &with(|d| d.battery_weak = true)).unwrap(), 5_000);
    }

    #[test]
    fn zero_base_price_yields_floor() {
        assert_eq!(estimate(0.0, &all_flags()).unwrap(), MIN_ESTIMATE);
        assert_eq!(estimate(0.0, &Diagnostics::pristine()).unwrap(), MIN_ESTIMATE);
    }

    #[test]
    fn result_is_rounded() {
        // 99999 * 0.75 = 74999.25
        assert_eq!(estimate(99_999.0, &Diagnostics::pristine()).unwrap(), 74_999);
        // 100001 * 0.75 = 75000.75
        assert_eq!(estimate(100_001.0, &Diagnostics::pristine()).unwrap(), 75_001);
    }

    #[test]
    fn rejects_negative_and_non_finite_prices() {
        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match estimate(bad, &Diagnostics::pristine()) {
                Err(DomainError::InvalidInput(_)) => {}
                other => panic!("expected InvalidInput for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn diagnostics_accept_wire_and_english_names() {
        let wire: Diagnostics =
            serde_json::from_str(r#"{"ecran_casse": false, "batterie_faible": true}"#).unwrap();
        let english: Diagnostics =
            serde_json::from_str(r#"{"battery_weak": true, "etat_moyen": false}"#).unwrap();

        assert_eq!(wire, english);
        assert!(wire.battery_weak);
        assert!(!wire.camera_broken);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_diagnostics() -> impl Strategy<Value = Diagnostics> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(screen_broken, battery_weak, face_id_broken, camera_broken, average_condition)| {
                    Diagnostics {
                        screen_broken,
                        battery_weak,
                        face_id_broken,
                        camera_broken,
                        average_condition,
                    }
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: with no defect the estimate is the floored, rounded pivot.
            #[test]
            fn pristine_device_pays_floored_pivot(price in 0u32..5_000_000) {
                let p = price as f64;
                let expected = ((p * 0.75).round() as u64).max(MIN_ESTIMATE);
                prop_assert_eq!(estimate(p, &Diagnostics::pristine()).unwrap(), expected);
            }

            /// Property: a broken screen ignores every other flag.
            #[test]
            fn broken_screen_is_independent_of_other_flags(
                price in 0u32..5_000_000,
                d in any_diagnostics()
            ) {
                let d = Diagnostics { screen_broken: true, ..d };
                let p = price as f64;
                let expected = ((p * 0.75 * 0.30).round() as u64).max(MIN_ESTIMATE);
                prop_assert_eq!(estimate(p, &d).unwrap(), expected);
            }

            /// Property: the floor holds for every input.
            #[test]
            fn never_below_floor(price in 0u32..5_000_000, d in any_diagnostics()) {
                prop_assert!(estimate(price as f64, &d).unwrap() >= MIN_ESTIMATE);
            }

            /// Property: defects never raise the price.
            #[test]
            fn defects_never_increase_estimate(price in 0u32..5_000_000, d in any_diagnostics()) {
                let p = price as f64;
                prop_assert!(estimate(p, &d).unwrap() <= estimate(p, &Diagnostics::pristine()).unwrap());
            }

            /// Property: estimate is deterministic.
            #[test]
            fn estimate_is_deterministic(price in 0u32..5_000_000, d in any_diagnostics()) {
                let p = price as f64;
                prop_assert_eq!(estimate(p, &d), estimate(p, &d));
            }
        }
    }
}
