//! The public estimator: state + config, wired through the coulomb
//! counter, lookups, and the Kalman/rest-period/SOH pipeline.

use crate::config::EstimatorConfig;
use crate::coulomb;
use crate::error::Error;
use crate::kalman;
use crate::lookup::{celsius_to_kelvin, lookup_r, lookup_v_soc, soc_to_ocv};
use crate::state::EstimatorState;

/// A single battery pack's SOC/SOH estimator.
///
/// Owns one [`EstimatorState`] and one [`EstimatorConfig`]. Not reentrant:
/// [`BmsEstimator::update`] must not be called concurrently for the same
/// instance, though distinct instances are fully independent.
///
/// # Examples
///
/// ```rust
/// use bms_estimator::BmsEstimator;
///
/// let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
/// estimator.update(12.5, 5.0, 25.0, 0.1).unwrap();
/// assert!(estimator.soc_percent() >= 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmsEstimator {
    state: EstimatorState,
    config: EstimatorConfig,
}

impl BmsEstimator {
    /// Creates a new estimator with the recommended default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `nominal_capacity_ah` is not
    /// finite and strictly positive, or [`Error::InvalidSoc`] if
    /// `initial_soc_percent` is not finite or lies outside `[0, 100]`.
    #[inline]
    pub fn new(initial_soc_percent: f32, nominal_capacity_ah: f32) -> Result<Self, Error> {
        Self::with_config(
            initial_soc_percent,
            nominal_capacity_ah,
            EstimatorConfig::default(),
        )
    }

    /// Creates a new estimator with a caller-supplied configuration.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BmsEstimator::new`].
    pub fn with_config(
        initial_soc_percent: f32,
        nominal_capacity_ah: f32,
        config: EstimatorConfig,
    ) -> Result<Self, Error> {
        if !nominal_capacity_ah.is_finite() || nominal_capacity_ah <= 0.0 {
            return Err(Error::InvalidCapacity);
        }
        if !initial_soc_percent.is_finite() || !(0.0..=100.0).contains(&initial_soc_percent) {
            return Err(Error::InvalidSoc);
        }

        let coulomb_count =
            EstimatorState::soc_to_coulombs(initial_soc_percent, nominal_capacity_ah);

        let state = EstimatorState {
            soc_percent: initial_soc_percent,
            coulomb_count,
            current_capacity_ah: nominal_capacity_ah,
            nominal_capacity_ah,
            kalman_gain: 0.0,
            process_noise: config.process_noise(),
            measurement_noise: config.measurement_noise(),
            error_covariance: config.initial_error_covariance(),
            soh_percent: 100.0,
            capacity_adaptation_rate: config.capacity_adaptation_rate(),
            soc_error_accumulator: 0.0,
            soh_update_count: 0,
            update_count: 0,
            rest_period_active: false,
            rest_period_timer: 0.0,
            last_update_time_us: 0.0,
        };

        Ok(Self { state, config })
    }

    /// Advances the estimator by one tick.
    ///
    /// `voltage_v` is the terminal voltage, `current_a` is the pack current
    /// (positive = charging), `temperature_c` is the pack temperature in
    /// Celsius (converted to Kelvin internally for the lookups), and
    /// `dt_s` is the elapsed time since the previous tick, in seconds.
    ///
    /// With the default `measurement_noise`, the corrector's steady-state
    /// gain is non-negligible, so `soc_percent` tracks `voltage_v` through
    /// the lookup as much as it tracks the coulomb count. Callers whose
    /// voltage does not correspond to the pack's true SOC (a fixed or
    /// randomly-oscillating test voltage, for instance) will see
    /// `soc_percent` pulled toward the lookup value rather than the
    /// coulomb-only prediction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if any of `voltage_v`, `current_a`,
    /// `temperature_c` is non-finite, or if `dt_s` is not strictly
    /// positive. On error, no field of the estimator's state is mutated,
    /// not even the tick counter.
    pub fn update(
        &mut self,
        voltage_v: f32,
        current_a: f32,
        temperature_c: f32,
        dt_s: f32,
    ) -> Result<(), Error> {
        if !voltage_v.is_finite()
            || !current_a.is_finite()
            || !temperature_c.is_finite()
            || !dt_s.is_finite()
            || dt_s <= 0.0
        {
            return Err(Error::InvalidInput);
        }

        let temperature_k = celsius_to_kelvin(temperature_c);

        // Coulomb counter.
        let counted = coulomb::integrate(
            self.state.coulomb_count,
            self.state.current_capacity_ah,
            current_a,
            dt_s,
        );

        // Step A: Kalman predict/correct.
        let soc_measured = lookup_v_soc(voltage_v, temperature_k);
        let corrected = kalman::correct(
            counted.soc_predicted,
            soc_measured,
            self.state.error_covariance,
            self.state.process_noise,
            self.state.measurement_noise,
        );

        let mut soc_percent = corrected.soc_percent;
        let mut current_capacity_ah = self.state.current_capacity_ah;
        let mut soh_percent = self.state.soh_percent;
        let mut soh_update_count = self.state.soh_update_count;

        // Step B: rest detection.
        let rest_tick = kalman::advance_rest_timer(
            current_a,
            dt_s,
            self.state.rest_period_active,
            self.state.rest_period_timer,
            self.config.rest_current_threshold_a(),
            self.config.rest_period_seconds(),
        );

        // Step C: rest-period recalibration + SOH adaptation.
        if rest_tick.recalibration_due {
            let soc_rest = lookup_v_soc(voltage_v, temperature_k);
            let recalibration = kalman::recalibrate(
                soc_rest,
                soc_percent,
                current_capacity_ah,
                self.state.nominal_capacity_ah,
                self.state.capacity_adaptation_rate,
            );
            soc_percent = recalibration.soc_percent;
            current_capacity_ah = recalibration.current_capacity_ah;
            soh_percent = recalibration.soh_percent;
            soh_update_count += 1;
        }

        let coulomb_count = EstimatorState::soc_to_coulombs(soc_percent, current_capacity_ah);

        self.state.coulomb_count = coulomb_count;
        self.state.soc_percent = soc_percent;
        self.state.current_capacity_ah = current_capacity_ah;
        self.state.soh_percent = soh_percent;
        self.state.error_covariance = corrected.error_covariance;
        self.state.kalman_gain = corrected.kalman_gain;
        self.state.rest_period_active = rest_tick.rest_period_active;
        self.state.rest_period_timer = rest_tick.rest_period_timer;
        self.state.soh_update_count = soh_update_count;
        self.state.update_count += 1;

        Ok(())
    }

    /// Returns the current SOC estimate, in `[0, 100]`.
    #[inline]
    pub const fn soc_percent(&self) -> f32 {
        self.state.soc_percent
    }

    /// Returns the current SOH estimate, in `[0, 105]`.
    #[inline]
    pub const fn soh_percent(&self) -> f32 {
        self.state.soh_percent
    }

    /// Returns the last-computed scalar Kalman gain, in `[0, 1]`.
    #[inline]
    pub const fn kalman_gain(&self) -> f32 {
        self.state.kalman_gain
    }

    /// Returns the number of ticks processed so far.
    #[inline]
    pub const fn update_count(&self) -> u32 {
        self.state.update_count
    }

    /// Returns the number of successful rest-period SOH adaptations.
    #[inline]
    pub const fn soh_update_count(&self) -> u32 {
        self.state.soh_update_count
    }

    /// Returns the effective (degraded) capacity, in amp-hours.
    #[inline]
    pub const fn current_capacity_ah(&self) -> f32 {
        self.state.current_capacity_ah
    }

    /// Returns the full underlying state snapshot.
    #[inline]
    pub const fn state(&self) -> &EstimatorState {
        &self.state
    }

    /// Returns the configuration this estimator was constructed with.
    #[inline]
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }
}

/// Diagnostic current estimate derived purely from voltage and
/// temperature, via `(implied_ocv - voltage) / resistance`.
///
/// This is not a real current measurement: it is a self-consistency
/// residual over the lookup tables, useful for host diagnostics, and it is
/// never consumed by [`BmsEstimator::update`] or any other state
/// transition. For a voltage that lies on the OCV manifold at the
/// implied SOC, the result is at or near zero by construction.
///
/// # Examples
///
/// ```rust
/// use bms_estimator::get_current;
///
/// let residual = get_current(12.75, 293.0);
/// assert!(residual.abs() < 5.0);
/// ```
pub fn get_current(voltage_v: f32, temperature_k: f32) -> f32 {
    let soc = lookup_v_soc(voltage_v, temperature_k);
    let ocv = soc_to_ocv(soc, temperature_k);
    let r = lookup_r(soc, temperature_k);

    if r > 0.0 {
        (ocv - voltage_v) / r
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        assert_eq!(estimator.soc_percent(), 50.0);
        assert_eq!(estimator.soh_percent(), 100.0);
        assert_eq!(estimator.current_capacity_ah(), 100.0);
    }

    #[test]
    fn test_new_invalid_capacity() {
        assert_eq!(BmsEstimator::new(50.0, 0.0), Err(Error::InvalidCapacity));
        assert_eq!(BmsEstimator::new(50.0, -1.0), Err(Error::InvalidCapacity));
        assert_eq!(
            BmsEstimator::new(50.0, f32::NAN),
            Err(Error::InvalidCapacity)
        );
    }

    #[test]
    fn test_new_invalid_soc() {
        assert_eq!(BmsEstimator::new(-1.0, 100.0), Err(Error::InvalidSoc));
        assert_eq!(BmsEstimator::new(101.0, 100.0), Err(Error::InvalidSoc));
        assert_eq!(BmsEstimator::new(f32::NAN, 100.0), Err(Error::InvalidSoc));
    }

    #[test]
    fn test_init_coulomb_count_matches_soc() {
        let estimator = BmsEstimator::new(25.0, 100.0).unwrap();
        let expected = EstimatorState::soc_to_coulombs(25.0, 100.0);
        assert_eq!(estimator.state().coulomb_count, expected);
    }

    #[test]
    fn test_update_rejects_non_finite_input_without_mutation() {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        let before = *estimator.state();
        let result = estimator.update(f32::NAN, 1.0, 25.0, 0.1);
        assert_eq!(result, Err(Error::InvalidInput));
        assert_eq!(*estimator.state(), before);
    }

    #[test]
    fn test_update_rejects_nonpositive_dt() {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        let before = *estimator.state();
        let result = estimator.update(12.5, 1.0, 25.0, 0.0);
        assert_eq!(result, Err(Error::InvalidInput));
        assert_eq!(*estimator.state(), before);
    }

    #[test]
    fn test_update_increments_tick_counter() {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        estimator.update(12.5, 1.0, 25.0, 0.1).unwrap();
        assert_eq!(estimator.update_count(), 1);
    }

    #[test]
    fn test_soc_stays_in_bounds_over_many_ticks() {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        for i in 0..1000 {
            let v = 12.5 + 0.3 * ((i as f32) * 0.01).sin();
            estimator.update(v, 5.0, 25.0, 0.1).unwrap();
            assert!((0.0..=100.0).contains(&estimator.soc_percent()));
        }
    }

    #[test]
    fn test_accumulator_soc_consistency() {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        estimator.update(12.75, -3.0, 25.0, 0.1).unwrap();
        let expected = EstimatorState::soc_to_coulombs(
            estimator.soc_percent(),
            estimator.current_capacity_ah(),
        );
        assert!((estimator.state().coulomb_count - expected).abs() <= 1);
    }

    #[test]
    fn test_capacity_stays_within_bounds() {
        let mut estimator = BmsEstimator::new(10.0, 100.0).unwrap();
        for _ in 0..400 {
            estimator.update(12.75, 0.0, 25.0, 0.1).unwrap();
        }
        assert!(estimator.current_capacity_ah() >= 50.0);
        assert!(estimator.current_capacity_ah() <= 105.0);
    }

    #[test]
    fn test_get_current_near_zero_on_manifold() {
        let residual = get_current(12.75, 293.0);
        assert!(residual.abs() < 5.0);
    }
}
