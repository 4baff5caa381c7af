//! The estimator's persistent state
//!
//! [`EstimatorState`] is the full data model carried between calls to
//! [`crate::estimator::BmsEstimator::update`]: one instance per battery
//! pack, exclusively owned by its host.

/// Snapshot of a single battery pack's estimator state
///
/// Created by [`crate::estimator::BmsEstimator::new`], mutated only by
/// [`crate::estimator::BmsEstimator::update`]. Never freed by the library;
/// the host owns its storage.
///
/// # Examples
///
/// ```rust
/// use bms_estimator::BmsEstimator;
///
/// let estimator = BmsEstimator::new(50.0, 100.0).unwrap();
/// let state = estimator.state();
/// assert_eq!(state.soc_percent, 50.0);
/// assert_eq!(state.soh_percent, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorState {
    /// Current SOC estimate, in `[0, 100]`.
    pub soc_percent: f32,
    /// Charge accumulator in micro-amp-seconds; positive current = charging.
    pub coulomb_count: i64,
    /// Effective (degraded) pack capacity, in amp-hours.
    pub current_capacity_ah: f32,
    /// Original, as-new capacity, in amp-hours. Immutable after init.
    pub nominal_capacity_ah: f32,
    /// Last-computed scalar Kalman gain, in `[0, 1]`.
    pub kalman_gain: f32,
    /// Kalman process noise `Q`, a fixed configuration constant.
    pub process_noise: f32,
    /// Kalman measurement noise `R`, a fixed configuration constant.
    pub measurement_noise: f32,
    /// Predictor-corrector error covariance `P`.
    pub error_covariance: f32,
    /// `100 * current_capacity_ah / nominal_capacity_ah`.
    pub soh_percent: f32,
    /// Bounded fraction of SOC error applied per capacity adaptation.
    pub capacity_adaptation_rate: f32,
    /// Unused in core semantics; reserved for host diagnostics.
    pub soc_error_accumulator: f32,
    /// Number of successful rest-period adaptations.
    pub soh_update_count: u32,
    /// Number of ticks processed.
    pub update_count: u32,
    /// True while `|I|` has been below the rest threshold and the timer is armed.
    pub rest_period_active: bool,
    /// Accumulated rest duration, in seconds.
    pub rest_period_timer: f32,
    /// Reserved; last-tick timestamp for host diagnostics.
    pub last_update_time_us: f32,
}

impl EstimatorState {
    /// Converts an SOC percentage and capacity into the equivalent
    /// coulomb-counter reading, in micro-amp-seconds.
    #[inline]
    pub fn soc_to_coulombs(soc_percent: f32, current_capacity_ah: f32) -> i64 {
        let full_scale_uas = current_capacity_ah as f64 * 3600.0 * 1.0e6;
        ((soc_percent as f64 / 100.0) * full_scale_uas).round() as i64
    }

    /// Converts a coulomb-counter reading back into an SOC percentage,
    /// clamped to `[0, 100]`.
    #[inline]
    pub fn coulombs_to_soc(coulomb_count: i64, current_capacity_ah: f32) -> f32 {
        let full_scale_uas = current_capacity_ah as f64 * 3600.0 * 1.0e6;
        let soc = (coulomb_count as f64 / full_scale_uas) * 100.0;
        soc.clamp(0.0, 100.0) as f32
    }
}
