//! Tunable configuration for [`crate::estimator::BmsEstimator`]
//!
//! All constants the host is expected to configure or accept as defaults
//! live here: the Kalman filter's `Q`/`R`/`P0`, the capacity-adaptation
//! rate `alpha`, and the rest-period detector's current threshold and
//! timer.

/// Configuration constants for a [`crate::estimator::BmsEstimator`]
///
/// Construct with [`EstimatorConfig::default`] and customize with the
/// `with_*` builder methods.
///
/// # Examples
///
/// ```rust
/// use bms_estimator::EstimatorConfig;
///
/// let config = EstimatorConfig::default()
///     .with_rest_current_threshold_a(0.25)
///     .with_rest_period_seconds(EstimatorConfig::FAST_TEST_REST_SECONDS);
///
/// assert_eq!(config.rest_current_threshold_a(), 0.25);
/// assert_eq!(config.rest_period_seconds(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    process_noise: f32,
    measurement_noise: f32,
    initial_error_covariance: f32,
    capacity_adaptation_rate: f32,
    rest_current_threshold_a: f32,
    rest_period_seconds: f32,
}

impl EstimatorConfig {
    /// Recommended process noise `Q0` (favors the lookup once rest has
    /// validated it).
    pub const DEFAULT_PROCESS_NOISE: f32 = 1e-4;
    /// Recommended measurement noise `R0`.
    pub const DEFAULT_MEASUREMENT_NOISE: f32 = 1e-2;
    /// Recommended initial error covariance `P0`.
    pub const DEFAULT_ERROR_COVARIANCE: f32 = 1.0;
    /// Recommended capacity adaptation rate `alpha`.
    pub const DEFAULT_CAPACITY_ADAPTATION_RATE: f32 = 0.02;
    /// Recommended rest-current magnitude threshold `I_rest`, in amps.
    pub const DEFAULT_REST_CURRENT_THRESHOLD_A: f32 = 0.5;
    /// Production rest-period duration, in seconds.
    pub const DEFAULT_REST_PERIOD_SECONDS: f32 = 30.0;
    /// Fast-converging rest-period duration used by harness/test code,
    /// matching the host simulator's `REST_PERIOD_TIME`.
    pub const FAST_TEST_REST_SECONDS: f32 = 5.0;

    /// Builds a config using the recommended defaults.
    #[inline]
    pub const fn default() -> Self {
        Self {
            process_noise: Self::DEFAULT_PROCESS_NOISE,
            measurement_noise: Self::DEFAULT_MEASUREMENT_NOISE,
            initial_error_covariance: Self::DEFAULT_ERROR_COVARIANCE,
            capacity_adaptation_rate: Self::DEFAULT_CAPACITY_ADAPTATION_RATE,
            rest_current_threshold_a: Self::DEFAULT_REST_CURRENT_THRESHOLD_A,
            rest_period_seconds: Self::DEFAULT_REST_PERIOD_SECONDS,
        }
    }

    /// Sets the Kalman process noise `Q`.
    #[inline]
    pub const fn with_process_noise(mut self, q: f32) -> Self {
        self.process_noise = q;
        self
    }

    /// Sets the Kalman measurement noise `R`.
    #[inline]
    pub const fn with_measurement_noise(mut self, r: f32) -> Self {
        self.measurement_noise = r;
        self
    }

    /// Sets the initial error covariance `P0`.
    #[inline]
    pub const fn with_initial_error_covariance(mut self, p0: f32) -> Self {
        self.initial_error_covariance = p0;
        self
    }

    /// Sets the capacity adaptation rate `alpha`.
    #[inline]
    pub const fn with_capacity_adaptation_rate(mut self, alpha: f32) -> Self {
        self.capacity_adaptation_rate = alpha;
        self
    }

    /// Sets the rest-current magnitude threshold, in amps.
    #[inline]
    pub const fn with_rest_current_threshold_a(mut self, i_rest: f32) -> Self {
        self.rest_current_threshold_a = i_rest;
        self
    }

    /// Sets the rest-period duration required before a recalibration
    /// event fires, in seconds.
    #[inline]
    pub const fn with_rest_period_seconds(mut self, tau_rest: f32) -> Self {
        self.rest_period_seconds = tau_rest;
        self
    }

    /// Returns the Kalman process noise `Q`.
    #[inline]
    pub const fn process_noise(&self) -> f32 {
        self.process_noise
    }

    /// Returns the Kalman measurement noise `R`.
    #[inline]
    pub const fn measurement_noise(&self) -> f32 {
        self.measurement_noise
    }

    /// Returns the initial error covariance `P0`.
    #[inline]
    pub const fn initial_error_covariance(&self) -> f32 {
        self.initial_error_covariance
    }

    /// Returns the capacity adaptation rate `alpha`.
    #[inline]
    pub const fn capacity_adaptation_rate(&self) -> f32 {
        self.capacity_adaptation_rate
    }

    /// Returns the rest-current magnitude threshold, in amps.
    #[inline]
    pub const fn rest_current_threshold_a(&self) -> f32 {
        self.rest_current_threshold_a
    }

    /// Returns the rest-period duration, in seconds.
    #[inline]
    pub const fn rest_period_seconds(&self) -> f32 {
        self.rest_period_seconds
    }
}

impl Default for EstimatorConfig {
    #[inline]
    fn default() -> Self {
        Self::default()
    }
}
