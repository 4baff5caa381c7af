//! Scalar Kalman corrector, rest-period detector, and SOH adapter
//!
//! The hidden state of interest (SOC) is scalar, so a full matrix Kalman
//! filter is unnecessary: a single predictor–corrector update blends the
//! coulomb-counted SOC with the lookup-derived SOC every tick. Separately,
//! a timer-based state machine watches for sustained low-current windows;
//! once one has lasted `tau_rest` seconds it snaps SOC to the lookup value
//! and adapts the pack's effective capacity, since open-circuit voltage is
//! only a trustworthy absolute reference once load and polarization have
//! settled out.

/// Result of one scalar Kalman predict/correct step.
pub(crate) struct CorrectorOutput {
    /// Corrected SOC estimate, clamped to `[0, 100]`.
    pub soc_percent: f32,
    /// Updated error covariance `P`.
    pub error_covariance: f32,
    /// The gain used for this correction, in `[0, 1]`.
    pub kalman_gain: f32,
}

/// Runs the predict/correct step: `P <- P + Q`, `K <- P / (P + R)`,
/// `soc <- soc_predicted + K * (soc_measured - soc_predicted)`,
/// `P <- (1 - K) * P`.
pub(crate) fn correct(
    soc_predicted: f32,
    soc_measured: f32,
    error_covariance: f32,
    process_noise: f32,
    measurement_noise: f32,
) -> CorrectorOutput {
    let predicted_covariance = error_covariance + process_noise;
    let denom = predicted_covariance + measurement_noise;
    let gain = if denom > 0.0 {
        (predicted_covariance / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let soc_percent = (soc_predicted + gain * (soc_measured - soc_predicted)).clamp(0.0, 100.0);
    let updated_covariance = (1.0 - gain) * predicted_covariance;

    CorrectorOutput {
        soc_percent,
        error_covariance: updated_covariance,
        kalman_gain: gain,
    }
}

/// Result of advancing the rest-period timer by one tick.
pub(crate) struct RestTick {
    /// Whether the pack is (still, or newly) within a rest window.
    pub rest_period_active: bool,
    /// The rest timer's value after this tick.
    pub rest_period_timer: f32,
    /// True exactly on the tick where the rest timer reaches `tau_rest`;
    /// the caller should run recalibration and then reset the timer/flag.
    pub recalibration_due: bool,
}

/// Advances the rest-period state machine by one tick of duration `dt_s`,
/// given the tick's current magnitude `current_a`.
///
/// States (implicit in the returned flag/timer):
/// - ACTIVE (`rest_period_active = false`): coulomb-count-driven.
/// - SETTLING (`rest_period_active = true`, `timer < tau_rest`): candidate rest.
/// - RESTED (`timer >= tau_rest`): one recalibration event fires, then the
///   state resets.
pub(crate) fn advance_rest_timer(
    current_a: f32,
    dt_s: f32,
    rest_period_active: bool,
    rest_period_timer: f32,
    rest_current_threshold_a: f32,
    rest_period_seconds: f32,
) -> RestTick {
    if current_a.abs() < rest_current_threshold_a {
        let timer = if rest_period_active {
            rest_period_timer + dt_s
        } else {
            dt_s
        };

        if timer >= rest_period_seconds {
            RestTick {
                rest_period_active: false,
                rest_period_timer: 0.0,
                recalibration_due: true,
            }
        } else {
            RestTick {
                rest_period_active: true,
                rest_period_timer: timer,
                recalibration_due: false,
            }
        }
    } else {
        RestTick {
            rest_period_active: false,
            rest_period_timer: 0.0,
            recalibration_due: false,
        }
    }
}

/// Result of a rest-period recalibration + SOH adaptation event.
pub(crate) struct Recalibration {
    /// SOC after snapping to the lookup value.
    pub soc_percent: f32,
    /// Capacity after bounded adaptation, in amp-hours.
    pub current_capacity_ah: f32,
    /// SOH after recomputation from the adapted capacity.
    pub soh_percent: f32,
}

/// Snaps SOC to `soc_rest` and adapts capacity proportionally to the
/// signed relative error, clamped to `[0.5, 1.05] * nominal_capacity_ah`.
pub(crate) fn recalibrate(
    soc_rest: f32,
    soc_percent: f32,
    current_capacity_ah: f32,
    nominal_capacity_ah: f32,
    capacity_adaptation_rate: f32,
) -> Recalibration {
    let delta_soc = soc_rest - soc_percent;

    let adapted = current_capacity_ah * (1.0 - capacity_adaptation_rate * delta_soc / 100.0);
    let current_capacity_ah =
        adapted.clamp(0.5 * nominal_capacity_ah, 1.05 * nominal_capacity_ah);

    let soh_percent = (100.0 * current_capacity_ah / nominal_capacity_ah).clamp(0.0, 105.0);

    Recalibration {
        soc_percent: soc_rest,
        current_capacity_ah,
        soh_percent,
    }
}
