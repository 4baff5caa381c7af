//! Integer coulomb-counter accumulator
//!
//! Charge is integrated into a signed 64-bit accumulator in micro-amp-seconds
//! rather than a running floating-point sum, avoiding progressive float
//! cancellation error across millions of ticks. Units of µA·s give
//! sub-milliamp-second resolution while the 64-bit range covers years of
//! operation at realistic currents.

/// Result of a single coulomb-counter tick.
pub(crate) struct CoulombUpdate {
    /// Updated accumulator value, in micro-amp-seconds, clamped to
    /// `[0, current_capacity_ah * 3600 * 1e6]`.
    pub coulomb_count: i64,
    /// SOC predicted purely from the accumulator, in `[0, 100]`.
    pub soc_predicted: f32,
}

/// Integrates current `current_a` (amps, positive = charging) over `dt_s`
/// seconds into `coulomb_count`, then clamps and derives a predicted SOC.
pub(crate) fn integrate(
    coulomb_count: i64,
    current_capacity_ah: f32,
    current_a: f32,
    dt_s: f32,
) -> CoulombUpdate {
    let delta_uas = (current_a as f64 * dt_s as f64 * 1.0e6).round() as i64;
    let updated = coulomb_count.saturating_add(delta_uas);

    let full_scale_uas = (current_capacity_ah as f64 * 3600.0 * 1.0e6).round() as i64;
    let clamped = updated.clamp(0, full_scale_uas);

    let soc_predicted = if full_scale_uas > 0 {
        ((clamped as f64 / full_scale_uas as f64) * 100.0) as f32
    } else {
        0.0
    };

    CoulombUpdate {
        coulomb_count: clamped,
        soc_predicted: soc_predicted.clamp(0.0, 100.0),
    }
}
