//! Fixed-point mirror of the lookup tables
//!
//! This module provides a Q16.16 (`I16F16`) alternative to the floating-point
//! lookups in [`crate::lookup`], for embedded hosts without a hardware FPU.
//! Fixed-point arithmetic offers:
//!
//! - **Faster execution** on systems without an FPU
//! - **Deterministic performance** - no variable-latency float microcode
//! - **Smaller code size** - no floating-point library linked in
//!
//! # Type
//!
//! `Fixed = I16F16`: 16 integer bits (range -32768..=32767), 16 fractional
//! bits (precision ~0.000015). Sufficient for voltage (0-65V), SOC (0-100%),
//! and temperature in Kelvin (0-500K).
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "fixed-point")]
//! # {
//! use bms_estimator::{lookup_v_soc_fixed, Fixed};
//!
//! let soc = lookup_v_soc_fixed(Fixed::from_num(12.75), Fixed::from_num(293.0));
//! assert!(soc >= Fixed::from_num(0.0) && soc <= Fixed::from_num(100.0));
//! # }
//! ```

#[cfg(feature = "fixed-point")]
use fixed::types::I16F16;

#[cfg(feature = "fixed-point")]
use crate::lookup::{R_TABLE, SOC_AXIS_R, SOC_TABLE, T_AXIS, T_AXIS_LEN, V_AXIS, V_AXIS_LEN};

/// Fixed-point number type used throughout this module (I16F16).
#[cfg(feature = "fixed-point")]
pub type Fixed = I16F16;

#[cfg(feature = "fixed-point")]
fn segment_fixed(axis: &[f32], q: Fixed) -> usize {
    let len = axis.len();
    let mut i = 0;
    while i < len - 2 && Fixed::from_num(axis[i + 1]) <= q {
        i += 1;
    }
    i
}

/// Fixed-point bivariate lookup of SOC from terminal voltage and temperature.
///
/// Mirrors [`crate::lookup_v_soc`] using Q16.16 arithmetic throughout.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "fixed-point")]
/// # {
/// use bms_estimator::{lookup_v_soc_fixed, Fixed};
///
/// let soc = lookup_v_soc_fixed(Fixed::from_num(12.06), Fixed::from_num(293.0));
/// assert!(soc <= Fixed::from_num(5.0));
/// # }
/// ```
#[cfg(feature = "fixed-point")]
pub fn lookup_v_soc_fixed(voltage_v: Fixed, temperature_k: Fixed) -> Fixed {
    let qx = voltage_v.clamp(
        Fixed::from_num(V_AXIS[0]),
        Fixed::from_num(V_AXIS[V_AXIS_LEN - 1]),
    );
    let qy = temperature_k.clamp(
        Fixed::from_num(T_AXIS[0]),
        Fixed::from_num(T_AXIS[T_AXIS_LEN - 1]),
    );

    let i = segment_fixed(&V_AXIS, qx);
    let j = segment_fixed(&T_AXIS, qy);

    let x0 = Fixed::from_num(V_AXIS[i]);
    let x1 = Fixed::from_num(V_AXIS[i + 1]);
    let y0 = Fixed::from_num(T_AXIS[j]);
    let y1 = Fixed::from_num(T_AXIS[j + 1]);

    let fx = if x1 > x0 {
        (qx - x0) / (x1 - x0)
    } else {
        Fixed::from_num(0)
    };
    let fy = if y1 > y0 {
        (qy - y0) / (y1 - y0)
    } else {
        Fixed::from_num(0)
    };

    let z00 = Fixed::from_num(SOC_TABLE[i][j]);
    let z10 = Fixed::from_num(SOC_TABLE[i + 1][j]);
    let z01 = Fixed::from_num(SOC_TABLE[i][j + 1]);
    let z11 = Fixed::from_num(SOC_TABLE[i + 1][j + 1]);

    let z0 = z00 + (z10 - z00) * fx;
    let z1 = z01 + (z11 - z01) * fx;
    let result = z0 + (z1 - z0) * fy;

    result.clamp(Fixed::from_num(0), Fixed::from_num(100))
}

/// Fixed-point bivariate lookup of internal resistance from SOC and
/// temperature.
///
/// Mirrors [`crate::lookup_r`] using Q16.16 arithmetic throughout.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "fixed-point")]
/// # {
/// use bms_estimator::{lookup_r_fixed, Fixed};
///
/// let r = lookup_r_fixed(Fixed::from_num(5.0), Fixed::from_num(263.0));
/// assert!(r > Fixed::from_num(0.020));
/// # }
/// ```
#[cfg(feature = "fixed-point")]
pub fn lookup_r_fixed(soc_percent: Fixed, temperature_k: Fixed) -> Fixed {
    let qx = soc_percent.clamp(
        Fixed::from_num(SOC_AXIS_R[0]),
        Fixed::from_num(SOC_AXIS_R[SOC_AXIS_R.len() - 1]),
    );
    let qy = temperature_k.clamp(
        Fixed::from_num(T_AXIS[0]),
        Fixed::from_num(T_AXIS[T_AXIS_LEN - 1]),
    );

    let i = segment_fixed(&SOC_AXIS_R, qx);
    let j = segment_fixed(&T_AXIS, qy);

    let x0 = Fixed::from_num(SOC_AXIS_R[i]);
    let x1 = Fixed::from_num(SOC_AXIS_R[i + 1]);
    let y0 = Fixed::from_num(T_AXIS[j]);
    let y1 = Fixed::from_num(T_AXIS[j + 1]);

    let fx = if x1 > x0 {
        (qx - x0) / (x1 - x0)
    } else {
        Fixed::from_num(0)
    };
    let fy = if y1 > y0 {
        (qy - y0) / (y1 - y0)
    } else {
        Fixed::from_num(0)
    };

    let z00 = Fixed::from_num(R_TABLE[i][j]);
    let z10 = Fixed::from_num(R_TABLE[i + 1][j]);
    let z01 = Fixed::from_num(R_TABLE[i][j + 1]);
    let z11 = Fixed::from_num(R_TABLE[i + 1][j + 1]);

    let z0 = z00 + (z10 - z00) * fx;
    let z1 = z01 + (z11 - z01) * fx;
    let result = z0 + (z1 - z0) * fy;

    result.max(Fixed::from_num(0))
}
