//! # BMS Core Estimator
//!
//! A deterministic, fixed-step State-of-Charge (SOC) and State-of-Health
//! (SOH) estimator for a single battery pack. Given noisy terminal-voltage,
//! current, and temperature measurements, it fuses coulomb counting with a
//! voltage-based scalar Kalman correction (driven by an Open-Circuit-Voltage
//! lookup) and, during verified rest periods, recalibrates SOC and adapts
//! the pack's effective capacity.
//!
//! ## Features
//!
//! - **`no_std` compatible** - works in embedded environments
//! - **No heap allocations** - all storage is stack or static
//! - **Integer coulomb counter** - a signed 64-bit µA·s accumulator avoids
//!   progressive floating-point cancellation across long runs
//! - **Compile-time lookup tables** - the OCV→SOC and resistance tables are
//!   generated by `const fn` at build time, not loaded at runtime
//! - **Scalar Kalman correction** - blends coulomb-counted SOC with
//!   lookup-derived SOC every tick
//! - **Rest-period recalibration** - snaps SOC to the lookup value and
//!   adapts capacity (hence SOH) once a sustained low-current window is
//!   observed
//! - **Optional fixed-point lookups** - a Q16.16 mirror of both lookup
//!   functions for hosts without an FPU, behind the `fixed-point` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use bms_estimator::BmsEstimator;
//!
//! let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
//!
//! // Feed one tick: 12.5 V, 5 A charging, 25 °C, 0.1 s elapsed.
//! estimator.update(12.5, 5.0, 25.0, 0.1).unwrap();
//!
//! println!("SOC: {:.1}%  SOH: {:.1}%", estimator.soc_percent(), estimator.soh_percent());
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use bms_estimator::{BmsEstimator, EstimatorConfig};
//!
//! let config = EstimatorConfig::default()
//!     .with_rest_period_seconds(EstimatorConfig::FAST_TEST_REST_SECONDS)
//!     .with_capacity_adaptation_rate(0.05);
//!
//! let estimator = BmsEstimator::with_config(50.0, 100.0, config).unwrap();
//! assert_eq!(estimator.config().rest_period_seconds(), 5.0);
//! ```
//!
//! ## Standalone Lookups
//!
//! ```rust
//! use bms_estimator::{lookup_v_soc, lookup_r};
//!
//! let soc = lookup_v_soc(12.75, 293.0);
//! let r = lookup_r(soc, 293.0);
//! assert!((0.0..=100.0).contains(&soc));
//! assert!(r > 0.0);
//! ```
//!
//! ## Module Structure
//!
//! - [`BmsEstimator`] - the public estimator: state + config, `update`, accessors
//! - [`EstimatorConfig`] - tunable Kalman/rest/adaptation constants
//! - [`EstimatorState`] - the full per-pack data model
//! - [`Error`] - error types for construction/update failures
//! - [`lookup_v_soc`], [`lookup_r`] - standalone bivariate lookups
//! - [`get_current`] - optional diagnostic current residual

#![no_std]
#![deny(missing_docs, unsafe_code)]

mod config;
mod coulomb;
mod error;
mod estimator;
mod fixed_point;
mod kalman;
mod lookup;
mod state;

pub use config::EstimatorConfig;
pub use error::Error;
pub use estimator::{get_current, BmsEstimator};
pub use lookup::{celsius_to_kelvin, lookup_r, lookup_v_soc, R_TABLE, SOC_TABLE, T_AXIS, V_AXIS};
pub use state::EstimatorState;

#[cfg(feature = "fixed-point")]
pub use fixed_point::{lookup_r_fixed, lookup_v_soc_fixed, Fixed};

/// Prelude module for convenient imports
///
/// ```
/// use bms_estimator::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{get_current, lookup_r, lookup_v_soc, BmsEstimator, EstimatorConfig, Error};

    #[cfg(feature = "fixed-point")]
    pub use crate::{lookup_r_fixed, lookup_v_soc_fixed, Fixed};
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate alloc;
    use alloc::string::ToString;

    #[test]
    fn test_prelude_exports() {
        use crate::prelude::*;

        let _estimator = BmsEstimator::new(50.0, 100.0);
        let _config = EstimatorConfig::default();
        let _soc = lookup_v_soc(12.5, 293.0);
        let _r = lookup_r(50.0, 293.0);
        let _current = get_current(12.75, 293.0);
    }

    #[test]
    fn test_basic_usage() {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        estimator.update(12.75, 0.0, 25.0, 1.0).unwrap();
        let soc = estimator.soc_percent();
        assert!((0.0..=100.0).contains(&soc));
    }

    #[test]
    fn test_error_export() {
        let error = Error::InvalidCapacity;
        assert_eq!(error.to_string(), "invalid nominal capacity");
    }

    #[test]
    fn test_config_export() {
        let config = EstimatorConfig::default().with_capacity_adaptation_rate(0.1);
        assert_eq!(config.capacity_adaptation_rate(), 0.1);
    }

    #[test]
    fn test_charge_increases_soc_over_short_window() {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        let before = estimator.soc_percent();
        for _ in 0..100 {
            estimator.update(12.75, 5.0, 25.0, 0.1).unwrap();
        }
        assert!(estimator.soc_percent() >= before);
    }

    #[test]
    fn test_discharge_decreases_soc_over_short_window() {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        let before = estimator.soc_percent();
        for _ in 0..100 {
            estimator.update(12.75, -5.0, 25.0, 0.1).unwrap();
        }
        assert!(estimator.soc_percent() <= before);
    }

    #[cfg(feature = "fixed-point")]
    #[test]
    fn test_fixed_point_lookup_matches_float_roughly() {
        let soc_f32 = lookup_v_soc(12.75, 293.0);
        let soc_fixed = lookup_v_soc_fixed(Fixed::from_num(12.75), Fixed::from_num(293.0));
        assert!((soc_f32 - soc_fixed.to_num::<f32>()).abs() < 1.0);
    }
}
