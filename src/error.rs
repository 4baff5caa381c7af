//! Error types for the BMS estimator
//!
//! This module defines the error types that can occur while constructing or
//! driving an [`crate::estimator::BmsEstimator`].

use core::fmt;

/// Errors that can occur while constructing or updating a [`crate::estimator::BmsEstimator`]
///
/// # Examples
///
/// ```no_run
/// use bms_estimator::{BmsEstimator, Error};
///
/// match BmsEstimator::new(50.0, 10.0) {
///     Ok(mut estimator) => {
///         if let Err(e) = estimator.update(12.6, -1.5, 25.0, 1.0) {
///             eprintln!("update rejected: {e}");
///         }
///     }
///     Err(Error::InvalidCapacity) => eprintln!("bad nominal capacity"),
///     Err(Error::InvalidSoc) => eprintln!("bad initial SOC"),
///     Err(Error::InvalidInput) => eprintln!("bad update input"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// `nominal_capacity_ah` was not a finite, strictly positive value.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bms_estimator::{BmsEstimator, Error};
    ///
    /// let result = BmsEstimator::new(50.0, 0.0);
    /// assert!(matches!(result, Err(Error::InvalidCapacity)));
    /// ```
    InvalidCapacity,
    /// `initial_soc_percent` was outside the closed range `[0.0, 100.0]` or
    /// not finite.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bms_estimator::{BmsEstimator, Error};
    ///
    /// let result = BmsEstimator::new(150.0, 10.0);
    /// assert!(matches!(result, Err(Error::InvalidSoc)));
    /// ```
    InvalidSoc,
    /// One or more `update` inputs were non-finite, or `dt_s` was not
    /// strictly positive.
    ///
    /// No state is mutated when this error is returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bms_estimator::{BmsEstimator, Error};
    ///
    /// let mut estimator = BmsEstimator::new(50.0, 10.0).unwrap();
    /// let result = estimator.update(12.6, -1.5, 25.0, 0.0);
    /// assert!(matches!(result, Err(Error::InvalidInput)));
    /// ```
    InvalidInput,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity => write!(f, "invalid nominal capacity"),
            Error::InvalidSoc => write!(f, "invalid initial state of charge"),
            Error::InvalidInput => write!(f, "invalid update input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate alloc;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::InvalidCapacity.to_string(), "invalid nominal capacity");
        assert_eq!(
            Error::InvalidSoc.to_string(),
            "invalid initial state of charge"
        );
        assert_eq!(Error::InvalidInput.to_string(), "invalid update input");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::InvalidCapacity, Error::InvalidCapacity);
        assert_eq!(Error::InvalidSoc, Error::InvalidSoc);
        assert_ne!(Error::InvalidCapacity, Error::InvalidInput);
    }

    #[test]
    fn test_error_copy() {
        let error1 = Error::InvalidSoc;
        let error2 = error1;
        assert_eq!(error1, error2);
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidInput;
        let debug_str = alloc::format!("{:?}", error);
        assert!(debug_str.contains("InvalidInput"));
    }

    #[test]
    fn test_error_all_variants_distinct() {
        let errors = [Error::InvalidCapacity, Error::InvalidSoc, Error::InvalidInput];
        assert_eq!(errors.len(), 3);
        assert_ne!(errors[0], errors[1]);
        assert_ne!(errors[1], errors[2]);
        assert_ne!(errors[0], errors[2]);
    }
}
