//! fisherfit - simple linear regression with an F-test adequacy check
//!
//! This library fits y = a1·x + a0 by least squares, exposes every
//! intermediate series of the fit, and tests model adequacy by comparing
//! the F-statistic with published critical values of the F-distribution.

pub mod cli;
pub mod config;
pub mod error;
pub mod regression;
pub mod report;
pub mod sample;
pub mod source;

pub use error::{FitError, Result};
pub use regression::RegressionEngine;
pub use sample::Sample;
