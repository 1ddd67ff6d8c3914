//! Fixed-point sine wave generation for 16-bit DSP targets.
//!
//! This crate produces sample streams of `u(t) = sin(phi(t)) * (1 - att)`
//! using integer arithmetic only: a UQ0.16 phase accumulator, a 256-entry
//! quarter-wave lookup table with linear interpolation, and a round-half-up
//! narrowing to SQ0.15 output samples. It is `no_std`, allocation free, and
//! re-entrant by construction - each [SineGen] owns its whole state.
//!
//! The distinguishing feature is the low-amplitude postprocessing stage.
//! When the attenuation is high enough that the quantized sine collapses
//! into a staircase of adjacent output codes, the generator looks ahead for
//! each code dwell and replaces the hard step between codes with a pulse
//! pattern whose duty cycle ramps across the interval, so the short-term
//! average keeps following the sine instead of the staircase. See
//! [SineGen::set_pp].
//!
//! Fixed-point formats follow the `UQm.n`/`SQm.n` notation (m integer bits,
//! n fractional bits, sign bit extra for signed types) and are carried by
//! the [fixed] crate's types; the crate root re-exports them with the `FxP`
//! suffix convention.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod fixedmath;

mod gen;

pub use gen::{SineGen, FREQ_MAX};

pub use fixedmath::{isqrt, msin, qmul, qsin};
pub use fixedmath::Sample as SampleFxP;
pub use fixedmath::Scalar as ScalarFxP;
pub use fixedmath::SumScalar as SumScalarFxP;
pub use fixedmath::WideSample as WideSampleFxP;
pub use fixedmath::WideScalar as WideScalarFxP;
