//! Market shock drivers.
//!
//! Each driver contributes an AR(1) autocorrelated log-shock series; the
//! registry combines them with fixed weights and exponentiates the sum to
//! obtain strictly positive multiplicative factors centred near 1.
//!
//! ```text
//! x_d[0] = e_d[0]
//! x_d[t] = 0.7 * x_d[t-1] + 0.3 * e_d[t]
//! shock[t] = exp( sum_d w_d * x_d[t] )
//! ```
//!
//! Innovation sampling lives in the engine; this module only transforms
//! supplied innovations, so tests can inject deterministic streams.

mod driver;

pub use driver::{
    ar1_filter, RegistryError, ShockDriver, ShockRegistry, AR_INNOVATION_WEIGHT, AR_PERSISTENCE,
};
