//! # Random Number Generation
//!
//! - [`PathRng`]: seeded `StdRng` wrapper drawing standard normal variates
//! - [`derive_path_seed`]: per-(scenario, path) seed derivation
//!
//! ```rust
//! use adoption_engine::rng::{derive_path_seed, PathRng};
//!
//! let mut rng = PathRng::from_seed(derive_path_seed(42, 1, 0));
//! let mut buffer = vec![0.0; 30];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;
mod seed;

pub use prng::PathRng;
pub use seed::{derive_path_seed, splitmix64};
