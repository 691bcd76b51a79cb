//! Row-major integer matrices and the column-parallel kernels that cyclically
//! shift their rows downward.

mod error;
pub use error::*;

mod matrix;
pub use matrix::*;

mod launch;
pub use launch::*;

mod rotate;
pub use rotate::*;

mod device;
pub use device::*;
