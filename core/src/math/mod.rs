pub mod angles;
pub mod matrix;

pub use angles::AngleHelper;
pub use matrix::MatrixHelper;
