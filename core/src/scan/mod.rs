pub mod observation;
pub mod vendor;

pub use observation::{Observation, Security};
pub use vendor::VendorDb;
