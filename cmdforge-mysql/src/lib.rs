mod dialect;
mod driver;
mod prepare;

pub use dialect::*;
pub use driver::*;
pub(crate) use prepare::*;
