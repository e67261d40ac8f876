mod clause;
mod command;
mod db_type;
mod dialect;
mod driver;
mod error;
mod factory;
mod parameter;
pub mod rewrite;
mod util;
mod value;

pub use ::anyhow::Context;
pub use clause::*;
pub use command::*;
pub use db_type::*;
pub use dialect::*;
pub use driver::*;
pub use error::*;
pub use factory::*;
pub use parameter::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
