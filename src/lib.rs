pub use cmdforge_core::*;
