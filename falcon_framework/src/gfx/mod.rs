//! GPU front end: typed handles, descriptors, the host backend interface,
//! the resource factory and the scoped command builder.

pub mod backend;
pub mod command;
pub mod desc;
pub mod factory;
pub mod handle;

pub use backend::*;
pub use command::*;
pub use desc::*;
pub use factory::*;
pub use handle::*;

// Mock backend for tests (no GPU required)
#[cfg(test)]
pub mod mock_backend;
