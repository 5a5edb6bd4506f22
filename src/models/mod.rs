pub mod job;
pub mod site;
pub mod state;

pub use job::*;
pub use site::*;
pub use state::*;
