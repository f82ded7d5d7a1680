mod api;
mod limits;

pub use api::*;
pub use limits::*;
