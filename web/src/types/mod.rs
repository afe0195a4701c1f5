//! Wire types for the web API.

mod requests;
mod responses;

pub use requests::*;
pub use responses::*;
