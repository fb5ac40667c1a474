//! Build and manipulate outgoing HTTP responses.
pub use into_response::IntoResponse;
pub use response_::{Response, ResponseHead};

pub mod body;
mod into_response;
mod response_;
