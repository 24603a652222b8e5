//! Request correlation.

mod request_id;

pub use request_id::echo_request_id;
