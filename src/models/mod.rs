//! Data model: saved requests, recorded runs and the last response.

mod request;
mod run;

pub use request::{guess_name, is_safe_id, utc_timestamp, AuthLocation, AuthType, Method, Request, TIMESTAMP_FORMAT};
pub use run::{LastResponse, NewRun, Run};
