pub extern crate euclid;
pub extern crate serde;
pub extern crate serde_json;
pub extern crate uuid;

mod drawing_log;
mod fan_out;
mod message;
mod types;

pub use drawing_log::*;
pub use fan_out::*;
pub use message::*;
pub use types::*;
