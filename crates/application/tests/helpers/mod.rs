#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_ports;

pub use mock_ports::{FixedClock, MockResponseCache};
pub use packets::{query, read_record_ttls, ResponseBuilder};
