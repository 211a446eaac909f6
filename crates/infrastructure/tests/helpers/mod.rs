#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod dns_server_mock;

pub use builders::{encode_name, query, read_record_ttls, response, TYPE_A, TYPE_AAAA};
pub use dns_server_mock::MockUpstream;
