//! the test_utils folder here will share utils or test components between unit
//! tests in every module
mod common;
mod page_server;

pub use common::*;
pub use page_server::*;
