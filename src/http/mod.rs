//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the page and asset handlers, decoupled
//! from routing.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::parse_range_header;
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_500_response, build_html_response, build_options_response,
};
