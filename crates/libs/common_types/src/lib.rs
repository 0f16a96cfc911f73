#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod delivery;
mod image_format;
mod method_call;
mod thumbnail_request;

pub use delivery::*;
pub use image_format::*;
pub use method_call::*;
pub use thumbnail_request::*;
