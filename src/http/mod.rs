pub mod header;

mod bytestr;
mod method;

pub use bytes::Bytes;
pub use bytestr::ByteStr;
pub use header::{normalize_header_name, HeaderCase, Headers};
pub use method::Method;
