//! # rbmarshal
//!
//! A small reader and writer for Ruby's `Marshal` binary serialization
//! format, version 4.8.
//!
//! ## Shape
//!
//! - **Decode**: a byte slice goes in, an owned [`Value`] tree comes out.
//!   The format's symbol and object back-references are resolved during
//!   the call by deep copy, so the result is a plain forest with no
//!   sharing and no lifetimes.
//! - **Encode**: a [`Value`] tree goes in, a byte vector comes out, with
//!   every shared subtree written in full (links are an optimization the
//!   grammar does not require).
//! - **Trees are plain data**: `Clone` deep-copies, `==` is structural
//!   (order-insensitive for hashes and objects), `Display` renders a
//!   human-readable form.
//!
//! ## Format
//!
//! Documents start with the version bytes `04 08`, then one tagged value.
//! All integers on the wire use the format's variable-length framing; all
//! strings are length-prefixed byte runs. Regex values are not supported.

pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod encoding;
pub mod types;
pub mod value;

mod print;

pub use types::Error;
pub use types::Result;
pub use types::Tag;

pub use value::Bignum;
pub use value::Hash;
pub use value::Object;
pub use value::RString;
pub use value::Sign;
pub use value::UserDef;
pub use value::Value;

pub use cursor::Cursor;
pub use decoder::decode;
pub use encoder::encode;
pub use encoding::Encoding;
