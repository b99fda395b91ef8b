//! Encoder: walks a value tree and emits its wire form.
//!
//! Shared subtrees are emitted in full rather than as back-references; the
//! grammar treats links as an optimization, so full emission stays valid
//! and keeps the writer table-free.

use crate::encoding::Encoding;
use crate::types::Error;
use crate::types::Result;
use crate::types::Tag;
use crate::value::Bignum;
use crate::value::Hash;
use crate::value::Object;
use crate::value::RString;
use crate::value::Sign;
use crate::value::UserDef;
use crate::value::Value;

/// Encodes one value as a complete marshalled document.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new();
    encoder.buf.push(4);
    encoder.buf.push(8);
    encoder.encode_value(value)?;
    Ok(encoder.buf)
}

pub(crate) struct Encoder {
    pub(crate) buf: Vec<u8>,
}

impl Encoder {
    pub(crate) fn new() -> Self {
        Self { buf: Vec::new() }
    }

    #[inline]
    fn write_tag(&mut self, tag: Tag) {
        self.buf.push(tag as u8);
    }

    /// Writes the variable-length integer in its minimal form: single-byte
    /// bands for 0, 1..=122 and -123..=-1, otherwise the smallest payload
    /// width in 1..=4 whose magnitude fits, negatives biased by
    /// `2^(8 * width)`.
    pub(crate) fn write_long(&mut self, n: i64) {
        if n == 0 {
            self.buf.push(0);
        } else if (1..=122).contains(&n) {
            self.buf.push((n + 5) as u8);
        } else if (-123..=-1).contains(&n) {
            self.buf.push((n + 0xFB) as u8);
        } else if n > 0 {
            let width = byte_width(n as u64);
            self.buf.push(width as u8);
            self.write_le(n, width);
        } else {
            let width = byte_width(n.unsigned_abs());
            self.buf.push((0x100 - width) as u8);
            self.write_le(n + (1i64 << (8 * width)), width);
        }
    }

    fn write_le(&mut self, n: i64, width: usize) {
        let bytes = (n as u64).to_le_bytes();
        self.buf.extend_from_slice(&bytes[..width]);
    }

    /// A length or count; the wire cannot frame anything longer.
    fn write_length(&mut self, n: usize) -> Result<()> {
        if n > i32::MAX as usize {
            return Err(Error::TooLarge(n));
        }
        self.write_long(n as i64);
        Ok(())
    }

    fn write_byte_run(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_length(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn write_symbol(&mut self, name: &[u8]) -> Result<()> {
        self.write_tag(Tag::Symbol);
        self.write_byte_run(name)
    }

    pub(crate) fn encode_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Nil => {
                self.write_tag(Tag::Nil);
                Ok(())
            }
            Value::Boolean(true) => {
                self.write_tag(Tag::True);
                Ok(())
            }
            Value::Boolean(false) => {
                self.write_tag(Tag::False);
                Ok(())
            }
            Value::Integer(n) => {
                self.write_tag(Tag::Integer);
                self.write_long(*n as i64);
                Ok(())
            }
            Value::Bignum(bignum) => self.encode_bignum(bignum),
            Value::Float(x) => self.encode_float(*x),
            Value::Symbol(name) => self.write_symbol(name),
            Value::Array(values) => self.encode_array(values),
            Value::Hash(hash) => self.encode_hash(hash),
            Value::String(string) => self.encode_string(string),
            Value::Class(name) => {
                self.write_tag(Tag::Class);
                self.write_byte_run(name)
            }
            Value::Module(name) => {
                self.write_tag(Tag::Module);
                self.write_byte_run(name)
            }
            Value::Object(object) => self.encode_object(object),
            Value::UserDef(userdef) => self.encode_userdef(userdef),
        }
    }

    fn encode_bignum(&mut self, bignum: &Bignum) -> Result<()> {
        // The wire carries the half-length, so an odd magnitude cannot be
        // framed.
        if bignum.bytes.len() % 2 != 0 {
            return Err(Error::OddBignum(bignum.bytes.len()));
        }
        self.write_tag(Tag::Bignum);
        self.buf.push(match bignum.sign {
            Sign::Positive => b'+',
            Sign::Negative => b'-',
        });
        self.write_length(bignum.bytes.len() / 2)?;
        self.buf.extend_from_slice(&bignum.bytes);
        Ok(())
    }

    fn encode_float(&mut self, x: f64) -> Result<()> {
        self.write_tag(Tag::Float);
        let text = if x.is_nan() {
            "nan".to_string()
        } else if x.is_infinite() {
            (if x > 0.0 { "inf" } else { "-inf" }).to_string()
        } else {
            x.to_string()
        };
        self.write_byte_run(text.as_bytes())
    }

    fn encode_array(&mut self, values: &[Value]) -> Result<()> {
        self.write_tag(Tag::Array);
        self.write_length(values.len())?;
        for value in values {
            self.encode_value(value)?;
        }
        Ok(())
    }

    fn encode_hash(&mut self, hash: &Hash) -> Result<()> {
        self.write_tag(if hash.default.is_some() {
            Tag::HashDefault
        } else {
            Tag::Hash
        });
        self.write_length(hash.pairs.len())?;
        for (key, value) in &hash.pairs {
            self.encode_value(key)?;
            self.encode_value(value)?;
        }
        if let Some(default) = &hash.default {
            self.encode_value(default)?;
        }
        Ok(())
    }

    /// Strings always go out wrapped in an ivar frame with the encoding
    /// designator pair leading any other instance variables.
    fn encode_string(&mut self, string: &RString) -> Result<()> {
        self.write_tag(Tag::Ivar);
        self.write_tag(Tag::RawString);
        self.write_byte_run(&string.data)?;
        let designator = encoding_pair(string.encoding);
        let count = string.ivars.len() + designator.is_some() as usize;
        self.write_length(count)?;
        if let Some((name, value)) = designator {
            self.write_symbol(name)?;
            self.encode_value(&value)?;
        }
        for (name, value) in &string.ivars {
            self.write_symbol(name)?;
            self.encode_value(value)?;
        }
        Ok(())
    }

    fn encode_object(&mut self, object: &Object) -> Result<()> {
        self.write_tag(Tag::Object);
        self.write_symbol(&object.class)?;
        self.write_length(object.ivars.len())?;
        for (name, value) in &object.ivars {
            self.write_symbol(name)?;
            self.encode_value(value)?;
        }
        Ok(())
    }

    fn encode_userdef(&mut self, userdef: &UserDef) -> Result<()> {
        self.write_tag(Tag::UserDef);
        self.write_symbol(&userdef.class)?;
        self.write_byte_run(&userdef.data)
    }
}

/// The instance-variable pair designating a string's encoding on the wire:
/// `E => true/false` for the two common cases, `encoding => name` for the
/// rest, nothing for binary strings.
fn encoding_pair(encoding: Encoding) -> Option<(&'static [u8], Value)> {
    match encoding {
        Encoding::Ascii8Bit => None,
        Encoding::Utf8 => Some((b"E", Value::Boolean(true))),
        Encoding::UsAscii => Some((b"E", Value::Boolean(false))),
        other => Some((
            b"encoding",
            Value::binary(other.name().as_bytes()),
        )),
    }
}

/// Smallest payload width in 1..=4 that holds the magnitude.
fn byte_width(magnitude: u64) -> usize {
    if magnitude <= 0xFF {
        1
    } else if magnitude <= 0xFFFF {
        2
    } else if magnitude <= 0xFF_FFFF {
        3
    } else {
        4
    }
}
