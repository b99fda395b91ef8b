//! Recursive decoder and the per-call back-reference tables.

use crate::cursor::Cursor;
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

/// Decodes one marshalled document: the two-byte version prefix followed
/// by a single top-level value. Trailing bytes are ignored.
pub fn decode(data: &[u8]) -> Result<Value> {
    let mut decoder = Decoder::new(data);
    decoder.check_version()?;
    decoder.decode_value()
}

/// Holds the cursor and the back-reference tables for one decode call.
///
/// Both tables index values by appearance order, mirroring the tables the
/// writing side maintained. They are discarded when decoding finishes.
#[derive(Debug)]
struct Decoder<'a> {
    cursor: Cursor<'a>,
    /// Symbol names in registration order; `';'` links index into this.
    syms: Vec<Vec<u8>>,
    /// Registered values in registration order; `'@'` links index into
    /// this. A slot holds `None` while the value at that index is still
    /// being built, so containers claim their index before their children.
    objs: Vec<Option<Value>>,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            syms: Vec::new(),
            objs: Vec::new(),
        }
    }

    fn check_version(&mut self) -> Result<()> {
        let major = self.cursor.read_byte()?;
        let minor = self.cursor.read_byte()?;
        if major != 4 || minor != 8 {
            return Err(Error::BadVersion { major, minor });
        }
        Ok(())
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let byte = self.cursor.read_byte()?;
        Tag::from_u8(byte).ok_or(Error::InvalidTag(byte))
    }

    /// A non-negative long, for lengths and counts.
    fn read_length(&mut self) -> Result<usize> {
        let n = self.cursor.read_long()?;
        if n < 0 {
            return Err(Error::BadLength(n));
        }
        Ok(n as usize)
    }

    fn decode_value(&mut self) -> Result<Value> {
        match self.read_tag()? {
            Tag::Nil => Ok(Value::Nil),
            Tag::True => Ok(Value::Boolean(true)),
            Tag::False => Ok(Value::Boolean(false)),
            Tag::Integer => self.decode_integer(),
            Tag::Bignum => self.decode_bignum(),
            Tag::Float => self.decode_float(),
            Tag::Symbol => self.decode_symbol(),
            Tag::Symlink => self.decode_symlink(),
            Tag::Array => self.decode_array(),
            Tag::Hash => self.decode_hash(false),
            Tag::HashDefault => self.decode_hash(true),
            Tag::RawString => self.decode_raw_string(),
            Tag::Ivar => self.decode_ivar(),
            Tag::Class => self.decode_class(),
            Tag::Module => self.decode_module(),
            Tag::Object => self.decode_object(),
            Tag::UserDef => self.decode_userdef(),
            Tag::ObjectRef => self.decode_object_ref(),
            Tag::Regex => Err(Error::Unsupported(Tag::Regex as u8)),
        }
    }

    /// Appends a completed value to the object table and hands it back.
    fn register(&mut self, value: Value) -> Result<Value> {
        self.objs.push(Some(value.clone()));
        Ok(value)
    }

    /// Claims the next object-table index before a container's children
    /// are decoded, keeping index assignment aligned with the writer.
    fn reserve(&mut self) -> usize {
        self.objs.push(None);
        self.objs.len() - 1
    }

    fn fill(&mut self, slot: usize, value: &Value) {
        self.objs[slot] = Some(value.clone());
    }

    fn decode_integer(&mut self) -> Result<Value> {
        let n = self.cursor.read_long()?;
        match i32::try_from(n) {
            Ok(n) => Ok(Value::Integer(n)),
            Err(_) => Err(Error::IntegerRange(n)),
        }
    }

    fn decode_bignum(&mut self) -> Result<Value> {
        let sign = match self.cursor.read_byte()? {
            b'+' => Sign::Positive,
            b'-' => Sign::Negative,
            other => return Err(Error::BadSign(other)),
        };
        let half = self.read_length()?;
        let bytes = self.cursor.read_bytes(half * 2)?.to_vec();
        self.register(Value::Bignum(Bignum { sign, bytes }))
    }

    fn decode_float(&mut self) -> Result<Value> {
        let raw = self.cursor.read_byte_run()?;
        let text = std::str::from_utf8(raw).map_err(|_| Error::BadFloat)?;
        let value = text.parse::<f64>().map_err(|_| Error::BadFloat)?;
        Ok(Value::Float(value))
    }

    fn decode_symbol(&mut self) -> Result<Value> {
        let name = self.cursor.read_byte_run()?.to_vec();
        self.syms.push(name.clone());
        Ok(Value::Symbol(name))
    }

    fn decode_symlink(&mut self) -> Result<Value> {
        let index = self.cursor.read_long()?;
        let name = usize::try_from(index)
            .ok()
            .and_then(|i| self.syms.get(i))
            .ok_or(Error::BadLink(index))?;
        Ok(Value::Symbol(name.clone()))
    }

    fn decode_array(&mut self) -> Result<Value> {
        let slot = self.reserve();
        let len = self.read_length()?;
        let mut values = Vec::new();
        for _ in 0..len {
            values.push(self.decode_value()?);
        }
        let value = Value::Array(values);
        self.fill(slot, &value);
        Ok(value)
    }

    fn decode_hash(&mut self, has_default: bool) -> Result<Value> {
        let slot = self.reserve();
        let len = self.read_length()?;
        let mut pairs = Vec::new();
        for _ in 0..len {
            let key = self.decode_value()?;
            let value = self.decode_value()?;
            pairs.push((key, value));
        }
        let default = if has_default {
            Some(Box::new(self.decode_value()?))
        } else {
            None
        };
        let value = Value::Hash(Hash { pairs, default });
        self.fill(slot, &value);
        Ok(value)
    }

    /// Encodingless string form from pre-1.9 writers.
    fn decode_raw_string(&mut self) -> Result<Value> {
        let data = self.cursor.read_byte_run()?.to_vec();
        self.register(Value::String(RString {
            data,
            ivars: Vec::new(),
            encoding: Encoding::Ascii8Bit,
        }))
    }

    fn decode_ivar(&mut self) -> Result<Value> {
        let slot = self.reserve();
        match self.cursor.read_byte()? {
            b'"' => {}
            b'/' => return Err(Error::Unsupported(Tag::Regex as u8)),
            other => return Err(Error::InvalidTag(other)),
        }
        let data = self.cursor.read_byte_run()?.to_vec();
        let count = self.read_length()?;
        let mut encoding = Encoding::Ascii8Bit;
        let mut ivars = Vec::new();
        for _ in 0..count {
            let name = self.decode_symbol_value()?;
            let value = self.decode_value()?;
            match designated_encoding(&name, &value)? {
                Some(designated) => encoding = designated,
                None => ivars.push((name, value)),
            }
        }
        let value = Value::String(RString {
            data,
            ivars,
            encoding,
        });
        self.fill(slot, &value);
        Ok(value)
    }

    fn decode_class(&mut self) -> Result<Value> {
        let name = self.cursor.read_byte_run()?.to_vec();
        self.register(Value::Class(name))
    }

    fn decode_module(&mut self) -> Result<Value> {
        let name = self.cursor.read_byte_run()?.to_vec();
        self.register(Value::Module(name))
    }

    fn decode_object(&mut self) -> Result<Value> {
        let class = self.decode_symbol_value()?;
        let count = self.read_length()?;
        let mut ivars = Vec::new();
        for _ in 0..count {
            let name = self.decode_symbol_value()?;
            let value = self.decode_value()?;
            ivars.push((name, value));
        }
        // Objects never join the object table in this codec, so documents
        // cannot point back at them.
        Ok(Value::Object(Object { class, ivars }))
    }

    fn decode_userdef(&mut self) -> Result<Value> {
        let class = self.decode_symbol_value()?;
        let size = self.read_length()?;
        let data = self.cursor.read_bytes(size)?.to_vec();
        Ok(Value::UserDef(UserDef { class, data }))
    }

    fn decode_object_ref(&mut self) -> Result<Value> {
        let index = self.cursor.read_long()?;
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.objs.get(i))
            .ok_or(Error::BadLink(index))?;
        // A `None` slot means the reference points into a container that
        // is still being decoded; nothing coherent exists to copy yet.
        slot.clone().ok_or(Error::BadLink(index))
    }

    /// Decodes a value that must come out as a symbol, returning its name.
    fn decode_symbol_value(&mut self) -> Result<Vec<u8>> {
        match self.decode_value()? {
            Value::Symbol(name) => Ok(name),
            _ => Err(Error::NotASymbol),
        }
    }
}

/// Recognizes the `E` / `encoding` instance variables, which designate a
/// string's encoding rather than carry user data.
fn designated_encoding(name: &[u8], value: &Value) -> Result<Option<Encoding>> {
    match name {
        b"E" => match value {
            Value::Boolean(true) => Ok(Some(Encoding::Utf8)),
            Value::Boolean(false) => Ok(Some(Encoding::UsAscii)),
            _ => Err(Error::UnknownEncoding),
        },
        b"encoding" => {
            let raw = match value {
                Value::String(string) => &string.data,
                Value::Symbol(name) => name,
                _ => return Err(Error::UnknownEncoding),
            };
            Encoding::from_wire(raw).map(Some).ok_or(Error::UnknownEncoding)
        }
        _ => Ok(None),
    }
}
