//! The in-memory value tree produced and consumed by the codec.
//!
//! Every variant owns its payload outright: the tree is a forest, children
//! belong to exactly one parent, and back-references are materialized as
//! deep copies at decode time. `Clone` is therefore a deep clone and `Drop`
//! releases a whole subtree.

use crate::encoding::Encoding;
use crate::types::Error;
use crate::types::Result;

/// Sign of a bignum magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

/// Arbitrary-precision integer payload.
///
/// `bytes` is the little-endian magnitude exactly as marshalled: the length
/// is always even (a framing requirement) and leading zero bytes are kept,
/// never re-normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bignum {
    pub sign: Sign,
    pub bytes: Vec<u8>,
}

/// Ordered key/value container.
///
/// Insertion order is preserved and round-trips through the wire form;
/// equality is order-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Hash {
    pub pairs: Vec<(Value, Value)>,
    pub default: Option<Box<Value>>,
}

impl Hash {
    fn find(&self, key: &Value) -> Option<usize> {
        self.pairs.iter().position(|(k, _)| k == key)
    }

    /// Returns the value stored under a structurally-equal key, falling
    /// back to the hash default.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self.find(key) {
            Some(i) => Some(&self.pairs[i].1),
            None => self.default.as_deref(),
        }
    }

    /// Inserts a pair, or replaces both the stored key and the stored
    /// value when a structurally-equal key already exists. The new key
    /// takes the slot so later lookups see a single owner.
    pub fn set(&mut self, key: Value, value: Value) {
        match self.find(&key) {
            Some(i) => self.pairs[i] = (key, value),
            None => self.pairs.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PartialEq for Hash {
    /// Order-insensitive: every left pair must find a structurally-equal
    /// key on the right with an equal value. The default does not stand in
    /// for missing keys here.
    fn eq(&self, other: &Self) -> bool {
        if self.pairs.len() != other.pairs.len() || self.default != other.default {
            return false;
        }
        self.pairs
            .iter()
            .all(|(k, v)| other.find(k).is_some_and(|i| &other.pairs[i].1 == v))
    }
}

/// String payload plus instance variables and the derived encoding tag.
///
/// The `E` / `encoding` designator pairs are folded into `encoding` when
/// decoding and synthesized back when encoding; `ivars` carries whatever
/// other instance variables the string had.
#[derive(Debug, Clone, PartialEq)]
pub struct RString {
    pub data: Vec<u8>,
    pub ivars: Vec<(Vec<u8>, Value)>,
    pub encoding: Encoding,
}

/// A marshalled object: class-name symbol plus instance-variable pairs.
#[derive(Debug, Clone)]
pub struct Object {
    pub class: Vec<u8>,
    pub ivars: Vec<(Vec<u8>, Value)>,
}

impl Object {
    /// Linear scan for the instance variable with a byte-equal name.
    pub fn get(&self, name: &[u8]) -> Option<&Value> {
        self.ivars.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

impl PartialEq for Object {
    /// Order-insensitive over instance-variable names.
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.ivars.len() == other.ivars.len()
            && self.ivars.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

/// Opaque `_dump` payload of a class with custom marshalling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDef {
    pub class: Vec<u8>,
    pub data: Vec<u8>,
}

/// A decoded Marshal value.
///
/// Symbol, class and module names are raw byte runs; the format never
/// validates them as UTF-8 and neither does this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i32),
    Bignum(Bignum),
    Float(f64),
    Symbol(Vec<u8>),
    Array(Vec<Value>),
    Hash(Hash),
    String(RString),
    Class(Vec<u8>),
    Module(Vec<u8>),
    Object(Object),
    UserDef(UserDef),
}

impl Value {
    pub fn symbol(name: impl Into<Vec<u8>>) -> Value {
        Value::Symbol(name.into())
    }

    /// A string with the given encoding tag and no instance variables.
    pub fn string(data: impl Into<Vec<u8>>, encoding: Encoding) -> Value {
        Value::String(RString {
            data: data.into(),
            ivars: Vec::new(),
            encoding,
        })
    }

    /// An encodingless binary string.
    pub fn binary(data: impl Into<Vec<u8>>) -> Value {
        Value::string(data, Encoding::Ascii8Bit)
    }

    pub fn array() -> Value {
        Value::Array(Vec::new())
    }

    pub fn hash(default: Option<Value>) -> Value {
        Value::Hash(Hash {
            pairs: Vec::new(),
            default: default.map(Box::new),
        })
    }

    pub fn bignum(sign: Sign, bytes: impl Into<Vec<u8>>) -> Value {
        Value::Bignum(Bignum {
            sign,
            bytes: bytes.into(),
        })
    }

    pub fn class(name: impl Into<Vec<u8>>) -> Value {
        Value::Class(name.into())
    }

    pub fn module(name: impl Into<Vec<u8>>) -> Value {
        Value::Module(name.into())
    }

    /// An object of the named class with no instance variables yet.
    pub fn object(class: impl Into<Vec<u8>>) -> Value {
        Value::Object(Object {
            class: class.into(),
            ivars: Vec::new(),
        })
    }

    pub fn userdef(class: impl Into<Vec<u8>>, data: impl Into<Vec<u8>>) -> Value {
        Value::UserDef(UserDef {
            class: class.into(),
            data: data.into(),
        })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Bignum(_) => "bignum",
            Value::Float(_) => "float",
            Value::Symbol(_) => "symbol",
            Value::Array(_) => "array",
            Value::Hash(_) => "hash",
            Value::String(_) => "string",
            Value::Class(_) => "class",
            Value::Module(_) => "module",
            Value::Object(_) => "object",
            Value::UserDef(_) => "userdef",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_int(&self) -> Result<i32> {
        match self {
            Value::Integer(n) => Ok(*n),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(x) => Ok(*x),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_symbol(&self) -> Result<&[u8]> {
        match self {
            Value::Symbol(name) => Ok(name),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(values) => Ok(values),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(values) => Ok(values),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_hash(&self) -> Result<&Hash> {
        match self {
            Value::Hash(hash) => Ok(hash),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_hash_mut(&mut self) -> Result<&mut Hash> {
        match self {
            Value::Hash(hash) => Ok(hash),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_string(&self) -> Result<&RString> {
        match self {
            Value::String(string) => Ok(string),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Value::Object(object) => Ok(object),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(object) => Ok(object),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn as_userdef(&self) -> Result<&UserDef> {
        match self {
            Value::UserDef(userdef) => Ok(userdef),
            _ => Err(Error::TypeMismatch),
        }
    }
}
