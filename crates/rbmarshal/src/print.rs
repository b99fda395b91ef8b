//! Human-readable rendering of value trees.
//!
//! The output is for eyeballing decoded documents; it is not a stable
//! format and byte strings are rendered lossily as UTF-8.

use std::fmt;

use crate::value::Sign;
use crate::value::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bignum(b) => {
                let sign = match b.sign {
                    Sign::Positive => '+',
                    Sign::Negative => '-',
                };
                write!(f, "{}bignum(", sign)?;
                for (i, byte) in b.bytes.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "0x{:02X}", byte)?;
                }
                write!(f, ")")
            }
            Value::Symbol(name) => write!(f, ":{}", String::from_utf8_lossy(name)),
            Value::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Value::Hash(hash) => {
                write!(f, "{{")?;
                for (i, (key, value)) in hash.pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}=>{}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::String(string) => {
                write!(f, "\"{}\"", String::from_utf8_lossy(&string.data))
            }
            Value::Class(name) | Value::Module(name) => {
                write!(f, "{}", String::from_utf8_lossy(name))
            }
            Value::Object(object) => {
                write!(f, "#<{}", String::from_utf8_lossy(&object.class))?;
                for (i, (name, value)) in object.ivars.iter().enumerate() {
                    write!(f, "{}", if i > 0 { ", " } else { " " })?;
                    write!(f, "{}={}", String::from_utf8_lossy(name), value)?;
                }
                write!(f, ">")
            }
            Value::UserDef(userdef) => {
                write!(
                    f,
                    "#<{} ({} bytes)>",
                    String::from_utf8_lossy(&userdef.class),
                    userdef.data.len()
                )
            }
        }
    }
}
