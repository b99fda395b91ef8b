//! Core types for the Marshal 4.8 wire format

/// One-byte type tag introducing every value on the wire.
///
/// The tags are printable ASCII, a quirk of the format.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Nil = b'0',
    True = b'T',
    False = b'F',
    Integer = b'i',
    Bignum = b'l',
    Float = b'f',
    Symbol = b':',
    Symlink = b';',
    Array = b'[',
    Hash = b'{',
    HashDefault = b'}',
    /// Encodingless string from pre-1.9 writers. Accepted on decode,
    /// never emitted; also the inner tag of an ivar-wrapped string.
    RawString = b'"',
    Ivar = b'I',
    Class = b'c',
    Module = b'm',
    Object = b'o',
    UserDef = b'u',
    ObjectRef = b'@',
    Regex = b'/',
}

impl Tag {
    pub const fn from_u8(b: u8) -> Option<Self> {
        match b {
            b'0' => Some(Tag::Nil),
            b'T' => Some(Tag::True),
            b'F' => Some(Tag::False),
            b'i' => Some(Tag::Integer),
            b'l' => Some(Tag::Bignum),
            b'f' => Some(Tag::Float),
            b':' => Some(Tag::Symbol),
            b';' => Some(Tag::Symlink),
            b'[' => Some(Tag::Array),
            b'{' => Some(Tag::Hash),
            b'}' => Some(Tag::HashDefault),
            b'"' => Some(Tag::RawString),
            b'I' => Some(Tag::Ivar),
            b'c' => Some(Tag::Class),
            b'm' => Some(Tag::Module),
            b'o' => Some(Tag::Object),
            b'u' => Some(Tag::UserDef),
            b'@' => Some(Tag::ObjectRef),
            b'/' => Some(Tag::Regex),
            _ => None,
        }
    }
}

/// Decoding, encoding and access errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer exhausted while reading.
    Truncated,
    /// Byte does not correspond to a valid type tag.
    InvalidTag(u8),
    /// Document does not begin with the 4.8 version prefix.
    BadVersion { major: u8, minor: u8 },
    /// A length field decoded to a negative value.
    BadLength(i64),
    /// An integer payload does not fit the fixnum range.
    IntegerRange(i64),
    /// Bignum sign byte is not `+` or `-`.
    BadSign(u8),
    /// Bignum magnitude with an odd byte count cannot be framed.
    OddBignum(usize),
    /// Float text did not parse as a decimal number.
    BadFloat,
    /// Symbol or object back-reference index outside the table.
    BadLink(i64),
    /// A class name or instance-variable key was not a symbol.
    NotASymbol,
    /// Encoding designator names an encoding missing from the table.
    UnknownEncoding,
    /// Regex values are not supported by this codec.
    Unsupported(u8),
    /// Blob or container length exceeds what the wire can frame.
    TooLarge(usize),
    /// Accessor applied to the wrong variant.
    TypeMismatch,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidTag(b) => write!(f, "invalid type tag: {:#04x}", b),
            Error::BadVersion { major, minor } => {
                write!(f, "unsupported format version {}.{}", major, minor)
            }
            Error::BadLink(i) => write!(f, "back-reference index {} out of range", i),
            Error::Unsupported(b) => write!(f, "unsupported value type: {:#04x}", b),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
