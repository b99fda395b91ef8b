use rbmarshal::Encoding;
use rbmarshal::Error;
use rbmarshal::Result;
use rbmarshal::Sign;
use rbmarshal::Value;
use rbmarshal::decode;
use rbmarshal::encode;

/// Prepends the version bytes every document starts with.
fn doc(body: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0x04, 0x08];
    bytes.extend_from_slice(body);
    bytes
}

// ============================================================================
//  FRAMING
// ============================================================================

#[test]
fn test_version_prefix_is_checked() {
    match decode(&[0x04, 0x07, 0x30]) {
        Err(Error::BadVersion { major: 4, minor: 7 }) => {}
        other => panic!("expected BadVersion, got {:?}", other),
    }
    match decode(&[0x05, 0x08, 0x30]) {
        Err(Error::BadVersion { major: 5, minor: 8 }) => {}
        other => panic!("expected BadVersion, got {:?}", other),
    }
    match decode(&[0x04]) {
        Err(Error::Truncated) => {}
        other => panic!("expected Truncated, got {:?}", other),
    }
}

#[test]
fn test_empty_document_is_truncated() {
    assert_eq!(decode(&doc(b"")), Err(Error::Truncated));
}

#[test]
fn test_unknown_tag_fails() {
    assert_eq!(decode(&doc(b"X")), Err(Error::InvalidTag(b'X')));
}

#[test]
fn test_trailing_bytes_are_ignored() -> Result<()> {
    let mut bytes = doc(&[0x30]);
    bytes.extend_from_slice(b"junk");
    assert_eq!(decode(&bytes)?, Value::Nil);
    Ok(())
}

// ============================================================================
//  WIRE SCENARIOS
// ============================================================================

#[test]
fn test_nil_document() -> Result<()> {
    let bytes = doc(&[0x30]);
    assert_eq!(decode(&bytes)?, Value::Nil);
    assert_eq!(encode(&Value::Nil)?, bytes);
    Ok(())
}

#[test]
fn test_boolean_documents() -> Result<()> {
    assert_eq!(decode(&doc(&[0x54]))?, Value::Boolean(true));
    assert_eq!(decode(&doc(&[0x46]))?, Value::Boolean(false));
    assert_eq!(encode(&Value::Boolean(true))?, doc(&[0x54]));
    assert_eq!(encode(&Value::Boolean(false))?, doc(&[0x46]));
    Ok(())
}

#[test]
fn test_integer_one() -> Result<()> {
    let bytes = doc(&[0x69, 0x06]);
    assert_eq!(decode(&bytes)?, Value::Integer(1));
    assert_eq!(encode(&Value::Integer(1))?, bytes);
    Ok(())
}

#[test]
fn test_integer_one_twenty_three() -> Result<()> {
    let bytes = doc(&[0x69, 0x01, 0x7B]);
    assert_eq!(decode(&bytes)?, Value::Integer(123));
    assert_eq!(encode(&Value::Integer(123))?, bytes);
    Ok(())
}

#[test]
fn test_integer_out_of_fixnum_range_fails() {
    // Four little-endian payload bytes can express values no fixnum uses.
    let bytes = doc(&[0x69, 0x04, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(decode(&bytes), Err(Error::IntegerRange(0xFFFF_FFFF)));
}

#[test]
fn test_array_of_two_ones() -> Result<()> {
    let bytes = doc(&[0x5B, 0x07, 0x69, 0x06, 0x69, 0x06]);
    let expected = Value::Array(vec![Value::Integer(1), Value::Integer(1)]);
    assert_eq!(decode(&bytes)?, expected);
    assert_eq!(encode(&expected)?, bytes);
    Ok(())
}

#[test]
fn test_empty_array() -> Result<()> {
    let bytes = doc(&[0x5B, 0x00]);
    assert_eq!(decode(&bytes)?, Value::array());
    assert_eq!(encode(&Value::array())?, bytes);
    Ok(())
}

#[test]
fn test_empty_hash() -> Result<()> {
    let bytes = doc(&[0x7B, 0x00]);
    assert_eq!(decode(&bytes)?, Value::hash(None));
    assert_eq!(encode(&Value::hash(None))?, bytes);
    Ok(())
}

#[test]
fn test_symbol_and_symlink() -> Result<()> {
    // [:foo, :foo] with the second element linking back to cache index 0.
    let bytes = doc(&[
        0x5B, 0x07, 0x3A, 0x08, 0x66, 0x6F, 0x6F, 0x3B, 0x00,
    ]);
    let expected = Value::Array(vec![Value::symbol("foo"), Value::symbol("foo")]);
    let decoded = decode(&bytes)?;
    assert_eq!(decoded, expected);

    // Re-encoding emits both symbols in full; the tree survives unchanged.
    assert_eq!(decode(&encode(&decoded)?)?, expected);
    Ok(())
}

#[test]
fn test_utf8_string_hi() -> Result<()> {
    let bytes = doc(&[
        0x49, 0x22, 0x07, 0x68, 0x69, 0x06, 0x3A, 0x06, 0x45, 0x54,
    ]);
    let expected = Value::string("hi", Encoding::Utf8);
    assert_eq!(decode(&bytes)?, expected);
    assert_eq!(encode(&expected)?, bytes);
    Ok(())
}

// ============================================================================
//  SYMBOL AND OBJECT LINKS
// ============================================================================

#[test]
fn test_symlink_out_of_range_fails() {
    // One symbol registered, link asks for index 1.
    let bytes = doc(&[
        0x5B, 0x07, 0x3A, 0x08, 0x66, 0x6F, 0x6F, 0x3B, 0x06,
    ]);
    assert_eq!(decode(&bytes), Err(Error::BadLink(1)));
}

#[test]
fn test_symlink_with_no_symbols_fails() {
    assert_eq!(decode(&doc(&[0x3B, 0x00])), Err(Error::BadLink(0)));
}

#[test]
fn test_object_ref_materializes_a_copy() -> Result<()> {
    // ["hi", <link to index 1>]: the array claims index 0 before its
    // children, the raw string takes index 1.
    let bytes = doc(&[
        0x5B, 0x07, 0x22, 0x07, 0x68, 0x69, 0x40, 0x06,
    ]);
    let expected = Value::Array(vec![Value::binary("hi"), Value::binary("hi")]);
    assert_eq!(decode(&bytes)?, expected);
    Ok(())
}

#[test]
fn test_object_ref_to_open_container_fails() {
    // Index 0 is the array still being decoded; nothing exists to copy.
    let bytes = doc(&[0x5B, 0x06, 0x40, 0x00]);
    assert_eq!(decode(&bytes), Err(Error::BadLink(0)));
}

#[test]
fn test_object_ref_out_of_range_fails() {
    assert_eq!(decode(&doc(&[0x40, 0x06])), Err(Error::BadLink(1)));
}

// ============================================================================
//  STRINGS AND ENCODING DERIVATION
// ============================================================================

#[test]
fn test_raw_string_defaults_to_binary() -> Result<()> {
    let bytes = doc(&[0x22, 0x07, 0x68, 0x69]);
    let decoded = decode(&bytes)?;
    assert_eq!(decoded, Value::binary("hi"));
    assert_eq!(decoded.as_string()?.encoding, Encoding::Ascii8Bit);
    Ok(())
}

#[test]
fn test_ivar_string_without_pairs_is_binary() -> Result<()> {
    let bytes = doc(&[0x49, 0x22, 0x07, 0x68, 0x69, 0x00]);
    assert_eq!(decode(&bytes)?, Value::binary("hi"));
    // Binary strings re-encode without a designator pair.
    assert_eq!(encode(&Value::binary("hi"))?, bytes);
    Ok(())
}

#[test]
fn test_ivar_e_false_yields_us_ascii() -> Result<()> {
    let bytes = doc(&[
        0x49, 0x22, 0x07, 0x68, 0x69, 0x06, 0x3A, 0x06, 0x45, 0x46,
    ]);
    let expected = Value::string("hi", Encoding::UsAscii);
    assert_eq!(decode(&bytes)?, expected);
    assert_eq!(encode(&expected)?, bytes);
    Ok(())
}

#[test]
fn test_ivar_named_encoding_is_looked_up() -> Result<()> {
    // "hi" with encoding => "Shift_JIS" (the name itself rides as a raw
    // string).
    let mut body = vec![0x49, 0x22, 0x07, 0x68, 0x69, 0x06];
    body.extend_from_slice(&[0x3A, 0x0D]);
    body.extend_from_slice(b"encoding");
    body.extend_from_slice(&[0x22, 0x0E]);
    body.extend_from_slice(b"Shift_JIS");
    let bytes = doc(&body);

    let expected = Value::string("hi", Encoding::ShiftJis);
    let decoded = decode(&bytes)?;
    assert_eq!(decoded, expected);

    // The named form survives a full round trip structurally.
    assert_eq!(decode(&encode(&decoded)?)?, expected);
    Ok(())
}

#[test]
fn test_ivar_unknown_encoding_name_fails() {
    let mut body = vec![0x49, 0x22, 0x07, 0x68, 0x69, 0x06];
    body.extend_from_slice(&[0x3A, 0x0D]);
    body.extend_from_slice(b"encoding");
    body.extend_from_slice(&[0x22, 0x0A]);
    body.extend_from_slice(b"bogus");
    assert_eq!(decode(&doc(&body)), Err(Error::UnknownEncoding));
}

#[test]
fn test_ivar_extra_pairs_are_retained() -> Result<()> {
    // "hi" with (:E, true) plus an unrelated (:@tag, 5) pair.
    let mut body = vec![0x49, 0x22, 0x07, 0x68, 0x69, 0x07];
    body.extend_from_slice(&[0x3A, 0x06, 0x45, 0x54]);
    body.extend_from_slice(&[0x3A, 0x09]);
    body.extend_from_slice(b"@tag");
    body.extend_from_slice(&[0x69, 0x0A]);
    let bytes = doc(&body);

    let decoded = decode(&bytes)?;
    let string = decoded.as_string()?;
    assert_eq!(string.encoding, Encoding::Utf8);
    assert_eq!(string.ivars, vec![(b"@tag".to_vec(), Value::Integer(5))]);

    // The designator is re-synthesized in front of the retained pair.
    assert_eq!(encode(&decoded)?, bytes);
    Ok(())
}

#[test]
fn test_ivar_non_symbol_key_fails() {
    // Pair key is an integer instead of a symbol.
    let bytes = doc(&[0x49, 0x22, 0x07, 0x68, 0x69, 0x06, 0x69, 0x06, 0x54]);
    assert_eq!(decode(&bytes), Err(Error::NotASymbol));
}

// ============================================================================
//  REGEX IS UNSUPPORTED
// ============================================================================

#[test]
fn test_regex_fails() {
    assert_eq!(decode(&doc(&[0x2F])), Err(Error::Unsupported(b'/')));
    // Also as the inner type of an ivar wrapper.
    let bytes = doc(&[0x49, 0x2F, 0x07, 0x68, 0x69, 0x00]);
    assert_eq!(decode(&bytes), Err(Error::Unsupported(b'/')));
}

// ============================================================================
//  BIGNUM
// ============================================================================

#[test]
fn test_bignum_roundtrip() -> Result<()> {
    // 2^64: a ten-byte magnitude (padded to even), half-length 5 on the
    // wire.
    let bytes = doc(&[
        0x6C, 0x2B, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
        0x00,
    ]);
    let expected = Value::bignum(
        Sign::Positive,
        vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00],
    );
    assert_eq!(decode(&bytes)?, expected);
    assert_eq!(encode(&expected)?, bytes);

    let negative = Value::bignum(Sign::Negative, vec![0x39, 0x30]);
    let round = decode(&encode(&negative)?)?;
    assert_eq!(round, negative);
    Ok(())
}

#[test]
fn test_bignum_bad_sign_fails() {
    assert_eq!(
        decode(&doc(&[0x6C, 0x3F, 0x06, 0x01, 0x00])),
        Err(Error::BadSign(0x3F))
    );
}

#[test]
fn test_bignum_odd_magnitude_cannot_encode() {
    let odd = Value::bignum(Sign::Positive, vec![0x01, 0x02, 0x03]);
    assert_eq!(encode(&odd), Err(Error::OddBignum(3)));
}

// ============================================================================
//  FLOATS
// ============================================================================

#[test]
fn test_float_decode_parses_text() -> Result<()> {
    let bytes = doc(&[0x66, 0x08, 0x31, 0x2E, 0x35]);
    assert_eq!(decode(&bytes)?, Value::Float(1.5));
    assert_eq!(encode(&Value::Float(1.5))?, bytes);
    Ok(())
}

#[test]
fn test_float_special_forms() -> Result<()> {
    assert_eq!(decode(&doc(b"f\x08inf"))?, Value::Float(f64::INFINITY));
    assert_eq!(
        decode(&doc(b"f\x09-inf"))?,
        Value::Float(f64::NEG_INFINITY)
    );
    let nan = decode(&doc(b"f\x08nan"))?;
    assert!(nan.as_float()?.is_nan());

    assert_eq!(encode(&Value::Float(f64::INFINITY))?, doc(b"f\x08inf"));
    assert_eq!(
        encode(&Value::Float(f64::NEG_INFINITY))?,
        doc(b"f\x09-inf")
    );
    assert_eq!(encode(&Value::Float(f64::NAN))?, doc(b"f\x08nan"));
    Ok(())
}

#[test]
fn test_float_bad_text_fails() {
    assert_eq!(decode(&doc(b"f\x11not-a-number")), Err(Error::BadFloat));
}

// ============================================================================
//  HASHES
// ============================================================================

#[test]
fn test_hash_roundtrip_preserves_order() -> Result<()> {
    let mut value = Value::hash(None);
    value.as_hash_mut()?.set(Value::symbol("b"), Value::Integer(2));
    value.as_hash_mut()?.set(Value::symbol("a"), Value::Integer(1));

    let decoded = decode(&encode(&value)?)?;
    assert_eq!(decoded, value);
    // Wire order is insertion order, not re-canonicalized.
    assert_eq!(
        decoded.as_hash()?.pairs[0].0,
        Value::symbol("b")
    );
    Ok(())
}

#[test]
fn test_hash_with_default_uses_closing_brace_tag() -> Result<()> {
    let mut value = Value::hash(Some(Value::Integer(7)));
    value.as_hash_mut()?.set(Value::symbol("a"), Value::Integer(1));

    let bytes = encode(&value)?;
    assert_eq!(bytes[2], b'}');
    assert_eq!(decode(&bytes)?, value);
    Ok(())
}

// ============================================================================
//  CLASSES, MODULES, OBJECTS, USERDEF
// ============================================================================

#[test]
fn test_class_and_module_roundtrip() -> Result<()> {
    let class = Value::class("Net::HTTP");
    let bytes = encode(&class)?;
    assert_eq!(&bytes[..3], &[0x04, 0x08, b'c']);
    assert_eq!(decode(&bytes)?, class);

    let module = Value::module("Enumerable");
    assert_eq!(decode(&encode(&module)?)?, module);
    Ok(())
}

#[test]
fn test_object_roundtrip() -> Result<()> {
    let mut value = Value::object("Point");
    value.as_object_mut()?.ivars.push((b"@x".to_vec(), Value::Integer(3)));
    value.as_object_mut()?.ivars.push((b"@y".to_vec(), Value::Integer(4)));

    let bytes = encode(&value)?;
    assert_eq!(&bytes[..3], &[0x04, 0x08, b'o']);
    assert_eq!(decode(&bytes)?, value);
    Ok(())
}

#[test]
fn test_object_class_must_be_symbol() {
    // 'o' followed by an integer where the class-name symbol belongs.
    assert_eq!(decode(&doc(&[0x6F, 0x69, 0x06, 0x00])), Err(Error::NotASymbol));
}

#[test]
fn test_userdef_roundtrip() -> Result<()> {
    let value = Value::userdef("BigDecimal", b"18:0.123e3".to_vec());
    let bytes = encode(&value)?;
    assert_eq!(&bytes[..3], &[0x04, 0x08, b'u']);
    assert_eq!(decode(&bytes)?, value);
    Ok(())
}

#[test]
fn test_object_decode_from_wire() -> Result<()> {
    // #<Point @x=3> built byte by byte.
    let mut body = vec![0x6F];
    body.extend_from_slice(&[0x3A, 0x0A]);
    body.extend_from_slice(b"Point");
    body.push(0x06);
    body.extend_from_slice(&[0x3A, 0x07]);
    body.extend_from_slice(b"@x");
    body.extend_from_slice(&[0x69, 0x08]);

    let decoded = decode(&doc(&body))?;
    let object = decoded.as_object()?;
    assert_eq!(object.class, b"Point");
    assert_eq!(object.get(b"@x"), Some(&Value::Integer(3)));
    Ok(())
}

// ============================================================================
//  ROUND-TRIP LAWS
// ============================================================================

fn composite_value() -> Result<Value> {
    let mut hash = Value::hash(Some(Value::Nil));
    hash.as_hash_mut()?.set(
        Value::symbol("name"),
        Value::string("marshal", Encoding::Utf8),
    );
    hash.as_hash_mut()?.set(
        Value::symbol("versions"),
        Value::Array(vec![Value::Integer(4), Value::Integer(8)]),
    );

    let mut object = Value::object("Config");
    object.as_object_mut()?.ivars.push((b"@data".to_vec(), hash));
    object
        .as_object_mut()?
        .ivars
        .push((b"@checksum".to_vec(), Value::bignum(Sign::Negative, vec![0xFE, 0xCA])));

    Ok(Value::Array(vec![
        Value::Nil,
        Value::Boolean(false),
        Value::Integer(-4242),
        Value::Float(0.25),
        object,
        Value::class("Set"),
        Value::module("Kernel"),
        Value::userdef("Time", b"\x01\x02\x03\x04".to_vec()),
    ]))
}

#[test]
fn test_encode_decode_identity_on_constructed_tree() -> Result<()> {
    let value = composite_value()?;
    assert_eq!(decode(&encode(&value)?)?, value);
    Ok(())
}

#[test]
fn test_decode_encode_decode_is_stable() -> Result<()> {
    // A document that exercises links on the wire: [:sym, :sym, "s", "s"].
    let mut body = vec![0x5B, 0x09];
    body.extend_from_slice(&[0x3A, 0x08]);
    body.extend_from_slice(b"sym");
    body.extend_from_slice(&[0x3B, 0x00]);
    body.extend_from_slice(&[0x22, 0x06, b's']);
    body.extend_from_slice(&[0x40, 0x06]);
    let bytes = doc(&body);

    let first = decode(&bytes)?;
    let second = decode(&encode(&first)?)?;
    assert_eq!(first, second);
    Ok(())
}
