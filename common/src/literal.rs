//! Byte literal codec. Renders bytes as a C++ `std::string_view` literal
//! (`"..."sv`) with every single byte escaped, and parses such literals back
//! the way compiler would.

use anyhow::{Error, anyhow, bail, ensure};
use std::iter::Peekable;

/// User defined literal suffix making the literal a `std::string_view`. Unlike
/// plain `const char*` it keeps embedded zero bytes.
pub const SUFFIX: &str = "sv";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encodes arbitrary `content` as a literal, each byte written as `\xNN`.
///
/// Every escape is followed either by another escape or the closing quote, so
/// the greedy hex escape parsing of C++ never merges bytes.
///
/// # Examples
///
/// ```
/// # use www_pack_common::literal::encode;
/// assert_eq!(encode(b"\x00A\xff"), r#""\x00\x41\xff"sv"#);
/// ```
pub fn encode(content: &[u8]) -> String {
    let mut literal = String::with_capacity(content.len() * 4 + 2 + SUFFIX.len());
    literal.push('"');
    for byte in content {
        literal.push('\\');
        literal.push('x');
        literal.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        literal.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    }
    literal.push('"');
    literal.push_str(SUFFIX);
    literal
}

/// Encodes text as a literal keeping it readable. Only quote and backslash are
/// escaped, so `text` must not contain control characters.
pub fn encode_text(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2 + SUFFIX.len());
    literal.push('"');
    for character in text.chars() {
        if matches!(character, '"' | '\\') {
            literal.push('\\');
        }
        literal.push(character);
    }
    literal.push('"');
    literal.push_str(SUFFIX);
    literal
}

/// Decodes `literal` (quotes and [SUFFIX] included) back to bytes.
///
/// Supports escapes produced by [encode] and [encode_text] as well as other
/// simple, hex and octal escapes.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use www_pack_common::literal::{decode, encode};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let content = b"<h1>hi</h1>\x00\xff";
/// assert_eq!(&*decode(&encode(content))?, content);
/// assert_eq!(&*decode(r#""/index.html"sv"#)?, b"/index.html");
/// #
/// # Ok(())
/// # }
/// ```
pub fn decode(literal: &str) -> Result<Box<[u8]>, Error> {
    let body = literal
        .strip_suffix(SUFFIX)
        .ok_or_else(|| anyhow!("literal must end with `{}` suffix", SUFFIX))?;
    let body = body
        .strip_prefix('"')
        .and_then(|body| body.strip_suffix('"'))
        .ok_or_else(|| anyhow!("literal must be enclosed in quotes"))?;

    let mut content = Vec::with_capacity(body.len() / 4);
    let mut bytes = body.bytes().peekable();
    while let Some(byte) = bytes.next() {
        match byte {
            b'\\' => content.push(decode_escape(&mut bytes)?),
            b'"' => bail!("unescaped quote inside literal"),
            b'\n' | b'\r' => bail!("line break inside literal"),
            byte => content.push(byte),
        }
    }

    Ok(content.into_boxed_slice())
}

/// Decodes single escape sequence, with the leading backslash already
/// consumed.
fn decode_escape(bytes: &mut Peekable<impl Iterator<Item = u8>>) -> Result<u8, Error> {
    let byte = match bytes.next() {
        Some(b'x') => {
            // hex escape consumes as many hex digits as there are
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(digit) = bytes.peek().and_then(|byte| (*byte as char).to_digit(16)) {
                bytes.next();
                value = value * 16 + digit;
                digits += 1;
                ensure!(value <= 0xff, "hex escape value out of range");
            }
            ensure!(digits > 0, "hex escape without digits");
            value as u8
        }
        Some(first @ b'0'..=b'7') => {
            // octal escape consumes up to three digits
            let mut value = (first - b'0') as u32;
            for _ in 0..2 {
                match bytes.peek() {
                    Some(digit @ b'0'..=b'7') => {
                        value = value * 8 + (digit - b'0') as u32;
                        bytes.next();
                    }
                    _ => break,
                }
            }
            ensure!(value <= 0xff, "octal escape value out of range");
            value as u8
        }
        Some(b'\\') => b'\\',
        Some(b'"') => b'"',
        Some(b'\'') => b'\'',
        Some(b'?') => b'?',
        Some(b'a') => 0x07,
        Some(b'b') => 0x08,
        Some(b'f') => 0x0c,
        Some(b'n') => b'\n',
        Some(b'r') => b'\r',
        Some(b't') => b'\t',
        Some(b'v') => 0x0b,
        Some(other) => bail!("unsupported escape sequence `\\{}`", other as char),
        None => bail!("literal ends with a lone backslash"),
    };
    Ok(byte)
}
