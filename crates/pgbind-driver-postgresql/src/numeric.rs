//! Binary wire format of `numeric`: a header of four 16-bit fields (digit
//! count, weight, sign, display scale) followed by base-10000 digits, the
//! first of which is scaled by `10000^weight`.

use tokio_postgres::types::{accepts, private::BytesMut, FromSql, IsNull, Type};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

const POSITIVE: u16 = 0x0000;
const NEGATIVE: u16 = 0x4000;
const NAN: u16 = 0xC000;

/// Encodes a decimal literal such as `-12.50` as a `numeric` parameter.
pub(crate) fn encode(literal: &str, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    let literal = literal.trim();

    if literal.eq_ignore_ascii_case("nan") {
        write_header(out, 0, 0, NAN, 0);
        return Ok(IsNull::No);
    }

    let (sign, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (NEGATIVE, rest),
        None => (POSITIVE, literal.strip_prefix('+').unwrap_or(literal)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part) {
        return Err(format!("`{literal}` is not a decimal number").into());
    }

    let int_part = int_part.trim_start_matches('0');
    let dscale = u16::try_from(frac_part.len())?;

    // Pad the integer part on the left and the fraction on the right so both
    // split into whole groups of four.
    let int_pad = (4 - int_part.len() % 4) % 4;
    let frac_pad = (4 - frac_part.len() % 4) % 4;
    let padded = format!(
        "{}{int_part}{frac_part}{}",
        "0".repeat(int_pad),
        "0".repeat(frac_pad)
    );

    let mut digits = padded
        .as_bytes()
        .chunks(4)
        .map(|group| group.iter().fold(0i16, |acc, b| acc * 10 + (b - b'0') as i16))
        .collect::<Vec<_>>();
    let mut weight = ((int_part.len() + int_pad) / 4) as i16 - 1;

    while digits.first() == Some(&0) {
        digits.remove(0);
        weight -= 1;
    }
    while digits.last() == Some(&0) {
        digits.pop();
    }

    if digits.is_empty() {
        write_header(out, 0, 0, POSITIVE, dscale);
        return Ok(IsNull::No);
    }

    write_header(out, i16::try_from(digits.len())?, weight, sign, dscale);
    for digit in digits {
        out.extend_from_slice(&digit.to_be_bytes());
    }

    Ok(IsNull::No)
}

fn write_header(out: &mut BytesMut, ndigits: i16, weight: i16, sign: u16, dscale: u16) {
    out.extend_from_slice(&ndigits.to_be_bytes());
    out.extend_from_slice(&weight.to_be_bytes());
    out.extend_from_slice(&sign.to_be_bytes());
    out.extend_from_slice(&dscale.to_be_bytes());
}

/// Decodes a `numeric` column into its decimal text, keeping every digit.
pub(crate) fn decode(raw: &[u8]) -> Result<String, BoxError> {
    let word = |index: usize| -> Result<[u8; 2], BoxError> {
        raw.get(index * 2..index * 2 + 2)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| "truncated numeric value".into())
    };

    let ndigits = i16::from_be_bytes(word(0)?);
    let weight = i16::from_be_bytes(word(1)?) as i32;
    let sign = u16::from_be_bytes(word(2)?);
    let dscale = u16::from_be_bytes(word(3)?) as usize;

    if sign == NAN {
        return Ok("NaN".to_string());
    }

    let digits = (0..ndigits.max(0) as usize)
        .map(|index| word(4 + index).map(i16::from_be_bytes))
        .collect::<Result<Vec<_>, _>>()?;

    // The digit scaled by `10000^exponent`, zero outside the stored range.
    let digit = |exponent: i32| -> i16 {
        usize::try_from(weight - exponent)
            .ok()
            .and_then(|index| digits.get(index).copied())
            .unwrap_or(0)
    };

    let mut text = String::new();
    if sign == NEGATIVE && !digits.is_empty() {
        text.push('-');
    }

    if weight < 0 {
        text.push('0');
    } else {
        text.push_str(&digit(weight).to_string());
        for exponent in (0..weight).rev() {
            text.push_str(&format!("{:04}", digit(exponent)));
        }
    }

    if dscale > 0 {
        let groups = dscale.div_ceil(4) as i32;
        let fraction = (1..=groups)
            .map(|exponent| format!("{:04}", digit(-exponent)))
            .collect::<String>();
        text.push('.');
        text.push_str(&fraction[..dscale]);
    }

    Ok(text)
}

/// A `numeric` column read as decimal text.
pub(crate) struct Numeric(pub(crate) String);

impl<'a> FromSql<'a> for Numeric {
    fn from_sql(_: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        decode(raw).map(Numeric)
    }

    accepts!(NUMERIC);
}
