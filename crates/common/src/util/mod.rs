// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Python 2 `repr`-compatible quoting of string and numeric literals.

/// Quote a byte string the way Python 2 `repr` does for `str`.
/// Single quotes are preferred unless the content holds a single quote and no double quote.
#[must_use]
pub fn quote_bytes(bytes: &[u8]) -> String {
    let quote = pick_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
    let mut output = String::with_capacity(bytes.len() + 2);
    output.push(quote);
    for &b in bytes {
        push_escaped(&mut output, u32::from(b), quote);
    }
    output.push(quote);
    output
}

/// Quote a unicode string the way Python 2 `repr` does for `unicode`, minus the `u` prefix.
/// Everything outside printable ASCII is escaped, so the output is pure ASCII.
#[must_use]
pub fn quote_str(s: &str) -> String {
    let quote = pick_quote(s.contains('\''), s.contains('"'));
    let mut output = String::with_capacity(s.len() + 2);
    output.push(quote);
    for c in s.chars() {
        push_escaped(&mut output, u32::from(c), quote);
    }
    output.push(quote);
    output
}

fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double { '"' } else { '\'' }
}

fn push_escaped(output: &mut String, c: u32, quote: char) {
    match c {
        0x5c => output.push_str("\\\\"),
        0x09 => output.push_str("\\t"),
        0x0a => output.push_str("\\n"),
        0x0d => output.push_str("\\r"),
        c if c == u32::from(quote) => {
            output.push('\\');
            output.push(quote);
        }
        0x20..=0x7e => output.push(char::from(c as u8)),
        0x00..=0xff => output.push_str(&format!("\\x{c:02x}")),
        0x100..=0xffff => output.push_str(&format!("\\u{c:04x}")),
        _ => output.push_str(&format!("\\U{c:08x}")),
    }
}

/// Shortest round-tripping text for a finite float, formatted like Python `repr`:
/// positional notation for exponents in `-4..16` (always carrying a fractional part),
/// scientific notation with a signed two-digit exponent otherwise.
#[must_use]
pub fn float_repr(f: f64) -> String {
    short_float(f, true)
}

/// Like [`float_repr`], but without forcing a `.0` onto integral values. This is how Python
/// formats the imaginary part of a complex number (`2j`, `1.5j`).
#[must_use]
pub fn imag_repr(f: f64) -> String {
    short_float(f, false)
}

fn short_float(f: f64, add_dot_zero: bool) -> String {
    let sign = if f.is_sign_negative() { "-" } else { "" };
    if f == 0.0 {
        let zero = if add_dot_zero { "0.0" } else { "0" };
        return format!("{sign}{zero}");
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e3" or "1e-7".
    let scientific = format!("{:e}", f.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let body = if (-4..16).contains(&exponent) {
        if exponent >= 0 {
            let int_len = exponent as usize + 1;
            if digits.len() <= int_len {
                let mut body = digits.clone();
                body.push_str(&"0".repeat(int_len - digits.len()));
                if add_dot_zero {
                    body.push_str(".0");
                }
                body
            } else {
                format!("{}.{}", &digits[..int_len], &digits[int_len..])
            }
        } else {
            format!("0.{}{digits}", "0".repeat((-exponent - 1) as usize))
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{:02}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{:02}", exponent.abs())
        }
    };
    format!("{sign}{body}")
}
