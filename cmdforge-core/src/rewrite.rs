//! Textual rewriting of function calls inside arbitrary SQL.
//!
//! Every routine here scans left to right and matches names ASCII case insensitively at
//! identifier boundaries. Quoted literals, quoted identifiers and comments (`-- `, `#` and
//! `/* */`) are skipped. Inside `'` and `"` both the doubled quote and the backslash escape
//! are understood.

use crate::{CommandError, Result};

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Position right after the quoted region starting at `start`, or the end of the text.
fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let backslash = quote != b'`';
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if backslash => i += 2,
            b if b == quote => {
                if bytes.get(i + 1) != Some(&quote) {
                    return i + 1;
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Position right after the line containing `start`.
fn skip_line(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(bytes.len(), |v| start + v + 1)
}

/// End of the literal or comment starting at `i`, `None` when `i` starts neither.
fn skip_ignored(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes[i] {
        b'\'' | b'"' | b'`' => Some(skip_quoted(bytes, i)),
        b'#' => Some(skip_line(bytes, i)),
        b'-' if bytes.get(i + 1) == Some(&b'-')
            && bytes.get(i + 2).is_none_or(|b| b.is_ascii_whitespace()) =>
        {
            Some(skip_line(bytes, i))
        }
        b'/' if bytes.get(i + 1) == Some(&b'*') => Some(
            bytes[i + 2..]
                .windows(2)
                .position(|v| v == b"*/")
                .map_or(bytes.len(), |v| i + 2 + v + 2),
        ),
        _ => None,
    }
}

/// Next occurrence of `needle` at or after `from`, outside quotes and comments and not glued
/// to a preceding identifier.
pub fn find_token(text: &str, needle: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return None;
    }
    let mut i = from;
    while i + needle.len() <= bytes.len() {
        if let Some(next) = skip_ignored(bytes, i) {
            i = next;
            continue;
        }
        if bytes[i..i + needle.len()].eq_ignore_ascii_case(needle)
            && (i == 0 || !is_identifier_byte(bytes[i - 1]))
            && (!is_identifier_byte(needle[needle.len() - 1])
                || bytes
                    .get(i + needle.len())
                    .is_none_or(|b| !is_identifier_byte(*b)))
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Next call to function `name` at or after `from`: returns the start of the name and the
/// position of its opening parenthesis.
pub fn find_call(text: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut cursor = from;
    while let Some(start) = find_token(text, name, cursor) {
        let mut open = start + name.len();
        while open < bytes.len() && bytes[open].is_ascii_whitespace() {
            open += 1;
        }
        if bytes.get(open) == Some(&b'(') {
            return Some((start, open));
        }
        cursor = start + name.len();
    }
    None
}

/// Position of the parenthesis closing the one at `open`, nested pairs are skipped.
pub fn find_matching_parenthesis(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(next) = skip_ignored(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Splits an argument list at its top level commas, each argument is trimmed.
pub fn split_arguments(arguments: &str) -> Vec<&str> {
    if arguments.trim().is_empty() {
        return Vec::new();
    }
    let bytes = arguments.as_bytes();
    let mut result = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = skip_ignored(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                result.push(arguments[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    result.push(arguments[start..].trim());
    result
}

/// Replaces every occurrence of `from` with `to`.
pub fn replace_function(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(position) = find_token(text, from, cursor) {
        out.push_str(&text[cursor..position]);
        out.push_str(to);
        cursor = position + from.len();
    }
    out.push_str(&text[cursor..]);
    out
}

/// Rewrites every `from(a, b)` call into `to(b,a)`, nested calls included.
///
/// The result is written into a fresh buffer so a replacement is never matched again.
pub fn rewrite_swapped_call(text: &str, from: &str, to: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some((start, open)) = find_call(text, from, cursor) {
        let Some(close) = find_matching_parenthesis(text, open) else {
            return Err(CommandError::Malformed(format!(
                "unbalanced parenthesis in the call to {} at position {}",
                from, start
            ))
            .into());
        };
        let arguments = split_arguments(&text[open + 1..close]);
        let [first, second] = arguments.as_slice() else {
            return Err(CommandError::NotSupported(format!(
                "{} called with {} arguments, expected 2",
                from,
                arguments.len()
            ))
            .into());
        };
        out.push_str(&text[cursor..start]);
        out.push_str(to);
        out.push('(');
        out.push_str(&rewrite_swapped_call(second, from, to)?);
        out.push(',');
        out.push_str(&rewrite_swapped_call(first, from, to)?);
        out.push(')');
        cursor = close + 1;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}
