//! Delimiter-balance scanning of C# source text.
//!
//! The scanner masks comments, string and char literals, and preprocessor
//! lines with spaces (newlines are kept, so byte offsets and line numbers
//! stay valid). Type declarations are then located on the masked text and
//! their bodies matched by brace depth.

/// Byte span of a type declaration body, `open` and `close` being the
/// offsets of its `{` and matching `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeBody {
    /// Offset of the opening brace.
    pub open: usize,
    /// Offset of the matching closing brace.
    pub close: usize,
}

const TYPE_KEYWORDS: [&[u8]; 3] = [b"class", b"record", b"struct"];

/// Find the body of the primary type declaration.
///
/// The primary type is the first `class`, `record` or `struct` whose header
/// names `marker`; when no header does, the first declaration with a body.
/// Returns `None` when the file declares no type or its braces don't balance.
pub fn primary_type_body(text: &str, marker: &str) -> Option<TypeBody> {
    let code = code_mask(text);
    let mut fallback = None;

    for at in keyword_positions(&code) {
        let Some(open) = header_open_brace(&code, at) else {
            continue;
        };

        if contains(&code[at..open], marker.as_bytes()) {
            return matching_close(&code, open).map(|close| TypeBody { open, close });
        }
        fallback.get_or_insert(open);
    }

    let open = fallback?;
    matching_close(&code, open).map(|close| TypeBody { open, close })
}

/// Copy of `text` with everything that isn't code replaced by spaces.
pub fn code_mask(text: &str) -> Vec<u8> {
    let src = text.as_bytes();
    let mut out = src.to_vec();
    let mut at_line_start = true;
    let mut i = 0;

    while i < src.len() {
        let start = i;
        let b = src[i];

        match b {
            b'/' if src.get(i + 1) == Some(&b'/') => i = line_end(src, i),
            b'/' if src.get(i + 1) == Some(&b'*') => i = block_comment_end(src, i + 2),
            b'#' if at_line_start => i = line_end(src, i),
            b'\'' => i = char_literal_end(src, i),
            b'"' | b'@' | b'$' => match string_literal_end(src, i) {
                Some(end) => i = end,
                None => {
                    at_line_start = false;
                    i += 1;
                    continue;
                }
            },
            b'\n' => {
                at_line_start = true;
                i += 1;
                continue;
            }
            _ => {
                if !b.is_ascii_whitespace() {
                    at_line_start = false;
                }
                i += 1;
                continue;
            }
        }

        at_line_start = false;
        blank(&mut out, start, i);
    }

    out
}

fn blank(out: &mut [u8], start: usize, end: usize) {
    for b in &mut out[start..end] {
        if *b != b'\n' && *b != b'\r' {
            *b = b' ';
        }
    }
}

fn line_end(src: &[u8], from: usize) -> usize {
    src[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(src.len(), |p| from + p)
}

fn block_comment_end(src: &[u8], from: usize) -> usize {
    src[from..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(src.len(), |p| from + p + 2)
}

fn char_literal_end(src: &[u8], from: usize) -> usize {
    // Longest legal form is '\UXXXXXXXX'.
    let limit = (from + 12).min(src.len());
    let mut k = from + 1;
    while k < limit {
        match src[k] {
            b'\\' => k += 2,
            b'\'' => return k + 1,
            b'\n' => return k,
            _ => k += 1,
        }
    }
    from + 1
}

/// End offset (exclusive) of the string literal starting at `from`, or
/// `None` when the prefix at `from` doesn't open a string.
fn string_literal_end(src: &[u8], from: usize) -> Option<usize> {
    let mut j = from;
    let mut dollars = 0;
    let mut verbatim = false;
    loop {
        match src.get(j) {
            Some(b'$') => dollars += 1,
            Some(b'@') if !verbatim => verbatim = true,
            _ => break,
        }
        j += 1;
    }
    if src.get(j) != Some(&b'"') {
        return None;
    }

    let quotes = src[j..].iter().take_while(|&&b| b == b'"').count();
    if quotes >= 3 && !verbatim {
        return Some(raw_literal_end(src, j + quotes, quotes));
    }

    let interpolated = dollars > 0;
    let mut hole = 0usize;
    let mut k = j + 1;
    while k < src.len() {
        let b = src[k];
        if hole > 0 {
            match b {
                b'{' => hole += 1,
                b'}' => hole -= 1,
                b'\'' => {
                    k = char_literal_end(src, k);
                    continue;
                }
                b'"' | b'@' | b'$' => {
                    if let Some(end) = string_literal_end(src, k) {
                        k = end;
                        continue;
                    }
                }
                _ => {}
            }
            k += 1;
            continue;
        }

        match b {
            b'\\' if !verbatim => k += 2,
            b'"' if verbatim && src.get(k + 1) == Some(&b'"') => k += 2,
            b'"' => return Some(k + 1),
            b'{' if interpolated => {
                if src.get(k + 1) == Some(&b'{') {
                    k += 2;
                } else {
                    hole = 1;
                    k += 1;
                }
            }
            b'}' if interpolated && src.get(k + 1) == Some(&b'}') => k += 2,
            // Unterminated regular literal; stop at the line break.
            b'\n' if !verbatim => return Some(k),
            _ => k += 1,
        }
    }

    Some(src.len())
}

fn raw_literal_end(src: &[u8], from: usize, quotes: usize) -> usize {
    let mut k = from;
    while k < src.len() {
        if src[k] == b'"' {
            let run = src[k..].iter().take_while(|&&b| b == b'"').count();
            if run >= quotes {
                return k + run;
            }
            k += run;
        } else {
            k += 1;
        }
    }
    src.len()
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Offsets of type-declaring keywords, skipping generic constraints such as
/// `where T : class`.
fn keyword_positions(code: &[u8]) -> Vec<usize> {
    let mut positions = Vec::new();
    for i in 0..code.len() {
        for kw in TYPE_KEYWORDS {
            if !code[i..].starts_with(kw) {
                continue;
            }
            let before = i.checked_sub(1).map(|p| code[p]);
            let after = code.get(i + kw.len()).copied();
            if before.is_some_and(|b| is_ident_byte(b) || b == b'@') {
                continue;
            }
            if after.is_some_and(is_ident_byte) {
                continue;
            }
            let prev_code = code[..i].iter().rev().find(|b| !b.is_ascii_whitespace());
            if matches!(prev_code, Some(b':') | Some(b',')) {
                continue;
            }
            positions.push(i);
        }
    }
    positions
}

/// The `{` that opens the body declared at `at`, if the header ends in one.
fn header_open_brace(code: &[u8], at: usize) -> Option<usize> {
    code[at..]
        .iter()
        .position(|&b| matches!(b, b'{' | b';' | b'}'))
        .map(|p| at + p)
        .filter(|&p| code[p] == b'{')
}

fn matching_close(code: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in code.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}
