//! Input Sanitizing
//!
//! Room descriptions and message bodies accept free text from clients and
//! are rendered by the web frontend, so HTML tags are stripped before
//! storage. Fenced code blocks (``` ... ```) are the exception: snippets
//! are first-class content here and must survive verbatim, angle brackets
//! included.
//!
//! Both the REST handlers and the socket path clean text through this
//! module, so content is sanitized exactly once, at write time.

/// Strip HTML tags outside fenced code blocks and trim the result.
///
/// Text between a pair of ``` fences is kept byte-for-byte, fences
/// included. An unterminated fence keeps everything after it verbatim.
/// Outside fences, `<...>` spans are removed; a dangling `<` swallows the
/// rest of the segment, which matches how browsers treat an unclosed tag.
pub fn clean(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while !rest.is_empty() {
        match rest.find("```") {
            Some(start) => {
                out.push_str(&strip_tags(&rest[..start]));
                let after = &rest[start + 3..];
                match after.find("```") {
                    Some(end) => {
                        // Fenced block, both fences included.
                        out.push_str(&rest[start..start + 3 + end + 3]);
                        rest = &after[end + 3..];
                    }
                    None => {
                        out.push_str(&rest[start..]);
                        rest = "";
                    }
                }
            }
            None => {
                out.push_str(&strip_tags(rest));
                rest = "";
            }
        }
    }

    out.trim().to_string()
}

fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;

    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}
