//! Memo escaping for amino JSON sign documents.
//!
//! The amino JSON encoder HTML-escapes memo text. The entity set is fixed and
//! must be reproduced exactly: a differing set changes the signed bytes.

const ENTITIES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('\'', "&#39;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&#34;"),
];

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match ENTITIES.iter().find(|(ch, _)| *ch == c) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

/// Exact inverse of [`escape_html`]. Single left-to-right pass, so `&amp;lt;`
/// decodes to `&lt;`, not `<`. Unknown `&` sequences are kept verbatim.
pub fn unescape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ENTITIES.iter().find(|(_, entity)| tail.starts_with(entity)) {
            Some((c, entity)) => {
                out.push(*c);
                rest = &tail[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
