//! XSS stripping for free-text fields echoed back to clients.

/// Escapes the html serializer writes into text that are decoded again when
/// the decoded character cannot open markup.
const ENTITIES: [(&str, char); 4] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&nbsp;", '\u{a0}'),
];

/// Remove executable markup from `input`.
///
/// `<script>`/`<style>` elements lose their bodies, event-handler attributes
/// and `javascript:` URLs are dropped. Text without markup comes back
/// unchanged, so `Tom & Jerry` stays `Tom & Jerry`. Applying it to its own
/// output is a no-op.
pub fn clean_text(input: &str) -> String {
    if !input.contains('<') {
        return input.to_string();
    }
    unescape_inert(&ammonia::clean(input))
}

/// Undo the escaping of characters that are plain text where they stand.
/// `&lt;` stays escaped when it would start a tag, `&amp;` when it would
/// start another character reference.
fn unescape_inert(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let decoded = ENTITIES.iter().find_map(|&(entity, ch)| {
            let after = rest.strip_prefix(entity)?;
            is_inert(ch, after.chars().next()).then_some((ch, entity.len()))
        });
        match decoded {
            Some((ch, len)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_inert(ch: char, next: Option<char>) -> bool {
    match ch {
        '<' => !matches!(next, Some(c) if c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?')),
        '&' => !matches!(next, Some(c) if c.is_ascii_alphanumeric() || c == '#'),
        _ => true,
    }
}
