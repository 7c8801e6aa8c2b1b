/// Render the light inline HTML found in passages and explanations as plain
/// text. `<br>` and paragraph/div boundaries become line breaks, every other
/// tag is dropped, and the common entities are decoded.
pub fn to_plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        // A tag opens only on `<` followed by a letter, `/` or `!`
        if !starts_tag(&rest[start + 1..]) {
            out.push('<');
            rest = &rest[start + 1..];
            continue;
        }
        let Some(len) = rest[start..].find('>') else {
            // Unclosed '<' is literal text
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = &rest[start + 1..start + len];
        if breaks_line(tag) && !out.ends_with('\n') {
            out.push('\n');
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);

    decode_entities(out.trim())
}

fn starts_tag(after: &str) -> bool {
    after
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn breaks_line(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    matches!(name.as_str(), "br" | "p" | "div" | "li")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        // Last, so "&amp;lt;" decodes to "&lt;" rather than "<"
        .replace("&amp;", "&")
}
