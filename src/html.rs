/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Display form of a category id: a space goes between a lowercase ASCII
/// letter and the uppercase ASCII letter that follows it.
///
/// `SingleCell` becomes `Single Cell`; `RNA` is unchanged. Anchor ids always
/// use the raw category, never this form.
pub fn humanize_category(category: &str) -> String {
    let mut out = String::with_capacity(category.len() + 4);
    let mut prev: Option<char> = None;
    for ch in category.chars() {
        if let Some(p) = prev
            && p.is_ascii_lowercase()
            && ch.is_ascii_uppercase()
        {
            out.push(' ');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

/// A 15px high badge image, preceded by a space so badges can be appended
/// straight after a title.
pub fn badge_img(src: &str) -> String {
    format!(r#" <img border="0" height="15" src="{}">"#, escape(src))
}
