use crate::formats::PlatformRecord;
use crate::html::escape;

pub fn render_platforms(platforms: &[PlatformRecord]) -> String {
    let mut out = String::from(r#"<ul id="platform-list">"#);
    for platform in platforms {
        out.push_str(&format!("<li><h2>{}</h2></li>", escape(&platform.name)));
    }
    out.push_str("</ul>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_heading_per_platform_in_input_order() {
        let platforms = ["R", "Python", "C++"]
            .map(|name| PlatformRecord {
                name: name.to_owned(),
            })
            .to_vec();
        assert_eq!(
            render_platforms(&platforms),
            concat!(
                r#"<ul id="platform-list">"#,
                "<li><h2>R</h2></li><li><h2>Python</h2></li><li><h2>C++</h2></li>",
                "</ul>"
            )
        );
        assert_eq!(render_platforms(&[]), r#"<ul id="platform-list"></ul>"#);
    }
}
