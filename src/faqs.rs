use pulldown_cmark::{Options, Parser};

use crate::entry::panel_classes;
use crate::formats::FaqRecord;
use crate::html::escape;
use crate::query::ListQuery;
use crate::session::{PanelState, RenderSession};

pub struct RenderedFaqs {
    pub html: String,
    pub session: RenderSession,
}

pub fn render_faqs(faqs: &[FaqRecord], fragment: Option<&str>) -> RenderedFaqs {
    let mut session = RenderSession::new(ListQuery::default());
    for faq in faqs {
        session.register(&faq.id, false);
    }
    if let Some(fragment) = fragment {
        session.open_fragment(fragment);
    }

    let mut html = String::from(r#"<div id="faqs-list">"#);
    for faq in faqs {
        let expanded = session.state(&faq.id) == Some(PanelState::Expanded);
        html.push_str(&render_faq(faq, expanded));
    }
    html.push_str("</div>");

    RenderedFaqs { html, session }
}

pub fn render_faq(faq: &FaqRecord, expanded: bool) -> String {
    let id = escape(&faq.id);
    let (toggle_class, body_class) = panel_classes(expanded);
    format!(
        concat!(
            r##"<div class="panel-heading"><h4 id="{id}" class="panel-title">"##,
            r##"<a data-toggle="collapse" class="{toggle_class}" href="#{id}_c">{question}</a>"##,
            "</h4></div>",
            r#"<div id="{id}_c" class="{body_class}"><ul class="list-group">"#,
            r#"<li class="list-group-item">{answer}</li>"#,
            "</ul></div>"
        ),
        id = id,
        toggle_class = toggle_class,
        body_class = body_class,
        question = escape(&faq.question),
        answer = markdown_to_html(&faq.answer),
    )
}

/// Answers are Markdown; inline HTML passes through unchanged.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html.trim_end().to_owned()
}
