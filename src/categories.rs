use crate::entry::{TOOLS_PAGE, panel_classes};
use crate::formats::{CategoryRecord, CategoryToolRef};
use crate::html::{badge_img, escape, humanize_category};
use crate::query::ListQuery;
use crate::session::{PanelState, RenderSession};

pub struct RenderedCategories {
    pub html: String,
    pub session: RenderSession,
}

pub fn render_categories(categories: &[CategoryRecord], fragment: Option<&str>) -> RenderedCategories {
    let mut session = RenderSession::new(ListQuery::default());
    for category in categories {
        session.register(&category.category, false);
    }
    if let Some(fragment) = fragment {
        session.open_fragment(fragment);
    }

    let mut html = String::from(r#"<div id="categories-list">"#);
    for category in categories {
        let expanded = session.state(&category.category) == Some(PanelState::Expanded);
        html.push_str(&render_category(category, expanded));
    }
    html.push_str("</div>");

    RenderedCategories { html, session }
}

pub fn render_category(category: &CategoryRecord, expanded: bool) -> String {
    let id = escape(&category.category);
    let title = escape(&humanize_category(&category.category));
    let (toggle_class, body_class) = panel_classes(expanded);

    let mut entry = format!(
        r##"<div class="panel-heading"><h4 id="{id}" class="panel-title"><a data-toggle="collapse" class="{toggle_class}" href="#{id}_c">{title}</a></h4></div>"##
    );
    entry.push_str(&format!(
        r#"<div id="{id}_c" class="{body_class}"><ul class="list-group">"#
    ));
    entry.push_str(&format!(
        r#"<li class="list-group-item"><h5>{}</h5></li>"#,
        escape(&category.description)
    ));

    for tool in &category.tools {
        entry.push_str(&render_tool_ref(tool));
    }

    entry.push_str("</ul></div>");
    entry
}

fn render_tool_ref(tool: &CategoryToolRef) -> String {
    let name = escape(&tool.name);
    let mut out = format!(
        r##"<li class="list-group-item"><a href="{TOOLS_PAGE}#{name}">{name}</a>"##
    );

    if let Some(bioc) = &tool.bioc {
        out.push_str(&badge_img(&format!(
            "https://bioconductor.org/shields/years-in-bioc/{bioc}.svg"
        )));
        out.push_str(&badge_img(&format!(
            "https://bioconductor.org/shields/downloads/{bioc}.svg"
        )));
    }
    if let Some(cran) = &tool.cran {
        out.push_str(&badge_img(&format!(
            "https://www.r-pkg.org/badges/version/{cran}"
        )));
        out.push_str(&badge_img(&format!(
            "https://cranlogs.r-pkg.org/badges/grand-total/{cran}"
        )));
    }
    if let Some(pypi) = &tool.pypi {
        out.push_str(&badge_img(&format!("https://img.shields.io/pypi/v/{pypi}.svg")));
        out.push_str(&badge_img(&format!(
            "https://img.shields.io/pypi/pyversions/{pypi}.svg"
        )));
        out.push_str(&badge_img(&format!(
            "https://img.shields.io/pypi/status/{pypi}.svg"
        )));
    }

    out.push_str("</li>");
    out
}
