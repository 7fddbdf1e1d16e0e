use crate::formats::{Publication, RepoStats, ToolRecord};
use crate::html::{badge_img, escape, humanize_category};

pub const CATEGORIES_PAGE: &str = "categories.html";
pub const TOOLS_PAGE: &str = "tools.html";

pub const SENTINEL_COUNT: &str = "N/A";
pub const SENTINEL_COMMIT: &str = "Unknown";

/// Per-panel render state taken from the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelView<'a> {
    pub expanded: bool,
    pub stats: Option<&'a RepoStats>,
}

/// `(toggle class, body class)` for an accordion panel.
pub fn panel_classes(expanded: bool) -> (&'static str, &'static str) {
    if expanded {
        ("accordion-toggle", "panel-collapse collapse in")
    } else {
        ("accordion-toggle collapsed", "panel-collapse collapse")
    }
}

/// Markup for one tool panel. `ordinal` numbers the entry in the two-column
/// layouts and is omitted in letter buckets.
pub fn render_tool_entry(tool: &ToolRecord, ordinal: Option<usize>, view: PanelView<'_>) -> String {
    let id = escape(&tool.name);
    let (toggle_class, body_class) = panel_classes(view.expanded);

    let mut entry = String::new();
    entry.push_str(r#"<div class="tool-container">"#);

    entry.push_str(&format!(
        r##"<div class="tool"><h4 id="{id}" class="panel-title"><a data-toggle="collapse" class="{toggle_class}" href="#{id}_c">"##
    ));
    if let Some(n) = ordinal {
        entry.push_str(&format!("<strong>{n}. </strong>"));
    }
    entry.push_str(&id);
    entry.push_str("<span>");
    entry.push_str(&package_badges(tool));
    entry.push_str("</span></a></h4></div>");

    entry.push_str(&format!(
        r#"<div id="{id}_c" class="{body_class}"><ul class="list-group">"#
    ));
    entry.push_str(&format!(
        r#"<li class="list-group-item">{}</li>"#,
        escape(&tool.description)
    ));

    if tool.total_refs() > 0 {
        entry.push_str(&render_references(tool, &id));
    }

    entry.push_str(&format!(
        r#"<li class="list-group-item"><strong>Platform: </strong> {}</li>"#,
        escape(&tool.platform)
    ));

    if let Some(code) = &tool.code {
        let code = escape(code);
        entry.push_str(&format!(
            r#"<li class="list-group-item"><strong>Code: </strong> <a class="codebase_url" href="{code}">{code}</a>"#
        ));
        if tool.github.is_some() {
            entry.push_str(&github_shields(view.stats));
        }
        entry.push_str("</li>");
    }

    if let Some(license) = &tool.license {
        entry.push_str(&format!(
            r#"<li class="list-group-item"><strong>License: </strong> {}</li>"#,
            escape(license)
        ));
    }

    entry.push_str(&format!(
        r#"<li class="list-group-item"><strong>Categories: </strong> {}</li>"#,
        link_categories(&tool.categories)
    ));
    entry.push_str(&format!(
        r#"<li class="list-group-item"><strong>Added: </strong> {}, <strong>Updated: </strong>{}</li>"#,
        escape(&tool.added),
        escape(&tool.updated)
    ));

    entry.push_str("</ul></div></div>");
    entry
}

/// Bioconductor, then CRAN, then PyPI badge pairs; absent ids add nothing.
pub fn package_badges(tool: &ToolRecord) -> String {
    let mut out = String::new();
    if let Some(bioc) = &tool.bioc {
        out.push_str(&badge_img(&format!(
            "https://bioconductor.org/shields/years-in-bioc/{bioc}.svg"
        )));
        out.push_str(&badge_img(&format!(
            "https://bioconductor.org/shields/downloads/release/{bioc}.svg"
        )));
    }
    if let Some(cran) = &tool.cran {
        out.push_str(&badge_img(&format!(
            "https://www.r-pkg.org/badges/version/{cran}"
        )));
        out.push_str(&badge_img(&format!("https://cranlogs.r-pkg.org/badges/{cran}")));
    }
    if let Some(pypi) = &tool.pypi {
        out.push_str(&badge_img(&format!("https://badge.fury.io/py/{pypi}.svg")));
        out.push_str(&badge_img(&format!(
            "https://static.pepy.tech/badge/{pypi}/month"
        )));
    }
    out
}

pub fn link_categories(categories: &[String]) -> String {
    categories
        .iter()
        .map(|cat| {
            format!(
                r##"<a href="{CATEGORIES_PAGE}#{}">{}</a>"##,
                escape(cat),
                escape(&humanize_category(cat))
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_references(tool: &ToolRecord, id: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r##"<div class="panel-heading"><p id="{id}_pubs" class="panel-title subtitle"><a data-toggle="collapse" class="accordion-toggle collapsed" href="#{id}_pubs_c"><strong>Publications:</strong> {}, <strong>Preprints:</strong> {}, <strong>Total citations:</strong> {}</a></p></div>"##,
        tool.publication_count(),
        tool.preprint_count(),
        tool.citations
    ));
    out.push_str(&format!(
        r#"<div id="{id}_pubs_c" class="panel-collapse collapse"><ul class="list-group">"#
    ));

    let sections = [
        ("Publications", &tool.publications, true),
        ("Preprints", &tool.preprints, false),
    ];
    for (heading, items, published) in sections {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!(
            r#"<li class="list-group-item list-title"><h5>{heading}</h5></li>"#
        ));
        for publication in items {
            out.push_str(&render_publication(publication, published));
        }
    }

    out.push_str("</ul></div>");
    out
}

fn render_publication(publication: &Publication, published: bool) -> String {
    let mut out = format!(
        r#"<li class="list-group-item"><em>"{}"</em><br/>"#,
        escape(&publication.title)
    );

    if publication.is_arxiv() {
        let id = escape(publication.doi.replace("arxiv/", "").as_str());
        out.push_str(&format!(
            r#"<strong>arXiv: </strong> <a href="https://arxiv.org/abs/{id}">{id}</a>, "#
        ));
    } else {
        let doi = escape(&publication.doi);
        out.push_str(&format!(
            r#"<strong>DOI: </strong> <a href="https://doi.org/{doi}">{doi}</a>, "#
        ));
    }

    if published && let Some(date) = &publication.date {
        out.push_str(&format!("<strong>Published: </strong>{}, ", escape(date)));
    }

    if let Some(citations) = publication.citations {
        out.push_str(&format!("<strong>Citations: </strong> {citations}"));
    }

    out.push_str("</li>");
    out
}

fn github_shields(stats: Option<&RepoStats>) -> String {
    let (stars, forks, commit, colour) = match stats {
        Some(stats) => (
            stats.stars.to_string(),
            stats.forks.to_string(),
            escape(&stats.last_push_label),
            escape(&stats.last_push_colour),
        ),
        None => (
            SENTINEL_COUNT.to_owned(),
            SENTINEL_COUNT.to_owned(),
            SENTINEL_COMMIT.to_owned(),
            "blue".to_owned(),
        ),
    };

    format!(
        concat!(
            r#"<div class="github-shields">"#,
            r#"<div class="github-badge stars"><span>stars</span><span class="blue">{stars}</span></div>"#,
            r#"<div class="github-badge forks"><span>forks</span><span class="blue">{forks}</span></div>"#,
            r#"<div class="github-badge commits"><span>last commit</span><span class="commit-date {colour}">{commit}</span></div>"#,
            "</div>"
        ),
        stars = stars,
        forks = forks,
        colour = colour,
        commit = commit,
    )
}
