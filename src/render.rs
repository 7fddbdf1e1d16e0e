//! The tools page: sort, filter, lay out and format the tool list.

use std::collections::BTreeSet;

use crate::entry::{PanelView, TOOLS_PAGE, render_tool_entry};
use crate::filter::filter_by_categories;
use crate::formats::ToolRecord;
use crate::github::{BadgeSource, RepoSlug};
use crate::html::{escape, humanize_category};
use crate::layout::{Columns, Layout};
use crate::query::ListQuery;
use crate::session::{PanelState, RenderSession};
use crate::sort::{SortKey, sort_tools};

const COLUMN_CLASSES: &str = "col-lg-6 col-md-12 col-sm-12 col-xs-12";

const SORT_OPTIONS: [(SortKey, &str); 7] = [
    (SortKey::Name, "Name"),
    (SortKey::Cites, "Citations"),
    (SortKey::Refs, "References"),
    (SortKey::Pubs, "Publications"),
    (SortKey::Pres, "Preprints"),
    (SortKey::Added, "Date added"),
    (SortKey::Updated, "Date updated"),
];

#[derive(Debug)]
pub struct RenderedTools {
    pub html: String,
    pub layout: Layout,
    pub session: RenderSession,
}

/// Runs the full pipeline for one page load.
///
/// `fragment` is the URL fragment of the page address. When it names a
/// rendered tool, that panel is expanded, and with a `badges` source its
/// repository badges are looked up. Lookup failures leave the sentinel text.
pub async fn render_tools(
    mut tools: Vec<ToolRecord>,
    query: ListQuery,
    fragment: Option<&str>,
    badges: Option<&dyn BadgeSource>,
) -> RenderedTools {
    let all_categories = collect_categories(&tools);

    // Letter buckets are always filled from a name-ordered list.
    let key = if query.is_alphabetical() {
        Some(SortKey::Name)
    } else {
        query.sort
    };
    sort_tools(&mut tools, key);
    let tools = filter_by_categories(tools, &query.cats);
    let layout = if query.is_alphabetical() {
        Layout::alphabetical(tools)
    } else {
        Layout::columns(tools)
    };
    tracing::debug!(
        sort = ?query.sort,
        cats = ?query.cats,
        count = layout.tool_count(),
        "laid out tools"
    );

    let mut session = RenderSession::new(query);
    for tool in layout.tools() {
        session.register(&tool.name, has_repo_badges(tool));
    }

    if let Some(fragment) = fragment
        && let Some(toggle) = session.open_fragment(fragment)
        && toggle.enrich
        && let Some(badges) = badges
    {
        let id = fragment.trim_start_matches('#');
        if let Some(tool) = layout.tools().into_iter().find(|t| t.name == id) {
            enrich_panel(badges, &mut session, tool).await;
        }
    }

    let mut html = String::new();
    html.push_str(&render_manipulators(session.query(), &all_categories));
    html.push_str(&render_bookmarks(&layout));
    html.push_str(&render_list(&layout, &session));

    RenderedTools {
        html,
        layout,
        session,
    }
}

/// Looks up repository badges for one panel and stores them in the session.
/// Failures are logged and leave the panel's sentinel badges in place.
pub async fn enrich_panel(badges: &dyn BadgeSource, session: &mut RenderSession, tool: &ToolRecord) {
    let Some(slug) = tool.code.as_deref().and_then(RepoSlug::from_code_url) else {
        tracing::warn!(tool = %tool.name, "cannot derive owner/repo from code url");
        return;
    };

    match badges.repo_stats(&slug).await {
        Ok(stats) => {
            tracing::info!(tool = %tool.name, repo = %slug, stars = stats.stars, "enriched badges");
            session.record_enrichment(&tool.name, stats);
        }
        Err(err) => {
            tracing::warn!(tool = %tool.name, %err, "badge enrichment failed");
        }
    }
}

pub fn has_repo_badges(tool: &ToolRecord) -> bool {
    tool.code.is_some() && tool.github.is_some()
}

fn collect_categories(tools: &[ToolRecord]) -> Vec<String> {
    tools
        .iter()
        .flat_map(|tool| tool.categories.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sort select and category filter, pre-set to the current selection.
pub fn render_manipulators(query: &ListQuery, categories: &[String]) -> String {
    let current = query.sort.unwrap_or(SortKey::Name);

    let mut out = format!(r#"<form id="manipulators" method="get" action="{TOOLS_PAGE}">"#);
    out.push_str(r#"<select id="selectsort" name="sort">"#);
    for (key, label) in SORT_OPTIONS {
        let selected = if key == current { " selected" } else { "" };
        out.push_str(&format!(r#"<option value="{key}"{selected}>{label}</option>"#));
    }
    out.push_str("</select>");

    out.push_str(r#"<select name="cats" multiple>"#);
    for cat in categories {
        let selected = if query.cats.contains(cat) { " selected" } else { "" };
        out.push_str(&format!(
            r#"<option value="{}"{selected}>{}</option>"#,
            escape(cat),
            escape(&humanize_category(cat))
        ));
    }
    out.push_str("</select>");
    out.push_str(r#"<button id="category_submit" type="submit">Filter</button>"#);

    let reset = match query.sort {
        Some(sort) => ListQuery::default().with_sort(sort),
        None => ListQuery::default(),
    };
    out.push_str(&format!(
        r#"<a id="category_reset" href="{}">Reset</a>"#,
        escape(&reset.href(TOOLS_PAGE, None))
    ));
    out.push_str("</form>");
    out
}

/// Letter jump list; empty for the column layout.
pub fn render_bookmarks(layout: &Layout) -> String {
    let letters = layout.jump_letters();
    if letters.is_empty() {
        return String::new();
    }

    let mut out = String::from(r#"<ul id="name-bookmarks">"#);
    for letter in letters {
        let letter = escape(letter);
        out.push_str(&format!(
            r##"<li class="letter-menu{letter}"><a href="#anchor{letter}">{letter}</a></li>"##
        ));
    }
    out.push_str("</ul>");
    out
}

pub fn render_list(layout: &Layout, session: &RenderSession) -> String {
    let mut out = String::new();
    match layout {
        Layout::Columns(columns) => {
            out.push_str(r#"<div id="tools-list">"#);
            render_numbered_columns(&mut out, columns, session);
        }
        Layout::Alphabetical(buckets) => {
            out.push_str(r#"<div id="tools-list" class="name-sort">"#);
            for bucket in buckets {
                let letter = escape(&bucket.letter);
                out.push_str(&format!(
                    r#"<h3 id="anchor{letter}" class="tools-list">{letter}</h3>"#
                ));
                out.push_str(&format!(
                    r#"<div id="alpha{letter}-left" class="first-tools col-lg-6">"#
                ));
                for tool in &bucket.columns.first {
                    out.push_str(&render_tool_entry(tool, None, view(session, tool)));
                }
                out.push_str("</div>");
                out.push_str(&format!(
                    r#"<div id="alpha{letter}-right" class="second-tools col-lg-6">"#
                ));
                for tool in &bucket.columns.second {
                    out.push_str(&render_tool_entry(tool, None, view(session, tool)));
                }
                out.push_str("</div>");
            }
        }
    }
    out.push_str("</div>");
    out
}

fn render_numbered_columns(out: &mut String, columns: &Columns<ToolRecord>, session: &RenderSession) {
    let mut ordinal = 1;
    for (class, tools) in [("first-tools", &columns.first), ("second-tools", &columns.second)] {
        out.push_str(&format!(r#"<div class="{class} {COLUMN_CLASSES}">"#));
        for tool in tools {
            out.push_str(&render_tool_entry(tool, Some(ordinal), view(session, tool)));
            ordinal += 1;
        }
        out.push_str("</div>");
    }
}

fn view<'a>(session: &'a RenderSession, tool: &ToolRecord) -> PanelView<'a> {
    PanelView {
        expanded: session.state(&tool.name) == Some(PanelState::Expanded),
        stats: session.repo_stats(&tool.name),
    }
}
