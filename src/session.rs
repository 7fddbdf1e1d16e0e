//! Accordion state for one rendered page.
//!
//! Every panel starts collapsed and at most one panel is expanded at a time.
//! Panels with a code repository carry GitHub badges that start as sentinel
//! text; the first expansion of such a panel asks for enrichment, and no
//! later expansion asks again, whether or not the lookup succeeded.

use std::collections::HashMap;

use crate::formats::RepoStats;
use crate::query::ListQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    /// Panel has no repository badges.
    NoRepository,
    /// Badges still show sentinel text and no lookup has been requested.
    Sentinel,
    /// A lookup was requested; badges keep their sentinel text until a
    /// result is recorded.
    Requested,
    Populated(RepoStats),
}

/// Outcome of expanding or collapsing a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub state: PanelState,
    /// The caller should run the badge lookup for this panel now.
    pub enrich: bool,
}

#[derive(Debug, Clone)]
struct Panel {
    id: String,
    enrichment: Enrichment,
}

#[derive(Debug, Clone, Default)]
pub struct RenderSession {
    query: ListQuery,
    panels: Vec<Panel>,
    index: HashMap<String, usize>,
    expanded: Option<usize>,
}

impl RenderSession {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Adds a collapsed panel. Registering an id twice keeps the first panel,
    /// which is also where a fragment link would land.
    pub fn register(&mut self, id: &str, enrichable: bool) {
        if self.index.contains_key(id) {
            tracing::debug!(panel = id, "panel id registered twice; keeping the first");
            return;
        }
        let enrichment = if enrichable {
            Enrichment::Sentinel
        } else {
            Enrichment::NoRepository
        };
        self.index.insert(id.to_owned(), self.panels.len());
        self.panels.push(Panel {
            id: id.to_owned(),
            enrichment,
        });
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn state(&self, id: &str) -> Option<PanelState> {
        let idx = *self.index.get(id)?;
        Some(if self.expanded == Some(idx) {
            PanelState::Expanded
        } else {
            PanelState::Collapsed
        })
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.map(|idx| self.panels[idx].id.as_str())
    }

    pub fn enrichment(&self, id: &str) -> Option<&Enrichment> {
        let idx = *self.index.get(id)?;
        Some(&self.panels[idx].enrichment)
    }

    pub fn repo_stats(&self, id: &str) -> Option<&RepoStats> {
        match self.enrichment(id)? {
            Enrichment::Populated(stats) => Some(stats),
            _ => None,
        }
    }

    /// Page-load navigation: when the fragment names a panel, collapse
    /// everything and expand that panel. Unknown fragments change nothing.
    pub fn open_fragment(&mut self, fragment: &str) -> Option<Toggle> {
        let id = fragment.trim_start_matches('#');
        if id.is_empty() {
            return None;
        }
        let Some(&idx) = self.index.get(id) else {
            tracing::debug!(fragment = id, "fragment does not match a rendered panel");
            return None;
        };

        self.expanded = None;
        Some(self.expand(idx))
    }

    /// Header click: expands a collapsed panel (collapsing whichever panel was
    /// open) or collapses the open one.
    pub fn toggle(&mut self, id: &str) -> Option<Toggle> {
        let idx = *self.index.get(id)?;
        if self.expanded == Some(idx) {
            self.expanded = None;
            return Some(Toggle {
                state: PanelState::Collapsed,
                enrich: false,
            });
        }
        Some(self.expand(idx))
    }

    /// Stores a lookup result; ignored for panels without repository badges.
    pub fn record_enrichment(&mut self, id: &str, stats: RepoStats) {
        let Some(&idx) = self.index.get(id) else {
            return;
        };
        let panel = &mut self.panels[idx];
        if panel.enrichment == Enrichment::NoRepository {
            return;
        }
        panel.enrichment = Enrichment::Populated(stats);
    }

    fn expand(&mut self, idx: usize) -> Toggle {
        self.expanded = Some(idx);
        let panel = &mut self.panels[idx];
        let enrich = panel.enrichment == Enrichment::Sentinel;
        if enrich {
            panel.enrichment = Enrichment::Requested;
        }
        Toggle {
            state: PanelState::Expanded,
            enrich,
        }
    }
}
