use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use tokio::task::JoinHandle;

use crate::dom::{
    self, Element, Node, HIGHLIGHT_CLASSNAME, JSON_GRID_ELEMENT_CONTAINER_CLASSNAME,
};
use crate::state::AppState;

/// Quiet period between the last keystroke and the highlight pass.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// One full search pass over a mounted grid: strip old markers and
/// restore the text runs, then either collapse everything back (empty
/// query) or highlight matches and expand the containers holding them.
pub fn perform_search(root: &mut Element, query: &str) {
    remove_highlights(root);
    let query = query.trim();
    if query.is_empty() {
        collapse_all(root);
        return;
    }
    // Escaped and compiled case-insensitively; matching is plain
    // substring search with single-shot regex semantics per text run.
    let Ok(matcher) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return;
    };
    highlight_and_expand(root, &matcher);
}

/// Remove every highlight marker, splicing its text back into place.
pub fn remove_highlights(root: &mut Element) {
    let children = mem::take(root.children_mut());
    let mut rebuilt: Vec<Node> = Vec::with_capacity(children.len());
    for node in children {
        match node {
            Node::Element(mut element) => {
                if element.has_class(HIGHLIGHT_CLASSNAME) {
                    push_text(&mut rebuilt, element.text_content());
                } else {
                    remove_highlights(&mut element);
                    rebuilt.push(Node::Element(element));
                }
            }
            Node::Text(text) => push_text(&mut rebuilt, text),
        }
    }
    *root.children_mut() = rebuilt;
}

// Adjacent text runs merge back together, as a DOM normalize() would.
fn push_text(out: &mut Vec<Node>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = out.last_mut() {
        last.push_str(&text);
    } else {
        out.push(Node::Text(text));
    }
}

/// Collapse every expanded container that has an expander control; the
/// top-level container has none and stays expanded.
pub fn collapse_all(root: &mut Element) {
    root.for_each_mut(&mut |element: &mut Element| {
        if element.has_class(JSON_GRID_ELEMENT_CONTAINER_CLASSNAME) {
            dom::set_expanded(element, false);
        }
    });
}

// Wrap the first match in each text run, then expand this container when
// anything below it matched. Containers on paths without a match are
// never force-expanded.
fn highlight_and_expand(element: &mut Element, matcher: &Regex) -> bool {
    let mut matched = false;
    let children = mem::take(element.children_mut());
    let mut rebuilt = Vec::with_capacity(children.len());
    for node in children {
        match node {
            Node::Text(text) => {
                if text.trim().is_empty() {
                    rebuilt.push(Node::Text(text));
                    continue;
                }
                match matcher.find(&text) {
                    Some(found) => {
                        let (start, end) = (found.start(), found.end());
                        if start > 0 {
                            rebuilt.push(Node::Text(text[..start].to_string()));
                        }
                        rebuilt.push(Node::Element(
                            Element::new("span")
                                .with_class(HIGHLIGHT_CLASSNAME)
                                .with_text(&text[start..end]),
                        ));
                        if end < text.len() {
                            rebuilt.push(Node::Text(text[end..].to_string()));
                        }
                        matched = true;
                    }
                    None => rebuilt.push(Node::Text(text)),
                }
            }
            Node::Element(mut child) => {
                matched |= highlight_and_expand(&mut child, matcher);
                rebuilt.push(Node::Element(child));
            }
        }
    }
    *element.children_mut() = rebuilt;
    if matched && element.has_class(JSON_GRID_ELEMENT_CONTAINER_CLASSNAME) {
        dom::set_expanded(element, true);
    }
    matched
}

/// Debounced search driver. A new keystroke cancels any pending pass and
/// reschedules after the quiet period; a newer scheduled pass always
/// supersedes an older unstarted one, so at most one pass is in flight
/// and passes never run out of order.
pub struct SearchScheduler {
    state: Arc<AppState>,
    runtime: tokio::runtime::Handle,
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchScheduler {
    pub fn new(state: Arc<AppState>, runtime: tokio::runtime::Handle) -> Self {
        Self::with_delay(state, runtime, SEARCH_DEBOUNCE)
    }

    pub fn with_delay(
        state: Arc<AppState>,
        runtime: tokio::runtime::Handle,
        delay: Duration,
    ) -> Self {
        Self {
            state,
            runtime,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// Feed the current query text. The highlight pass runs against the
    /// mounted view once the quiet period elapses, unless superseded.
    pub fn input(&self, query: impl Into<String>) {
        let query = query.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);
        let delay = self.delay;
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }
            let mut view = state.view.write();
            if let Some(root) = view.as_mut() {
                perform_search(root, &query);
            }
        }));
    }
}
