//! Anchor extraction over a parsed HTML tree.
//!
//! The tree is walked with an explicit stack rather than recursion, so deeply
//! nested documents cannot exhaust the call stack. What the walk collects is
//! decided by a [`NodePolicy`]: [`AnchorFinder`] picks out `<a>` elements and
//! [`TextCollector`] gathers the text beneath a single anchor.
//!
//! The walk is last-in-first-out, so results are not in document order.

use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node};
use std::collections::HashSet;

/// A hyperlink found in a document: its `href` attribute and display text.
///
/// Both fields are empty strings when the anchor has no `href` or no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlLink {
    pub href: String,
    pub text: String,
}

/// Decides which nodes a [`walk`] collects and what it does with them.
pub trait NodePolicy {
    fn qualifies(&self, node: &Node) -> bool;
    fn process(&mut self, node: &Node);
}

/// Qualifies `<a>` elements.
#[derive(Debug, Default)]
pub struct AnchorFinder;

impl NodePolicy for AnchorFinder {
    fn qualifies(&self, node: &Node) -> bool {
        node.as_element().is_some_and(|el| el.name() == "a")
    }

    fn process(&mut self, _node: &Node) {}
}

/// Qualifies text nodes and concatenates their trimmed contents.
#[derive(Debug, Default)]
pub struct TextCollector {
    text: String,
}

impl TextCollector {
    pub fn into_text(self) -> String {
        self.text
    }
}

impl NodePolicy for TextCollector {
    fn qualifies(&self, node: &Node) -> bool {
        node.is_text()
    }

    fn process(&mut self, node: &Node) {
        if let Some(text) = node.as_text() {
            self.text.push_str(text.trim());
        }
    }
}

/// Depth-first walk from `root`, returning every node the policy qualifies.
///
/// Children are pushed before the node itself is evaluated, and each node is
/// visited at most once even if the tree were to contain a cycle.
pub fn walk<'a, P: NodePolicy>(root: NodeRef<'a, Node>, policy: &mut P) -> Vec<NodeRef<'a, Node>> {
    let mut found = Vec::new();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if !seen.insert(node.id()) {
            continue;
        }

        stack.extend(node.children());

        if policy.qualifies(node.value()) {
            policy.process(node.value());
            found.push(node);
        }
    }

    found
}

/// Concatenated text of every text node under `node`, in walk order.
pub fn link_text(node: NodeRef<'_, Node>) -> String {
    let mut collector = TextCollector::default();
    walk(node, &mut collector);
    collector.into_text()
}

/// Build an [`HtmlLink`] from an anchor node.
pub fn build_link(node: NodeRef<'_, Node>) -> HtmlLink {
    let href = node
        .value()
        .as_element()
        .and_then(|el| el.attr("href"))
        .unwrap_or_default()
        .to_string();

    HtmlLink {
        href,
        text: link_text(node),
    }
}

/// Every anchor in the tree rooted at `root`.
pub fn links_in(root: NodeRef<'_, Node>) -> Vec<HtmlLink> {
    walk(root, &mut AnchorFinder)
        .into_iter()
        .map(build_link)
        .collect()
}

/// Parse an HTML document and return its anchors.
///
/// The parser recovers from malformed markup, so this never fails.
pub fn parse_links(html: &str) -> Vec<HtmlLink> {
    let document = Html::parse_document(html);
    links_in(document.tree.root())
}
