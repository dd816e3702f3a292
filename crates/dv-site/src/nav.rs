//! Navigation tree construction.
//!
//! The navigation drawer is authored as an ordered list of [`NavGroupSpec`]
//! entries. [`build_nav_tree`] turns it into a [`NavTree`], keeping the
//! authored order exactly and cross-checking every internal link against the
//! release's [`RouteTable`].

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::SiteError;
use crate::route::RouteTable;

/// Link target that opens a new browser tab.
pub const BLANK_TARGET: &str = "_blank";

/// Authored link entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LinkSpec {
    /// Link target path or URL.
    pub href: String,
    /// Display title. Internal links fall back to the route title.
    #[serde(default)]
    pub title: Option<String>,
    /// Icon id (top-level links only).
    #[serde(default)]
    pub action: Option<String>,
    /// Browser target (e.g. `_blank`).
    #[serde(default)]
    pub target: Option<String>,
}

impl LinkSpec {
    /// Internal link with an explicit title.
    #[must_use]
    pub fn internal(href: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: Some(title.into()),
            action: None,
            target: None,
        }
    }

    /// External link opened in a new tab.
    #[must_use]
    pub fn external(href: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: Some(title.into()),
            action: None,
            target: Some(BLANK_TARGET.to_owned()),
        }
    }

    /// Whether the link leaves the site and is exempt from route checks.
    #[must_use]
    pub fn is_external(&self) -> bool {
        is_external(&self.href, self.target.as_deref())
    }
}

/// Authored navigation entry, as written in a release's nav file.
///
/// ```yaml
/// - header: Core documentation
/// - title: About
///   action: assistant
///   group: /about
///   items:
///     - href: /docs/about/01_overview
///       title: Overview
/// - divider: true
/// - title: GitHub
///   action: fa-github-square
///   href: https://github.com/oracle/coherence-operator
///   target: _blank
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NavGroupSpec {
    /// Section caption.
    Header {
        /// Caption text.
        header: String,
    },
    /// Visual separator. `divider: false` entries are dropped.
    Divider {
        /// Must be `true` to render.
        divider: bool,
    },
    /// Collapsible group of links.
    Group {
        /// Group title.
        title: String,
        /// Icon id.
        #[serde(default)]
        action: Option<String>,
        /// Path pattern that expands the group.
        group: String,
        /// Ordered child links.
        items: Vec<LinkSpec>,
    },
    /// Top-level link.
    Link(LinkSpec),
}

impl NavGroupSpec {
    /// Section caption entry.
    #[must_use]
    pub fn header(text: impl Into<String>) -> Self {
        Self::Header {
            header: text.into(),
        }
    }

    /// Separator entry.
    #[must_use]
    pub fn divider() -> Self {
        Self::Divider { divider: true }
    }

    /// Group entry.
    #[must_use]
    pub fn group(
        title: impl Into<String>,
        action: impl Into<String>,
        group: impl Into<String>,
        items: Vec<LinkSpec>,
    ) -> Self {
        Self::Group {
            title: title.into(),
            action: Some(action.into()),
            group: group.into(),
            items,
        }
    }
}

/// Navigable link in the built tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkNode {
    /// Link target path or URL.
    pub href: String,
    /// Display title.
    pub title: String,
    /// Icon id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Browser target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl LinkNode {
    /// Whether the link leaves the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        is_external(&self.href, self.target.as_deref())
    }
}

/// Group of links in the built tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupNode {
    /// Group title.
    pub title: String,
    /// Icon id.
    pub action: Option<String>,
    /// Path pattern that expands the group.
    pub group: String,
    /// Ordered child links.
    pub items: Vec<LinkNode>,
}

impl GroupNode {
    /// Child hrefs that do not match the group pattern.
    ///
    /// The drawer expands a group when its pattern occurs in the current
    /// path, so every internal child is expected to contain it.
    #[must_use]
    pub fn mismatched_hrefs(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|link| !link.is_external() && !link.href.contains(self.group.as_str()))
            .map(|link| link.href.as_str())
            .collect()
    }
}

/// Entry of the built navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavNode {
    /// Section caption (not navigable).
    Header(String),
    /// Separator (not navigable).
    Divider,
    /// Collapsible group.
    Group(GroupNode),
    /// Top-level link.
    Link(LinkNode),
}

impl Serialize for NavNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Header(text) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("header", text)?;
                map.end()
            }
            Self::Divider => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("divider", &true)?;
                map.end()
            }
            Self::Group(group) => group.serialize(serializer),
            Self::Link(link) => link.serialize(serializer),
        }
    }
}

/// Group whose children do not follow its path pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixMismatch {
    /// Group title.
    pub title: String,
    /// Group pattern.
    pub group: String,
    /// Child hrefs that do not contain the pattern.
    pub hrefs: Vec<String>,
}

/// Ordered navigation tree for one release.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    nodes: Vec<NavNode>,
}

impl NavTree {
    /// Nodes in display order.
    #[must_use]
    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All links, top-level and grouped, in display order.
    pub fn links(&self) -> impl Iterator<Item = &LinkNode> {
        self.nodes.iter().flat_map(|node| match node {
            NavNode::Group(group) => group.items.as_slice(),
            NavNode::Link(link) => std::slice::from_ref(link),
            NavNode::Header(_) | NavNode::Divider => &[],
        })
    }

    /// Hrefs of links that must resolve to a route.
    pub fn internal_links(&self) -> impl Iterator<Item = &str> {
        self.links()
            .filter(|link| !link.is_external())
            .map(|link| link.href.as_str())
    }

    /// Groups whose children do not contain the group pattern.
    #[must_use]
    pub fn prefix_mismatches(&self) -> Vec<PrefixMismatch> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                NavNode::Group(group) => Some(group),
                _ => None,
            })
            .filter_map(|group| {
                let hrefs = group.mismatched_hrefs();
                (!hrefs.is_empty()).then(|| PrefixMismatch {
                    title: group.title.clone(),
                    group: group.group.clone(),
                    hrefs: hrefs.into_iter().map(str::to_owned).collect(),
                })
            })
            .collect()
    }
}

/// Build the navigation tree for a release.
///
/// Walks `specs` in authored order. Every internal link must match a route
/// path exactly; all offending hrefs are collected before failing.
///
/// # Errors
///
/// Returns [`SiteError::DanglingNavLinks`] listing every internal link
/// without a matching route.
pub fn build_nav_tree(specs: &[NavGroupSpec], routes: &RouteTable) -> Result<NavTree, SiteError> {
    let mut dangling = Vec::new();
    let mut nodes = Vec::with_capacity(specs.len());

    for spec in specs {
        match spec {
            NavGroupSpec::Header { header } => nodes.push(NavNode::Header(header.clone())),
            NavGroupSpec::Divider { divider: true } => nodes.push(NavNode::Divider),
            NavGroupSpec::Divider { divider: false } => {
                tracing::warn!("Skipping navigation divider set to false");
            }
            NavGroupSpec::Group {
                title,
                action,
                group,
                items,
            } => {
                let items = items
                    .iter()
                    .map(|item| resolve_link(item, routes, &mut dangling))
                    .collect();
                nodes.push(NavNode::Group(GroupNode {
                    title: title.clone(),
                    action: action.clone(),
                    group: group.clone(),
                    items,
                }));
            }
            NavGroupSpec::Link(link) => {
                nodes.push(NavNode::Link(resolve_link(link, routes, &mut dangling)));
            }
        }
    }

    if !dangling.is_empty() {
        return Err(SiteError::DanglingNavLinks { hrefs: dangling });
    }

    let tree = NavTree { nodes };
    for mismatch in tree.prefix_mismatches() {
        tracing::warn!(
            group = %mismatch.group,
            title = %mismatch.title,
            hrefs = ?mismatch.hrefs,
            "Navigation group pattern does not match its links"
        );
    }

    tracing::debug!(nodes = tree.len(), "Built navigation tree");
    Ok(tree)
}

fn resolve_link(spec: &LinkSpec, routes: &RouteTable, dangling: &mut Vec<String>) -> LinkNode {
    let route_title = if spec.is_external() {
        None
    } else {
        match routes.get(&spec.href) {
            Some(route) => route.meta().map(|meta| meta.title.clone()),
            None => {
                dangling.push(spec.href.clone());
                None
            }
        }
    };

    let title = spec
        .title
        .clone()
        .or(route_title)
        .unwrap_or_else(|| spec.href.clone());

    LinkNode {
        href: spec.href.clone(),
        title,
        action: spec.action.clone(),
        target: spec.target.clone(),
    }
}

fn is_external(href: &str, target: Option<&str>) -> bool {
    target == Some(BLANK_TARGET) || href.contains("://") || href.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::page::{ContentRef, PageDefinition, PageMeta};
    use crate::route::build_routes;

    fn routes() -> RouteTable {
        let pages: Vec<_> = [
            ("/about/01_overview", "Overview"),
            ("/about/02_introduction", "Introduction"),
            ("/install/01_installation", "Installation"),
        ]
        .into_iter()
        .map(|(path, title)| {
            PageDefinition::new(path, PageMeta::titled(title), ContentRef(path.to_owned()))
        })
        .collect();
        build_routes(&pages, "/about/01_overview").unwrap()
    }

    fn specs() -> Vec<NavGroupSpec> {
        vec![
            NavGroupSpec::header("Core documentation"),
            NavGroupSpec::group(
                "About",
                "assistant",
                "/about",
                vec![
                    LinkSpec::internal("/about/01_overview", "Overview"),
                    LinkSpec::internal("/about/02_introduction", "Introduction"),
                ],
            ),
            NavGroupSpec::group(
                "Installation",
                "fa-save",
                "/install",
                vec![LinkSpec::internal("/install/01_installation", "Installation")],
            ),
            NavGroupSpec::divider(),
            NavGroupSpec::header("Additional resources"),
            NavGroupSpec::Link(LinkSpec {
                action: Some("fa-github-square".to_owned()),
                ..LinkSpec::external("https://github.com/oracle/coherence-operator", "GitHub")
            }),
        ]
    }

    #[test]
    fn test_build_nav_tree_preserves_order() {
        let tree = build_nav_tree(&specs(), &routes()).unwrap();

        assert_eq!(tree.len(), 6);
        assert_eq!(tree.nodes()[0], NavNode::Header("Core documentation".to_owned()));
        assert!(matches!(&tree.nodes()[1], NavNode::Group(g) if g.title == "About"));
        assert!(matches!(&tree.nodes()[2], NavNode::Group(g) if g.title == "Installation"));
        assert_eq!(tree.nodes()[3], NavNode::Divider);
        assert!(matches!(&tree.nodes()[5], NavNode::Link(l) if l.title == "GitHub"));
    }

    #[test]
    fn test_build_nav_tree_is_deterministic() {
        let routes = routes();

        let first = build_nav_tree(&specs(), &routes).unwrap();
        let second = build_nav_tree(&specs(), &routes).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_nav_tree_reports_all_dangling_links() {
        let mut specs = specs();
        specs.push(NavGroupSpec::group(
            "Broken",
            "fa-ban",
            "/",
            vec![
                LinkSpec::internal("/about/nope", "Nope"),
                LinkSpec::internal("/about/01_overview", "Overview"),
                LinkSpec::internal("/install/missing", "Missing"),
            ],
        ));

        let err = build_nav_tree(&specs, &routes()).unwrap_err();

        assert_eq!(
            err,
            SiteError::DanglingNavLinks {
                hrefs: vec!["/about/nope".to_owned(), "/install/missing".to_owned()]
            }
        );
    }

    #[test]
    fn test_external_links_are_not_validated() {
        let specs = vec![
            NavGroupSpec::Link(LinkSpec::external("https://coherence.community", "Community")),
            NavGroupSpec::Link(LinkSpec {
                href: "https://example.com/no-target".to_owned(),
                title: Some("Scheme only".to_owned()),
                action: None,
                target: None,
            }),
        ];

        let tree = build_nav_tree(&specs, &routes()).unwrap();

        assert_eq!(tree.internal_links().count(), 0);
        assert_eq!(tree.links().count(), 2);
    }

    #[test]
    fn test_missing_title_falls_back_to_route_title() {
        let specs = vec![NavGroupSpec::group(
            "About",
            "assistant",
            "/about",
            vec![LinkSpec {
                href: "/about/02_introduction".to_owned(),
                title: None,
                action: None,
                target: None,
            }],
        )];

        let tree = build_nav_tree(&specs, &routes()).unwrap();
        let link = tree.links().next().unwrap();

        assert_eq!(link.title, "Introduction");
    }

    #[test]
    fn test_redirect_paths_count_as_routes() {
        let specs = vec![NavGroupSpec::Link(LinkSpec::internal("/", "Home"))];

        let tree = build_nav_tree(&specs, &routes()).unwrap();

        assert_eq!(tree.internal_links().collect::<Vec<_>>(), vec!["/"]);
    }

    #[test]
    fn test_false_divider_is_dropped() {
        let specs = vec![
            NavGroupSpec::header("Docs"),
            NavGroupSpec::Divider { divider: false },
        ];

        let tree = build_nav_tree(&specs, &routes()).unwrap();

        assert_eq!(tree.nodes(), &[NavNode::Header("Docs".to_owned())]);
    }

    #[test]
    fn test_prefix_mismatches() {
        let specs = vec![NavGroupSpec::group(
            "Installation",
            "fa-save",
            "/install",
            vec![
                LinkSpec::internal("/install/01_installation", "Installation"),
                LinkSpec::internal("/about/01_overview", "Overview"),
            ],
        )];

        let tree = build_nav_tree(&specs, &routes()).unwrap();

        assert_eq!(
            tree.prefix_mismatches(),
            vec![PrefixMismatch {
                title: "Installation".to_owned(),
                group: "/install".to_owned(),
                hrefs: vec!["/about/01_overview".to_owned()],
            }]
        );
    }

    #[test]
    fn test_group_pattern_matches_anywhere_in_path() {
        let group = GroupNode {
            title: "About".to_owned(),
            action: None,
            group: "/about".to_owned(),
            items: vec![LinkNode {
                href: "/docs/about/01_overview".to_owned(),
                title: "Overview".to_owned(),
                action: None,
                target: None,
            }],
        };

        assert!(group.mismatched_hrefs().is_empty());
    }

    #[test]
    fn test_deserialize_specs_from_yaml() {
        let yaml = r"
- header: Core documentation
- title: About
  action: assistant
  group: /about
  items:
    - href: /about/01_overview
      title: Overview
    - href: /about/02_introduction
- divider: true
- title: Slack
  action: fa-slack
  href: https://join.slack.com/t/oraclecoherence
  target: _blank
";
        let specs: Vec<NavGroupSpec> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0], NavGroupSpec::header("Core documentation"));
        assert!(matches!(&specs[1], NavGroupSpec::Group { items, .. } if items.len() == 2));
        assert_eq!(specs[2], NavGroupSpec::divider());
        assert!(matches!(&specs[3], NavGroupSpec::Link(l) if l.is_external()));
    }

    #[test]
    fn test_nav_serialization_shape() {
        let tree = build_nav_tree(&specs(), &routes()).unwrap();
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json[0], serde_json::json!({"header": "Core documentation"}));
        assert_eq!(json[1]["group"], "/about");
        assert_eq!(
            json[1]["items"][0],
            serde_json::json!({"href": "/about/01_overview", "title": "Overview"})
        );
        assert_eq!(json[3], serde_json::json!({"divider": true}));
        assert_eq!(json[5]["target"], "_blank");
    }
}
