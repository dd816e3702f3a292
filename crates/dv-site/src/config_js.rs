//! `config.js` rendering.
//!
//! Produces the per-release configuration module consumed by the doc-view
//! front end: `createConfig()`, `createRoutes()` and `createNav()`, each
//! returning a literal. The layout matches the modules already deployed under
//! `docs/<release>/main/config.js`, so regenerated files diff cleanly.

use std::fmt::Write;

use crate::bundle::ReleaseBundle;
use crate::nav::{LinkNode, NavNode};
use crate::page::PageMeta;
use crate::route::{ComponentRef, Route, RouteTarget};
use crate::site_config::SiteConfig;

/// Render a bundle as a `config.js` module.
#[must_use]
pub fn render_config_js(bundle: &ReleaseBundle) -> String {
    let mut js = String::with_capacity(256 * (bundle.routes.len() + bundle.nav.len()));
    render_config(&mut js, &bundle.config);
    js.push('\n');
    render_routes(&mut js, bundle.routes.routes());
    js.push('\n');
    render_nav(&mut js, bundle.nav.nodes());
    js
}

fn render_config(js: &mut String, config: &SiteConfig) {
    js.push_str("function createConfig() {\n    return {\n");
    let _ = writeln!(js, "        home: {},", json_string(&config.home));
    let _ = writeln!(js, "        release: {},", json_string(&config.release));

    js.push_str("        releases: [\n");
    let releases: Vec<String> = config
        .releases
        .iter()
        .map(|r| format!("            {}", json_string(r)))
        .collect();
    js.push_str(&releases.join(",\n"));
    js.push_str("\n        ],\n");

    js.push_str("        pathColors: {\n");
    let colors: Vec<String> = config
        .path_colors
        .iter()
        .map(|(pattern, color)| format!("            {}: {}", json_string(pattern), json_string(color)))
        .collect();
    js.push_str(&colors.join(",\n"));
    js.push_str("\n        },\n");

    let theme = &config.theme;
    js.push_str("        theme: {\n");
    let _ = writeln!(js, "            primary: {},", js_string(&theme.primary));
    let _ = writeln!(js, "            secondary: {},", js_string(&theme.secondary));
    let _ = writeln!(js, "            accent: {},", js_string(&theme.accent));
    let _ = writeln!(js, "            error: {},", js_string(&theme.error));
    let _ = writeln!(js, "            info: {},", js_string(&theme.info));
    let _ = writeln!(js, "            success: {},", js_string(&theme.success));
    let _ = writeln!(js, "            warning: {}", js_string(&theme.warning));
    js.push_str("        },\n");

    let _ = writeln!(js, "        navTitle: {},", js_string(&config.nav_title));
    let _ = writeln!(js, "        navIcon: {},", js_nullable(config.nav_icon.as_deref()));
    let _ = writeln!(js, "        navLogo: {}", js_nullable(config.nav_logo.as_deref()));
    js.push_str("    };\n}\n");
}

fn render_routes(js: &mut String, routes: &[Route]) {
    js.push_str("function createRoutes(){\n    return [\n");
    let entries: Vec<String> = routes.iter().map(render_route).collect();
    js.push_str(&entries.join(",\n"));
    js.push_str("\n    ];\n}\n");
}

fn render_route(route: &Route) -> String {
    let mut js = String::from("        {\n");
    match &route.target {
        RouteTarget::Page { meta, component } => {
            let _ = writeln!(js, "            path: {},", js_string(&route.path));
            render_meta(&mut js, meta);
            let _ = writeln!(js, "            component: {}", render_component(component));
        }
        RouteTarget::Redirect { redirect } => {
            let _ = writeln!(
                js,
                "            path: {}, redirect: {}",
                js_string(&route.path),
                js_string(redirect)
            );
        }
    }
    js.push_str("        }");
    js
}

fn render_meta(js: &mut String, meta: &PageMeta) {
    js.push_str("            meta: {\n");
    let _ = writeln!(js, "                h1: {},", js_string(&meta.h1));
    let _ = writeln!(js, "                title: {},", js_string(&meta.title));
    let _ = writeln!(js, "                h1Prefix: {},", js_nullable(meta.h1_prefix.as_deref()));
    let _ = writeln!(
        js,
        "                description: {},",
        js_nullable(meta.description.as_deref())
    );
    let _ = writeln!(js, "                keywords: {},", js_nullable(meta.keywords.as_deref()));
    let _ = writeln!(
        js,
        "                customLayout: {},",
        js_nullable(meta.custom_layout.as_deref())
    );
    let _ = writeln!(js, "                hasNav: {}", meta.has_nav);
    js.push_str("            },\n");
}

fn render_component(component: &ComponentRef) -> String {
    let params = if component.params.is_empty() {
        "{}".to_owned()
    } else {
        let pairs: Vec<String> = component
            .params
            .iter()
            .map(|(k, v)| format!("{}: {}", json_string(k), js_string(v)))
            .collect();
        format!("{{ {} }}", pairs.join(", "))
    };
    format!(
        "loadPage({}, {}, {params})",
        js_string(&component.key),
        js_string(&component.url_path)
    )
}

fn render_nav(js: &mut String, nodes: &[NavNode]) {
    if nodes.is_empty() {
        js.push_str("function createNav(){\n    return [];\n}\n");
        return;
    }
    js.push_str("function createNav(){\n    return [\n");
    let entries: Vec<String> = nodes.iter().map(render_nav_node).collect();
    js.push_str(&entries.join(",\n"));
    js.push_str("\n    ];\n}\n");
}

fn render_nav_node(node: &NavNode) -> String {
    match node {
        NavNode::Header(text) => format!("        {{ header: {} }}", js_string(text)),
        NavNode::Divider => "        { divider: true }".to_owned(),
        NavNode::Group(group) => {
            let mut js = String::from("        {\n");
            let _ = writeln!(js, "            title: {},", js_string(&group.title));
            let _ = writeln!(js, "            action: {},", js_nullable(group.action.as_deref()));
            let _ = writeln!(js, "            group: {},", js_string(&group.group));
            if group.items.is_empty() {
                js.push_str("            items: []\n        }");
                return js;
            }
            js.push_str("            items: [\n");
            let items: Vec<String> = group
                .items
                .iter()
                .map(|link| format!("                {}", render_group_item(link)))
                .collect();
            js.push_str(&items.join(",\n"));
            js.push_str("\n            ]\n        }");
            js
        }
        NavNode::Link(link) => {
            let mut fields = vec![format!("            title: {}", js_string(&link.title))];
            if let Some(action) = &link.action {
                fields.push(format!("            action: {}", js_string(action)));
            }
            fields.push(format!("            href: {}", js_string(&link.href)));
            if let Some(target) = &link.target {
                fields.push(format!("            target: {}", js_string(target)));
            }
            format!("        {{\n{}\n        }}", fields.join(",\n"))
        }
    }
}

fn render_group_item(link: &LinkNode) -> String {
    let mut js = format!(
        "{{ href: {}, title: {}",
        js_string(&link.href),
        js_string(&link.title)
    );
    if let Some(action) = &link.action {
        let _ = write!(js, ", action: {}", js_string(action));
    }
    if let Some(target) = &link.target {
        let _ = write!(js, ", target: {}", js_string(target));
    }
    js.push_str(" }");
    js
}

/// Double-quoted string literal.
fn json_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Single-quoted string literal, escaped the way the deployed modules are.
fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn js_nullable(value: Option<&str>) -> String {
    value.map_or_else(|| "null".to_owned(), js_string)
}
