//! Benchmarks for route table and navigation building.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dv_site::{
    ContentRef, LinkSpec, NavGroupSpec, PageDefinition, PageMeta, ReleaseBundle, SiteSettings,
    build_nav_tree, build_routes, render_config_js,
};

/// Create `sections * per_section` pages laid out like a release's `pages/` tree.
fn create_pages(sections: usize, per_section: usize) -> Vec<PageDefinition> {
    (0..sections)
        .flat_map(|s| {
            (0..per_section).map(move |p| {
                let path = format!("/docs/section-{s}/{p:03}_page");
                PageDefinition::new(
                    path.clone(),
                    PageMeta::titled(format!("Page {p}")),
                    ContentRef(format!("pages{path}.js")),
                )
            })
        })
        .collect()
}

fn create_nav(sections: usize, per_section: usize) -> Vec<NavGroupSpec> {
    (0..sections)
        .map(|s| {
            let items = (0..per_section)
                .map(|p| LinkSpec::internal(format!("/docs/section-{s}/{p:03}_page"), format!("Page {p}")))
                .collect();
            NavGroupSpec::group(format!("Section {s}"), "fa-book", format!("/section-{s}"), items)
        })
        .collect()
}

fn bench_build_routes(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_routes");

    for sections in [5, 20, 80] {
        let pages = create_pages(sections, 10);
        group.bench_with_input(BenchmarkId::from_parameter(pages.len()), &pages, |b, pages| {
            b.iter(|| build_routes(pages, "/docs/section-0/000_page").unwrap());
        });
    }

    group.finish();
}

fn bench_build_nav_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_nav_tree");

    for sections in [5, 20, 80] {
        let pages = create_pages(sections, 10);
        let routes = build_routes(&pages, "/docs/section-0/000_page").unwrap();
        let nav = create_nav(sections, 10);
        group.bench_with_input(BenchmarkId::from_parameter(pages.len()), &nav, |b, nav| {
            b.iter(|| build_nav_tree(nav, &routes).unwrap());
        });
    }

    group.finish();
}

fn bench_render_config_js(c: &mut Criterion) {
    let pages = create_pages(20, 10);
    let nav = create_nav(20, 10);
    let bundle = ReleaseBundle::build(
        "3.5.0",
        &["3.5.0".to_owned()],
        &SiteSettings::default(),
        &pages,
        &nav,
    )
    .unwrap();

    c.bench_function("render_config_js", |b| b.iter(|| render_config_js(&bundle)));
}

criterion_group!(
    benches,
    bench_build_routes,
    bench_build_nav_tree,
    bench_render_config_js
);
criterion_main!(benches);
