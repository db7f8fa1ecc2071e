use inventory_console::domain::listing::PageDescriptor;
use inventory_console::domain::query::FilterParams;
use inventory_console::pagination::{PaginationControls, PaginationWindow, Viewport};

fn descriptor(current_page: u32, total_pages: u32) -> PageDescriptor {
    PageDescriptor {
        current_page,
        total_pages,
        page_size: 10,
        total: u64::from(total_pages) * 10,
        has_next: current_page < total_pages,
        has_prev: current_page > 1,
    }
}

#[test]
fn small_collections_show_every_page() {
    for max in [Viewport::Narrow.max_visible(), Viewport::Wide.max_visible()] {
        for total in 1..=max {
            for current in 1..=total {
                let window = PaginationWindow::compute(current, total, max);
                assert_eq!(window.pages, (1..=total).collect::<Vec<_>>());
                assert!(!window.leading_ellipsis);
                assert!(!window.trailing_ellipsis);
            }
        }
    }
}

#[test]
fn first_page_of_twenty() {
    let window = PaginationWindow::compute(1, 20, 10);
    assert_eq!(window.pages, (1..=10).collect::<Vec<_>>());
    assert!(!window.leading_ellipsis);
    assert!(window.trailing_ellipsis);
}

#[test]
fn last_page_of_twenty() {
    let window = PaginationWindow::compute(20, 20, 10);
    assert_eq!(window.pages, (11..=20).collect::<Vec<_>>());
    assert!(window.leading_ellipsis);
    assert!(!window.trailing_ellipsis);
}

#[test]
fn large_collections_always_show_a_full_contiguous_window() {
    for max in [3, 10] {
        for total in (max + 1)..=40 {
            for current in 1..=total {
                let window = PaginationWindow::compute(current, total, max);
                assert_eq!(window.pages.len(), max as usize);
                assert!(window.pages.contains(&current));
                assert!(window.pages.windows(2).all(|pair| pair[1] == pair[0] + 1));

                let first = window.pages[0];
                let last = window.pages[window.pages.len() - 1];
                assert_eq!(window.leading_ellipsis, first > 1);
                assert_eq!(window.trailing_ellipsis, last < total);
            }
        }
    }
}

#[test]
fn empty_collection_has_no_window_and_no_navigation() {
    let page = descriptor(1, 0);
    assert!(PaginationWindow::for_viewport(&page, Viewport::Wide).pages.is_empty());
    assert_eq!(page.prev(), None);
    assert_eq!(page.next(), None);
}

#[test]
fn out_of_range_targets_are_rejected() {
    let page = descriptor(2, 5);
    assert_eq!(page.target(0), None);
    assert_eq!(page.target(6), None);
    assert_eq!(page.target(5), Some(5));
    assert_eq!(page.prev(), Some(1));
    assert_eq!(page.next(), Some(3));
    assert_eq!(descriptor(5, 5).next(), None);
}

#[test]
fn controls_render_both_viewports_and_keep_filters() {
    let params = FilterParams::parse("search=dune&order=DESC&page=7");
    let controls = PaginationControls::new("/books", &params, &descriptor(7, 12));

    assert_eq!(controls.narrow.pages.len(), 3);
    assert_eq!(controls.wide.pages.len(), 10);
    assert_eq!(
        controls.prev_href.as_deref(),
        Some("/books?search=dune&order=DESC&page=6")
    );
    assert_eq!(
        controls.next_href.as_deref(),
        Some("/books?search=dune&order=DESC&page=8")
    );
    let current = controls
        .wide
        .pages
        .iter()
        .find(|link| link.current)
        .expect("current page is in the window");
    assert_eq!(current.number, 7);
}

fn render_pagination(controls: &PaginationControls) -> String {
    let mut tera = tera::Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_template_file("templates/partials/macros.html", Some("partials/macros.html"))
        .expect("macros parse");
    tera.add_raw_template(
        "pager.html",
        r#"{% import "partials/macros.html" as macros %}{{ macros::pagination(controls=controls) }}"#,
    )
    .expect("pager parses");
    let mut context = tera::Context::new();
    context.insert("controls", controls);
    tera.render("pager.html", &context).expect("pager renders")
}

#[test]
fn truncated_windows_link_the_first_and_last_pages() {
    let params = FilterParams::default();
    let html = render_pagination(&PaginationControls::new("/books", &params, &descriptor(10, 20)));

    assert!(html.contains(r#"href="/books">1</a>"#));
    assert!(html.contains(r#"href="/books?page=20">20</a>"#));
    assert!(html.contains("Página 10 de 20"));
}

#[test]
fn single_and_empty_lists_keep_disabled_navigation() {
    let params = FilterParams::default();

    let single = render_pagination(&PaginationControls::new("/books", &params, &descriptor(1, 1)));
    assert!(single.contains(r#"<span class="page-link" aria-disabled="true">Anterior</span>"#));
    assert!(single.contains(r#"<span class="page-link" aria-disabled="true">Siguiente</span>"#));
    assert!(single.contains("Página 1 de 1"));

    let empty = render_pagination(&PaginationControls::new("/books", &params, &descriptor(1, 0)));
    assert!(empty.contains("Anterior"));
    assert!(empty.contains("Siguiente"));
    assert!(!empty.contains("Página"));
}
