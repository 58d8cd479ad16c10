//! End-to-end behavior of the navigation bar through the public API.

use sectionnav::idle::{BarState, IdleHide};
use sectionnav::nav::toggle_responsive;
use sectionnav::page::{ItemSpec, RESPONSIVE_CLASS};
use sectionnav::reconciler::Reconciler;
use sectionnav::scroll::{ActivationEvent, scroll_to_entry};
use sectionnav::viewport::{VisibilityChange, Viewport};
use sectionnav::{
    ActivePolicy, EntryKind, NavContainer, Page, PageController, RegionSpec, Settings,
    build_navigation, parse_markdown,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

fn intro_work() -> Page {
    Page::from_regions([
        RegionSpec::new("intro", "Intro"),
        RegionSpec::new("work", "Work"),
    ])
}

fn selected_labels(nav: &NavContainer) -> Vec<&str> {
    nav.entries()
        .iter()
        .filter(|e| e.is_selected())
        .map(|e| e.label.as_str())
        .collect()
}

#[test]
fn builds_one_entry_per_region_plus_expand() {
    for n in 0..6 {
        let page = Page::from_regions(
            (0..n).map(|i| RegionSpec::new(&format!("s{}", i), &format!("Section {}", i))),
        );
        let mut nav = NavContainer::new();
        build_navigation(&page, &mut nav);

        assert_eq!(nav.len(), n + 1);
        for (i, entry) in nav.entries()[..n].iter().enumerate() {
            assert_eq!(entry.label, format!("Section {}", i));
            assert_eq!(entry.target(), Some(format!("#s{}", i).as_str()));
        }
        assert_eq!(nav.entries()[n].kind, EntryKind::Expand);
        assert_eq!(nav.batch_insertions(), 1);
    }
}

#[test]
fn intro_work_scenario() {
    let mut page = intro_work();
    let mut nav = NavContainer::new();
    let index = build_navigation(&page, &mut nav);

    let labels: Vec<_> = nav.entries().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["Intro", "Work", "+"]);
    assert_eq!(nav.entries()[0].target(), Some("#intro"));
    assert_eq!(nav.entries()[1].target(), Some("#work"));

    let work = page.find_by_anchor("work").unwrap().key();
    let mut reconciler = Reconciler::new(ActivePolicy::Exclusive);
    reconciler.apply(
        &[VisibilityChange::new(work, true)],
        &mut page,
        &mut nav,
        &index,
    );

    assert_eq!(selected_labels(&nav), ["Work"]);
}

#[test]
fn single_active_region_selects_only_its_entry() {
    for policy in [ActivePolicy::Exclusive, ActivePolicy::Mirror] {
        let mut page = Page::from_regions([
            RegionSpec::new("a", "Alpha"),
            RegionSpec::new("b", "Beta"),
            RegionSpec::new("c", "Gamma"),
        ]);
        let mut nav = NavContainer::new();
        let index = build_navigation(&page, &mut nav);
        let keys: Vec<_> = page.regions().map(|r| r.key()).collect();

        let mut reconciler = Reconciler::new(policy);
        for (i, &key) in keys.iter().enumerate() {
            let batch: Vec<_> = keys
                .iter()
                .map(|&k| VisibilityChange::new(k, k == key))
                .collect();
            reconciler.apply(&batch, &mut page, &mut nav, &index);

            let selected: Vec<_> = nav
                .entries()
                .iter()
                .enumerate()
                .filter(|(_, e)| e.is_selected())
                .map(|(idx, _)| idx)
                .collect();
            assert_eq!(selected, [i], "{:?}", policy);
        }
    }
}

#[test]
fn reconciling_twice_is_idempotent() {
    let mut page = intro_work();
    let mut nav = NavContainer::new();
    let index = build_navigation(&page, &mut nav);
    let intro = page.find_by_anchor("intro").unwrap().key();

    let mut batches: VecDeque<Vec<VisibilityChange>> = VecDeque::new();
    batches.push_back(vec![VisibilityChange::new(intro, true)]);
    batches.push_back(vec![VisibilityChange::new(intro, true)]);

    let mut reconciler = Reconciler::default();
    let first = {
        let batch = batches.pop_front().unwrap();
        reconciler.apply(&batch, &mut page, &mut nav, &index)
    };
    let after_first = selected_labels(&nav).join(",");
    let second = reconciler.drain(&mut batches, &mut page, &mut nav, &index);

    assert_eq!(second, Some(first));
    assert_eq!(selected_labels(&nav).join(","), after_first);
    assert!(page.region(intro).unwrap().is_active());
}

#[test]
fn expand_twice_restores_layout_class() {
    let page = intro_work();
    let mut nav = NavContainer::new();
    build_navigation(&page, &mut nav);
    let before = nav.classes.contains(RESPONSIVE_CLASS);

    assert!(toggle_responsive(&mut nav));
    assert!(!toggle_responsive(&mut nav));
    assert_eq!(nav.classes.contains(RESPONSIVE_CLASS), before);

    // Same through the controller, activating the expand entry
    let mut controller = PageController::new(intro_work(), &Settings::default());
    let expand = controller.nav().len() - 1;
    let now = Instant::now();
    controller.activate(expand, now);
    controller.activate(expand, now);
    assert!(!controller.nav().is_responsive());
}

#[test]
fn bar_hides_after_quiet_period() {
    let start = Instant::now();

    let mut idle = IdleHide::default();
    idle.on_scroll(start);
    assert!(!idle.poll(start + Duration::from_millis(4999)));
    assert!(idle.poll(start + Duration::from_millis(5000)));
    assert_eq!(idle.state(), BarState::Hidden);
}

#[test]
fn scroll_at_4999ms_resets_the_timer() {
    let start = Instant::now();

    let mut idle = IdleHide::default();
    idle.on_scroll(start);
    let again = start + Duration::from_millis(4999);
    assert!(!idle.poll(again));
    idle.on_scroll(again);

    // The first deadline passes without hiding
    assert!(!idle.poll(start + Duration::from_millis(5000)));
    assert!(!idle.poll(again + Duration::from_millis(4999)));
    assert_eq!(idle.state(), BarState::Visible);
    assert!(idle.poll(again + Duration::from_millis(5000)));
}

#[test]
fn activating_a_removed_target_is_a_noop() {
    let mut page = intro_work();
    let mut nav = NavContainer::new();
    build_navigation(&page, &mut nav);
    let work = page.find_by_anchor("work").unwrap().key();
    page.remove_region(work);

    let layout = sectionnav::page::layout(&page, 40);
    let mut viewport = Viewport::new(10, layout.height());
    let mut event = ActivationEvent::new(1);
    let moved = scroll_to_entry(
        &mut event,
        &page,
        &nav,
        &layout,
        &mut viewport,
        Instant::now(),
    );

    assert!(!moved);
    assert!(event.default_prevented());
    assert_eq!(viewport.scroll_top(), 0);
    assert!(!viewport.is_animating());
    assert_eq!(nav.len(), 3);
    assert_eq!(page.region_count(), 1);
}

#[test]
fn malformed_region_does_not_block_the_others() {
    let page = Page::from_items([
        ItemSpec::Region(RegionSpec::new("intro", "Intro")),
        ItemSpec::Region(RegionSpec::default()),
        ItemSpec::Region(RegionSpec::new("work", "Work")),
    ]);
    let mut nav = NavContainer::new();
    build_navigation(&page, &mut nav);

    assert_eq!(nav.len(), 4);
    assert_eq!(nav.entries()[1].label, "");
    assert_eq!(nav.entries()[1].target(), Some(""));
    assert_eq!(nav.entries()[2].target(), Some("#work"));
}

#[test]
fn markdown_page_scrolls_and_selects() {
    let body = "line\n".repeat(12);
    let markdown = format!(
        "# Portfolio\n\nWelcome.\n\n## Intro\n{body}\n## Work\n{body}\n## About\n{body}"
    );
    let page = parse_markdown(&markdown, 2);
    assert_eq!(page.region_count(), 3);

    let mut controller = PageController::new(page, &Settings::default());
    let now = Instant::now();
    controller.relayout(60, 20, now);

    // Activate "Work" and let the animation finish
    assert!(controller.activate(1, now));
    controller.tick(now + Duration::from_millis(300));
    assert!(!controller.viewport().is_animating());

    let work = controller.page().find_by_anchor("work").unwrap().key();
    assert_eq!(controller.active_region(), Some(work));
    assert_eq!(selected_labels(controller.nav()), ["Work"]);
}
