//! Active-state reconciliation.
//!
//! Applies visibility batches to the Regions' active class and keeps the
//! navigation selection in step with it.

use crate::nav::{NavContainer, NavIndex};
use crate::page::{Page, RegionKey, SELECTED_CLASS};
use crate::viewport::{VisibilityChange, VisibilitySource};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How reported visibility maps onto the Regions' active class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivePolicy {
    /// Only the last visible Region in document order is active.
    #[default]
    Exclusive,
    /// Every visible Region is active, exactly as reported.
    Mirror,
}

impl std::str::FromStr for ActivePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclusive" => Ok(ActivePolicy::Exclusive),
            "mirror" => Ok(ActivePolicy::Mirror),
            other => Err(format!(
                "unknown active policy '{}' (expected exclusive or mirror)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    policy: ActivePolicy,
    /// Regions whose most recent report said they are past the threshold.
    visible: HashSet<RegionKey>,
}

impl Reconciler {
    pub fn new(policy: ActivePolicy) -> Self {
        Self {
            policy,
            visible: HashSet::new(),
        }
    }

    pub fn policy(&self) -> ActivePolicy {
        self.policy
    }

    pub fn is_reported_visible(&self, region: RegionKey) -> bool {
        self.visible.contains(&region)
    }

    /// Drop any reported visibility for a Region that left the page.
    pub fn forget(&mut self, region: RegionKey) {
        self.visible.remove(&region);
    }

    /// Apply one batch and resynchronize the selection.
    ///
    /// Returns the Region whose entry is now selected.
    pub fn apply(
        &mut self,
        batch: &[VisibilityChange],
        page: &mut Page,
        nav: &mut NavContainer,
        index: &NavIndex,
    ) -> Option<RegionKey> {
        for change in batch {
            if page.region(change.region).is_none() {
                log::debug!(
                    "ignoring visibility change for detached region {}",
                    change.region.index()
                );
                continue;
            }
            if change.visible {
                self.visible.insert(change.region);
            } else {
                self.visible.remove(&change.region);
            }
        }

        match self.policy {
            ActivePolicy::Mirror => {
                for region in page.regions_mut() {
                    let visible = self.visible.contains(&region.key());
                    region.set_active(visible);
                }
            }
            ActivePolicy::Exclusive => {
                let winner = page
                    .regions()
                    .filter(|r| self.visible.contains(&r.key()))
                    .last()
                    .map(|r| r.key());
                for region in page.regions_mut() {
                    region.set_active(Some(region.key()) == winner);
                }
            }
        }

        let active = page.last_active().map(|r| r.key());
        select_entry(nav, index, active);
        log::debug!(
            "reconciled {} change(s); active region: {:?}",
            batch.len(),
            active.map(RegionKey::index)
        );
        active
    }

    /// Apply every batch pending in `source`, in order.
    pub fn drain(
        &mut self,
        source: &mut impl VisibilitySource,
        page: &mut Page,
        nav: &mut NavContainer,
        index: &NavIndex,
    ) -> Option<Option<RegionKey>> {
        let mut last = None;
        while let Some(batch) = source.next_batch() {
            last = Some(self.apply(&batch, page, nav, index));
        }
        last
    }
}

/// Clear every entry's selection, then select the entry for `active`.
fn select_entry(nav: &mut NavContainer, index: &NavIndex, active: Option<RegionKey>) {
    let target = active.and_then(|key| index.entry_for(key));
    for (i, entry) in nav.entries_mut().iter_mut().enumerate() {
        entry.classes.set(SELECTED_CLASS, Some(i) == target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::build_navigation;
    use crate::page::RegionSpec;
    use std::collections::VecDeque;

    struct Fixture {
        page: Page,
        nav: NavContainer,
        index: NavIndex,
        keys: Vec<RegionKey>,
    }

    fn fixture(labels: &[&str]) -> Fixture {
        let page = Page::from_regions(
            labels
                .iter()
                .map(|l| RegionSpec::new(&l.to_lowercase(), l)),
        );
        let mut nav = NavContainer::new();
        let index = build_navigation(&page, &mut nav);
        let keys = page.regions().map(|r| r.key()).collect();
        Fixture {
            page,
            nav,
            index,
            keys,
        }
    }

    fn selected_labels(nav: &NavContainer) -> Vec<&str> {
        nav.entries()
            .iter()
            .filter(|e| e.is_selected())
            .map(|e| e.label.as_str())
            .collect()
    }

    #[test]
    fn test_single_active_region_selects_its_entry() {
        let mut f = fixture(&["Intro", "Work", "About"]);
        let mut reconciler = Reconciler::default();
        let active = reconciler.apply(
            &[VisibilityChange::new(f.keys[1], true)],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        assert_eq!(active, Some(f.keys[1]));
        assert_eq!(selected_labels(&f.nav), vec!["Work"]);
    }

    #[test]
    fn test_forget_drops_reported_visibility() {
        let mut f = fixture(&["Intro", "Work"]);
        let mut reconciler = Reconciler::default();
        reconciler.apply(
            &[
                VisibilityChange::new(f.keys[0], true),
                VisibilityChange::new(f.keys[1], true),
            ],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        assert!(reconciler.is_reported_visible(f.keys[1]));

        f.page.remove_region(f.keys[1]);
        reconciler.forget(f.keys[1]);
        assert!(!reconciler.is_reported_visible(f.keys[1]));
        assert!(reconciler.is_reported_visible(f.keys[0]));

        let active = reconciler.apply(&[], &mut f.page, &mut f.nav, &f.index);
        assert_eq!(active, Some(f.keys[0]));
        assert_eq!(selected_labels(&f.nav), vec!["Intro"]);
    }

    #[test]
    fn test_reapplying_same_state_is_idempotent() {
        let mut f = fixture(&["Intro", "Work"]);
        let mut reconciler = Reconciler::default();
        let batch = [VisibilityChange::new(f.keys[0], true)];
        reconciler.apply(&batch, &mut f.page, &mut f.nav, &f.index);
        let first = f.nav.selected();
        reconciler.apply(&batch, &mut f.page, &mut f.nav, &f.index);
        assert_eq!(f.nav.selected(), first);
        assert_eq!(selected_labels(&f.nav), vec!["Intro"]);
    }

    #[test]
    fn test_nothing_visible_clears_selection() {
        let mut f = fixture(&["Intro", "Work"]);
        let mut reconciler = Reconciler::default();
        reconciler.apply(
            &[VisibilityChange::new(f.keys[0], true)],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        let active = reconciler.apply(
            &[VisibilityChange::new(f.keys[0], false)],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        assert!(active.is_none());
        assert!(f.nav.selected().is_none());
    }

    #[test]
    fn test_mirror_keeps_both_flags_and_selects_later() {
        let mut f = fixture(&["Intro", "Work"]);
        let mut reconciler = Reconciler::new(ActivePolicy::Mirror);
        reconciler.apply(
            &[
                VisibilityChange::new(f.keys[0], true),
                VisibilityChange::new(f.keys[1], true),
            ],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        assert!(f.page.regions().all(|r| r.is_active()));
        assert_eq!(selected_labels(&f.nav), vec!["Work"]);
    }

    #[test]
    fn test_exclusive_keeps_single_active_and_falls_back() {
        let mut f = fixture(&["Intro", "Work"]);
        let mut reconciler = Reconciler::new(ActivePolicy::Exclusive);
        reconciler.apply(
            &[
                VisibilityChange::new(f.keys[0], true),
                VisibilityChange::new(f.keys[1], true),
            ],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        let active: Vec<_> = f.page.regions().filter(|r| r.is_active()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Work");

        // The later region leaves; the earlier one is still reported visible
        reconciler.apply(
            &[VisibilityChange::new(f.keys[1], false)],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        assert_eq!(f.page.last_active().unwrap().label, "Intro");
        assert_eq!(selected_labels(&f.nav), vec!["Intro"]);
    }

    #[test]
    fn test_duplicate_labels_resolved_by_index() {
        let mut f = fixture(&["Same", "Same"]);
        let mut reconciler = Reconciler::default();
        reconciler.apply(
            &[VisibilityChange::new(f.keys[0], true)],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        assert_eq!(f.nav.selected(), Some(0));
    }

    #[test]
    fn test_changes_for_removed_region_are_ignored() {
        let mut f = fixture(&["Intro", "Work"]);
        f.page.remove_region(f.keys[0]);
        let mut reconciler = Reconciler::default();
        let active = reconciler.apply(
            &[VisibilityChange::new(f.keys[0], true)],
            &mut f.page,
            &mut f.nav,
            &f.index,
        );
        assert!(active.is_none());
        assert!(!reconciler.is_reported_visible(f.keys[0]));
    }

    #[test]
    fn test_drain_applies_batches_in_order() {
        let mut f = fixture(&["Intro", "Work"]);
        let mut source = VecDeque::from(vec![
            vec![VisibilityChange::new(f.keys[0], true)],
            vec![
                VisibilityChange::new(f.keys[0], false),
                VisibilityChange::new(f.keys[1], true),
            ],
        ]);
        let mut reconciler = Reconciler::default();
        let last = reconciler.drain(&mut source, &mut f.page, &mut f.nav, &f.index);
        assert_eq!(last, Some(Some(f.keys[1])));
        assert_eq!(selected_labels(&f.nav), vec!["Work"]);
        assert!(reconciler.drain(&mut source, &mut f.page, &mut f.nav, &f.index).is_none());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Mirror".parse::<ActivePolicy>(), Ok(ActivePolicy::Mirror));
        assert_eq!(
            "exclusive".parse::<ActivePolicy>(),
            Ok(ActivePolicy::Exclusive)
        );
        assert!("sometimes".parse::<ActivePolicy>().is_err());
    }
}
