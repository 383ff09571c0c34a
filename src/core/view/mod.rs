//! List view logic
//!
//! Tabs, search filtering and ordering of the profile list.

use crate::core::collection::CollectionsData;
use crate::core::profile::{Profile, ProfileKey};

/// One tab of the profile list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    All,
    History,
    Collection(String),
}

impl Tab {
    pub fn id(&self) -> &str {
        match self {
            Tab::All => "all",
            Tab::History => "history",
            Tab::Collection(name) => name,
        }
    }

    /// Built-in tabs cannot be deleted
    pub fn is_default(&self) -> bool {
        !matches!(self, Tab::Collection(_))
    }
}

/// `all`, `history`, then one tab per collection
pub fn tabs(collections: &[String]) -> Vec<Tab> {
    let mut tabs = vec![Tab::All, Tab::History];
    tabs.extend(collections.iter().cloned().map(Tab::Collection));
    tabs
}

pub fn next_tab(tabs: &[Tab], current: &Tab) -> Tab {
    if tabs.is_empty() {
        return current.clone();
    }
    let idx = tabs.iter().position(|t| t == current).map_or(0, |i| (i + 1) % tabs.len());
    tabs[idx].clone()
}

pub fn prev_tab(tabs: &[Tab], current: &Tab) -> Tab {
    if tabs.is_empty() {
        return current.clone();
    }
    let idx = match tabs.iter().position(|t| t == current) {
        Some(0) | None => tabs.len() - 1,
        Some(i) => i - 1,
    };
    tabs[idx].clone()
}

/// Does every whitespace-separated term of `query` appear in the profile?
pub fn matches_query(profile: &Profile, query: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        profile.name,
        profile.browser.display_name(),
        profile.browser.id(),
        profile.directory
    )
    .to_lowercase();

    query
        .split_whitespace()
        .all(|term| haystack.contains(&term.to_lowercase()))
}

pub fn filter<'a>(list: Vec<&'a Profile>, query: &str) -> Vec<&'a Profile> {
    list.into_iter().filter(|p| matches_query(p, query)).collect()
}

/// Order by browser, then profile name
pub fn sort(list: &mut [&Profile]) {
    list.sort_by(|a, b| {
        a.browser
            .cmp(&b.browser)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Resolve keys to discovered profiles, keeping key order and skipping stale keys
pub fn map_keys<'a>(profiles: &'a [Profile], keys: &[ProfileKey]) -> Vec<&'a Profile> {
    keys.iter()
        .filter_map(|key| {
            profiles
                .iter()
                .find(|p| p.browser == key.browser && p.directory == key.directory)
        })
        .collect()
}

/// Profiles shown in `tab` for the current search query
pub fn visible<'a>(
    tab: &Tab,
    profiles: &'a [Profile],
    history: &[ProfileKey],
    collections: &CollectionsData,
    query: &str,
) -> Vec<&'a Profile> {
    match tab {
        Tab::All => filter(profiles.iter().collect(), query),
        Tab::History => filter(map_keys(profiles, history), query),
        Tab::Collection(name) => {
            let mut list = filter(map_keys(profiles, &collections.keys(name)), query);
            sort(&mut list);
            list
        }
    }
}

/// Keep the focused row inside a list of `len` items
pub fn clamp_focus(focus: usize, len: usize) -> usize {
    focus.min(len.saturating_sub(1))
}

/// Navigation keys pressed in one frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NavKeys {
    pub up: bool,
    pub down: bool,
    pub prev: bool,
    pub next: bool,
    pub enter: bool,
}

/// Selection state after applying [`NavKeys`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub tab: Tab,
    pub focus: usize,
    /// Focus or tab changed
    pub moved: bool,
    /// Index in the (possibly new) tab's list to launch
    pub launch: Option<usize>,
}

/// Apply one frame of keyboard input
///
/// Tab switches happen first, so Enter always refers to the list of the
/// tab that ends up selected.
pub fn navigate(
    tabs: &[Tab],
    current: &Tab,
    focus: usize,
    keys: NavKeys,
    len_of: impl Fn(&Tab) -> usize,
) -> Selection {
    let mut tab = current.clone();
    let mut focus = focus;
    let mut moved = false;

    if keys.prev || keys.next {
        tab = if keys.prev {
            prev_tab(tabs, &tab)
        } else {
            next_tab(tabs, &tab)
        };
        moved = true;
    }

    let len = len_of(&tab);
    focus = clamp_focus(focus, len);
    if keys.up && focus > 0 {
        focus -= 1;
        moved = true;
    }
    if keys.down && focus + 1 < len {
        focus += 1;
        moved = true;
    }

    let launch = (keys.enter && focus < len).then_some(focus);
    Selection {
        tab,
        focus,
        moved,
        launch,
    }
}
