//! Page-group randomization.
//!
//! Randomization permutes blocks of the navigation list; the document keeps
//! its page order. Each non-zero page group is one block, placed where the
//! group first appears. Entries of group 0 never move. The chosen order is
//! stored in the document as a comma-separated list of group numbers so a
//! resumed session sees the same sequence.

use std::collections::{BTreeSet, HashMap, HashSet};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use quizzer_types::NavigationEntry;
use quizzer_xml::Document;

use crate::config::SessionConfig;
use crate::error::QuizError;
use crate::tags::{self, attr};

/// The page-group order for this document, creating and storing one when
/// randomization is enabled and none is stored yet.
///
/// Returns `None` when randomization is disabled.
pub fn page_group_permutation(
    doc: &mut Document,
    navigation: &[NavigationEntry],
    config: &SessionConfig,
) -> Result<Option<Vec<u32>>, QuizError> {
    let root = doc.root();
    let enabled = config
        .randomize_page_groups
        .unwrap_or_else(|| tags::is_yes(doc.attribute(root, attr::RANDOMIZE_PAGE_GROUPS)));
    if !enabled {
        return Ok(None);
    }

    let groups: BTreeSet<u32> = navigation
        .iter()
        .map(|e| e.page_group)
        .filter(|&g| g != 0)
        .collect();

    let stored = doc.last_child(root, tags::RANDOMIZED_PAGE_GROUP_INDICES);
    if let Some(node) = stored {
        match parse_permutation(doc.text(node).unwrap_or_default()) {
            Some(order) if order.iter().copied().collect::<BTreeSet<_>>() == groups
                && order.len() == groups.len() =>
            {
                return Ok(Some(order));
            }
            _ => log::warn!(
                "Stored page-group order '{}' does not match the quiz's page groups; drawing a new one",
                doc.text(node).unwrap_or_default()
            ),
        }
    }

    let mut order: Vec<u32> = groups.into_iter().collect();
    match config.random_seed {
        Some(seed) => order.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => order.shuffle(&mut rand::rng()),
    }

    let text = order
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(",");
    match stored {
        Some(node) => doc.set_text(node, Some(&text))?,
        None => {
            doc.add_element(root, tags::RANDOMIZED_PAGE_GROUP_INDICES, Some(&text), &[])?;
        }
    }
    log::info!("Randomized page groups: {}", text);
    Ok(Some(order))
}

fn parse_permutation(text: &str) -> Option<Vec<u32>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(Vec::new());
    }
    text.split(',').map(|s| s.trim().parse::<u32>().ok()).collect()
}

enum Slot {
    Fixed(NavigationEntry),
    Group,
}

/// Reorders `navigation` so non-zero page groups follow `order`.
///
/// Groups missing from `order` keep their relative order after the listed
/// ones. Repeated or unknown group numbers in `order` are ignored.
pub fn apply_randomization(navigation: &[NavigationEntry], order: &[u32]) -> Vec<NavigationEntry> {
    let mut slots = Vec::new();
    let mut first_seen = Vec::new();
    let mut members: HashMap<u32, Vec<NavigationEntry>> = HashMap::new();

    for entry in navigation {
        if entry.page_group == 0 {
            slots.push(Slot::Fixed(*entry));
            continue;
        }
        let block = members.entry(entry.page_group).or_default();
        if block.is_empty() {
            slots.push(Slot::Group);
            first_seen.push(entry.page_group);
        }
        block.push(*entry);
    }

    let mut listed = HashSet::new();
    let mut group_order: Vec<u32> = order
        .iter()
        .copied()
        .filter(|g| members.contains_key(g) && listed.insert(*g))
        .collect();
    if group_order.len() < order.len() {
        log::warn!("Ignoring unknown or repeated page groups in order {order:?}");
    }
    for g in first_seen {
        if !group_order.contains(&g) {
            group_order.push(g);
        }
    }

    let mut next_group = group_order.into_iter();
    let mut result = Vec::with_capacity(navigation.len());
    for slot in slots {
        match slot {
            Slot::Fixed(entry) => result.push(entry),
            Slot::Group => {
                if let Some(block) = next_group.next().and_then(|g| members.remove(&g)) {
                    result.extend(block);
                }
            }
        }
    }
    result
}
