// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small R-tree over axis-aligned bounding boxes.
//!
//! Nodes hold up to [`MAX_ENTRIES`] children; insertion descends by least
//! area enlargement and splits quadratically. Removal condenses underfull
//! nodes and reinserts their entries. This is sized for editor workloads:
//! tens of thousands of boxes, incremental updates, rectangle and point
//! queries.

use core::fmt;

use kurbo::Rect;

/// Maximum entries per node.
pub(crate) const MAX_ENTRIES: usize = 16;
/// Nodes below this fill are dissolved and their entries reinserted.
pub(crate) const MIN_ENTRIES: usize = 4;

fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

fn rect_contains(rect: &Rect, x: f64, y: f64) -> bool {
    rect.x0 <= x && x <= rect.x1 && rect.y0 <= y && y <= rect.y1
}

fn union(a: &Rect, b: &Rect) -> Rect {
    Rect::new(
        a.x0.min(b.x0),
        a.y0.min(b.y0),
        a.x1.max(b.x1),
        a.y1.max(b.y1),
    )
}

fn area(rect: &Rect) -> f64 {
    (rect.x1 - rect.x0).max(0.0) * (rect.y1 - rect.y0).max(0.0)
}

fn enlargement(current: &Rect, added: &Rect) -> f64 {
    area(&union(current, added)) - area(current)
}

#[derive(Clone, Debug)]
enum Node<T> {
    Leaf(Vec<(Rect, T)>),
    Inner(Vec<(Rect, Node<T>)>),
}

impl<T: Copy + PartialEq> Node<T> {
    fn bounding(&self) -> Rect {
        let mut rects = match self {
            Self::Leaf(entries) => entries.iter().map(|(rect, _)| *rect),
            Self::Inner(children) => {
                return children
                    .iter()
                    .map(|(rect, _)| *rect)
                    .reduce(|a, b| union(&a, &b))
                    .expect("inner nodes are never empty");
            }
        };
        let first = rects.next().expect("leaves queried for bounds are never empty");
        rects.fold(first, |a, b| union(&a, &b))
    }

    fn len_entries(&self) -> usize {
        match self {
            Self::Leaf(entries) => entries.len(),
            Self::Inner(children) => children.len(),
        }
    }
}

/// An R-tree mapping bounding boxes to copyable payloads.
///
/// Duplicate `(box, payload)` pairs are not allowed; removal addresses
/// entries by exact pair.
#[derive(Clone)]
pub struct RTree<T> {
    root: Option<Node<T>>,
    len: usize,
}

impl<T> Default for RTree<T> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<T: Copy + PartialEq> RTree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts an entry.
    pub fn insert(&mut self, rect: Rect, payload: T) {
        self.len += 1;
        match self.root.take() {
            None => {
                self.root = Some(Node::Leaf(vec![(rect, payload)]));
            }
            Some(mut root) => {
                if let Some(sibling) = insert_rec(&mut root, rect, payload) {
                    let left_rect = root.bounding();
                    let right_rect = sibling.bounding();
                    self.root = Some(Node::Inner(vec![(left_rect, root), (right_rect, sibling)]));
                } else {
                    self.root = Some(root);
                }
            }
        }
    }

    /// Removes the entry matching the exact `(rect, payload)` pair.
    ///
    /// # Panics
    ///
    /// Panics when the entry is absent; removals always follow a matching
    /// insertion.
    pub fn remove(&mut self, rect: Rect, payload: T) {
        let mut root = self.root.take().expect("removal from an empty tree");
        let mut orphans = Vec::new();

        let removed = remove_rec(&mut root, &rect, &payload, &mut orphans);
        assert!(removed, "expected entry presence during removal");
        self.len -= 1;

        // Collapse trivial roots.
        let root = loop {
            match root {
                Node::Inner(mut children) if children.len() == 1 => {
                    root = children.pop().expect("length checked").1;
                }
                Node::Leaf(ref entries) if entries.is_empty() => break None,
                Node::Inner(ref children) if children.is_empty() => break None,
                other => break Some(other),
            }
        };
        self.root = root;

        // Orphans were already counted in `len`; re-inserting them must
        // not count them twice.
        for (orphan_rect, orphan_payload) in orphans {
            self.len -= 1;
            self.insert(orphan_rect, orphan_payload);
        }
    }

    /// Visits every entry whose box intersects `rect`.
    pub fn visit_rect(&self, rect: Rect, mut visit: impl FnMut(&Rect, &T)) {
        if let Some(root) = &self.root {
            visit_rect_rec(root, &rect, &mut visit);
        }
    }

    /// Visits every entry whose box contains the point.
    pub fn visit_point(&self, x: f64, y: f64, mut visit: impl FnMut(&Rect, &T)) {
        if let Some(root) = &self.root {
            visit_point_rec(root, x, y, &mut visit);
        }
    }

    /// Collects all entries, in unspecified order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Rect, T)> {
        let mut result = Vec::with_capacity(self.len);
        if let Some(root) = &self.root {
            collect_rec(root, &mut result);
        }
        result
    }
}

impl<T: Copy + PartialEq + fmt::Debug> fmt::Debug for RTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<RTree with {} entries>", self.len)
    }
}

/// Inserts into the subtree; returns a split-off sibling on overflow.
fn insert_rec<T: Copy + PartialEq>(node: &mut Node<T>, rect: Rect, payload: T) -> Option<Node<T>> {
    match node {
        Node::Leaf(entries) => {
            entries.push((rect, payload));
            (entries.len() > MAX_ENTRIES).then(|| Node::Leaf(split_entries(entries)))
        }
        Node::Inner(children) => {
            // Descend into the child needing the least enlargement;
            // ties break towards the smaller box.
            let best = (0..children.len())
                .min_by(|&a, &b| {
                    let ea = enlargement(&children[a].0, &rect);
                    let eb = enlargement(&children[b].0, &rect);
                    ea.total_cmp(&eb)
                        .then_with(|| area(&children[a].0).total_cmp(&area(&children[b].0)))
                })
                .expect("inner nodes are never empty");

            let (child_rect, child) = &mut children[best];
            let split = insert_rec(child, rect, payload);
            *child_rect = child.bounding();

            if let Some(sibling) = split {
                let sibling_rect = sibling.bounding();
                children.push((sibling_rect, sibling));
            }
            (children.len() > MAX_ENTRIES).then(|| Node::Inner(split_entries(children)))
        }
    }
}

/// Quadratic split: seeds the pair wasting the most area, then assigns
/// the rest by least enlargement with a minimum-fill guarantee.
fn split_entries<E: SplitEntry>(entries: &mut Vec<E>) -> Vec<E> {
    let (seed_a, seed_b) = {
        let mut worst = (0, 1);
        let mut worst_waste = f64::NEG_INFINITY;
        for a in 0..entries.len() {
            for b in (a + 1)..entries.len() {
                let waste = area(&union(&entries[a].rect(), &entries[b].rect()))
                    - area(&entries[a].rect())
                    - area(&entries[b].rect());
                if waste > worst_waste {
                    worst_waste = waste;
                    worst = (a, b);
                }
            }
        }
        worst
    };

    let mut group_b = Vec::new();
    // Remove the higher index first so the lower stays valid.
    group_b.push(entries.swap_remove(seed_b.max(seed_a)));
    let seed_a_entry = entries.swap_remove(seed_b.min(seed_a));
    let rest: Vec<E> = entries.drain(..).collect();
    entries.push(seed_a_entry);

    let mut rect_a = entries[0].rect();
    let mut rect_b = group_b[0].rect();

    for entry in rest {
        let grow_a = enlargement(&rect_a, &entry.rect());
        let grow_b = enlargement(&rect_b, &entry.rect());

        // Minimum fill takes precedence over the enlargement cost.
        let to_a = if entries.len() < MIN_ENTRIES && group_b.len() >= MIN_ENTRIES {
            true
        } else if group_b.len() < MIN_ENTRIES && entries.len() >= MIN_ENTRIES {
            false
        } else {
            grow_a <= grow_b
        };

        if to_a {
            rect_a = union(&rect_a, &entry.rect());
            entries.push(entry);
        } else {
            rect_b = union(&rect_b, &entry.rect());
            group_b.push(entry);
        }
    }

    group_b
}

trait SplitEntry {
    fn rect(&self) -> Rect;
}

impl<T> SplitEntry for (Rect, T) {
    fn rect(&self) -> Rect {
        self.0
    }
}

/// Removes the matching entry; underfull children dissolve into `orphans`.
fn remove_rec<T: Copy + PartialEq>(
    node: &mut Node<T>,
    rect: &Rect,
    payload: &T,
    orphans: &mut Vec<(Rect, T)>,
) -> bool {
    match node {
        Node::Leaf(entries) => {
            let Some(index) = entries
                .iter()
                .position(|(entry_rect, entry_payload)| entry_rect == rect && entry_payload == payload)
            else {
                return false;
            };
            entries.swap_remove(index);
            true
        }
        Node::Inner(children) => {
            let mut removed_at = None;
            for index in 0..children.len() {
                if !rects_intersect(&children[index].0, rect) {
                    continue;
                }
                if remove_rec(&mut children[index].1, rect, payload, orphans) {
                    removed_at = Some(index);
                    break;
                }
            }
            let Some(index) = removed_at else {
                return false;
            };

            if children[index].1.len_entries() < MIN_ENTRIES {
                let (_, child) = children.swap_remove(index);
                dissolve(child, orphans);
            } else {
                children[index].0 = children[index].1.bounding();
            }
            true
        }
    }
}

fn dissolve<T: Copy + PartialEq>(node: Node<T>, orphans: &mut Vec<(Rect, T)>) {
    match node {
        Node::Leaf(entries) => orphans.extend(entries),
        Node::Inner(children) => {
            for (_, child) in children {
                dissolve(child, orphans);
            }
        }
    }
}

fn visit_rect_rec<T>(node: &Node<T>, rect: &Rect, visit: &mut impl FnMut(&Rect, &T)) {
    match node {
        Node::Leaf(entries) => {
            for (entry_rect, payload) in entries {
                if rects_intersect(entry_rect, rect) {
                    visit(entry_rect, payload);
                }
            }
        }
        Node::Inner(children) => {
            for (child_rect, child) in children {
                if rects_intersect(child_rect, rect) {
                    visit_rect_rec(child, rect, visit);
                }
            }
        }
    }
}

fn visit_point_rec<T>(node: &Node<T>, x: f64, y: f64, visit: &mut impl FnMut(&Rect, &T)) {
    match node {
        Node::Leaf(entries) => {
            for (entry_rect, payload) in entries {
                if rect_contains(entry_rect, x, y) {
                    visit(entry_rect, payload);
                }
            }
        }
        Node::Inner(children) => {
            for (child_rect, child) in children {
                if rect_contains(child_rect, x, y) {
                    visit_point_rec(child, x, y, visit);
                }
            }
        }
    }
}

fn collect_rec<T: Copy>(node: &Node<T>, result: &mut Vec<(Rect, T)>) {
    match node {
        Node::Leaf(entries) => result.extend(entries.iter().copied()),
        Node::Inner(children) => {
            for (_, child) in children {
                collect_rec(child, result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_rect(x: f64, y: f64) -> Rect {
        Rect::new(x, y, x + 1.0, y + 1.0)
    }

    #[test]
    fn insert_query_remove_roundtrip() {
        let mut tree = RTree::new();
        for i in 0..100_i32 {
            tree.insert(unit_rect(f64::from(i) * 2.0, 0.0), i);
        }
        assert_eq!(tree.len(), 100);

        let mut hits = Vec::new();
        tree.visit_rect(Rect::new(10.0, 0.0, 20.0, 1.0), |_, &i| hits.push(i));
        hits.sort_unstable();
        assert_eq!(hits, [5, 6, 7, 8, 9, 10]);

        for i in 0..100_i32 {
            tree.remove(unit_rect(f64::from(i) * 2.0, 0.0), i);
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn point_queries_hit_containing_boxes() {
        let mut tree = RTree::new();
        tree.insert(Rect::new(0.0, 0.0, 4.0, 4.0), 1);
        tree.insert(Rect::new(2.0, 2.0, 6.0, 6.0), 2);
        tree.insert(Rect::new(10.0, 10.0, 12.0, 12.0), 3);

        let mut hits = Vec::new();
        tree.visit_point(3.0, 3.0, |_, &i| hits.push(i));
        hits.sort_unstable();
        assert_eq!(hits, [1, 2]);

        hits.clear();
        tree.visit_point(20.0, 20.0, |_, &i| hits.push(i));
        assert!(hits.is_empty());
    }

    #[test]
    fn removal_keeps_remaining_entries_reachable() {
        let mut tree = RTree::new();
        for i in 0..60_i32 {
            let x = f64::from(i % 10) * 3.0;
            let y = f64::from(i / 10) * 3.0;
            tree.insert(unit_rect(x, y), i);
        }
        for i in (0..60_i32).step_by(2) {
            let x = f64::from(i % 10) * 3.0;
            let y = f64::from(i / 10) * 3.0;
            tree.remove(unit_rect(x, y), i);
        }

        let mut seen: Vec<i32> = tree.entries().iter().map(|&(_, i)| i).collect();
        seen.sort_unstable();
        let expected: Vec<i32> = (0..60).filter(|i| i % 2 == 1).collect();
        assert_eq!(seen, expected);

        // Every remaining entry is still reachable through queries.
        for &i in &expected {
            let x = f64::from(i % 10) * 3.0;
            let y = f64::from(i / 10) * 3.0;
            let mut hits = Vec::new();
            tree.visit_point(x + 0.5, y + 0.5, |_, &found| hits.push(found));
            assert!(hits.contains(&i), "entry {i} lost after removals");
        }
    }
}
