// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! The retained drawing surface.
//!
//! A [`Surface`] is a tree of classed groups, each holding an ordered list
//! of marks. It mirrors the shape of the SVG node tree a browser-based
//! renderer would maintain: groups are addressed by class token, carry a
//! translation, and can be removed and recreated wholesale (which is how the
//! charting layer keeps re-renders idempotent).

use kurbo::Vec2;

use crate::mark::{Mark, MarkId};

/// Identity of a group on a [`Surface`].
///
/// Ids are unique for the lifetime of the surface and are never reused, so a
/// stale id after a group was removed simply resolves to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(u64);

#[derive(Clone, Debug)]
pub(crate) struct Group {
    id: GroupId,
    parent: Option<GroupId>,
    class: String,
    translate: Vec2,
    marks: Vec<Mark>,
}

/// A retained tree of classed mark groups.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    groups: Vec<Group>,
    next_id: u64,
}

impl Surface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a root group with the given class string.
    ///
    /// The class string may hold several space-separated tokens, like an SVG
    /// `class` attribute.
    pub fn group(&mut self, class: &str) -> GroupId {
        self.insert(None, class)
    }

    /// Appends a child group under `parent`.
    pub fn group_under(&mut self, parent: GroupId, class: &str) -> GroupId {
        self.insert(Some(parent), class)
    }

    fn insert(&mut self, parent: Option<GroupId>, class: &str) -> GroupId {
        let id = GroupId(self.next_id);
        self.next_id += 1;
        self.groups.push(Group {
            id,
            parent,
            class: class.to_owned(),
            translate: Vec2::ZERO,
            marks: Vec::new(),
        });
        id
    }

    /// Removes a group and all of its descendants. Unknown ids are ignored.
    pub fn remove_group(&mut self, id: GroupId) {
        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            doomed.extend(
                self.groups
                    .iter()
                    .filter(|g| g.parent == Some(parent))
                    .map(|g| g.id),
            );
            i += 1;
        }
        self.groups.retain(|g| !doomed.contains(&g.id));
    }

    /// Removes every group whose class list contains `token`, including
    /// descendants of matching groups.
    pub fn remove_class(&mut self, token: &str) {
        let matching: Vec<GroupId> = self.groups_with_class(token);
        for id in matching {
            self.remove_group(id);
        }
    }

    /// Returns the first group (in insertion order) whose class list
    /// contains `token`.
    pub fn find(&self, token: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|g| class_contains(&g.class, token))
            .map(|g| g.id)
    }

    /// Returns every group whose class list contains `token`, in insertion
    /// order.
    pub fn groups_with_class(&self, token: &str) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|g| class_contains(&g.class, token))
            .map(|g| g.id)
            .collect()
    }

    /// Sets a group's translation.
    pub fn set_translate(&mut self, id: GroupId, translate: Vec2) {
        if let Some(g) = self.group_mut(id) {
            g.translate = translate;
        }
    }

    /// Returns a group's translation, or zero for unknown ids.
    pub fn translate(&self, id: GroupId) -> Vec2 {
        self.get(id).map(|g| g.translate).unwrap_or(Vec2::ZERO)
    }

    /// Replaces a group's marks.
    pub fn set_marks(&mut self, id: GroupId, marks: Vec<Mark>) {
        if let Some(g) = self.group_mut(id) {
            g.marks = marks;
        }
    }

    /// Appends a mark to a group.
    pub fn push_mark(&mut self, id: GroupId, mark: Mark) {
        if let Some(g) = self.group_mut(id) {
            g.marks.push(mark);
        }
    }

    /// Returns a group's marks, or an empty slice for unknown ids.
    pub fn marks(&self, id: GroupId) -> &[Mark] {
        self.get(id).map(|g| g.marks.as_slice()).unwrap_or(&[])
    }

    /// Finds a mark anywhere on the surface by id.
    ///
    /// Used by hover handlers to retarget an already-drawn mark.
    pub fn mark_mut(&mut self, id: MarkId) -> Option<&mut Mark> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.marks.iter_mut())
            .find(|m| m.id == id)
    }

    /// Returns a group's class string, or `""` for unknown ids.
    pub fn class(&self, id: GroupId) -> &str {
        self.get(id).map(|g| g.class.as_str()).unwrap_or("")
    }

    /// Direct children of `id`, in insertion order.
    pub fn children(&self, id: GroupId) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|g| g.parent == Some(id))
            .map(|g| g.id)
            .collect()
    }

    /// Number of groups currently on the surface.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of marks across all groups.
    pub fn mark_count(&self) -> usize {
        self.groups.iter().map(|g| g.marks.len()).sum()
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub(crate) fn roots(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.groups
            .iter()
            .filter(|g| g.parent.is_none())
            .map(|g| g.id)
    }

    pub(crate) fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }
}

impl Group {
    pub(crate) fn class(&self) -> &str {
        &self.class
    }

    pub(crate) fn translate(&self) -> Vec2 {
        self.translate
    }

    pub(crate) fn marks(&self) -> &[Mark] {
        &self.marks
    }
}

fn class_contains(class: &str, token: &str) -> bool {
    class.split_whitespace().any(|t| t == token)
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use peniko::Color;

    use super::*;

    #[test]
    fn find_matches_class_tokens_not_substrings() {
        let mut s = Surface::new();
        s.group("plinth-axis plinth-axis-x");
        assert!(s.find("plinth-axis").is_some());
        assert!(s.find("plinth-axis-x").is_some());
        assert!(s.find("plinth-ax").is_none());
    }

    #[test]
    fn remove_class_drops_descendants() {
        let mut s = Surface::new();
        let canvas = s.group("canvas");
        let area = s.group_under(canvas, "area");
        let layer = s.group_under(area, "layer-0");
        s.push_mark(
            layer,
            Mark::rect(
                MarkId::from_raw(1),
                Rect::new(0.0, 0.0, 1.0, 1.0),
                Color::BLACK,
            ),
        );
        assert_eq!(s.group_count(), 3);

        s.remove_class("area");
        assert_eq!(s.group_count(), 1);
        assert_eq!(s.mark_count(), 0);
        assert!(s.find("layer-0").is_none());
    }

    #[test]
    fn stale_ids_resolve_to_nothing_after_removal() {
        let mut s = Surface::new();
        let g = s.group("gone");
        s.remove_group(g);
        let g2 = s.group("kept");
        assert_ne!(g, g2);
        assert_eq!(s.marks(g), &[]);
        s.push_mark(
            g,
            Mark::rect(
                MarkId::from_raw(9),
                Rect::new(0.0, 0.0, 1.0, 1.0),
                Color::BLACK,
            ),
        );
        assert_eq!(s.mark_count(), 0);
    }

    #[test]
    fn mark_mut_finds_marks_across_groups() {
        let mut s = Surface::new();
        let a = s.group("a");
        let b = s.group("b");
        s.push_mark(
            a,
            Mark::rect(
                MarkId::from_raw(1),
                Rect::new(0.0, 0.0, 1.0, 1.0),
                Color::BLACK,
            ),
        );
        s.push_mark(
            b,
            Mark::rect(
                MarkId::from_raw(2),
                Rect::new(0.0, 0.0, 1.0, 1.0),
                Color::BLACK,
            ),
        );
        let m = s.mark_mut(MarkId::from_raw(2)).expect("mark 2 exists");
        m.opacity = 0.5;
        assert_eq!(s.marks(b)[0].opacity, 0.5);
    }
}
