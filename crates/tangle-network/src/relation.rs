//! The relation hierarchy: scopes that dynamically built subgraphs hang off.
//!
//! Every propagator owns a relation; the cells and propagators created while
//! that relation is the active scope become its members. Tearing down a
//! relation subtree therefore removes exactly what a compound propagator
//! (or an apply-subnet instantiation) built.

use indexmap::IndexMap;
use tangle_core::{CellId, PropagatorId, RelationId};

/// A node in the relation hierarchy.
#[derive(Clone, Debug)]
pub struct Relation {
    id: RelationId,
    name: String,
    parent: Option<RelationId>,
    children: Vec<RelationId>,
    depth: u32,
    owner: Option<PropagatorId>,
    cells: Vec<CellId>,
    propagators: Vec<PropagatorId>,
}

impl Relation {
    /// Relation id.
    pub fn id(&self) -> RelationId {
        self.id
    }

    /// Relation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent relation, `None` for the root.
    pub fn parent(&self) -> Option<RelationId> {
        self.parent
    }

    /// Child relations in creation order.
    pub fn children(&self) -> &[RelationId] {
        &self.children
    }

    /// Abstraction level: root is 0, each child one deeper than its parent
    /// at creation time. Never recomputed.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The propagator this relation belongs to, if any.
    pub fn owner(&self) -> Option<PropagatorId> {
        self.owner
    }

    /// Cells created under this relation.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Propagators created under this relation.
    pub fn propagators(&self) -> &[PropagatorId] {
        &self.propagators
    }
}

/// Owner of every [`Relation`]. Parents hold their children; children keep
/// only the parent's id.
#[derive(Debug)]
pub struct RelationTree {
    nodes: IndexMap<RelationId, Relation>,
    root: RelationId,
    next_id: u32,
}

impl RelationTree {
    /// A tree holding only the root relation.
    pub fn new() -> Self {
        let root = RelationId(0);
        let mut nodes = IndexMap::new();
        nodes.insert(
            root,
            Relation {
                id: root,
                name: "root".to_string(),
                parent: None,
                children: Vec::new(),
                depth: 0,
                owner: None,
                cells: Vec::new(),
                propagators: Vec::new(),
            },
        );
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    /// The root relation id.
    pub fn root(&self) -> RelationId {
        self.root
    }

    /// Look up a relation.
    pub fn get(&self, id: RelationId) -> Option<&Relation> {
        self.nodes.get(&id)
    }

    /// Number of live relations, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a child of `parent`. Falls back to the root when `parent`
    /// no longer exists.
    pub fn create(&mut self, name: impl Into<String>, parent: RelationId) -> RelationId {
        let parent = if self.nodes.contains_key(&parent) {
            parent
        } else {
            self.root
        };
        let id = RelationId(self.next_id);
        self.next_id += 1;
        let depth = self.nodes.get(&parent).map_or(0, |p| p.depth + 1);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        self.nodes.insert(
            id,
            Relation {
                id,
                name: name.into(),
                parent: Some(parent),
                children: Vec::new(),
                depth,
                owner: None,
                cells: Vec::new(),
                propagators: Vec::new(),
            },
        );
        id
    }

    pub(crate) fn set_owner(&mut self, id: RelationId, owner: PropagatorId) {
        if let Some(r) = self.nodes.get_mut(&id) {
            r.owner = Some(owner);
        }
    }

    pub(crate) fn add_cell(&mut self, id: RelationId, cell: CellId) {
        if let Some(r) = self.nodes.get_mut(&id) {
            r.cells.push(cell);
        }
    }

    pub(crate) fn add_propagator(&mut self, id: RelationId, propagator: PropagatorId) {
        if let Some(r) = self.nodes.get_mut(&id) {
            r.propagators.push(propagator);
        }
    }

    pub(crate) fn forget_cell(&mut self, id: RelationId, cell: CellId) {
        if let Some(r) = self.nodes.get_mut(&id) {
            r.cells.retain(|&c| c != cell);
        }
    }

    pub(crate) fn forget_propagator(&mut self, id: RelationId, propagator: PropagatorId) {
        if let Some(r) = self.nodes.get_mut(&id) {
            r.propagators.retain(|&p| p != propagator);
        }
    }

    /// Move `id` under `new_parent`. Depth is left as it was at creation.
    pub fn relocate(&mut self, id: RelationId, new_parent: RelationId) -> bool {
        if id == self.root
            || !self.nodes.contains_key(&new_parent)
            || self.subtree(id).contains(&new_parent)
        {
            return false;
        }
        let Some(old_parent) = self.nodes.get(&id).and_then(|r| r.parent) else {
            return false;
        };
        if let Some(p) = self.nodes.get_mut(&old_parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(p) = self.nodes.get_mut(&new_parent) {
            p.children.push(id);
        }
        if let Some(r) = self.nodes.get_mut(&id) {
            r.parent = Some(new_parent);
        }
        true
    }

    /// `id` and every descendant, parents before children.
    pub fn subtree(&self, id: RelationId) -> Vec<RelationId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(r) = self.nodes.get(&next) {
                out.push(next);
                stack.extend(r.children.iter().rev().copied());
            }
        }
        out
    }

    /// Names from the root down to `id`.
    pub fn path(&self, id: RelationId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.nodes.get(&current) {
                Some(r) => {
                    names.push(r.name.as_str());
                    cursor = r.parent;
                }
                None => break,
            }
        }
        names.reverse();
        names
    }

    /// Remove a relation, detaching it from its parent. Children are
    /// reattached to nothing; callers remove subtrees leaf-first or accept
    /// orphans being swept by `prune`. The root cannot be removed.
    pub(crate) fn remove(&mut self, id: RelationId) -> Option<Relation> {
        if id == self.root {
            return None;
        }
        let rel = self.nodes.shift_remove(&id)?;
        if let Some(parent) = rel.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|&c| c != id);
        }
        Some(rel)
    }

    /// Relations whose parent no longer exists (root excluded).
    pub(crate) fn orphans(&self) -> Vec<RelationId> {
        self.nodes
            .values()
            .filter(|r| r.parent.is_some_and(|p| !self.nodes.contains_key(&p)))
            .map(|r| r.id)
            .collect()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Relation> {
        self.nodes.values_mut()
    }

    /// All relations in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.nodes.values()
    }
}

impl Relation {
    pub(crate) fn retain_members(
        &mut self,
        mut keep_cell: impl FnMut(CellId) -> bool,
        mut keep_propagator: impl FnMut(PropagatorId) -> bool,
    ) -> usize {
        let before = self.cells.len() + self.propagators.len();
        self.cells.retain(|&c| keep_cell(c));
        self.propagators.retain(|&p| keep_propagator(p));
        before - self.cells.len() - self.propagators.len()
    }

    pub(crate) fn retain_children(&mut self, mut keep: impl FnMut(RelationId) -> bool) {
        self.children.retain(|&c| keep(c));
    }
}

impl Default for RelationTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_parent_plus_one() {
        let mut tree = RelationTree::new();
        let a = tree.create("a", tree.root());
        let b = tree.create("b", a);
        assert_eq!(tree.get(tree.root()).unwrap().depth(), 0);
        assert_eq!(tree.get(a).unwrap().depth(), 1);
        assert_eq!(tree.get(b).unwrap().depth(), 2);
        assert_eq!(tree.get(a).unwrap().children(), &[b]);
    }

    #[test]
    fn relocation_keeps_depth() {
        let mut tree = RelationTree::new();
        let a = tree.create("a", tree.root());
        let b = tree.create("b", a);
        let c = tree.create("c", b);
        assert!(tree.relocate(c, tree.root()));
        assert_eq!(tree.get(c).unwrap().depth(), 3);
        assert_eq!(tree.get(c).unwrap().parent(), Some(tree.root()));
        assert!(tree.get(b).unwrap().children().is_empty());
    }

    #[test]
    fn relocation_into_own_subtree_is_refused() {
        let mut tree = RelationTree::new();
        let a = tree.create("a", tree.root());
        let b = tree.create("b", a);
        assert!(!tree.relocate(a, b));
        assert!(!tree.relocate(tree.root(), a));
    }

    #[test]
    fn subtree_lists_parents_first() {
        let mut tree = RelationTree::new();
        let a = tree.create("a", tree.root());
        let b = tree.create("b", a);
        let c = tree.create("c", a);
        let d = tree.create("d", b);
        assert_eq!(tree.subtree(a), vec![a, b, d, c]);
    }

    #[test]
    fn path_from_root() {
        let mut tree = RelationTree::new();
        let a = tree.create("solver", tree.root());
        let b = tree.create("adder", a);
        assert_eq!(tree.path(b), vec!["root", "solver", "adder"]);
    }

    #[test]
    fn remove_detaches_from_parent() {
        let mut tree = RelationTree::new();
        let a = tree.create("a", tree.root());
        let b = tree.create("b", a);
        assert!(tree.remove(a).is_some());
        assert!(tree.get(tree.root()).unwrap().children().is_empty());
        assert_eq!(tree.orphans(), vec![b]);
        assert!(tree.remove(tree.root()).is_none());
    }
}
