//! Menu construction from definitions or a fluent builder.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::{MenuArena, NodeId};
use crate::domain::error::{DomainError, TreeResult};
use crate::domain::output::StructuredOutput;

/// Declarative description of a menu tree, as read from TOML or JSON.
///
/// An entry with a `children` key (even an empty one) is a composite,
/// an entry without is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDefinition {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuDefinition>>,
}

impl MenuDefinition {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: None,
        }
    }

    pub fn composite(label: impl Into<String>, children: Vec<MenuDefinition>) -> Self {
        Self {
            label: label.into(),
            children: Some(children),
        }
    }
}

/// A built menu: its arena plus the id of the root node.
#[derive(Debug)]
pub struct Menu {
    pub arena: MenuArena,
    pub root: NodeId,
}

impl Menu {
    pub fn from_definition(definition: &MenuDefinition) -> TreeResult<Self> {
        let mut arena = MenuArena::new();
        let root = build_definition(&mut arena, definition)?;
        Ok(Self { arena, root })
    }

    pub fn render(&self) -> TreeResult<StructuredOutput> {
        self.arena.render(self.root)
    }
}

/// Inserts `definition` into `arena` and returns the id of its root.
#[instrument(level = "debug", skip_all, fields(root = %definition.label))]
pub fn build_definition(arena: &mut MenuArena, definition: &MenuDefinition) -> TreeResult<NodeId> {
    let root = create_node(arena, definition);
    let mut stack = vec![(definition, root)];

    while let Some((current, current_id)) = stack.pop() {
        for child in current.children.iter().flatten() {
            let child_id = create_node(arena, child);
            arena.add_child(current_id, child_id)?;
            stack.push((child, child_id));
        }
    }

    Ok(root)
}

fn create_node(arena: &mut MenuArena, definition: &MenuDefinition) -> NodeId {
    match definition.children {
        Some(_) => arena.create_composite(&definition.label),
        None => arena.create_leaf(&definition.label),
    }
}

/// Fluent construction of a single menu.
///
/// `composite` descends into the new node, `end` climbs back to its parent.
/// The first failing link is kept and reported by `build`.
#[derive(Debug)]
pub struct MenuBuilder {
    arena: MenuArena,
    root: NodeId,
    cursor: Vec<NodeId>,
    error: Option<DomainError>,
}

impl MenuBuilder {
    pub fn new(root_label: impl AsRef<str>) -> Self {
        let mut arena = MenuArena::new();
        let root = arena.create_composite(root_label);
        Self {
            arena,
            root,
            cursor: vec![root],
            error: None,
        }
    }

    fn current(&self) -> NodeId {
        self.cursor.last().copied().unwrap_or(self.root)
    }

    fn attach(&mut self, child: NodeId) {
        if self.error.is_some() {
            return;
        }
        let parent = self.current();
        if let Err(e) = self.arena.add_child(parent, child) {
            self.error = Some(e);
        }
    }

    pub fn leaf(mut self, label: impl AsRef<str>) -> Self {
        let id = self.arena.create_leaf(label);
        self.attach(id);
        self
    }

    pub fn composite(mut self, label: impl AsRef<str>) -> Self {
        let id = self.arena.create_composite(label);
        self.attach(id);
        self.cursor.push(id);
        self
    }

    /// Closes the innermost open composite; the root stays open.
    pub fn end(mut self) -> Self {
        if self.cursor.len() > 1 {
            self.cursor.pop();
        }
        self
    }

    pub fn build(self) -> TreeResult<Menu> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(Menu {
                arena: self.arena,
                root: self.root,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_fluent_builder_when_build_then_nested_structure() {
        let menu = MenuBuilder::new("root")
            .leaf("A")
            .composite("B")
            .leaf("B.1")
            .end()
            .leaf("C")
            .build()
            .unwrap();

        let out = menu.render().unwrap();
        assert_eq!(out.leaf_labels(), vec!["A", "B.1", "C"]);
        assert_eq!(out.children[1].label, "B");
    }

    #[test]
    fn given_extra_end_when_build_then_root_stays_open() {
        let menu = MenuBuilder::new("root").end().end().leaf("A").build().unwrap();
        assert_eq!(menu.arena.children(menu.root).unwrap().len(), 1);
    }

    #[test]
    fn given_empty_children_when_building_definition_then_composite() {
        let def = MenuDefinition::composite("root", vec![MenuDefinition::composite("empty", vec![])]);
        let menu = Menu::from_definition(&def).unwrap();
        let empty = menu.arena.children(menu.root).unwrap()[0];

        assert!(menu.arena.node(empty).unwrap().kind.is_composite());
    }
}
