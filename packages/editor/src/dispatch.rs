//! # Render Dispatch
//!
//! Explicit mapping from element kind to a render handler. A presentation
//! layer registers one [`ElementHandler`] per kind it knows how to draw and
//! calls [`DispatchTable::render`] with the current state. Children are
//! rendered first and handed to their parent's handler, so handlers compose
//! output bottom-up (HTML strings, widget trees, outline lines).
//!
//! Kinds without a handler are skipped along with their whole subtree.

use crate::state::EditorState;
use crate::view::{Affordances, ViewState};
use pagesmith_common::visitor::{walk_element, Visitor};
use pagesmith_model::{Element, ElementKind};
use std::collections::HashMap;

/// What a handler knows about the node it is rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub view: &'a ViewState,
    /// 0 for top-level elements
    pub depth: usize,
    pub affordances: Affordances,
}

pub trait ElementHandler<Out> {
    /// Render one node given its already rendered children
    fn render(&self, element: &Element, context: &RenderContext<'_>, children: Vec<Out>) -> Out;
}

impl<Out, F> ElementHandler<Out> for F
where
    F: Fn(&Element, &RenderContext<'_>, Vec<Out>) -> Out,
{
    fn render(&self, element: &Element, context: &RenderContext<'_>, children: Vec<Out>) -> Out {
        self(element, context, children)
    }
}

pub struct DispatchTable<Out> {
    handlers: HashMap<ElementKind, Box<dyn ElementHandler<Out>>>,
}

impl<Out> DispatchTable<Out> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler, returning the one it replaces
    pub fn register(
        &mut self,
        kind: ElementKind,
        handler: impl ElementHandler<Out> + 'static,
    ) -> Option<Box<dyn ElementHandler<Out>>> {
        self.handlers.insert(kind, Box::new(handler))
    }

    pub fn with(mut self, kind: ElementKind, handler: impl ElementHandler<Out> + 'static) -> Self {
        self.register(kind, handler);
        self
    }

    pub fn handles(&self, kind: ElementKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Kinds of the tree that have no handler, in document order, deduplicated
    pub fn unhandled_kinds(&self, state: &EditorState) -> Vec<ElementKind> {
        struct Missing<'a, Out> {
            table: &'a DispatchTable<Out>,
            kinds: Vec<ElementKind>,
        }

        impl<Out> Visitor for Missing<'_, Out> {
            fn visit_element(&mut self, element: &Element) {
                let kind = element.kind();
                if !self.table.handles(kind) && !self.kinds.contains(&kind) {
                    self.kinds.push(kind);
                }
                walk_element(self, element);
            }
        }

        let mut missing = Missing {
            table: self,
            kinds: Vec::new(),
        };
        missing.visit_elements(state.tree().elements());
        missing.kinds
    }

    /// Render the root's children in document order
    pub fn render(&self, state: &EditorState) -> Vec<Out> {
        let mut renderer = Renderer {
            table: self,
            view: state.view(),
            depth: 0,
            stack: vec![Vec::new()],
        };
        renderer.visit_elements(state.tree().elements());
        renderer.stack.pop().unwrap_or_default()
    }
}

impl<Out> Default for DispatchTable<Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Out> std::fmt::Debug for DispatchTable<Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().collect();
        kinds.sort();
        f.debug_struct("DispatchTable").field("kinds", &kinds).finish()
    }
}

/// Depth-first walk collecting each level's rendered children on a stack
struct Renderer<'a, Out> {
    table: &'a DispatchTable<Out>,
    view: &'a ViewState,
    depth: usize,
    stack: Vec<Vec<Out>>,
}

impl<Out> Visitor for Renderer<'_, Out> {
    fn visit_element(&mut self, element: &Element) {
        let table = self.table;
        let Some(handler) = table.handlers.get(&element.kind()) else {
            return;
        };

        self.stack.push(Vec::new());
        self.depth += 1;
        walk_element(self, element);
        self.depth -= 1;
        let children = self.stack.pop().unwrap_or_default();

        let context = RenderContext {
            view: self.view,
            depth: self.depth,
            affordances: Affordances::for_node(self.view, element),
        };
        let output = handler.render(element, &context, children);

        if let Some(siblings) = self.stack.last_mut() {
            siblings.push(output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use pagesmith_model::{DocumentSnapshot, LeafContent, SequentialIds};

    fn state() -> EditorState {
        let text = Element::leaf("t", ElementKind::Text, LeafContent::text("Hello")).unwrap();
        let image = Element::new("img", ElementKind::Image);
        let column = Element::container("col", ElementKind::Container, vec![text, image]).unwrap();
        let button = Element::leaf("b", ElementKind::Button, LeafContent::text("Go")).unwrap();

        let mut state = EditorState::new();
        let snapshot = DocumentSnapshot::new(vec![column, button]).unwrap();
        state
            .apply(Command::load(snapshot), &mut SequentialIds::from_seed("r"))
            .unwrap();
        state
    }

    fn html_table() -> DispatchTable<String> {
        DispatchTable::new()
            .with(
                ElementKind::Container,
                |_: &Element, _: &RenderContext<'_>, children: Vec<String>| {
                    format!("<div>{}</div>", children.concat())
                },
            )
            .with(
                ElementKind::Text,
                |element: &Element, _: &RenderContext<'_>, _: Vec<String>| {
                    let text = element
                        .leaf_content()
                        .and_then(|content| content.inner_text.clone())
                        .unwrap_or_default();
                    format!("<p>{}</p>", text)
                },
            )
    }

    #[test]
    fn test_render_composes_children() {
        let output = html_table().render(&state());

        // image and button have no handler
        assert_eq!(output, vec!["<div><p>Hello</p></div>".to_string()]);
    }

    #[test]
    fn test_unhandled_subtree_is_skipped() {
        let table = DispatchTable::new().with(
            ElementKind::Text,
            |_: &Element, _: &RenderContext<'_>, _: Vec<String>| "text".to_string(),
        );

        // text lives inside an unhandled container
        assert!(table.render(&state()).is_empty());
    }

    #[test]
    fn test_context_depth_and_affordances() {
        let table = DispatchTable::new()
            .with(
                ElementKind::Container,
                |element: &Element, context: &RenderContext<'_>, children: Vec<String>| {
                    let mut lines = vec![format!(
                        "{}:{}:{}",
                        element.id(),
                        context.depth,
                        context.affordances.drop_target
                    )];
                    lines.extend(children);
                    lines.join(",")
                },
            )
            .with(
                ElementKind::Image,
                |element: &Element, context: &RenderContext<'_>, _: Vec<String>| {
                    format!("{}:{}:{}", element.id(), context.depth, context.affordances.drop_target)
                },
            );

        assert_eq!(table.render(&state()), vec!["col:0:true,img:1:false".to_string()]);
    }

    #[test]
    fn test_unhandled_kinds() {
        let missing = html_table().unhandled_kinds(&state());
        assert_eq!(missing, vec![ElementKind::Image, ElementKind::Button]);
    }
}
