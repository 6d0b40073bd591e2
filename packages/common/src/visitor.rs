use pagesmith_model::{Element, LeafContent, Styles};

/// Visitor pattern for traversing element trees immutably
///
/// The default implementations walk the whole tree depth-first, in document
/// order. Override specific visit_* methods to act on nodes; call the
/// matching walk_* function to keep descending.
pub trait Visitor: Sized {
    fn visit_elements(&mut self, elements: &[Element]) {
        walk_elements(self, elements);
    }

    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_styles(&mut self, _styles: &Styles) {
        // Leaf node, no children to walk
    }

    fn visit_leaf_content(&mut self, _content: &LeafContent) {
        // Leaf node, no children to walk
    }
}

pub fn walk_elements<V: Visitor>(visitor: &mut V, elements: &[Element]) {
    for element in elements {
        visitor.visit_element(element);
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    visitor.visit_styles(&element.styles);

    if let Some(children) = element.children() {
        visitor.visit_elements(children);
    } else if let Some(content) = element.leaf_content() {
        visitor.visit_leaf_content(content);
    }
}

/// Collects every element id in document order
#[derive(Debug, Default)]
pub struct IdCollector {
    pub ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_element(&mut self, element: &Element) {
        self.ids.push(element.id().to_string());
        walk_element(self, element);
    }
}

/// All ids in the subtree rooted at `element`, including its own
pub fn collect_ids(element: &Element) -> Vec<String> {
    let mut collector = IdCollector::default();
    collector.visit_element(element);
    collector.ids
}

/// Tallies elements per depth and the deepest nesting level
#[derive(Debug, Default)]
pub struct TreeStats {
    pub elements: usize,
    pub containers: usize,
    pub max_depth: usize,
    depth: usize,
}

impl Visitor for TreeStats {
    fn visit_element(&mut self, element: &Element) {
        self.elements += 1;
        if element.is_container() {
            self.containers += 1;
        }

        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        walk_element(self, element);
        self.depth -= 1;
    }
}
