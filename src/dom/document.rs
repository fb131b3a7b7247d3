use super::element::{Element, ElementId, Tag};

/// Rows occupied by a bordered input or drop-down.
const BOXED_ROWS: u16 = 3;

/// Arena owning every element of one tree.
///
/// Element slots are never reused, so a stale [`ElementId`] simply stops
/// resolving once its element has been dropped.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document containing only its `body` element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new(Tag::Div).with_id("body"))],
        }
    }

    /// Returns the root element.
    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Adds a detached element to the arena.
    pub fn create(&mut self, mut element: Element) -> ElementId {
        element.parent = None;
        element.children.clear();
        self.nodes.push(Some(element));
        ElementId(self.nodes.len() - 1)
    }

    /// Creates `element` and appends it to `parent` in one step.
    pub fn create_in(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = self.create(element);
        self.append(parent, id);
        id
    }

    /// Returns `true` if `id` refers to a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|el| el.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Moves `child` to the end of `parent`'s children.
    ///
    /// No-op if either element is gone or if `child` is an ancestor of
    /// `parent`.
    pub fn append(&mut self, parent: ElementId, child: ElementId) {
        if !self.contains(parent) || !self.contains(child) || self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(el) = self.get_mut(parent) {
            el.children.push(child);
        }
        if let Some(el) = self.get_mut(child) {
            el.parent = Some(parent);
        }
    }

    /// Removes `id` from its parent without dropping it.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(el) = self.get_mut(parent) {
            el.children.retain(|c| *c != id);
        }
        if let Some(el) = self.get_mut(id) {
            el.parent = None;
        }
    }

    /// Drops every descendant of `id`.
    pub fn clear_children(&mut self, id: ElementId) {
        for descendant in self.descendants(id) {
            self.nodes[descendant.0] = None;
        }
        if let Some(el) = self.get_mut(id) {
            el.children.clear();
        }
    }

    /// All descendants of `id` in document (pre-)order, excluding `id`.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Descendants of `id` with the given tag, in document order.
    pub fn descendants_with_tag(&self, id: ElementId, tag: Tag) -> Vec<ElementId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.get(*d).is_some_and(|el| el.tag == tag))
            .collect()
    }

    /// First element at or below `root` whose identifier equals `element_id`.
    pub fn find_by_id(&self, root: ElementId, element_id: &str) -> Option<ElementId> {
        std::iter::once(root)
            .chain(self.descendants(root))
            .find(|id| {
                self.get(*id)
                    .is_some_and(|el| el.id.as_deref() == Some(element_id))
            })
    }

    /// Number of elements at or below `root` carrying `class`.
    pub fn count_with_class(&self, root: ElementId, class: &str) -> usize {
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|id| self.get(*id).is_some_and(|el| el.has_class(class)))
            .count()
    }

    /// The checked option of a select, if any.
    pub fn checked_option(&self, select: ElementId) -> Option<ElementId> {
        self.options(select)
            .into_iter()
            .find(|id| self.get(*id).is_some_and(|el| el.checked))
    }

    /// Current value of a select: the checked option's value, else the first
    /// option's value, else an empty string.
    pub fn select_value(&self, select: ElementId) -> String {
        self.checked_option(select)
            .or_else(|| self.options(select).first().copied())
            .and_then(|id| self.get(id))
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    /// Makes `option` the only checked choice of `select`.
    pub fn check_option(&mut self, select: ElementId, option: ElementId) {
        let options = self.options(select);
        if !options.contains(&option) {
            return;
        }
        for id in options {
            if let Some(el) = self.get_mut(id) {
                el.checked = id == option;
            }
        }
    }

    /// Moves the checked choice of `select` one step, wrapping around.
    pub fn cycle_option(&mut self, select: ElementId, forward: bool) {
        let options = self.options(select);
        if options.is_empty() {
            return;
        }
        let current = self
            .checked_option(select)
            .and_then(|checked| options.iter().position(|id| *id == checked))
            .unwrap_or(0);
        let len = options.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.check_option(select, options[next]);
    }

    /// Rows the subtree occupies when laid out top to bottom.
    pub fn natural_height(&self, id: ElementId) -> u16 {
        let Some(el) = self.get(id) else {
            return 0;
        };
        if el.hidden {
            return 0;
        }
        match el.tag {
            Tag::Input | Tag::Select => BOXED_ROWS,
            Tag::Heading | Tag::Label | Tag::Span | Tag::Button => 1,
            Tag::Option => 0,
            Tag::Div => el
                .children
                .iter()
                .map(|child| self.natural_height(*child))
                .fold(0u16, u16::saturating_add),
        }
    }

    fn options(&self, select: ElementId) -> Vec<ElementId> {
        self.children(select)
            .iter()
            .copied()
            .filter(|id| self.get(*id).is_some_and(|el| el.tag == Tag::Option))
            .collect()
    }

    fn is_ancestor(&self, candidate: ElementId, of: ElementId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, checked: bool) -> Element {
        let mut el = Element::new(Tag::Option).with_value(value).with_text(value);
        el.checked = checked;
        el
    }

    // --- Tree structure ---

    #[test]
    fn new_document_has_body() {
        let doc = Document::new();
        assert!(doc.contains(doc.body()));
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn append_sets_parent_and_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_in(body, Element::new(Tag::Div));
        let b = doc.create_in(body, Element::new(Tag::Span));
        assert_eq!(doc.children(body), &[a, b]);
        assert_eq!(doc.parent(a), Some(body));
    }

    #[test]
    fn append_moves_between_parents() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_in(body, Element::new(Tag::Div));
        let b = doc.create_in(body, Element::new(Tag::Div));
        let child = doc.create_in(a, Element::new(Tag::Span));
        doc.append(b, child);
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
    }

    #[test]
    fn append_refuses_cycles() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_in(body, Element::new(Tag::Div));
        let b = doc.create_in(a, Element::new(Tag::Div));
        doc.append(b, a);
        assert_eq!(doc.parent(a), Some(body));
        assert_eq!(doc.parent(b), Some(a));
    }

    #[test]
    fn detach_keeps_element_alive() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_in(body, Element::new(Tag::Button));
        doc.detach(a);
        assert!(doc.contains(a));
        assert_eq!(doc.parent(a), None);
        assert!(doc.children(body).is_empty());
    }

    #[test]
    fn clear_children_drops_descendants() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_in(body, Element::new(Tag::Div));
        let b = doc.create_in(a, Element::new(Tag::Input));
        doc.clear_children(body);
        assert!(!doc.contains(a));
        assert!(!doc.contains(b));
        assert!(doc.contains(body));
        assert!(doc.get(a).is_none());
    }

    #[test]
    fn descendants_are_in_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_in(body, Element::new(Tag::Div));
        let a1 = doc.create_in(a, Element::new(Tag::Input));
        let a2 = doc.create_in(a, Element::new(Tag::Input));
        let b = doc.create_in(body, Element::new(Tag::Input));
        assert_eq!(doc.descendants(body), vec![a, a1, a2, b]);
        assert_eq!(doc.descendants_with_tag(body, Tag::Input), vec![a1, a2, b]);
    }

    #[test]
    fn find_by_id_and_count_with_class() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_in(body, Element::new(Tag::Div).with_id("x").with_class("c"));
        doc.create_in(a, Element::new(Tag::Span).with_class("c"));
        assert_eq!(doc.find_by_id(body, "x"), Some(a));
        assert_eq!(doc.find_by_id(body, "missing"), None);
        assert_eq!(doc.count_with_class(body, "c"), 2);
    }

    // --- Selects ---

    #[test]
    fn select_value_prefers_checked_option() {
        let mut doc = Document::new();
        let select = doc.create_in(doc.body(), Element::new(Tag::Select));
        doc.create_in(select, option("a", false));
        let b = doc.create_in(select, option("b", true));
        assert_eq!(doc.checked_option(select), Some(b));
        assert_eq!(doc.select_value(select), "b");
    }

    #[test]
    fn select_value_falls_back_to_first_then_empty() {
        let mut doc = Document::new();
        let select = doc.create_in(doc.body(), Element::new(Tag::Select));
        assert_eq!(doc.select_value(select), "");
        doc.create_in(select, option("a", false));
        doc.create_in(select, option("b", false));
        assert_eq!(doc.checked_option(select), None);
        assert_eq!(doc.select_value(select), "a");
    }

    #[test]
    fn cycle_option_wraps_both_ways() {
        let mut doc = Document::new();
        let select = doc.create_in(doc.body(), Element::new(Tag::Select));
        doc.create_in(select, option("a", true));
        doc.create_in(select, option("b", false));
        doc.create_in(select, option("c", false));
        doc.cycle_option(select, false);
        assert_eq!(doc.select_value(select), "c");
        doc.cycle_option(select, true);
        assert_eq!(doc.select_value(select), "a");
        doc.cycle_option(select, true);
        assert_eq!(doc.select_value(select), "b");
    }

    #[test]
    fn check_option_ignores_foreign_option() {
        let mut doc = Document::new();
        let select = doc.create_in(doc.body(), Element::new(Tag::Select));
        let a = doc.create_in(select, option("a", true));
        let stray = doc.create_in(doc.body(), option("z", false));
        doc.check_option(select, stray);
        assert_eq!(doc.checked_option(select), Some(a));
    }

    // --- Layout ---

    #[test]
    fn natural_height_sums_children() {
        let mut doc = Document::new();
        let body = doc.body();
        let div = doc.create_in(body, Element::new(Tag::Div));
        doc.create_in(div, Element::new(Tag::Heading));
        doc.create_in(div, Element::new(Tag::Label));
        doc.create_in(div, Element::new(Tag::Input));
        let select = doc.create_in(div, Element::new(Tag::Select));
        doc.create_in(select, option("a", true));
        doc.create_in(body, Element::new(Tag::Button));
        assert_eq!(doc.natural_height(div), 1 + 1 + 3 + 3);
        assert_eq!(doc.natural_height(body), 9);
    }

    #[test]
    fn hidden_elements_take_no_rows() {
        let mut doc = Document::new();
        let body = doc.body();
        let input = doc.create_in(body, Element::new(Tag::Input));
        if let Some(el) = doc.get_mut(input) {
            el.hidden = true;
        }
        assert_eq!(doc.natural_height(body), 0);
    }
}
