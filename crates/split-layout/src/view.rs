// ABOUTME: Render model for split panes: slot styles, pixel rects, and ARIA data.
// ABOUTME: Hosts draw from this tree; nested panes appear as nested views.

use split_core::{Rect, Size};

use crate::pane::{Node, PaneId, SplitPane};

/// Layout hints for one content slot, in stylesheet terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    /// `None` lets the slot fill the remaining space
    pub flex_basis: Option<Size>,
    pub min_width: Size,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aria {
    pub role: &'static str,
    pub orientation: &'static str,
    pub value_min: f64,
    pub value_max: f64,
    pub value_now: f64,
    pub value_text: String,
    pub tab_index: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividerView<'a> {
    pub class: &'a str,
    pub bounds: Rect,
    pub aria: Aria,
    pub dragging: bool,
}

#[derive(Debug)]
pub struct SlotView<'a, C> {
    pub classes: Vec<&'a str>,
    pub style: SlotStyle,
    pub bounds: Rect,
    pub content: NodeView<'a, C>,
}

#[derive(Debug)]
pub enum NodeView<'a, C> {
    Leaf(&'a C),
    Split(Box<PaneView<'a, C>>),
}

#[derive(Debug)]
pub struct PaneView<'a, C> {
    pub id: PaneId,
    pub class: &'a str,
    pub bounds: Rect,
    /// Set when the minimum is in pixels: room for both panes and the divider
    pub min_width: Option<f64>,
    pub left: SlotView<'a, C>,
    pub divider: DividerView<'a>,
    pub right: SlotView<'a, C>,
}

impl<'a, C> PaneView<'a, C> {
    /// Leaf contents with the rect each one occupies, left to right
    pub fn placements(&self) -> Vec<(&'a C, Rect)> {
        let mut out = Vec::new();
        self.collect_placements(&mut out);
        out
    }

    fn collect_placements(&self, out: &mut Vec<(&'a C, Rect)>) {
        for slot in [&self.left, &self.right] {
            match &slot.content {
                NodeView::Leaf(content) => out.push((*content, slot.bounds)),
                NodeView::Split(inner) => inner.collect_placements(out),
            }
        }
    }

    /// Every divider in the tree, outermost first
    pub fn dividers(&self) -> Vec<&DividerView<'a>> {
        let mut out = vec![&self.divider];
        for slot in [&self.left, &self.right] {
            if let NodeView::Split(inner) = &slot.content {
                out.extend(inner.dividers());
            }
        }
        out
    }
}

impl<C> SplitPane<C> {
    /// Render against the mounted container, or `None` when unmounted
    pub fn view(&self) -> Option<PaneView<'_, C>> {
        self.bounds().map(|bounds| self.view_in(bounds))
    }

    /// Render against an explicit container rectangle
    pub fn view_in(&self, bounds: Rect) -> PaneView<'_, C> {
        let state = self.state.borrow();
        let bounds = state.effective_bounds(bounds);
        let rects = state.slot_rects(bounds);
        let names = &self.class_names;

        let min_width = state.min_size;
        // Reported from the drawn width so min <= now <= max always holds
        let value_min = round_percent(state.min_size.to_percent(bounds.width));
        let value_now = if bounds.width > 0.0 {
            round_percent(rects.left.width / bounds.width * 100.0)
        } else {
            0.0
        };

        let [left_child, right_child] = &*self.children;
        let left = SlotView {
            classes: vec![names.pane.as_str(), names.left_pane.as_str()],
            style: SlotStyle {
                flex_basis: Some(state.left_size),
                min_width,
            },
            bounds: rects.left,
            content: node_view(left_child, rects.left),
        };
        let right = SlotView {
            classes: vec![names.pane.as_str()],
            style: SlotStyle {
                flex_basis: None,
                min_width,
            },
            bounds: rects.right,
            content: node_view(right_child, rects.right),
        };

        PaneView {
            id: state.id,
            class: names.container.as_str(),
            bounds,
            min_width: state.container_min_width(),
            left,
            divider: DividerView {
                class: names.divider.as_str(),
                bounds: rects.divider,
                aria: Aria {
                    role: "separator",
                    orientation: "horizontal",
                    value_min,
                    value_max: round_percent(100.0 - value_min),
                    value_now,
                    value_text: format!("{}%", value_now),
                    tab_index: 0,
                },
                dragging: self.is_dragging(),
            },
            right,
        }
    }
}

/// ARIA values are announced with two decimals
fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn node_view<C>(node: &Node<C>, bounds: Rect) -> NodeView<'_, C> {
    match node {
        Node::Leaf(content) => NodeView::Leaf(content),
        Node::Split(pane) => NodeView::Split(Box::new(pane.view_in(bounds))),
    }
}
