// ABOUTME: Two-pane split component with a draggable, focusable divider.
// ABOUTME: Validates sizes, runs the drag state machine, and nests recursively.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use split_core::{ClassNames, Rect, Size, SizeError, SplitConfig};

use crate::events::{EventHub, EventKind, HostEvent, Subscription};

/// Reads the container's current rectangle from the host
pub type BoundsSource = Rc<dyn Fn() -> Rect>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(pub u64);

static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

impl PaneId {
    fn next() -> Self {
        PaneId(NEXT_PANE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A slot's content: caller-supplied content or another split pane
pub enum Node<C> {
    Leaf(C),
    Split(SplitPane<C>),
}

impl<C> From<SplitPane<C>> for Node<C> {
    fn from(pane: SplitPane<C>) -> Self {
        Node::Split(pane)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeField {
    InitialSize,
    MinSize,
}

impl fmt::Display for SizeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeField::InitialSize => f.write_str("initial_size"),
            SizeField::MinSize => f.write_str("min_size"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitPaneError {
    #[error("SplitPane requires exactly two children, got {0}")]
    ChildCount(usize),

    #[error("{field} must be a number or a percentage, got {value:?}")]
    NotNumeric { field: SizeField, value: String },

    #[error("{field} must be positive, got {value}")]
    Negative { field: SizeField, value: f64 },

    #[error("min_size must not exceed 50%, got {0}%")]
    MinSizeTooLarge(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Events aimed at the divider itself rather than the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerEvent {
    PointerDown,
    TouchStart,
    ContextMenu,
    KeyDown(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Touch,
}

impl DragSource {
    fn listened_kinds(self) -> [EventKind; 2] {
        match self {
            DragSource::Pointer => [EventKind::PointerMove, EventKind::PointerUp],
            DragSource::Touch => [EventKind::TouchMove, EventKind::TouchEnd],
        }
    }
}

/// An active drag. Dropping it unregisters the window listeners.
#[derive(Debug)]
struct DragSession {
    source: DragSource,
    _listeners: Subscription,
}

/// Left and right slot rectangles plus the divider between them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRects {
    pub left: Rect,
    pub divider: Rect,
    pub right: Rect,
}

impl SlotRects {
    fn slot(&self, index: usize) -> Rect {
        if index == 0 {
            self.left
        } else {
            self.right
        }
    }
}

#[derive(Debug)]
pub(crate) struct PaneState {
    pub(crate) id: PaneId,
    pub(crate) left_size: Size,
    pub(crate) min_size: Size,
    pub(crate) divider_width: f64,
    keyboard_step: f64,
    drag: Option<DragSession>,
}

impl PaneState {
    /// Pixel form of `min_size` inside a container of the given width
    pub(crate) fn min_px(&self, width: f64) -> f64 {
        self.min_size.to_pixels(width)
    }

    /// Floor for the whole container when the minimum is in pixels
    pub(crate) fn container_min_width(&self) -> Option<f64> {
        match self.min_size {
            Size::Pixels(min) => Some(2.0 * min + self.divider_width),
            Size::Percent(_) => None,
        }
    }

    /// The container as laid out, widened to its floor
    pub(crate) fn effective_bounds(&self, bounds: Rect) -> Rect {
        match self.container_min_width() {
            Some(floor) if bounds.width < floor => bounds.column(bounds.x, floor),
            _ => bounds,
        }
    }

    /// Rendered left pane width: the basis held within `[min_px, width - min_px]`,
    /// and never so wide that the divider leaves the container
    pub(crate) fn left_px(&self, width: f64) -> f64 {
        let min_px = self.min_px(width);
        let upper = (width - min_px).min(width - self.divider_width).max(min_px);
        self.left_size.to_pixels(width).max(min_px).min(upper)
    }

    pub(crate) fn slot_rects(&self, bounds: Rect) -> SlotRects {
        let bounds = self.effective_bounds(bounds);
        let left_width = self.left_px(bounds.width);
        let divider_x = bounds.x + left_width;
        let right_x = divider_x + self.divider_width;

        SlotRects {
            left: bounds.column(bounds.x, left_width),
            divider: bounds.column(divider_x, self.divider_width),
            right: bounds.column(right_x, bounds.right() - right_x),
        }
    }

    /// Left size for a divider placed at absolute coordinate `x`
    fn position_for(&self, x: f64, bounds: Rect) -> Option<Size> {
        let bounds = self.effective_bounds(bounds);
        if bounds.width <= 0.0 {
            return None;
        }
        let min_px = self.min_px(bounds.width);
        let offset = (x - bounds.x).max(min_px).min(bounds.width - min_px);
        Some(Size::Percent(offset / bounds.width * 100.0))
    }

    fn move_to(&mut self, x: f64, bounds: Rect) {
        if let Some(size) = self.position_for(x, bounds) {
            tracing::trace!("Pane {:?} divider moved to x={} ({})", self.id, x, size);
            self.left_size = size;
        }
    }
}

struct Mount {
    hub: Rc<EventHub>,
    bounds: BoundsSource,
}

/// A horizontal two-pane layout. Construct with [`SplitPane::new`], attach to
/// a host with [`SplitPane::mount`], then feed divider events to it.
pub struct SplitPane<C> {
    pub(crate) state: Rc<RefCell<PaneState>>,
    pub(crate) children: Box<[Node<C>; 2]>,
    pub(crate) class_names: ClassNames,
    mount: Option<Mount>,
}

impl<C> SplitPane<C> {
    pub fn new(config: &SplitConfig, children: Vec<Node<C>>) -> Result<Self, SplitPaneError> {
        let children: [Node<C>; 2] = children
            .try_into()
            .map_err(|rest: Vec<Node<C>>| SplitPaneError::ChildCount(rest.len()))?;
        let (left_size, min_size) = validate_sizes(config)?;

        let state = PaneState {
            id: PaneId::next(),
            left_size,
            min_size,
            divider_width: config.divider_width.max(0.0),
            keyboard_step: config.keyboard_step,
            drag: None,
        };

        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            children: Box::new(children),
            class_names: config.class_names.clone(),
            mount: None,
        })
    }

    /// Shorthand for the common leaf-leaf case
    pub fn with_leaves(config: &SplitConfig, left: C, right: C) -> Result<Self, SplitPaneError> {
        Self::new(config, vec![Node::Leaf(left), Node::Leaf(right)])
    }

    pub fn id(&self) -> PaneId {
        self.state.borrow().id
    }

    pub fn left_size(&self) -> Size {
        self.state.borrow().left_size
    }

    pub fn min_size(&self) -> Size {
        self.state.borrow().min_size
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().drag.is_some()
    }

    pub fn drag_source(&self) -> Option<DragSource> {
        self.state.borrow().drag.as_ref().map(|d| d.source)
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    pub fn children(&self) -> &[Node<C>; 2] {
        &self.children
    }

    /// Current container rectangle, read fresh from the host
    pub fn bounds(&self) -> Option<Rect> {
        self.mount.as_ref().map(|m| (m.bounds)())
    }

    /// Current slot rectangles, read fresh from the host
    pub fn slot_rects(&self) -> Option<SlotRects> {
        let bounds = self.bounds()?;
        Some(self.state.borrow().slot_rects(bounds))
    }

    /// Attach to a window hub. Nested panes are mounted with bounds derived
    /// from this pane's slots, so they follow this divider as it moves.
    pub fn mount(&mut self, hub: &Rc<EventHub>, bounds: BoundsSource) {
        self.unmount();

        for (index, child) in self.children.iter_mut().enumerate() {
            if let Node::Split(pane) = child {
                let parent = Rc::downgrade(&self.state);
                let outer = Rc::clone(&bounds);
                pane.mount(
                    hub,
                    Rc::new(move || {
                        let Some(state) = parent.upgrade() else {
                            return Rect::default();
                        };
                        let rects = state.borrow().slot_rects(outer());
                        rects.slot(index)
                    }),
                );
            }
        }

        tracing::debug!("Mounted split pane {:?}", self.id());
        self.mount = Some(Mount {
            hub: Rc::clone(hub),
            bounds,
        });
    }

    /// Detach from the host, dropping any drag listeners in this subtree
    pub fn unmount(&mut self) {
        let session = self.state.borrow_mut().drag.take();
        if session.is_some() {
            tracing::debug!("Drag on pane {:?} cancelled by unmount", self.id());
        }
        drop(session);

        for child in self.children.iter_mut() {
            if let Node::Split(pane) = child {
                pane.unmount();
            }
        }
        self.mount = None;
    }

    pub fn handle_divider_event(&self, event: DividerEvent) {
        match event {
            DividerEvent::PointerDown => self.begin_drag(DragSource::Pointer),
            DividerEvent::TouchStart => self.begin_drag(DragSource::Touch),
            DividerEvent::ContextMenu => self.end_drag(),
            DividerEvent::KeyDown(key) => self.step(key),
        }
    }

    fn begin_drag(&self, source: DragSource) {
        let Some(mount) = &self.mount else {
            tracing::warn!("Ignoring drag on unmounted split pane {:?}", self.id());
            return;
        };

        let weak = Rc::downgrade(&self.state);
        let bounds = Rc::clone(&mount.bounds);
        let listeners = mount
            .hub
            .subscribe(&source.listened_kinds(), move |event: &HostEvent| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                if event.is_release() {
                    release(&state);
                } else if let Some(x) = event.move_x() {
                    let rect = bounds();
                    state.borrow_mut().move_to(x, rect);
                }
            });

        let previous = self.state.borrow_mut().drag.replace(DragSession {
            source,
            _listeners: listeners,
        });
        drop(previous);
        tracing::debug!("Drag started on pane {:?} ({:?})", self.id(), source);
    }

    fn end_drag(&self) {
        release(&self.state);
    }

    fn step(&self, key: Key) {
        let step = self.state.borrow().keyboard_step;
        let delta = match key {
            Key::ArrowLeft => -step,
            Key::ArrowRight => step,
            Key::Other => return,
        };
        let Some(bounds) = self.bounds() else {
            return;
        };

        let mut state = self.state.borrow_mut();
        let effective = state.effective_bounds(bounds);
        let divider_left = effective.x + state.left_px(effective.width);
        state.move_to(divider_left + delta, bounds);
    }

    /// Find a pane anywhere in this subtree
    pub fn find(&self, id: PaneId) -> Option<&SplitPane<C>> {
        if self.id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Split(pane) => pane.find(id),
            Node::Leaf(_) => None,
        })
    }

    /// The innermost pane whose divider contains the point
    pub fn divider_at(&self, x: f64, y: f64) -> Option<&SplitPane<C>> {
        let nested = self.children.iter().find_map(|child| match child {
            Node::Split(pane) => pane.divider_at(x, y),
            Node::Leaf(_) => None,
        });
        if nested.is_some() {
            return nested;
        }
        self.slot_rects()
            .filter(|rects| rects.divider.contains(x, y))
            .map(|_| self)
    }

    /// Leaf contents in left-to-right order
    pub fn leaves(&self) -> Vec<&C> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    /// All pane IDs in this subtree, outermost first
    pub fn panes(&self) -> Vec<PaneId> {
        let mut out = Vec::new();
        collect_panes(self, &mut out);
        out
    }
}

impl<C> Drop for SplitPane<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<C> fmt::Debug for SplitPane<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitPane")
            .field("state", &self.state.borrow())
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

fn release(state: &Rc<RefCell<PaneState>>) {
    let session = state.borrow_mut().drag.take();
    if let Some(session) = session {
        tracing::debug!("Drag ended on pane {:?} ({:?})", state.borrow().id, session.source);
    }
}

fn collect_leaves<'a, C>(pane: &'a SplitPane<C>, out: &mut Vec<&'a C>) {
    for child in pane.children.iter() {
        match child {
            Node::Leaf(content) => out.push(content),
            Node::Split(inner) => collect_leaves(inner, out),
        }
    }
}

fn collect_panes<C>(pane: &SplitPane<C>, out: &mut Vec<PaneId>) {
    out.push(pane.id());
    for child in pane.children.iter() {
        if let Node::Split(inner) = child {
            collect_panes(inner, out);
        }
    }
}

/// Parse both sizes. Numeric failures on either field are reported before
/// sign failures, which come before the range check on `min_size`.
fn validate_sizes(config: &SplitConfig) -> Result<(Size, Size), SplitPaneError> {
    let initial = config.initial_size.parse();
    let min = config.min_size.parse();
    let fields = [
        (SizeField::InitialSize, &config.initial_size, &initial),
        (SizeField::MinSize, &config.min_size, &min),
    ];

    for (field, input, result) in fields {
        if let Err(SizeError::NotNumeric(_)) = result {
            return Err(SplitPaneError::NotNumeric {
                field,
                value: input.to_string(),
            });
        }
    }
    for (field, _, result) in fields {
        if let Err(SizeError::Negative(value)) = result {
            return Err(SplitPaneError::Negative {
                field,
                value: *value,
            });
        }
    }

    let initial = initial.map_err(|e| size_error(SizeField::InitialSize, e))?;
    let min = min.map_err(|e| size_error(SizeField::MinSize, e))?;

    if let Size::Percent(p) = min {
        if p > 50.0 {
            return Err(SplitPaneError::MinSizeTooLarge(p));
        }
    }
    Ok((initial, min))
}

fn size_error(field: SizeField, err: SizeError) -> SplitPaneError {
    match err {
        SizeError::NotNumeric(value) => SplitPaneError::NotNumeric { field, value },
        SizeError::Negative(value) => SplitPaneError::Negative { field, value },
    }
}
