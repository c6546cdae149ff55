// ABOUTME: Resizable two-pane layout for a host UI.
// ABOUTME: Implements divider drag/keyboard interaction and nested split panes.

pub mod events;
mod pane;
mod view;

pub use events::{EventHub, EventKind, HostEvent, Subscription};
pub use pane::{
    BoundsSource, DividerEvent, DragSource, Key, Node, PaneId, SizeField, SlotRects, SplitPane,
    SplitPaneError,
};
pub use view::{Aria, DividerView, NodeView, PaneView, SlotStyle, SlotView};
