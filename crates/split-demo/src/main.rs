// ABOUTME: Main application entry point.
// ABOUTME: Opens a window hosting nested split panes and feeds them winit input.

mod input;

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

use input::{TouchAction, TouchTracker};
use split_core::{Rect, SplitConfig};
use split_layout::{DividerEvent, EventHub, HostEvent, Node, PaneId, SplitPane, SplitPaneError};

struct App {
    window: Option<Arc<Window>>,
    hub: Rc<EventHub>,
    viewport: Rc<Cell<Rect>>,
    root: SplitPane<&'static str>,
    focused_divider: Option<PaneId>,
    modifiers: ModifiersState,
    cursor: (f64, f64),
    touches: TouchTracker,
    last_summary: String,
}

impl App {
    fn new(config: &SplitConfig) -> Result<Self, SplitPaneError> {
        let inner_config = config.clone().with_initial_size("60%");
        let workspace = SplitPane::with_leaves(&inner_config, "editor", "terminal")?;
        let mut root = SplitPane::new(config, vec![Node::Leaf("explorer"), workspace.into()])?;

        let hub = EventHub::new();
        let viewport = Rc::new(Cell::new(Rect::new(0.0, 0.0, 1200.0, 800.0)));
        let bounds = Rc::clone(&viewport);
        root.mount(&hub, Rc::new(move || bounds.get()));

        Ok(Self {
            window: None,
            hub,
            viewport,
            root,
            focused_divider: None,
            modifiers: ModifiersState::empty(),
            cursor: (0.0, 0.0),
            touches: TouchTracker::default(),
            last_summary: String::new(),
        })
    }

    fn divider_under(&self, x: f64, y: f64) -> Option<&SplitPane<&'static str>> {
        self.root.divider_at(x, y)
    }

    fn press_divider(&mut self, x: f64, y: f64, event: DividerEvent) {
        let hit = self.divider_under(x, y).map(|pane| {
            pane.handle_divider_event(event);
            pane.id()
        });
        if matches!(event, DividerEvent::PointerDown | DividerEvent::TouchStart) {
            self.focused_divider = hit;
        }
    }

    /// Tab order follows the pane tree, outermost divider first
    fn cycle_focus(&mut self, backwards: bool) {
        let panes = self.root.panes();
        if panes.is_empty() {
            return;
        }
        let current = self
            .focused_divider
            .and_then(|id| panes.iter().position(|p| *p == id));
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => panes.len() - 1,
            (Some(i), false) => (i + 1) % panes.len(),
            (Some(0), true) => panes.len() - 1,
            (Some(i), true) => i - 1,
        };
        self.focused_divider = Some(panes[next]);
        tracing::info!("Divider focus moved to {:?}", panes[next]);
    }

    fn update_cursor_icon(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let dragging = self
            .root
            .panes()
            .into_iter()
            .filter_map(|id| self.root.find(id))
            .any(|pane| pane.is_dragging());
        let icon = if dragging || self.divider_under(self.cursor.0, self.cursor.1).is_some() {
            CursorIcon::ColResize
        } else {
            CursorIcon::Default
        };
        window.set_cursor(icon);
    }

    /// Log the resolved layout and mirror it in the window title when it changes
    fn report_layout(&mut self) {
        let Some(view) = self.root.view() else {
            return;
        };
        let summary = view
            .placements()
            .iter()
            .map(|(name, rect)| format!("{} {:.0}px", name, rect.width))
            .collect::<Vec<_>>()
            .join(" | ");

        if summary == self.last_summary {
            return;
        }
        let dividers: Vec<&str> = view
            .dividers()
            .iter()
            .map(|d| d.aria.value_text.as_str())
            .collect();
        tracing::debug!("Divider positions: {:?}", dividers);
        tracing::info!("Layout: {}", summary);
        if let Some(window) = &self.window {
            window.set_title(&format!("split-demo: {}", summary));
        }
        self.last_summary = summary;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("split-demo")
            .with_inner_size(LogicalSize::new(1200, 800));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.viewport.set(Rect::new(
            0.0,
            0.0,
            f64::from(size.width),
            f64::from(size.height),
        ));
        tracing::info!(
            "Window created: {}x{} physical pixels, scale factor: {}",
            size.width,
            size.height,
            window.scale_factor()
        );

        self.window = Some(window);
        self.report_layout();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.viewport.set(Rect::new(
                    0.0,
                    0.0,
                    f64::from(new_size.width),
                    f64::from(new_size.height),
                ));
                self.report_layout();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                self.hub.dispatch(&HostEvent::PointerMove {
                    x: position.x,
                    y: position.y,
                });
                self.update_cursor_icon();
                self.report_layout();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let (x, y) = self.cursor;
                match (button, state) {
                    (MouseButton::Left, ElementState::Pressed) => {
                        self.press_divider(x, y, DividerEvent::PointerDown);
                    }
                    (MouseButton::Left, ElementState::Released) => {
                        self.hub.dispatch(&HostEvent::PointerUp { x, y });
                    }
                    (MouseButton::Right, ElementState::Pressed) => {
                        self.press_divider(x, y, DividerEvent::ContextMenu);
                    }
                    _ => {}
                }
                self.update_cursor_icon();
            }
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x, touch.location.y);
                match self.touches.update(touch.id, touch.phase, x, y) {
                    TouchAction::Start { x, y } => {
                        self.press_divider(x, y, DividerEvent::TouchStart);
                    }
                    TouchAction::Host(event) => {
                        self.hub.dispatch(&event);
                    }
                }
                self.report_layout();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if event.logical_key == WinitKey::Named(NamedKey::Tab) {
                    self.cycle_focus(self.modifiers.shift_key());
                    return;
                }

                let key = input::divider_key(&event.logical_key);
                if let Some(pane) = self.focused_divider.and_then(|id| self.root.find(id)) {
                    pane.handle_divider_event(DividerEvent::KeyDown(key));
                }
                self.report_layout();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting split-demo");

    let config = match std::env::args_os().nth(1) {
        Some(path) => SplitConfig::load(Path::new(&path))?,
        None => SplitConfig::load_or_default(),
    };
    tracing::info!(
        "Loaded config: initial_size={} min_size={}",
        config.initial_size,
        config.min_size
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&config)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
