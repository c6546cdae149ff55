// ABOUTME: Translates winit keyboard and touch input into split pane events.

use split_layout::{HostEvent, Key};
use winit::event::TouchPhase;
use winit::keyboard::{Key as WinitKey, NamedKey};

/// Divider key for a logical key press
pub fn divider_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::ArrowLeft) => Key::ArrowLeft,
        WinitKey::Named(NamedKey::ArrowRight) => Key::ArrowRight,
        _ => Key::Other,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TouchAction {
    /// A new finger landed; the host decides whether it hit a divider
    Start { x: f64, y: f64 },
    Host(HostEvent),
}

/// winit reports each finger separately; the widget wants the active set
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: Vec<(u64, (f64, f64))>,
}

impl TouchTracker {
    pub fn update(&mut self, id: u64, phase: TouchPhase, x: f64, y: f64) -> TouchAction {
        match phase {
            TouchPhase::Started => {
                self.active.push((id, (x, y)));
                TouchAction::Start { x, y }
            }
            TouchPhase::Moved => {
                if let Some(entry) = self.active.iter_mut().find(|(i, _)| *i == id) {
                    entry.1 = (x, y);
                }
                TouchAction::Host(HostEvent::TouchMove {
                    touches: self.active.iter().map(|(_, point)| *point).collect(),
                })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.active.retain(|(i, _)| *i != id);
                TouchAction::Host(HostEvent::TouchEnd)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_map_to_divider_keys() {
        assert_eq!(divider_key(&WinitKey::Named(NamedKey::ArrowLeft)), Key::ArrowLeft);
        assert_eq!(divider_key(&WinitKey::Named(NamedKey::ArrowRight)), Key::ArrowRight);
        assert_eq!(divider_key(&WinitKey::Named(NamedKey::ArrowUp)), Key::Other);
        assert_eq!(divider_key(&WinitKey::Character("a".into())), Key::Other);
    }

    #[test]
    fn earliest_finger_leads_touch_moves() {
        let mut tracker = TouchTracker::default();
        assert_eq!(
            tracker.update(7, TouchPhase::Started, 10.0, 5.0),
            TouchAction::Start { x: 10.0, y: 5.0 }
        );
        tracker.update(9, TouchPhase::Started, 90.0, 5.0);

        let moved = tracker.update(9, TouchPhase::Moved, 95.0, 6.0);
        assert_eq!(
            moved,
            TouchAction::Host(HostEvent::TouchMove {
                touches: vec![(10.0, 5.0), (95.0, 6.0)]
            })
        );
    }

    #[test]
    fn lifting_a_finger_ends_the_drag() {
        let mut tracker = TouchTracker::default();
        tracker.update(1, TouchPhase::Started, 0.0, 0.0);
        assert_eq!(
            tracker.update(1, TouchPhase::Cancelled, 0.0, 0.0),
            TouchAction::Host(HostEvent::TouchEnd)
        );
        assert_eq!(
            tracker.update(1, TouchPhase::Moved, 3.0, 0.0),
            TouchAction::Host(HostEvent::TouchMove { touches: vec![] })
        );
    }
}
