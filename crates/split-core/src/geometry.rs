// ABOUTME: Pixel-space rectangles for container and slot geometry.

/// Rectangle in pixels, origin at the top-left of the host surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// A rect sharing this one's vertical extent, spanning `[x, x + width)`
    pub fn column(&self, x: f64, width: f64) -> Self {
        Self {
            x,
            y: self.y,
            width: width.max(0.0),
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10.0, 0.0, 100.0, 50.0);
        assert!(rect.contains(10.0, 0.0));
        assert!(rect.contains(109.9, 49.9));
        assert!(!rect.contains(110.0, 10.0));
        assert!(!rect.contains(50.0, 50.0));
    }

    #[test]
    fn column_keeps_vertical_extent() {
        let rect = Rect::new(0.0, 20.0, 300.0, 80.0);
        let col = rect.column(100.0, -5.0);
        assert_eq!(col, Rect::new(100.0, 20.0, 0.0, 80.0));
    }
}
