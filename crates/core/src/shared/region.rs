/// An axis-aligned face rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Maps a rectangle found on a downscaled image back to full-frame space.
    pub fn scaled(&self, factor: u32) -> Region {
        let f = factor as i32;
        Region {
            x: self.x * f,
            y: self.y * f,
            width: self.width * f,
            height: self.height * f,
        }
    }

    /// Clips the rectangle to a `frame_width` x `frame_height` frame.
    ///
    /// Returns `None` when nothing of the rectangle remains visible.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Option<Region> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x + self.width).min(frame_width as i32);
        let y2 = (self.y + self.height).min(frame_height as i32);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Region::new(x1, y1, x2 - x1, y2 - y1))
    }
}
