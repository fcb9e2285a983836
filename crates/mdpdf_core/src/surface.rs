/// A drawing target for flowables.
///
/// Coordinates follow the PDF convention: the origin is the bottom-left
/// corner and y grows upwards. Text is positioned by its baseline.
pub trait Surface {
    fn set_font_size(&mut self, size: f64);

    /// Draw `text` with its baseline starting at (x, y). No wrapping or clipping.
    fn draw_string(&mut self, x: f64, y: f64, text: &str);

    fn translate(&mut self, dx: f64, dy: f64);

    fn save_state(&mut self);

    fn restore_state(&mut self);
}

/// A surface spanning several pages.
pub trait PageCanvas: Surface {
    /// Finish the current page; later drawing lands on a fresh one.
    fn show_page(&mut self);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::{PageCanvas, Surface};

    /// One `draw_string` call, in absolute coordinates.
    #[derive(Debug, Clone, PartialEq)]
    pub struct DrawnString {
        pub page: usize,
        pub x: f64,
        pub y: f64,
        pub size: f64,
        pub text: String,
    }

    /// Surface that remembers what was drawn where.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub strings: Vec<DrawnString>,
        /// Pages finished with `show_page`
        pub pages: usize,
        origin: (f64, f64),
        size: f64,
        stack: Vec<((f64, f64), f64)>,
    }

    impl Surface for RecordingSurface {
        fn set_font_size(&mut self, size: f64) {
            self.size = size;
        }

        fn draw_string(&mut self, x: f64, y: f64, text: &str) {
            self.strings.push(DrawnString {
                page: self.pages,
                x: self.origin.0 + x,
                y: self.origin.1 + y,
                size: self.size,
                text: text.to_string(),
            });
        }

        fn translate(&mut self, dx: f64, dy: f64) {
            self.origin.0 += dx;
            self.origin.1 += dy;
        }

        fn save_state(&mut self) {
            self.stack.push((self.origin, self.size));
        }

        fn restore_state(&mut self) {
            if let Some((origin, size)) = self.stack.pop() {
                self.origin = origin;
                self.size = size;
            }
        }
    }

    impl PageCanvas for RecordingSurface {
        fn show_page(&mut self) {
            self.pages += 1;
            self.origin = (0.0, 0.0);
            self.stack.clear();
        }
    }
}
