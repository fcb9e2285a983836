use std::collections::VecDeque;

use crate::error::LayoutError;
use crate::flowable::{Flowable, Size};
use crate::font::TextMeasure;
use crate::page::PageConfig;
use crate::surface::PageCanvas;

// Slack for accumulated floating point error when checking fit
const FIT_TOLERANCE: f64 = 1e-6;

/// Flows a sequence of flowables down the page frame, breaking pages as needed.
#[derive(Debug, Clone, Copy)]
pub struct DocTemplate {
    page: PageConfig,
}

/// The printable area of the current page and how much of it is used.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    used: f64,
    placed: usize,
}

impl Frame {
    fn new(page: &PageConfig) -> Self {
        Self {
            left: page.margin_left,
            top: page.height - page.margin_top,
            width: page.frame_width(),
            height: page.frame_height(),
            used: 0.0,
            placed: 0,
        }
    }

    fn remaining(&self) -> f64 {
        (self.height - self.used).max(0.0)
    }

    fn is_empty(&self) -> bool {
        self.placed == 0
    }

    fn reset(&mut self) {
        self.used = 0.0;
        self.placed = 0;
    }

    fn place<C: PageCanvas>(
        &mut self,
        canvas: &mut C,
        fonts: &dyn TextMeasure,
        flowable: &Flowable,
        size: Size,
    ) {
        let bottom = self.top - self.used - size.height;
        canvas.save_state();
        canvas.translate(self.left, bottom);
        flowable.paint(fonts, canvas, self.width);
        canvas.restore_state();

        self.used += size.height;
        self.placed += 1;
    }
}

impl DocTemplate {
    pub fn new(page: PageConfig) -> Self {
        Self { page }
    }

    /// Lay out and paint every flowable in order. Returns the page count.
    ///
    /// A flowable that does not fit starts a new page. Text blocks are split
    /// between lines first; spacers that do not fit are dropped since the page
    /// break already separates the content.
    pub fn build<C: PageCanvas>(
        &self,
        flowables: Vec<Flowable>,
        fonts: &dyn TextMeasure,
        canvas: &mut C,
    ) -> Result<usize, LayoutError> {
        let mut queue: VecDeque<Flowable> = flowables.into();
        let mut frame = Frame::new(&self.page);
        let mut pages = 1;

        while let Some(flowable) = queue.pop_front() {
            let avail = frame.remaining();
            let size = flowable.measure(fonts, frame.width, avail);

            if size.height <= avail + FIT_TOLERANCE {
                frame.place(canvas, fonts, &flowable, size);
                continue;
            }

            if flowable.is_spacer() {
                log::trace!("dropping {:.1}pt spacer at page end", size.height);
                continue;
            }

            if let Some((head, tail)) = flowable.split(fonts, frame.width, avail) {
                let head_size = head.measure(fonts, frame.width, avail);
                frame.place(canvas, fonts, &head, head_size);
                queue.push_front(tail);
            } else if frame.is_empty() {
                return Err(LayoutError::TooLarge {
                    kind: flowable.kind(),
                    height: size.height,
                    frame_height: frame.height,
                });
            } else {
                queue.push_front(flowable);
            }

            canvas.show_page();
            frame.reset();
            pages += 1;
            log::debug!("starting page {}", pages);
        }

        canvas.show_page();
        Ok(pages)
    }
}
