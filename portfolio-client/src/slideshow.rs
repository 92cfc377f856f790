use serde::Serialize;

/// Index of the shown photo in a gallery of `len` slides, each with an indicator dot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slideshow {
    index: usize,
    len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    Block,
    None,
}

/// How one slide and its indicator dot are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub index: usize,
    pub display: Display,
    pub active: bool,
}

impl Slide {
    pub fn dot_class(&self) -> &'static str {
        if self.active {
            "dot active"
        } else {
            "dot"
        }
    }
}

impl Slideshow {
    pub fn new(len: usize) -> Self {
        Slideshow { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Moves `offset` slides forwards, or backwards for negative offsets.
    pub fn change_slides(&mut self, offset: i64) -> usize {
        self.show_slides((self.index as i64).saturating_add(offset))
    }

    /// Shows the slide at `index`, wrapping around at both ends.
    pub fn show_slides(&mut self, index: i64) -> usize {
        if self.len > 0 {
            self.index = index.rem_euclid(self.len as i64) as usize;
        }
        self.index
    }

    /// Index reached by moving `offset` slides, without moving.
    pub fn peek(&self, offset: i64) -> usize {
        let mut moved = *self;
        moved.change_slides(offset)
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < self.len && index == self.index
    }

    pub fn slides(&self) -> impl Iterator<Item = Slide> + '_ {
        (0..self.len).map(move |index| {
            let active = self.is_active(index);
            Slide {
                index,
                display: if active { Display::Block } else { Display::None },
                active,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(slideshow: &Slideshow) -> (usize, usize) {
        let slides = slideshow.slides().filter(|s| s.display == Display::Block).count();
        let dots = slideshow.slides().filter(|s| s.dot_class() == "dot active").count();
        (slides, dots)
    }

    #[test]
    fn wraps_at_both_ends() {
        let mut slideshow = Slideshow::new(3);
        assert_eq!(slideshow.change_slides(-1), 2);
        assert_eq!(slideshow.change_slides(1), 0);
        assert_eq!(slideshow.change_slides(1), 1);
        assert_eq!(slideshow.show_slides(3), 0);
        assert_eq!(slideshow.show_slides(-4), 2);
        assert_eq!(slideshow.show_slides(7), 1);
    }

    #[test]
    fn any_offset_sequence_stays_in_bounds() {
        let mut slideshow = Slideshow::new(5);
        let offsets = [1, -1, -1, 7, -13, 0, 100, -101, i32::MAX as i64, i32::MIN as i64];
        for offset in offsets.iter() {
            let index = slideshow.change_slides(*offset);
            assert!(index < slideshow.len(), "offset {} gave {}", offset, index);
        }
    }

    #[test]
    fn exactly_one_slide_and_dot_active() {
        let mut slideshow = Slideshow::new(4);
        for index in -6..10 {
            slideshow.show_slides(index);
            assert_eq!(active_count(&slideshow), (1, 1));
            assert!(slideshow.is_active(slideshow.index()));
        }
    }

    #[test]
    fn peek_does_not_move() {
        let slideshow = Slideshow::new(3);
        assert_eq!(slideshow.peek(-1), 2);
        assert_eq!(slideshow.peek(1), 1);
        assert_eq!(slideshow.index(), 0);
    }

    #[test]
    fn empty_slideshow_is_a_no_op() {
        let mut slideshow = Slideshow::new(0);
        assert!(slideshow.is_empty());
        assert_eq!(slideshow.change_slides(1), 0);
        assert_eq!(slideshow.show_slides(-3), 0);
        assert!(!slideshow.is_active(0));
        assert_eq!(slideshow.slides().count(), 0);
    }
}
