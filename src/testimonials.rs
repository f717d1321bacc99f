use std::time::{Duration, Instant};

/// Testimonials shown side by side
pub const PER_VIEW: usize = 3;

/// Default delay between automatic slides
pub const AUTO_ADVANCE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub location: &'static str,
    #[allow(dead_code)]
    pub image: &'static str,  // Portrait URL, not drawn in the terminal
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "My apartment has never smelled better. Purrify is a game-changer!",
        author: "Sarah L.",
        location: "Montreal",
        image: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400&q=80",
    },
    Testimonial {
        quote: "I've cut my litter expenses in half. My cats and wallet are both happier.",
        author: "Michael T.",
        location: "Toronto",
        image: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&q=80",
    },
    Testimonial {
        quote: "As a vet, I recommend Purrify to all my cat-owning clients. It's simply the best.",
        author: "Dr. Jennifer K.",
        location: "Vancouver",
        image: "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?w=400&q=80",
    },
    Testimonial {
        quote: "The odor control is unbelievable. My guests can't even tell I have three cats!",
        author: "David R.",
        location: "Calgary",
        image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&q=80",
    },
    Testimonial {
        quote: "I was skeptical at first, but after trying Purrify, I'll never go back to regular litter again.",
        author: "Emma S.",
        location: "Ottawa",
        image: "https://images.unsplash.com/photo-1580489944761-15a19d654956?w=400&q=80",
    },
    Testimonial {
        quote: "My cat is very picky, but she took to Purrify immediately. That's all the endorsement I need!",
        author: "James W.",
        location: "Edmonton",
        image: "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=400&q=80",
    },
];

/// Direction of the last slide, used for the transition hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    None,
    Forward,
    Backward,
}

/// Rotating window over a list of testimonials
#[derive(Debug, Clone)]
pub struct Carousel {
    items: &'static [Testimonial],
    index: usize,
    direction: SlideDirection,
    interval: Duration,
    last_move: Instant,
}

impl Carousel {
    pub fn new(items: &'static [Testimonial], interval: Duration, now: Instant) -> Self {
        Self {
            items,
            index: 0,
            direction: SlideDirection::None,
            interval,
            last_move: now,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Highest starting index; the window never runs past the end before wrapping
    fn last_page(&self) -> usize {
        self.items.len().saturating_sub(PER_VIEW)
    }

    /// Number of pagination dots
    pub fn page_count(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.last_page() + 1
        }
    }

    pub fn next(&mut self, now: Instant) {
        if self.page_count() <= 1 {
            return;
        }
        self.index = if self.index == self.last_page() { 0 } else { self.index + 1 };
        self.direction = SlideDirection::Forward;
        self.last_move = now;
    }

    pub fn prev(&mut self, now: Instant) {
        if self.page_count() <= 1 {
            return;
        }
        self.index = if self.index == 0 { self.last_page() } else { self.index - 1 };
        self.direction = SlideDirection::Backward;
        self.last_move = now;
    }

    /// Jump to a pagination dot; out-of-range pages are ignored
    pub fn go_to(&mut self, page: usize, now: Instant) -> bool {
        if page >= self.page_count() {
            return false;
        }
        self.direction = if page > self.index {
            SlideDirection::Forward
        } else {
            SlideDirection::Backward
        };
        self.index = page;
        self.last_move = now;
        true
    }

    /// Advance if the interval has passed since the last move. Returns true on a slide.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.page_count() <= 1 || now.duration_since(self.last_move) < self.interval {
            return false;
        }
        self.next(now);
        true
    }

    /// Testimonials in the current window, wrapping around the list
    pub fn visible(&self) -> Vec<&'static Testimonial> {
        if self.items.is_empty() {
            return Vec::new();
        }
        (0..PER_VIEW.min(self.items.len()))
            .map(|i| &self.items[(self.index + i) % self.items.len()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel() -> (Carousel, Instant) {
        let now = Instant::now();
        (Carousel::new(TESTIMONIALS, AUTO_ADVANCE, now), now)
    }

    #[test]
    fn test_page_count() {
        let (c, _) = carousel();
        assert_eq!(c.len(), 6);
        assert_eq!(c.page_count(), 4);
    }

    #[test]
    fn test_next_wraps_from_last_page() {
        let (mut c, now) = carousel();
        for expected in [1, 2, 3, 0, 1] {
            c.next(now);
            assert_eq!(c.index(), expected);
        }
        assert_eq!(c.direction(), SlideDirection::Forward);
    }

    #[test]
    fn test_prev_wraps_to_last_page() {
        let (mut c, now) = carousel();
        c.prev(now);
        assert_eq!(c.index(), 3);
        assert_eq!(c.direction(), SlideDirection::Backward);
        c.prev(now);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn test_visible_window() {
        let (mut c, now) = carousel();
        let authors: Vec<_> = c.visible().iter().map(|t| t.author).collect();
        assert_eq!(authors, vec!["Sarah L.", "Michael T.", "Dr. Jennifer K."]);

        c.go_to(3, now);
        let authors: Vec<_> = c.visible().iter().map(|t| t.author).collect();
        assert_eq!(authors, vec!["David R.", "Emma S.", "James W."]);
    }

    #[test]
    fn test_go_to() {
        let (mut c, now) = carousel();
        assert!(c.go_to(2, now));
        assert_eq!(c.direction(), SlideDirection::Forward);
        assert!(c.go_to(1, now));
        assert_eq!(c.direction(), SlideDirection::Backward);
        assert!(!c.go_to(4, now));
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn test_auto_advance_waits_for_interval() {
        let (mut c, start) = carousel();
        assert!(!c.tick(start + Duration::from_secs(4)));
        assert_eq!(c.index(), 0);
        assert!(c.tick(start + AUTO_ADVANCE));
        assert_eq!(c.index(), 1);

        // A manual move restarts the wait
        let moved = start + Duration::from_secs(7);
        c.prev(moved);
        assert!(!c.tick(moved + Duration::from_secs(3)));
        assert!(c.tick(moved + Duration::from_secs(6)));
    }

    #[test]
    fn test_short_list_is_single_page() {
        let now = Instant::now();
        let mut c = Carousel::new(&TESTIMONIALS[..2], AUTO_ADVANCE, now);
        assert_eq!(c.page_count(), 1);
        c.next(now);
        c.prev(now);
        assert_eq!(c.index(), 0);
        assert!(!c.tick(now + Duration::from_secs(60)));
        assert_eq!(c.visible().len(), 2);
    }

    #[test]
    fn test_empty_list() {
        let now = Instant::now();
        let c = Carousel::new(&[], AUTO_ADVANCE, now);
        assert_eq!(c.page_count(), 0);
        assert!(c.visible().is_empty());
    }
}
