use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

use crate::calculator::{CalculatorEvent, CalculatorState, Control};
use crate::config::AppConfig;
use crate::savings::CalculatorInputs;
use crate::testimonials::{Carousel, TESTIMONIALS};

/// How long a status message stays on the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Calculator,
    Testimonials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub section: Section,
    pub popup: Popup,

    // Savings calculator widget (left)
    pub calculator: CalculatorState,

    // Testimonial carousel (right)
    pub carousel: Carousel,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: &AppConfig, inputs: CalculatorInputs, now: Instant) -> Self {
        // Duration::MAX never elapses, which leaves the carousel on manual control
        let interval = config.auto_advance().unwrap_or(Duration::MAX);

        Self {
            section: Section::Calculator,
            popup: Popup::None,
            calculator: CalculatorState::new(config.policy.clone(), inputs),
            carousel: Carousel::new(TESTIMONIALS, interval, now),
            status_message: None,
            status_message_time: None,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>, now: Instant) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Handle popups first
        if self.popup == Popup::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')) {
                self.popup = Popup::None;
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = match self.section {
                    Section::Calculator => Section::Testimonials,
                    Section::Testimonials => Section::Calculator,
                };
            }
            KeyCode::Char('?') => self.popup = Popup::Help,
            _ => match self.section {
                Section::Calculator => self.handle_calculator_key(key, now),
                Section::Testimonials => self.handle_carousel_key(key, now),
            },
        }
    }

    fn handle_calculator_key(&mut self, key: KeyEvent, now: Instant) {
        let event = match key.code {
            KeyCode::Up | KeyCode::Char('k') => CalculatorEvent::FocusPrev,
            KeyCode::Down | KeyCode::Char('j') => CalculatorEvent::FocusNext,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => CalculatorEvent::Decrement,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => CalculatorEvent::Increment,
            KeyCode::Char(' ') | KeyCode::Enter => CalculatorEvent::TogglePremium,
            KeyCode::Char('r') => CalculatorEvent::Reset,
            // Digits set the focused control directly ('0' is ten on the changes slider)
            KeyCode::Char(c @ '0'..='9') => {
                let n = c as u8 - b'0';
                match self.calculator.focus() {
                    Control::Cats => CalculatorEvent::SetCats(n),
                    Control::Premium => CalculatorEvent::SetPremium(n != 0),
                    Control::Changes => CalculatorEvent::SetChanges(if n == 0 { 10 } else { n }),
                }
            }
            _ => return,
        };

        // The reducer consumes the old state and hands back the next one
        let state = std::mem::take(&mut self.calculator);
        self.calculator = state.apply(event);

        if event == CalculatorEvent::Reset {
            self.set_status("Calculator reset", now);
        }
    }

    fn handle_carousel_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.carousel.prev(now),
            KeyCode::Right | KeyCode::Char('l') => self.carousel.next(now),
            KeyCode::Char(c @ '1'..='9') => {
                let page = c as usize - '1' as usize;
                if self.carousel.go_to(page, now) {
                    self.set_status(
                        format!("Page {} of {}", page + 1, self.carousel.page_count()),
                        now,
                    );
                } else {
                    self.set_status(
                        format!("Only {} pages", self.carousel.page_count()),
                        now,
                    );
                }
            }
            _ => {}
        }
    }

    /// Periodic housekeeping: carousel auto-advance and status expiry
    pub fn tick(&mut self, now: Instant) {
        if self.carousel.tick(now) {
            tracing::trace!(index = self.carousel.index(), "carousel advanced");
        }

        if let Some(time) = self.status_message_time {
            if now.duration_since(time) >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}
