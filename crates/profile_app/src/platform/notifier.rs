use std::collections::VecDeque;
use std::io::Write;

use super::ui;

/// Surfaces messages the operator must not miss. A shown notification stays
/// up until it is acknowledged; it never dismisses itself.
pub trait Notifier {
    fn notify(&mut self, message: &str);
    fn is_blocking(&self) -> bool;
    fn acknowledge(&mut self);
}

/// Draws a boxed alert on the terminal and queues further alerts behind it.
pub struct TerminalNotifier<W: Write> {
    out: W,
    queue: VecDeque<String>,
}

impl<W: Write> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            queue: VecDeque::new(),
        }
    }

    fn draw(&mut self, message: &str) {
        for line in ui::render::alert(message) {
            let _ = writeln!(self.out, "{line}");
        }
        let _ = self.out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for TerminalNotifier<W> {
    fn notify(&mut self, message: &str) {
        self.queue.push_back(message.to_string());
        if self.queue.len() == 1 {
            self.draw(message);
        }
    }

    fn is_blocking(&self) -> bool {
        !self.queue.is_empty()
    }

    fn acknowledge(&mut self) {
        self.queue.pop_front();
        if let Some(next) = self.queue.front().cloned() {
            self.draw(&next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_blocks_until_acknowledged() {
        let mut notifier = TerminalNotifier::new(Vec::new());
        assert!(!notifier.is_blocking());

        notifier.notify("Please enter a student name");
        assert!(notifier.is_blocking());
        notifier.acknowledge();
        assert!(!notifier.is_blocking());

        let text = String::from_utf8(notifier.into_inner()).unwrap();
        assert!(text.contains("| Please enter a student name"));
    }

    #[test]
    fn queued_alerts_are_shown_one_at_a_time() {
        let mut notifier = TerminalNotifier::new(Vec::new());
        notifier.notify("first");
        notifier.notify("second");
        notifier.acknowledge();
        assert!(notifier.is_blocking());
        notifier.acknowledge();
        assert!(!notifier.is_blocking());

        let text = String::from_utf8(notifier.into_inner()).unwrap();
        let first = text.find("first").unwrap();
        let second = text.find("second").unwrap();
        assert!(first < second);
    }
}
