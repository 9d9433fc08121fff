use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, stdout};
use tracing::warn;

/// The terminal modes the game switches on and off
pub trait Console {
    fn enable_raw_mode(&mut self) -> io::Result<()>;
    fn disable_raw_mode(&mut self) -> io::Result<()>;
    fn enter_alternate_screen(&mut self) -> io::Result<()>;
    fn leave_alternate_screen(&mut self) -> io::Result<()>;
    fn push_keyboard_enhancement(&mut self) -> io::Result<()>;
    fn pop_keyboard_enhancement(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
}

/// The process terminal on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermConsole;

impl Console for CrosstermConsole {
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }

    fn enter_alternate_screen(&mut self) -> io::Result<()> {
        execute!(stdout(), EnterAlternateScreen)
    }

    fn leave_alternate_screen(&mut self) -> io::Result<()> {
        execute!(stdout(), LeaveAlternateScreen)
    }

    // Release events are only reported with enhancement flags pushed
    fn push_keyboard_enhancement(&mut self) -> io::Result<()> {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )
    }

    fn pop_keyboard_enhancement(&mut self) -> io::Result<()> {
        execute!(stdout(), PopKeyboardEnhancementFlags)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        execute!(stdout(), Show)
    }
}

/// Tracks which terminal modes are switched on and switches them off again.
///
/// Restoring happens on [`TerminalSession::restore`] or on drop, whichever
/// comes first, so an early `?` return still leaves the shell usable.
pub struct TerminalSession<C: Console> {
    console: C,
    raw_mode: bool,
    alternate_screen: bool,
    keyboard_enhancement: bool,
}

impl<C: Console> TerminalSession<C> {
    /// Enters raw mode and the alternate screen, then pushes keyboard
    /// enhancement flags when `keyboard_enhancement` is set. A failing step
    /// undoes the ones before it.
    pub fn enter(console: C, keyboard_enhancement: bool) -> io::Result<Self> {
        let mut session = Self {
            console,
            raw_mode: false,
            alternate_screen: false,
            keyboard_enhancement: false,
        };

        session.console.enable_raw_mode()?;
        session.raw_mode = true;
        session.console.enter_alternate_screen()?;
        session.alternate_screen = true;
        if keyboard_enhancement {
            session.console.push_keyboard_enhancement()?;
            session.keyboard_enhancement = true;
        }

        Ok(session)
    }

    /// Undoes every active mode in reverse order. Every step runs even when
    /// an earlier one fails; the first failure is returned.
    pub fn restore(&mut self) -> io::Result<()> {
        let mut first_error = None;
        let mut record = |result: io::Result<()>| {
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        };

        if std::mem::take(&mut self.keyboard_enhancement) {
            record(self.console.pop_keyboard_enhancement());
        }
        if std::mem::take(&mut self.alternate_screen) {
            record(self.console.leave_alternate_screen());
            record(self.console.show_cursor());
        }
        if std::mem::take(&mut self.raw_mode) {
            record(self.console.disable_raw_mode());
        }

        first_error.map_or(Ok(()), Err)
    }

    pub fn is_active(&self) -> bool {
        self.raw_mode || self.alternate_screen || self.keyboard_enhancement
    }
}

impl<C: Console> Drop for TerminalSession<C> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "terminal restore failed");
        }
    }
}

/// Restores the terminal before the current panic hook prints, so the report
/// lands on the normal screen instead of the discarded alternate one.
pub fn install_panic_hook(keyboard_enhancement: bool) {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let mut console = CrosstermConsole;
        if keyboard_enhancement {
            let _ = console.pop_keyboard_enhancement();
        }
        let _ = console.leave_alternate_screen();
        let _ = console.show_cursor();
        let _ = console.disable_raw_mode();
        hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every call and fails the ones named in `failing`
    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<&'static str>>>,
        failing: Vec<&'static str>,
    }

    impl Recorder {
        fn failing(steps: &[&'static str]) -> Self {
            Self {
                failing: steps.to_vec(),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }

        fn call(&mut self, step: &'static str) -> io::Result<()> {
            self.calls.borrow_mut().push(step);
            if self.failing.contains(&step) {
                Err(io::Error::other(step))
            } else {
                Ok(())
            }
        }
    }

    impl Console for Recorder {
        fn enable_raw_mode(&mut self) -> io::Result<()> {
            self.call("enable_raw")
        }

        fn disable_raw_mode(&mut self) -> io::Result<()> {
            self.call("disable_raw")
        }

        fn enter_alternate_screen(&mut self) -> io::Result<()> {
            self.call("enter_alt")
        }

        fn leave_alternate_screen(&mut self) -> io::Result<()> {
            self.call("leave_alt")
        }

        fn push_keyboard_enhancement(&mut self) -> io::Result<()> {
            self.call("push_flags")
        }

        fn pop_keyboard_enhancement(&mut self) -> io::Result<()> {
            self.call("pop_flags")
        }

        fn show_cursor(&mut self) -> io::Result<()> {
            self.call("show_cursor")
        }
    }

    #[test]
    fn test_restore_undoes_modes_in_reverse_order() {
        let recorder = Recorder::default();
        let mut session = TerminalSession::enter(recorder.clone(), true).unwrap();
        assert!(session.is_active());

        session.restore().unwrap();
        assert!(!session.is_active());
        assert_eq!(
            recorder.calls(),
            vec![
                "enable_raw",
                "enter_alt",
                "push_flags",
                "pop_flags",
                "leave_alt",
                "show_cursor",
                "disable_raw",
            ]
        );
    }

    #[test]
    fn test_failed_enter_restores_completed_steps() {
        let recorder = Recorder::failing(&["push_flags"]);
        let result = TerminalSession::enter(recorder.clone(), true);

        assert!(result.is_err());
        assert_eq!(
            recorder.calls(),
            vec![
                "enable_raw",
                "enter_alt",
                "push_flags",
                "leave_alt",
                "show_cursor",
                "disable_raw",
            ]
        );
    }

    #[test]
    fn test_failing_step_does_not_skip_the_rest() {
        let recorder = Recorder::failing(&["pop_flags", "disable_raw"]);
        let mut session = TerminalSession::enter(recorder.clone(), true).unwrap();

        let err = session.restore().unwrap_err();
        assert_eq!(err.to_string(), "pop_flags");
        assert!(recorder.calls().ends_with(&[
            "pop_flags",
            "leave_alt",
            "show_cursor",
            "disable_raw"
        ]));
    }

    #[test]
    fn test_drop_restores_once() {
        let recorder = Recorder::default();
        {
            let mut session = TerminalSession::enter(recorder.clone(), false).unwrap();
            session.restore().unwrap();
        }
        {
            let _session = TerminalSession::enter(recorder.clone(), false).unwrap();
        }

        let calls = recorder.calls();
        assert_eq!(calls.iter().filter(|call| **call == "disable_raw").count(), 2);
        assert!(!calls.contains(&"push_flags"));
        assert!(!calls.contains(&"pop_flags"));
    }
}
