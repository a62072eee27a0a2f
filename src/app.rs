use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::palette::{BASE_STYLE, STATUS_DATE_STYLE, STATUS_STYLE};
use calpager::{
    CalendarEvent, CalendarPager, CalendarView, ScrollOptions, SelectSource, SelectionLog,
};
use crossterm::event::{poll, read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::Instant;
use time::Date;

#[derive(Clone, Debug)]
pub(crate) struct App {
    calendar: CalendarPager<SelectionLog>,
    last_selection: Option<(Date, SelectSource)>,
    state: AppState,
}

impl App {
    pub(crate) fn new(calendar: CalendarPager<SelectionLog>) -> App {
        App {
            calendar,
            last_selection: None,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
            self.calendar.tick(Instant::now());
            self.apply_events();
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    /// Waits for a key press, but no longer than until the calendar's next
    /// settle is due
    fn handle_input(&mut self) -> io::Result<()> {
        let timeout = self
            .calendar
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()));
        if !timeout.map_or(Ok(true), poll)? {
            return Ok(());
        }
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers)
                || !self.handle_key(code, Instant::now())
            {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode, now: Instant) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.calendar.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.calendar.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.calendar.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.calendar.move_cursor(7),
                KeyCode::Enter | KeyCode::Char(' ') => self.calendar.press_cursor(now),
                KeyCode::Char('[') | KeyCode::PageUp => {
                    self.calendar.swipe_backwards(now).is_ok()
                }
                KeyCode::Char(']') | KeyCode::PageDown => {
                    self.calendar.swipe_forwards(now).is_ok()
                }
                KeyCode::Char('p') => self
                    .calendar
                    .scroll_to_prev_period(ScrollOptions::new(), now),
                KeyCode::Char('n') => self
                    .calendar
                    .scroll_to_next_period(ScrollOptions::new(), now),
                KeyCode::Char('0') | KeyCode::Home => self.jump_to(self.calendar.today(), now),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let input = match key {
                        KeyCode::Char('-') => JumpToInput::Negative,
                        KeyCode::Char('+') => JumpToInput::Positive,
                        KeyCode::Char(c @ '0'..='9') => {
                            let Some(d) = c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                            else {
                                return false;
                            };
                            JumpToInput::Digit(d)
                        }
                        KeyCode::Backspace | KeyCode::Delete => JumpToInput::Backspace,
                        KeyCode::Enter => JumpToInput::Enter,
                        _ => return false,
                    };
                    match state.handle_input(input) {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.jump_to(date, now)
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn jump_to(&mut self, date: Date, now: Instant) -> bool {
        self.calendar.scroll_to_date(date, ScrollOptions::new(), now)
    }

    /// Feeds the calendar's selections back into it and the status line
    fn apply_events(&mut self) {
        let mut log = std::mem::take(self.calendar.handler_mut());
        for event in log.drain() {
            match event {
                CalendarEvent::Selected { date, source } => {
                    tracing::info!(%date, ?source, "date selected");
                    self.calendar.set_selected(Some(date));
                    self.last_selection = Some((date, source));
                }
                CalendarEvent::PeriodChanged(key) => {
                    tracing::info!(%key, "period changed");
                }
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn status_line(&self) -> Line<'static> {
        match self.last_selection {
            Some((date, source)) => {
                let source = match source {
                    SelectSource::DayPress => "day press",
                    SelectSource::PageScroll => "page scroll",
                    SelectSource::Programmatic => "jump",
                };
                Line::from_iter([
                    Span::styled(" Selected ", STATUS_STYLE),
                    Span::styled(date.to_string(), STATUS_DATE_STYLE),
                    Span::styled(format!(" ({source})"), STATUS_STYLE),
                ])
            }
            None => Line::styled(" Nothing selected", STATUS_STYLE),
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        CalendarView::<SelectionLog>::new().render(cal_area, buf, &mut self.calendar);
        self.status_line().render(status_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
