use super::theme::Theme;
use crate::application::{BookingFlow, BookingStore};
use crate::domain::{
    Availability, BookingDraft, DayStatus, Locale, SelectedDates, format_idr, is_weekend,
    long_date, month_weeks, nights_label, shift_months,
};
use chrono::{Datelike, Duration, NaiveDate};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use log::warn;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{self, Stdout, stdout};

/// How one cell of the month grid is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Padding day from a neighbouring month.
    Blank,
    Unavailable(DayStatus),
    /// Check-in or check-out.
    Endpoint,
    InRange,
    Available,
}

pub fn cell_kind(
    date: NaiveDate,
    month: u32,
    selected: &SelectedDates,
    availability: &Availability,
    today: NaiveDate,
) -> CellKind {
    if date.month() != month {
        return CellKind::Blank;
    }

    let status = availability.classify(date, today);
    if !status.is_selectable() {
        return CellKind::Unavailable(status);
    }

    if selected.first() == Some(date) || selected.last() == Some(date) {
        CellKind::Endpoint
    } else if selected.contains(date) || selected.is_in_range(date) {
        CellKind::InRange
    } else {
        CellKind::Available
    }
}

/// Cursor and flags of the calendar screen, free of any terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub focused: NaiveDate,
    pub show_help: bool,
    pub should_exit: bool,
}

impl CalendarState {
    pub fn new(focused: NaiveDate) -> Self {
        Self {
            focused,
            show_help: false,
            should_exit: false,
        }
    }

    /// Moves the cursor or flips flags. Returns the day to toggle, if any.
    pub fn handle_key(&mut self, key: KeyEvent, today: NaiveDate) -> Option<NaiveDate> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => self.should_exit = true,
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => self.should_exit = true,

            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => self.focused -= Duration::days(1),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => self.focused += Duration::days(1),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => self.focused -= Duration::weeks(1),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => self.focused += Duration::weeks(1),
            (KeyCode::PageUp, _) => self.focused = shift_months(self.focused, -1),
            (KeyCode::PageDown, _) => self.focused = shift_months(self.focused, 1),
            (KeyCode::Char('t'), _) => self.focused = today,

            (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => return Some(self.focused),
            (KeyCode::Char('?'), _) => self.show_help = !self.show_help,
            _ => {}
        }
        None
    }
}

pub struct CalendarView<'a> {
    state: CalendarState,
    today: NaiveDate,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    flow: &'a BookingFlow,
    store: &'a mut BookingStore,
    status: Option<String>,
}

impl<'a> CalendarView<'a> {
    pub fn new(
        initial_date: NaiveDate,
        today: NaiveDate,
        theme: Theme,
        flow: &'a BookingFlow,
        store: &'a mut BookingStore,
    ) -> io::Result<Self> {
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode();
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self {
            state: CalendarState::new(initial_date),
            today,
            terminal,
            theme,
            flow,
            store,
            status: None,
        })
    }

    fn centered(available: Rect, width: u16, height: u16) -> Rect {
        let width = available.width.min(width);
        let height = available.height.min(height);
        Rect {
            x: available.x + (available.width - width) / 2,
            y: available.y + (available.height - height) / 2,
            width,
            height,
        }
    }

    fn cell_style(
        kind: CellKind,
        date: NaiveDate,
        focused: bool,
        today: NaiveDate,
        theme: &Theme,
    ) -> Style {
        let colors = &theme.colors;
        if focused && kind == CellKind::Available {
            return colors.cursor.to_ratatui_with_modifier(Modifier::BOLD);
        }

        let style = match kind {
            CellKind::Blank => Style::default(),
            CellKind::Unavailable(_) => colors
                .unavailable
                .to_ratatui_with_modifier(Modifier::CROSSED_OUT),
            CellKind::Endpoint => colors.selected.to_ratatui_with_modifier(Modifier::BOLD),
            CellKind::InRange => colors.in_range.to_ratatui(),
            CellKind::Available if date == today => {
                colors.today.to_ratatui_with_modifier(Modifier::BOLD)
            }
            CellKind::Available if is_weekend(date) => colors.weekend.to_ratatui(),
            CellKind::Available => colors.primary.to_ratatui(),
        };

        if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    fn month_table(
        state: &CalendarState,
        draft: &BookingDraft,
        availability: &Availability,
        today: NaiveDate,
        theme: &Theme,
    ) -> Table<'static> {
        let focused = state.focused;
        let header_style = theme.colors.header.to_ratatui();
        let weekend_style = theme.colors.weekend.to_ratatui();

        let header = Row::new(
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let style = if i == 0 || i == 6 { weekend_style } else { header_style };
                    Cell::from(*name).style(style)
                })
                .collect::<Vec<_>>(),
        );

        let rows: Vec<Row> = month_weeks(focused.year(), focused.month())
            .into_iter()
            .map(|week| {
                let cells: Vec<Cell> = week
                    .iter()
                    .map(|&date| {
                        let kind = cell_kind(
                            date,
                            focused.month(),
                            &draft.selected_dates,
                            availability,
                            today,
                        );
                        let text = match kind {
                            CellKind::Blank => String::new(),
                            _ => format!("{:>2}", date.day()),
                        };
                        let style = Self::cell_style(kind, date, date == focused, today, theme);
                        Cell::from(text).style(style)
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        let title = format!(
            "{} {}",
            Locale::English.month_name(focused.month()),
            focused.year()
        );

        Table::new(rows, [Constraint::Length(4); 7])
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.colors.border.to_ratatui())
                    .title(title)
                    .title_style(header_style)
                    .title_alignment(Alignment::Center),
            )
            .column_spacing(1)
    }

    fn summary_lines(draft: &BookingDraft, base_price: u64, theme: &Theme) -> Vec<Line<'static>> {
        let colors = &theme.colors;
        let mut lines = Vec::new();

        match draft.date_range.endpoints() {
            Some((check_in, check_out)) => {
                lines.push(Line::from(format!(
                    "Check-in   {}",
                    long_date(check_in, Locale::English)
                )));
                lines.push(Line::from(format!(
                    "Check-out  {}",
                    long_date(check_out, Locale::English)
                )));
                lines.push(Line::from(Span::styled(
                    nights_label(draft.nights(), Locale::English),
                    colors.accent.to_ratatui(),
                )));
            }
            None => lines.push(Line::from(Span::styled(
                "Pick check-in and check-out",
                colors.dimmed.to_ratatui(),
            ))),
        }

        lines.push(Line::from(""));
        lines.push(Line::from(format!("{} / night", format_idr(base_price))));

        if draft.has_stay() {
            lines.push(Line::from(format!(
                "Subtotal   {}",
                format_idr(draft.pricing.original_price)
            )));
            if draft.pricing.has_discount() {
                lines.push(Line::from(Span::styled(
                    format!("Discount  -{}", format_idr(draft.pricing.discount_amount)),
                    colors.discount.to_ratatui(),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!("Total      {}", format_idr(draft.pricing.final_price)),
                colors.price.to_ratatui_with_modifier(Modifier::BOLD),
            )));
        }

        match &draft.applied_promo {
            Some(promo) => lines.push(Line::from(Span::styled(
                format!("Promo {} (-{}%)", promo.code, promo.discount_percentage),
                colors.discount.to_ratatui(),
            ))),
            None if !draft.promo_code.is_empty() => lines.push(Line::from(Span::styled(
                format!("Promo {} not applied", draft.promo_code),
                colors.error_text.to_ratatui(),
            ))),
            None => {}
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" 12 ", colors.selected.to_ratatui()),
            Span::raw(" check-in/out  "),
            Span::styled(" 13 ", colors.in_range.to_ratatui()),
            Span::raw(" stay"),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                " 14 ",
                colors.unavailable.to_ratatui_with_modifier(Modifier::CROSSED_OUT),
            ),
            Span::raw(" unavailable"),
        ]));
        lines
    }

    fn help_lines(state: &CalendarState, status: Option<&str>, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            format!("{}", state.focused.format("%A, %B %d, %Y")),
            theme.colors.primary.to_ratatui(),
        ))];

        if let Some(status) = status {
            lines.push(Line::from(Span::styled(
                status.to_string(),
                theme.colors.error_text.to_ratatui(),
            )));
        }

        if state.show_help {
            lines.push(Line::from(Span::styled(
                "←→/hl=Day • ↑↓/jk=Week • PgUp/PgDn=Month • t=Today • Space=Toggle • ?=Help • q=Quit",
                theme.colors.help_text.to_ratatui(),
            )));
        }
        lines
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        while !self.state.should_exit {
            let state = &self.state;
            let draft = self.store.draft();
            let availability = self.flow.availability();
            let base_price = self.flow.base_price();
            let today = self.today;
            let theme = &self.theme;
            let status = self.status.as_deref();

            self.terminal.draw(|frame| {
                const CALENDAR_WIDTH: u16 = 38;
                const SIDEBAR_WIDTH: u16 = 36;
                const CALENDAR_HEIGHT: u16 = 10;
                const FOOTER_HEIGHT: u16 = 3;

                let area = Self::centered(
                    frame.area(),
                    CALENDAR_WIDTH + SIDEBAR_WIDTH,
                    CALENDAR_HEIGHT + FOOTER_HEIGHT,
                );
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(CALENDAR_HEIGHT),
                        Constraint::Length(FOOTER_HEIGHT),
                    ])
                    .split(area);
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Length(CALENDAR_WIDTH),
                        Constraint::Length(SIDEBAR_WIDTH),
                    ])
                    .split(rows[0]);

                let table = Self::month_table(state, draft, availability, today, theme);
                frame.render_widget(table, columns[0]);

                let summary = Paragraph::new(Self::summary_lines(draft, base_price, theme))
                    .block(Block::default().borders(Borders::NONE).title(" Your stay "));
                frame.render_widget(summary, columns[1]);

                let help = Paragraph::new(Self::help_lines(state, status, theme))
                    .alignment(Alignment::Center);
                frame.render_widget(help, rows[1]);
            })?;

            if !poll(std::time::Duration::from_millis(100))? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if let Some(date) = self.state.handle_key(key, self.today) {
                    self.status = None;
                    let status = self.flow.availability().classify(date, self.today);
                    if !status.is_selectable() {
                        self.status = Some(format!("{} is {}", date, status.label()));
                    }
                    if let Err(e) = self.flow.toggle_date(self.store, date, self.today) {
                        warn!("toggle failed: {e:#}");
                        self.status = Some(format!("{e}"));
                    }
                }
            }
        }

        self.cleanup()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for CalendarView<'_> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn cells_reflect_selection_and_availability() {
        let today = d(2025, 3, 3);
        let availability = Availability::new([d(2025, 3, 20)], [d(2025, 3, 21)]);
        let selected = SelectedDates::from_days([d(2025, 3, 10), d(2025, 3, 11), d(2025, 3, 12)]);
        let kind = |date| cell_kind(date, 3, &selected, &availability, today);

        assert_eq!(kind(d(2025, 2, 28)), CellKind::Blank);
        assert_eq!(kind(d(2025, 3, 1)), CellKind::Unavailable(DayStatus::Past));
        assert_eq!(kind(d(2025, 3, 10)), CellKind::Endpoint);
        assert_eq!(kind(d(2025, 3, 11)), CellKind::InRange);
        assert_eq!(kind(d(2025, 3, 12)), CellKind::Endpoint);
        assert_eq!(kind(d(2025, 3, 13)), CellKind::Available);
        assert_eq!(kind(d(2025, 3, 20)), CellKind::Unavailable(DayStatus::Booked));
        assert_eq!(kind(d(2025, 3, 21)), CellKind::Unavailable(DayStatus::Blocked));
        // today itself stays selectable
        assert_eq!(kind(today), CellKind::Available);
    }

    #[test]
    fn keys_move_the_cursor() {
        let today = d(2025, 3, 3);
        let mut state = CalendarState::new(d(2025, 1, 31));

        state.handle_key(key(KeyCode::Right), today);
        assert_eq!(state.focused, d(2025, 2, 1));
        state.handle_key(key(KeyCode::Char('k')), today);
        assert_eq!(state.focused, d(2025, 1, 25));
        state.handle_key(key(KeyCode::PageDown), today);
        assert_eq!(state.focused, d(2025, 2, 25));

        state.focused = d(2025, 1, 31);
        state.handle_key(key(KeyCode::PageDown), today);
        assert_eq!(state.focused, d(2025, 2, 28));

        state.handle_key(key(KeyCode::Char('t')), today);
        assert_eq!(state.focused, today);
    }

    #[test]
    fn space_toggles_and_q_quits() {
        let today = d(2025, 3, 3);
        let mut state = CalendarState::new(d(2025, 3, 9));

        assert_eq!(state.handle_key(key(KeyCode::Char(' ')), today), Some(d(2025, 3, 9)));
        assert_eq!(state.handle_key(key(KeyCode::Char('?')), today), None);
        assert!(state.show_help);

        state.handle_key(key(KeyCode::Char('q')), today);
        assert!(state.should_exit);
    }
}
