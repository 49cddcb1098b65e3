// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use reeply_app::{
    AppCommand, AppEvent, AppState, DayActivity, DirectionMix, DotSize, Thread, ThreadPager,
    TimelineSpan,
};
use std::io;
use std::ops::Range;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::{Date, Month};

const HALF_PAGE_ROWS: isize = 10;
const FULL_PAGE_ROWS: isize = 20;

/// Terminal cells per day column: one glyph plus one space of breathing room.
pub const DAY_CELL_WIDTH: u16 = 2;

/// Heights of the header and footer bands, borders included.
const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 2;

/// Data the TUI needs from the outside world. The default `spawn_fetch_page`
/// runs synchronously; real runtimes override it with a worker thread.
pub trait AppRuntime {
    fn page_size(&self) -> usize;
    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<Thread>>;
    fn spawn_fetch_page(
        &mut self,
        request_id: u64,
        offset: usize,
        limit: usize,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self
            .fetch_page(offset, limit)
            .map_err(|error| format!("{error:#}"));
        tx.send(InternalEvent::PageLoaded { request_id, result })
            .map_err(|_| anyhow::anyhow!("page event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    PageLoaded {
        request_id: u64,
        result: Result<Vec<Thread>, String>,
    },
}

/// Knobs the config layer hands to the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub address_width: u16,
    pub fetch_lookahead: usize,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            address_width: 18,
            fetch_lookahead: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct GridUiState {
    selected_row: usize,
    row_offset: usize,
    day_offset: usize,
    viewport_rows: usize,
    viewport_days: usize,
}

#[derive(Debug)]
struct ViewData {
    pager: ThreadPager,
    span: Option<TimelineSpan>,
    /// Day buckets per loaded thread, parallel to `pager.threads()`.
    row_activity: Vec<Vec<DayActivity>>,
    in_flight: Option<u64>,
    next_request_id: u64,
    status_token: u64,
    help_visible: bool,
    options: UiOptions,
    grid: GridUiState,
}

impl ViewData {
    fn new(page_size: usize, options: UiOptions) -> Self {
        Self {
            pager: ThreadPager::new(page_size),
            span: None,
            row_activity: Vec::new(),
            in_flight: None,
            next_request_id: 0,
            status_token: 0,
            help_visible: false,
            options,
            grid: GridUiState::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridCommand {
    MoveRow(isize),
    MoveHalfPageDown,
    MoveHalfPageUp,
    MoveFullPageDown,
    MoveFullPageUp,
    JumpFirstRow,
    JumpLastRow,
    MoveDay(isize),
    MoveDayPageBack,
    MoveDayPageForward,
    JumpOldestDay,
    JumpNewestDay,
}

impl GridCommand {
    const fn moves_days(self) -> bool {
        matches!(
            self,
            Self::MoveDay(_)
                | Self::MoveDayPageBack
                | Self::MoveDayPageForward
                | Self::JumpOldestDay
                | Self::JumpNewestDay
        )
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(runtime.page_size(), options);
    let (internal_tx, internal_rx) = mpsc::channel();

    emit_status(state, &mut view_data, &internal_tx, "loading threads");
    request_page(state, runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        match terminal.size() {
            Ok(size) => update_viewport(&mut view_data, size.width, size.height),
            Err(error) => {
                result = Err(error).context("query terminal size");
                break;
            }
        }
        maybe_request_next_page(state, runtime, &mut view_data, &internal_tx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::PageLoaded { request_id, result } => {
                handle_page_loaded(state, view_data, tx, request_id, result);
            }
        }
    }
}

fn handle_page_loaded(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    request_id: u64,
    result: Result<Vec<Thread>, String>,
) {
    // A reload or newer request makes earlier responses stale.
    if view_data.in_flight != Some(request_id) {
        return;
    }
    view_data.in_flight = None;

    match result {
        Ok(page) => {
            let before = view_data.pager.len();
            let absorbed = view_data.pager.absorb_page(page);
            let threads = view_data.pager.threads();
            for thread in &threads[before..] {
                view_data.row_activity.push(thread.activity_by_day());
            }
            if let Some(page_span) = TimelineSpan::from_threads(&threads[before..]) {
                view_data.span = Some(match view_data.span {
                    Some(span) => span.widen(page_span),
                    None => page_span,
                });
            }
            if state.follow_latest {
                snap_to_newest(view_data);
            }
            let summary = if view_data.pager.exhausted() {
                format!("loaded {absorbed} threads ({} total)", view_data.pager.len())
            } else {
                format!(
                    "loaded {absorbed} threads ({} so far)",
                    view_data.pager.len()
                )
            };
            emit_status(state, view_data, tx, summary);
        }
        Err(error) => {
            emit_status(
                state,
                view_data,
                tx,
                format!("page load failed: {error}; press r to retry"),
            );
        }
    }
}

fn request_page<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
) {
    if view_data.in_flight.is_some() || view_data.pager.exhausted() {
        return;
    }
    view_data.next_request_id = view_data.next_request_id.wrapping_add(1);
    let request_id = view_data.next_request_id;
    view_data.in_flight = Some(request_id);

    let offset = view_data.pager.next_offset();
    let limit = view_data.pager.page_size();
    if let Err(error) = runtime.spawn_fetch_page(request_id, offset, limit, tx.clone()) {
        view_data.in_flight = None;
        emit_status(state, view_data, tx, format!("page request failed: {error}"));
    }
}

/// Prefetch: ask for the next page once the cursor viewport gets within
/// `fetch_lookahead` rows of the end of the loaded list.
fn maybe_request_next_page<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
) {
    if view_data.in_flight.is_some() {
        return;
    }
    let rows = visible_rows(
        view_data.grid.row_offset,
        view_data.grid.viewport_rows,
        view_data.pager.len(),
    );
    let last_visible = rows.end.saturating_sub(1);
    if view_data
        .pager
        .should_fetch(last_visible, view_data.options.fetch_lookahead)
    {
        request_page(state, runtime, view_data, tx);
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn dispatch_with_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    for event in state.dispatch(command) {
        if matches!(event, AppEvent::StatusUpdated(_)) {
            view_data.status_token = view_data.status_token.saturating_add(1);
            schedule_status_clear(internal_tx, view_data.status_token);
        }
    }
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    dispatch_with_status(
        state,
        view_data,
        internal_tx,
        AppCommand::SetStatus(message.into()),
    );
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }

    match key.code {
        KeyCode::Char('?') => {
            view_data.help_visible = !view_data.help_visible;
        }
        KeyCode::Esc => {
            if view_data.help_visible {
                view_data.help_visible = false;
            } else if state.show_legend {
                dispatch_with_status(state, view_data, internal_tx, AppCommand::ToggleLegend);
            } else {
                state.dispatch(AppCommand::ClearStatus);
            }
        }
        KeyCode::Char('v') => {
            dispatch_with_status(state, view_data, internal_tx, AppCommand::ToggleLegend);
        }
        KeyCode::Char('f') => {
            dispatch_with_status(state, view_data, internal_tx, AppCommand::ToggleFollow);
            if state.follow_latest {
                snap_to_newest(view_data);
            }
        }
        KeyCode::Char('r') => {
            reload(state, runtime, view_data, internal_tx);
        }
        _ => {
            if let Some(command) = grid_command_for_key(key) {
                // Manual horizontal scrolling takes over from follow mode.
                if command.moves_days() {
                    state.follow_latest = false;
                }
                apply_grid_command(view_data, command);
            }
        }
    }

    maybe_request_next_page(state, runtime, view_data, internal_tx);
    false
}

fn reload<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let page_size = view_data.pager.page_size();
    view_data.pager = ThreadPager::new(page_size);
    view_data.span = None;
    view_data.row_activity.clear();
    view_data.in_flight = None;
    view_data.grid.selected_row = 0;
    view_data.grid.row_offset = 0;
    view_data.grid.day_offset = 0;
    emit_status(state, view_data, internal_tx, "reloading threads");
    request_page(state, runtime, view_data, internal_tx);
}

fn grid_command_for_key(key: KeyEvent) -> Option<GridCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(GridCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(GridCommand::MoveRow(-1)),
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
            Some(GridCommand::MoveDay(-1))
        }
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
            Some(GridCommand::MoveDay(1))
        }
        (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GridCommand::MoveHalfPageDown)
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GridCommand::MoveHalfPageUp)
        }
        (KeyCode::PageDown, _) => Some(GridCommand::MoveFullPageDown),
        (KeyCode::PageUp, _) => Some(GridCommand::MoveFullPageUp),
        (KeyCode::Char('g'), _) => Some(GridCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) => Some(GridCommand::JumpLastRow),
        (KeyCode::Char('H'), _) => Some(GridCommand::MoveDayPageBack),
        (KeyCode::Char('L'), _) => Some(GridCommand::MoveDayPageForward),
        (KeyCode::Char('0'), _) | (KeyCode::Char('^'), _) => Some(GridCommand::JumpOldestDay),
        (KeyCode::Char('$'), _) => Some(GridCommand::JumpNewestDay),
        _ => None,
    }
}

fn apply_grid_command(view_data: &mut ViewData, command: GridCommand) {
    match command {
        GridCommand::MoveRow(delta) => move_row(view_data, delta),
        GridCommand::MoveHalfPageDown => move_row(view_data, HALF_PAGE_ROWS),
        GridCommand::MoveHalfPageUp => move_row(view_data, -HALF_PAGE_ROWS),
        GridCommand::MoveFullPageDown => move_row(view_data, FULL_PAGE_ROWS),
        GridCommand::MoveFullPageUp => move_row(view_data, -FULL_PAGE_ROWS),
        GridCommand::JumpFirstRow => {
            view_data.grid.selected_row = 0;
            ensure_row_visible(view_data);
        }
        GridCommand::JumpLastRow => {
            view_data.grid.selected_row = view_data.pager.len().saturating_sub(1);
            ensure_row_visible(view_data);
        }
        GridCommand::MoveDay(delta) => move_day(view_data, delta),
        GridCommand::MoveDayPageBack => {
            move_day(view_data, -(view_data.grid.viewport_days.max(1) as isize));
        }
        GridCommand::MoveDayPageForward => {
            move_day(view_data, view_data.grid.viewport_days.max(1) as isize);
        }
        GridCommand::JumpOldestDay => view_data.grid.day_offset = 0,
        GridCommand::JumpNewestDay => snap_to_newest(view_data),
    }
}

fn move_row(view_data: &mut ViewData, delta: isize) {
    let row_count = view_data.pager.len();
    if row_count == 0 {
        view_data.grid.selected_row = 0;
        view_data.grid.row_offset = 0;
        return;
    }

    let current = view_data.grid.selected_row;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.grid.selected_row = next.min(row_count.saturating_sub(1));
    ensure_row_visible(view_data);
}

fn ensure_row_visible(view_data: &mut ViewData) {
    let viewport = view_data.grid.viewport_rows.max(1);
    let selected = view_data.grid.selected_row;
    if selected < view_data.grid.row_offset {
        view_data.grid.row_offset = selected;
    } else if selected >= view_data.grid.row_offset + viewport {
        view_data.grid.row_offset = selected + 1 - viewport;
    }
}

fn move_day(view_data: &mut ViewData, delta: isize) {
    let current = view_data.grid.day_offset;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.grid.day_offset = next.min(max_day_offset(view_data));
}

fn max_day_offset(view_data: &ViewData) -> usize {
    let total = view_data.span.map_or(0, TimelineSpan::day_count);
    total.saturating_sub(view_data.grid.viewport_days.max(1))
}

fn snap_to_newest(view_data: &mut ViewData) {
    view_data.grid.day_offset = max_day_offset(view_data);
}

fn update_viewport(view_data: &mut ViewData, width: u16, height: u16) {
    let (rows, days) = grid_geometry(width, height, view_data.options.address_width);
    view_data.grid.viewport_rows = rows;
    view_data.grid.viewport_days = days;
    view_data.grid.day_offset = view_data.grid.day_offset.min(max_day_offset(view_data));
    ensure_row_visible(view_data);
}

/// How many thread rows and day columns the grid band can show at a given
/// terminal size. One inner line goes to the month ruler; the address gutter
/// and a separator column come off the width.
fn grid_geometry(width: u16, height: u16, address_width: u16) -> (usize, usize) {
    let body_height = height.saturating_sub(HEADER_ROWS + FOOTER_ROWS);
    let inner_height = body_height.saturating_sub(2);
    let rows = inner_height.saturating_sub(1) as usize;

    let inner_width = width.saturating_sub(2);
    let grid_width = inner_width.saturating_sub(address_width + 1);
    let days = (grid_width / DAY_CELL_WIDTH) as usize;
    (rows, days)
}

/// Row window actually painted for a vertical scroll position.
pub fn visible_rows(row_offset: usize, viewport_rows: usize, total_rows: usize) -> Range<usize> {
    let start = row_offset.min(total_rows);
    let end = start.saturating_add(viewport_rows).min(total_rows);
    start..end
}

/// Day-column window actually painted for a horizontal scroll position.
pub fn visible_days(day_offset: usize, viewport_days: usize, total_days: usize) -> Range<usize> {
    let start = day_offset.min(total_days);
    let end = start.saturating_add(viewport_days).min(total_days);
    start..end
}

/// First and last calendar day on screen, derived from the scroll position
/// alone so the header indicator never depends on what got painted.
pub fn visible_date_range(
    span: TimelineSpan,
    day_offset: usize,
    viewport_days: usize,
) -> Option<(Date, Date)> {
    let days = visible_days(day_offset, viewport_days, span.day_count());
    if days.is_empty() {
        return None;
    }
    Some((span.date_at(days.start)?, span.date_at(days.end - 1)?))
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(1),
            Constraint::Length(FOOTER_ROWS),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(state, view_data))
        .style(Style::default().fg(Color::White))
        .block(Block::default().title("reeply").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    render_grid(frame, layout[1], view_data);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if state.show_legend {
        let area = centered_rect(44, 38, frame.area());
        frame.render_widget(Clear, area);
        let legend = Paragraph::new(legend_overlay_text()).block(
            Block::default()
                .title("legend")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(legend, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 52, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn header_text(state: &AppState, view_data: &ViewData) -> String {
    let Some(span) = view_data.span else {
        return "waiting for thread data".to_owned();
    };
    let Some((first, last)) = visible_date_range(
        span,
        view_data.grid.day_offset,
        view_data.grid.viewport_days,
    ) else {
        return "waiting for thread data".to_owned();
    };

    let loaded = view_data.pager.len();
    let more = if view_data.pager.exhausted() { "" } else { "+" };
    let follow = if state.follow_latest { " | follow" } else { "" };
    format!(
        "{first} .. {last} | {loaded}{more} threads | {} days{follow}",
        span.day_count()
    )
}

fn status_text(state: &AppState) -> String {
    match &state.status_line {
        Some(line) => line.clone(),
        None => {
            "q quit | j/k threads | h/l days | H/L day page | g/G 0/$ ends | f follow | v legend | r reload | ? help"
                .to_owned()
        }
    }
}

fn render_grid(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let Some(span) = view_data.span else {
        let empty = Paragraph::new(String::new())
            .block(Block::default().borders(Borders::ALL).title("threads"));
        frame.render_widget(empty, area);
        return;
    };

    let rows = visible_rows(
        view_data.grid.row_offset,
        view_data.grid.viewport_rows,
        view_data.pager.len(),
    );
    let days = visible_days(
        view_data.grid.day_offset,
        view_data.grid.viewport_days,
        span.day_count(),
    );

    let gutter_width = view_data.options.address_width as usize;
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(gutter_width + 1)),
        Span::styled(
            month_ruler(span, days.clone()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    let threads = view_data.pager.threads();
    for row_index in rows.clone() {
        let thread = &threads[row_index];
        let activities = view_data
            .row_activity
            .get(row_index)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        lines.push(grid_row_line(
            thread,
            activities,
            span,
            days.clone(),
            gutter_width,
            row_index == view_data.grid.selected_row,
        ));
    }

    let title = if rows.is_empty() {
        "threads".to_owned()
    } else {
        format!(
            "threads {}-{} of {}",
            rows.start + 1,
            rows.end,
            view_data.pager.len()
        )
    };
    let grid = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(grid, area);
}

fn grid_row_line<'a>(
    thread: &Thread,
    activities: &[DayActivity],
    span: TimelineSpan,
    days: Range<usize>,
    gutter_width: usize,
    selected: bool,
) -> Line<'a> {
    let row_style = if selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut spans = Vec::with_capacity(days.len() + 1);
    spans.push(Span::styled(
        format!("{} ", gutter_label(&thread.address, gutter_width)),
        row_style,
    ));

    for day_index in days {
        let cell = span
            .date_at(day_index)
            .and_then(|date| activity_on(activities, date))
            .and_then(|activity| {
                DotSize::for_count(activity.total).map(|size| (size, activity.direction()))
            });
        let span_for_day = match cell {
            Some((size, mix)) => Span::styled(
                format!("{} ", size.glyph()),
                row_style.fg(direction_color(mix)),
            ),
            None => Span::styled("  ".to_owned(), row_style),
        };
        spans.push(span_for_day);
    }
    Line::from(spans)
}

/// Activity lookup for one day; buckets are sorted by day.
fn activity_on(activities: &[DayActivity], date: Date) -> Option<&DayActivity> {
    activities
        .binary_search_by_key(&date, |activity| activity.day)
        .ok()
        .map(|index| &activities[index])
}

const fn direction_color(mix: DirectionMix) -> Color {
    match mix {
        DirectionMix::SentHeavy => Color::Cyan,
        DirectionMix::ReceivedHeavy => Color::White,
        DirectionMix::Balanced => Color::Yellow,
    }
}

/// Address column label, truncated to the gutter with an ellipsis.
fn gutter_label(address: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let count = address.chars().count();
    if count <= width {
        let mut label = address.to_owned();
        label.extend(std::iter::repeat_n(' ', width - count));
        return label;
    }
    let mut label: String = address.chars().take(width - 1).collect();
    label.push('…');
    label
}

/// One line of month labels over the day columns. A label lands on the first
/// of each month and on the leftmost visible day, skipping any that would
/// overlap the previous one.
fn month_ruler(span: TimelineSpan, days: Range<usize>) -> String {
    let width = days.len() * DAY_CELL_WIDTH as usize;
    let mut ruler = vec![b' '; width];
    let mut next_free = 0usize;
    for (slot, index) in days.clone().enumerate() {
        let Some(date) = span.date_at(index) else {
            continue;
        };
        if date.day() != 1 && index != days.start {
            continue;
        }
        let position = slot * DAY_CELL_WIDTH as usize;
        if position < next_free {
            continue;
        }
        let label = format!("{} {}", month_short(date.month()), date.year());
        let take = label.len().min(width - position);
        ruler[position..position + take].copy_from_slice(&label.as_bytes()[..take]);
        next_free = position + take + 1;
    }
    String::from_utf8(ruler).unwrap_or_default()
}

const fn month_short(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

fn legend_overlay_text() -> &'static str {
    "volume per day:\n\
\u{b7}  1 message\n\
\u{2022}  2-4 messages\n\
\u{25cf}  5-9 messages\n\
\u{2588}  10+ messages\n\
\n\
cyan mostly sent | white mostly received | yellow even mix"
}

fn help_overlay_text() -> &'static str {
    "global: q quit | r reload | ? help | esc dismiss\n\
nav: j/k or arrows threads | h/l or arrows days | ctrl+d/u half page | pgup/pgdn full page\n\
nav: g/G first/last thread | 0 or ^ oldest day | $ newest day | H/L day page\n\
view: f follow newest day | v volume legend\n\
threads load oldest-first as you scroll down"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
