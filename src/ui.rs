use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::{io, sync::Arc, time::Duration};
use textwrap::wrap;
use tui_input::{backend::crossterm::EventHandler, Input};

use day_night::chat::ChatSession;
use day_night::clock::{format_time, Clock, SystemClock};
use day_night::contacts::ContactList;
use day_night::models::Message;

pub use ratatui::Terminal;
pub use ratatui::backend::CrosstermBackend;

const LIST_BACKGROUND: Color = Color::Yellow;
const LIST_ROW: Color = Color::Rgb(90, 90, 20);
const CHAT_BACKGROUND: Color = Color::White;
const TITLE_BAR: Color = Color::Blue;
const INPUT_BAR: Color = Color::Rgb(220, 220, 220);
const MY_BUBBLE: Color = Color::Rgb(179, 209, 255);
const PEER_BUBBLE: Color = Color::Rgb(200, 200, 200);

const SUN: &str = "☀";
const MOON: &str = "☾";

/// Chat screen state: the session plus the widget editing its draft
pub struct ChatView {
    session: ChatSession,
    input: Input,
}

impl ChatView {
    fn new(session: ChatSession) -> Self {
        ChatView {
            session,
            input: Input::default(),
        }
    }
}

pub enum Screen {
    Contacts,
    Chat(ChatView),
}

pub struct App {
    contacts: ContactList,
    screen: Screen,
    clock: Arc<dyn Clock>,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Chats opened from this app stamp their messages with `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        App {
            contacts: ContactList::new(),
            screen: Screen::Contacts,
            clock,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Wait up to `timeout` for a key press and apply it
    pub fn handle_input(&mut self, timeout: Duration) -> Result<()> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Quit requested");
            self.should_quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Contacts => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => self.contacts.select_previous(),
                KeyCode::Down | KeyCode::Char('j') => self.contacts.select_next(),
                KeyCode::Enter => {
                    if let Some(contact) = self.contacts.open_selected() {
                        let session = ChatSession::with_clock(contact, Arc::clone(&self.clock));
                        self.screen = Screen::Chat(ChatView::new(session));
                    }
                }
                _ => {}
            },
            Screen::Chat(view) => match key.code {
                KeyCode::Esc => {
                    debug!("Leaving chat with {}", view.session.contact().name);
                    // Dropping the view tears down the session and its timers
                    self.screen = Screen::Contacts;
                }
                KeyCode::Enter => {
                    if view.session.send_draft() {
                        view.input = Input::default();
                    }
                }
                _ => {
                    view.input.handle_event(&Event::Key(key));
                    view.session.set_draft(view.input.value());
                }
            },
        }
    }

    /// Apply any auto-replies that have fired
    pub fn tick(&mut self) {
        if let Screen::Chat(view) = &mut self.screen {
            view.session.poll_replies();
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Contacts => draw_contact_list(frame, &self.contacts),
            Screen::Chat(view) => draw_chat(frame, view),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_contact_list(f: &mut Frame, contacts: &ContactList) {
    let size = f.size();
    f.render_widget(
        Block::default().style(Style::default().bg(LIST_BACKGROUND)),
        size,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(3),    // Contacts
            Constraint::Length(1), // Help line
        ])
        .split(size);

    let title = Paragraph::new(Line::from(Span::styled(
        "Contacts",
        Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = contacts
        .contacts()
        .iter()
        .map(|c| {
            let row = Line::from(vec![
                Span::raw(" "),
                Span::styled("●", Style::default().fg(c.avatar_color.to_color())),
                Span::raw(" "),
                Span::styled(
                    c.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]);
            ListItem::new(Text::from(vec![Line::from(""), row, Line::from("")]))
                .style(Style::default().bg(LIST_ROW))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(contacts.selected_index()));

    let list = List::new(items)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, chunks[1], &mut state);

    let help = Paragraph::new(Span::styled(
        "↑/↓ select | Enter open | q quit",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(help, chunks[2]);
}

fn draw_chat(f: &mut Frame, view: &ChatView) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(3),    // Messages
            Constraint::Length(3), // Input bar
        ])
        .split(size);

    let title = Paragraph::new(Line::from(vec![Span::styled(
        view.session.contact().name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )]))
    .alignment(Alignment::Center)
    .style(Style::default().bg(TITLE_BAR).fg(Color::White));
    f.render_widget(title, chunks[0]);

    draw_background(f, chunks[1]);
    draw_messages(f, view.session.messages(), chunks[1]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .title("Enter send | Esc back")
        .style(Style::default().bg(INPUT_BAR).fg(Color::Black));

    let (scroll, cursor) = input_offsets(&view.input, chunks[2].width);
    let input_text = if view.input.value().is_empty() {
        Span::styled("Type here", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(view.input.value())
    };
    let input_widget = Paragraph::new(Line::from(vec![input_text]))
        .scroll((0, scroll))
        .block(input_block);
    f.render_widget(input_widget, chunks[2]);

    f.set_cursor(chunks[2].x + cursor + 1, chunks[2].y + 1);
}

/// Horizontal scroll of the draft and the cursor column inside the box,
/// both in terminal cells so wide Hangul and emoji line up.
fn input_offsets(input: &Input, box_width: u16) -> (u16, u16) {
    // Two border columns plus one for the cursor past the last character
    let width = box_width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let cursor = input.visual_cursor().max(scroll) - scroll;
    (scroll as u16, cursor as u16)
}

/// White backdrop with the sun in the top-right and the moon bottom-left
fn draw_background(f: &mut Frame, area: Rect) {
    f.render_widget(
        Block::default().style(Style::default().bg(CHAT_BACKGROUND)),
        area,
    );

    if area.width < 4 || area.height < 4 {
        return;
    }

    // Both icons sit in the one-column margin left free by `draw_messages`
    let sun = Rect::new(area.right() - 1, area.y, 1, 1);
    f.render_widget(
        Paragraph::new(Span::styled(SUN, Style::default().fg(Color::Yellow))),
        sun,
    );

    // Lifted a few rows above the input bar
    let moon_y = area.bottom().saturating_sub(3).max(area.y);
    let moon = Rect::new(area.x, moon_y, 1, 1);
    f.render_widget(
        Paragraph::new(Span::styled(MOON, Style::default().fg(Color::Gray))),
        moon,
    );
}

/// Lay out messages as bubbles: time caption above, ours right-aligned in
/// blue, theirs left-aligned in grey.
fn message_lines(messages: &[Message], width: u16) -> Vec<Line<'static>> {
    let bubble_width = ((width as usize) * 2 / 3).max(8);
    let mut lines = Vec::new();

    for m in messages {
        let alignment = if m.is_sent_by_me { Alignment::Right } else { Alignment::Left };
        let bubble = Style::default()
            .fg(Color::Black)
            .bg(if m.is_sent_by_me { MY_BUBBLE } else { PEER_BUBBLE });

        lines.push(
            Line::from(Span::styled(
                format_time(&m.timestamp),
                Style::default().fg(Color::Gray),
            ))
            .alignment(alignment),
        );

        for chunk in wrap(&m.text, bubble_width.saturating_sub(2)) {
            lines.push(
                Line::from(Span::styled(format!(" {} ", chunk), bubble)).alignment(alignment),
            );
        }
        lines.push(Line::from(""));
    }

    lines
}

fn draw_messages(f: &mut Frame, messages: &[Message], area: Rect) {
    let inner = Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(1),
    );
    let lines = message_lines(messages, inner.width);

    // Keep the newest message in view
    let scroll = (lines.len() as u16).saturating_sub(inner.height);

    let messages_widget = Paragraph::new(lines).scroll((scroll, 0));
    f.render_widget(messages_widget, inner);
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
