use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::backend::pokeapi::GENERATION_COUNT;
use crate::backend::preloader::{ButtonVisual, Preloader};

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Loading,
    Ready,
}

pub struct GenerationRow {
    pub number: u32,
    pub species: Option<usize>,
}

pub struct App {
    pub state: AppState,
    pub loading_message: String,
    pub generations: Vec<GenerationRow>,
    pub preloader: Preloader,
}

impl App {
    pub fn new(preloader: Preloader) -> Self {
        let generations = (1..=GENERATION_COUNT)
            .map(|number| GenerationRow {
                number,
                species: None,
            })
            .collect();

        Self {
            state: AppState::Loading,
            loading_message: "Initializing...".to_string(),
            generations,
            preloader,
        }
    }

    pub fn set_loading(&mut self, message: &str) {
        self.state = AppState::Loading;
        self.loading_message = message.to_string();
    }

    pub fn roster_loaded(&mut self, generation: u32, species: usize) {
        if let Some(row) = self
            .generations
            .iter_mut()
            .find(|row| row.number == generation)
        {
            row.species = Some(species);
        }
        self.state = AppState::Ready;
    }
}

// Terminal stand-in for the reference play/pause control, with its titles.
fn indicator(visual: ButtonVisual) -> Option<(&'static str, &'static str)> {
    match visual {
        ButtonVisual::Hidden => None,
        ButtonVisual::OfferPause => Some(("⏸", "pause preloading")),
        ButtonVisual::OfferResume => Some(("▶", "resume preloading")),
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Loading => draw_loading_screen(f, app),
        AppState::Ready => draw_main_ui(f, app),
    }
}

fn draw_loading_screen(f: &mut Frame, app: &App) {
    let area = f.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("PokeVote")
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let center_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(2),
            Constraint::Percentage(45),
        ])
        .split(inner);

    let message = Paragraph::new(&*app.loading_message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(message, center_layout[1]);
}

fn draw_main_ui(f: &mut Frame, app: &App) {
    let area = f.area();

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header with preload control
            Constraint::Min(GENERATION_COUNT as u16 + 3),
            Constraint::Length(3), // footer
        ])
        .split(area);

    draw_header(f, root[0], app);
    draw_generations(f, root[1], app);
    draw_footer(f, root[2]);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let control = match indicator(app.preloader.visual()) {
        Some((symbol, title)) => Line::from(vec![
            Span::styled(
                format!("{symbol} "),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("p: {title}"), Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(""),
    };

    let header = Paragraph::new(control)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("PokeVote")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Right);

    f.render_widget(header, area);
}

fn draw_generations(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Artwork preload")
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    f.render_widget(block, area);

    // The generation currently being preloaded is highlighted, the way the
    // reference marks its generation buttons while loading; the highlight
    // goes away whenever preloading is not actively running.
    let preloading = app.preloader.is_armed();
    let current = app.preloader.last_generation();

    let mut lines: Vec<Line> = Vec::new();
    for row in &app.generations {
        let count = match row.species {
            Some(count) => format!("{count} Pokémon"),
            None => "fetching...".to_string(),
        };

        if preloading && row.number == current {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Generation {}  ", row.number),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(count, Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {}", app.preloader.last_letter()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Generation {}  ", row.number),
                    Style::default().fg(Color::White),
                ),
                Span::styled(count, Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{} images queued", app.preloader.pending()),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines);
    f.render_widget(paragraph, inner);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let text = Line::from(vec![
        Span::styled("p", Style::default().fg(Color::Yellow)),
        Span::raw(": pause/resume preloading  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(": quit"),
    ]);

    let p = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);
    f.render_widget(p, area);
}
