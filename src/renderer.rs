use image::imageops::{self, FilterType};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::GameState;
use crate::surface::RasterSurface;

/// Upper half block; foreground paints the top raster row, background the bottom
const HALF_BLOCK: char = '▀';

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub surface: &'a RasterSurface,
    pub player_score: u32,
    pub opponent_score: u32,
    pub fps: u32,
    /// Fixed updates run during the last frame
    pub updates: u32,
    pub area: Rect,
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    /// Creates a new GameRenderer
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
        }
    }

    /// Renders the arena with the status line above and the controls below
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        if area.height < 5 || area.width < 3 {
            return;
        }

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        let arena_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        };
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };

        let image = view.surface.image();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let fitted = fit_area(block.inner(arena_area), image.width(), image.height());
        let bordered = Rect {
            x: fitted.x - 1,
            y: fitted.y - 1,
            width: fitted.width + 2,
            height: fitted.height + 2,
        };
        let inner = block.inner(bordered);
        frame.render_widget(block, bordered);
        frame.render_widget(RasterView::new(view.surface), inner);

        let stats = Line::from(vec![
            Span::styled("Player: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.player_score),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Opponent: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.opponent_score),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Updates: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.updates),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(stats), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[W/S or Up/Down: Move] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the game screen
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let width = 30.min(area.width);
        let height = 6.min(area.height);
        let pause_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }
}

/// Largest cell rectangle inside `area` that shows a `width` x `height` raster
/// at its own aspect ratio. Each cell covers one raster column and two rows.
pub fn fit_area(area: Rect, width: u32, height: u32) -> Rect {
    if area.width == 0 || area.height == 0 || width == 0 || height == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }

    let max_columns = u32::from(area.width);
    let max_rows = u32::from(area.height) * 2;
    let columns = max_columns.min(max_rows * width / height).max(1);
    let rows = (columns * height / width).max(1);
    let cell_rows = rows.div_ceil(2).min(u32::from(area.height));

    let columns = columns as u16;
    let cell_rows = cell_rows as u16;
    Rect {
        x: area.x + (area.width - columns) / 2,
        y: area.y + (area.height - cell_rows) / 2,
        width: columns,
        height: cell_rows,
    }
}

/// Widget that scales a raster into half-block terminal cells
pub struct RasterView<'a> {
    surface: &'a RasterSurface,
}

impl<'a> RasterView<'a> {
    pub fn new(surface: &'a RasterSurface) -> Self {
        Self { surface }
    }
}

impl Widget for RasterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let scaled = imageops::resize(
            self.surface.image(),
            u32::from(area.width),
            u32::from(area.height) * 2,
            FilterType::Triangle,
        );

        for row in 0..area.height {
            for column in 0..area.width {
                let top = scaled.get_pixel(u32::from(column), u32::from(row) * 2);
                let bottom = scaled.get_pixel(u32::from(column), u32::from(row) * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(Color::Rgb(top[0], top[1], top[2]))
                        .set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                }
            }
        }
    }
}
