use crate::app::{App, Focus};
use crate::braille;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 30;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Calculate the canvas size (excluding borders)
pub fn get_canvas_size(frame_area: Rect, fullscreen: bool) -> (u16, u16) {
    if fullscreen {
        (frame_area.width.saturating_sub(2), frame_area.height.saturating_sub(2))
    } else {
        let canvas_width = frame_area.width.saturating_sub(SIDEBAR_WIDTH + 2);
        let canvas_height = frame_area.height.saturating_sub(2);
        (canvas_width, canvas_height)
    }
}

/// Top-left terminal coordinate of the canvas interior, for mapping mouse
/// events back into grid space
pub fn canvas_origin(fullscreen: bool) -> (u16, u16) {
    if fullscreen {
        (1, 1)
    } else {
        (SIDEBAR_WIDTH + 1, 1)
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Status
            Constraint::Length(6),  // Parameters
            Constraint::Min(10),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Sand Toy ");

    let state_text = if app.simulation.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };
    let state_color = if app.simulation.paused {
        HIGHLIGHT_COLOR
    } else {
        BORDER_COLOR
    };

    let mut state_spans = vec![Span::styled(state_text, Style::default().fg(state_color))];
    if app.recorder.is_recording() {
        state_spans.push(Span::styled(" ● REC", Style::default().fg(Color::Red)));
    }

    let message = app.status_message.as_deref().unwrap_or("");

    let content = vec![
        Line::from(Span::styled(
            format!("{} particles", app.simulation.particle_count()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("FPS: {:.1}", app.fps()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(state_spans),
        Line::from(Span::styled(message, Style::default().fg(DIM_TEXT_COLOR))),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Brush ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let sim = &app.simulation;

    let content = vec![
        make_line(
            "Material",
            sim.brush_material.name().to_string(),
            app.focus == Focus::Material,
        ),
        make_line(
            "Radius",
            format!("{}", sim.brush_radius),
            app.focus == Focus::Radius,
        ),
        make_line(
            "Density",
            format!("{:.2}", sim.brush_density),
            app.focus == Focus::Density,
        ),
        make_line(
            "Speed",
            format!("{}", app.steps_per_frame),
            app.focus == Focus::Speed,
        ),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: String| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Drag", "paint".to_string()),
        make_control("F", format!("material: {}", app.simulation.brush_material.name())),
        make_control("[/]", format!("radius: {}", app.simulation.brush_radius)),
        make_control("+/-", "speed".to_string()),
        make_control("Space", "pause/resume".to_string()),
        make_control("R", "reset".to_string()),
        make_control("X", "PNG snapshot".to_string()),
        make_control("G", "record GIF".to_string()),
        make_control("V", "fullscreen".to_string()),
        make_control("H", "help".to_string()),
        make_control("Tab", "select param".to_string()),
        make_control("Q", "quit".to_string()),
    ];

    let block = styled_block(" Controls ");
    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Render Braille pattern
    let cells = braille::render_to_braille(&app.simulation, inner.width, inner.height);

    for cell in cells {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let span = Span::styled(cell.char.to_string(), Style::default().fg(cell.color));
            let paragraph = Paragraph::new(Line::from(span));
            frame.render_widget(paragraph, cell_rect);
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(30);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("FALLING SAND", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Hold the left mouse button and drag over the canvas to pour material. Sand piles up; water flows sideways and settles into pools."),
        Line::from(""),
        Line::from(Span::styled("BRUSH:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("F toggles between sand and water. [ and ] change the brush radius. The density is the chance each cell inside the brush circle gets a particle per tick."),
        Line::from(""),
        Line::from(Span::styled("SIMULATION:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space pauses the frame clock. R clears the grid. +/- change how many ticks run per frame."),
        Line::from(""),
        Line::from(Span::styled("EXPORT:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("X saves the grid as a PNG, one pixel per cell. G starts recording; pressing G again encodes the captured frames to an animated GIF."),
        Line::from(""),
        Line::from(Span::styled("SIDEBAR:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Tab/Shift-Tab select a brush parameter, Up/Down adjust it, Esc deselects."),
        Line::from(""),
        Line::from("V=Fullscreen, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    // Update title to show scroll hint if scrollable
    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
