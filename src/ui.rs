use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{session::TimerState, stats, util::format_ms, App, AppState};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// Rolling-average window sizes shown in the statistics panel.
const AVERAGE_WINDOWS: [usize; 4] = [5, 12, 50, 100];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(4), // scramble
                    Constraint::Length(2), // elapsed time
                    Constraint::Length(2), // hint
                    Constraint::Min(8),    // stats + times
                ]
                .as_ref(),
            )
            .split(area);

        render_scramble(self, chunks[0], buf);
        render_elapsed(self, chunks[1], buf);
        render_hint(self, chunks[2], buf);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(chunks[3]);

        render_averages(self, panels[0], buf);
        render_times(self, panels[1], buf);
    }
}

fn render_scramble(app: &App, area: Rect, buf: &mut Buffer) {
    let scramble = Paragraph::new(app.session.scramble.to_string())
        .block(Block::default().borders(Borders::ALL).title("Scramble"))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    scramble.render(area, buf);
}

fn render_elapsed(app: &App, area: Rect, buf: &mut Buffer) {
    let style = match app.session.state() {
        TimerState::Idle => Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
        TimerState::Armed => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        TimerState::Running => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    };

    let elapsed = Paragraph::new(Span::styled(format_ms(app.session.elapsed_ms()), style))
        .alignment(Alignment::Center);

    elapsed.render(area, buf);
}

fn render_hint(app: &App, area: Rect, buf: &mut Buffer) {
    let (text, style) = if app.state == AppState::ConfirmClear {
        (
            "clear all times? (y)es / (n)o".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        let text = match app.session.state() {
            TimerState::Running => "press space to stop".to_string(),
            TimerState::Armed => "release space to start".to_string(),
            TimerState::Idle => {
                "hold space to start | (n)ew scramble (d)elete (c)lear (q)uit".to_string()
            }
        };
        (
            text,
            Style::default()
                .add_modifier(Modifier::ITALIC | Modifier::DIM),
        )
    };

    let hint = Paragraph::new(Span::styled(text, style)).alignment(Alignment::Center);
    hint.render(area, buf);
}

fn render_averages(app: &App, area: Rect, buf: &mut Buffer) {
    let snapshot = app.session.log.snapshot();

    let mut lines = Vec::with_capacity(AVERAGE_WINDOWS.len() * 2 + 1);
    for n in AVERAGE_WINDOWS {
        lines.push(stat_line(
            format!("Ao{}", n),
            stats::rolling_average(snapshot, n),
        ));
    }
    lines.push(stat_line(
        "Session".to_string(),
        stats::session_average(snapshot),
    ));
    for n in AVERAGE_WINDOWS {
        lines.push(stat_line(
            format!("Best Ao{}", n),
            stats::best_rolling_average(snapshot, n),
        ));
    }

    let averages = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Averages"));

    averages.render(area, buf);
}

fn stat_line(label: String, average_ms: Option<f64>) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<10}", label),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(
            stats::format_average(average_ms),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_times(app: &App, area: Rect, buf: &mut Buffer) {
    let snapshot = app.session.log.snapshot();
    let title = format!("Times ({})", snapshot.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if snapshot.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "no times recorded yet",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
        .block(block)
        .alignment(Alignment::Center);
        empty.render(area, buf);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let selectable = app.state == AppState::Timer && app.session.state() == TimerState::Idle;

    // scroll the window so the highlighted row is always on screen
    let offset = if selectable {
        app.selected.saturating_sub(visible.saturating_sub(1))
    } else {
        0
    };

    // newest first; `row` counts back from the latest entry like App::selected
    let lines: Vec<Line> = snapshot
        .iter()
        .enumerate()
        .rev()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(row, (index, ms))| {
            let text = format!("{:>4}. {:>9}", index + 1, format_ms(*ms));
            if selectable && row == app.selected {
                Line::from(Span::styled(
                    text,
                    Style::default().add_modifier(Modifier::REVERSED),
                ))
            } else {
                Line::from(Span::raw(text))
            }
        })
        .collect();

    let times = Paragraph::new(lines).block(block);
    times.render(area, buf);
}
