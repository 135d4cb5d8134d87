use crate::cards::Card;
use crate::hand::SlotView;
use crate::round::{Phase, Round, TurnStep};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // piles
            Constraint::Min(10),   // seats
            Constraint::Length(5), // status bar
        ])
        .split(f.area());

    let game = &app.game;
    let round = game.round();
    let config = game.config();

    let totals = game
        .totals()
        .iter()
        .enumerate()
        .map(|(i, t)| format!("P{} {t}", i + 1))
        .collect::<Vec<_>>()
        .join(" • ");
    let mut header_lines = vec![Line::from(format!(
        "Round {}/{}   {}",
        game.round_number(),
        config.rounds,
        phase_label(round.phase())
    ))];
    header_lines.push(Line::from(format!("Totals: {totals}")));
    let header =
        Paragraph::new(header_lines).block(Block::default().title("golf-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_piles(f, chunks[1], round);
    draw_seats(f, chunks[2], app);
    draw_status(f, chunks[3], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if game.is_over() {
        draw_standings(f, app);
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Setup => "Waiting to deal",
        Phase::InitialReveal => "Initial reveal",
        Phase::Playing => "Playing",
        Phase::RoundEnd => "Round over",
    }
}

fn draw_piles(f: &mut Frame, area: Rect, round: &Round) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Length(14), Constraint::Length(14)])
        .split(area);

    let deck_view = if round.deck_len() > 0 { SlotView::Hidden } else { SlotView::Empty };
    render_card_widget(f, cols[0], deck_view, &format!("Deck {}", round.deck_len()), None);

    let discard_view = round.discard_top().map_or(SlotView::Empty, SlotView::Up);
    render_card_widget(f, cols[1], discard_view, &format!("Discard {}", round.discard_len()), None);

    let drawn_view = round.drawn_card().map_or(SlotView::Empty, SlotView::Up);
    render_card_widget(f, cols[2], drawn_view, "Drawn", Some(Color::Yellow));
}

fn draw_seats(f: &mut Frame, area: Rect, app: &AppState) {
    let total = app.game.config().players;
    let top_cols = total.div_ceil(2);
    let bottom_cols = total - top_cols;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);
    for (r, cols_this) in [top_cols, bottom_cols].into_iter().enumerate() {
        if cols_this == 0 {
            continue;
        }
        let col_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..cols_this).map(|_| Constraint::Ratio(1, cols_this as u32)))
            .split(rows[r]);
        for (c, seat_area) in col_chunks.iter().enumerate() {
            // Top row left to right, bottom row right to left, so seats go round the table.
            let idx = if r == 0 { c } else { total - 1 - c };
            render_seat(f, *seat_area, app, idx);
        }
    }
}

fn render_seat(f: &mut Frame, seat_area: Rect, app: &AppState, idx: usize) {
    let round = app.game.round();
    let Some(view) = round.visible_hand(idx) else {
        let block = Block::default().title(format!("P{}", idx + 1)).borders(Borders::ALL);
        let para = Paragraph::new("Not dealt").block(block);
        f.render_widget(para, seat_area);
        return;
    };

    let revealing = round.next_to_reveal() == Some(idx);
    let acting = round.phase() == Phase::Playing && round.current_player() == idx;
    let mut title = format!("P{}", idx + 1);
    if acting {
        title.push_str(" [Act]");
    }
    if revealing {
        title.push_str(" [Reveal]");
    } else if round.phase() == Phase::InitialReveal && round.has_revealed(idx) {
        title.push_str(" [Ready]");
    }
    if round.last_round_trigger() == Some(idx) {
        title.push_str(" [Out]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if acting || revealing {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    f.render_widget(block, seat_area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner(seat_area));
    let mut info = format!(
        "Showing {}  Total {}",
        round.visible_score(idx).unwrap_or(0),
        app.game.totals().get(idx).copied().unwrap_or(0)
    );
    if let Some(score) = round.scores().and_then(|s| s.get(idx)) {
        info.push_str(&format!("  Round {score}"));
    }
    f.render_widget(Paragraph::new(info), split[0]);

    let grid_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(split[1]);
    for (slot, slot_view) in view.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(7), Constraint::Length(7), Constraint::Length(7)])
            .split(grid_rows[slot / 3]);
        let selected = revealing && app.reveal_selection().contains(&slot);
        let border = if selected { Some(Color::Yellow) } else { None };
        render_card_widget(f, cells[slot % 3], *slot_view, &(slot + 1).to_string(), border);
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(inner(area));

    let mut left = vec![Line::from(prompt(app))];
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    let right = vec![Line::from("? help • H history"), Line::from("M menu • Q quit")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn prompt(app: &AppState) -> String {
    let game = &app.game;
    let round = game.round();
    if game.is_over() {
        return "Match over. Space starts a new match.".to_string();
    }
    let p = app.active_player() + 1;
    match round.phase() {
        Phase::Setup => format!("Round {} ready. Space to deal.", game.round_number()),
        Phase::InitialReveal => {
            let picked: Vec<String> =
                app.reveal_selection().iter().map(|s| (s + 1).to_string()).collect();
            format!("P{p}: pick two cards (1-6), Enter to reveal. Picked: [{}]", picked.join(" "))
        }
        Phase::Playing => match (round.turn_step(), round.drawn_card()) {
            (TurnStep::Holding, Some(card)) => {
                format!("P{p} holds {}: 1-6 replace • X discard", short_card(card))
            }
            (TurnStep::MustFlip, _) => format!("P{p}: flip a face-down card (1-6)"),
            _ => format!("P{p} to draw: D deck • P discard pile"),
        },
        Phase::RoundEnd => "Round over. Space banks scores and deals the next round.".to_string(),
    }
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries =
        app.game.round().history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        for entry in entries {
            let mut line = format!("P{} {}", entry.player + 1, entry.verb.label());
            if let Some(card) = entry.card {
                line.push_str(&format!(" {}", short_card(card)));
            }
            if let Some(slot) = entry.slot {
                line.push_str(&format!(" @{}", slot + 1));
            }
            lines.push(Line::from(line));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_standings(f: &mut Frame, app: &AppState) {
    let Some(standings) = app.game.standings() else {
        return;
    };
    let area = centered_rect(40, 50, f.area());
    let block = Block::default().title("Final standings").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::with_capacity(standings.len() + 2);
    for (place, s) in standings.iter().enumerate() {
        let style = if place == 0 {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{}. P{}  {}", place + 1, s.player + 1, s.total),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Space: new match • M: menu",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal / next round / new match"),
        Line::from("- 1-6: pick a slot (reveal, replace or flip)"),
        Line::from("- Enter: confirm the two-card reveal"),
        Line::from("- D: draw from the deck"),
        Line::from("- P: take the top discard"),
        Line::from("- X: discard the drawn card"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Scoring:", bold)),
        Line::from("- A 1, 2-10 face value, J/Q 10, K 0"),
        Line::from("- A face-up pair in a column is removed"),
        Line::from("- Lowest total after the last round wins"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: start, Esc: back"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn short_card(c: Card) -> String {
    format!("{}{}", c.rank().label(), c.suit().glyph())
}

fn render_card_widget(f: &mut Frame, area: Rect, view: SlotView, title: &str, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL).title(title.to_string());
    block = match (border, view) {
        (Some(color), _) => block.border_style(Style::default().fg(color)),
        (None, SlotView::Empty) => block.border_style(Style::default().fg(Color::DarkGray)),
        (None, _) => block,
    };
    let content = match view {
        SlotView::Up(c) => {
            let color = if c.suit().is_red() { Color::Red } else { Color::White };
            Line::from(Span::styled(short_card(c), Style::default().fg(color)))
        }
        SlotView::Hidden => Line::from(Span::styled("▒▒", Style::default().fg(Color::Blue))),
        SlotView::Empty => Line::from(""),
    };
    let para = Paragraph::new(content).alignment(Alignment::Center);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
