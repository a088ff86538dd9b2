//! Page rendering

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::*;

use triage_core::entities::Task;
use triage_core::enums::{Priority, TaskStatus};

use super::components::{HelpOverlay, render_text_field};
use super::state::{AppState, EditField, EditForm, Focus};
use super::styles::Theme;

pub const TITLE: &str = " Triage · AI To-Do Manager ";

pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // counters
            Constraint::Length(5), // add-task form
            Constraint::Length(1), // notice
            Constraint::Min(3),    // task list
            Constraint::Length(1), // key hints
        ])
        .split(area);

    render_title(frame, chunks[0], state, theme);
    render_counters(frame, chunks[1], state, theme);
    render_form(frame, chunks[2], state, theme);
    render_notice(frame, chunks[3], state, theme);
    render_tasks(frame, chunks[4], state, theme);
    render_hints(frame, chunks[5], state, theme);

    if let Some(edit) = &state.editing {
        render_edit(frame, area, edit, theme);
    }
    if state.show_help {
        HelpOverlay::render(frame, area, theme);
    }
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mode = if state.remote_enabled() {
        "AI: remote + keywords"
    } else {
        "AI: keywords"
    };
    let line = Line::from(vec![
        Span::styled(TITLE, Style::default().fg(theme.title).bold()),
        Span::styled(format!(" {mode}"), Style::default().fg(theme.dimmed)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_counters(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let counters = state.counters();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let metrics = [
        ("Total Tasks", counters.total, theme.text),
        ("Urgent Tasks", counters.urgent, theme.urgent),
        ("Completed", counters.completed, theme.completed),
    ];
    for ((label, value, color), cell) in metrics.into_iter().zip(cells.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" {label} "))
            .title_style(Style::default().fg(theme.dimmed));
        let paragraph = Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().fg(color).bold(),
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(paragraph, *cell);
    }
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let form_focused = matches!(state.focus, Focus::Description | Focus::Priority);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if form_focused {
            theme.accent
        } else {
            theme.border
        }))
        .title(" Add New Task ")
        .title_style(Style::default().fg(theme.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let editing_description = state.focus == Focus::Description && state.editing.is_none();
    render_text_field(
        frame,
        rows[0],
        "Task:",
        &state.form.input,
        editing_description,
        Some("What needs doing?"),
        theme,
    );

    let suggestion = state.form.suggestion.map_or_else(
        || Line::from(Span::styled("", Style::default())),
        |s| {
            Line::from(vec![
                Span::styled("AI suggests priority: ", Style::default().fg(theme.dimmed)),
                Span::styled(
                    s.priority.as_str(),
                    Style::default().fg(theme.priority(s.priority)).bold(),
                ),
                Span::styled(format!(" ({})", s.source), Style::default().fg(theme.dimmed)),
            ])
        },
    );
    frame.render_widget(Paragraph::new(suggestion), rows[1]);

    let selected = state.form.priority.unwrap_or_default();
    let mut spans = vec![Span::styled(
        "Priority: ",
        if state.focus == Focus::Priority {
            Style::default().fg(theme.accent).underlined()
        } else {
            Style::default().fg(theme.text)
        },
    )];
    spans.extend(priority_choices(selected, state.form.priority.is_some(), theme));
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[2]);
}

fn priority_choices(selected: Priority, chosen: bool, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for priority in Priority::ALL {
        let style = if chosen && priority == selected {
            Style::default()
                .fg(theme.background)
                .bg(theme.priority(priority))
                .bold()
        } else {
            Style::default().fg(theme.priority(priority))
        };
        spans.push(Span::styled(format!(" {priority} "), style));
        spans.push(Span::raw(" "));
    }
    spans
}

fn render_notice(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(notice) = &state.notice else {
        return;
    };
    let line = Line::from(Span::styled(
        notice.text.as_str(),
        Style::default().fg(theme.notice(notice.kind)),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn task_row<'a>(task: &'a Task, theme: &Theme) -> Row<'a> {
    let description_style = if task.status == TaskStatus::Completed {
        Style::default().fg(theme.dimmed).crossed_out()
    } else {
        Style::default().fg(theme.text)
    };
    let created = task
        .created_date
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    Row::new(vec![
        Cell::from(Span::styled(task.description.as_str(), description_style)),
        Cell::from(Span::styled(
            task.priority.as_str(),
            Style::default().fg(theme.priority(task.priority)),
        )),
        Cell::from(Span::styled(
            task.status.as_str(),
            Style::default().fg(theme.status(task.status)),
        )),
        Cell::from(Span::styled(created, Style::default().fg(theme.dimmed))),
    ])
}

fn render_tasks(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if state.focus == Focus::List {
            theme.accent
        } else {
            theme.border
        }))
        .title(" Your Tasks ")
        .title_style(Style::default().fg(theme.title));

    if state.tasks.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No tasks yet. Add your first task above.",
            Style::default().fg(theme.hint),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Task", "Priority", "Status", "Created"])
        .style(Style::default().fg(theme.dimmed).bold());
    let rows: Vec<Row> = state.tasks.iter().map(|t| task_row(t, theme)).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(17),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(theme.selection))
    .highlight_symbol("> ");

    let mut table_state = TableState::default();
    if state.focus == Focus::List {
        table_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_hints(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let hints: &[(&str, &str)] = if state.editing.is_some() {
        &[("Tab", "field"), ("Enter", "save"), ("Esc", "cancel")]
    } else {
        match state.focus {
            Focus::Description => &[("Enter", "suggest"), ("Tab", "priority"), ("Esc", "list")],
            Focus::Priority => &[("Space", "change"), ("Enter", "add"), ("Esc", "list")],
            Focus::List => &[
                ("s", "status"),
                ("p", "priority"),
                ("e", "edit"),
                ("d", "delete"),
                ("n", "new"),
                ("?", "help"),
                ("q", "quit"),
            ],
        }
    };

    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(theme.hint)));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(theme.dimmed),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_edit(frame: &mut Frame, area: Rect, edit: &EditForm, theme: &Theme) {
    let dialog_width = 64;
    let dialog_height = 9;
    let x = area.x + (area.width.saturating_sub(dialog_width)) / 2;
    let y = area.y + (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = Rect {
        x,
        y,
        width: dialog_width.min(area.width),
        height: dialog_height.min(area.height),
    };

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .style(Style::default().bg(theme.background))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(format!(" Edit Task #{} ", edit.id))
        .title_style(Style::default().fg(theme.title).bold());

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    render_text_field(
        frame,
        rows[0],
        "Description:",
        &edit.input,
        edit.field == EditField::Description,
        None,
        theme,
    );

    let label_style = |field: EditField| {
        if edit.field == field {
            Style::default().fg(theme.accent).underlined()
        } else {
            Style::default().fg(theme.text)
        }
    };

    let mut priority = vec![Span::styled("Priority:", label_style(EditField::Priority))];
    priority.push(Span::raw(" "));
    priority.extend(priority_choices(edit.priority, true, theme));
    frame.render_widget(Paragraph::new(Line::from(priority)), rows[1]);

    let mut status = vec![Span::styled("Status:", label_style(EditField::Status)), Span::raw(" ")];
    for option in TaskStatus::ALL {
        let style = if option == edit.status {
            Style::default()
                .fg(theme.background)
                .bg(theme.status(option))
                .bold()
        } else {
            Style::default().fg(theme.status(option))
        };
        status.push(Span::styled(format!(" {option} "), style));
        status.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(status)), rows[2]);

    if let Some(error) = &edit.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(theme.error))),
            rows[3],
        );
    }
}
