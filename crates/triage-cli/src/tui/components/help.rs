//! Help overlay: how to use the page, plus key bindings

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::styles::Theme;

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 34;
#[cfg(test)]
const BORDER_HEIGHT: u16 = 2;
#[cfg(test)]
const BORDER_WIDTH: u16 = 2;
#[cfg(test)]
const KEY_COLUMN_WIDTH: usize = 14; // 2 spaces indent + 12 chars for key

const HOW_TO: &[&str] = &[
    "1. Type a task description and press Enter",
    "2. Review the suggested priority, change it if needed",
    "3. Press Enter again to add the task",
    "4. Manage tasks from the list below the form",
];

fn shortcuts() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    vec![
        (
            "New task",
            vec![
                ("Enter", "Suggest priority / add"),
                ("Space/←/→", "Change priority"),
                ("Tab", "Next field"),
                ("Esc", "Back to task list"),
            ],
        ),
        (
            "Task list",
            vec![
                ("j/↓", "Move down"),
                ("k/↑", "Move up"),
                ("Space/s", "Toggle status"),
                ("p", "Toggle priority"),
                ("e", "Edit task"),
                ("d", "Delete task"),
                ("n", "New task"),
                ("r", "Refresh"),
                ("q", "Quit"),
            ],
        ),
        (
            "Editing",
            vec![("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Cancel")],
        ),
        ("Other", vec![("?", "Toggle help"), ("Ctrl+C", "Quit from anywhere")]),
    ]
}

#[cfg(test)]
fn content_line_count() -> usize {
    let mut count = HOW_TO.len() + 1;
    for (_, keys) in shortcuts() {
        count += 1; // section header
        count += keys.len();
        count += 1; // blank line after section
    }
    count
}

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let x = area.x + (area.width.saturating_sub(DIALOG_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(DIALOG_HEIGHT)) / 2;

        let dialog_area = Rect {
            x,
            y,
            width: DIALOG_WIDTH.min(area.width),
            height: DIALOG_HEIGHT.min(area.height),
        };

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" How to use ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut lines: Vec<Line> = HOW_TO
            .iter()
            .map(|step| Line::from(Span::styled(*step, Style::default().fg(theme.text))))
            .collect();
        lines.push(Line::from(""));

        for (section, keys) in shortcuts() {
            lines.push(Line::from(Span::styled(
                section,
                Style::default().fg(theme.accent).bold(),
            )));
            for (key, desc) in keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:12}"), Style::default().fg(theme.pending)),
                    Span::styled(desc, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
