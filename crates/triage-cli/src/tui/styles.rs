//! TUI theme and styling

use ratatui::style::Color;

use triage_core::enums::{Priority, TaskStatus};

use super::state::NoticeKind;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Labels
    pub urgent: Color,
    pub normal: Color,
    pub pending: Color,
    pub completed: Color,

    // Notices
    pub success: Color,
    pub error: Color,
    pub info: Color,

    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::phosphor()
    }
}

impl Theme {
    pub const fn phosphor() -> Self {
        Self {
            background: Color::Rgb(16, 20, 18),
            border: Color::Rgb(45, 70, 55),
            selection: Color::Rgb(30, 50, 40),

            title: Color::Rgb(57, 255, 20),
            text: Color::Rgb(180, 255, 180),
            dimmed: Color::Rgb(80, 120, 90),
            hint: Color::Rgb(100, 160, 120),

            urgent: Color::Rgb(255, 100, 80),
            normal: Color::Rgb(130, 170, 255),
            pending: Color::Rgb(255, 180, 60),
            completed: Color::Rgb(0, 255, 180),

            success: Color::Rgb(0, 255, 180),
            error: Color::Rgb(255, 100, 80),
            info: Color::Rgb(130, 170, 255),

            accent: Color::Rgb(57, 255, 20),
        }
    }

    pub const fn priority(&self, priority: Priority) -> Color {
        match priority {
            Priority::Urgent => self.urgent,
            Priority::Normal => self.normal,
        }
    }

    pub const fn status(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::Completed => self.completed,
        }
    }

    pub const fn notice(&self, kind: NoticeKind) -> Color {
        match kind {
            NoticeKind::Success => self.success,
            NoticeKind::Error => self.error,
            NoticeKind::Info => self.info,
        }
    }
}
