use crate::entity::{NotificationSummary, SessionEnd};
use crate::table::LOADING_MESSAGE;
use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRow {
    pub id: Option<i64>,
    pub cells: Vec<String>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Loading,
    Empty(String),
    Rows(Vec<ScreenRow>),
}

/// Everything one resource page shows: presets, table and pager.
#[derive(Debug, Clone, PartialEq)]
pub struct TableScreen {
    pub title: String,
    pub presets: Vec<String>,
    pub active_preset: Option<String>,
    pub applied_filters: Vec<(String, String)>,
    pub search: String,
    pub headers: Vec<String>,
    pub body: TableBody,
    pub summary: String,
    pub page_label: String,
    pub has_previous: bool,
    pub has_next: bool,
}

#[async_trait]
pub trait TableView: Send + Sync {
    async fn display_table(&self, screen: TableScreen) -> Result<()>;
    async fn display_success(&self, message: String) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
    async fn display_session_ended(&self, reason: SessionEnd) -> Result<()>;
}

#[async_trait]
pub trait NotificationView: Send + Sync {
    async fn display_notifications(&self, summary: NotificationSummary) -> Result<()>;
}

/// Plain-text rendering for terminals and logs.
pub struct ConsoleView<W> {
    out: Mutex<W>,
}

impl ConsoleView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn grid(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut text = line(headers);
    text.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    text.push_str(&rule.join("-+-"));
    text.push('\n');
    for row in rows {
        text.push_str(&line(row));
        text.push('\n');
    }
    text
}

pub fn render_screen(screen: &TableScreen) -> String {
    let mut text = format!("== {} ==\n", screen.title);

    if !screen.presets.is_empty() {
        let presets: Vec<String> = screen
            .presets
            .iter()
            .map(|label| {
                if screen.active_preset.as_deref() == Some(label.as_str()) {
                    format!("[{}]", label)
                } else {
                    label.clone()
                }
            })
            .collect();
        text.push_str(&format!("Quick filters: {}\n", presets.join("  ")));
    }

    if !screen.applied_filters.is_empty() {
        let filters: Vec<String> = screen
            .applied_filters
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        text.push_str(&format!("Filters: {}\n", filters.join(", ")));
    }

    if !screen.search.trim().is_empty() {
        text.push_str(&format!("Search: \"{}\"\n", screen.search.trim()));
    }

    match &screen.body {
        TableBody::Loading => text.push_str(&format!("{}\n", LOADING_MESSAGE)),
        TableBody::Empty(message) => text.push_str(&format!("{}\n", message)),
        TableBody::Rows(rows) => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|row| {
                    let mut cells = row.cells.clone();
                    if !row.actions.is_empty() || cells.len() < screen.headers.len() {
                        cells.push(row.actions.join(", "));
                    }
                    cells
                })
                .collect();
            text.push_str(&grid(&screen.headers, &cells));
        }
    }

    text.push_str(&format!("{}  ({})\n", screen.summary, screen.page_label));
    text
}

#[async_trait]
impl<W: Write + Send> TableView for ConsoleView<W> {
    async fn display_table(&self, screen: TableScreen) -> Result<()> {
        self.write(&render_screen(&screen))
    }

    async fn display_success(&self, message: String) -> Result<()> {
        self.write(&format!("✅ {}\n", message))
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.write(&format!("❌ Error: {}\n", error_message))
    }

    async fn display_session_ended(&self, reason: SessionEnd) -> Result<()> {
        self.write(&format!("🔒 {}\n", reason))
    }
}

#[async_trait]
impl<W: Write + Send> NotificationView for ConsoleView<W> {
    async fn display_notifications(&self, summary: NotificationSummary) -> Result<()> {
        let mut text = format!("🔔 {} unread\n", summary.unread_count);
        for notification in &summary.notifications {
            let marker = if notification.is_read { " " } else { "*" };
            text.push_str(&format!(
                "{} {} - {}\n",
                marker, notification.title, notification.message
            ));
        }
        self.write(&text)
    }
}
