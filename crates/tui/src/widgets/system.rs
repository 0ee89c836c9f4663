//! System gauges widget.
//!
//! Shows CPU, memory and root-disk usage as horizontal bars. Sampling runs on
//! a blocking thread and reports back through [`SystemEvent`]; each result
//! schedules the next sample, so exactly one sampling chain is alive at a
//! time. The chain is identified by a generation number: a manual refresh
//! starts a new generation and results from the old one are dropped without
//! rescheduling.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::KeyCode;
use dashboard_protocol::SystemStats;
use ratatui::layout::Size;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use sysinfo::{Disks, System};
use tracing::{debug, warn};

use crate::effect::Effect;
use crate::event::{Event, SystemEvent};
use crate::style::Theme;
use crate::widget::{Widget, WidgetBase};

/// Title shown on the first line.
const TITLE: &str = "System Information";

/// Columns taken by the label and percentage in front of each bar.
const GAUGE_PREFIX_WIDTH: u16 = 15;

/// Displays sampled system resource usage.
#[derive(Debug)]
pub struct SystemWidget {
    base: WidgetBase,
    theme: Theme,
    system: Arc<Mutex<System>>,
    interval: Duration,
    generation: u64,
    stats: Option<SystemStats>,
    error: Option<String>,
}

impl SystemWidget {
    /// Creates a widget that samples every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            base: WidgetBase::default(),
            theme: Theme::default(),
            system: Arc::new(Mutex::new(System::new())),
            interval,
            generation: 0,
            stats: None,
            error: None,
        }
    }

    /// Sets the colors used for the title, bars and error line.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns the most recent sample.
    #[must_use]
    pub fn stats(&self) -> Option<SystemStats> {
        self.stats
    }

    /// Returns the most recent sampling error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the generation of the live sampling chain.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Builds the effect that waits `delay`, then samples for the current
    /// generation.
    fn sample_after(&self, delay: Duration) -> Effect {
        let system = Arc::clone(&self.system);
        let generation = self.generation;
        Effect::perform(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let result = tokio::task::spawn_blocking(move || sample(&system))
                .await
                .map_err(|e| format!("sampling task failed: {e}"))
                .and_then(|result| result);

            Event::System(match result {
                Ok(stats) => SystemEvent::Sampled { generation, stats },
                Err(message) => SystemEvent::Failed {
                    generation,
                    message,
                },
            })
        })
    }

    fn refresh(&mut self) -> Effect {
        self.generation = self.generation.wrapping_add(1);
        debug!(generation = self.generation, "manual system sample");
        self.sample_after(Duration::ZERO)
    }

    fn on_system_event(&mut self, event: &SystemEvent) -> Option<Effect> {
        match event {
            SystemEvent::Sampled { generation, stats } if *generation == self.generation => {
                self.stats = Some(*stats);
                self.error = None;
            }
            SystemEvent::Failed {
                generation,
                message,
            } if *generation == self.generation => {
                warn!(%message, "system sampling failed");
                self.error = Some(message.clone());
            }
            _ => return None,
        }
        Some(self.sample_after(self.interval))
    }

    fn gauge_line(&self, label: &'static str, percent: f64) -> Line<'static> {
        let bar_width = self.base.size().width.saturating_sub(GAUGE_PREFIX_WIDTH);
        let (filled, empty) = usage_bar(percent, bar_width);
        Line::from(vec![
            Span::styled(
                format!("{label:<7}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{percent:>6.1}% ")),
            Span::styled(filled, Style::default().fg(self.theme.primary)),
            Span::styled(empty, Style::default().fg(self.theme.subtle)),
        ])
    }
}

/// Takes one sample of CPU, memory and root-disk usage.
///
/// Blocks for [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`] so CPU usage has two
/// readings to compare.
fn sample(system: &Mutex<System>) -> Result<SystemStats, String> {
    let mut system = system
        .lock()
        .map_err(|_| "system sampler is unavailable".to_string())?;

    system.refresh_cpu_usage();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    system.refresh_cpu_usage();
    let cpu = f64::from(system.global_cpu_usage());

    system.refresh_memory();
    if system.total_memory() == 0 {
        return Err("memory information unavailable".to_string());
    }
    let memory = SystemStats::ratio(system.used_memory(), system.total_memory());

    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .find(|disk| disk.mount_point() == std::path::Path::new("/"))
        .or_else(|| disks.list().first())
        .map_or(0.0, |disk| {
            let total = disk.total_space();
            SystemStats::ratio(total.saturating_sub(disk.available_space()), total)
        });

    Ok(SystemStats::new(cpu, memory, disk))
}

/// Splits a bar of `width` cells into its filled and empty parts.
fn usage_bar(percent: f64, width: u16) -> (String, String) {
    let width = usize::from(width);
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    // Truncation is intended: a cell is only filled once fully earned.
    let filled = ((width as f64) * percent / 100.0) as usize;
    let filled = filled.min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}

impl Widget for SystemWidget {
    fn init(&mut self) -> Option<Effect> {
        Some(self.sample_after(Duration::ZERO))
    }

    fn handle_event(&mut self, event: &Event) -> Option<Effect> {
        match event {
            Event::System(system) => self.on_system_event(system),
            Event::Key(key) if self.base.is_focused() && key.code == KeyCode::Char('r') => {
                Some(self.refresh())
            }
            _ => None,
        }
    }

    fn render(&self) -> Text<'static> {
        let mut lines = vec![
            Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        match self.stats {
            Some(stats) => {
                lines.push(self.gauge_line("CPU", stats.cpu_percent));
                lines.push(self.gauge_line("Memory", stats.memory_percent));
                lines.push(self.gauge_line("Disk", stats.disk_percent));
            }
            None if self.error.is_none() => lines.push(Line::from(Span::styled(
                "Sampling…",
                Style::default().fg(self.theme.subtle),
            ))),
            None => {}
        }

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(self.theme.error),
            )));
        }

        Text::from(lines)
    }

    fn set_size(&mut self, size: Size) {
        self.base.set_size(size);
    }

    fn size(&self) -> Size {
        self.base.size()
    }

    fn focus(&mut self) {
        self.base.focus();
    }

    fn blur(&mut self) {
        self.base.blur();
    }

    fn is_focused(&self) -> bool {
        self.base.is_focused()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::key;
    use crate::test_utils::text_to_string;

    fn sampled(generation: u64, stats: SystemStats) -> Event {
        Event::System(SystemEvent::Sampled { generation, stats })
    }

    fn failed(generation: u64, message: &str) -> Event {
        Event::System(SystemEvent::Failed {
            generation,
            message: message.to_string(),
        })
    }

    fn widget() -> SystemWidget {
        let mut widget = SystemWidget::new(Duration::from_secs(2));
        widget.set_size(Size::new(40, 6));
        widget
    }

    #[test]
    fn init_requests_a_sample() {
        assert!(matches!(widget().init(), Some(Effect::Perform(_))));
    }

    #[test]
    fn shows_placeholder_before_first_sample() {
        let out = text_to_string(&widget().render());
        assert_eq!(out, "System Information\n\nSampling…");
    }

    #[test]
    fn sample_is_stored_and_next_one_scheduled() {
        let mut widget = widget();
        let effect = widget.handle_event(&sampled(0, SystemStats::new(40.0, 50.0, 100.0)));

        assert!(matches!(effect, Some(Effect::Perform(_))));
        insta::assert_snapshot!(text_to_string(&widget.render()), @r"
        System Information

        CPU      40.0% ██████████░░░░░░░░░░░░░░░
        Memory   50.0% ████████████░░░░░░░░░░░░░
        Disk    100.0% █████████████████████████
        ");
    }

    #[test]
    fn failure_keeps_chain_alive_and_shows_error() {
        let mut widget = widget();
        widget.handle_event(&sampled(0, SystemStats::new(10.0, 10.0, 10.0)));
        let effect = widget.handle_event(&failed(0, "no /proc"));

        assert!(effect.is_some());
        assert_eq!(widget.error(), Some("no /proc"));
        assert!(widget.stats().is_some());
        assert!(text_to_string(&widget.render()).ends_with("Error: no /proc"));
    }

    #[test]
    fn refresh_starts_new_generation_and_drops_old_results() {
        let mut widget = widget();
        widget.focus();

        assert!(widget.handle_event(&key(KeyCode::Char('r'))).is_some());
        assert_eq!(widget.generation(), 1);

        // The superseded chain ends here instead of rescheduling.
        assert!(widget
            .handle_event(&sampled(0, SystemStats::new(99.0, 99.0, 99.0)))
            .is_none());
        assert_eq!(widget.stats(), None);

        assert!(widget
            .handle_event(&sampled(1, SystemStats::new(1.0, 2.0, 3.0)))
            .is_some());
        assert_eq!(widget.stats(), Some(SystemStats::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn unfocused_widget_ignores_refresh() {
        let mut widget = widget();
        assert!(widget.handle_event(&key(KeyCode::Char('r'))).is_none());
        assert_eq!(widget.generation(), 0);
    }

    #[test]
    fn renders_at_degenerate_sizes() {
        let mut widget = widget();
        widget.handle_event(&sampled(0, SystemStats::new(50.0, 50.0, 50.0)));
        for size in [Size::new(0, 0), Size::new(1, 1), Size::new(15, 2)] {
            widget.set_size(size);
            let text = widget.render();
            assert_eq!(text.lines.len(), 5);
        }
    }

    #[test]
    fn usage_bar_clamps() {
        assert_eq!(usage_bar(150.0, 4), ("████".to_string(), String::new()));
        assert_eq!(usage_bar(-3.0, 2), (String::new(), "░░".to_string()));
        assert_eq!(usage_bar(f64::NAN, 0), (String::new(), String::new()));
        assert_eq!(usage_bar(99.0, 10).0.chars().count(), 9);
    }
}
