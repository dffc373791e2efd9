//! Terminal renderer
//!
//! Prints every render request to stdout with `colored` styling. Errors go
//! to stderr. There is no address bar in a terminal, so location updates
//! are only logged.

use colored::Colorize;
use tracing::debug;

use super::traits::Renderer;
use super::types::{MessageLevel, Notice, Overlay, OverlayKind, ResultCard};
use crate::api::{DatasetDetail, SmartSearchResponse, Topic};
use crate::session::{AnalysisView, Highlight, HighlightSink, PageButton};

const BAR_WIDTH: usize = 20;

/// Colored stdout implementation of [`Renderer`]
///
/// With `quiet` set, informational output (selection counts, success
/// notices, favorites counter) is suppressed; results and errors are not.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer {
    quiet: bool,
}

impl TerminalRenderer {
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn print_detail(detail: &DatasetDetail) {
        println!("{}", detail.title.bold());
        println!("{}", detail.id.dimmed());

        let facts: Vec<String> = [
            detail.kind.clone(),
            detail.province.clone(),
            detail.org.clone(),
            detail.year.map(|y| y.to_string()),
            detail.update_date.as_ref().map(|d| format!("aktualisiert {d}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !facts.is_empty() {
            println!("{}", facts.join(" · "));
        }
        if detail.is_open_data {
            println!("{}", "Open Data".green());
        }
        if detail.gem_score > 0.0 {
            println!("Qualität: {:.1}", detail.gem_score);
        }

        if let Some(summary) = detail.summary.as_deref().filter(|s| !s.is_empty()) {
            println!();
            println!("{summary}");
        }

        print_list("Themen", &detail.themes);
        print_list("Schlagwörter", &detail.keywords);
        print_list("Formate", &detail.formats);

        if !detail.services.is_empty() {
            println!();
            println!("{}", "Dienste".bold());
            for service in &detail.services {
                println!("  {} {}", service.kind.cyan(), service.url);
            }
        }
        if let Some(contact) = &detail.contact {
            println!("Kontakt: {contact}");
        }
        if let Some(url) = &detail.inspire_url {
            println!("{}", url.underline());
        }
    }

    fn print_analysis(view: &AnalysisView) {
        println!("{}", view.title.bold());
        println!(
            "{} {}%  ({}/9 Bundesländer)",
            coverage_bar(view.coverage_percent, BAR_WIDTH),
            view.coverage_percent,
            view.covered_count()
        );

        let provinces: Vec<String> = view
            .provinces
            .iter()
            .map(|p| {
                if p.covered {
                    format!("{} {}", "✓".green(), p.name)
                } else {
                    format!("{} {}", "✗".red(), p.name.dimmed())
                }
            })
            .collect();
        println!("{}", provinces.join("  "));

        println!(
            "{} von {} Datensätzen mit WFS · {}",
            view.datasets_with_wfs,
            view.total_datasets,
            if view.combinable {
                "kombinierbar".green()
            } else {
                "nicht kombinierbar".yellow()
            }
        );

        if !view.common_fields.shown.is_empty() {
            let mut line = view.common_fields.shown.join(", ");
            if let Some(more) = view.common_fields.overflow_label() {
                line = format!("{line} {}", more.dimmed());
            }
            println!("{} {line}", "Gemeinsame Felder:".bold());
        }

        if !view.field_mappings.shown.is_empty() {
            println!("{}", "Feldzuordnungen:".bold());
            for mapping in &view.field_mappings.shown {
                println!("  {} → {}", mapping.field, mapping.canonical.cyan());
            }
            if let Some(more) = view.field_mappings.overflow_label() {
                println!("  {}", more.dimmed());
            }
        }

        if !view.wfs_services.is_empty() {
            println!("{}", "WFS-Dienste:".bold());
            for service in &view.wfs_services {
                let province = service.province.as_deref().unwrap_or("Österreich");
                println!("  {} ({province})", service.title);
                println!("    {}", service.url.dimmed());
            }
        }

        if let Some(prompt) = &view.prompt {
            println!();
            println!("{}", "Kombinations-Prompt (kopierbar):".bold());
            println!("{prompt}");
        }
    }
}

impl Renderer for TerminalRenderer {
    fn show_results(&mut self, cards: &[ResultCard<'_>]) {
        for card in cards {
            let record = card.record;
            let marker = if card.selected { "■" } else { "□" };
            let star = if card.favorite { "★".yellow() } else { " ".normal() };
            println!("{marker}{star} {}", record.title.bold());

            let facts: Vec<&str> = [
                Some(record.id.as_str()),
                record.kind.as_deref(),
                record.province.as_deref(),
                record.org.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect();
            let services: Vec<&str> = record.services.iter().map(|s| s.kind.as_str()).collect();
            if services.is_empty() {
                println!("   {}", facts.join(" · ").dimmed());
            } else {
                println!("   {} {}", facts.join(" · ").dimmed(), services.join(" ").cyan());
            }
        }
    }

    fn show_caption(&mut self, caption: &str) {
        println!("{}", caption.bold());
    }

    fn show_empty(&mut self, message: &str) {
        println!("{}", message.dimmed());
    }

    fn show_search_failed(&mut self, message: &str) {
        eprintln!("{} Suche fehlgeschlagen: {message}", "❌".red());
        eprintln!("{}", "Erneut versuchen, um die Suche zu wiederholen.".dimmed());
    }

    fn show_pagination(&mut self, buttons: &[PageButton]) {
        if !buttons.is_empty() {
            println!("{}", format_page_buttons(buttons));
        }
    }

    fn show_smart_results(&mut self, smart: Option<&SmartSearchResponse>) {
        let Some(smart) = smart.filter(|s| !s.is_empty()) else {
            return;
        };

        println!("{}", "Passende Konzepte".bold());
        for concept in &smart.matched_concepts {
            println!(
                "  {} {}",
                concept.name_de,
                format!("({} Datensätze, {} WFS)", concept.datasets, concept.wfs_count).dimmed()
            );
        }
        for group in &smart.combinable_groups {
            println!(
                "  {} {} {}",
                "⧉".cyan(),
                group.name,
                format!("{} Bundesländer · {} WFS", group.provinces.len(), group.wfs_count).dimmed()
            );
        }
    }

    fn show_overlay(&mut self, overlay: Overlay<'_>) {
        println!();
        match overlay {
            Overlay::Detail(detail) => Self::print_detail(detail),
            Overlay::Analysis(view) => Self::print_analysis(view),
        }
    }

    fn hide_overlay(&mut self, kind: OverlayKind) {
        debug!(%kind, "overlay closed");
    }

    fn show_notice(&mut self, notice: &Notice) {
        match notice.level {
            MessageLevel::Error => eprintln!("{} {}", "❌".red(), notice.text),
            MessageLevel::Warning => println!("{} {}", "⚠️".yellow(), notice.text),
            MessageLevel::Success if !self.quiet => println!("{} {}", "✓".green(), notice.text),
            MessageLevel::Info if !self.quiet => println!("{}", notice.text.dimmed()),
            MessageLevel::Success | MessageLevel::Info => {}
        }
    }

    fn show_selection(&mut self, ids: &[String]) {
        if !self.quiet && !ids.is_empty() {
            println!("{}", format!("{} ausgewählt", ids.len()).dimmed());
        }
    }

    fn show_favorite_marker(&mut self, id: &str, favorite: bool) {
        if favorite {
            println!("{} {id}", "★".yellow());
        } else {
            println!("☆ {id}");
        }
    }

    fn show_favorites_count(&mut self, count: usize) {
        if !self.quiet {
            println!("{}", format!("Favoriten: {count}").dimmed());
        }
    }

    fn show_topics(&mut self, topics: &[Topic]) {
        for topic in topics {
            println!("{} {}", topic.topic, format!("({})", topic.count).dimmed());
        }
    }

    fn show_highlights(&mut self, highlights: &[Highlight], active: usize) {
        for (index, highlight) in highlights.iter().enumerate() {
            let marker = if index == active { "▶".cyan() } else { " ".normal() };
            println!(
                "{marker} {} {}",
                highlight.title.bold(),
                highlight.subtitle.dimmed()
            );
        }
    }

    fn replace_location(&mut self, location: &str) {
        debug!(location, "location replaced");
    }

    fn fill_search_input(&mut self, text: &str) {
        debug!(text, "search input filled");
    }
}

impl HighlightSink for TerminalRenderer {
    fn deactivate(&self, index: usize, highlight: &Highlight) {
        debug!(index, id = %highlight.id, "highlight deactivated");
    }

    fn activate(&self, _index: usize, highlight: &Highlight) {
        println!(
            "{} {} {}",
            "▶".cyan(),
            highlight.title.bold(),
            highlight.subtitle.dimmed()
        );
    }
}

fn print_list(label: &str, items: &[String]) {
    if !items.is_empty() {
        println!("{} {}", format!("{label}:").bold(), items.join(", "));
    }
}

/// Proportional fill bar, `percent` clamped to 100
#[must_use]
pub fn coverage_bar(percent: u8, width: usize) -> String {
    let filled = usize::from(percent.min(100)) * width / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// `‹ 1 [2] 3 … 13 ›` with disabled arrows rendered as spaces
#[must_use]
pub fn format_page_buttons(buttons: &[PageButton]) -> String {
    buttons
        .iter()
        .map(|button| match button {
            PageButton::Previous { target } => arrow(target.is_some(), "‹"),
            PageButton::Next { target } => arrow(target.is_some(), "›"),
            PageButton::Page { number, active: true } => format!("[{number}]"),
            PageButton::Page { number, active: false } => number.to_string(),
            PageButton::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn arrow(enabled: bool, symbol: &str) -> String {
    if enabled { symbol } else { " " }.to_string()
}
