use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use survivor_view::{ItemTooltipView, LogEntryView};

/// Everything one inspection run renders.
#[derive(Debug, Default, Serialize)]
pub struct InspectionReport {
    pub log: Vec<LogEntryView>,
    pub items: Vec<ItemTooltipView>,
}

impl InspectionReport {
    pub fn is_empty(&self) -> bool {
        self.log.is_empty() && self.items.is_empty()
    }
}

pub fn generate_console_report(out: &mut impl Write, report: &InspectionReport) -> Result<()> {
    if !report.log.is_empty() {
        writeln!(out, "{}", "📜 Explore Log".bright_cyan().bold())?;
        writeln!(out, "{}", "==============".cyan())?;
        for row in &report.log {
            write!(out, "{:>4} {} {}", row.key, row.event.icon, row.event.title.bold())?;
            if !row.event.annotations.is_empty() {
                write!(out, "  {}", row.event.annotations.join(" · ").green())?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    if !report.items.is_empty() {
        writeln!(out, "{}", "🗡️ Items".bright_yellow().bold())?;
        writeln!(out, "{}", "========".yellow())?;
        for item in &report.items {
            writeln!(
                out,
                "{} [{} {} · {}]",
                item.name.bold(),
                item.tier,
                item.item_type,
                item.slot
            )?;
            writeln!(out, "   Level {}  Power {}", item.level, item.power)?;
            writeln!(
                out,
                "   XP {} ({}%)",
                item.xp_label(),
                item.progress_percent()
            )?;
            if let Some(bonus) = &item.bonus {
                writeln!(out, "   {} {}", bonus.label.magenta(), bonus.value)?;
            }
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut impl Write, report: &InspectionReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut impl Write, report: &InspectionReport) -> Result<()> {
    writeln!(out, "# Loot Survivor Inspection\n")?;

    if !report.log.is_empty() {
        writeln!(out, "## Explore Log\n")?;
        writeln!(out, "| # | | Event | Details |")?;
        writeln!(out, "|---|---|---|---|")?;
        for row in &report.log {
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                row.key,
                row.event.icon,
                row.event.title,
                row.event.annotations.join(", ")
            )?;
        }
        writeln!(out)?;
    }

    if !report.items.is_empty() {
        writeln!(out, "## Items\n")?;
        writeln!(out, "| Item | Tier | Type | Level | Power | XP | Bonus |")?;
        writeln!(out, "|---|---|---|---|---|---|---|")?;
        for item in &report.items {
            let bonus = item
                .bonus
                .as_ref()
                .map(|bonus| format!("{} ({})", bonus.label, bonus.value))
                .unwrap_or_default();
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {bonus} |",
                item.name,
                item.tier,
                item.item_type,
                item.level,
                item.power,
                item.xp_label()
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
