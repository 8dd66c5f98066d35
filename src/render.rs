//! Plain-text dashboard: metric tiles, condition breakdown, top-price chart,
//! top-N table and a statistics caption.

use std::io::{self, Write};

use crate::condition::Condition;
use crate::config;
use crate::report::{ChartBar, ExpansionReport, SubsetStats, TopCardRow};

const BAR_WIDTH: usize = 40;
const NAME_WIDTH: usize = 28;
/// Light to dark, following the bar's relative price.
const SHADES: [char; 4] = ['░', '▒', '▓', '█'];

/// What the dashboard is showing, for its heading.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub game: String,
    pub expansion: String,
    pub language: String,
    pub min_condition: Condition,
    pub hub_only: bool,
}

/// Write the whole dashboard for one expansion.
pub fn render_dashboard<W: Write>(
    out: &mut W,
    ctx: &DashboardContext,
    report: &ExpansionReport<'_>,
    top_n: usize,
) -> io::Result<()> {
    writeln!(out, "Card Trading Analysis Dashboard")?;
    writeln!(
        out,
        "{} / {} | language: {} | min condition: {}{}",
        ctx.game,
        ctx.expansion,
        ctx.language,
        ctx.min_condition,
        if ctx.hub_only { " | hub sellers only" } else { "" }
    )?;
    writeln!(out)?;

    render_metrics(out, report)?;
    writeln!(out)?;

    writeln!(out, "Cards by Condition")?;
    for (condition, count) in report.condition_breakdown() {
        writeln!(out, "  {}: {} cards", condition, count)?;
    }
    writeln!(out)?;

    writeln!(out, "Top {} Most Expensive Cards", config::CHART_TOP_N)?;
    render_chart(out, &report.chart_bars(config::CHART_TOP_N))?;
    writeln!(out)?;

    let rows = report.top_rows(top_n);
    writeln!(out, "Top N Most Expensive Cards (N = {})", rows.len())?;
    render_table(out, &rows)?;
    writeln!(out)?;

    render_caption(out, &crate::report::subset_stats(&rows))
}

/// The three summary tiles: total cost, average/median, hub share.
pub fn render_metrics<W: Write>(out: &mut W, report: &ExpansionReport<'_>) -> io::Result<()> {
    let tiles = [
        (
            "Total Set Cost".to_string(),
            format_eur(report.total_cost()),
            format!("{} cards", report.card_count()),
        ),
        (
            "Average Card Price".to_string(),
            format_opt_eur(report.mean_price()),
            format!("Median: {}", format_opt_eur(report.median_price())),
        ),
        (
            "Hub-only Cards".to_string(),
            report.hub_cards_count().to_string(),
            format!("{:.1}% of total", report.hub_percentage()),
        ),
    ];

    for line in 0..3 {
        let cells: Vec<String> = tiles
            .iter()
            .map(|(label, value, delta)| {
                let text = match line {
                    0 => label,
                    1 => value,
                    _ => delta,
                };
                pad(text, 26)
            })
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

/// Horizontal bars scaled to the most expensive card, with `± std` marks.
pub fn render_chart<W: Write>(out: &mut W, bars: &[ChartBar]) -> io::Result<()> {
    if bars.is_empty() {
        return writeln!(out, "  (no cards)");
    }
    let max = bars.iter().map(|b| b.price).fold(0.0, f64::max);
    for bar in bars {
        let len = if max > 0.0 {
            ((bar.price / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        }
        .clamp(1, BAR_WIDTH);
        let shade = SHADES[((bar.intensity * (SHADES.len() - 1) as f64).round() as usize)
            .min(SHADES.len() - 1)];
        writeln!(
            out,
            "  {} {}{} {} ± {}",
            pad(&bar.name, NAME_WIDTH),
            shade.to_string().repeat(len),
            " ".repeat(BAR_WIDTH - len),
            format_eur(bar.price),
            format_eur(bar.error)
        )?;
    }
    Ok(())
}

/// The top-N table with formatted price, std-dev and relative columns.
pub fn render_table<W: Write>(out: &mut W, rows: &[TopCardRow]) -> io::Result<()> {
    writeln!(
        out,
        "  {:>3}  {} {:>12}  {:<18} {:>10}  {:>8}  {}",
        "#",
        pad("Card Name", NAME_WIDTH),
        "Price",
        "Condition",
        "Std Dev",
        "Rel Avg",
        "Hub Only"
    )?;
    for row in rows {
        writeln!(
            out,
            "  {:>3}  {} {:>12}  {:<18} {:>10}  {:>8}  {}",
            row.rank,
            pad(&row.name, NAME_WIDTH),
            format_eur(row.price),
            row.condition.label(),
            format_eur(row.price_std),
            row.relative_to_average
                .map(|r| format!("{:.2}x", r))
                .unwrap_or_else(|| "n/a".to_string()),
            if row.can_sell_via_hub { "Yes" } else { "No" }
        )?;
    }
    Ok(())
}

pub fn render_caption<W: Write>(out: &mut W, stats: &SubsetStats) -> io::Result<()> {
    writeln!(out, "Statistics for top {} cards:", stats.count)?;
    writeln!(out, "  - Total Value: {}", format_eur(stats.total))?;
    writeln!(out, "  - Average Price: {}", format_opt_eur(stats.average))?;
    writeln!(
        out,
        "  - Price Range: {} - {}",
        format_opt_eur(stats.min),
        format_opt_eur(stats.max)
    )?;
    writeln!(
        out,
        "  - Hub-only Cards: {} ({:.1}%)",
        stats.hub_count, stats.hub_percentage
    )
}

/// Euro amount with thousands separators, e.g. `€12,345.60`.
pub fn format_eur(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}€{}.{:02}", sign, grouped, cents % 100)
}

fn format_opt_eur(amount: Option<f64>) -> String {
    amount.map(format_eur).unwrap_or_else(|| "n/a".to_string())
}

/// Pad or truncate to `width` characters (not bytes).
fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardSelection, ExpansionResult};

    fn render(result: &ExpansionResult) -> String {
        let ctx = DashboardContext {
            game: "Pokémon".into(),
            expansion: "Base Set".into(),
            language: "it".into(),
            min_condition: Condition::NearMint,
            hub_only: false,
        };
        let mut buf = Vec::new();
        render_dashboard(&mut buf, &ctx, &ExpansionReport::new(result), 10).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn format_eur_groups_thousands() {
        assert_eq!(format_eur(0.0), "€0.00");
        assert_eq!(format_eur(480.0), "€480.00");
        assert_eq!(format_eur(1234567.891), "€1,234,567.89");
        assert_eq!(format_eur(-1000.5), "-€1,000.50");
    }

    #[test]
    fn pad_counts_characters() {
        assert_eq!(pad("Pokémon", 8), "Pokémon ");
        assert_eq!(pad("abcdef", 4), "abc…");
    }

    #[test]
    fn empty_result_renders_without_panicking() {
        let text = render(&ExpansionResult::default());
        assert!(text.contains("€0.00"));
        assert!(text.contains("0.0% of total"));
        assert!(text.contains("(no cards)"));
        assert!(text.contains("Average Price: n/a"));
    }

    #[test]
    fn dashboard_lists_cards_and_conditions() {
        let mut result = ExpansionResult::default();
        result.cards.push(CardSelection {
            name: "Charizard".into(),
            price: 480.0,
            price_cents: 48000,
            source_id: "1".into(),
            can_sell_via_hub: true,
            condition: Condition::NearMint,
            price_std: 14.14,
        });
        result.hub_cards_count = 1;
        result.condition_counts.insert(Condition::NearMint, 1);

        let text = render(&result);
        assert!(text.contains("Near Mint: 1 cards"));
        assert!(text.contains("Charizard"));
        assert!(text.contains("€480.00 ± €14.14"));
        assert!(text.contains("1.00x"));
        assert!(text.contains("100.0% of total"));
    }
}
