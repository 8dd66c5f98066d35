//! Aggregate views derived from an [`ExpansionResult`].
//!
//! Nothing here mutates the result. Empty selections produce `None` averages
//! and a `0.0` hub percentage instead of dividing by zero.

use serde::Serialize;

use crate::condition::Condition;
use crate::config;
use crate::models::{CardSelection, ExpansionResult};
use crate::selector::cents_to_major;
use crate::stats;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// One row of the top-N table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCardRow {
    pub rank: usize,
    pub name: String,
    pub price: f64,
    pub condition: Condition,
    pub price_std: f64,
    /// Price divided by the mean price of the whole selection.
    pub relative_to_average: Option<f64>,
    pub can_sell_via_hub: bool,
}

/// One bar of the top-price chart. `intensity` is the price rescaled to
/// `0.0..=1.0` across the plotted bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub name: String,
    pub price: f64,
    pub error: f64,
    pub intensity: f64,
}

/// Statistics for the subset of cards currently displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetStats {
    pub count: usize,
    pub total: f64,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub hub_count: usize,
    pub hub_percentage: f64,
}

/// Everything the presentation layer shows, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub card_count: usize,
    pub total_cost: f64,
    pub mean_price: Option<f64>,
    pub median_price: Option<f64>,
    pub hub_cards_count: usize,
    pub hub_percentage: f64,
    pub condition_breakdown: Vec<(Condition, usize)>,
    pub chart: Vec<ChartBar>,
    pub top: Vec<TopCardRow>,
    pub top_stats: SubsetStats,
}

// ---------------------------------------------------------------------------
// ExpansionReport
// ---------------------------------------------------------------------------

/// Read-only reporting view over one [`ExpansionResult`].
pub struct ExpansionReport<'a> {
    result: &'a ExpansionResult,
}

impl<'a> ExpansionReport<'a> {
    pub fn new(result: &'a ExpansionResult) -> Self {
        Self { result }
    }

    pub fn card_count(&self) -> usize {
        self.result.cards.len()
    }

    pub fn hub_cards_count(&self) -> usize {
        self.result.hub_cards_count
    }

    /// Exact sum of the selected prices in minor units.
    pub fn total_cost_cents(&self) -> i64 {
        self.result.cards.iter().map(|c| c.price_cents).sum()
    }

    /// Sum of the selected prices in major units. Summed in cents first so
    /// the total carries no float drift.
    pub fn total_cost(&self) -> f64 {
        cents_to_major(self.total_cost_cents())
    }

    pub fn mean_price(&self) -> Option<f64> {
        stats::mean(&self.prices())
    }

    pub fn median_price(&self) -> Option<f64> {
        stats::median(&self.prices())
    }

    /// `hub_cards_count / card_count * 100`, or `0.0` for an empty selection.
    pub fn hub_percentage(&self) -> f64 {
        percentage(self.result.hub_cards_count, self.card_count())
    }

    /// Condition tallies in condition order, omitting absent labels.
    pub fn condition_breakdown(&self) -> Vec<(Condition, usize)> {
        Condition::ALL
            .into_iter()
            .filter_map(|c| self.result.condition_counts.get(&c).map(|n| (c, *n)))
            .collect()
    }

    /// Clamp a requested N to `[1, min(50, card_count)]`; `0` when there are
    /// no cards at all.
    pub fn clamp_top_n(&self, n: usize) -> usize {
        let upper = config::MAX_TOP_N.min(self.card_count());
        if upper == 0 {
            0
        } else {
            n.clamp(1, upper)
        }
    }

    /// The `n` highest-priced cards, descending. Equal prices keep their
    /// original relative order.
    pub fn top_n(&self, n: usize) -> Vec<&'a CardSelection> {
        let mut cards: Vec<&CardSelection> = self.result.cards.iter().collect();
        cards.sort_by(|a, b| b.price_cents.cmp(&a.price_cents));
        cards.truncate(self.clamp_top_n(n));
        cards
    }

    /// Price relative to the mean of the whole selection.
    pub fn relative_to_average(&self, card: &CardSelection) -> Option<f64> {
        self.mean_price()
            .filter(|m| *m != 0.0)
            .map(|m| card.price / m)
    }

    pub fn top_rows(&self, n: usize) -> Vec<TopCardRow> {
        self.top_n(n)
            .into_iter()
            .enumerate()
            .map(|(i, card)| TopCardRow {
                rank: i + 1,
                name: card.name.clone(),
                price: card.price,
                condition: card.condition,
                price_std: card.price_std,
                relative_to_average: self.relative_to_average(card),
                can_sell_via_hub: card.can_sell_via_hub,
            })
            .collect()
    }

    /// Bars for the top-price chart, error bars sized from `price_std`.
    pub fn chart_bars(&self, n: usize) -> Vec<ChartBar> {
        let top = self.top_n(n);
        let lo = top.iter().map(|c| c.price).fold(f64::INFINITY, f64::min);
        let hi = top.iter().map(|c| c.price).fold(f64::NEG_INFINITY, f64::max);
        top.into_iter()
            .map(|card| ChartBar {
                name: card.name.clone(),
                price: card.price,
                error: card.price_std,
                intensity: if hi > lo {
                    (card.price - lo) / (hi - lo)
                } else {
                    1.0
                },
            })
            .collect()
    }

    pub fn summary(&self, top_n: usize) -> ReportSummary {
        let top = self.top_rows(top_n);
        let top_stats = subset_stats(&top);
        ReportSummary {
            card_count: self.card_count(),
            total_cost: self.total_cost(),
            mean_price: self.mean_price(),
            median_price: self.median_price(),
            hub_cards_count: self.result.hub_cards_count,
            hub_percentage: self.hub_percentage(),
            condition_breakdown: self.condition_breakdown(),
            chart: self.chart_bars(config::CHART_TOP_N),
            top,
            top_stats,
        }
    }

    fn prices(&self) -> Vec<f64> {
        self.result.cards.iter().map(|c| c.price).collect()
    }
}

/// Totals, average, range and hub share of the displayed rows.
pub fn subset_stats(rows: &[TopCardRow]) -> SubsetStats {
    let prices: Vec<f64> = rows.iter().map(|r| r.price).collect();
    let hub_count = rows.iter().filter(|r| r.can_sell_via_hub).count();
    SubsetStats {
        count: rows.len(),
        total: prices.iter().sum(),
        average: stats::mean(&prices),
        min: prices.iter().copied().reduce(f64::min),
        max: prices.iter().copied().reduce(f64::max),
        hub_count,
        hub_percentage: percentage(hub_count, rows.len()),
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
