//! Training summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{FeatureScore, TrainReport};

/// How many top-ranked features to show in the summary
const TOP_FEATURES_SHOWN: usize = 5;

/// Summary of one training run, for console display.
#[derive(Debug)]
pub struct TrainingSummary {
    report: TrainReport,
    top_features: Vec<FeatureScore>,
}

impl TrainingSummary {
    pub fn new(report: TrainReport, ranking: &[FeatureScore]) -> Self {
        Self {
            report,
            top_features: ranking.iter().take(TOP_FEATURES_SHOWN).cloned().collect(),
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {}",
            style("TRAINING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("Rows"), Cell::new(self.report.rows)]);
        table.add_row(vec![
            Cell::new("Train / test split"),
            Cell::new(format!(
                "{} / {}",
                self.report.train_rows, self.report.test_rows
            )),
        ]);
        table.add_row(vec![
            Cell::new("Combined features"),
            Cell::new(self.report.combined_features),
        ]);
        table.add_row(vec![
            Cell::new("Selected features"),
            Cell::new(self.report.selected_features)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Unknown categories"),
            Cell::new(self.report.unknown_categories).fg(
                if self.report.unknown_categories == 0 {
                    Color::White
                } else {
                    Color::Yellow
                },
            ),
        ]);

        let accuracy_color = if self.report.test_accuracy >= 0.8 {
            Color::Green
        } else if self.report.test_accuracy >= 0.6 {
            Color::Yellow
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new("Held-out accuracy"),
            Cell::new(format!("{:.1}%", self.report.test_accuracy * 100.0))
                .fg(accuracy_color)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.top_features.is_empty() {
            println!();
            println!(
                "    {}",
                style("TOP FEATURES BY MUTUAL INFORMATION").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            println!();
            for entry in &self.top_features {
                println!(
                    "      {} {:<24} {}",
                    style("•").dim(),
                    entry.column,
                    style(format!("{:.4}", entry.score)).yellow()
                );
            }
        }
    }
}
