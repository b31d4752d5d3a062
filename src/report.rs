//! Report
//!
//! Renders search results for people: either one line per combination or a
//! table with the margin each combination clears the threshold by.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::combination::Combination;

/// Text written when a search finds nothing.
pub const NO_COMBINATIONS: &str = "no qualifying combination found";

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Search results ready to be written out.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    combinations: &'a [Combination],
    threshold: Decimal,
    currency: &'static Currency,
}

impl<'a> Report<'a> {
    /// Create a report for combinations found against `threshold`.
    pub fn new(
        combinations: &'a [Combination],
        threshold: Decimal,
        currency: &'static Currency,
    ) -> Self {
        Self {
            combinations,
            threshold,
            currency,
        }
    }

    /// Write one line per combination: `total: <sum>, combination: [<prices>]`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing fails.
    pub fn write_lines(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.combinations.is_empty() {
            writeln!(out, "{NO_COMBINATIONS}")?;

            return Ok(());
        }

        for combination in self.combinations {
            let prices: Vec<String> = combination
                .prices()
                .iter()
                .map(|&price| self.money(price))
                .collect();

            writeln!(
                out,
                "total: {}, combination: [{}]",
                self.money(combination.total()),
                prices.join(", ")
            )?;
        }

        Ok(())
    }

    /// Write the combinations as a table.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing fails.
    pub fn write_table(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.combinations.is_empty() {
            writeln!(out, "{NO_COMBINATIONS}")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["#", "Total", "Over Threshold", "Items", "Combination"]);

        for (rank, combination) in self.combinations.iter().enumerate() {
            builder.push_record([
                (rank + 1).to_string(),
                self.money(combination.total()),
                self.money(combination.surplus(self.threshold)),
                combination.len().to_string(),
                self.describe(combination),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(0..4), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "\n{table}")?;
        writeln!(out, " Threshold: {}", self.money(self.threshold))?;

        Ok(())
    }

    /// Summarise a combination as runs of equal prices, cheapest first, e.g. `3 × £40.00 + £60.00`.
    fn describe(&self, combination: &Combination) -> String {
        let mut runs: Vec<(Decimal, usize)> = Vec::new();

        for price in combination.canonical() {
            match runs.last_mut() {
                Some((last, count)) if *last == price => *count += 1,
                _ => runs.push((price, 1)),
            }
        }

        runs.into_iter()
            .map(|(price, count)| {
                if count == 1 {
                    self.money(price)
                } else {
                    format!("{count} × {}", self.money(price))
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }

    fn money(&self, mut amount: Decimal) -> String {
        amount.rescale(self.currency.exponent);

        Money::from_decimal(amount, self.currency).to_string()
    }
}
