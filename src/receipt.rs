//! Receipt
//!
//! A snapshot of a cart's lines and totals, and the two ways of printing it: the fixed-width
//! till layout and a boxed table for terminals.

use std::io;

use rusty_money::iso::Currency;
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{AddedLine, AppliedOffer, Cart},
    prices::{Price, format_price},
    quantities::Quantity,
};

const DESCRIPTION_WIDTH: usize = 20;
const PRICE_WIDTH: usize = 6;

/// Errors that can occur when printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Final receipt for a cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Lines in the order they were added
    lines: Vec<AddedLine>,

    /// Offers that produced a saving, in configured order
    applied_offers: SmallVec<[AppliedOffer; 4]>,

    /// Total cost before any offers
    sub_total: Price,

    /// Total saved by offers
    savings: Price,

    /// Amount to pay
    total: Price,

    /// Currency used for all monetary values
    currency: &'static Currency,
}

impl Receipt {
    /// Create a new receipt with the given details.
    pub fn new(
        lines: Vec<AddedLine>,
        applied_offers: SmallVec<[AppliedOffer; 4]>,
        sub_total: Price,
        savings: Price,
        total: Price,
        currency: &'static Currency,
    ) -> Self {
        Self {
            lines,
            applied_offers,
            sub_total,
            savings,
            total,
            currency,
        }
    }

    /// Build a receipt from the current contents of a cart.
    pub fn from_cart(cart: &Cart<'_>) -> Self {
        let applied_offers = cart.applied_offers();
        let savings = applied_offers.iter().map(|offer| offer.amount).sum();
        let sub_total = cart.sub_total();

        Self {
            lines: cart.lines().to_vec(),
            applied_offers,
            sub_total,
            savings,
            total: sub_total - savings,
            currency: cart.currency(),
        }
    }

    /// Lines in the order they were added
    pub fn lines(&self) -> &[AddedLine] {
        &self.lines
    }

    /// Offers that produced a saving
    pub fn applied_offers(&self) -> &[AppliedOffer] {
        &self.applied_offers
    }

    /// Total cost before any offers
    pub fn sub_total(&self) -> Price {
        self.sub_total
    }

    /// Total saved by offers
    pub fn savings(&self) -> Price {
        self.savings
    }

    /// Amount to pay
    pub fn total(&self) -> Price {
        self.total
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn price(&self, price: Price) -> String {
        format_price(price, self.currency)
    }

    /// Writes the fixed-width till layout.
    ///
    /// The savings breakdown and sub-total are only printed when at least one offer applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        for line in &self.lines {
            for (description, price) in self.line_rows(line) {
                write_row(out, &description, &price)?;
            }
        }

        if !self.applied_offers.is_empty() {
            write_row(out, "**Sub-total**", &self.price(self.sub_total))?;
            write_row(out, "**Savings**", "")?;

            for offer in &self.applied_offers {
                write_row(
                    out,
                    &capitalize(&offer.description),
                    &format!("-{}", self.price(offer.amount)),
                )?;
            }

            write_row(out, "**Total savings**", &self.price(self.savings))?;
        }

        write_row(out, "**Total to Pay**", &self.price(self.total))?;

        Ok(())
    }

    /// Writes a boxed table, for terminals.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_table_to(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Quantity", "Price"]);

        for line in &self.lines {
            builder.push_record([
                capitalize(&line.product_name),
                self.quantity_cell(line),
                self.price(line.price),
            ]);
        }

        let summary_row = self.lines.len() + 1;

        builder.push_record([
            "Sub-total".to_string(),
            String::new(),
            self.price(self.sub_total),
        ]);

        for offer in &self.applied_offers {
            builder.push_record([
                capitalize(&offer.description),
                String::new(),
                format!("-{}", self.price(offer.amount)),
            ]);
        }

        builder.push_record([
            "Total savings".to_string(),
            String::new(),
            self.price(self.savings),
        ]);

        let total_row = summary_row + self.applied_offers.len() + 2;

        builder.push_record(["Total to Pay".to_string(), String::new(), self.price(self.total)]);

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);
        theme.insert_horizontal_line(summary_row, separator);
        theme.insert_horizontal_line(total_row, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Rows::last(), Color::BOLD);
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}")?;

        Ok(())
    }

    /// One or two `(description, price)` rows for a line in the till layout.
    fn line_rows(&self, line: &AddedLine) -> SmallVec<[(String, String); 2]> {
        let name = capitalize(&line.product_name);
        let price = self.price(line.price);

        match (line.quantity, line.price_per_weight) {
            (Quantity::Weight(weight), Some(per_weight)) => smallvec![
                (name, String::new()),
                (
                    format!("{weight} kg @ {}/kg", self.price(per_weight)),
                    price
                ),
            ],
            (Quantity::Weight(weight), None) => {
                smallvec![(format!("{name} {weight} kg"), price)]
            }
            (Quantity::Units(1), _) => smallvec![(name, price)],
            (Quantity::Units(units), _) => smallvec![(format!("{name} x {units}"), price)],
        }
    }

    fn quantity_cell(&self, line: &AddedLine) -> String {
        match (line.quantity, line.price_per_weight) {
            (Quantity::Weight(weight), Some(per_weight)) => {
                format!("{weight} kg @ {}/kg", self.price(per_weight))
            }
            (quantity, _) => quantity.to_string(),
        }
    }
}

fn write_row(out: &mut impl io::Write, description: &str, price: &str) -> Result<(), ReceiptError> {
    writeln!(
        out,
        "| {description:<DESCRIPTION_WIDTH$} | {price:>PRICE_WIDTH$} |"
    )?;

    Ok(())
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
