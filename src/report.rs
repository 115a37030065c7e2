//! Step-by-step breakdown of a Black-Scholes evaluation.
//!
//! A [`StepReport`] is built from an already computed [`PricingResult`], so the
//! breakdown always shows exactly the numbers behind the headline price. It can
//! be rendered as plain text for a terminal or as a LaTeX `align*` block.

use std::fmt::Write as _;

use crate::pricing::config::ReportFormat;
use crate::pricing::types::{OptionKind, PricingResult};

/// One line of the breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Short label, e.g. `d1` or `c`
    pub label: &'static str,
    /// Human readable name of the quantity
    pub description: &'static str,
    /// Formula in plain text
    pub formula: &'static str,
    /// Formula in LaTeX, including the left-hand side
    pub latex: &'static str,
    pub value: f64,
}

/// Ordered breakdown of a pricing result.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub steps: Vec<Step>,
    pub kind: OptionKind,
    pub price: f64,
}

impl StepReport {
    pub fn from_result(result: &PricingResult) -> Self {
        let steps = vec![
            Step {
                label: "d1",
                description: "d1",
                formula: "(ln(S0/K) + (r + sigma^2/2) * T) / (sigma * sqrt(T))",
                latex: r"d_1 = \frac{1}{\sigma\sqrt{T}} \left(\ln\left(\frac{S_0}{K}\right) + \left(r + \frac{\sigma^2}{2}\right)T\right)",
                value: result.d1,
            },
            Step {
                label: "d2",
                description: "d2",
                formula: "d1 - sigma * sqrt(T)",
                latex: r"d_2 = d_1 - \sigma\sqrt{T}",
                value: result.d2,
            },
            Step {
                label: "N(d1)",
                description: "N(d1)",
                formula: "Phi(d1)",
                latex: r"N(d_1) = \Phi(d_1)",
                value: result.cdf_d1,
            },
            Step {
                label: "N(d2)",
                description: "N(d2)",
                formula: "Phi(d2)",
                latex: r"N(d_2) = \Phi(d_2)",
                value: result.cdf_d2,
            },
            Step {
                label: "N(-d1)",
                description: "N(-d1)",
                formula: "Phi(-d1)",
                latex: r"N(-d_1) = \Phi(-d_1)",
                value: result.cdf_neg_d1,
            },
            Step {
                label: "N(-d2)",
                description: "N(-d2)",
                formula: "Phi(-d2)",
                latex: r"N(-d_2) = \Phi(-d_2)",
                value: result.cdf_neg_d2,
            },
            Step {
                label: "c",
                description: "Call option value",
                formula: "N(d1) * S0 - N(d2) * K * exp(-r * T)",
                latex: r"c = N(d_1)S_0 - N(d_2)Ke^{-rT}",
                value: result.call,
            },
            Step {
                label: "p",
                description: "Put option value",
                formula: "K * exp(-r * T) * N(-d2) - S0 * N(-d1)",
                latex: r"p = Ke^{-rT}N(-d_2) - S_0N(-d_1)",
                value: result.put,
            },
        ];

        Self {
            steps,
            kind: result.kind,
            price: result.price,
        }
    }

    pub fn render(&self, format: ReportFormat, precision: usize) -> String {
        match format {
            ReportFormat::Text => self.render_text(precision),
            ReportFormat::Latex => self.render_latex(precision),
        }
    }

    pub fn render_text(&self, precision: usize) -> String {
        let width = self
            .steps
            .iter()
            .map(|s| s.description.len())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for step in &self.steps {
            let _ = writeln!(
                out,
                "{:<width$} = {:.prec$}    [{}]",
                step.description,
                step.value,
                step.formula,
                width = width,
                prec = precision
            );
        }
        let _ = write!(out, "{}", price_line(self.kind, self.price, precision));
        out
    }

    pub fn render_latex(&self, precision: usize) -> String {
        let mut out = String::from("\\begin{align*}\n");
        for step in &self.steps {
            // "d_1 = ..." becomes "d_1 &= ... = value"
            let aligned = step.latex.replacen(" = ", " &= ", 1);
            let _ = writeln!(out, "{} = {:.prec$} \\\\", aligned, step.value, prec = precision);
        }
        let _ = writeln!(
            out,
            "\\text{{{} price}} &= {:.prec$}",
            self.kind,
            self.price,
            prec = precision
        );
        out.push_str("\\end{align*}");
        out
    }
}

/// The headline line shown after a calculation.
pub fn price_line(kind: OptionKind, price: f64, precision: usize) -> String {
    format!("{} price = {:.prec$}", kind, price, prec = precision)
}
