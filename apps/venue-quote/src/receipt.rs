//! Plain-text rendering of quotes and payments for the terminal.

use std::fmt::Write;

use venue_core::{LineCode, PaymentMethod, PaymentRecord, Quote};

const WIDTH: usize = 40;

fn label(code: LineCode) -> &'static str {
    match code {
        LineCode::Base => "Set",
        LineCode::ExtSet => "Set extension",
        LineCode::RoomBase => "Room",
        LineCode::ExtRoom => "Room extension",
        LineCode::Nomination => "Nomination",
        LineCode::Inhouse => "In-house nomination",
        LineCode::HouseFee => "House fee",
        LineCode::SingleCharge => "Single charge",
        LineCode::Drink => "Drinks",
    }
}

fn row(out: &mut String, left: &str, right: &str) {
    let pad = WIDTH.saturating_sub(left.chars().count() + right.chars().count()).max(1);
    let _ = writeln!(out, "{}{}{}", left, " ".repeat(pad), right);
}

/// Renders a quote as an itemized bill.
pub fn render_quote(venue: &str, quote: &Quote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", venue);
    let _ = writeln!(out, "Plan {} / {} min", quote.plan, quote.elapsed_minutes);
    let _ = writeln!(out, "{}", "-".repeat(WIDTH));

    for line in &quote.lines {
        let left = if line.quantity > 1 {
            format!("{} x{}", label(line.code), line.quantity)
        } else {
            label(line.code).to_string()
        };
        row(&mut out, &left, &line.amount.to_string());
    }

    let _ = writeln!(out, "{}", "-".repeat(WIDTH));
    row(&mut out, "Subtotal", &quote.subtotal.to_string());
    row(&mut out, "Service tax", &quote.service_tax.to_string());
    row(&mut out, "Total", &quote.total.to_string());
    out
}

/// Renders a bill followed by the tender details.
pub fn render_payment(venue: &str, payment: &PaymentRecord) -> String {
    let mut out = render_quote(venue, &payment.quote);
    let method = match payment.method {
        PaymentMethod::Cash => "Cash",
        PaymentMethod::ExternalCard => "Card",
    };
    row(&mut out, "Paid by", method);
    if let Some(received) = payment.cash_received {
        row(&mut out, "Received", &received.to_string());
    }
    if let Some(change) = payment.change_amount {
        row(&mut out, "Change", &change.to_string());
    }
    if let Some(notes) = &payment.notes {
        let _ = writeln!(out, "Note: {}", notes);
    }
    out
}
