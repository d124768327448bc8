use crate::core::engine::ShippingEngine;
use crate::domain::model::BoxRecord;
use crate::utils::error::Result;
use std::io::Write;

const HEADERS: [&str; 5] = [
    "Receiver Name",
    "Weight",
    "Box Color",
    "Destination",
    "Shipping Cost",
];

/// Writes an aligned table followed by the count and total cost.
pub fn write_table<W: Write>(out: &mut W, engine: &ShippingEngine, records: &[BoxRecord]) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No boxes yet. Add your first shipping box to get started.")?;
        return Ok(());
    }

    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|record| {
            let row = engine.render_row(record);
            [
                row.receiver_name,
                row.weight,
                row.color,
                row.destination,
                row.shipping_cost,
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    write_row(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }

    let summary = engine.summarize(records);
    writeln!(out)?;
    writeln!(
        out,
        "Total: {}    Total Cost: {}",
        summary.count_label(),
        engine.format_currency(summary.total_cost)
    )?;
    Ok(())
}

// Cost column is right-aligned, the rest left-aligned.
fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize; 5]) -> Result<()> {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = " ".repeat(width.saturating_sub(cell.chars().count()));
        if i > 0 {
            line.push_str("  ");
        }
        if i == HEADERS.len() - 1 {
            line.push_str(&pad);
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&pad);
        }
    }
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

/// Writes raw record fields as CSV, newest first.
pub fn write_csv<W: Write>(out: W, records: &[BoxRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "id",
        "receiver_name",
        "weight",
        "box_color",
        "destination_country",
        "shipping_cost",
        "created_at",
    ])?;

    for record in records {
        writer.write_record([
            record.id.clone(),
            record.receiver_name.clone(),
            record.weight.to_string(),
            record.box_color.clone(),
            record.destination_country.code().to_string(),
            record.shipping_cost.to_string(),
            record.created_at.to_rfc3339(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
