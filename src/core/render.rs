use crate::core::Catalog;
use crate::utils::error::{Result, ServicesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

pub fn render(catalog: &Catalog, format: OutputFormat, header: bool) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(catalog, header)),
        OutputFormat::Csv => render_delimited(catalog, b',', header),
        OutputFormat::Tsv => render_delimited(catalog, b'\t', header),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(catalog)? + "\n"),
    }
}

/// Aligned columns separated by two spaces, optionally preceded by a header
/// and a dashed rule.
pub fn render_table(catalog: &Catalog, header: bool) -> String {
    let mut rows: Vec<[String; 4]> = Vec::with_capacity(catalog.len() + 2);
    if header {
        rows.push(["Name", "Port/Proto", "Frequency", "Comment"].map(String::from));
        rows.push(["-----", "---------", "---------", "-------"].map(String::from));
    }
    for service in catalog {
        rows.push([
            service.name.clone(),
            service.port_proto(),
            service.frequency.to_string(),
            service.comment.clone().unwrap_or_default(),
        ]);
    }

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let mut line = String::new();
        for (cell, width) in row.iter().zip(widths.iter()) {
            line.push_str(&format!("{:<width$}  ", cell, width = width));
        }
        line.push_str(&row[3]);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_delimited(catalog: &Catalog, delimiter: u8, header: bool) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    if header {
        writer.write_record(["name", "port", "protocol", "frequency", "comment"])?;
    }
    for service in catalog {
        let port = service.port.to_string();
        let frequency = service.frequency.to_string();
        writer.write_record([
            service.name.as_str(),
            port.as_str(),
            service.protocol.as_str(),
            frequency.as_str(),
            service.comment.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ServicesError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
