use super::{display_amount, display_date, Report, ReportError, COLUMNS};
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Document, Element};
use std::path::Path;

/// Relative widths of the order table columns, in `COLUMNS` order.
const COLUMN_WEIGHTS: [usize; 7] = [1, 4, 3, 2, 2, 3, 4];
const MARGIN_MM: i32 = 10;
const FONT_SIZE_PT: u8 = 9;

/// Loads Arial from `fonts_dir`, falling back to LiberationSans.
fn load_font(
    fonts_dir: &Path,
) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, ReportError> {
    if let Ok(family) = genpdf::fonts::from_files(fonts_dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(fonts_dir, "LiberationSans", None).map_err(Into::into)
}

/// Landscape A4 document with font, margins and title set.
fn configure_document(report: &Report, fonts_dir: &Path) -> Result<Document, ReportError> {
    let font_family = load_font(fonts_dir)?;
    let mut doc = Document::new(font_family);
    doc.set_title(report.title.clone());
    doc.set_paper_size(genpdf::Size::new(297.0, 210.0));
    doc.set_font_size(FONT_SIZE_PT);
    doc.set_line_spacing(1.15);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

fn push_header(doc: &mut Document, report: &Report) {
    doc.push(
        Paragraph::new(StyledString::new(
            report.title.clone(),
            Style::new().bold().with_font_size(16),
        ))
        .aligned(Alignment::Center),
    );
    doc.push(
        Paragraph::new(format!("Généré le {}", display_date(&report.generated_at)))
            .aligned(Alignment::Center)
            .styled(Style::new().italic()),
    );
    doc.push(Break::new(1));
}

fn orders_table(report: &Report) -> Result<TableLayout, ReportError> {
    let mut table = TableLayout::new(COLUMN_WEIGHTS.to_vec());
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for title in COLUMNS {
        header.push_element(
            Paragraph::new(title)
                .styled(Style::new().bold())
                .padded(1),
        );
    }
    header.push()?;

    for row in &report.rows {
        table
            .row()
            .element(Paragraph::new(row.order_id.to_string()).padded(1))
            .element(Paragraph::new(row.client_name()).padded(1))
            .element(Paragraph::new(display_date(&row.placed_at)).padded(1))
            .element(Paragraph::new(row.status.label()).padded(1))
            .element(
                Paragraph::new(display_amount(row.total_amount))
                    .aligned(Alignment::Right)
                    .padded(1),
            )
            .element(Paragraph::new(row.payment_method.clone()).padded(1))
            .element(Paragraph::new(row.remark.clone()).padded(1))
            .push()?;
    }
    Ok(table)
}

fn push_summary(doc: &mut Document, report: &Report) {
    let summary = &report.summary;
    doc.push(Break::new(1));
    doc.push(Paragraph::new("Résumé").styled(Style::new().bold().with_font_size(12)));
    doc.push(Paragraph::new(format!(
        "Nombre de commandes : {}",
        summary.order_count
    )));
    doc.push(
        Paragraph::new(format!(
            "Chiffre d'affaires total : {}",
            display_amount(summary.total_amount)
        ))
        .styled(Style::new().bold()),
    );
    for total in &summary.by_status {
        doc.push(Paragraph::new(format!(
            "• {} : {} commande(s), {}",
            total.status.label(),
            total.order_count,
            display_amount(total.amount)
        )));
    }
}

/// Renders `report` as a paginated PDF at `path`.
pub(super) fn write(report: &Report, fonts_dir: &Path, path: &Path) -> Result<(), ReportError> {
    let mut doc = configure_document(report, fonts_dir)?;
    push_header(&mut doc, report);
    if report.rows.is_empty() {
        doc.push(Paragraph::new("Aucune commande.").styled(Style::new().italic()));
    } else {
        doc.push(orders_table(report)?);
    }
    push_summary(&mut doc, report);
    doc.render_to_file(path)?;
    Ok(())
}
