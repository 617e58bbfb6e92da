//! Sales reports and invoices rendered to PDF
//!
//! Layout is deliberately plain: a title, a block of key figures and one
//! line per entry, flowing onto new A4 pages as needed.

use chrono::{DateTime, Utc};
use models::{order::Order, report::SalesSummary};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF rendering failed: {0}")]
    Render(#[from] printpdf::Error),
}

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 6.0;

/// Writes lines top to bottom, starting a new page when the current one is full
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Page 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut writer = Self {
            doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT.0 - MARGIN,
            pages: 1,
        };
        writer.write(title, 18.0, true);
        writer.skip(1);
        Ok(writer)
    }

    fn write(&mut self, text: &str, size: f32, bold: bool) {
        if self.cursor < MARGIN {
            self.pages += 1;
            let (page, layer) =
                self.doc
                    .add_page(PAGE_WIDTH, PAGE_HEIGHT, format!("Page {}", self.pages));
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = PAGE_HEIGHT.0 - MARGIN;
        }

        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.cursor), font);
        self.cursor -= LINE_HEIGHT * (size / 11.0).max(1.0);
    }

    fn heading(&mut self, text: &str) {
        self.skip(1);
        self.write(text, 13.0, true);
    }

    fn line(&mut self, text: &str) {
        self.write(text, 11.0, false);
    }

    fn skip(&mut self, lines: usize) {
        self.cursor -= LINE_HEIGHT * lines as f32;
    }

    fn finish(self) -> Result<Vec<u8>, ReportError> {
        Ok(self.doc.save_to_bytes()?)
    }
}

fn order_line(order: &Order) -> String {
    format!(
        "{}  #{}  {}  {} EUR",
        order.created_at.format("%Y-%m-%d %H:%M"),
        &order.id.simple().to_string()[..8],
        order.status,
        order.total
    )
}

/// Sales report over `orders`, summarized by `summary`
pub fn sales_report(
    title: &str,
    summary: &SalesSummary,
    orders: &[Order],
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ReportError> {
    let mut pdf = PageWriter::new(title)?;
    pdf.line(&format!(
        "Generated {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    pdf.heading("Summary");
    pdf.line(&format!("Orders: {}", summary.total_orders));
    pdf.line(&format!("Revenue: {} EUR", summary.total_revenue.round_dp(2)));
    pdf.line(&format!(
        "Average order value: {} EUR",
        summary.average_order_value
    ));
    for (status, count) in &summary.orders_by_status {
        pdf.line(&format!("  {status}: {count}"));
    }

    pdf.heading("Top selling items");
    if summary.top_selling_items.is_empty() {
        pdf.line("No sales in this period");
    }
    for (rank, item) in summary.top_selling_items.iter().enumerate() {
        pdf.line(&format!(
            "{}. {}  x{}  {} EUR",
            rank + 1,
            item.name,
            item.quantity,
            item.revenue.round_dp(2)
        ));
    }

    pdf.heading("Orders");
    for order in orders {
        pdf.line(&order_line(order));
    }

    pdf.finish()
}

/// Invoice for one order
pub fn invoice(order: &Order, customer: &str) -> Result<Vec<u8>, ReportError> {
    let mut pdf = PageWriter::new(&format!("Invoice {}", order.id.simple()))?;
    pdf.line(&format!("Customer: {customer}"));
    pdf.line(&format!(
        "Date: {}",
        order.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    pdf.line(&format!("Status: {}", order.status));

    pdf.heading("Items");
    for item in &order.items {
        pdf.line(&format!(
            "{}  x{}  @ {}  = {} EUR",
            item.name,
            item.quantity,
            item.price,
            item.line_total().round_dp(2)
        ));
    }

    pdf.heading(&format!("Total: {} EUR", order.total.round_dp(2)));
    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::order::OrderItem;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn order(lines: usize) -> Order {
        let items = (0..lines)
            .map(|i| OrderItem {
                menu_item_id: Uuid::new_v4(),
                name: format!("Dish {i}"),
                quantity: 1,
                price: Decimal::new(950, 2),
            })
            .collect();
        Order::new(Uuid::new_v4(), items)
    }

    #[test]
    fn test_invoice_is_pdf() {
        let bytes = invoice(&order(3), "alice@example.com").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_report_spans_pages() {
        let orders: Vec<Order> = (0..120).map(|_| order(1)).collect();
        let summary = SalesSummary::from_orders(&orders);

        let bytes = sales_report("Monthly report", &summary, &orders, Utc::now()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_empty_report() {
        let summary = SalesSummary::from_orders(&[]);
        let bytes = sales_report("Daily report", &summary, &[], Utc::now()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
