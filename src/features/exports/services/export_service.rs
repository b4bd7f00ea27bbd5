use std::sync::{Arc, OnceLock};

use minijinja::{context, Environment};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::documents::dtos::DocumentLineDto;
use crate::features::documents::models::Document;
use crate::features::documents::services::DocumentService;

/// Template name of the printable document
const DOCUMENT_TEMPLATE: &str = "document.html";

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn template_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.add_template(
            DOCUMENT_TEMPLATE,
            include_str!("../../../../templates/document.html"),
        )
        .expect("document template must parse");
        env
    })
}

/// Converts documents into CSV rows and printable HTML
pub struct ExportService {
    documents: Arc<DocumentService>,
}

impl ExportService {
    pub fn new(documents: Arc<DocumentService>) -> Self {
        Self { documents }
    }

    /// CSV of the document's lines, one row per position plus a header
    pub async fn document_csv(&self, id: Uuid) -> Result<(Document, String)> {
        let document = self.documents.get_model(id).await?;
        let csv = render_csv(&document)?;
        Ok((document, csv))
    }

    /// HTML document for the external PDF renderer
    pub async fn document_html(&self, id: Uuid) -> Result<String> {
        let document = self.documents.get_model(id).await?;
        let lines = parse_lines(&document)?;

        let template = template_env().get_template(DOCUMENT_TEMPLATE)?;
        let html = template.render(context! {
            title => document.doc_type.title(),
            number => document.number,
            created_at => document.created_at.format("%d.%m.%Y").to_string(),
            customer_name => document.customer_name,
            customer_email => document.customer_email,
            currency => document.currency,
            total => document.total.to_string(),
            lines => lines
                .iter()
                .map(|l| context! {
                    name => l.name,
                    model => l.model.clone().unwrap_or_default(),
                    quantity => l.quantity,
                    price => l.price.to_string(),
                    amount => l.amount().to_string(),
                })
                .collect::<Vec<_>>(),
        })?;

        Ok(html)
    }
}

fn parse_lines(document: &Document) -> Result<Vec<DocumentLineDto>> {
    serde_json::from_value(document.lines.clone()).map_err(|e| {
        AppError::Internal(format!(
            "Document '{}' has malformed lines payload: {}",
            document.number, e
        ))
    })
}

fn render_csv(document: &Document) -> Result<String> {
    let lines = parse_lines(document)?;

    let mut out = String::from("number,position,name,model,quantity,price,amount\n");
    for (idx, line) in lines.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            csv_escape(&document.number),
            idx + 1,
            csv_escape(&line.name),
            csv_escape(line.model.as_deref().unwrap_or("")),
            line.quantity,
            line.price,
            line.amount(),
        ));
    }

    Ok(out)
}

/// Quote a CSV field per RFC 4180 when it contains a comma, quote or newline
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::documents::models::{DocumentStatus, DocumentType};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn order_with_lines(lines: serde_json::Value) -> Document {
        Document {
            id: Uuid::new_v4(),
            doc_type: DocumentType::Order,
            number: "ORD-20260101-AB12CD34".to_string(),
            status: DocumentStatus::Draft,
            customer_name: Some("Иванов".to_string()),
            customer_email: None,
            total: Decimal::new(26_990_00, 2),
            currency: "RUB".to_string(),
            lines,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_render_csv_rows() {
        let document = order_with_lines(json!([
            { "name": "Дверь, гладкая", "model": "DomeoDoors_Base_1", "quantity": 2, "price": "12500.00" },
            { "name": "Ручка H204", "quantity": 1, "price": "1990.00" }
        ]));

        let csv = render_csv(&document).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "number,position,name,model,quantity,price,amount");
        assert!(rows[1].starts_with("ORD-20260101-AB12CD34,1,\"Дверь, гладкая\",DomeoDoors_Base_1,2,"));
        assert!(rows[1].ends_with("12500.00,25000.00"));
        assert!(rows[2].contains(",2,Ручка H204,,1,1990.00,1990.00"));
    }

    #[test]
    fn test_render_csv_malformed_lines() {
        let document = order_with_lines(json!({ "not": "an array" }));
        assert!(render_csv(&document).is_err());
    }

    #[test]
    fn test_template_renders() {
        let template = template_env().get_template(DOCUMENT_TEMPLATE).unwrap();
        let html = template
            .render(context! {
                title => "Заказ",
                number => "ORD-1",
                created_at => "01.01.2026",
                customer_name => "Иванов",
                customer_email => (),
                currency => "RUB",
                total => "25000.00",
                lines => vec![context! {
                    name => "Дверь",
                    model => "DomeoDoors_Base_1",
                    quantity => 2,
                    price => "12500.00",
                    amount => "25000.00",
                }],
            })
            .unwrap();

        assert!(html.contains("ORD-1"));
        assert!(html.contains("DomeoDoors_Base_1"));
        assert!(html.contains("25000.00"));
    }
}
