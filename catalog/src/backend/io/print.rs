//! Printable HTML rendering of a quote.
//!
//! The document is self-contained: inline styles, no external assets except
//! the optional logo. It opens the print dialog when loaded and closes itself
//! a second later.

use shared::PrintDocument;

use crate::backend::domain::view_models::PRINT_SUBTITLE;

const PRINT_CSS: &str = r#"
      body { font-family: Arial, sans-serif; padding: 20px; }
      .print-header { display: flex; align-items: center; justify-content: space-between; margin-bottom: 20px; }
      .print-header-left { display: flex; align-items: center; }
      .logo { width: 56px; height: 56px; border-radius: 50%; object-fit: cover; margin-right: 12px; border: 2px solid #e5e7eb; }
      .subtitle { font-size: 0.85rem; color: #4b5563; }
      .date { text-align: right; font-size: 0.9rem; color: #4b5563; }
      h1 { margin: 0; color: #218C8D; }
      table { width: 100%; border-collapse: collapse; margin: 20px 0; }
      th, td { border: 1px solid #ddd; padding: 10px; text-align: left; }
      th { background-color: #218C8D; color: white; }
      .total { text-align: right; font-size: 1.2em; font-weight: bold; margin-top: 20px; }
"#;

const PRINT_SCRIPT: &str = r#"
      window.onload = function() {
        window.print();
        setTimeout(function() { window.close(); }, 1000);
      };
"#;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render `document` as a standalone HTML page
pub fn render_print_html(document: &PrintDocument) -> String {
    let logo = document
        .logo_url
        .as_ref()
        .map(|url| format!(r#"<img class="logo" src="{}" alt="Logo">"#, html_escape(url)))
        .unwrap_or_default();

    let phone = document
        .client_phone
        .as_ref()
        .map(|phone| format!("<p><strong>Teléfono/WhatsApp:</strong> {}</p>", html_escape(phone)))
        .unwrap_or_default();

    let rows: String = document
        .rows
        .iter()
        .map(|row| {
            format!(
                "\n          <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&row.treatment_name),
                html_escape(&row.option_name),
                html_escape(&row.formatted_price)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{css}</style>
  </head>
  <body>
    <div class="print-header">
      <div class="print-header-left">
        {logo}
        <div>
          <h1>{app_name}</h1>
          <div class="subtitle">{subtitle}</div>
        </div>
      </div>
      <div class="date"><strong>Fecha:</strong> {date}</div>
    </div>

    <p><strong>Cliente:</strong> {client}</p>
    {phone}

    <table>
      <thead>
        <tr><th>Tratamiento</th><th>Subcategoría</th><th>Precio</th></tr>
      </thead>
      <tbody>{rows}
      </tbody>
    </table>

    <div class="total">TOTAL: {total}</div>

    <script>{script}</script>
  </body>
</html>
"#,
        title = html_escape(&document.title),
        css = PRINT_CSS,
        logo = logo,
        app_name = html_escape(&document.app_name),
        subtitle = PRINT_SUBTITLE,
        date = html_escape(&document.formatted_date),
        client = html_escape(&document.client_name),
        phone = phone,
        rows = rows,
        total = html_escape(&document.formatted_total),
        script = PRINT_SCRIPT,
    )
}

/// File name for saving the printable page, e.g. `presupuesto_Ana_Torres.html`
pub fn print_file_name(document: &PrintDocument) -> String {
    let client: String = document
        .client_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("presupuesto_{}.html", client)
}
