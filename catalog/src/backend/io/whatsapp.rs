//! WhatsApp share links for saved quotes.
//!
//! Builds a `wa.me` click-to-chat URL with the quote summary prefilled as the
//! message text, using WhatsApp's `*bold*` markup.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::backend::domain::currency::Currency;
use crate::backend::domain::models::quote::Quote;

/// Characters left as-is by JavaScript's `encodeURIComponent`
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Message body summarizing `quote`, prices in `currency`
pub fn whatsapp_message(quote: &Quote, currency: Currency) -> String {
    let mut message = format!(
        "*Presupuesto Dental*\n\n*Cliente:* {}\n\n*Tratamientos:*\n",
        quote.client_name
    );
    for item in &quote.items {
        let option = item
            .option_name
            .as_ref()
            .map(|name| format!(" ({})", name))
            .unwrap_or_default();
        message.push_str(&format!(
            "• {}{}: {}\n",
            item.treatment_name,
            option,
            currency.format(item.price)
        ));
    }
    message.push_str(&format!("\n*TOTAL:* {}", currency.format(quote.total)));
    message
}

/// Click-to-chat link for `quote`.
///
/// Addressed to the client's phone with whitespace removed, or to no one
/// (the user picks a chat) when the quote has no phone.
pub fn whatsapp_link(quote: &Quote, currency: Currency) -> String {
    let number: String = quote
        .client_phone
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let message = whatsapp_message(quote, currency);
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE,
        number,
        utf8_percent_encode(&message, COMPONENT_ENCODE_SET)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::quote::QuoteLineItem;
    use chrono::Utc;

    fn quote(phone: Option<&str>) -> Quote {
        Quote {
            id: "quote::1".to_string(),
            client_name: "Ana".to_string(),
            client_phone: phone.map(str::to_string),
            items: vec![
                QuoteLineItem {
                    treatment_id: "treatment::1".to_string(),
                    treatment_name: "Ortodoncia".to_string(),
                    option_id: Some("option::1".to_string()),
                    option_name: Some("Brackets Autoligado".to_string()),
                    price: 3500.0,
                },
                QuoteLineItem {
                    treatment_id: "treatment::2".to_string(),
                    treatment_name: "Limpieza Dental".to_string(),
                    option_id: None,
                    option_name: None,
                    price: 120.0,
                },
            ],
            total: 3620.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_message_layout() {
        let message = whatsapp_message(&quote(None), Currency::Pen);
        assert_eq!(
            message,
            "*Presupuesto Dental*\n\n*Cliente:* Ana\n\n*Tratamientos:*\n\
             • Ortodoncia (Brackets Autoligado): S/ 3500.00\n\
             • Limpieza Dental: S/ 120.00\n\
             \n*TOTAL:* S/ 3620.00"
        );
    }

    #[test]
    fn test_link_strips_whitespace_from_phone() {
        let link = whatsapp_link(&quote(Some(" 51 987 654 321 ")), Currency::Usd);
        assert!(link.starts_with("https://wa.me/51987654321?text="));
        assert!(link.contains("US%24%201075.14"));
    }

    #[test]
    fn test_link_without_phone() {
        let link = whatsapp_link(&quote(None), Currency::Pen);
        assert!(link.starts_with("https://wa.me/?text=*Presupuesto%20Dental*%0A%0A"));
    }

    #[test]
    fn test_encoding_matches_uri_component_rules() {
        let encoded = utf8_percent_encode("a-b_c.d!e~f*g'h(i)j k/l?m&n•", COMPONENT_ENCODE_SET).to_string();
        assert_eq!(encoded, "a-b_c.d!e~f*g'h(i)j%20k%2Fl%3Fm%26n%E2%80%A2");
    }
}
