//! Branded HTML templates
//!
//! Every message shares [`layout`]: a 600px table layout with the brand
//! header, a white content area and the footer. Templates return a
//! [`Rendered`] subject/preheader/body triple. All visitor-supplied text goes
//! through [`escape_html`] before it reaches markup; subjects are flattened
//! to a single line.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Europe::Berlin;
use std::fmt::Write;

use domain_leads::{LabeledValue, PartnerRegistration};

use crate::brand::{Brand, Palette};
use crate::labels::{calculator_title, calculator_type_name, trades_formatted};

/// A rendered email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub subject: String,
    /// Hidden inbox preview text
    pub preheader: String,
    pub html: String,
}

/// Escapes text for HTML element and attribute content
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Collapses line breaks so the value is safe as a header
pub fn single_line(value: &str) -> String {
    value.split(['\r', '\n']).filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ")
}

const WEEKDAYS: [&str; 7] = [
    "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
];

const MONTHS: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];

/// Long German date in Berlin time, e.g. `Freitag, 1. März 2024 um 11:00`
pub fn format_submitted_at(at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&Berlin);
    format!(
        "{}, {}. {} {} um {:02}:{:02}",
        WEEKDAYS[local.weekday().num_days_from_monday() as usize],
        local.day(),
        MONTHS[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}

/// Wraps content in the shared brand layout
pub fn layout(brand: &Brand, content: &str, preheader: &str) -> String {
    let p = &brand.palette;
    let mut html = String::with_capacity(content.len() + 4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="de">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta http-equiv="X-UA-Compatible" content="IE=edge">
  <title>{name}</title>
  <style type="text/css">
    body, table, td, p, a, li {{ -webkit-text-size-adjust: 100%; -ms-text-size-adjust: 100%; }}
    table, td {{ mso-table-lspace: 0pt; mso-table-rspace: 0pt; }}
    @media only screen and (max-width: 620px) {{
      .email-container {{ width: 100% !important; max-width: 100% !important; margin: 0 !important; }}
      .content-padding {{ padding: 24px 16px !important; }}
      .header-padding, .footer-padding {{ padding: 24px 16px !important; border-radius: 0 !important; }}
      h1 {{ font-size: 24px !important; }}
      h2, h3 {{ font-size: 16px !important; }}
    }}
  </style>
</head>
<body style="margin: 0; padding: 0; background-color: {background}; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;">
"#,
        name = brand.name,
        background = p.background,
    );

    if !preheader.is_empty() {
        let _ = write!(
            html,
            r#"  <div style="display: none; max-height: 0; overflow: hidden; mso-hide: all;">{}</div>
"#,
            escape_html(preheader)
        );
    }

    let _ = write!(
        html,
        r#"  <table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="background-color: {background};">
    <tr>
      <td align="center" style="padding: 24px 16px;">
        <table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" class="email-container" style="max-width: 600px; margin: 0 auto;">
          <tr>
            <td class="header-padding" align="center" style="background: linear-gradient(135deg, {deep} 0%, {dark} 50%, {primary} 100%); padding: 40px 32px; border-radius: 12px 12px 0 0;">
              <span style="font-size: 28px; font-weight: 700; color: {white}; letter-spacing: 3px;">{name}</span><br>
              <span style="font-size: 13px; color: rgba(255,255,255,0.85); letter-spacing: 1px;">{services}</span>
            </td>
          </tr>
          <tr>
            <td class="content-padding" style="background-color: {white}; padding: 32px;">
{content}
            </td>
          </tr>
          <tr>
            <td class="footer-padding" align="center" style="background: linear-gradient(135deg, {dark} 0%, {deep} 100%); padding: 28px 32px; border-radius: 0 0 12px 12px; color: rgba(255,255,255,0.75); font-size: 13px; line-height: 1.7;">
              <p style="margin: 0 0 8px 0;"><strong style="color: {white}; font-size: 15px; letter-spacing: 1px;">{name}</strong></p>
              <p style="margin: 0 0 16px 0;">{tagline}</p>
              <p style="margin: 0 0 8px 0;"><a href="mailto:{support}" style="color: rgba(255,255,255,0.9); text-decoration: none;">{support}</a></p>
              <p style="margin: 20px 0 0 0; padding-top: 16px; border-top: 1px solid rgba(255,255,255,0.15); font-size: 11px; color: rgba(255,255,255,0.5);">Diese E-Mail wurde automatisch generiert.</p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#,
        background = p.background,
        deep = p.primary_deep,
        dark = p.primary_dark,
        primary = p.primary,
        white = p.white,
        name = brand.name,
        services = brand.services,
        tagline = brand.tagline,
        support = brand.support_email,
        content = content,
    );

    html
}

// ============================================================================
// Building blocks
// ============================================================================

fn heading(p: &Palette, size: u8, text: &str) -> String {
    format!(
        r#"<h1 style="margin: 0 0 24px 0; font-size: {}px; font-weight: 700; color: {};">{}</h1>"#,
        size, p.primary_dark, text
    )
}

fn paragraph(p: &Palette, inner: &str) -> String {
    format!(
        r#"<p style="margin: 0 0 24px 0; font-size: 16px; line-height: 1.7; color: {};">{}</p>"#,
        p.text, inner
    )
}

/// A rounded summary box with a title and arbitrary inner markup
fn summary_box(p: &Palette, title: &str, inner: &str) -> String {
    format!(
        r#"<table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="background-color: {}; border-radius: 12px; margin: 0 0 24px 0;">
  <tr><td style="padding: 24px;">
    <h2 style="margin: 0 0 16px 0; font-size: 16px; font-weight: 600; color: {};">{}</h2>
    {}
  </td></tr>
</table>"#,
        p.summary_box, p.primary, title, inner
    )
}

/// Two-column label/value rows; both columns are markup
fn detail_table<L: AsRef<str>>(p: &Palette, rows: &[(L, String)]) -> String {
    let mut out = String::from(
        r#"<table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%">"#,
    );
    for (label, value) in rows {
        let _ = write!(
            out,
            r#"<tr><td style="padding: 8px 0; border-bottom: 1px solid {border}; width: 140px; color: {muted}; font-size: 14px;">{label}</td><td style="padding: 8px 0; border-bottom: 1px solid {border}; color: {text}; font-size: 14px;">{value}</td></tr>"#,
            border = p.border,
            muted = p.text_muted,
            text = p.text,
            label = label.as_ref(),
            value = value,
        );
    }
    out.push_str("</table>");
    out
}

fn mailto(p: &Palette, address: &str) -> String {
    let escaped = escape_html(address);
    format!(
        r#"<a href="mailto:{0}" style="color: {1}; text-decoration: none;">{0}</a>"#,
        escaped, p.primary
    )
}

fn tel(p: &Palette, number: &str) -> String {
    let escaped = escape_html(number);
    format!(
        r#"<a href="tel:{0}" style="color: {1}; text-decoration: none;">{0}</a>"#,
        escaped, p.primary
    )
}

fn pre_wrap(p: &Palette, text: &str) -> String {
    format!(
        r#"<p style="margin: 0; font-size: 14px; line-height: 1.6; color: {}; white-space: pre-wrap;">{}</p>"#,
        p.text,
        escape_html(text)
    )
}

fn action_note(background: &str, color: &str, text: &str) -> String {
    format!(
        r#"<p style="margin: 32px 0 0 0; padding: 16px; background-color: {}; border-radius: 8px; font-size: 14px; color: {};"><strong>Aktion erforderlich:</strong> {}</p>"#,
        background, color, text
    )
}

fn sign_off(brand: &Brand) -> String {
    format!(
        r#"<p style="margin: 24px 0 0 0; font-size: 16px; line-height: 1.7; color: {};">Mit freundlichen Grüßen,<br><strong>Ihr {}-Team</strong></p>"#,
        brand.palette.text, brand.name
    )
}

// ============================================================================
// Booking
// ============================================================================

/// Booking data shown in confirmation and admin notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub package: Option<String>,
    pub building_type: Option<String>,
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl BookingDetails {
    fn service_and_package(&self) -> String {
        match &self.package {
            Some(package) => format!("{}/{}", self.service, package),
            None => self.service.clone(),
        }
    }
}

/// Confirmation sent to the visitor
pub fn booking_confirmation(brand: &Brand, booking: &BookingDetails) -> Rendered {
    let p = &brand.palette;

    let mut rows = vec![("Leistungsbereich", escape_html(&booking.service))];
    if let Some(package) = &booking.package {
        rows.push(("Gewähltes Paket", escape_html(package)));
    }
    if let Some(message) = &booking.message {
        rows.push(("Ihre Nachricht", format!("<em>&quot;{}&quot;</em>", escape_html(message))));
    }

    let mut content = String::new();
    content.push_str(&heading(p, 28, "Vielen Dank für Ihre Anfrage!"));
    content.push_str(&paragraph(p, &format!("Guten Tag {},", escape_html(&booking.name))));
    content.push_str(&paragraph(
        p,
        "wir haben Ihre Beratungsanfrage erhalten und freuen uns über Ihr Interesse an unseren Dienstleistungen. Unser Team wird sich innerhalb von <strong>24 Stunden</strong> bei Ihnen melden.",
    ));
    content.push_str(&summary_box(p, "Ihre Anfrage im Überblick", &detail_table(p, &rows)));

    let steps = [
        "Wir prüfen Ihre Anfrage und Ihre Anforderungen",
        "Ein Experte kontaktiert Sie für ein Erstgespräch",
        "Gemeinsam planen wir die nächsten Schritte",
    ];
    let _ = write!(
        content,
        r#"<h3 style="margin: 32px 0 16px 0; font-size: 18px; font-weight: 600; color: {};">Nächste Schritte</h3><ol style="padding-left: 20px; color: {}; font-size: 15px; line-height: 2;">"#,
        p.primary_dark, p.text
    );
    for step in steps {
        let _ = write!(content, "<li>{}</li>", step);
    }
    content.push_str("</ol>");

    content.push_str(&paragraph(
        p,
        &format!(
            "Bei dringenden Fragen erreichen Sie uns unter {}. Den vorgeschlagenen Rückruftermin finden Sie im Anhang.",
            mailto(p, brand.support_email)
        ),
    ));
    content.push_str(&sign_off(brand));

    let preheader = format!(
        "Vielen Dank für Ihre Anfrage bei {} - wir melden uns innerhalb von 24 Stunden.",
        brand.name
    );
    Rendered {
        subject: format!("Ihre Beratungsanfrage bei {} - Bestätigung", brand.name),
        html: layout(brand, &content, &preheader),
        preheader,
    }
}

/// Notification sent to the admin inbox
pub fn admin_booking_notification(brand: &Brand, booking: &BookingDetails) -> Rendered {
    let p = &brand.palette;

    let mut customer = vec![
        ("Name", escape_html(&booking.name)),
        ("E-Mail", mailto(p, &booking.email)),
    ];
    if let Some(phone) = &booking.phone {
        customer.push(("Telefon", tel(p, phone)));
    }

    let mut service = vec![("Bereich", escape_html(&booking.service))];
    if let Some(package) = &booking.package {
        service.push(("Paket", escape_html(package)));
    }
    if let Some(building_type) = &booking.building_type {
        service.push(("Gebäudetyp", escape_html(building_type)));
    }

    let mut content = String::new();
    content.push_str(&heading(p, 24, "Neue Beratungsanfrage"));
    content.push_str(&paragraph(
        p,
        &format!("Eingegangen am {}", format_submitted_at(booking.submitted_at)),
    ));
    content.push_str(&summary_box(p, "Kundendaten", &detail_table(p, &customer)));
    content.push_str(&summary_box(p, "Angefragte Leistung", &detail_table(p, &service)));
    if let Some(message) = &booking.message {
        content.push_str(&summary_box(p, "Nachricht des Kunden", &pre_wrap(p, message)));
    }
    content.push_str(&action_note(
        "#fef3c7",
        "#92400e",
        "Bitte kontaktieren Sie den Kunden innerhalb von 24 Stunden.",
    ));

    let topic = single_line(&booking.service_and_package());
    let name = single_line(&booking.name);
    let preheader = format!("Neue Anfrage von {} - {}", name, topic);
    Rendered {
        subject: format!("Neue Anfrage: {} - {}", name, topic),
        html: layout(brand, &content, &preheader),
        preheader,
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Results email sent to the visitor
pub fn calculator_results(
    brand: &Brand,
    name: Option<&str>,
    calculator_type: &str,
    inputs: &[LabeledValue],
    results: &[LabeledValue],
) -> Rendered {
    let p = &brand.palette;
    let type_name = calculator_type_name(calculator_type);

    let greeting = match name {
        Some(name) => format!("Guten Tag {},", escape_html(name)),
        None => "Guten Tag,".to_string(),
    };

    let mut content = String::new();
    content.push_str(&heading(p, 28, "Ihre Berechnungsergebnisse"));
    content.push_str(&paragraph(p, &greeting));
    content.push_str(&paragraph(
        p,
        &format!(
            "vielen Dank für die Nutzung unseres <strong>{}s</strong>. Hier sind Ihre personalisierten Ergebnisse:",
            calculator_title(calculator_type)
        ),
    ));

    let _ = write!(
        content,
        r#"<table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="background: linear-gradient(135deg, {} 0%, {} 100%); border-radius: 12px; margin: 32px 0;"><tr><td style="padding: 32px;"><h2 style="margin: 0 0 24px 0; font-size: 20px; font-weight: 600; color: {};">Ergebnisse</h2><table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%">"#,
        p.primary_dark, p.primary, p.white
    );
    for (index, result) in results.iter().enumerate() {
        let divider = if index + 1 < results.len() {
            "border-bottom: 1px solid rgba(255,255,255,0.2);"
        } else {
            ""
        };
        let _ = write!(
            content,
            r#"<tr><td style="padding: 12px 0; {}"><span style="color: rgba(255,255,255,0.8); font-size: 14px; display: block;">{}</span><span style="color: {}; font-size: 24px; font-weight: 700;">{}</span></td></tr>"#,
            divider,
            escape_html(&result.label),
            p.white,
            escape_html(&result.value)
        );
    }
    content.push_str("</table></td></tr></table>");

    let input_rows: Vec<(String, String)> = inputs
        .iter()
        .map(|input| (escape_html(&input.label), escape_html(&input.value)))
        .collect();
    content.push_str(&summary_box(p, "Ihre Eingaben", &detail_table(p, &input_rows)));

    let _ = write!(
        content,
        r#"<p style="margin: 0 0 16px 0; font-size: 14px; color: {}; font-style: italic;">* Diese Berechnung dient als erste Orientierung. Die tatsächlichen Werte können je nach individueller Situation abweichen.</p>"#,
        p.text_muted
    );
    let _ = write!(
        content,
        r#"<table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="margin: 32px 0;"><tr><td style="text-align: center;"><p style="margin: 0 0 16px 0; font-size: 16px; color: {};">Möchten Sie Ihr Einsparpotenzial voll ausschöpfen?</p><a href="{}" style="display: inline-block; background-color: {}; color: {}; padding: 14px 32px; border-radius: 8px; text-decoration: none; font-weight: 600; font-size: 16px;">Kostenlose Beratung anfragen</a></td></tr></table>"#,
        p.text, brand.booking_url, p.accent, p.white
    );
    content.push_str(&sign_off(brand));

    let preheader = format!("Ihre {}-Ergebnisse von {}", type_name, brand.name);
    Rendered {
        subject: format!("Ihre {}-Berechnung von {}", type_name, brand.name),
        html: layout(brand, &content, &preheader),
        preheader,
    }
}

// ============================================================================
// Partner
// ============================================================================

fn website_href(website: &str) -> String {
    if website.starts_with("http://") || website.starts_with("https://") {
        website.to_string()
    } else {
        format!("https://{}", website)
    }
}

/// Notification about a new partner registration, sent to the admin inbox
pub fn partner_notification(brand: &Brand, registration: &PartnerRegistration) -> Rendered {
    let p = &brand.palette;
    let trades = trades_formatted(&registration.trades);

    let mut company = vec![
        ("Firma", escape_html(&registration.company_name)),
        ("Ansprechpartner", escape_html(&registration.contact_person)),
        ("E-Mail", mailto(p, &registration.email)),
        ("Telefon", tel(p, &registration.phone)),
        ("Adresse", escape_html(&registration.address)),
    ];
    if let Some(website) = &registration.website {
        company.push((
            "Website",
            format!(
                r#"<a href="{}" style="color: {}; text-decoration: none;">{}</a>"#,
                escape_html(&website_href(website)),
                p.primary,
                escape_html(website)
            ),
        ));
    }
    company.push(("Mitarbeiter", escape_html(&registration.employees)));

    let mut content = String::new();
    content.push_str(&heading(p, 24, "Neue Handwerkspartner-Bewerbung"));
    content.push_str(&paragraph(
        p,
        &format!("Eingegangen am {}", format_submitted_at(registration.created_at)),
    ));
    content.push_str(&summary_box(p, "Unternehmensdaten", &detail_table(p, &company)));
    content.push_str(&summary_box(p, "Gewerke", &pre_wrap(p, &trades)));
    content.push_str(&summary_box(p, "Erfahrung", &pre_wrap(p, &registration.experience)));
    content.push_str(&summary_box(p, "Motivation", &pre_wrap(p, &registration.motivation)));
    if let Some(certifications) = &registration.certifications {
        content.push_str(&summary_box(p, "Zertifizierungen", &pre_wrap(p, certifications)));
    }
    content.push_str(&action_note(
        "#dbeafe",
        "#1e40af",
        "Bitte prüfen Sie die Bewerbung und kontaktieren Sie den Interessenten innerhalb von 5 Werktagen.",
    ));

    let company_name = single_line(&registration.company_name);
    let preheader = format!("Neue Handwerkspartner-Bewerbung von {} - {}", company_name, trades);
    Rendered {
        subject: format!("Neue Handwerkspartner-Bewerbung: {}", company_name),
        html: layout(brand, &content, &preheader),
        preheader,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domain_leads::NewPartnerRegistration;

    fn booking() -> BookingDetails {
        BookingDetails {
            name: "Anna <b>Muster</b>".to_string(),
            email: "anna@example.com".to_string(),
            phone: Some("030 123456".to_string()),
            service: "Energieberatung".to_string(),
            package: Some("premium".to_string()),
            building_type: Some("Einfamilienhaus".to_string()),
            message: Some("Bitte \"dringend\" & schnell".to_string()),
            submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert('x') & "y"</script>"#),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Grüße"), "Grüße");
    }

    #[test]
    fn test_german_date_in_berlin_time() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(format_submitted_at(at), "Freitag, 1. März 2024 um 11:00");

        let summer = Utc.with_ymd_and_hms(2024, 7, 14, 22, 5, 0).unwrap();
        assert_eq!(format_submitted_at(summer), "Montag, 15. Juli 2024 um 00:05");
    }

    #[test]
    fn test_layout_carries_brand() {
        let html = layout(&Brand::PALVAR, "<p>Inhalt</p>", "Vorschau");
        assert!(html.contains("#0f3528"));
        assert!(html.contains("#fdfcfa"));
        assert!(html.contains("service@palvar.de"));
        assert!(html.contains("Ihr Partner für nachhaltige Gebäudelösungen"));
        assert!(html.contains("<p>Inhalt</p>"));
        assert!(html.contains(">Vorschau</div>"));
    }

    #[test]
    fn test_booking_confirmation_escapes_visitor_text() {
        let rendered = booking_confirmation(&Brand::PALVAR, &booking());

        assert_eq!(rendered.subject, "Ihre Beratungsanfrage bei PALVAR - Bestätigung");
        assert!(rendered.html.contains("Guten Tag Anna &lt;b&gt;Muster&lt;/b&gt;,"));
        assert!(!rendered.html.contains("<b>Muster</b>"));
        assert!(rendered.html.contains("Bitte &quot;dringend&quot; &amp; schnell"));
        assert!(rendered.html.contains("Gewähltes Paket"));
    }

    #[test]
    fn test_admin_notification() {
        let mut details = booking();
        details.name = "Anna\r\nBcc: evil@example.com".to_string();
        let rendered = admin_booking_notification(&Brand::PALVAR, &details);

        assert_eq!(
            rendered.subject,
            "Neue Anfrage: Anna Bcc: evil@example.com - Energieberatung/premium"
        );
        assert!(rendered.html.contains("Eingegangen am Freitag, 1. März 2024 um 11:00"));
        assert!(rendered.html.contains("tel:030 123456"));
        assert!(rendered.html.contains("Einfamilienhaus"));
    }

    #[test]
    fn test_admin_notification_without_package() {
        let mut details = booking();
        details.package = None;
        details.phone = None;
        let rendered = admin_booking_notification(&Brand::PALVAR, &details);

        assert!(rendered.subject.ends_with("- Energieberatung"));
        assert!(!rendered.html.contains("Telefon"));
    }

    #[test]
    fn test_calculator_results() {
        let rendered = calculator_results(
            &Brand::PALVAR,
            None,
            "pv",
            &[LabeledValue::new("Dachfläche", "40 m²")],
            &[LabeledValue::new("Ertrag", "<7.200 kWh>")],
        );

        assert_eq!(rendered.subject, "Ihre Photovoltaik-Berechnung von PALVAR");
        assert!(rendered.html.contains("Guten Tag,"));
        assert!(rendered.html.contains("Photovoltaik-Rechners"));
        assert!(rendered.html.contains("&lt;7.200 kWh&gt;"));
        assert!(rendered.html.contains("https://palvar.de/booking"));
    }

    #[test]
    fn test_partner_notification() {
        let registration = NewPartnerRegistration {
            company_name: "Muster Bau GmbH".into(),
            contact_person: "Max Mustermann".into(),
            email: "max@musterbau.de".into(),
            phone: "030 1234567".into(),
            address: "Hauptstraße 1".into(),
            website: Some("musterbau.de".into()),
            trades: vec!["dach".into(), "zimmerei".into()],
            employees: "5-10".into(),
            experience: "20 Jahre".into(),
            motivation: "Wachstum".into(),
            certifications: None,
            ..Default::default()
        }
        .into_record(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());

        let rendered = partner_notification(&Brand::PALVAR, &registration);
        assert_eq!(rendered.subject, "Neue Handwerkspartner-Bewerbung: Muster Bau GmbH");
        assert!(rendered.preheader.ends_with("Dachdeckerei, Zimmerei / Holzbau"));
        assert!(rendered.html.contains(r#"href="https://musterbau.de""#));
        assert!(!rendered.html.contains("Zertifizierungen"));
    }
}
