//! Callback invite (iCalendar) attached to booking confirmations
//!
//! The callback is proposed for the next business day at 10:00 Berlin time:
//! one day after the submission, pushed past the weekend. The event is
//! TENTATIVE, lasts 30 minutes and carries a 15-minute display alarm.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc, Weekday};
use chrono_tz::Europe::Berlin;

use crate::brand::Brand;

/// MIME type of the attachment
pub const ICS_CONTENT_TYPE: &str = "text/calendar";

const CALLBACK_HOUR: u32 = 10;
const CALLBACK_MINUTES: i64 = 30;

/// Start and end of the proposed callback, in UTC
pub fn callback_slot(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let mut date = now.with_timezone(&Berlin).date_naive() + Duration::days(1);
    match date.weekday() {
        Weekday::Sun => date = date + Duration::days(1),
        Weekday::Sat => date = date + Duration::days(2),
        _ => {}
    }

    let start = date
        .and_hms_opt(CALLBACK_HOUR, 0, 0)
        .and_then(|naive| Berlin.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| now + Duration::days(1));

    (start, start + Duration::minutes(CALLBACK_MINUTES))
}

/// `20240304T090000Z`
pub fn format_ics_date(date: DateTime<Utc>) -> String {
    date.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escapes TEXT values (RFC 5545 section 3.3.11)
fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Parameter values may not contain quotes; they are dropped
fn quote_param(value: &str) -> String {
    format!("\"{}\"", value.replace('"', ""))
}

/// Details of the booking the invite refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackInvite {
    pub name: String,
    pub email: String,
    pub service: String,
    pub package: Option<String>,
}

impl CallbackInvite {
    /// Attachment file name
    pub fn filename(brand: &Brand) -> String {
        format!("{}-Beratungstermin.ics", brand.name)
    }

    /// Renders the VCALENDAR document with CRLF line endings
    pub fn render(&self, brand: &Brand, now: DateTime<Utc>) -> String {
        let (start, end) = callback_slot(now);
        let consultation = match &self.package {
            Some(package) => format!("{}-Beratung ({})", self.service, package),
            None => format!("{}-Beratung", self.service),
        };
        let description = format!(
            "Sie haben eine {} bei {} angefragt. Ein Experte wird Sie zu diesem Zeitpunkt kontaktieren.\n\nBei Fragen: {}",
            consultation, brand.name, brand.support_email
        );

        let lines = [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:-//{}//Booking//DE", brand.name),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:REQUEST".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!(
                "UID:{}-{}@{}",
                brand.name.to_lowercase(),
                now.timestamp_millis(),
                support_domain(brand)
            ),
            format!("DTSTAMP:{}", format_ics_date(now)),
            format!("DTSTART:{}", format_ics_date(start)),
            format!("DTEND:{}", format_ics_date(end)),
            format!("SUMMARY:{}", escape_text(&format!("{} Beratung - Rückruf erwartet", brand.name))),
            format!("DESCRIPTION:{}", escape_text(&description)),
            "LOCATION:Telefonische Beratung".to_string(),
            format!("ORGANIZER;CN={}:mailto:{}", brand.name, brand.support_email),
            format!(
                "ATTENDEE;CN={};RSVP=TRUE:mailto:{}",
                quote_param(&self.name),
                self.email
            ),
            "STATUS:TENTATIVE".to_string(),
            "TRANSP:OPAQUE".to_string(),
            "BEGIN:VALARM".to_string(),
            "ACTION:DISPLAY".to_string(),
            format!("DESCRIPTION:{} Beratungsgespräch in 15 Minuten", brand.name),
            "TRIGGER:-PT15M".to_string(),
            "END:VALARM".to_string(),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ];

        let mut out = lines.join("\r\n");
        out.push_str("\r\n");
        out
    }
}

fn support_domain(brand: &Brand) -> &'static str {
    brand
        .support_email
        .split_once('@')
        .map(|(_, domain)| domain)
        .unwrap_or(brand.support_email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_weekday_goes_to_next_day() {
        // Thursday in summer time: 10:00 CEST is 08:00 UTC
        let (start, end) = callback_slot(utc("2024-07-04T12:00:00Z"));
        assert_eq!(start, utc("2024-07-05T08:00:00Z"));
        assert_eq!(end, utc("2024-07-05T08:30:00Z"));
    }

    #[test]
    fn test_friday_skips_weekend() {
        // Friday in winter time: 10:00 CET is 09:00 UTC
        let (start, _) = callback_slot(utc("2024-03-01T09:00:00Z"));
        assert_eq!(start, utc("2024-03-04T09:00:00Z"));
    }

    #[test]
    fn test_saturday_skips_sunday() {
        let (start, _) = callback_slot(utc("2024-03-02T15:00:00Z"));
        assert_eq!(start, utc("2024-03-04T09:00:00Z"));
    }

    #[test]
    fn test_uses_berlin_calendar_day() {
        // 23:30 UTC on Friday is already Saturday in Berlin
        let (start, _) = callback_slot(utc("2024-03-01T23:30:00Z"));
        assert_eq!(start, utc("2024-03-04T09:00:00Z"));
    }

    #[test]
    fn test_render() {
        let invite = CallbackInvite {
            name: "Anna \"Nina\" Muster".to_string(),
            email: "anna@example.com".to_string(),
            service: "Energieberatung".to_string(),
            package: Some("premium".to_string()),
        };
        let ics = invite.render(&Brand::PALVAR, utc("2024-07-04T12:00:00Z"));

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("DTSTART:20240705T080000Z\r\n"));
        assert!(ics.contains("DTEND:20240705T083000Z\r\n"));
        assert!(ics.contains("DTSTAMP:20240704T120000Z\r\n"));
        assert!(ics.contains("STATUS:TENTATIVE"));
        assert!(ics.contains("TRIGGER:-PT15M"));
        assert!(ics.contains("ATTENDEE;CN=\"Anna Nina Muster\";RSVP=TRUE:mailto:anna@example.com"));
        assert!(ics.contains("Energieberatung-Beratung (premium)"));
        assert!(ics.contains("\\n\\nBei Fragen: service@palvar.de"));
        assert!(ics.contains("UID:palvar-1720094400000@palvar.de"));
        assert_eq!(CallbackInvite::filename(&Brand::PALVAR), "PALVAR-Beratungstermin.ics");
    }
}
