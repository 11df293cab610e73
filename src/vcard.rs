//! Contact Card Formatter - vCard 4.0 Lines
//!
//! Built once per run from the validated record; immutable afterwards.

use chrono::Utc;

use crate::record::SourceRecord;

/// Ordered vCard lines. `payload()` is what gets encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    lines: Vec<String>,
}

impl ContactCard {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn payload(&self) -> String {
        self.lines.join("\n")
    }
}

/// Escape reserved vCard characters: newline first, then semicolon, then comma.
pub fn escape_value(value: &str) -> String {
    value
        .replace('\n', "\\n")
        .replace(';', "\\;")
        .replace(',', "\\,")
}

/// Split a full name into (family, given). The last whitespace-delimited token
/// is the family name; everything before it, joined by a single space, is the
/// given name(s). A single token is all family.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    match parts.as_slice() {
        [] => (String::new(), String::new()),
        [only] => ((*only).to_string(), String::new()),
        [given @ .., family] => ((*family).to_string(), given.join(" ")),
    }
}

/// Current UTC time in the vCard REV format.
pub fn utc_revision_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Build the card. `revision` overrides any timestamp embedded in the record;
/// when both are absent the current UTC time is used. Output is deterministic
/// for identical record + revision.
pub fn build_card(record: &SourceRecord, revision: Option<&str>) -> ContactCard {
    let personal = &record.personal;
    let contact = &record.contact;
    let social = &record.social;

    let full_name = personal.full_name.trim();
    let (family, given) = split_full_name(full_name);

    let revision = revision
        .map(str::to_string)
        .or_else(|| record.embedded_revision().map(str::to_string))
        .unwrap_or_else(utc_revision_now);

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:4.0".to_string(),
        format!("FN:{}", escape_value(full_name)),
        format!("N:{};{};;;", escape_value(&family), escape_value(&given)),
    ];

    push_if_present(&mut lines, format!("ORG:{}", escape_value(&personal.school)), &personal.school);
    push_if_present(&mut lines, format!("TITLE:{}", escape_value(&personal.role)), &personal.role);
    push_if_present(
        &mut lines,
        format!("TEL;VALUE=uri:tel:{}", escape_value(&contact.phone)),
        &contact.phone,
    );
    push_if_present(&mut lines, format!("EMAIL:{}", escape_value(&contact.email)), &contact.email);
    push_if_present(
        &mut lines,
        format!("URL;TYPE=website:{}", escape_value(&social.website)),
        &social.website,
    );
    push_if_present(
        &mut lines,
        format!("URL;TYPE=linkedin:{}", escape_value(&social.linkedin)),
        &social.linkedin,
    );
    push_if_present(
        &mut lines,
        format!("URL;TYPE=github:{}", escape_value(&social.github)),
        &social.github,
    );

    // ADR is always present, 7 semicolon-delimited components after the type.
    lines.push(format!(
        "ADR;TYPE=home:;;{};{};{};{};{}",
        escape_value(&personal.street),
        escape_value(&personal.city),
        escape_value(&personal.department),
        escape_value(&personal.postal_code),
        escape_value(&personal.country),
    ));

    push_if_present(
        &mut lines,
        format!("PHOTO;MEDIATYPE=image/jpeg:{}", escape_value(&personal.photo)),
        &personal.photo,
    );

    lines.push(format!(
        "NOTE:Digital business card - {}",
        escape_value(&personal.name_initial)
    ));
    lines.push(format!("REV:{revision}"));
    lines.push("END:VCARD".to_string());

    ContactCard { lines }
}

fn push_if_present(lines: &mut Vec<String>, line: String, value: &str) {
    if !value.trim().is_empty() {
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REV: &str = "2024-05-01T12:00:00Z";

    fn sample_record() -> SourceRecord {
        let mut record = SourceRecord::default();
        record.personal.full_name = "Jean Paul Dupont".to_string();
        record.personal.name_initial = "JPD".to_string();
        record.personal.school = "Example University".to_string();
        record.personal.city = "Paris".to_string();
        record.contact.phone = "+33 6 00 00 00 00".to_string();
        record.contact.email = "jp@example.org".to_string();
        record.social.website = "https://example.org".to_string();
        record
    }

    #[test]
    fn splits_multi_token_name() {
        let (family, given) = split_full_name("Jean Paul Dupont");
        assert_eq!(family, "Dupont");
        assert_eq!(given, "Jean Paul");
    }

    #[test]
    fn single_token_is_all_family() {
        let (family, given) = split_full_name("Dupont");
        assert_eq!(family, "Dupont");
        assert_eq!(given, "");
    }

    #[test]
    fn empty_name_splits_empty() {
        assert_eq!(split_full_name("   "), (String::new(), String::new()));
    }

    #[test]
    fn escaping_is_noop_for_clean_values() {
        assert_eq!(escape_value("Paris"), "Paris");
    }

    #[test]
    fn escaping_handles_each_reserved_character() {
        assert_eq!(escape_value("a,b;c\nd"), "a\\,b\\;c\\nd");
    }

    #[test]
    fn envelope_and_required_lines_present() {
        let card = build_card(&sample_record(), Some(REV));
        let lines = card.lines();
        assert_eq!(lines.first().map(String::as_str), Some("BEGIN:VCARD"));
        assert_eq!(lines.get(1).map(String::as_str), Some("VERSION:4.0"));
        assert_eq!(lines.last().map(String::as_str), Some("END:VCARD"));
        assert!(lines.contains(&"FN:Jean Paul Dupont".to_string()));
        assert!(lines.contains(&"N:Dupont;Jean Paul;;;".to_string()));
        assert!(lines.contains(&format!("REV:{REV}")));
    }

    #[test]
    fn blank_optionals_are_omitted_but_adr_stays() {
        let mut record = sample_record();
        record.personal.school = String::new();
        record.social.linkedin = String::new();
        let card = build_card(&record, Some(REV));
        let payload = card.payload();
        assert!(!payload.contains("ORG:"));
        assert!(!payload.contains("TYPE=linkedin"));
        assert!(payload.contains("ADR;TYPE=home:;;;Paris;;;"));
    }

    #[test]
    fn note_embeds_initial_and_blank_when_absent() {
        let card = build_card(&sample_record(), Some(REV));
        assert!(card.payload().contains("NOTE:Digital business card - JPD"));

        let mut record = sample_record();
        record.personal.name_initial = String::new();
        let card = build_card(&record, Some(REV));
        assert!(card.payload().contains("NOTE:Digital business card - \n"));
    }

    #[test]
    fn deterministic_for_fixed_revision() {
        let a = build_card(&sample_record(), Some(REV));
        let b = build_card(&sample_record(), Some(REV));
        assert_eq!(a, b);
        assert_eq!(a.payload(), b.payload());
    }

    #[test]
    fn record_revision_used_when_no_override() {
        let mut record = sample_record();
        record.site.revision_date = "2023-01-01T00:00:00Z".to_string();
        let card = build_card(&record, None);
        assert!(card.payload().contains("REV:2023-01-01T00:00:00Z"));
    }

    #[test]
    fn reserved_characters_in_fields_are_escaped_in_place() {
        let mut record = sample_record();
        record.personal.school = "Acme, Inc; R&D".to_string();
        let card = build_card(&record, Some(REV));
        assert!(card.payload().contains("ORG:Acme\\, Inc\\; R&D"));
    }
}
