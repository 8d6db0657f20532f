//! Submission-side checks and photo encoding.
//!
//! These run at the form boundary before a complaint reaches the
//! repository. The repository itself trusts its input.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use base64::Engine;
use regex::Regex;
use thiserror::Error;

use super::model::NewComplaint;

/// Per-field validation messages, keyed by the JSON field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.fields))]
pub struct FieldErrors {
    pub fields: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn summarize(fields: &BTreeMap<&'static str, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn ca_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{12}$").expect("static pattern compiles"))
}

/// Checks the fields the submission form requires.
pub fn validate(fields: &NewComplaint) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if !ca_number_pattern().is_match(&fields.ca_number) {
        errors.fields.insert(
            "caNumber",
            "กรุณากรอกหมายเลขผู้ใช้ไฟฟ้า 12 หลักให้ถูกต้อง".to_string(),
        );
    }
    if fields.full_name.trim().is_empty() {
        errors
            .fields
            .insert("fullName", "กรุณากรอกชื่อ-นามสกุล".to_string());
    }
    if fields.phone.trim().is_empty() {
        errors
            .fields
            .insert("phone", "กรุณากรอกเบอร์โทรศัพท์".to_string());
    }
    if fields.location.trim().is_empty() {
        errors
            .fields
            .insert("location", "กรุณากรอกสถานที่เกิดเหตุ".to_string());
    }
    if fields.description.trim().is_empty() {
        errors
            .fields
            .insert("description", "กรุณาอธิบายรายละเอียดปัญหา".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Strips everything but ASCII digits, as the account-number input does
/// while the customer types.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reads an image file and encodes it as a `data:` URL.
pub fn encode_photo(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime.essence_str(), payload))
}
