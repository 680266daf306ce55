use validator::{Validate, ValidationError};

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Mainland mobile number: `1[3-9]` followed by nine digits.
pub fn is_mobile_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
        && bytes.iter().all(u8::is_ascii_digit)
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_mobile_phone(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Phone number must match 1[3-9]xxxxxxxxx".into());
        Err(err)
    }
}
