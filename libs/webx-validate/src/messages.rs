pub(crate) const REQUIRED_FIELD: &str = "Required field cannot be left blank.";
pub(crate) const EMAIL: &str = "Required to be a valid email address.";
pub(crate) const UUID: &str = "Required to be a valid UUID.";

pub(crate) fn min_length(min: usize) -> String {
    format!("Required to be a minimum of {min} characters in length.")
}

pub(crate) fn max_length(max: usize) -> String {
    format!("Exceeds maximum length of {max}.")
}

pub(crate) fn exact_length(expected: usize) -> String {
    format!("Required to be exactly {expected} characters in length.")
}
