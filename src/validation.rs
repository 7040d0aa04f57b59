use crate::error::{SantaError, SantaResult};

/// Smallest roster the draw accepts. Two people would always just swap.
pub const MIN_PARTICIPANTS: usize = 3;

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> SantaResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(SantaError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Strips everything but ASCII digits from a phone number, so "+55 (34) 9999-0000"
/// becomes "5534999990000". Fails if no digits remain.
pub fn phone_digits(value: &str) -> SantaResult<String> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        Err(SantaError::InvalidPhone {
            value: value.to_string(),
        })
    } else {
        Ok(digits)
    }
}

/// Checks the roster size precondition of the draw.
pub fn enough_participants(count: usize) -> SantaResult<()> {
    if count < MIN_PARTICIPANTS {
        Err(SantaError::InsufficientParticipants {
            required: MIN_PARTICIPANTS,
            actual: count,
        })
    } else {
        Ok(())
    }
}
