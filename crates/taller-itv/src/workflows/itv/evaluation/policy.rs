use super::super::domain::ComplianceState;

/// Days before the due date during which a vehicle is flagged as expiring.
pub(crate) const WARNING_WINDOW_DAYS: i64 = 15;

pub(crate) fn classify(days_remaining: i64) -> ComplianceState {
    if days_remaining < 0 {
        ComplianceState::Expired
    } else if days_remaining <= WARNING_WINDOW_DAYS {
        ComplianceState::Warning
    } else {
        ComplianceState::Valid
    }
}
