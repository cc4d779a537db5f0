use crate::models::AlertRecord;
use crate::services::registry::AlertRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("notification target must not be empty")]
    EmptyTarget,

    #[error("threshold must be a non-negative number")]
    NegativeThreshold,
}

impl ValidationError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptySymbol => "empty_symbol",
            ValidationError::EmptyTarget => "empty_target",
            ValidationError::NegativeThreshold => "negative_threshold",
        }
    }
}

/// Validate and register a new alert.
///
/// All validation happens before the registry is touched, so a rejected
/// submission never leaves a partial record behind. Symbols are compared
/// case-insensitively and stored uppercase.
pub fn register_alert(
    registry: &AlertRegistry,
    symbol: &str,
    threshold: f64,
    target: &str,
) -> Result<AlertRecord, ValidationError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }

    let target = target.trim();
    if target.is_empty() {
        return Err(ValidationError::EmptyTarget);
    }

    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ValidationError::NegativeThreshold);
    }

    Ok(registry.add(symbol.to_uppercase(), threshold, target.to_string()))
}
