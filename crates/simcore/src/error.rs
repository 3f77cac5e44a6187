use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;

/// Checks that a named parameter is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> SimResult<()> {
    require_finite(name, value)?;
    if value <= 0.0 {
        return Err(SimError::InvalidParameter {
            name,
            reason: format!("must be positive, got {value}"),
        });
    }
    Ok(())
}

/// Checks that a named parameter is finite and not negative.
pub fn require_non_negative(name: &'static str, value: f64) -> SimResult<()> {
    require_finite(name, value)?;
    if value < 0.0 {
        return Err(SimError::InvalidParameter {
            name,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

pub fn require_finite(name: &'static str, value: f64) -> SimResult<()> {
    if !value.is_finite() {
        return Err(SimError::InvalidParameter {
            name,
            reason: format!("must be finite, got {value}"),
        });
    }
    Ok(())
}
