use crate::RnError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, RnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RnError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, RnError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RnError::Domain {
            what: format!("{what} must be positive (got {v})"),
        })
    }
}
