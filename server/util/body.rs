use std::io::Read;

use crate::error::ApiError;

/// Reads at most `limit` bytes from `reader`.
///
/// A declared length over the limit is rejected before reading anything;
/// an undeclared body is cut off one byte past the limit and rejected.
pub fn read_limited<R: Read>(reader: R, declared: Option<usize>, limit: usize) -> Result<Vec<u8>, ApiError> {
    if declared.is_some_and(|len| len > limit) {
        return Err(ApiError::PayloadTooLarge { limit });
    }
    let mut body = Vec::with_capacity(declared.unwrap_or(0));
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| ApiError::BadRequest(format!("failed to read body: {}", e)))?;
    if body.len() > limit {
        return Err(ApiError::PayloadTooLarge { limit });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn within_limit() {
        let body = read_limited(Cursor::new(vec![7u8; 10]), Some(10), 10).unwrap();
        assert_eq!(body.len(), 10);
    }

    #[test]
    fn declared_length_over_limit() {
        let err = read_limited(Cursor::new(Vec::new()), Some(11), 10).unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge { limit: 10 }));
    }

    #[test]
    fn undeclared_body_over_limit() {
        let err = read_limited(Cursor::new(vec![0u8; 64]), None, 10).unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge { .. }));
    }
}
