use super::ApiError;

/// Parses a path id. `kind` names the resource, e.g. `issue`.
pub fn parse_id(raw: &str, kind: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(
            format!("Invalid {kind} ID"),
            format!("{kind}_id must be a positive integer"),
        )),
    }
}
