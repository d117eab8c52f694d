//! Duration-string parsing shared by the launcher and the worker.
//!
//! Accepts the four grammars a batch scheduler's wall-time argument is
//! typically expressed in: `ss`, `mm:ss`, `hh:mm:ss`, `d:hh:mm:ss`. Each
//! field is a non-negative integer; the parser is total over well-formed
//! input and rejects anything else with a [`DurationParseError`].

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DurationParseError {
    #[error("duration string has {0} colon-separated fields, expected 1-4")]
    WrongFieldCount(usize),
    #[error("field {field:?} in duration string {input:?} is not a non-negative integer")]
    NotAnInteger { input: String, field: String },
}

/// Parses a wall-time budget string into a whole number of seconds.
///
/// Accepted forms: `ss`, `mm:ss`, `hh:mm:ss`, `d:hh:mm:ss`.
///
/// ```
/// use taskfarm_core::time::parse_duration;
/// assert_eq!(parse_duration("90").unwrap(), 90);
/// assert_eq!(parse_duration("01:30").unwrap(), 90);
/// assert_eq!(parse_duration("01:00:00").unwrap(), 3600);
/// assert_eq!(parse_duration("1:00:00:00").unwrap(), 86_400);
/// ```
pub fn parse_duration(s: &str) -> Result<u64, DurationParseError> {
    let fields: Vec<&str> = s.split(':').collect();

    let parts: Vec<u64> = fields
        .iter()
        .map(|field| {
            field
                .parse::<u64>()
                .map_err(|_| DurationParseError::NotAnInteger {
                    input: s.to_string(),
                    field: (*field).to_string(),
                })
        })
        .collect::<Result<_, _>>()?;

    let secs = match parts.as_slice() {
        [secs] => *secs,
        [mins, secs] => mins * 60 + secs,
        [hours, mins, secs] => hours * 3600 + mins * 60 + secs,
        [days, hours, mins, secs] => days * 86_400 + hours * 3600 + mins * 60 + secs,
        other => return Err(DurationParseError::WrongFieldCount(other.len())),
    };

    Ok(secs)
}
