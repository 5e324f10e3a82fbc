use thiserror::Error;

use crate::model::{Frame, Sample};

#[derive(Debug, Error)]
pub enum CollapsedParseError {
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("no valid stack lines found")]
    Empty,
}

/// Parse Brendan Gregg's collapsed/folded stack format.
///
/// Each line has the format: `frame;frame;... count` with frames listed
/// caller-first and the count as the last whitespace-separated token.
///
/// Used by: `perf script | stackcollapse-perf.pl`, dtrace, FlameGraph tools.
pub fn parse_collapsed(data: &[u8]) -> Result<Vec<Sample>, CollapsedParseError> {
    let text = std::str::from_utf8(data)?;
    let mut samples: Vec<Sample> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Split into stack and count: "a;b;c 42"
        let Some(pos) = line.rfind(' ') else {
            continue;
        };
        let value: u64 = line[pos + 1..].trim().parse().unwrap_or(1);
        let stack_str = line[..pos].trim();
        if stack_str.is_empty() {
            continue;
        }

        // Lines are caller-first; samples store frames leaf-first.
        let frames: Vec<Frame> = stack_str
            .split(';')
            .rev()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Frame {
                address: 0,
                symbol: Some(name.to_string()),
            })
            .collect();

        if frames.is_empty() {
            continue;
        }
        samples.push(Sample { frames, value });
    }

    if samples.is_empty() {
        return Err(CollapsedParseError::Empty);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_collapsed() {
        let input = b"main;foo;bar 10\nmain;foo;baz 20\nmain;qux 5\n";
        let samples = parse_collapsed(input).unwrap();
        assert_eq!(samples.len(), 3);

        // Frames come out leaf-first.
        let first = &samples[0];
        assert_eq!(first.value, 10);
        assert_eq!(first.frames[0].resolved_name(), "bar");
        assert_eq!(first.frames[2].resolved_name(), "main");
    }

    #[test]
    fn skips_comments_and_empty_lines() {
        let input = b"# comment\n\nmain;foo 5\n";
        let samples = parse_collapsed(input).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].frames.len(), 2);
    }

    #[test]
    fn unparseable_count_defaults_to_one() {
        let samples = parse_collapsed(b"main;foo bar\n").unwrap();
        assert_eq!(samples[0].value, 1);
    }

    #[test]
    fn empty_input_errors() {
        assert!(parse_collapsed(b"").is_err());
    }
}
