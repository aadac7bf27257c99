//! Line-oriented prefix lists, parsed in parallel.

use anyhow::Context;
use rayon::prelude::*;

use geoset_common::network::prefix::Prefix;

#[derive(Debug, Default)]
pub struct ParsedLines {
    pub prefixes: Vec<Prefix>,
    /// Blank and comment-only lines.
    pub skipped: usize,
}

/// Parses one prefix per line. Comment and blank lines are counted and
/// skipped; any other bad line fails the whole batch.
pub fn parse_lines(content: &str) -> anyhow::Result<ParsedLines> {
    let lines: Vec<&str> = content.lines().collect();
    let results: Vec<_> = lines.par_iter().map(|line| line.parse::<Prefix>()).collect();

    let mut parsed = ParsedLines {
        prefixes: Vec::with_capacity(results.len()),
        skipped: 0,
    };
    for (idx, result) in results.into_iter().enumerate() {
        match result {
            Ok(prefix) => parsed.prefixes.push(prefix),
            Err(e) if e.is_skippable() => parsed.skipped += 1,
            Err(e) => return Err(e).with_context(|| format!("line {}: {:?}", idx + 1, lines[idx])),
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoset_common::GeoError;

    #[test]
    fn test_parse_lines_skips_comments() {
        let content = "# header\n1.1.1.0/24\n\n  2001:db8::/32 // docs\r\n/* block */\n8.8.8.8\n";
        let parsed = parse_lines(content).unwrap();
        let texts: Vec<String> = parsed.prefixes.iter().map(|p| p.to_string()).collect();
        assert_eq!(texts, vec!["1.1.1.0/24", "2001:db8::/32", "8.8.8.8/32"]);
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn test_parse_lines_fails_fast_with_line_number() {
        let err = parse_lines("1.1.1.1\nbogus\n2.2.2.2\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2"), "{err}");
        assert_eq!(
            err.downcast_ref::<GeoError>(),
            Some(&GeoError::InvalidAddress("bogus".into()))
        );
    }
}
