/**
 * Repetition intervals are ISO 8601 durations, ex: `PT15M`, `PT1H`, `P1DT2H30M`.
 * Only hour and minute shapes map to a frequency. Everything else is unrecognized
 */
use nom::{
    bytes::complete::tag,
    character::complete::{digit1, one_of, u32 as parse_u32},
    combinator::{all_consuming, opt},
    multi::many0,
    sequence::{preceded, terminated},
    IResult, Parser,
};

#[derive(Debug, PartialEq)]
pub(crate) enum RepetitionInterval {
    Hours(u32),
    /**Total minutes, hours are folded in */
    Minutes(u32),
}

/// Parse a repetition interval into hours or minutes
pub(crate) fn parse_interval(interval: &str) -> Option<RepetitionInterval> {
    let (_, (hours, minutes)) = duration(interval).ok()?;
    match (hours, minutes) {
        (Some(hours), None) => Some(RepetitionInterval::Hours(hours)),
        (hours, Some(minutes)) => hours
            .unwrap_or_default()
            .checked_mul(60)
            .and_then(|value| value.checked_add(minutes))
            .map(RepetitionInterval::Minutes),
        (None, None) => None,
    }
}

/// `P` [date groups] `T` [hours `H`] [minutes `M`], nothing after
fn duration(input: &str) -> IResult<&str, (Option<u32>, Option<u32>)> {
    let date_groups = many0((digit1, one_of("YMWD")));
    let mut parser = all_consuming(preceded(
        (tag("P"), date_groups, tag("T")),
        (
            opt(terminated(parse_u32, tag("H"))),
            opt(terminated(parse_u32, tag("M"))),
        ),
    ));
    parser.parse(input)
}

#[cfg(test)]
mod tests {
    use super::{parse_interval, RepetitionInterval};

    #[test]
    fn test_parse_interval_hours() {
        assert_eq!(parse_interval("PT1H"), Some(RepetitionInterval::Hours(1)));
        assert_eq!(parse_interval("PT12H"), Some(RepetitionInterval::Hours(12)));
        assert_eq!(parse_interval("P1DT3H"), Some(RepetitionInterval::Hours(3)));
    }

    #[test]
    fn test_parse_interval_minutes() {
        assert_eq!(parse_interval("PT15M"), Some(RepetitionInterval::Minutes(15)));
        assert_eq!(
            parse_interval("PT1H30M"),
            Some(RepetitionInterval::Minutes(90))
        );
        assert_eq!(
            parse_interval("P2DT2H5M"),
            Some(RepetitionInterval::Minutes(125))
        );
    }

    #[test]
    fn test_parse_interval_unrecognized() {
        assert_eq!(parse_interval(""), None);
        assert_eq!(parse_interval("PT"), None);
        assert_eq!(parse_interval("P1D"), None);
        assert_eq!(parse_interval("PT30S"), None);
        assert_eq!(parse_interval("PT1H30M15S"), None);
        assert_eq!(parse_interval("PT5M "), None);
        assert_eq!(parse_interval("T5M"), None);
        assert_eq!(parse_interval("pt5m"), None);
        assert_eq!(parse_interval("PXT5M"), None);
    }
}
