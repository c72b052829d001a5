//! nom parsers for DMS text.
//!
//! Accepted forms, hemisphere letter either before or after the value:
//!
//! - `24°33'35.3454"S`
//! - `24 33 35.3454 S`
//! - `24:33:35,3454S`
//! - `S 24°33'`
//! - `24d33m35sS` is **not** accepted, `m` and `s` are too ambiguous with the letters.
//!

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, one_of, space0, space1};
use nom::combinator::{eof, map_res, opt, recognize, value};
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;

use crate::{Error, Result};

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

/// Seconds may have a fractional part, `,` is accepted as decimal separator.
///
fn seconds(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(one_of(".,"), digit1)))),
        |s: &str| s.replace(',', ".").parse::<f64>(),
    )(input)
}

fn deg_sep(input: &str) -> IResult<&str, ()> {
    alt((
        value((), tuple((space0, one_of("°º:d"), space0))),
        value((), space1),
    ))(input)
}

fn min_sep(input: &str) -> IResult<&str, ()> {
    alt((
        value((), tuple((space0, one_of("'′:"), space0))),
        value((), space1),
    ))(input)
}

/// Optional closing mark after the last component
///
fn end_mark(input: &str) -> IResult<&str, &str> {
    alt((tag("''"), recognize(one_of("°º'′\"″"))))(input)
}

/// `D[ M[ S]]` followed by an optional mark.
///
fn dms(input: &str) -> IResult<&str, (u32, u32, f64)> {
    let (input, d) = number(input)?;
    let (input, rest) = opt(preceded(
        deg_sep,
        pair(number, opt(preceded(min_sep, seconds))),
    ))(input)?;
    let (input, _) = opt(end_mark)(input)?;
    let (m, s) = match rest {
        Some((m, s)) => (m, s.unwrap_or(0.)),
        None => (0, 0.),
    };
    Ok((input, (d, m, s)))
}

type Parsed = (Option<char>, (u32, u32, f64), Option<char>);

/// Optional leading letter, value, optional trailing letter, nothing else.
///
fn full<'a>(letters: &'a str) -> impl FnMut(&'a str) -> IResult<&'a str, Parsed> {
    move |input: &'a str| {
        terminated(
            tuple((
                preceded(space0, opt(terminated(one_of(letters), space0))),
                dms,
                preceded(space0, opt(terminated(one_of(letters), space0))),
            )),
            pair(space0, eof),
        )(input)
    }
}

/// Parse DMS text, `letters` are the allowed hemisphere letters.
///
/// Exactly one hemisphere letter must be present.
///
pub(crate) fn parse_dms(input: &str, letters: &str) -> Result<(u16, u8, f64, char)> {
    let (_, (before, (d, m, s), after)) =
        full(letters)(input).map_err(|e| Error::InvalidAngle(format!("{input:?}: {e}")))?;

    let flag = match (before, after) {
        (Some(c), None) | (None, Some(c)) => c,
        (None, None) => {
            return Err(Error::InvalidAngle(format!("{input:?}: missing hemisphere")));
        }
        (Some(_), Some(_)) => {
            return Err(Error::InvalidAngle(format!("{input:?}: two hemispheres")));
        }
    };
    let d = u16::try_from(d).map_err(|_| Error::InvalidAngle(format!("{d} degrees")))?;
    let m = u8::try_from(m).map_err(|_| Error::InvalidAngle(format!("{m} minutes")))?;
    Ok((d, m, s, flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("24°33'35.3454\"S", (24, 33, 35.3454, 'S'))]
    #[case("24 33 35.3454 S", (24, 33, 35.3454, 'S'))]
    #[case("24:33:35,3454S", (24, 33, 35.3454, 'S'))]
    #[case("S 24°33'", (24, 33, 0., 'S'))]
    #[case("  n 12° ", (12, 0, 0., 'n'))]
    #[case("24º 33′ 35″ S", (24, 33, 35., 'S'))]
    #[case("24°33'35''S", (24, 33, 35., 'S'))]
    fn test_parse_dms(#[case] inp: &str, #[case] out: (u16, u8, f64, char)) {
        let r = parse_dms(inp, "NSns").unwrap();
        assert_eq!(out, r);
    }

    #[rstest]
    #[case("")]
    #[case("24 33 35")]
    #[case("N 24 33 35 S")]
    #[case("24 33 35 E")]
    #[case("-24 33 35 S")]
    #[case("24 33 35 S foo")]
    #[case("99999 0 0 S")]
    fn test_parse_dms_bad(#[case] inp: &str) {
        assert!(parse_dms(inp, "NSns").is_err());
    }

    #[test]
    fn test_dms_partial() {
        let (rest, r) = dms("42 14").unwrap();
        assert_eq!("", rest);
        assert_eq!((42, 14, 0.), r);
    }
}
