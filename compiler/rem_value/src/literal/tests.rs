use super::*;
use crate::calendar::days_from_ymd;
use pretty_assertions::assert_eq;

fn seps() -> Separators {
    Separators::default()
}

// === Dates ===

#[test]
fn plain_date() {
    let (lit, rest) = parse_literal_date("2024-01-01", seps()).unwrap();
    assert_eq!(lit.date, 12418);
    assert_eq!(lit.time, None);
    assert_eq!(rest, "");
    assert_eq!(lit.into_value(), Value::Date(12418));
}

#[test]
fn slash_and_custom_separators() {
    let custom = Separators {
        date: '.',
        time: 'h',
    };
    assert!(parse_literal_date("2024/03/15", seps()).is_ok());
    assert!(parse_literal_date("2024.03.15", custom).is_ok());
    assert_eq!(
        parse_literal_date("2024.03.15", seps()),
        Err(EvalError::BadDate)
    );
}

#[test]
fn date_with_time_part() {
    let (lit, rest) = parse_literal_date("2024-01-01@13:45", seps()).unwrap();
    assert_eq!(lit.time, Some(13 * 60 + 45));
    assert_eq!(rest, "");
    let expected = days_from_ymd(2024, 1, 1) * 1440 + 13 * 60 + 45;
    assert_eq!(lit.into_value(), Value::DateTime(expected));

    let (lit, _) = parse_literal_date("2024-01-01 7.05", seps()).unwrap();
    assert_eq!(lit.time, Some(7 * 60 + 5));
}

#[test]
fn trailing_text_is_returned() {
    let (_, rest) = parse_literal_date("2024-01-01xyz", seps()).unwrap();
    assert_eq!(rest, "xyz");
}

#[test]
fn invalid_dates() {
    assert_eq!(parse_literal_date("", seps()), Err(EvalError::BadDate));
    assert_eq!(parse_literal_date("2024", seps()), Err(EvalError::BadDate));
    assert_eq!(parse_literal_date("2024-13-01", seps()), Err(EvalError::BadDate));
    assert_eq!(parse_literal_date("2023-02-29", seps()), Err(EvalError::BadDate));
    assert_eq!(parse_literal_date("1989-12-31", seps()), Err(EvalError::BadDate));
    assert_eq!(
        parse_literal_date("99999999999999999999-01-01", seps()),
        Err(EvalError::BadDate)
    );
}

#[test]
fn invalid_time_parts() {
    assert_eq!(
        parse_literal_date("2024-01-01@24:00", seps()),
        Err(EvalError::BadTime)
    );
    assert_eq!(
        parse_literal_date("2024-01-01@12", seps()),
        Err(EvalError::BadTime)
    );
}

#[test]
fn time_part_needs_both_digit_runs() {
    for text in ["2024-01-01@:", "2024-01-01@:30", "2024-01-01@10:", "2024-01-01 :"] {
        assert_eq!(parse_literal_date(text, seps()), Err(EvalError::BadTime), "{text}");
    }
    assert_eq!(
        parse_literal_date("2024-01-01@0:05", seps()).map(|(lit, _)| lit.time),
        Ok(Some(5))
    );
}

// === Times ===

#[test]
fn time_of_day() {
    assert_eq!(parse_time_of_day("0:00", seps()), Some(0));
    assert_eq!(parse_time_of_day("23:59", seps()), Some(1439));
    assert_eq!(parse_time_of_day("7.30", seps()), Some(450));
}

#[test]
fn time_of_day_rejects_malformed_text() {
    assert_eq!(parse_time_of_day("24:00", seps()), None);
    assert_eq!(parse_time_of_day("12:60", seps()), None);
    assert_eq!(parse_time_of_day("12:", seps()), None);
    assert_eq!(parse_time_of_day(":30", seps()), None);
    assert_eq!(parse_time_of_day("12:30pm", seps()), None);
    assert_eq!(parse_time_of_day("1230", seps()), None);
}
