use super::*;

fn parse(text: &str) -> DrumviewResult<Vec<Position3>> {
    parse_snapshot(text.as_bytes(), Path::new("mem.csv"))
}

#[test]
fn skips_header_and_ignores_extra_fields() {
    let got = parse("x,y,z,r\n1,2,3,0.002\n-0.5, 0.25 ,4e-3,0.002\n").unwrap();
    assert_eq!(
        got,
        vec![
            Position3::new(1.0, 2.0, 3.0),
            Position3::new(-0.5, 0.25, 0.004)
        ]
    );
}

#[test]
fn header_only_parses_to_nothing() {
    assert!(parse("x,y,z\n").unwrap().is_empty());
}

#[test]
fn short_row_is_rejected() {
    let err = parse("x,y,z\n1,2\n").unwrap_err();
    assert!(matches!(err, DrumviewError::DataFormat(_)));
    assert!(err.to_string().contains("at least 3 fields"));
}

#[test]
fn non_numeric_field_is_rejected() {
    let err = parse("x,y,z\n1,abc,3\n").unwrap_err();
    assert!(matches!(err, DrumviewError::DataFormat(_)));
    assert!(err.to_string().contains("field 1"));
}

#[test]
fn non_finite_field_is_rejected() {
    let err = parse("x,y,z\n1,NaN,3\n").unwrap_err();
    assert!(matches!(err, DrumviewError::DataFormat(_)));
}

#[test]
fn missing_file_is_a_data_format_error() {
    let err = read_snapshot(Path::new("definitely/not/here/BCE_Rigid0.csv")).unwrap_err();
    assert!(matches!(err, DrumviewError::DataFormat(_)));
}
