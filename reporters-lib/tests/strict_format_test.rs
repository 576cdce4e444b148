//! Format-level failures abort the scan instead of being collected as rule errors

use reporters_lib::{FormatError, validate_reader};

mod common;

#[test]
fn test_unterminated_quote_aborts_the_run() {
    let document = common::csv_document(&[
        "foo,,,TEXT,Mac,grp",
        "BAR,\"/bin/bar,,TEXT,Mac,grp",
        "BAZ,/bin/baz,,TEXT,Mac,grp",
    ]);

    match validate_reader(document.as_bytes()) {
        Err(FormatError::MalformedRecord { line, message }) => {
            assert_eq!(line, 3);
            assert!(message.contains("unexpected end of data"), "{message}");
        }
        other => panic!("expected a malformed record error, got {other:?}"),
    }
}

#[test]
fn test_text_after_closing_quote_aborts_the_run() {
    let document = common::csv_document(&["FOO,\"/bin/foo\"x,,TEXT,Mac,grp"]);

    let error = validate_reader(document.as_bytes()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Line 2: malformed record: ',' expected after '\"', found \"x\""
    );
}

#[test]
fn test_quoted_fields_with_embedded_delimiters_are_well_formed() {
    let outcome = common::validate_rows(&["FOO,\"/Applications/My, Tool.app\",\"-a \"\"b\"\"\",TEXT,Mac,grp"]);

    assert!(outcome.is_valid(), "errors: {:?}", common::error_messages(&outcome));
}

#[test]
fn test_multiline_quoted_field_keeps_following_line_numbers() {
    let outcome = common::validate_rows(&[
        "FOO,/bin/foo,\"--first\n--second\",TEXT,Mac,grp",
        "BAR,,,TEXT,Mac,grp",
    ]);

    assert_eq!(common::error_messages(&outcome), vec!["Line 4: path is empty"]);
}

#[test]
fn test_empty_input_has_no_header() {
    let error = validate_reader("".as_bytes()).unwrap_err();
    assert!(matches!(error, FormatError::EmptyInput));
}

#[test]
fn test_invalid_utf8_is_a_format_error() {
    let mut document = common::csv_document(&[]).into_bytes();
    document.extend_from_slice(b"FOO,/bin/\xff,,TEXT,Mac,grp\n");

    let error = validate_reader(document.as_slice()).unwrap_err();
    assert!(matches!(error, FormatError::Csv(_)), "{error:?}");
}

#[test]
fn test_crlf_line_endings_are_accepted() {
    let document = "name,path,arguments,file_types,os,group_name\r\nFOO,/bin/foo,,TEXT,Mac,grp\r\n";
    let outcome = validate_reader(document.as_bytes()).unwrap();

    assert!(outcome.is_valid());
    assert_eq!(outcome.rows_checked, 1);
}
