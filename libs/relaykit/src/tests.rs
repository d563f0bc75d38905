use crate::filter::FilterOp;
use crate::pagination::{parse_pagination, ConnectionArgs, PaginationMeta};
use crate::{base64_url, Cursor, Error, ScalarValue};

#[test]
fn cursor_round_trip_int_secondary() {
    // Arrange
    let cursor = Cursor::new(42, ScalarValue::Int(42), "sequenceId");

    // Act
    let token = cursor.encode().unwrap();
    let decoded = Cursor::decode(&token).unwrap();

    // Assert
    assert_eq!(decoded, cursor);
}

#[test]
fn cursor_round_trip_string_secondary() {
    // Arrange
    let cursor = Cursor::new(7, ScalarValue::String("A Wild Sheep Chase".to_owned()), "title");

    // Act
    let token = cursor.encode().unwrap();
    let decoded = Cursor::decode(&token).unwrap();

    // Assert
    assert_eq!(decoded.primary, 7);
    assert_eq!(
        decoded.secondary,
        ScalarValue::String("A Wild Sheep Chase".to_owned())
    );
    assert_eq!(decoded.sort_key, "title");
}

#[test]
fn cursor_decode_rejects_invalid_base64() {
    // Act
    let err = Cursor::decode("!!not base64!!").unwrap_err();

    // Assert
    assert_eq!(err, Error::InvalidCursor);
}

#[test]
fn cursor_decode_rejects_incomplete_payload() {
    // Arrange: valid base64url, but not the cursor wire shape
    let token = base64_url::encode(br#"{"p": 3}"#);

    // Act
    let err = Cursor::decode(&token).unwrap_err();

    // Assert
    assert_eq!(err, Error::InvalidCursor);
}

#[test]
fn cursor_decode_rejects_unsupported_version() {
    // Arrange
    let token = base64_url::encode(br#"{"v":2,"p":3,"s":3,"k":"sequenceId"}"#);

    // Act
    let err = Cursor::decode(&token).unwrap_err();

    // Assert
    assert_eq!(err, Error::InvalidCursor);
}

#[test]
fn parse_pagination_forward_with_first() {
    // Arrange
    let args = ConnectionArgs::new().with_first(10);

    // Act
    let meta = parse_pagination(&args).unwrap();

    // Assert
    assert_eq!(
        meta,
        PaginationMeta::Forward {
            first: 10,
            after: None
        }
    );
}

#[test]
fn parse_pagination_forward_with_first_and_after() {
    // Arrange
    let args = ConnectionArgs::new().with_first(5).with_after("opaque");

    // Act
    let meta = parse_pagination(&args).unwrap();

    // Assert
    assert_eq!(
        meta,
        PaginationMeta::Forward {
            first: 5,
            after: Some("opaque".to_owned())
        }
    );
}

#[test]
fn parse_pagination_backward_with_last_and_before() {
    // Arrange
    let args = ConnectionArgs::new().with_last(3).with_before("opaque");

    // Act
    let meta = parse_pagination(&args).unwrap();

    // Assert
    assert_eq!(
        meta,
        PaginationMeta::Backward {
            last: 3,
            before: "opaque".to_owned()
        }
    );
}

#[test]
fn parse_pagination_requires_first_or_last() {
    // Act
    let err = parse_pagination(&ConnectionArgs::new()).unwrap_err();

    // Assert
    assert!(matches!(err, Error::InvalidPaginationArgument(_)));
}

#[test]
fn parse_pagination_treats_zero_first_as_absent() {
    // Arrange
    let args = ConnectionArgs::new().with_first(0);

    // Act
    let err = parse_pagination(&args).unwrap_err();

    // Assert
    assert!(matches!(err, Error::InvalidPaginationArgument(_)));
}

#[test]
fn parse_pagination_rejects_both_directions() {
    // Arrange
    let args = ConnectionArgs::new().with_first(2).with_last(2).with_before("x");

    // Act
    let err = parse_pagination(&args).unwrap_err();

    // Assert
    assert!(matches!(err, Error::InvalidPagination(_)));
}

#[test]
fn parse_pagination_rejects_first_with_before() {
    // Arrange: `before` is a backward signal, so this is a direction clash
    let args = ConnectionArgs::new().with_first(2).with_before("x");

    // Act
    let err = parse_pagination(&args).unwrap_err();

    // Assert
    assert!(matches!(err, Error::InvalidPagination(_)));
}

#[test]
fn parse_pagination_rejects_negative_first() {
    // Arrange
    let args = ConnectionArgs::new().with_first(-1);

    // Act
    let err = parse_pagination(&args).unwrap_err();

    // Assert
    assert!(matches!(err, Error::InvalidPagination(_)));
}

#[test]
fn parse_pagination_rejects_negative_last() {
    // Arrange
    let args = ConnectionArgs::new().with_last(-2).with_before("x");

    // Act
    let err = parse_pagination(&args).unwrap_err();

    // Assert
    assert!(matches!(err, Error::InvalidPagination(_)));
}

#[test]
fn parse_pagination_backward_requires_before() {
    // Arrange
    let args = ConnectionArgs::new().with_last(3);

    // Act
    let err = parse_pagination(&args).unwrap_err();

    // Assert
    assert!(matches!(err, Error::InvalidPaginationArgument(_)));
}

#[test]
fn filter_op_names_round_trip() {
    // Arrange
    let ops = [
        FilterOp::Is,
        FilterOp::Not,
        FilterOp::In,
        FilterOp::NotIn,
        FilterOp::Lt,
        FilterOp::Lte,
        FilterOp::Gt,
        FilterOp::Gte,
        FilterOp::Contains,
        FilterOp::NotContains,
        FilterOp::StartsWith,
        FilterOp::NotStartsWith,
        FilterOp::EndsWith,
        FilterOp::NotEndsWith,
        FilterOp::Search,
    ];

    // Act + Assert
    for op in ops {
        assert_eq!(FilterOp::from_name(op.name()), Some(op));
    }
}

#[test]
fn filter_op_unknown_name_resolves_to_none() {
    // Act + Assert
    assert_eq!(FilterOp::from_name("matchesRegex"), None);
}
