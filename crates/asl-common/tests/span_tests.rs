use asl_common::Span;

#[test]
fn new_and_len() {
    let span = Span::new(3, 10);
    assert_eq!(span.len(), 7);
    assert!(!span.is_empty());
}

#[test]
fn empty_span_at_position() {
    let span = Span::at(5);
    assert_eq!(span.start, 5);
    assert_eq!(span.end, 5);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
}

#[test]
fn from_len() {
    let span = Span::from_len(4, 3);
    assert_eq!(span, Span::new(4, 7));
}

#[test]
fn contains_is_half_open() {
    let span = Span::new(2, 5);
    assert!(!span.contains(1));
    assert!(span.contains(2));
    assert!(span.contains(4));
    assert!(!span.contains(5));
}

#[test]
fn merge_covers_both() {
    let a = Span::new(2, 5);
    let b = Span::new(8, 12);
    assert_eq!(a.merge(b), Span::new(2, 12));
    assert_eq!(b.merge(a), Span::new(2, 12));
}
