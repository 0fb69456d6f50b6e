//! Tests for DecoratorChain determinism and error handling

use rstest::rstest;

use menudeco::domain::{ContentSource, DecoratorChain, DecoratorKind, DomainError};

use DecoratorKind::{Bold, Italic, Underline};

fn render_after(toggles: &[(DecoratorKind, bool)]) -> String {
    let source = ContentSource::new("text");
    let mut chain = DecoratorChain::new();
    for &(kind, enabled) in toggles {
        chain.set_decorator(kind, enabled).unwrap();
    }
    chain.render(&source)
}

#[rstest]
#[case(&[(Bold, true), (Italic, true), (Underline, true)])]
#[case(&[(Underline, true), (Italic, true), (Bold, true)])]
#[case(&[(Italic, true), (Bold, true), (Underline, true)])]
#[case(&[(Underline, true), (Bold, true), (Bold, false), (Italic, true), (Bold, true)])]
fn given_any_toggle_order_when_all_active_then_same_nesting(#[case] toggles: &[(DecoratorKind, bool)]) {
    assert_eq!(render_after(toggles), "<b><i><u>text</u></i></b>");
}

#[rstest]
#[case(&[(Italic, true), (Underline, true)], "<i><u>text</u></i>")]
#[case(&[(Underline, true), (Italic, true)], "<i><u>text</u></i>")]
#[case(&[(Underline, true), (Bold, true)], "<b><u>text</u></b>")]
#[case(&[(Bold, true), (Bold, false)], "text")]
#[case(&[], "text")]
fn given_toggle_sequence_when_rendering_then_canonical_result(
    #[case] toggles: &[(DecoratorKind, bool)],
    #[case] expected: &str,
) {
    assert_eq!(render_after(toggles), expected);
}

#[rstest]
fn given_composition_example_when_toggling_then_expected_strings() {
    let mut source = ContentSource::default();
    source.set_text("hi");
    let mut chain = DecoratorChain::new();

    chain.set_decorator(Bold, true).unwrap();
    assert_eq!(chain.render(&source), "<b>hi</b>");
    chain.set_decorator(Italic, true).unwrap();
    assert_eq!(chain.render(&source), "<b><i>hi</i></b>");
    chain.set_decorator(Bold, false).unwrap();
    assert_eq!(chain.render(&source), "<i>hi</i>");
}

#[rstest]
fn given_text_change_when_rendering_then_uses_current_text() {
    let mut source = ContentSource::new("before");
    let mut chain = DecoratorChain::new();
    chain.set_decorator(Underline, true).unwrap();
    assert_eq!(chain.render(&source), "<u>before</u>");

    source.set_text("after");
    assert_eq!(chain.render(&source), "<u>after</u>");
}

#[rstest]
fn given_unknown_name_when_toggling_then_error_and_state_unchanged() {
    let mut chain = DecoratorChain::new();
    chain.set_decorator(Italic, true).unwrap();

    let result = chain.set_decorator_by_name("Strikethrough", true);

    assert_eq!(
        result,
        Err(DomainError::UnknownDecoratorKind("Strikethrough".to_string()))
    );
    assert_eq!(chain.active_kinds(), vec![Italic]);
}

#[rstest]
fn given_restricted_registry_when_toggling_unregistered_then_error() {
    let mut chain = DecoratorChain::with_registered([Bold, Italic]);

    assert!(chain.set_decorator(Underline, true).is_err());
    assert!(!chain.is_active(Underline));
    assert_eq!(chain.registered_kinds(), vec![Bold, Italic]);
}
