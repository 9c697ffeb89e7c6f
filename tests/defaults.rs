// vim: tw=80
//! Default behavior: a bare expectation accepts anything and returns nil;
//! strict mocks reject undeclared methods.

use standin::{use_mock, vals, Mock, MockError};

#[test]
fn bare_expectation_accepts_anything() {
    use_mock("m", |m| {
        m.expect("hi");
        assert!(m.call("hi", vals![])?.is_nil());
        assert!(m.call("hi", vals![1])?.is_nil());
        assert!(m.call("hi", vals!["hello", 2])?.is_nil());
        Ok(())
    })
    .unwrap();
}

#[test]
fn undeclared_method_is_an_error() {
    let m = Mock::named("strict");
    let err = m.call("nope", vals![]).unwrap_err();
    assert_eq!(
        MockError::NoSuchExpectation {
            mock: "strict".into(),
            method: "nope".into(),
        },
        err
    );
}

#[test]
fn lenient_mock_returns_nil_for_undeclared_methods() {
    let m = Mock::new();
    m.set_lenient(true);
    assert!(m.call("anything", vals![1]).unwrap().is_nil());
    m.verify().unwrap();
}

#[test]
fn declared_expectations_still_match_on_a_lenient_mock() {
    let m = Mock::new();
    m.set_lenient(true);
    m.expect("hi").returns(1);
    assert_eq!("1", m.call("hi", vals![]).unwrap().to_string());
    m.verify().unwrap();
}

#[test]
fn mock_name_appears_in_diagnostics() {
    let m = Mock::named("warehouse");
    assert_eq!("warehouse", m.name());
    let err = m.call("nope", vals![]).unwrap_err();
    assert!(err.to_string().contains("warehouse"));
}

#[test]
fn multi_name_expectations_count_independently() {
    use_mock("m", |m| {
        m.expect_many(&["f", "g"]).with(standin::args![1]).once().returns(5);
        m.call("f", vals![1])?;
        m.call("g", vals![1])?;
        Ok(())
    })
    .unwrap();

    let err = use_mock("m", |m| {
        m.expect_many(&["f", "g"]).once();
        m.call("f", vals![])?;
        Ok(())
    })
    .unwrap_err();
    assert!(err.to_string().contains("g("));
}
