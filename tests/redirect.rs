// vim: tw=80
//! Ambient function redirection: routing free-function names to mocks.

use standin::{args, redirect, use_mock, vals, Mock, MockError, Value};

#[test]
fn an_installed_redirect_routes_to_the_mock() {
    use_mock("m", |m| {
        redirect::install("fetch_rate", m);
        m.expect("fetch_rate").with(args!["EUR"]).returns(1.08);
        assert_eq!(
            Value::Float(1.08),
            redirect::call("fetch_rate", vals!["EUR"])?
        );
        Ok(())
    })
    .unwrap();
}

#[test]
fn redirects_are_removed_at_teardown() {
    use_mock("m", |m| {
        redirect::install("fetch_rate", m);
        m.expect("fetch_rate").returns(1).zero_or_more_times();
        assert!(redirect::is_installed("fetch_rate"));
        Ok(())
    })
    .unwrap();
    assert!(!redirect::is_installed("fetch_rate"));
    let err = redirect::call("fetch_rate", vals![]).unwrap_err();
    assert!(matches!(err, MockError::NoSuchExpectation { .. }));
}

#[test]
fn redirected_calls_support_blocks() {
    use_mock("m", |m| {
        redirect::install("each_row", m);
        m.expect("each_row").yields(vals![1]).yields(vals![2]);
        let mut seen = Vec::new();
        for _ in 0..2 {
            redirect::call_with_block("each_row", vals![], |vs| {
                seen.push(vs[0].clone());
                Value::Nil
            })?;
        }
        assert_eq!(vals![1, 2], seen);
        Ok(())
    })
    .unwrap();
}

#[test]
fn redirected_calls_count_toward_verification() {
    let err = use_mock("m", |m| {
        redirect::install("notify", m);
        m.expect("notify").times(2);
        redirect::call("notify", vals![])?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(err, MockError::WrongCallCount { .. }));
}

#[test]
fn a_mock_only_removes_its_own_redirects() {
    // The second mock overwrites the redirect; the first mock's teardown
    // must not tear down the second's registration.
    let first = Mock::named("first");
    first.expect("shared").returns(1);
    redirect::install("shared", &first);

    let second = Mock::named("second");
    second.expect("shared").returns(2);
    redirect::install("shared", &second);

    first.teardown().unwrap();
    assert!(redirect::is_installed("shared"));
    assert_eq!(Value::Int(2), redirect::call("shared", vals![]).unwrap());

    second.teardown().unwrap();
    assert!(!redirect::is_installed("shared"));
}

#[test]
fn distinct_names_route_to_distinct_mocks() {
    standin::use_mocks(&["clock", "random"], |mocks| {
        redirect::install("now", &mocks[0]);
        redirect::install("rand", &mocks[1]);
        mocks[0].expect("now").returns(1000);
        mocks[1].expect("rand").returns(4);
        assert_eq!(Value::Int(1000), redirect::call("now", vals![])?);
        assert_eq!(Value::Int(4), redirect::call("rand", vals![])?);
        Ok(())
    })
    .unwrap();
}
