// vim: tw=80
//! Yield steps: passing configured values to a caller-supplied block.

use standin::{vals, Mock, MockError, Value};

#[test]
fn yields_to_the_callers_block() {
    let m = Mock::new();
    m.expect("each").yields(vals![7]);
    for _ in 0..2 {
        let got = m
            .call_with_block("each", vals![], |vs| vs[0].clone())
            .unwrap();
        assert_eq!(Value::Int(7), got);
    }
    m.verify().unwrap();
}

#[test]
fn yields_multiple_values_at_once() {
    let m = Mock::new();
    m.expect("each").yields(vals![1, 2]).once();
    let got = m.call_with_block("each", vals![], Value::List).unwrap();
    assert_eq!(Value::List(vals![1, 2]), got);
    m.verify().unwrap();
}

#[test]
fn yield_without_a_block_is_an_error() {
    let m = Mock::new();
    m.expect("each").yields(vals![1]);
    let err = m.call("each", vals![]).unwrap_err();
    assert!(matches!(err, MockError::NoBlockGiven { .. }));
    assert!(err.to_string().contains("no block given"));
}

#[test]
fn yield_and_return_happen_in_one_call() {
    let m = Mock::new();
    m.expect("each").yields(vals!["yld"]).once().returns("ret");
    let mut yielded = None;
    let got = m
        .call_with_block("each", vals![], |vs| {
            yielded = Some(vs[0].clone());
            Value::Nil
        })
        .unwrap();
    assert_eq!(Value::from("ret"), got);
    assert_eq!(Some(Value::from("yld")), yielded);
    m.verify().unwrap();
}

#[test]
fn without_a_return_program_the_block_result_is_returned() {
    let m = Mock::new();
    m.expect("each").yields(vals![2]);
    let got = m
        .call_with_block("each", vals![], |vs| {
            if let Value::Int(i) = vs[0] {
                Value::Int(i * 10)
            } else {
                Value::Nil
            }
        })
        .unwrap();
    assert_eq!(Value::Int(20), got);
}

#[test]
fn yield_sets_advance_and_the_last_repeats() {
    let m = Mock::new();
    m.expect("each").yields(vals![1]).yields(vals![2]);
    let mut seen = Vec::new();
    for _ in 0..4 {
        m.call_with_block("each", vals![], |vs| {
            seen.push(vs[0].clone());
            Value::Nil
        })
        .unwrap();
    }
    assert_eq!(vals![1, 2, 2, 2], seen);
}

#[test]
fn yielding_and_non_yielding_expectations_alternate() {
    let m = Mock::new();
    m.expect("hi").yields(vals!["a"]).once();
    m.expect("hi").returns("b").once();
    m.expect("hi").yields(vals!["c"]).once();

    let got = m
        .call_with_block("hi", vals![], |vs| vs[0].clone())
        .unwrap();
    assert_eq!(Value::from("a"), got);
    assert_eq!(Value::from("b"), m.call("hi", vals![]).unwrap());
    let got = m
        .call_with_block("hi", vals![], |vs| vs[0].clone())
        .unwrap();
    assert_eq!(Value::from("c"), got);
    m.verify().unwrap();
}
