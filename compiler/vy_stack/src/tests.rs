use super::*;

#[test]
fn passes_through_the_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| "done"), "done");
    let parsed: Result<u8, String> = ensure_sufficient_stack(|| "7".parse().map_err(|_| String::new()));
    assert_eq!(parsed, Ok(7));
}

#[test]
fn nested_brackets_do_not_overflow() {
    fn depth(chars: &[u8]) -> usize {
        ensure_sufficient_stack(|| match chars.split_first() {
            Some((b'(', rest)) => depth(rest) + 1,
            _ => 0,
        })
    }

    let source = vec![b'('; 50_000];
    assert_eq!(depth(&source), 50_000);
}
