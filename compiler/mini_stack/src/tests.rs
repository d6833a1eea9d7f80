use super::*;

#[test]
fn passes_the_result_through() {
    let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("nope"));
    assert_eq!(result, Err("nope"));
}

#[test]
fn nesting_far_past_the_native_stack() {
    fn nest(n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            ensure_sufficient_stack(|| nest(n - 1) + 1)
        }
    }
    assert_eq!(nest(200_000), 200_000);
}
