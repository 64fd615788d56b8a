use lsa_provider::mean_output_logprob;

#[test]
fn boundary_is_last_offset_within_prompt_length() {
    // Offsets [0, 5, 12] with a prompt of length 10: offset 5 is the last
    // one not exceeding the prompt, so the mean covers indices 1 and 2.
    let offsets = vec![0, 5, 12];
    let logprobs = vec![Some(-3.0), Some(-1.0), Some(-2.0)];
    let mean = mean_output_logprob(10, &offsets, &logprobs).unwrap();
    assert!((mean - (-1.5)).abs() < 1e-12);
}

#[test]
fn offset_equal_to_prompt_length_counts_as_boundary() {
    let offsets = vec![0, 10, 14];
    let logprobs = vec![Some(-9.0), Some(-2.0), Some(-4.0)];
    let mean = mean_output_logprob(10, &offsets, &logprobs).unwrap();
    assert!((mean - (-3.0)).abs() < 1e-12);
}

#[test]
fn single_token_payload_averages_itself() {
    let offsets = vec![0];
    let logprobs = vec![Some(-0.25)];
    let mean = mean_output_logprob(10, &offsets, &logprobs).unwrap();
    assert!((mean - (-0.25)).abs() < 1e-12);
}

#[test]
fn empty_offsets_fail_loudly() {
    let err = mean_output_logprob(10, &[], &[]).unwrap_err();
    assert_eq!(err.info().code, "provider.malformed-logprobs");
}

#[test]
fn mismatched_lengths_fail_loudly() {
    let offsets = vec![0, 5];
    let logprobs = vec![Some(-1.0)];
    let err = mean_output_logprob(10, &offsets, &logprobs).unwrap_err();
    assert_eq!(err.info().code, "provider.malformed-logprobs");
}

#[test]
fn all_offsets_past_prompt_fail_loudly() {
    let offsets = vec![11, 14];
    let logprobs = vec![Some(-1.0), Some(-1.0)];
    let err = mean_output_logprob(10, &offsets, &logprobs).unwrap_err();
    assert_eq!(err.info().code, "provider.malformed-logprobs");
}

#[test]
fn null_logprob_in_output_range_fails_loudly() {
    let offsets = vec![0, 5, 12];
    let logprobs = vec![Some(-1.0), None, Some(-2.0)];
    let err = mean_output_logprob(10, &offsets, &logprobs).unwrap_err();
    assert_eq!(err.info().code, "provider.malformed-logprobs");
}

#[test]
fn null_logprob_before_boundary_is_ignored() {
    // Prompt-internal tokens may report null; only the output range matters.
    let offsets = vec![0, 5, 12];
    let logprobs = vec![None, Some(-1.0), Some(-3.0)];
    let mean = mean_output_logprob(10, &offsets, &logprobs).unwrap();
    assert!((mean - (-2.0)).abs() < 1e-12);
}
