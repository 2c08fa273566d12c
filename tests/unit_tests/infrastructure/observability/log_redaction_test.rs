use ai_doctor::infrastructure::observability::summarize_for_log;

#[test]
fn given_short_text_when_summarizing_then_returned_trimmed() {
    assert_eq!(summarize_for_log("  sore throat  "), "sore throat");
}

#[test]
fn given_blank_text_when_summarizing_then_marked_empty() {
    assert_eq!(summarize_for_log("   "), "[EMPTY]");
}

#[test]
fn given_long_text_when_summarizing_then_truncated_with_length() {
    let text = "a".repeat(200);

    let summary = summarize_for_log(&text);

    assert!(summary.starts_with(&"a".repeat(80)));
    assert!(summary.ends_with("... (200 chars total)"));
}

#[test]
fn given_multibyte_text_when_truncating_then_does_not_split_characters() {
    let text = "é".repeat(100);

    let summary = summarize_for_log(&text);

    assert!(summary.starts_with(&"é".repeat(80)));
}

#[test]
fn given_bearer_token_when_summarizing_then_value_is_redacted() {
    let summary = summarize_for_log("header Bearer gsk_secret123 end");

    assert_eq!(summary, "header Bearer [REDACTED] end");
}

#[test]
fn given_api_key_parameter_when_summarizing_then_value_is_redacted() {
    let summary = summarize_for_log("url?api_key=abc&lang=en");

    assert_eq!(summary, "url?api_key=[REDACTED]&lang=en");
}
