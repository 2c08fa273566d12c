mod log_redaction_test;
