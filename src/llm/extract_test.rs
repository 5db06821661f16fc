use super::*;

#[test]
fn fenced_json_block_is_unwrapped() {
    let choices = [Choice::assistant("```json\n{\"children\":[]}\n```")];
    assert_eq!(extract_code(&choices).unwrap(), "{\"children\":[]}");
}

#[test]
fn prose_around_fence_is_dropped() {
    let choices = [Choice::assistant(
        "Here is your component:\n\n```vue\n<script setup>\nconst n = 1\n</script>\n```\n\nEnjoy!",
    )];
    assert_eq!(extract_code(&choices).unwrap(), "<script setup>\nconst n = 1\n</script>");
}

#[test]
fn fence_without_language_tag() {
    let choices = [Choice::assistant("```\nplain\n```")];
    assert_eq!(extract_code(&choices).unwrap(), "plain");
}

#[test]
fn first_fenced_block_wins() {
    let choices = [Choice::assistant("```json\n{\"a\":1}\n```\nor\n```json\n{\"b\":2}\n```")];
    assert_eq!(extract_code(&choices).unwrap(), "{\"a\":1}");
}

#[test]
fn unfenced_reply_is_returned_trimmed() {
    let choices = [Choice::assistant("  {\"children\":[]}\n")];
    assert_eq!(extract_code(&choices).unwrap(), "{\"children\":[]}");
}

#[test]
fn unclosed_fence_falls_back_to_whole_reply() {
    let choices = [Choice::assistant("```json\n{\"children\":[]}")];
    assert_eq!(extract_code(&choices).unwrap(), "```json\n{\"children\":[]}");
}

#[test]
fn only_first_choice_is_considered() {
    let choices = [Choice::assistant("first"), Choice::assistant("```\nsecond\n```")];
    assert_eq!(extract_code(&choices).unwrap(), "first");
}

#[test]
fn no_choices_is_empty_completion() {
    assert!(matches!(extract_code(&[]), Err(LlmError::EmptyCompletion)));
}

#[test]
fn null_or_blank_content_is_empty_completion() {
    let mut null_choice = Choice::assistant("");
    null_choice.message.content = None;
    assert!(matches!(extract_code(&[null_choice]), Err(LlmError::EmptyCompletion)));
    assert!(matches!(extract_code(&[Choice::assistant("  \n ")]), Err(LlmError::EmptyCompletion)));
}
