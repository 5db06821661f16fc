use super::*;
use serde_json::json;

// =============================================================================
// LlmError::error_code / retryable
// =============================================================================

#[test]
fn error_codes_are_stable() {
    assert_eq!(LlmError::MissingApiKey { var: "K".into() }.error_code(), "E_MISSING_API_KEY");
    assert_eq!(LlmError::ApiRequest("timeout".into()).error_code(), "E_API_REQUEST");
    assert_eq!(LlmError::ApiResponse { status: 500, body: String::new() }.error_code(), "E_API_RESPONSE");
    assert_eq!(LlmError::ApiParse("json".into()).error_code(), "E_API_PARSE");
    assert_eq!(LlmError::HttpClientBuild("tls".into()).error_code(), "E_HTTP_CLIENT_BUILD");
    assert_eq!(LlmError::EmptyCompletion.error_code(), "E_EMPTY_COMPLETION");
}

#[test]
fn retryable_transport_and_server_errors() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::ApiResponse { status: 401, body: String::new() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::EmptyCompletion.retryable());
}

#[test]
fn display_missing_api_key_names_var() {
    let err = LlmError::MissingApiKey { var: "MY_KEY".into() };
    assert!(err.to_string().contains("MY_KEY"));
}

// =============================================================================
// Message serialization
// =============================================================================

#[test]
fn system_message_serializes_plain_string_content() {
    let value = serde_json::to_value(Message::system("be terse")).unwrap();
    assert_eq!(value, json!({ "role": "system", "content": "be terse" }));
}

#[test]
fn user_parts_serialize_as_typed_list() {
    let msg = Message::user_parts(vec![
        ContentPart::text("a hero banner"),
        ContentPart::image_url("data:image/png;base64,AAAA"),
    ]);
    let value = serde_json::to_value(msg).unwrap();
    assert_eq!(
        value,
        json!({
            "role": "user",
            "content": [
                { "type": "text", "text": "a hero banner" },
                { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
            ]
        })
    );
}

#[test]
fn untagged_content_deserializes_both_shapes() {
    let text: Message = serde_json::from_value(json!({ "role": "assistant", "content": "hi" })).unwrap();
    assert_eq!(text.content, MessageContent::Text("hi".into()));

    let parts: Message =
        serde_json::from_value(json!({ "role": "user", "content": [{ "type": "text", "text": "x" }] })).unwrap();
    assert_eq!(parts.content, MessageContent::Parts(vec![ContentPart::text("x")]));
}

#[test]
fn tool_choice_serializes_lowercase() {
    assert_eq!(serde_json::to_value(ToolChoice::None).unwrap(), json!("none"));
    assert_eq!(serde_json::to_value(ToolChoice::Required).unwrap(), json!("required"));
}

// =============================================================================
// Choice
// =============================================================================

#[test]
fn choice_deserializes_null_content() {
    let choice: Choice = serde_json::from_value(json!({
        "index": 0,
        "message": { "role": "assistant", "content": null },
        "finish_reason": "stop"
    }))
    .unwrap();
    assert_eq!(choice.message.content, None);
}

#[test]
fn choice_assistant_helper() {
    let choice = Choice::assistant("ok");
    assert_eq!(choice.message.role, Role::Assistant);
    assert_eq!(choice.message.content.as_deref(), Some("ok"));
    assert_eq!(choice.finish_reason.as_deref(), Some("stop"));
}
