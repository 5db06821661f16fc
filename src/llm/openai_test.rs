use super::*;
use crate::llm::types::{ContentPart, Role};
use serde_json::json;

fn request(tools: Vec<Tool>, tool_choice: ToolChoice) -> ChatRequest {
    ChatRequest {
        messages: vec![
            Message::system("you write pages"),
            Message::user_parts(vec![ContentPart::text("a pricing table")]),
        ],
        tools,
        model: "gpt-4-turbo".into(),
        tool_choice,
    }
}

// ===== request body =====

#[test]
fn body_without_tools_omits_tools_and_tool_choice() {
    let req = request(Vec::new(), ToolChoice::None);
    let value = serde_json::to_value(CcRequest::from(&req)).unwrap();
    assert_eq!(
        value,
        json!({
            "model": "gpt-4-turbo",
            "messages": [
                { "role": "system", "content": "you write pages" },
                { "role": "user", "content": [{ "type": "text", "text": "a pricing table" }] }
            ]
        })
    );
}

#[test]
fn body_with_tools_carries_function_defs_and_choice() {
    let tool = Tool {
        name: "lookup".into(),
        description: "Look something up".into(),
        input_schema: json!({ "type": "object" }),
    };
    let req = request(vec![tool], ToolChoice::Required);
    let value = serde_json::to_value(CcRequest::from(&req)).unwrap();
    assert_eq!(value["tool_choice"], json!("required"));
    assert_eq!(value["tools"][0]["type"], json!("function"));
    assert_eq!(value["tools"][0]["function"]["name"], json!("lookup"));
    assert_eq!(value["tools"][0]["function"]["parameters"], json!({ "type": "object" }));
}

// ===== response parsing =====

#[test]
fn parse_text_response() {
    let body = json!({
        "model": "gpt-4-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "```json\n{}\n```" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let choices = parse_chat_completions_response(&body).unwrap();
    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0].message.role, Role::Assistant);
    assert_eq!(choices[0].message.content.as_deref(), Some("```json\n{}\n```"));
    assert_eq!(choices[0].finish_reason.as_deref(), Some("stop"));
}

#[test]
fn parse_keeps_every_choice_in_order() {
    let body = json!({
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": "first" } },
            { "index": 1, "message": { "role": "assistant", "content": "second" } }
        ]
    })
    .to_string();
    let choices = parse_chat_completions_response(&body).unwrap();
    assert_eq!(choices.len(), 2);
    assert_eq!(choices[1].index, 1);
    assert_eq!(choices[1].message.content.as_deref(), Some("second"));
}

#[test]
fn parse_empty_choices_is_ok() {
    let body = json!({ "model": "gpt-4-turbo", "choices": [] }).to_string();
    assert!(parse_chat_completions_response(&body).unwrap().is_empty());
}

#[test]
fn parse_missing_choices_errors() {
    let body = json!({ "model": "gpt-4-turbo" }).to_string();
    assert!(matches!(parse_chat_completions_response(&body), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_non_json_errors() {
    assert!(matches!(parse_chat_completions_response("<html>"), Err(LlmError::ApiParse(_))));
}

// ===== client =====

#[test]
fn client_builds_with_default_timeouts() {
    assert!(OpenAiClient::new(LlmTimeouts::default()).is_ok());
}

#[tokio::test]
async fn chat_against_closed_port_is_request_error() {
    let client = OpenAiClient::new(LlmTimeouts { request_secs: 2, connect_secs: 1 }).unwrap();
    let config = ApiConfig::new("sk-test", "http://127.0.0.1:1/v1");
    let err = client
        .chat(&request(Vec::new(), ToolChoice::None), &config)
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
}
