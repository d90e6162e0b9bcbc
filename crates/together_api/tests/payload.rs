use serde_json::{json, Value};
use together_api::{ChatRequest, ChatResponse, WireMessage};

#[test]
fn payload_serialization_defaults_match_completions_shape() {
    let request = ChatRequest::new(
        "meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo",
        vec![WireMessage::system("sys"), WireMessage::user("hi")],
    );
    let body = serde_json::to_value(&request).expect("serialize payload");

    assert_eq!(body["stream"], Value::Bool(false));
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "hi");
    assert!(body.get("temperature").is_none());
    assert!(body.get("max_tokens").is_none());
}

#[test]
fn payload_serialization_includes_optional_fields_when_set() {
    let mut request = ChatRequest::new("some-model", vec![WireMessage::user("hi")]);
    request.temperature = Some(0.2);
    request.max_tokens = Some(512);

    let body = serde_json::to_value(&request).expect("serialize payload");
    assert_eq!(body["temperature"], json!(0.2));
    assert_eq!(body["max_tokens"], json!(512));
}

#[test]
fn response_first_content_returns_first_choice_text() {
    let body = json!({
        "id": "cmpl-1",
        "model": "some-model",
        "choices": [
            {"message": {"role": "assistant", "content": "Here are options..."}, "finish_reason": "stop"},
            {"message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
        ]
    });

    let response: ChatResponse = serde_json::from_value(body).expect("parse response");
    assert_eq!(response.first_content(), Some("Here are options..."));
}

#[test]
fn response_first_content_is_none_without_choices_or_content() {
    let empty: ChatResponse =
        serde_json::from_value(json!({"choices": []})).expect("parse response");
    assert_eq!(empty.first_content(), None);

    let null_content: ChatResponse = serde_json::from_value(json!({
        "choices": [{"message": {"role": "assistant", "content": null}}]
    }))
    .expect("parse response");
    assert_eq!(null_content.first_content(), None);
}
