use super::*;

// ===== parse_response =====

#[test]
fn parse_text_response() {
    let json = serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": "亲，有货的哦！✨" }]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 9, "totalTokenCount": 21 }
    })
    .to_string();
    let reply = parse_response(&json).unwrap();
    assert_eq!(reply.text, "亲，有货的哦！✨");
    assert_eq!(reply.input_tokens, 12);
    assert_eq!(reply.output_tokens, 9);
}

#[test]
fn parse_joins_multiple_parts() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "亲，" }, { "text": "收到~" }] }
        }]
    })
    .to_string();
    let reply = parse_response(&json).unwrap();
    assert_eq!(reply.text, "亲，收到~");
}

#[test]
fn parse_no_candidates_yields_empty_text() {
    // Safety-blocked or otherwise empty responses carry no candidates; the
    // session layer turns the empty text into its canned reply.
    let json = serde_json::json!({
        "promptFeedback": { "blockReason": "SAFETY" }
    })
    .to_string();
    let reply = parse_response(&json).unwrap();
    assert_eq!(reply.text, "");
    assert_eq!(reply.input_tokens, 0);
}

#[test]
fn parse_candidate_without_content_yields_empty_text() {
    let json = serde_json::json!({
        "candidates": [{ "finishReason": "MAX_TOKENS" }]
    })
    .to_string();
    let reply = parse_response(&json).unwrap();
    assert_eq!(reply.text, "");
}

#[test]
fn parse_malformed_body_is_error() {
    assert!(matches!(parse_response("not json"), Err(LlmError::ApiParse(_))));
}

// ===== wire request shape =====

#[test]
fn request_serializes_camel_case_fields() {
    let history = vec![ChatTurn::user("你好"), ChatTurn::model("亲，您好！")];
    let contents: Vec<WireContent<'_>> = history.iter().map(WireContent::from).collect();
    let body = ApiRequest {
        system_instruction: WireSystem { parts: vec![WirePart { text: "persona" }] },
        contents,
        generation_config: WireGenerationConfig { temperature: 0.7 },
    };

    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["systemInstruction"]["parts"][0]["text"], "persona");
    assert_eq!(value["contents"][0]["role"], "user");
    assert_eq!(value["contents"][1]["role"], "model");
    assert_eq!(value["contents"][1]["parts"][0]["text"], "亲，您好！");
    assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
}
