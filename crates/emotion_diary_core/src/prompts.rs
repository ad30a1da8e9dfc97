//! crates/emotion_diary_core/src/prompts.rs
//!
//! Prompt templates for the diary companion. Each builder substitutes the
//! caller's values verbatim into a fixed Korean template and returns the
//! messages to send to the completion model.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

/// An ordered, single-use conversation handed to a `CompletionService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub messages: Vec<PromptMessage>,
}

impl Prompt {
    fn single(content: String) -> Self {
        Self {
            messages: vec![PromptMessage {
                role: PromptRole::User,
                content,
            }],
        }
    }
}

/// Asks for comforting feedback on one diary entry.
pub fn feedback_prompt(content: &str, emotion: &str) -> Prompt {
    Prompt::single(format!(
        "사용자가 {emotion}의 감정을 느끼며 쓴 일기입니다:\n\"{content}\"\n이 내용을 읽고 진심 어린 피드백과 위로 또는 조언을 해주세요."
    ))
}

/// Asks for one song (with a YouTube link) that fits the emotion.
pub fn music_prompt(emotion: &str) -> Prompt {
    Prompt::single(format!(
        "기분이 {emotion}일 때 듣기 좋은 노래 1곡을 추천하고, 유튜브 링크도 함께 제공해주세요."
    ))
}

/// Asks for insight on how often each emotion was logged.
pub fn analysis_prompt(emotion_counts: &Map<String, Value>) -> Prompt {
    let stats = emotion_stats(emotion_counts);
    Prompt::single(format!(
        "사용자의 감정 일기 분석 결과는 다음과 같습니다: {stats}. 이를 바탕으로 감정 흐름에 대한 간단한 통찰과 조언을 제공해주세요."
    ))
}

/// Two-turn counselling prompt: the diary as system context, then the user's message.
pub fn chat_prompt(message: &str, emotion: &str, content: &str) -> Prompt {
    Prompt {
        messages: vec![
            PromptMessage {
                role: PromptRole::System,
                content: format!(
                    "너는 감정 상담사야. 사용자의 감정은 \"{emotion}\"이고, 아래는 사용자가 쓴 일기야:\n\"{content}\". 이 정보를 바탕으로 공감하며 따뜻한 말과 상담을 이어가."
                ),
            },
            PromptMessage {
                role: PromptRole::User,
                content: message.to_string(),
            },
        ],
    }
}

/// Renders `label: count회` pairs in the map's iteration order.
pub fn emotion_stats(emotion_counts: &Map<String, Value>) -> String {
    emotion_counts
        .iter()
        .map(|(label, count)| format!("{label}: {}회", display_value(count)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Text substituted into a template for a request value. Strings go in raw,
/// not JSON-quoted; every other value uses its JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A request value that counts as present: not absent, null, false, 0 or "".
pub fn truthy(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn counts(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn feedback_prompt_embeds_emotion_and_content() {
        let prompt = feedback_prompt("시험을 잘 봤다", "행복");

        assert_eq!(prompt.messages.len(), 1);
        assert_eq!(prompt.messages[0].role, PromptRole::User);
        assert_eq!(
            prompt.messages[0].content,
            "사용자가 행복의 감정을 느끼며 쓴 일기입니다:\n\"시험을 잘 봤다\"\n이 내용을 읽고 진심 어린 피드백과 위로 또는 조언을 해주세요."
        );
    }

    #[test]
    fn music_prompt_embeds_emotion() {
        let prompt = music_prompt("행복");
        assert!(prompt.messages[0].content.contains("기분이 행복일 때"));
    }

    #[test]
    fn stats_follow_input_order() {
        let map = counts(json!({ "happy": 3, "sad": 1 }));
        assert_eq!(emotion_stats(&map), "happy: 3회, sad: 1회");

        let reversed = counts(json!({ "sad": 1, "happy": 3 }));
        assert_eq!(emotion_stats(&reversed), "sad: 1회, happy: 3회");
    }

    #[test]
    fn stats_render_string_counts_unquoted() {
        let map = counts(json!({ "분노": "2" }));
        assert_eq!(emotion_stats(&map), "분노: 2회");
    }

    #[test]
    fn display_value_leaves_strings_unquoted() {
        assert_eq!(display_value(&json!("슬픔")), "슬픔");
        assert_eq!(display_value(&json!(5)), "5");
        assert_eq!(display_value(&json!(true)), "true");
    }

    #[test]
    fn truthy_drops_empty_and_falsy_values() {
        for falsy in [json!(null), json!(false), json!(0), json!("")] {
            assert_eq!(truthy(Some(&falsy)), None, "{falsy} should be falsy");
        }
        assert_eq!(truthy(None), None);
        assert_eq!(truthy(Some(&json!("슬픔"))), Some(&json!("슬픔")));
        assert_eq!(truthy(Some(&json!(7))), Some(&json!(7)));
    }

    #[test]
    fn analysis_prompt_contains_stats() {
        let prompt = analysis_prompt(&counts(json!({ "happy": 3, "sad": 1 })));
        assert!(prompt.messages[0]
            .content
            .contains("다음과 같습니다: happy: 3회, sad: 1회. 이를 바탕으로"));
    }

    #[test]
    fn chat_prompt_puts_diary_in_system_turn() {
        let prompt = chat_prompt("안녕", "슬픔", "오늘 힘들었다");

        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.messages[0].role, PromptRole::System);
        assert!(prompt.messages[0].content.contains("사용자의 감정은 \"슬픔\"이고"));
        assert!(prompt.messages[0].content.contains("\"오늘 힘들었다\"."));
        assert_eq!(
            prompt.messages[1],
            PromptMessage {
                role: PromptRole::User,
                content: "안녕".to_string(),
            }
        );
    }
}
