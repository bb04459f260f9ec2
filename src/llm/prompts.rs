//! 提示词构造

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Calendar, DiaryEntry, Emoticons};

const RECOMMEND_INSTRUCTION: &str = "당신은 사용자의 하루 감정을 분석하고 어울리는 영화, 드라마 또는 예능을 추천하는 상담가입니다. \
먼저 감정을 짧게 요약하고, 응답의 마지막 줄은 반드시 '추천 콘텐츠: <플랫폼> <제목>' 형식으로 작성하세요.";

const SUBSCRIBED_INSTRUCTION: &str = "추천 콘텐츠는 사용자가 구독 중인 플랫폼에서 볼 수 있는 작품으로 한정하세요.";

const CHAT_INSTRUCTION: &str = "당신은 사용자의 감정을 공감하며 대화하는 친절한 상담 챗봇입니다. 간결하게 답하세요.";

const NO_DIARY: &str = "No diary provided";
const NO_PLATFORM: &str = "No platform subscribed";

/// 推荐模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// 不限平台
    AllPlatforms,
    /// 仅限已订阅平台
    SubscribedPlatform,
}

/// 构造推荐提示词
pub fn recommendation_prompt(
    mode: PromptMode,
    calendar: &Calendar,
    entry: &DiaryEntry,
    emoticons: &Emoticons,
) -> Result<String> {
    let emoticons_json = serde_json::to_string(emoticons)?;
    let diary = entry
        .diary
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(NO_DIARY);

    let prompt = match mode {
        PromptMode::AllPlatforms => format!(
            "{}\n\nEmoticons Details: {}, Diary: {}",
            RECOMMEND_INSTRUCTION, emoticons_json, diary
        ),
        PromptMode::SubscribedPlatform => {
            let platform = calendar
                .subscribe_platform
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(NO_PLATFORM);
            format!(
                "{} {}\n\nEmoticons Details: {}, Diary: {}, Subscribed Platform: {}",
                RECOMMEND_INSTRUCTION, SUBSCRIBED_INSTRUCTION, emoticons_json, diary, platform
            )
        }
    };
    Ok(prompt)
}

/// 构造聊天提示词
pub fn chat_prompt(question: &str) -> String {
    format!("{}\n\n{}", CHAT_INSTRUCTION, question.trim())
}
