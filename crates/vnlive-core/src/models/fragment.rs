//! 인식 조각 모델.
//!
//! 인식 엔진이 이미지 한 장에서 읽기 순서대로 내놓는 텍스트 단위.

use serde::{Deserialize, Serialize};

/// 조각의 화면 영역
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// 바운딩 박스 X 좌표
    pub x: i32,
    /// 바운딩 박스 Y 좌표
    pub y: i32,
    /// 바운딩 박스 너비
    pub width: u32,
    /// 바운딩 박스 높이
    pub height: u32,
}

/// 인식 조각
///
/// 코어는 `text`만 사용한다. `confidence`/`region`은 엔진이 주는 그대로 전달된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedFragment {
    /// 인식된 텍스트
    pub text: String,
    /// 인식 신뢰도 (0.0 ~ 1.0, 엔진이 제공하는 경우)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// 화면 영역 (엔진이 제공하는 경우)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl RecognizedFragment {
    /// 텍스트만 있는 조각
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            region: None,
        }
    }
}

/// 인식 1회의 결과: 읽기 순서의 조각 목록
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognizedText {
    fragments: Vec<RecognizedFragment>,
}

impl RecognizedText {
    /// 조각 목록으로 생성
    pub fn new(fragments: Vec<RecognizedFragment>) -> Self {
        Self { fragments }
    }

    /// 조각 수
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// 조각이 하나도 없는지
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// 구분자 없이 이어 붙인 전체 텍스트
    ///
    /// 일본어에는 단어 경계 공백이 없으므로 공백으로 잇지 않는다.
    pub fn joined(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

impl FromIterator<RecognizedFragment> for RecognizedText {
    fn from_iter<I: IntoIterator<Item = RecognizedFragment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
