use serde::{Deserialize, Serialize};

/// A caption track as returned by a caption source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub language_code: String,
    pub is_generated: bool,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

impl Transcript {
    /// Segment texts joined with a single space, in track order.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|seg| seg.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// End of the last segment, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.start + s.duration)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub source: String,
    pub introduction: Option<String>,
    pub sections: Vec<String>,
    pub key_takeaways: Vec<KeyTakeaway>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTakeaway {
    pub word: String,
    pub mentions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, text: &str) -> Segment {
        Segment {
            start,
            duration: 2.0,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_text_joins_segments_in_order() {
        let transcript = Transcript {
            video_id: "abc".into(),
            language_code: "en".into(),
            is_generated: false,
            segments: vec![seg(0.0, "first"), seg(2.0, "second"), seg(4.0, "third")],
        };
        assert_eq!(transcript.text(), "first second third");
        assert_eq!(transcript.duration_seconds(), 6.0);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript {
            video_id: "abc".into(),
            language_code: "en".into(),
            is_generated: true,
            segments: Vec::new(),
        };
        assert_eq!(transcript.text(), "");
        assert_eq!(transcript.duration_seconds(), 0.0);
    }
}
