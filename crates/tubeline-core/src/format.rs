use crate::{outline::build_outline, types::Outline};

const EMPTY_INTRODUCTION: &str = "No transcript content available.";

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Render an outline as a blog-style markdown document
pub fn format_outline_markdown(outline: &Outline) -> String {
    let mut output = String::new();

    output.push_str("# Video Transcript Analysis and Outline\n\n");
    output.push_str(&format!("**Source Video:** {}\n\n", outline.source));

    output.push_str("## Introduction\n\n");
    output.push_str(
        outline
            .introduction
            .as_deref()
            .unwrap_or(EMPTY_INTRODUCTION),
    );
    output.push_str("\n\n");

    output.push_str("## Main Content Points\n\n");
    for (i, section) in outline.sections.iter().enumerate() {
        output.push_str(&format!("### Section {}\n\n{}\n\n", i + 1, section));
    }

    output.push_str("## Key Takeaways\n\n");
    output.push_str("Based on the transcript analysis, the main points discussed include:\n\n");
    for takeaway in &outline.key_takeaways {
        output.push_str(&format!(
            "- **{}** (mentioned {} times)\n",
            capitalize(&takeaway.word),
            takeaway.mentions
        ));
    }

    output.push_str("\n## Conclusion\n\n");
    output.push_str(
        "This video covers various topics as outlined above. The transcript provides insights \
         into the speaker's main points and discussion themes.\n\n",
    );
    output.push_str("---\n\n");
    output.push_str(
        "*Note: This outline was automatically generated from the video transcript. Some \
         context and nuances may be lost in the automated analysis.*\n",
    );

    output
}

/// Build and render the outline for a normalized transcript in one go
pub fn format_outline(transcript: &str, source: &str) -> String {
    format_outline_markdown(&build_outline(transcript, source))
}

/// First `limit` characters of `text`, with `...` appended when it was cut
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(75.4), "01:15");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("alpha"), "Alpha");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_empty_transcript_outline() {
        let doc = format_outline("", "https://youtu.be/abc");
        assert!(doc.contains("## Introduction\n\nNo transcript content available.\n\n"));
        assert!(!doc.contains("### Section"));
        assert!(doc.contains(
            "Based on the transcript analysis, the main points discussed include:\n\n\n## Conclusion"
        ));
    }

    #[test]
    fn test_full_document_layout() {
        let transcript = "Rust ownership matters. Ownership rules are strict. \
                          Borrowing follows ownership. Lifetimes too. Final words here.";
        let doc = format_outline(transcript, "https://www.youtube.com/watch?v=abc");

        let expected = "# Video Transcript Analysis and Outline\n\n\
            **Source Video:** https://www.youtube.com/watch?v=abc\n\n\
            ## Introduction\n\n\
            Rust ownership matters Ownership rules are strict Borrowing follows ownership Lifetimes too\n\n\
            ## Main Content Points\n\n\
            ### Section 1\n\nFinal words here\n\n\
            ## Key Takeaways\n\n\
            Based on the transcript analysis, the main points discussed include:\n\n\
            - **Ownership** (mentioned 3 times)\n\
            \n## Conclusion\n\n\
            This video covers various topics as outlined above. The transcript provides insights into the speaker's main points and discussion themes.\n\n\
            ---\n\n\
            *Note: This outline was automatically generated from the video transcript. Some context and nuances may be lost in the automated analysis.*\n";
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_takeaway_bullet() {
        let doc = format_outline("alpha alpha alpha beta beta gamma", "src");
        assert!(doc.contains("- **Alpha** (mentioned 3 times)\n"));
        assert_eq!(doc.matches("- **").count(), 1);
    }

    #[test]
    fn test_output_is_deterministic() {
        let transcript = "zebra apple zebra apple mango mango zebra apple mango. \
                          Second sentence here. Third one";
        let first = format_outline(transcript, "src");
        let second = format_outline(transcript, "src");
        assert_eq!(first, second);

        let zebra = first.find("**Zebra**").unwrap();
        let apple = first.find("**Apple**").unwrap();
        let mango = first.find("**Mango**").unwrap();
        assert!(zebra < apple && apple < mango);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("exactly", 7), "exactly");
        assert_eq!(preview("truncate me", 8), "truncate...");
        assert_eq!(preview("héllo wörld", 4), "héll...");
    }
}
