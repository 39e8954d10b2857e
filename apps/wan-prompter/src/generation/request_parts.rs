//! Request Assembler — packs system prompt, subject and optional image into content parts.

use tracing::debug;

use crate::errors::PrompterError;
use crate::generation::prompts::USER_SUBJECT_LABEL;
use crate::llm_client::{ContentPart, InlineData};
use crate::models::image::ImageBatch;

pub const PNG_MIME: &str = "image/png";

/// First part is always the combined text; a second image part follows only
/// when a reference image is given (first frame only).
pub fn assemble_parts(
    system_prompt: &str,
    enhanced_subject: &str,
    reference_image: Option<&ImageBatch>,
) -> Result<Vec<ContentPart>, PrompterError> {
    let mut parts = vec![ContentPart::Text {
        text: format!("{system_prompt}\n\n{USER_SUBJECT_LABEL} {enhanced_subject}"),
    }];

    if let Some(image) = reference_image {
        debug!("Attaching first of {} reference frame(s) as {PNG_MIME}", image.frames());
        parts.push(ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: PNG_MIME.to_string(),
                data: image.first_frame_base64_png()?,
            },
        });
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_request_has_single_part() {
        let parts = assemble_parts("SYSTEM", "Original concept: fox", None).unwrap();
        assert_eq!(parts.len(), 1);
        match &parts[0] {
            ContentPart::Text { text } => {
                assert_eq!(text, "SYSTEM\n\nUser Subject: Original concept: fox")
            }
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[test]
    fn test_image_becomes_second_part() {
        let batch = ImageBatch::new(3, 1, 1, 3, vec![0.2; 9]).unwrap();
        let parts = assemble_parts("S", "U", Some(&batch)).unwrap();
        assert_eq!(parts.len(), 2, "extra frames never add parts");
        match &parts[1] {
            ContentPart::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/png");
                assert_eq!(inline_data.data, batch.first_frame_base64_png().unwrap());
            }
            other => panic!("expected inline data, got {other:?}"),
        }
    }

    #[test]
    fn test_parts_serialize_in_gemini_shape() {
        let batch = ImageBatch::new(1, 1, 1, 1, vec![1.0]).unwrap();
        let parts = assemble_parts("S", "U", Some(&batch)).unwrap();
        let json = serde_json::to_value(&parts).unwrap();
        assert_eq!(json[0]["text"], "S\n\nUser Subject: U");
        assert_eq!(json[1]["inlineData"]["mimeType"], "image/png");
        assert!(json[1]["inlineData"]["data"].as_str().unwrap().len() > 8);
    }
}
